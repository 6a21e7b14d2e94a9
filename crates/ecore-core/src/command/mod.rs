mod add;
mod compound;
mod r#move;
mod remove;
mod set;
mod stack;

pub use add::Add;
pub use compound::Compound;
pub use r#move::Move;
pub use remove::Remove;
pub use set::Set;
pub use stack::CommandStack;

use crate::error::ModelError;
use crate::instance::InstanceId;
use crate::model::Model;
use ecore_schema::feature::FeatureId;

///
/// Command
/// A reified mutation: feasibility-checked, executable, undoable,
/// redoable. Every command owns its `owner` and resolves its feature
/// once, by identity, the first time `can_execute` or `execute` is asked
/// for it.
///

pub trait Command {
    /// Takes `&mut Model` rather than `&Model`: peeking a many-valued
    /// feature's current length may need to lazily materialize its empty
    /// collection first, so feasibility-checking shares the same entry
    /// point as mutation.
    fn can_execute(&mut self, model: &mut Model) -> bool;
    fn execute(&mut self, model: &mut Model) -> Result<(), ModelError>;
    fn can_undo(&self, model: &Model) -> bool;
    fn undo(&mut self, model: &mut Model) -> Result<(), ModelError>;
    fn redo(&mut self, model: &mut Model) -> Result<(), ModelError>;

    /// Label used in `ModelError::CannotExecute`; overridden per command.
    fn label(&self) -> &'static str;
}

///
/// FeatureRef
/// A feature named by string until the first feasibility check resolves
/// it, in place, to the exact `FeatureId`: if the feature was given as a
/// string, it is replaced in-place by the resolved feature before
/// execution — identity, not name, from then on.
///

#[derive(Clone, Debug)]
pub enum FeatureRef {
    Name(String),
    Resolved(FeatureId),
}

impl FeatureRef {
    #[must_use]
    pub fn by_name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    #[must_use]
    pub const fn resolved(id: FeatureId) -> Self {
        Self::Resolved(id)
    }

    /// Resolve against `owner`'s class if still a name, caching the result.
    pub fn resolve(&mut self, model: &Model, owner: InstanceId) -> Option<FeatureId> {
        match self {
            Self::Resolved(id) => Some(*id),
            Self::Name(name) => {
                let class = model.class_of(owner);
                let id = model.registry().find_structural_feature(class, name)?;
                *self = Self::Resolved(id);
                Some(id)
            }
        }
    }

    #[must_use]
    pub const fn id(&self) -> Option<FeatureId> {
        match self {
            Self::Resolved(id) => Some(*id),
            Self::Name(_) => None,
        }
    }
}

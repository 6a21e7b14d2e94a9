use super::{Command, FeatureRef};
use crate::error::ModelError;
use crate::instance::InstanceId;
use crate::model::{Model, Slot};
use crate::value::Value;
use ecore_schema::feature::FeatureId;

///
/// Set
/// Scalar-feature assignment with undo/redo. Applies only to
/// `!feature.many()`.
///

#[derive(Clone, Debug)]
pub struct Set {
    owner: InstanceId,
    feature: FeatureRef,
    value: Value,
    previous_value: Option<Value>,
}

impl Set {
    #[must_use]
    pub fn by_name(owner: InstanceId, name: impl Into<String>, value: Value) -> Self {
        Self {
            owner,
            feature: FeatureRef::by_name(name),
            value,
            previous_value: None,
        }
    }

    #[must_use]
    pub fn by_feature(owner: InstanceId, feature: FeatureId, value: Value) -> Self {
        Self {
            owner,
            feature: FeatureRef::resolved(feature),
            value,
            previous_value: None,
        }
    }
}

impl Command for Set {
    fn label(&self) -> &'static str {
        "Set"
    }

    fn can_execute(&mut self, model: &mut Model) -> bool {
        let Some(fid) = self.feature.resolve(model, self.owner) else {
            return false;
        };
        !model.registry().feature(fid).many()
    }

    fn execute(&mut self, model: &mut Model) -> Result<(), ModelError> {
        if !self.can_execute(model) {
            return Err(ModelError::CannotExecute {
                command: self.label().to_string(),
            });
        }
        let fid = self.feature.id().expect("can_execute resolved it");
        let name = model.registry().feature(fid).name.clone();
        let previous = match model.e_get(self.owner, &name)? {
            Slot::Scalar(v) => v,
            Slot::Many(_) => unreachable!("can_execute rejects many-valued features"),
        };
        self.previous_value = Some(previous);
        model.set_feature(self.owner, fid, self.value.clone(), true)
    }

    fn can_undo(&self, _model: &Model) -> bool {
        self.previous_value.is_some()
    }

    fn undo(&mut self, model: &mut Model) -> Result<(), ModelError> {
        let fid = self.feature.id().ok_or_else(|| ModelError::CannotExecute {
            command: self.label().to_string(),
        })?;
        let previous = self.previous_value.clone().ok_or_else(|| ModelError::CannotExecute {
            command: self.label().to_string(),
        })?;
        model.set_feature(self.owner, fid, previous, true)
    }

    fn redo(&mut self, model: &mut Model) -> Result<(), ModelError> {
        let fid = self.feature.id().ok_or_else(|| ModelError::CannotExecute {
            command: self.label().to_string(),
        })?;
        model.set_feature(self.owner, fid, self.value.clone(), true)
    }
}

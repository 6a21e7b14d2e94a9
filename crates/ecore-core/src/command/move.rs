use super::{Command, FeatureRef};
use crate::error::ModelError;
use crate::instance::InstanceId;
use crate::model::{Model, Slot};
use crate::value::Value;
use ecore_schema::feature::FeatureId;

///
/// Move
/// Repositions an element within a many-valued feature's collection.
/// Exactly one of `from_index`/`value` is supplied at construction; the
/// other is resolved the first time `can_execute` runs.
///

#[derive(Clone, Debug)]
pub struct Move {
    owner: InstanceId,
    feature: FeatureRef,
    from_index: Option<usize>,
    to_index: usize,
    value: Option<Value>,
    resolved_from: Option<usize>,
    resolved_value: Option<Value>,
}

impl Move {
    fn new(
        owner: InstanceId,
        feature: FeatureRef,
        from_index: Option<usize>,
        to_index: usize,
        value: Option<Value>,
    ) -> Result<Self, ModelError> {
        if from_index.is_some() == value.is_some() {
            return Err(ModelError::MoveConstruction);
        }
        Ok(Self {
            owner,
            feature,
            from_index,
            to_index,
            value,
            resolved_from: None,
            resolved_value: None,
        })
    }

    #[must_use]
    pub fn by_index(owner: InstanceId, name: impl Into<String>, from_index: usize, to_index: usize) -> Self {
        Self::new(owner, FeatureRef::by_name(name), Some(from_index), to_index, None)
            .expect("from_index-only construction always satisfies the exactly-one-of invariant")
    }

    #[must_use]
    pub fn by_value(owner: InstanceId, name: impl Into<String>, value: Value, to_index: usize) -> Self {
        Self::new(owner, FeatureRef::by_name(name), None, to_index, Some(value))
            .expect("value-only construction always satisfies the exactly-one-of invariant")
    }

    #[must_use]
    pub fn by_feature_index(owner: InstanceId, feature: FeatureId, from_index: usize, to_index: usize) -> Self {
        Self::new(owner, FeatureRef::resolved(feature), Some(from_index), to_index, None)
            .expect("from_index-only construction always satisfies the exactly-one-of invariant")
    }
}

impl Command for Move {
    fn label(&self) -> &'static str {
        "Move"
    }

    fn can_execute(&mut self, model: &mut Model) -> bool {
        let Some(fid) = self.feature.resolve(model, self.owner) else {
            return false;
        };
        if !model.registry().feature(fid).many() {
            return false;
        }
        let name = model.registry().feature(fid).name.clone();
        let items = match model.e_get(self.owner, &name) {
            Ok(Slot::Many(c)) => c,
            _ => return false,
        };
        let len = items.len();

        let (from, value) = match (self.from_index, &self.value) {
            (Some(i), None) => {
                if i >= len {
                    return false;
                }
                (i, items.get(i).cloned())
            }
            (None, Some(v)) => (items.index_of(v).unwrap_or(usize::MAX), Some(v.clone())),
            _ => unreachable!("constructor enforces exactly one of from_index/value"),
        };
        let Some(value) = value else { return false };
        if from >= len || items.index_of(&value).is_none() {
            return false;
        }

        self.resolved_from = Some(from);
        self.resolved_value = Some(value);
        true
    }

    fn execute(&mut self, model: &mut Model) -> Result<(), ModelError> {
        if !self.can_execute(model) {
            return Err(ModelError::CannotExecute {
                command: self.label().to_string(),
            });
        }
        let fid = self.feature.id().expect("can_execute resolved it");
        let from = self.resolved_from.expect("can_execute set it");
        let value = self.resolved_value.clone().expect("can_execute set it");
        model.collection_remove_at(self.owner, fid, from)?;
        model.collection_insert(self.owner, fid, Some(self.to_index), value)?;
        Ok(())
    }

    fn can_undo(&self, model: &Model) -> bool {
        let (Some(fid), Some(value)) = (self.feature.id(), &self.resolved_value) else {
            return false;
        };
        model.collection_value_at(self.owner, fid, self.to_index).as_ref() == Some(value)
    }

    fn undo(&mut self, model: &mut Model) -> Result<(), ModelError> {
        if !self.can_undo(model) {
            return Err(ModelError::CannotExecute {
                command: self.label().to_string(),
            });
        }
        let fid = self.feature.id().expect("checked by can_undo");
        let from = self.resolved_from.expect("set by the preceding execute");
        let value = self.resolved_value.clone().expect("set by the preceding execute");
        model.collection_remove_at(self.owner, fid, self.to_index)?;
        model.collection_insert(self.owner, fid, Some(from), value)?;
        Ok(())
    }

    fn redo(&mut self, model: &mut Model) -> Result<(), ModelError> {
        self.execute(model)
    }
}

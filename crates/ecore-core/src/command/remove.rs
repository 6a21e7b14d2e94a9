use super::{Command, FeatureRef};
use crate::error::ModelError;
use crate::instance::InstanceId;
use crate::model::Model;
use crate::value::Value;
use ecore_schema::feature::FeatureId;

///
/// Remove
/// Removes `value` from a many-valued feature's collection, by explicit
/// `index` if given, else by first occurrence.
///

#[derive(Clone, Debug)]
pub struct Remove {
    owner: InstanceId,
    feature: FeatureRef,
    value: Value,
    index: Option<usize>,
    executed_index: Option<usize>,
}

impl Remove {
    #[must_use]
    pub fn by_name(owner: InstanceId, name: impl Into<String>, value: Value, index: Option<usize>) -> Self {
        Self {
            owner,
            feature: FeatureRef::by_name(name),
            value,
            index,
            executed_index: None,
        }
    }

    #[must_use]
    pub fn by_feature(owner: InstanceId, feature: FeatureId, value: Value, index: Option<usize>) -> Self {
        Self {
            owner,
            feature: FeatureRef::resolved(feature),
            value,
            index,
            executed_index: None,
        }
    }
}

impl Command for Remove {
    fn label(&self) -> &'static str {
        "Remove"
    }

    fn can_execute(&mut self, model: &mut Model) -> bool {
        let Some(fid) = self.feature.resolve(model, self.owner) else {
            return false;
        };
        model.registry().feature(fid).many() && model.collection_contains(self.owner, fid, &self.value)
    }

    fn execute(&mut self, model: &mut Model) -> Result<(), ModelError> {
        if !self.can_execute(model) {
            return Err(ModelError::CannotExecute {
                command: self.label().to_string(),
            });
        }
        let fid = self.feature.id().expect("can_execute resolved it");
        let index = if let Some(i) = self.index {
            let removed = model.collection_remove_at(self.owner, fid, i)?;
            if removed != self.value {
                return Err(ModelError::CannotExecute {
                    command: self.label().to_string(),
                });
            }
            i
        } else {
            model.collection_remove_value(self.owner, fid, &self.value)?
        };
        self.executed_index = Some(index);
        Ok(())
    }

    fn can_undo(&self, _model: &Model) -> bool {
        self.executed_index.is_some()
    }

    fn undo(&mut self, model: &mut Model) -> Result<(), ModelError> {
        let fid = self.feature.id().ok_or_else(|| ModelError::CannotExecute {
            command: self.label().to_string(),
        })?;
        let index = self.executed_index.ok_or_else(|| ModelError::CannotExecute {
            command: self.label().to_string(),
        })?;
        model.collection_insert(self.owner, fid, Some(index), self.value.clone())?;
        Ok(())
    }

    fn redo(&mut self, model: &mut Model) -> Result<(), ModelError> {
        let fid = self.feature.id().ok_or_else(|| ModelError::CannotExecute {
            command: self.label().to_string(),
        })?;
        let index = self.executed_index.ok_or_else(|| ModelError::CannotExecute {
            command: self.label().to_string(),
        })?;
        model.collection_remove_at(self.owner, fid, index)?;
        Ok(())
    }
}

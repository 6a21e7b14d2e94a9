use super::{Command, FeatureRef};
use crate::error::ModelError;
use crate::instance::InstanceId;
use crate::model::{Model, Slot};
use crate::value::Value;
use ecore_schema::feature::FeatureId;

///
/// Add
/// Insert (or append) a value into a many-valued feature's collection,
/// with undo/redo.
///

#[derive(Clone, Debug)]
pub struct Add {
    owner: InstanceId,
    feature: FeatureRef,
    value: Value,
    index: Option<usize>,
    executed_index: Option<usize>,
}

impl Add {
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

impl Command for Add {
    fn label(&self) -> &'static str {
        "Add"
    }

    fn can_execute(&mut self, model: &mut Model) -> bool {
        let Some(fid) = self.feature.resolve(model, self.owner) else {
            return false;
        };
        if !model.registry().feature(fid).many() || self.value.is_null() {
            return false;
        }
        if let Some(idx) = self.index {
            let name = model.registry().feature(fid).name.clone();
            let len = match model.e_get(self.owner, &name) {
                Ok(Slot::Many(c)) => c.len(),
                _ => return false,
            };
            if idx > len {
                return false;
            }
        }
        true
    }

    fn execute(&mut self, model: &mut Model) -> Result<(), ModelError> {
        if !self.can_execute(model) {
            return Err(ModelError::CannotExecute {
                command: self.label().to_string(),
            });
        }
        let fid = self.feature.id().expect("can_execute resolved it");
        let idx = match self.index {
            Some(i) => i,
            None => {
                let name = model.registry().feature(fid).name.clone();
                match model.e_get(self.owner, &name)? {
                    Slot::Many(c) => c.len(),
                    Slot::Scalar(_) => unreachable!("can_execute rejects scalar features"),
                }
            }
        };
        self.executed_index = Some(idx);
        model.collection_insert(self.owner, fid, Some(idx), self.value.clone())?;
        Ok(())
    }

    fn can_undo(&self, model: &Model) -> bool {
        let Some(fid) = self.feature.id() else {
            return false;
        };
        model.collection_contains(self.owner, fid, &self.value)
    }

    fn undo(&mut self, model: &mut Model) -> Result<(), ModelError> {
        let fid = self.feature.id().ok_or_else(|| ModelError::CannotExecute {
            command: self.label().to_string(),
        })?;
        let idx = self.executed_index.ok_or_else(|| ModelError::CannotExecute {
            command: self.label().to_string(),
        })?;
        model.collection_remove_at(self.owner, fid, idx)?;
        Ok(())
    }

    fn redo(&mut self, model: &mut Model) -> Result<(), ModelError> {
        let fid = self.feature.id().ok_or_else(|| ModelError::CannotExecute {
            command: self.label().to_string(),
        })?;
        let idx = self.executed_index.ok_or_else(|| ModelError::CannotExecute {
            command: self.label().to_string(),
        })?;
        model.collection_insert(self.owner, fid, Some(idx), self.value.clone())?;
        Ok(())
    }
}

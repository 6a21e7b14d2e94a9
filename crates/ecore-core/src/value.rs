use crate::instance::InstanceId;
use ecore_schema::prelude::{DataValue, EnumId};

///
/// Value
/// Host-language representation of anything a feature slot can hold:
/// nothing, a primitive, an enum literal, or a reference to another
/// instance. `isinstance` is implemented against this type in
/// `crate::model`, where class lookups are available.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Data(DataValue),
    Enum(EnumId, u32),
    Instance(InstanceId),
}

impl Value {
    #[must_use]
    pub const fn as_instance(&self) -> Option<InstanceId> {
        match self {
            Self::Instance(id) => Some(*id),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Host-type label used in `ModelError::BadValue` messages.
    #[must_use]
    pub fn host_type_name(&self) -> String {
        match self {
            Self::Null => "null".to_string(),
            Self::Data(d) => format!("{:?}", d.kind()),
            Self::Enum(id, _) => format!("{id:?}"),
            Self::Instance(id) => format!("{id:?}"),
        }
    }
}

impl From<DataValue> for Value {
    fn from(d: DataValue) -> Self {
        Self::Data(d)
    }
}

impl From<InstanceId> for Value {
    fn from(id: InstanceId) -> Self {
        Self::Instance(id)
    }
}

use crate::class::ClassId;
use crate::datatype::DataTypeId;
use crate::enum_type::EnumId;

///
/// Classifier
/// A named type: one of `DataType`, `Enum`, or `Class`. `Enum` is kept
/// distinct from `DataType` at this level, since an enum's values are
/// restricted to its own literals, but both participate in the same
/// type-check surface.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Classifier {
    DataType(DataTypeId),
    Enum(EnumId),
    Class(ClassId),
}

impl Classifier {
    #[must_use]
    pub const fn as_class(&self) -> Option<ClassId> {
        match self {
            Self::Class(id) => Some(*id),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_enum(&self) -> Option<EnumId> {
        match self {
            Self::Enum(id) => Some(*id),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_datatype(&self) -> Option<DataTypeId> {
        match self {
            Self::DataType(id) => Some(*id),
            _ => None,
        }
    }
}

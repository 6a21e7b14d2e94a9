use thiserror::Error as ThisError;

///
/// SchemaError
/// Structured error for metamodel-graph construction and lookup.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SchemaError {
    #[error("no classifier named '{name}' in the search space")]
    NoSuchClassifier { name: String },

    #[error("'{name}' is not a data type")]
    NotADataType { name: String },

    #[error("'{name}' is not an enum")]
    NotAnEnum { name: String },

    #[error("'{name}' is not a class")]
    NotAClass { name: String },

    #[error("'{value}' is not a member of enum '{enum_name}'")]
    NotAnEnumLiteral { enum_name: String, value: String },

    #[error("no enum literal at ordinal {ordinal} in '{enum_name}'")]
    NoSuchOrdinal { enum_name: String, ordinal: u32 },
}

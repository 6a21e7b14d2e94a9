use std::collections::BTreeMap;

///
/// DataValue
/// Host-language representation of a `DataType`-typed attribute value.
///

#[derive(Clone, Debug, PartialEq)]
pub enum DataValue {
    Str(String),
    Bool(bool),
    Int(i64),
    StringMap(BTreeMap<String, String>),
    /// Opaque diagnostic payload; carried verbatim, never parsed.
    Diagnostic(String),
}

impl DataValue {
    #[must_use]
    pub const fn kind(&self) -> DataTypeId {
        match self {
            Self::Str(_) => DataTypeId::STRING,
            Self::Bool(_) => DataTypeId::BOOLEAN,
            Self::Int(_) => DataTypeId::INTEGER,
            Self::StringMap(_) => DataTypeId::STRING_MAP,
            Self::Diagnostic(_) => DataTypeId::DIAGNOSTIC_CHAIN,
        }
    }
}

///
/// DataTypeId
/// Handle into `MetaRegistry::datatypes`. The five built-ins are registered
/// at fixed positions by `MetaRegistry::new`, so they can be named as
/// associated constants without a lookup.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct DataTypeId(pub(crate) usize);

impl DataTypeId {
    pub const STRING: Self = Self(0);
    pub const BOOLEAN: Self = Self(1);
    pub const INTEGER: Self = Self(2);
    pub const STRING_MAP: Self = Self(3);
    pub const DIAGNOSTIC_CHAIN: Self = Self(4);
}

///
/// DataTypeDef
/// A named primitive type: a default value and an optional string parser.
/// `from_string` is identity (returns the value that would result from
/// parsing, or `None` if the string is not a syntactically valid value of
/// this type) for data types that have no custom parser.
///

pub struct DataTypeDef {
    pub name: String,
    pub default: DataValue,
    pub from_string: fn(&str) -> DataValue,
}

impl DataTypeDef {
    /// Built-in `String`: identity parser, default `""`.
    fn string() -> Self {
        Self {
            name: "String".to_string(),
            default: DataValue::Str(String::new()),
            from_string: |s| DataValue::Str(s.to_string()),
        }
    }

    /// Built-in `Boolean`: parses `"True"`/`"true"` as `true`, else `false`.
    fn boolean() -> Self {
        Self {
            name: "Boolean".to_string(),
            default: DataValue::Bool(false),
            from_string: |s| DataValue::Bool(s == "True" || s == "true"),
        }
    }

    /// Built-in `Integer`: parses decimal, defaults to `0` on failure.
    fn integer() -> Self {
        Self {
            name: "Integer".to_string(),
            default: DataValue::Int(0),
            from_string: |s| DataValue::Int(s.parse().unwrap_or(0)),
        }
    }

    /// Built-in `StringMap`: map of string to string, default empty.
    /// No string encoding is defined for it, so parsing yields the default.
    fn string_map() -> Self {
        Self {
            name: "StringMap".to_string(),
            default: DataValue::StringMap(BTreeMap::new()),
            from_string: |_| DataValue::StringMap(BTreeMap::new()),
        }
    }

    /// Built-in `DiagnosticChain`: opaque string, carried verbatim.
    fn diagnostic_chain() -> Self {
        Self {
            name: "DiagnosticChain".to_string(),
            default: DataValue::Diagnostic(String::new()),
            from_string: |s| DataValue::Diagnostic(s.to_string()),
        }
    }

    /// The five built-ins, in `DataTypeId` order.
    pub(crate) fn builtins() -> Vec<Self> {
        vec![
            Self::string(),
            Self::boolean(),
            Self::integer(),
            Self::string_map(),
            Self::diagnostic_chain(),
        ]
    }
}

use crate::classifier::Classifier;

///
/// EGenericType
/// A possibly-parameterized reference to a classifier. Declared shape only;
/// no generic dispatch is performed anywhere in this crate: declared
/// shapes only, no dispatch semantics.
///

#[derive(Clone, Debug)]
pub struct EGenericType {
    pub classifier: Classifier,
    pub type_arguments: Vec<EGenericType>,
}

impl EGenericType {
    #[must_use]
    pub const fn new(classifier: Classifier) -> Self {
        Self {
            classifier,
            type_arguments: Vec::new(),
        }
    }
}

///
/// ETypeParameter
/// A named generic parameter slot on an operation or class.
///

#[derive(Clone, Debug)]
pub struct ETypeParameter {
    pub name: String,
    pub bounds: Vec<EGenericType>,
}

///
/// EParameter
/// A named, typed operation parameter.
///

#[derive(Clone, Debug)]
pub struct EParameter {
    pub name: String,
    pub e_type: EGenericType,
}

///
/// EOperation
/// A declared operation signature. No dispatch semantics: this crate never
/// invokes an `EOperation`, it only records that one exists.
///

#[derive(Clone, Debug)]
pub struct EOperation {
    pub name: String,
    pub e_type: Option<EGenericType>,
    pub parameters: Vec<EParameter>,
    pub type_parameters: Vec<ETypeParameter>,
    pub exceptions: Vec<EGenericType>,
}

impl EOperation {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            e_type: None,
            parameters: Vec::new(),
            type_parameters: Vec::new(),
            exceptions: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_return_type(mut self, e_type: EGenericType) -> Self {
        self.e_type = Some(e_type);
        self
    }

    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, e_type: EGenericType) -> Self {
        self.parameters.push(EParameter {
            name: name.into(),
            e_type,
        });
        self
    }
}

use crate::feature::FeatureId;
use crate::operation::EOperation;
use crate::registry::MetaRegistry;

///
/// ClassId
/// Handle into `MetaRegistry::classes`.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ClassId(pub(crate) usize);

///
/// EClassData
/// A runtime-defined class: supertypes, own features, own operations.
///
/// `eAllSuperTypes`/`eAllStructuralFeatures`/`findEStructuralFeature` are
/// *not* methods here — they need the registry to resolve `ClassId`s and
/// `FeatureId`s across the whole graph, so they live on `MetaRegistry`
/// (see `registry.rs`).
///

pub struct EClassData {
    pub name: String,
    pub abstract_: bool,
    pub super_types: Vec<ClassId>,
    pub features: Vec<FeatureId>,
    pub operations: Vec<EOperation>,
    /// The classifier describing instances of this meta-entity, once the
    /// bootstrap pass has run. `None` for ordinary user classes; `Some`
    /// only for meta-entities promoted by `bootstrap()`.
    pub meta: Option<ClassId>,
}

impl EClassData {
    #[must_use]
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            abstract_: false,
            super_types: Vec::new(),
            features: Vec::new(),
            operations: Vec::new(),
            meta: None,
        }
    }
}

///
/// EClass
/// Ergonomic, chainable handle over `MetaRegistry::new_class`, mirroring
/// Ecore's `EClass(name, superclass=null|tuple, abstract=false)`
/// constructor. Every `with_*` takes the registry explicitly since the
/// registry — not the handle — owns the data.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EClass(ClassId);

impl EClass {
    #[must_use]
    pub fn new(registry: &mut MetaRegistry, name: impl Into<String>) -> Self {
        Self(registry.new_class(name))
    }

    #[must_use]
    pub fn with_super(self, registry: &mut MetaRegistry, sup: Self) -> Self {
        registry.add_super_type(self.0, sup.0);
        self
    }

    #[must_use]
    pub fn with_supers(self, registry: &mut MetaRegistry, sups: impl IntoIterator<Item = Self>) -> Self {
        for sup in sups {
            registry.add_super_type(self.0, sup.0);
        }
        self
    }

    #[must_use]
    pub fn with_feature(self, registry: &mut MetaRegistry, feature: FeatureId) -> Self {
        registry.add_feature(self.0, feature);
        self
    }

    #[must_use]
    pub fn with_operation(self, registry: &mut MetaRegistry, op: EOperation) -> Self {
        registry.add_operation(self.0, op);
        self
    }

    #[must_use]
    pub fn with_abstract(self, registry: &mut MetaRegistry) -> Self {
        registry.abstract_class(self.0);
        self
    }

    #[must_use]
    pub const fn id(self) -> ClassId {
        self.0
    }
}

impl From<EClass> for ClassId {
    fn from(c: EClass) -> Self {
        c.0
    }
}

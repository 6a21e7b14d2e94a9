use crate::class::{ClassId, EClassData};
use crate::classifier::Classifier;
use crate::datatype::{DataTypeDef, DataTypeId, DataValue};
use crate::enum_type::{EnumDef, EnumId, EnumLiteral};
use crate::error::SchemaError;
use crate::feature::{FeatureDef, FeatureId, FeatureKind, FeatureSpec};
use std::collections::{BTreeMap, BTreeSet};

///
/// MetaRegistry
/// Arena owner for the whole metamodel graph. Classes, data types, enums
/// and features are never behind owning pointers; everything is a
/// `*Id(usize)` handle into one of these `Vec`s, an arena of index handles
/// in place of a graph of cyclic owning pointers.
///

pub struct MetaRegistry {
    classes: Vec<EClassData>,
    datatypes: Vec<DataTypeDef>,
    enums: Vec<EnumDef>,
    features: Vec<FeatureDef>,
    /// `getEClassifier` search space: name -> classifier, seeded with the
    /// built-in data types and populated as classes/enums are registered.
    by_name: BTreeMap<String, Classifier>,
}

impl Default for MetaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MetaRegistry {
    #[must_use]
    pub fn new() -> Self {
        let datatypes = DataTypeDef::builtins();
        let mut by_name = BTreeMap::new();
        for (i, dt) in datatypes.iter().enumerate() {
            by_name.insert(dt.name.clone(), Classifier::DataType(DataTypeId(i)));
        }

        Self {
            classes: Vec::new(),
            datatypes,
            enums: Vec::new(),
            features: Vec::new(),
            by_name,
        }
    }

    ///
    /// getEClassifier
    /// Looks up a classifier by name in this registry's search space.
    ///
    #[must_use]
    pub fn get_eclassifier(&self, name: &str) -> Option<Classifier> {
        self.by_name.get(name).copied()
    }

    // ---------------------------------------------------------------
    // Data types
    // ---------------------------------------------------------------

    #[must_use]
    pub fn datatype(&self, id: DataTypeId) -> &DataTypeDef {
        &self.datatypes[id.0]
    }

    /// Register a user-defined `EDataType(name, default, from_string)`.
    pub fn new_datatype(
        &mut self,
        name: impl Into<String>,
        default: DataValue,
        from_string: fn(&str) -> DataValue,
    ) -> DataTypeId {
        let name = name.into();
        let id = DataTypeId(self.datatypes.len());
        self.datatypes.push(DataTypeDef {
            name: name.clone(),
            default,
            from_string,
        });
        self.by_name.insert(name, Classifier::DataType(id));
        id
    }

    // ---------------------------------------------------------------
    // Enums
    // ---------------------------------------------------------------

    #[must_use]
    pub fn enum_def(&self, id: EnumId) -> &EnumDef {
        &self.enums[id.0]
    }

    /// Register an `EEnum(name, default_value, literals)`.
    pub fn new_enum(&mut self, def: EnumDef) -> EnumId {
        let name = def.name.clone();
        let id = EnumId(self.enums.len());
        self.enums.push(def);
        self.by_name.insert(name, Classifier::Enum(id));
        id
    }

    #[must_use]
    pub fn enum_literal(&self, id: EnumId, ordinal: u32) -> Option<&EnumLiteral> {
        self.enum_def(id).literal_by_ordinal(ordinal)
    }

    // ---------------------------------------------------------------
    // Features
    // ---------------------------------------------------------------

    #[must_use]
    pub fn feature(&self, id: FeatureId) -> &FeatureDef {
        &self.features[id.0]
    }

    /// Register an `EAttribute(name, eType, default_value=null, lower, upper, …)`.
    pub fn new_attribute(
        &mut self,
        spec: FeatureSpec,
        default_value: Option<crate::feature::DefaultValue>,
    ) -> FeatureId {
        self.push_feature(spec.into_attribute_def(default_value))
    }

    /// Register an `EReference(name, eType, lower, upper, containment, eOpposite, …)`.
    /// Opposite assignment is symmetric: the opposite feature's own
    /// `opposite` is updated to point back here too.
    pub fn new_reference(
        &mut self,
        spec: FeatureSpec,
        containment: bool,
        opposite: Option<FeatureId>,
    ) -> FeatureId {
        let id = self.push_feature(spec.into_reference_def(containment, opposite));
        if let Some(opp) = opposite {
            self.set_feature_opposite(opp, Some(id));
        }
        id
    }

    fn push_feature(&mut self, def: FeatureDef) -> FeatureId {
        let id = FeatureId(self.features.len());
        self.features.push(def);
        id
    }

    /// Set `a.eOpposite = b` symmetrically: both features end up pointing
    /// at each other.
    pub fn set_opposite(&mut self, a: FeatureId, b: FeatureId) {
        self.set_feature_opposite(a, Some(b));
        self.set_feature_opposite(b, Some(a));
    }

    fn set_feature_opposite(&mut self, id: FeatureId, opposite: Option<FeatureId>) {
        if let FeatureKind::Reference { opposite: o, .. } = &mut self.features[id.0].kind {
            *o = opposite;
        }
    }

    // ---------------------------------------------------------------
    // Classes
    // ---------------------------------------------------------------

    #[must_use]
    pub fn class(&self, id: ClassId) -> &EClassData {
        &self.classes[id.0]
    }

    /// Register a new, empty `EClass(name)`.
    pub fn new_class(&mut self, name: impl Into<String>) -> ClassId {
        let name = name.into();
        let id = ClassId(self.classes.len());
        self.classes.push(EClassData::new(name.clone()));
        self.by_name.insert(name, Classifier::Class(id));
        id
    }

    /// `abstract(cls)` — marks a metaclass abstract.
    pub fn abstract_class(&mut self, id: ClassId) {
        self.classes[id.0].abstract_ = true;
    }

    #[must_use]
    pub fn is_abstract(&self, id: ClassId) -> bool {
        self.classes[id.0].abstract_
    }

    /// Appends `sup` to `cls.eSuperTypes`. Constructing a class may take a
    /// tuple or single superclass; both append here.
    pub fn add_super_type(&mut self, cls: ClassId, sup: ClassId) {
        self.classes[cls.0].super_types.push(sup);
    }

    pub fn add_feature(&mut self, cls: ClassId, feature: FeatureId) {
        self.classes[cls.0].features.push(feature);
    }

    pub fn add_operation(&mut self, cls: ClassId, op: crate::operation::EOperation) {
        self.classes[cls.0].operations.push(op);
    }

    /// Sets `cls.eClass = meta`. Used only by `bootstrap()` to promote a
    /// meta-entity into an instance of `EClass`.
    pub fn set_meta(&mut self, cls: ClassId, meta: ClassId) {
        self.classes[cls.0].meta = Some(meta);
    }

    ///
    /// eAllSuperTypes
    /// Transitive closure over `eSuperTypes`, excluding `self`, deduplicated.
    /// Ordering is not guaranteed.
    ///
    #[must_use]
    pub fn all_super_types(&self, cls: ClassId) -> BTreeSet<ClassId> {
        let mut seen = BTreeSet::new();
        let mut stack: Vec<ClassId> = self.classes[cls.0].super_types.clone();

        while let Some(next) = stack.pop() {
            if seen.insert(next) {
                stack.extend(self.classes[next.0].super_types.iter().copied());
            }
        }

        seen
    }

    #[must_use]
    pub fn is_subtype_of(&self, cls: ClassId, other: ClassId) -> bool {
        cls == other || self.all_super_types(cls).contains(&other)
    }

    ///
    /// eAllStructuralFeatures
    /// Own features, then features of each transitive supertype
    /// (own-first order).
    ///
    #[must_use]
    pub fn all_structural_features(&self, cls: ClassId) -> Vec<FeatureId> {
        let mut out = self.classes[cls.0].features.clone();
        for sup in &self.classes[cls.0].super_types {
            out.extend(self.all_structural_features(*sup));
        }
        out
    }

    ///
    /// findEStructuralFeature
    /// First feature named `name` in the own-first depth-first traversal
    /// of `self ∪ eAllSuperTypes()`.
    ///
    #[must_use]
    pub fn find_structural_feature(&self, cls: ClassId, name: &str) -> Option<FeatureId> {
        self.all_structural_features(cls)
            .into_iter()
            .find(|f| self.features[f.0].name == name)
    }

    // ---------------------------------------------------------------
    // Typed lookups used by `getEClassifier`-adjacent call sites
    // ---------------------------------------------------------------

    pub fn classifier_as_datatype(&self, c: Classifier, name: &str) -> Result<DataTypeId, SchemaError> {
        c.as_datatype().ok_or_else(|| SchemaError::NotADataType {
            name: name.to_string(),
        })
    }

    pub fn classifier_as_enum(&self, c: Classifier, name: &str) -> Result<EnumId, SchemaError> {
        c.as_enum().ok_or_else(|| SchemaError::NotAnEnum {
            name: name.to_string(),
        })
    }

    pub fn classifier_as_class(&self, c: Classifier, name: &str) -> Result<ClassId, SchemaError> {
        c.as_class().ok_or_else(|| SchemaError::NotAClass {
            name: name.to_string(),
        })
    }
}

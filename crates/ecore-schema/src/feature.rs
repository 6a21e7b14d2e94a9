use crate::classifier::Classifier;
use crate::datatype::DataValue;
use crate::enum_type::EnumId;

///
/// FeatureId
/// Handle into `MetaRegistry::features`, the arena shared by every class.
/// Feature identity is handle equality, not name equality — the command
/// model resolves a feature once and then compares by this id, never by
/// name, from then on.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct FeatureId(pub(crate) usize);

///
/// DefaultValue
/// The default for an attribute, scoped to the value shapes an attribute's
/// `eType` can actually take (a data type or an enum literal).
///

#[derive(Clone, Debug, PartialEq)]
pub enum DefaultValue {
    Data(DataValue),
    EnumLiteral(EnumId, u32),
}

///
/// FeatureKind
/// Tagged variant over the attribute/reference split.
///

#[derive(Clone, Debug)]
pub enum FeatureKind {
    Attribute {
        default_value: Option<DefaultValue>,
    },
    Reference {
        containment: bool,
        opposite: Option<FeatureId>,
    },
}

///
/// FeatureDef
/// Common `EStructuralFeature` attributes plus the attribute/reference-
/// specific payload in `kind`.
///

#[derive(Clone, Debug)]
pub struct FeatureDef {
    pub name: String,
    pub e_type: Classifier,
    pub lower_bound: i64,
    pub upper_bound: i64,
    pub ordered: bool,
    pub unique: bool,
    pub required: bool,
    pub changeable: bool,
    pub volatile: bool,
    pub transient: bool,
    pub unsettable: bool,
    pub derived: bool,
    pub kind: FeatureKind,
}

impl FeatureDef {
    /// `many = upperBound > 1 || upperBound < 0` (negative = unbounded).
    #[must_use]
    pub const fn many(&self) -> bool {
        self.upper_bound > 1 || self.upper_bound < 0
    }

    #[must_use]
    pub const fn is_attribute(&self) -> bool {
        matches!(self.kind, FeatureKind::Attribute { .. })
    }

    #[must_use]
    pub const fn is_reference(&self) -> bool {
        matches!(self.kind, FeatureKind::Reference { .. })
    }

    #[must_use]
    pub const fn containment(&self) -> bool {
        matches!(self.kind, FeatureKind::Reference { containment: true, .. })
    }

    #[must_use]
    pub const fn opposite(&self) -> Option<FeatureId> {
        match self.kind {
            FeatureKind::Reference { opposite, .. } => opposite,
            FeatureKind::Attribute { .. } => None,
        }
    }

    #[must_use]
    pub const fn default_value(&self) -> Option<&DefaultValue> {
        match &self.kind {
            FeatureKind::Attribute { default_value } => default_value.as_ref(),
            FeatureKind::Reference { .. } => None,
        }
    }
}

///
/// FeatureSpec
/// Construction-time parameters for a new feature, mirroring Ecore's
/// `EAttribute(name, eType, default_value=null, lower=0, upper=1, …)` /
/// `EReference(name, eType, lower=0, upper=1, containment=false,
/// eOpposite=null, …)` constructors. Built with `#[must_use]` `with_*`
/// setters, then handed to `MetaRegistry::new_attribute`/`new_reference`.
///

#[derive(Clone, Debug)]
pub struct FeatureSpec {
    pub name: String,
    pub e_type: Classifier,
    pub lower_bound: i64,
    pub upper_bound: i64,
    pub ordered: bool,
    pub unique: bool,
    pub required: bool,
    pub changeable: bool,
    pub volatile: bool,
    pub transient: bool,
    pub unsettable: bool,
    pub derived: bool,
}

impl FeatureSpec {
    #[must_use]
    pub fn new(name: impl Into<String>, e_type: Classifier) -> Self {
        Self {
            name: name.into(),
            e_type,
            lower_bound: 0,
            upper_bound: 1,
            ordered: false,
            unique: false,
            required: false,
            changeable: true,
            volatile: false,
            transient: false,
            unsettable: false,
            derived: false,
        }
    }

    #[must_use]
    pub const fn with_bounds(mut self, lower: i64, upper: i64) -> Self {
        self.lower_bound = lower;
        self.upper_bound = upper;
        self
    }

    #[must_use]
    pub const fn with_ordered(mut self, ordered: bool) -> Self {
        self.ordered = ordered;
        self
    }

    #[must_use]
    pub const fn with_unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    #[must_use]
    pub const fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    fn into_def(self, kind: FeatureKind) -> FeatureDef {
        FeatureDef {
            name: self.name,
            e_type: self.e_type,
            lower_bound: self.lower_bound,
            upper_bound: self.upper_bound,
            ordered: self.ordered,
            unique: self.unique,
            required: self.required,
            changeable: self.changeable,
            volatile: self.volatile,
            transient: self.transient,
            unsettable: self.unsettable,
            derived: self.derived,
            kind,
        }
    }

    pub(crate) fn into_attribute_def(self, default_value: Option<DefaultValue>) -> FeatureDef {
        self.into_def(FeatureKind::Attribute { default_value })
    }

    pub(crate) fn into_reference_def(
        self,
        containment: bool,
        opposite: Option<FeatureId>,
    ) -> FeatureDef {
        self.into_def(FeatureKind::Reference {
            containment,
            opposite,
        })
    }
}

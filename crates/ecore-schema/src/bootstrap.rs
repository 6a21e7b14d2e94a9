//! Promotes the meta-entities this crate's Rust types describe
//! (`EClass`, `EAttribute`, `EReference`, ...) into instances of `EClass`
//! within a `MetaRegistry`, so the metamodel describes itself the way
//! Ecore's own metamodel does.
//!
//! Rust gives us `EClassData`/`FeatureDef`/etc. as host-language structs
//! for free; what's missing is the second pass that says "and each of
//! those structs is *also* a class in the graph it describes". That's
//! what `bootstrap()` performs: declare every meta-entity as a plain
//! `EClass` through the ordinary public builder API, wire supertypes and
//! features the same way a user class would be wired, then close the
//! loop by pointing `EClass`'s own `meta` field at itself.

use crate::class::{ClassId, EClass};
use crate::classifier::Classifier;
use crate::feature::FeatureSpec;
use crate::registry::MetaRegistry;

///
/// MetaIds
/// Stable handles to the bootstrapped meta-entity classes, so callers
/// (and tests) can refer to "the `EClass` class" without a name lookup.
///

#[derive(Clone, Copy, Debug)]
pub struct MetaIds {
    pub e_named_element: ClassId,
    pub e_classifier: ClassId,
    pub e_data_type: ClassId,
    pub e_enum: ClassId,
    pub e_structural_feature: ClassId,
    pub e_attribute: ClassId,
    pub e_reference: ClassId,
    pub e_class: ClassId,
    pub e_operation: ClassId,
    pub e_parameter: ClassId,
}

/// Build a fresh registry and promote every meta-entity into an `EClass`
/// instance of itself, closing the `EClass.eClass = EClass` fixpoint.
#[must_use]
pub fn bootstrap() -> (MetaRegistry, MetaIds) {
    let mut reg = MetaRegistry::new();

    let string_ty = Classifier::DataType(crate::datatype::DataTypeId::STRING);
    let bool_ty = Classifier::DataType(crate::datatype::DataTypeId::BOOLEAN);
    let int_ty = Classifier::DataType(crate::datatype::DataTypeId::INTEGER);

    let e_named_element = EClass::new(&mut reg, "ENamedElement").with_abstract(&mut reg);
    let name_feat = reg.new_attribute(FeatureSpec::new("name", string_ty), None);
    let e_named_element = e_named_element.with_feature(&mut reg, name_feat);

    let e_classifier = EClass::new(&mut reg, "EClassifier")
        .with_super(&mut reg, e_named_element)
        .with_abstract(&mut reg);

    let e_data_type = EClass::new(&mut reg, "EDataType").with_super(&mut reg, e_classifier);

    let e_enum = EClass::new(&mut reg, "EEnum").with_super(&mut reg, e_data_type);

    let e_structural_feature =
        EClass::new(&mut reg, "EStructuralFeature").with_super(&mut reg, e_named_element);
    let lower_feat = reg.new_attribute(FeatureSpec::new("lowerBound", int_ty), None);
    let upper_feat = reg.new_attribute(FeatureSpec::new("upperBound", int_ty), None);
    let ordered_feat = reg.new_attribute(FeatureSpec::new("ordered", bool_ty), None);
    let unique_feat = reg.new_attribute(FeatureSpec::new("unique", bool_ty), None);
    let required_feat = reg.new_attribute(FeatureSpec::new("required", bool_ty), None);
    let changeable_feat = reg.new_attribute(FeatureSpec::new("changeable", bool_ty), None);
    let e_structural_feature = e_structural_feature
        .with_feature(&mut reg, lower_feat)
        .with_feature(&mut reg, upper_feat)
        .with_feature(&mut reg, ordered_feat)
        .with_feature(&mut reg, unique_feat)
        .with_feature(&mut reg, required_feat)
        .with_feature(&mut reg, changeable_feat);

    let e_attribute =
        EClass::new(&mut reg, "EAttribute").with_super(&mut reg, e_structural_feature);

    let e_reference =
        EClass::new(&mut reg, "EReference").with_super(&mut reg, e_structural_feature);
    let containment_feat = reg.new_attribute(FeatureSpec::new("containment", bool_ty), None);
    let e_reference = e_reference.with_feature(&mut reg, containment_feat);

    let e_parameter = EClass::new(&mut reg, "EParameter").with_super(&mut reg, e_named_element);

    let e_operation = EClass::new(&mut reg, "EOperation").with_super(&mut reg, e_named_element);

    let e_class = EClass::new(&mut reg, "EClass").with_super(&mut reg, e_classifier);
    let abstract_feat = reg.new_attribute(FeatureSpec::new("abstract", bool_ty), None);
    let super_types_feat = reg.new_reference(
        FeatureSpec::new("eSuperTypes", Classifier::Class(e_class.id())).with_bounds(0, -1),
        false,
        None,
    );
    let structural_features_feat = reg.new_reference(
        FeatureSpec::new(
            "eStructuralFeatures",
            Classifier::Class(e_structural_feature.id()),
        )
        .with_bounds(0, -1),
        true,
        None,
    );
    let operations_feat = reg.new_reference(
        FeatureSpec::new("eOperations", Classifier::Class(e_operation.id())).with_bounds(0, -1),
        true,
        None,
    );
    let e_class = e_class
        .with_feature(&mut reg, abstract_feat)
        .with_feature(&mut reg, super_types_feat)
        .with_feature(&mut reg, structural_features_feat)
        .with_feature(&mut reg, operations_feat);

    let ids = MetaIds {
        e_named_element: e_named_element.id(),
        e_classifier: e_classifier.id(),
        e_data_type: e_data_type.id(),
        e_enum: e_enum.id(),
        e_structural_feature: e_structural_feature.id(),
        e_attribute: e_attribute.id(),
        e_reference: e_reference.id(),
        e_class: e_class.id(),
        e_operation: e_operation.id(),
        e_parameter: e_parameter.id(),
    };

    // Every meta-entity is an instance of EClass; EClass is, additionally,
    // an instance of itself. Assigned explicitly, not derived.
    for id in [
        ids.e_named_element,
        ids.e_classifier,
        ids.e_data_type,
        ids.e_enum,
        ids.e_structural_feature,
        ids.e_attribute,
        ids.e_reference,
        ids.e_operation,
        ids.e_parameter,
        ids.e_class,
    ] {
        reg.set_meta(id, ids.e_class);
    }
    reg.set_meta(ids.e_class, ids.e_class);

    (reg, ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eclass_is_an_instance_of_itself() {
        let (reg, ids) = bootstrap();
        assert_eq!(reg.class(ids.e_class).meta, Some(ids.e_class));
    }

    #[test]
    fn every_meta_entity_is_an_instance_of_eclass() {
        let (reg, ids) = bootstrap();
        for id in [
            ids.e_named_element,
            ids.e_classifier,
            ids.e_data_type,
            ids.e_enum,
            ids.e_structural_feature,
            ids.e_attribute,
            ids.e_reference,
            ids.e_operation,
            ids.e_parameter,
        ] {
            assert_eq!(reg.class(id).meta, Some(ids.e_class));
        }
    }

    #[test]
    fn eattribute_inherits_name_from_enamed_element() {
        let (reg, ids) = bootstrap();
        let found = reg.find_structural_feature(ids.e_attribute, "name");
        assert!(found.is_some());
    }

    #[test]
    fn eclass_all_super_types_includes_classifier_and_named_element() {
        let (reg, ids) = bootstrap();
        let supers = reg.all_super_types(ids.e_class);
        assert!(supers.contains(&ids.e_classifier));
        assert!(supers.contains(&ids.e_named_element));
    }
}

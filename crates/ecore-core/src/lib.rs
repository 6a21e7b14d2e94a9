//! The instance layer: live model elements bound to `ecore-schema`
//! classes, the four typed-collection flavors, and the reversible
//! command framework built on top of both.

pub mod collection;
pub mod command;
pub mod error;
pub mod instance;
pub mod model;
pub mod value;

///
/// Prelude
/// Domain vocabulary only — no errors, no store internals.
///

pub mod prelude {
    pub use crate::collection::{Collection, CollectionKind};
    pub use crate::command::{Add, Command, CommandStack, Compound, FeatureRef, Move, Remove, Set};
    pub use crate::error::ModelError;
    pub use crate::instance::{InstanceData, InstanceId, InstanceStore};
    pub use crate::model::{Model, Slot};
    pub use crate::value::Value;
}

#[cfg(test)]
mod tests {
    use crate::model::{Model, Slot};
    use crate::value::Value;
    use ecore_schema::feature::FeatureSpec;
    use ecore_schema::prelude::*;

    /// Builds two classes `A`/`B` wired the way S1 (containment transfer)
    /// needs: `A.children: B[*]` containment, `B.parent: A` non-containment
    /// opposite to `A.children`.
    fn containment_fixture() -> (Model, ecore_schema::class::ClassId, ecore_schema::class::ClassId) {
        let mut reg = MetaRegistry::new();
        let a = EClass::new(&mut reg, "A");
        let b = EClass::new(&mut reg, "B");

        let children = reg.new_reference(
            FeatureSpec::new("children", Classifier::Class(b.id())).with_bounds(0, -1),
            true,
            None,
        );
        let parent = reg.new_reference(FeatureSpec::new("parent", Classifier::Class(a.id())), false, None);
        reg.set_opposite(children, parent);
        let a = a.with_feature(&mut reg, children);
        let b = b.with_feature(&mut reg, parent);

        (Model::new(reg), a.id(), b.id())
    }

    #[test]
    fn s1_containment_transfer() {
        let (mut model, a_cls, b_cls) = containment_fixture();
        let a1 = model.new_instance_empty(a_cls).unwrap();
        let a2 = model.new_instance_empty(a_cls).unwrap();
        let b = model.new_instance_empty(b_cls).unwrap();

        model.collection_append(a1, "children", Value::Instance(b)).unwrap();
        assert_eq!(model.e_container(b), Some(a1));
        match model.e_get(b, "parent").unwrap() {
            Slot::Scalar(Value::Instance(p)) => assert_eq!(p, a1),
            other => panic!("expected b.parent == a1, got {other:?}"),
        }

        model.collection_append(a2, "children", Value::Instance(b)).unwrap();
        assert_eq!(model.e_container(b), Some(a2));
        match model.e_get(b, "parent").unwrap() {
            Slot::Scalar(Value::Instance(p)) => assert_eq!(p, a2),
            other => panic!("expected b.parent == a2, got {other:?}"),
        }
        match model.e_get(a1, "children").unwrap() {
            Slot::Many(c) => assert!(!c.contains(&Value::Instance(b))),
            other => panic!("expected a many slot, got {other:?}"),
        }
    }

    trait CollectionAppend {
        fn collection_append(&mut self, id: crate::instance::InstanceId, name: &str, value: Value) -> Result<bool, crate::error::ModelError>;
    }

    impl CollectionAppend for Model {
        fn collection_append(&mut self, id: crate::instance::InstanceId, name: &str, value: Value) -> Result<bool, crate::error::ModelError> {
            let feature = self.resolve_many_feature(id, name)?;
            self.collection_insert(id, feature, None, value)
        }
    }
}

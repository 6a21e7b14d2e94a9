use ecore_core::prelude::*;
use ecore_schema::class::ClassId;
use ecore_schema::enum_type::EnumDef;
use ecore_schema::feature::FeatureSpec;
use ecore_schema::prelude::*;

/// `Node { name: String, tags: String[*] unique unordered, children: Node[*] containment,
/// parent: Node (opposite of children) }`, plus an abstract `Shape` with one
/// concrete subclass `Circle { radius: Integer }`, and a `Status` enum.
struct Fixture {
    model: Model,
    node: ClassId,
    children: FeatureId,
    tags: FeatureId,
    shape: ClassId,
    circle: ClassId,
    status: EnumId,
    color: FeatureId,
}

fn build() -> Fixture {
    let mut reg = MetaRegistry::new();

    let node = EClass::new(&mut reg, "Node");
    let name = reg.new_attribute(FeatureSpec::new("name", Classifier::DataType(DataTypeId::STRING)), None);
    let tags = reg.new_attribute(
        FeatureSpec::new("tags", Classifier::DataType(DataTypeId::STRING)).with_bounds(0, -1),
        None,
    );
    let children = reg.new_reference(
        FeatureSpec::new("children", Classifier::Class(node.id())).with_bounds(0, -1),
        true,
        None,
    );
    let parent = reg.new_reference(FeatureSpec::new("parent", Classifier::Class(node.id())), false, None);
    reg.set_opposite(children, parent);
    let node = node
        .with_feature(&mut reg, name)
        .with_feature(&mut reg, tags)
        .with_feature(&mut reg, children)
        .with_feature(&mut reg, parent);

    let status = reg.new_enum(EnumDef::new("Status", &["ACTIVE", "RETIRED"]));
    let shape = EClass::new(&mut reg, "Shape").with_abstract(&mut reg);
    let color = reg.new_attribute(FeatureSpec::new("color", Classifier::Enum(status)), None);
    let shape = shape.with_feature(&mut reg, color);
    let radius = reg.new_attribute(FeatureSpec::new("radius", Classifier::DataType(DataTypeId::INTEGER)), None);
    let circle = EClass::new(&mut reg, "Circle")
        .with_super(&mut reg, shape)
        .with_feature(&mut reg, radius);

    Fixture {
        model: Model::new(reg),
        node: node.id(),
        children,
        tags,
        shape: shape.id(),
        circle: circle.id(),
        status,
        color,
    }
}

fn s(v: &str) -> Value {
    Value::Data(DataValue::Str(v.to_string()))
}

#[test]
fn s1_reassigning_containment_detaches_from_the_prior_parent() {
    let mut f = build();
    let a1 = f.model.new_instance_empty(f.node).unwrap();
    let a2 = f.model.new_instance_empty(f.node).unwrap();
    let b = f.model.new_instance_empty(f.node).unwrap();

    f.model.collection_insert(a1, f.children, None, Value::Instance(b)).unwrap();
    assert_eq!(f.model.e_container(b), Some(a1));

    f.model.collection_insert(a2, f.children, None, Value::Instance(b)).unwrap();
    assert_eq!(f.model.e_container(b), Some(a2));

    match f.model.e_get(a1, "children").unwrap() {
        Slot::Many(c) => assert!(!c.contains(&Value::Instance(b))),
        other => panic!("expected a many slot, got {other:?}"),
    }
    match f.model.e_get(a2, "children").unwrap() {
        Slot::Many(c) => assert!(c.contains(&Value::Instance(b))),
        other => panic!("expected a many slot, got {other:?}"),
    }
    match f.model.e_get(b, "parent").unwrap() {
        Slot::Scalar(Value::Instance(p)) => assert_eq!(p, a2),
        other => panic!("expected b.parent == a2, got {other:?}"),
    }
}

#[test]
fn s2_undo_restores_the_previous_scalar_value() {
    let mut f = build();
    let a = f.model.new_instance_empty(f.node).unwrap();
    f.model.e_set(a, "name", s("original")).unwrap();

    let mut stack = CommandStack::new();
    stack
        .execute(&mut f.model, Box::new(Set::by_name(a, "name", s("renamed"))))
        .unwrap();
    match f.model.e_get(a, "name").unwrap() {
        Slot::Scalar(v) => assert_eq!(v, s("renamed")),
        other => panic!("expected a scalar, got {other:?}"),
    }

    stack.undo(&mut f.model).unwrap();
    match f.model.e_get(a, "name").unwrap() {
        Slot::Scalar(v) => assert_eq!(v, s("original")),
        other => panic!("expected a scalar, got {other:?}"),
    }

    stack.redo(&mut f.model).unwrap();
    match f.model.e_get(a, "name").unwrap() {
        Slot::Scalar(v) => assert_eq!(v, s("renamed")),
        other => panic!("expected a scalar, got {other:?}"),
    }
    assert!(stack.redo(&mut f.model).is_err());
}

#[test]
fn s3_add_move_remove_round_trip_through_undo() {
    let mut f = build();
    let a = f.model.new_instance_empty(f.node).unwrap();

    let mut stack = CommandStack::new();
    stack
        .execute(&mut f.model, Box::new(Add::by_feature(a, f.tags, s("x"), None)))
        .unwrap();
    stack
        .execute(&mut f.model, Box::new(Add::by_feature(a, f.tags, s("y"), None)))
        .unwrap();
    stack
        .execute(&mut f.model, Box::new(Add::by_feature(a, f.tags, s("z"), Some(0))))
        .unwrap();

    match f.model.e_get(a, "tags").unwrap() {
        Slot::Many(c) => assert_eq!(c.to_vec(), vec![s("z"), s("x"), s("y")]),
        other => panic!("expected a many slot, got {other:?}"),
    }

    stack
        .execute(&mut f.model, Box::new(Move::by_feature_index(a, f.tags, 0, 2)))
        .unwrap();
    match f.model.e_get(a, "tags").unwrap() {
        Slot::Many(c) => assert_eq!(c.to_vec(), vec![s("x"), s("y"), s("z")]),
        other => panic!("expected a many slot, got {other:?}"),
    }

    stack
        .execute(&mut f.model, Box::new(Remove::by_feature(a, f.tags, s("y"), None)))
        .unwrap();
    match f.model.e_get(a, "tags").unwrap() {
        Slot::Many(c) => assert_eq!(c.to_vec(), vec![s("x"), s("z")]),
        other => panic!("expected a many slot, got {other:?}"),
    }

    // Unwind the whole sequence.
    for _ in 0..5 {
        stack.undo(&mut f.model).unwrap();
    }
    match f.model.e_get(a, "tags").unwrap() {
        Slot::Many(c) => assert!(c.is_empty()),
        other => panic!("expected a many slot, got {other:?}"),
    }
    assert!(stack.undo(&mut f.model).is_err());
}

#[test]
fn s4_compound_fails_preflight_if_any_child_cannot_execute() {
    let mut f = build();
    let a = f.model.new_instance_empty(f.node).unwrap();

    // The second child names a feature that doesn't exist on `Node`.
    let compound = Compound::new(vec![
        Box::new(Set::by_name(a, "name", s("ok"))),
        Box::new(Set::by_name(a, "does_not_exist", s("boom"))),
    ]);

    let mut stack = CommandStack::new();
    assert!(stack.execute(&mut f.model, Box::new(compound)).is_err());

    // Neither child actually ran: `name` is untouched.
    assert!(!f.model.e_is_set(a, "name"));
    assert!(stack.is_empty());
}

#[test]
fn s5_instantiating_an_abstract_class_is_rejected() {
    let mut f = build();
    let err = f.model.new_instance_empty(f.shape).unwrap_err();
    assert_eq!(
        err,
        ModelError::AbstractInstantiation {
            class: "Shape".to_string()
        }
    );

    // The concrete subclass instantiates fine and inherits the feature.
    let c = f.model.new_instance_empty(f.circle).unwrap();
    assert_eq!(f.model.class_of(c), f.circle);
    assert!(f.model.registry().is_subtype_of(f.circle, f.shape));
}

#[test]
fn s6_enum_valued_attribute_accepts_only_its_own_literals() {
    let mut f = build();
    let c = f.model.new_instance_empty(f.circle).unwrap();

    // Default is the enum's first literal.
    match f.model.e_get(c, "color").unwrap() {
        Slot::Scalar(Value::Enum(eid, ord)) => {
            assert_eq!(eid, f.status);
            assert_eq!(f.model.registry().enum_literal(eid, ord).unwrap().name, "ACTIVE");
        }
        other => panic!("expected a scalar enum value, got {other:?}"),
    }

    let mut stack = CommandStack::new();
    stack
        .execute(&mut f.model, Box::new(Set::by_feature(c, f.color, s("RETIRED"))))
        .unwrap();
    match f.model.e_get(c, "color").unwrap() {
        Slot::Scalar(Value::Enum(eid, ord)) => {
            assert_eq!(eid, f.status);
            assert_eq!(f.model.registry().enum_literal(eid, ord).unwrap().name, "RETIRED");
        }
        other => panic!("expected a scalar enum value, got {other:?}"),
    }

    let foreign_enum = f.model.registry_mut().new_enum(EnumDef::new("Other", &["X"]));
    assert!(!f.model.isinstance(&Value::Enum(foreign_enum, 0), Classifier::Enum(f.status)));
    assert!(f.model.isinstance(&Value::Enum(f.status, 1), Classifier::Enum(f.status)));
    assert!(!f.model.isinstance(&Value::Enum(f.status, 7), Classifier::Enum(f.status)));
}

proptest::proptest! {
    /// Running an arbitrary sequence of `Set` commands and then undoing all
    /// of them, in order, restores the value the feature held before any of
    /// them ran.
    #[test]
    fn set_execute_then_undo_round_trips_any_value_sequence(
        initial in "[a-z]{1,6}",
        values in proptest::collection::vec("[a-z]{1,6}", 1..6),
    ) {
        let mut f = build();
        let a = f.model.new_instance_empty(f.node).unwrap();
        f.model.e_set(a, "name", s(&initial)).unwrap();

        let mut stack = CommandStack::new();
        for v in &values {
            stack.execute(&mut f.model, Box::new(Set::by_name(a, "name", s(v)))).unwrap();
        }
        for _ in &values {
            stack.undo(&mut f.model).unwrap();
        }

        match f.model.e_get(a, "name").unwrap() {
            Slot::Scalar(v) => proptest::prop_assert_eq!(v, s(&initial)),
            other => panic!("expected a scalar, got {other:?}"),
        }
    }

    /// Adding a value to a many-valued feature and then undoing it restores
    /// the prior collection contents, for any starting set of tags and any
    /// added value.
    #[test]
    fn add_execute_then_undo_round_trips_any_tag_set(
        starting in proptest::collection::hash_set("[a-z]{1,5}", 0..6)
            .prop_map(|set| set.into_iter().collect::<Vec<_>>()),
        added in "[a-z]{1,5}",
    ) {
        proptest::prop_assume!(!starting.contains(&added));
        let mut f = build();
        let a = f.model.new_instance_empty(f.node).unwrap();
        let mut stack = CommandStack::new();
        for v in &starting {
            stack.execute(&mut f.model, Box::new(Add::by_feature(a, f.tags, s(v), None))).unwrap();
        }
        let before = match f.model.e_get(a, "tags").unwrap() {
            Slot::Many(c) => c.to_vec(),
            other => panic!("expected a many slot, got {other:?}"),
        };

        stack.execute(&mut f.model, Box::new(Add::by_feature(a, f.tags, s(&added), None))).unwrap();
        stack.undo(&mut f.model).unwrap();

        let after = match f.model.e_get(a, "tags").unwrap() {
            Slot::Many(c) => c.to_vec(),
            other => panic!("expected a many slot, got {other:?}"),
        };
        proptest::prop_assert_eq!(after, before);
    }
}

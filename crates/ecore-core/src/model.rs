use crate::collection::{Collection, CollectionKind};
use crate::error::ModelError;
use crate::instance::{InstanceId, InstanceStore, StoredValue};
use crate::value::Value;
use ecore_schema::prelude::{Classifier, DataValue, DefaultValue, FeatureId};
use ecore_schema::registry::MetaRegistry;

pub use ecore_schema::class::ClassId;

///
/// Slot
/// What `Model::e_get` hands back: a scalar value, or a borrow of the
/// (possibly freshly materialized) typed collection bound to a many-valued
/// feature.
///

#[derive(Debug)]
pub enum Slot<'a> {
    Scalar(Value),
    Many(&'a Collection),
}

///
/// Model
/// Owns both the metamodel (`MetaRegistry`) and the live instance graph
/// (`InstanceStore`) together, because every instance-layer operation —
/// `eGet`/`eSet`, containment transfer, opposite maintenance, `isinstance`
/// — needs to resolve feature metadata in the same breath as it touches
/// instance state. Splitting them the way `ecore-schema`/`ecore-core` are
/// split at the crate level would just reintroduce the two as a pair of
/// mutually-referential arguments threaded through every call; bundling
/// them here is the idiomatic alternative to a cyclic owning pointer.
///

pub struct Model {
    registry: MetaRegistry,
    store: InstanceStore,
}

impl Model {
    #[must_use]
    pub fn new(registry: MetaRegistry) -> Self {
        Self {
            registry,
            store: InstanceStore::new(),
        }
    }

    #[must_use]
    pub const fn registry(&self) -> &MetaRegistry {
        &self.registry
    }

    pub const fn registry_mut(&mut self) -> &mut MetaRegistry {
        &mut self.registry
    }

    #[must_use]
    pub const fn store(&self) -> &InstanceStore {
        &self.store
    }

    // -----------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------

    /// `new(class, **fields)`: fails with `AbstractInstantiation` if `class`
    /// is abstract. Fields given here are applied while `_isready` is still
    /// false, so they bypass `_isset` recording and containment/opposite
    /// bookkeeping — a constructor-time write is not a later mutation.
    pub fn new_instance(
        &mut self,
        class: ClassId,
        fields: &[(&str, Value)],
    ) -> Result<InstanceId, ModelError> {
        if self.registry.is_abstract(class) {
            return Err(ModelError::AbstractInstantiation {
                class: self.registry.class(class).name.clone(),
            });
        }
        let id = self.store.push(class);
        for (name, value) in fields {
            self.set_plain_or_feature(id, name, value.clone())?;
        }
        self.store.get_mut(id).isready = true;
        Ok(id)
    }

    /// Convenience for the common case of no constructor-time fields.
    pub fn new_instance_empty(&mut self, class: ClassId) -> Result<InstanceId, ModelError> {
        self.new_instance(class, &[])
    }

    #[must_use]
    pub fn class_of(&self, id: InstanceId) -> ClassId {
        self.store.get(id).class
    }

    // -----------------------------------------------------------------
    // eGet / eSet
    // -----------------------------------------------------------------

    /// Unified `get(name)`: a directly stored slot wins outright; failing
    /// that, a feature lookup materializes the default scalar or an empty
    /// typed collection and stores it under `name`.
    pub fn e_get(&mut self, id: InstanceId, name: &str) -> Result<Slot<'_>, ModelError> {
        if !self.store.get(id).slots.contains_key(name) {
            let class = self.store.get(id).class;
            let feature = self
                .registry
                .find_structural_feature(class, name)
                .ok_or_else(|| ModelError::NoSuchAttribute {
                    name: name.to_string(),
                })?;
            let fd = self.registry.feature(feature).clone();
            let stored = if fd.many() {
                StoredValue::Many(Collection::new(CollectionKind::for_feature(
                    fd.ordered, fd.unique,
                )))
            } else {
                StoredValue::Scalar(self.materialize_default(&fd))
            };
            self.store.get_mut(id).slots.insert(name.to_string(), stored);
        }
        match self
            .store
            .get(id)
            .slots
            .get(name)
            .expect("materialized above if absent")
        {
            StoredValue::Scalar(v) => Ok(Slot::Scalar(v.clone())),
            StoredValue::Many(c) => Ok(Slot::Many(c)),
        }
    }

    /// Unified `set(name, value)` for scalar features and plain slots.
    /// Many-valued features reject direct `eSet` (`BadValue`): their
    /// mutation surface is the collection itself, via
    /// `collection_append`/`collection_insert`/etc, matching how Ecore's
    /// own generated accessors never let you replace a multi-valued
    /// feature's collection wholesale.
    pub fn e_set(&mut self, id: InstanceId, name: &str, value: Value) -> Result<(), ModelError> {
        self.set_plain_or_feature(id, name, value)
    }

    fn set_plain_or_feature(
        &mut self,
        id: InstanceId,
        name: &str,
        value: Value,
    ) -> Result<(), ModelError> {
        let class = self.store.get(id).class;
        let Some(feature) = self.registry.find_structural_feature(class, name) else {
            self.store
                .get_mut(id)
                .slots
                .insert(name.to_string(), StoredValue::Scalar(value));
            return Ok(());
        };
        self.set_feature(id, feature, value, true)
    }

    pub fn set_feature(
        &mut self,
        id: InstanceId,
        feature: FeatureId,
        value: Value,
        update_opposite: bool,
    ) -> Result<(), ModelError> {
        let fd = self.registry.feature(feature).clone();
        if fd.many() {
            return Err(ModelError::BadValue {
                expected: format!("typed collection for many-valued feature '{}'", fd.name),
                found: value.host_type_name(),
            });
        }
        let coerced = self.coerce_for_feature(fd.e_type, value);
        if !self.isinstance(&coerced, fd.e_type) {
            return Err(ModelError::BadValue {
                expected: format!("{:?}", fd.e_type),
                found: coerced.host_type_name(),
            });
        }

        let old = match self.store.get(id).slots.get(&fd.name) {
            Some(StoredValue::Scalar(v)) => Some(v.clone()),
            _ => None,
        };
        self.store
            .get_mut(id)
            .slots
            .insert(fd.name.clone(), StoredValue::Scalar(coerced.clone()));

        if self.store.get(id).isready {
            self.store.get_mut(id).isset.insert(fd.name.clone());
            if fd.is_reference() {
                self.apply_reference_bookkeeping_scalar(
                    id,
                    feature,
                    &fd,
                    old,
                    coerced,
                    update_opposite,
                );
            }
        }
        Ok(())
    }

    /// `eIsSet`/`eUnset`: read and reset the `_isset` bookkeeping a feature
    /// accumulates once an instance is ready.
    #[must_use]
    pub fn e_is_set(&self, id: InstanceId, name: &str) -> bool {
        self.store.get(id).is_set(name)
    }

    pub fn e_unset(&mut self, id: InstanceId, name: &str) {
        let class = self.store.get(id).class;
        if let Some(feature) = self.registry.find_structural_feature(class, name) {
            let fd = self.registry.feature(feature).clone();
            let stored = if fd.many() {
                StoredValue::Many(Collection::new(CollectionKind::for_feature(
                    fd.ordered, fd.unique,
                )))
            } else {
                StoredValue::Scalar(self.materialize_default(&fd))
            };
            self.store.get_mut(id).slots.insert(fd.name.clone(), stored);
        }
        self.store.get_mut(id).isset.remove(name);
    }

    #[must_use]
    pub fn e_container(&self, id: InstanceId) -> Option<InstanceId> {
        self.store.get(id).container
    }

    #[must_use]
    pub fn e_containment_feature(&self, id: InstanceId) -> Option<FeatureId> {
        self.store.get(id).containment_feature
    }

    /// `getRoot`: walks `eContainer()` to termination. The containment
    /// graph is a forest, so this always halts.
    #[must_use]
    pub fn get_root(&self, id: InstanceId) -> InstanceId {
        let mut cur = id;
        while let Some(parent) = self.store.get(cur).container {
            cur = parent;
        }
        cur
    }

    // -----------------------------------------------------------------
    // Typed collections
    // -----------------------------------------------------------------

    pub fn resolve_many_feature(
        &self,
        id: InstanceId,
        name: &str,
    ) -> Result<FeatureId, ModelError> {
        let class = self.store.get(id).class;
        self.registry
            .find_structural_feature(class, name)
            .ok_or_else(|| ModelError::NoSuchAttribute {
                name: name.to_string(),
            })
    }

    /// Append (or insert at `index`, tail if `None`). Returns `false`
    /// without mutating anything if this is a unique collection and the
    /// value is already present.
    pub fn collection_insert(
        &mut self,
        id: InstanceId,
        feature: FeatureId,
        index: Option<usize>,
        value: Value,
    ) -> Result<bool, ModelError> {
        self.collection_insert_raw(id, feature, index, value, true)
    }

    pub fn collection_insert_raw(
        &mut self,
        id: InstanceId,
        feature: FeatureId,
        index: Option<usize>,
        value: Value,
        update_opposite: bool,
    ) -> Result<bool, ModelError> {
        let fd = self.registry.feature(feature).clone();
        let coerced = self.coerce_for_feature(fd.e_type, value);
        if !self.isinstance(&coerced, fd.e_type) {
            return Err(ModelError::BadValue {
                expected: format!("{:?}", fd.e_type),
                found: coerced.host_type_name(),
            });
        }

        let idx = index.unwrap_or(usize::MAX);
        let child = coerced.as_instance();
        let inserted = self.many_slot_mut(id, feature).raw_insert(idx, coerced);

        if inserted && self.store.get(id).isready {
            self.store.get_mut(id).isset.insert(fd.name.clone());
            if update_opposite {
                if let Some(child) = child {
                    if fd.containment() {
                        self.attach_containment(id, feature, child);
                    }
                    if fd.opposite().is_some() {
                        self.opposite_attach(id, feature, child);
                    }
                }
            }
        }
        Ok(inserted)
    }

    pub fn collection_remove_value(
        &mut self,
        id: InstanceId,
        feature: FeatureId,
        value: &Value,
    ) -> Result<usize, ModelError> {
        let index = self
            .many_slot_mut(id, feature)
            .raw_remove_value(value)
            .ok_or_else(|| ModelError::BadValue {
                expected: "value present in the collection".to_string(),
                found: value.host_type_name(),
            })?;
        self.collection_remove_bookkeeping(id, feature, value, true);
        Ok(index)
    }

    pub fn collection_remove_at(
        &mut self,
        id: InstanceId,
        feature: FeatureId,
        index: usize,
    ) -> Result<Value, ModelError> {
        let removed = self
            .many_slot_mut(id, feature)
            .raw_remove_at(index)
            .ok_or(ModelError::EmptyPop)?;
        self.collection_remove_bookkeeping(id, feature, &removed, true);
        Ok(removed)
    }

    pub fn collection_pop(
        &mut self,
        id: InstanceId,
        feature: FeatureId,
    ) -> Result<Value, ModelError> {
        let removed = self
            .many_slot_mut(id, feature)
            .raw_pop()
            .ok_or(ModelError::EmptyPop)?;
        self.collection_remove_bookkeeping(id, feature, &removed, true);
        Ok(removed)
    }

    fn collection_remove_bookkeeping(
        &mut self,
        id: InstanceId,
        feature: FeatureId,
        removed: &Value,
        update_opposite: bool,
    ) {
        if !update_opposite || !self.store.get(id).isready {
            return;
        }
        let Some(child) = removed.as_instance() else {
            return;
        };
        let fd = self.registry.feature(feature).clone();
        if fd.containment() {
            self.detach_containment(child);
        }
        if fd.opposite().is_some() {
            self.opposite_detach(id, feature, child);
        }
    }

    /// Read-only membership peek used by `Add::can_undo`: does not
    /// lazily materialize a missing collection, unlike `e_get`.
    #[must_use]
    pub fn collection_contains(&self, id: InstanceId, feature: FeatureId, value: &Value) -> bool {
        let name = &self.registry.feature(feature).name;
        match self.store.get(id).slots.get(name) {
            Some(StoredValue::Many(c)) => c.contains(value),
            _ => false,
        }
    }

    /// Read-only positional peek used by `Move::can_undo`.
    #[must_use]
    pub fn collection_value_at(&self, id: InstanceId, feature: FeatureId, index: usize) -> Option<Value> {
        let name = &self.registry.feature(feature).name;
        match self.store.get(id).slots.get(name) {
            Some(StoredValue::Many(c)) => c.get(index).cloned(),
            _ => None,
        }
    }

    /// Materialize-if-absent, then return the collection for mutation.
    /// Never exposed as `&mut Collection` to callers outside this module:
    /// every public mutator funnels through here so containment/opposite
    /// bookkeeping can never be bypassed from outside.
    fn many_slot_mut(&mut self, id: InstanceId, feature: FeatureId) -> &mut Collection {
        let fd = self.registry.feature(feature);
        let key = fd.name.clone();
        let kind = CollectionKind::for_feature(fd.ordered, fd.unique);
        let entry = self
            .store
            .get_mut(id)
            .slots
            .entry(key)
            .or_insert_with(|| StoredValue::Many(Collection::new(kind)));
        match entry {
            StoredValue::Many(c) => c,
            StoredValue::Scalar(_) => {
                unreachable!("feature resolved as many-valued but its slot holds a scalar")
            }
        }
    }

    // -----------------------------------------------------------------
    // Containment / opposite bookkeeping
    // -----------------------------------------------------------------

    fn apply_reference_bookkeeping_scalar(
        &mut self,
        owner: InstanceId,
        feature: FeatureId,
        fd: &ecore_schema::feature::FeatureDef,
        old: Option<Value>,
        new: Value,
        update_opposite: bool,
    ) {
        if !update_opposite {
            return;
        }
        let new_inst = new.as_instance();
        let old_inst = old.as_ref().and_then(Value::as_instance);

        if fd.containment() {
            if let Some(child) = new_inst {
                self.attach_containment(owner, feature, child);
            } else if let Some(child) = old_inst {
                self.detach_containment(child);
            }
        }

        if fd.opposite().is_some() {
            if let Some(target) = new_inst {
                self.opposite_attach(owner, feature, target);
            } else if let Some(target) = old_inst {
                self.opposite_detach(owner, feature, target);
            }
        }
    }

    /// Attach `child` under `(owner, feature)`, first detaching it from
    /// whatever container it previously had — an instance has at most one
    /// container at a time.
    fn attach_containment(&mut self, owner: InstanceId, feature: FeatureId, child: InstanceId) {
        let prior = self.store.get(child).container.zip(self.store.get(child).containment_feature);
        if let Some((old_owner, old_feature)) = prior {
            self.detach_child_from_slot(old_owner, old_feature, child);
        }
        self.store.get_mut(child).container = Some(owner);
        self.store.get_mut(child).containment_feature = Some(feature);
    }

    fn detach_containment(&mut self, child: InstanceId) {
        self.store.get_mut(child).container = None;
        self.store.get_mut(child).containment_feature = None;
    }

    /// Unlink `child` from `owner`'s slot for `old_feature` without
    /// cascading into containment/opposite maintenance: the caller is
    /// about to (or just did) establish `child`'s new state, so this is a
    /// pure structural cleanup of the stale backward edge.
    fn detach_child_from_slot(&mut self, owner: InstanceId, old_feature: FeatureId, child: InstanceId) {
        let fd = self.registry.feature(old_feature).clone();
        if fd.many() {
            if let Some(StoredValue::Many(c)) = self.store.get_mut(owner).slots.get_mut(&fd.name) {
                c.raw_remove_value(&Value::Instance(child));
            }
        } else {
            self.store
                .get_mut(owner)
                .slots
                .insert(fd.name, StoredValue::Scalar(Value::Null));
        }
    }

    fn opposite_attach(&mut self, owner: InstanceId, feature: FeatureId, target: InstanceId) {
        let Some(opp) = self.registry.feature(feature).opposite() else {
            return;
        };
        if self.registry.feature(opp).many() {
            let _ = self.collection_insert_raw(target, opp, None, Value::Instance(owner), false);
        } else {
            let _ = self.set_feature(target, opp, Value::Instance(owner), false);
        }
    }

    fn opposite_detach(&mut self, owner: InstanceId, feature: FeatureId, target: InstanceId) {
        let Some(opp) = self.registry.feature(feature).opposite() else {
            return;
        };
        if self.registry.feature(opp).many() {
            let _ = self.collection_remove_value(target, opp, &Value::Instance(owner));
        } else {
            let _ = self.set_feature(target, opp, Value::Null, false);
        }
    }

    // -----------------------------------------------------------------
    // Typing rule & coercion
    // -----------------------------------------------------------------

    /// `isinstance(obj, T)`.
    #[must_use]
    pub fn isinstance(&self, value: &Value, ty: Classifier) -> bool {
        match value {
            Value::Null => true,
            Value::Data(dv) => matches!(ty, Classifier::DataType(id) if dv.kind() == id),
            Value::Enum(vid, ord) => match ty {
                Classifier::Enum(id) => *vid == id && self.registry.enum_def(id).contains_ordinal(*ord),
                _ => false,
            },
            Value::Instance(iid) => match ty {
                Classifier::Class(id) => {
                    let cls = self.store.get(*iid).class;
                    cls == id || self.registry.is_subtype_of(cls, id)
                }
                _ => false,
            },
        }
    }

    /// When `ty` is a `DataType` or `Enum` and `value` arrives as a plain
    /// string, convert it via the data type's `from_string` parser or an
    /// enum literal-by-name lookup.
    fn coerce_for_feature(&self, ty: Classifier, value: Value) -> Value {
        match (ty, &value) {
            (Classifier::DataType(id), Value::Data(DataValue::Str(s))) => {
                (self.registry.datatype(id).from_string)(s)
            }
            (Classifier::Enum(id), Value::Data(DataValue::Str(s))) => {
                match self.registry.enum_def(id).literal_by_name(s) {
                    Some(lit) => Value::Enum(id, lit.ordinal),
                    None => value,
                }
            }
            _ => value,
        }
    }

    fn materialize_default(&self, fd: &ecore_schema::feature::FeatureDef) -> Value {
        match fd.default_value() {
            Some(DefaultValue::Data(d)) => Value::Data(d.clone()),
            Some(DefaultValue::EnumLiteral(eid, ord)) => Value::Enum(*eid, *ord),
            None => match fd.e_type {
                Classifier::DataType(id) => Value::Data(self.registry.datatype(id).default.clone()),
                Classifier::Enum(id) => {
                    let lit = self.registry.enum_def(id).default_literal();
                    Value::Enum(id, lit.ordinal)
                }
                Classifier::Class(_) => Value::Null,
            },
        }
    }
}

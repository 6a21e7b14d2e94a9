use crate::collection::Collection;
use crate::value::Value;
use ecore_schema::prelude::{ClassId, FeatureId};
use std::collections::{BTreeMap, BTreeSet};

///
/// InstanceId
/// Handle into `InstanceStore::instances`.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct InstanceId(pub(crate) usize);

///
/// StoredValue
/// A slot holds either a scalar `Value` or a lazily-materialized typed
/// collection; scalar and many-valued slots coexist in the same map but
/// are distinguished by the feature's `many` flag.
///

#[derive(Clone, Debug)]
pub enum StoredValue {
    Scalar(Value),
    Many(Collection),
}

///
/// InstanceData
/// A live model element: its class, its slots keyed by name (feature-backed
/// or plain extension alike — `get`/`set` look up a directly stored slot
/// before ever consulting the feature), and the containment/bookkeeping
/// fields that track its parent and its `eIsSet` history.
///

#[derive(Clone, Debug)]
pub struct InstanceData {
    pub class: ClassId,
    pub(crate) slots: BTreeMap<String, StoredValue>,
    pub container: Option<InstanceId>,
    pub containment_feature: Option<FeatureId>,
    pub(crate) isset: BTreeSet<String>,
    pub isready: bool,
    pub external_id: Option<String>,
}

impl InstanceData {
    pub(crate) fn new(class: ClassId) -> Self {
        Self {
            class,
            slots: BTreeMap::new(),
            container: None,
            containment_feature: None,
            isset: BTreeSet::new(),
            isready: false,
            external_id: None,
        }
    }

    #[must_use]
    pub fn is_set(&self, name: &str) -> bool {
        self.isset.contains(name)
    }
}

///
/// InstanceStore
/// Arena owner for every live `Instance`. Holds no reference to the
/// metamodel: feature resolution and bookkeeping live one layer up, in
/// `crate::model::Model`, which owns both this store and a `MetaRegistry`.
///

#[derive(Clone, Debug, Default)]
pub struct InstanceStore {
    instances: Vec<InstanceData>,
}

impl InstanceStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, class: ClassId) -> InstanceId {
        let id = InstanceId(self.instances.len());
        self.instances.push(InstanceData::new(class));
        id
    }

    #[must_use]
    pub fn get(&self, id: InstanceId) -> &InstanceData {
        &self.instances[id.0]
    }

    pub(crate) fn get_mut(&mut self, id: InstanceId) -> &mut InstanceData {
        &mut self.instances[id.0]
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.instances.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

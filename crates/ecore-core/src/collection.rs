use crate::value::Value;
use derive_more::Deref;

///
/// CollectionKind
/// Which of the four flavors a feature's `(ordered, unique)` pair selects.
/// The tagged variant lives here as data rather than as
/// four separate Rust types: the structural operations (index-based
/// insert/remove/pop) are identical across all four: only the
/// uniqueness-on-insert and ordering-is-meaningful semantics differ, and
/// both read off this tag.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CollectionKind {
    OrderedSet,
    List,
    Set,
    UnorderedList,
}

impl CollectionKind {
    /// `(feature.ordered, feature.unique)` -> variant: neither flag set
    /// falls back to `UnorderedList`.
    #[must_use]
    pub const fn for_feature(ordered: bool, unique: bool) -> Self {
        match (ordered, unique) {
            (true, true) => Self::OrderedSet,
            (true, false) => Self::List,
            (false, true) => Self::Set,
            (false, false) => Self::UnorderedList,
        }
    }

    #[must_use]
    pub const fn is_unique(self) -> bool {
        matches!(self, Self::OrderedSet | Self::Set)
    }

    #[must_use]
    pub const fn is_ordered(self) -> bool {
        matches!(self, Self::OrderedSet | Self::List)
    }
}

///
/// Collection
/// A typed collection bound (by its owning `InstanceData`'s slot map) to
/// one `(instance, feature)` pair. Holds only the structural Vec and the
/// flavor tag — type-checking and containment/opposite bookkeeping are the
/// responsibility of `crate::model::Model`, which is the only place that
/// can see both the owning instance and the instance(s) on the other end
/// of a reference.
///

#[derive(Clone, Debug, Deref)]
pub struct Collection {
    pub kind: CollectionKind,
    #[deref]
    items: Vec<Value>,
}

impl Collection {
    #[must_use]
    pub const fn new(kind: CollectionKind) -> Self {
        Self {
            kind,
            items: Vec::new(),
        }
    }

    #[must_use]
    pub fn index_of(&self, value: &Value) -> Option<usize> {
        self.items.iter().position(|v| v == value)
    }

    /// Insert at `index` (clamped to the tail). No-op, returning `false`,
    /// if this collection is unique and `value` is already present.
    pub fn raw_insert(&mut self, index: usize, value: Value) -> bool {
        if self.kind.is_unique() && self.index_of(&value).is_some() {
            return false;
        }
        let idx = index.min(self.items.len());
        self.items.insert(idx, value);
        true
    }

    pub fn raw_append(&mut self, value: Value) -> bool {
        self.raw_insert(self.items.len(), value)
    }

    pub fn raw_remove_at(&mut self, index: usize) -> Option<Value> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    pub fn raw_remove_value(&mut self, value: &Value) -> Option<usize> {
        let index = self.index_of(value)?;
        self.items.remove(index);
        Some(index)
    }

    pub fn raw_pop(&mut self) -> Option<Value> {
        self.items.pop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecore_schema::prelude::DataValue;

    fn s(v: &str) -> Value {
        Value::Data(DataValue::Str(v.to_string()))
    }

    #[test]
    fn ordered_set_insert_is_a_no_op_when_already_present() {
        let mut c = Collection::new(CollectionKind::OrderedSet);
        assert!(c.raw_insert(0, s("a")));
        assert!(!c.raw_insert(0, s("a")));
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn ordered_set_insert_then_pop_is_identity() {
        let mut c = Collection::new(CollectionKind::OrderedSet);
        c.raw_append(s("a"));
        c.raw_append(s("c"));
        c.raw_insert(1, s("b"));
        assert_eq!(c.raw_remove_at(1), Some(s("b")));
        assert_eq!(c.items, vec![s("a"), s("c")]);
    }

    #[test]
    fn list_allows_duplicates() {
        let mut c = Collection::new(CollectionKind::List);
        assert!(c.raw_append(s("x")));
        assert!(c.raw_append(s("x")));
        assert_eq!(c.len(), 2);
    }

    proptest::proptest! {
        /// Inserting a fresh value into an `OrderedSet` and then removing it
        /// back out at the index it landed on leaves the collection exactly
        /// as it was.
        #[test]
        fn ordered_set_insert_then_remove_is_identity(
            existing in proptest::collection::hash_set("[a-z]{1,5}", 0..8)
                .prop_map(|set| set.into_iter().collect::<Vec<_>>()),
            candidate in "[a-z]{1,5}",
            index in 0usize..20,
        ) {
            proptest::prop_assume!(!existing.contains(&candidate));
            let mut c = Collection::new(CollectionKind::OrderedSet);
            for v in &existing {
                c.raw_append(s(v));
            }
            let before: Vec<Value> = c.iter().cloned().collect();

            let inserted = c.raw_insert(index, s(&candidate));
            proptest::prop_assert!(inserted);
            let landed_at = index.min(before.len());
            let popped = c.raw_remove_at(landed_at);
            proptest::prop_assert_eq!(popped, Some(s(&candidate)));
            let after: Vec<Value> = c.iter().cloned().collect();
            proptest::prop_assert_eq!(after, before);
        }

        /// Inserting a value already present in a unique collection is a
        /// no-op for any existing set and any requested index.
        #[test]
        fn ordered_set_duplicate_insert_is_always_a_no_op(
            existing in proptest::collection::hash_set("[a-z]{1,5}", 1..8)
                .prop_map(|set| set.into_iter().collect::<Vec<_>>()),
            index in 0usize..20,
        ) {
            let mut c = Collection::new(CollectionKind::OrderedSet);
            for v in &existing {
                c.raw_append(s(v));
            }
            let before: Vec<Value> = c.iter().cloned().collect();
            let dup = existing[index % existing.len()].clone();

            let inserted = c.raw_insert(index, s(&dup));
            proptest::prop_assert!(!inserted);
            let after: Vec<Value> = c.iter().cloned().collect();
            proptest::prop_assert_eq!(after, before);
        }
    }
}

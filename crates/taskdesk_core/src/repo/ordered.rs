//! Insertion-ordered record map shared by the in-memory stores.

use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

/// Map from id to record that lists values in insertion order.
///
/// Each record gets a monotonically increasing sequence number on insert;
/// `order` maps that number back to the id. Replacing a record keeps its
/// sequence number, so updates never move a record in listings.
#[derive(Debug)]
pub(crate) struct InsertionOrdered<V> {
    next_seq: u64,
    slots: HashMap<Uuid, (u64, V)>,
    order: BTreeMap<u64, Uuid>,
}

impl<V> Default for InsertionOrdered<V> {
    fn default() -> Self {
        Self {
            next_seq: 0,
            slots: HashMap::new(),
            order: BTreeMap::new(),
        }
    }
}

impl<V> InsertionOrdered<V> {
    pub(crate) fn contains(&self, id: &Uuid) -> bool {
        self.slots.contains_key(id)
    }

    pub(crate) fn get(&self, id: &Uuid) -> Option<&V> {
        self.slots.get(id).map(|(_, value)| value)
    }

    pub(crate) fn seq_of(&self, id: &Uuid) -> Option<u64> {
        self.slots.get(id).map(|(seq, _)| *seq)
    }

    /// Inserts a new record and returns its sequence number.
    ///
    /// Callers must check `contains` first; an existing id is overwritten in
    /// place and keeps its position.
    pub(crate) fn insert(&mut self, id: Uuid, value: V) -> u64 {
        if let Some((seq, slot)) = self.slots.get_mut(&id) {
            *slot = value;
            return *seq;
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.slots.insert(id, (seq, value));
        self.order.insert(seq, id);
        seq
    }

    pub(crate) fn remove(&mut self, id: &Uuid) -> Option<(u64, V)> {
        let (seq, value) = self.slots.remove(id)?;
        self.order.remove(&seq);
        Some((seq, value))
    }

    pub(crate) fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.order
            .values()
            .filter_map(move |id| self.slots.get(id).map(|(_, value)| value))
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::InsertionOrdered;
    use uuid::Uuid;

    #[test]
    fn values_follow_insertion_order_across_replace_and_remove() {
        let mut map = InsertionOrdered::default();
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        map.insert(a, "a");
        map.insert(b, "b");
        map.insert(c, "c");

        map.insert(a, "a2");
        map.remove(&b);

        let listed: Vec<_> = map.values().copied().collect();
        assert_eq!(listed, vec!["a2", "c"]);
        assert_eq!(map.len(), 2);
        assert_eq!(map.seq_of(&c), Some(2));
    }
}

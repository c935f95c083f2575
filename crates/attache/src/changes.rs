use attache_core::stmt::Value;

use indexmap::IndexMap;

/// Per-record dirty state: the original value of every field that has been
/// written since the record was last loaded or saved, keyed by field index.
///
/// Only the owner of a field stores its dirty state; a delegating record
/// reads this through the association, it never copies it.
#[derive(Debug, Default, Clone)]
pub struct ChangeSet {
    original: IndexMap<usize, Value>,
}

impl ChangeSet {
    /// Record the original value of a field. The first recording wins;
    /// subsequent writes to the same field keep the oldest original.
    pub fn record(&mut self, index: usize, original: Value) {
        self.original.entry(index).or_insert(original);
    }

    /// Record the current value as the original, replacing any earlier
    /// recording. `will_change` re-bases the change on the value at the
    /// moment of the call.
    pub fn record_current(&mut self, index: usize, current: Value) {
        self.original.insert(index, current);
    }

    /// Drop the entry for a field, returning it to the clean state.
    pub fn forget(&mut self, index: usize) {
        self.original.shift_remove(&index);
    }

    pub fn contains(&self, index: usize) -> bool {
        self.original.contains_key(&index)
    }

    pub fn original(&self, index: usize) -> Option<&Value> {
        self.original.get(&index)
    }

    pub fn len(&self) -> usize {
        self.original.len()
    }

    pub fn is_empty(&self) -> bool {
        self.original.is_empty()
    }

    pub fn clear(&mut self) {
        self.original.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Value)> + '_ {
        self.original.iter().map(|(index, value)| (*index, value))
    }
}

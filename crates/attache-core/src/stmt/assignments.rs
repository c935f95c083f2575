use super::{Value, ValueRecord};

use indexmap::IndexMap;

/// The set of columns written by an update, keyed by field index.
///
/// A partial update carries only the dirty columns; a full update carries
/// every non-key column. Either way the driver applies exactly the entries
/// present here.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Assignments {
    assignments: IndexMap<usize, Value>,
}

impl Assignments {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            assignments: IndexMap::with_capacity(capacity),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn contains(&self, key: usize) -> bool {
        self.assignments.contains_key(&key)
    }

    pub fn get(&self, key: usize) -> Option<&Value> {
        self.assignments.get(&key)
    }

    pub fn set(&mut self, key: usize, value: impl Into<Value>) {
        self.assignments.insert(key, value.into());
    }

    pub fn unset(&mut self, key: usize) {
        self.assignments.shift_remove(&key);
    }

    pub fn keys(&self) -> impl Iterator<Item = usize> + '_ {
        self.assignments.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Value)> + '_ {
        self.assignments.iter().map(|(index, value)| (*index, value))
    }
}

impl From<ValueRecord> for Assignments {
    fn from(record: ValueRecord) -> Self {
        let mut assignments = Assignments::with_capacity(record.len());

        for (index, value) in record.fields.into_iter().enumerate() {
            assignments.set(index, value);
        }

        assignments
    }
}

use std::collections::HashMap;

use super::TripRecord;

/// lookup from trip_id to the [`TripRecord`] most recently written for it.
#[derive(Debug, Default, Clone)]
pub struct TripIndex {
    trips: HashMap<String, TripRecord>,
}

impl TripIndex {
    /// stores a record under its trip_id, replacing any earlier entry.
    /// returns the replaced record, if any.
    pub fn insert(&mut self, record: TripRecord) -> Option<TripRecord> {
        self.trips.insert(record.trip_id.clone(), record)
    }

    pub fn get(&self, trip_id: &str) -> Option<&TripRecord> {
        self.trips.get(trip_id)
    }

    pub fn contains(&self, trip_id: &str) -> bool {
        self.trips.contains_key(trip_id)
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &TripRecord> {
        self.trips.values()
    }
}

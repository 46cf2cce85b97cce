//! The `TrainStore`: every train, indexed by `AgentId`.

use th_core::AgentId;

use crate::Train;

/// Dense train storage.  `trains[i].id() == AgentId(i)` always holds.
#[derive(Debug, Clone, Default)]
pub struct TrainStore {
    trains: Vec<Train>,
}

impl TrainStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The id the next pushed train must carry.
    pub fn next_id(&self) -> AgentId {
        AgentId(self.trains.len() as u32)
    }

    /// Append `train`.
    ///
    /// # Panics
    ///
    /// Panics if `train.id()` is not [`next_id`](Self::next_id).
    pub fn push(&mut self, train: Train) {
        assert_eq!(train.id(), self.next_id(), "trains must be pushed in id order");
        self.trains.push(train);
    }

    #[inline]
    pub fn get(&self, id: AgentId) -> Option<&Train> {
        self.trains.get(id.index())
    }

    #[inline]
    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut Train> {
        self.trains.get_mut(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Train> + '_ {
        self.trains.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Train> + '_ {
        self.trains.iter_mut()
    }

    pub fn ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.trains.iter().map(Train::id)
    }

    pub fn len(&self) -> usize {
        self.trains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trains.is_empty()
    }

    /// Trains currently on an edge.
    pub fn travelling_count(&self) -> usize {
        self.trains.iter().filter(|t| t.is_travelling()).count()
    }

    /// Trains currently carrying a load.
    pub fn loaded_count(&self) -> usize {
        self.trains.iter().filter(|t| t.has_resource()).count()
    }
}

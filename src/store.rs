use std::collections::HashMap;

use crate::dataset::LeagueDataset;
use crate::league::League;

/// Session-scoped store of loaded datasets, at most one per league. Entries
/// are replaced on reload and never evicted, so leagues deselected after a
/// load stay resident for the rest of the session.
#[derive(Debug, Default)]
pub struct SessionStore {
    datasets: HashMap<League, LeagueDataset>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, dataset: LeagueDataset) {
        self.datasets.insert(dataset.league, dataset);
    }

    pub fn get(&self, league: League) -> Option<&LeagueDataset> {
        self.datasets.get(&league)
    }

    pub fn contains(&self, league: League) -> bool {
        self.datasets.contains_key(&league)
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}

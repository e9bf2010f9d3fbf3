//! Derived views over a filtered evaluation set. Each derivation is a pure
//! function; divisions by an empty group yield `0`.

mod behavioral;
mod comparative;
mod competency;
mod general;

pub use behavioral::{
    behavioral_stats, BehavioralScope, BehavioralStats, GroupTopTypes, GroupingDimension,
    GroupingStats, RankedType, TypeCount,
};
pub use comparative::{comparative_metrics, ComparativeEntry, ComparativeMetrics, SectorAverage};
pub use competency::{
    competency_matrix, temporal_evolution, CompetencyCell, CompetencyMatrix, CompetencyRow,
    EvolutionBucket,
};
pub use general::{general_metrics, GeneralMetrics, GroupCount, TopPerformer};

use std::collections::HashMap;

pub(crate) fn mean(sum: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Running sum and sample count for one group.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct Running {
    pub(crate) sum: f64,
    pub(crate) count: usize,
}

impl Running {
    pub(crate) fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    pub(crate) fn merge(&mut self, other: Running) {
        self.sum += other.sum;
        self.count += other.count;
    }

    pub(crate) fn mean(&self) -> f64 {
        mean(self.sum, self.count)
    }
}

/// Keyed accumulators that remember the order in which keys were first seen.
#[derive(Debug, Clone)]
pub(crate) struct OrderedGroups<T> {
    index: HashMap<String, usize>,
    entries: Vec<(String, T)>,
}

impl<T> Default for OrderedGroups<T> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<T: Default> OrderedGroups<T> {
    pub(crate) fn entry(&mut self, key: &str) -> &mut T {
        let position = match self.index.get(key) {
            Some(position) => *position,
            None => {
                self.entries.push((key.to_string(), T::default()));
                let position = self.entries.len() - 1;
                self.index.insert(key.to_string(), position);
                position
            }
        };

        &mut self.entries[position].1
    }
}

impl<T> OrderedGroups<T> {
    pub(crate) fn get(&self, key: &str) -> Option<&T> {
        self.index.get(key).map(|position| &self.entries[*position].1)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub(crate) fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }
}

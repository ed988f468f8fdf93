// src/simulation/results.rs
use crate::core::StateVector;
use std::ops::Index;

/// Snapshots of the state over one run.
///
/// Entry 0 is the canonical initial state; entry k is the state after the
/// k-th gate. A completed run of L gates records L + 1 entries.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct History {
    snapshots: Vec<StateVector>,
}

impl History {
    /// Starts a history at the initial state. (Internal visibility)
    pub(crate) fn new(initial: StateVector) -> Self {
        Self {
            snapshots: vec![initial],
        }
    }

    /// Records the state produced by the next gate. (Internal visibility)
    pub(crate) fn record(&mut self, state: StateVector) {
        self.snapshots.push(state);
    }

    /// Number of recorded snapshots.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// The snapshot at `step`, if recorded.
    pub fn get(&self, step: usize) -> Option<&StateVector> {
        self.snapshots.get(step)
    }

    /// The canonical initial state.
    pub fn initial(&self) -> Option<&StateVector> {
        self.snapshots.first()
    }

    /// The most recently recorded snapshot.
    pub fn last(&self) -> Option<&StateVector> {
        self.snapshots.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StateVector> {
        self.snapshots.iter()
    }
}

impl Index<usize> for History {
    type Output = StateVector;

    fn index(&self, step: usize) -> &Self::Output {
        &self.snapshots[step]
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a StateVector;
    type IntoIter = std::slice::Iter<'a, StateVector>;

    fn into_iter(self) -> Self::IntoIter {
        self.snapshots.iter()
    }
}

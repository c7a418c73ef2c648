use crate::geometry::PlanarPoint;
use std::collections::HashMap;
use std::collections::VecDeque;

/// Bounded per-object position history, keyed by `public_object_id`.
///
/// An external collaborator to the tracker: it only records what the tracker already
/// decided to emit and prunes on retirement notice, per the crate's ownership rules.
#[derive(Debug, Clone)]
pub struct TrajectoryStore {
    histories: HashMap<u64, VecDeque<PlanarPoint>>,
    max_len: usize,
}

impl TrajectoryStore {
    /// `max_len == 0` means unbounded, per the crate's resource-bounds contract.
    pub fn new(max_len: usize) -> Self {
        Self {
            histories: HashMap::new(),
            max_len,
        }
    }

    /// Appends a centroid to `public_id`'s history, evicting the oldest entry if the
    /// history is bounded and full.
    pub fn record(&mut self, public_id: u64, centroid: PlanarPoint) {
        let history = self.histories.entry(public_id).or_default();
        history.push_back(centroid);
        if self.max_len > 0 {
            while history.len() > self.max_len {
                history.pop_front();
            }
        }
    }

    /// Removes all recorded history for `public_id`, e.g. after track retirement.
    pub fn remove(&mut self, public_id: u64) {
        self.histories.remove(&public_id);
    }

    /// Returns the recorded centroids for `public_id`, in frame order of recording.
    /// Returns an empty vector if the id was never recorded or has been pruned.
    pub fn query(&self, public_id: u64) -> Vec<PlanarPoint> {
        self.histories
            .get(&public_id)
            .map(|h| h.iter().copied().collect())
            .unwrap_or_default()
    }
}

use crate::background::{BackgroundModel, Label};
use crate::cluster::Clusterer;
use crate::config::TrackerConfig;
use crate::geometry::{normalize_samples, polar_to_planar, IntoPolarSample, PlanarPoint};
use crate::tracker::{Tracker, TrackedObject};
use crate::trajectory::TrajectoryStore;
use crate::Error;
use log::trace;

/// The per-frame result of [`Scene::process_scan`].
#[derive(Debug, Clone, Default)]
pub struct FrameRecord {
    /// Confirmed tracked objects, ascending by `public_id`.
    pub objects: Vec<TrackedObject>,
    /// Whether the background model had completed learning when this frame ran.
    /// While `false`, `objects` is always empty.
    pub background_ready: bool,
}

/// The orchestrator that wires background modeling, clustering, and tracking into a
/// single `process_scan` entry point, and records confirmed centroids into a bounded
/// trajectory store.
///
/// `Scene` owns all per-run state: callers are expected to serialize calls to
/// `process_scan` themselves, as the crate provides no internal locking.
pub struct Scene {
    background: BackgroundModel,
    clusterer: Clusterer,
    tracker: Tracker,
    trajectories: TrajectoryStore,
}

impl Scene {
    /// Builds a new scene, rejecting an invalid configuration up front so that no
    /// partially-constructed scene is ever returned.
    pub fn new(config: TrackerConfig) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self {
            background: BackgroundModel::new(&config),
            clusterer: Clusterer::new(&config),
            tracker: Tracker::new(&config),
            trajectories: TrajectoryStore::new(config.max_trajectory_length),
        })
    }

    /// Processes one scan: normalizes input samples, updates and queries the
    /// background model, clusters the foreground, advances the tracker, and records
    /// confirmed centroids into the trajectory store.
    ///
    /// Accepts anything convertible into a polar sample, e.g. `(angle_deg, range_mm)`
    /// tuples.
    pub fn process_scan<I, T>(&mut self, samples: I) -> FrameRecord
    where
        I: IntoIterator<Item = T>,
        T: IntoPolarSample,
    {
        let samples = normalize_samples(samples);

        self.background.update(&samples);
        let labels = self.background.classify(&samples);

        if !self.background.is_ready() {
            trace!("background model not yet ready, withholding tracking output");
            return FrameRecord {
                objects: Vec::new(),
                background_ready: false,
            };
        }

        let foreground: Vec<PlanarPoint> = samples
            .iter()
            .zip(labels.iter())
            .filter(|(_, label)| **label == Label::Foreground)
            .map(|(sample, _)| polar_to_planar(sample))
            .collect();

        let clusters = self.clusterer.cluster(&foreground);
        let update = self.tracker.update(&clusters);

        for object in &update.tracked_objects {
            self.trajectories.record(object.public_id, object.centroid);
        }
        for public_id in &update.retired_public_ids {
            self.trajectories.remove(*public_id);
        }

        FrameRecord {
            objects: update.tracked_objects,
            background_ready: true,
        }
    }

    /// Returns the recorded centroid history for `public_id`, in frame order.
    /// Empty if the id was never emitted or has since been pruned.
    pub fn trajectory(&self, public_id: u64) -> Vec<PlanarPoint> {
        self.trajectories.query(public_id)
    }
}

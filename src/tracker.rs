use crate::cluster::Cluster;
use crate::config::TrackerConfig;
use crate::geometry::PlanarPoint;
use log::debug;
use std::collections::{HashMap, HashSet};

/// Greedy assignment of tracks to clusters.
mod voting;
use voting::Candidate;

/// Lifecycle state of a [`Track`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackStatus {
    Tentative,
    Confirmed,
    Lost,
}

#[derive(Debug, Clone)]
struct Track {
    #[allow(dead_code)]
    internal_id: u64,
    public_id: Option<u64>,
    last_centroid: PlanarPoint,
    last_velocity: PlanarPoint,
    consecutive_seen: u32,
    consecutive_missing: u32,
    status: TrackStatus,
}

/// A confirmed tracked object as emitted for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackedObject {
    pub public_id: u64,
    pub centroid: PlanarPoint,
    pub velocity: PlanarPoint,
}

/// The result of one [`Tracker::update`] call.
#[derive(Debug, Clone, Default)]
pub struct TrackerUpdate {
    /// Confirmed tracks, in ascending `public_id` order.
    pub tracked_objects: Vec<TrackedObject>,
    /// Public ids retired this frame (tentative tracks that failed to survive a
    /// missed frame, or lost tracks that exceeded `max_missing_frames`).
    pub retired_public_ids: Vec<u64>,
}

/// Greedy data-association tracker with velocity prediction and a
/// tentative/confirmed/lost lifecycle.
///
/// Exclusively owns the live-track set, keyed by internal id, so that association is
/// performed as index-to-index matching followed by a single mutation pass — no
/// shared mutable references between matched tracks and unmatched clusters.
#[derive(Debug, Clone)]
pub struct Tracker {
    tracks: HashMap<u64, Track>,
    next_internal_id: u64,
    next_public_id: u64,
    max_match_distance_mm: f64,
    max_missing_frames: u32,
    min_confirm_frames: u32,
}

impl Tracker {
    pub fn new(config: &TrackerConfig) -> Self {
        Self {
            tracks: HashMap::new(),
            next_internal_id: 1,
            next_public_id: 1,
            max_match_distance_mm: config.max_match_distance_mm,
            max_missing_frames: config.max_missing_frames as u32,
            min_confirm_frames: config.min_confirm_frames as u32,
        }
    }

    /// Advances every live track by one frame against this frame's clusters.
    pub fn update(&mut self, clusters: &[Cluster]) -> TrackerUpdate {
        // Step 1: predict.
        let predicted: HashMap<u64, PlanarPoint> = self
            .tracks
            .iter()
            .map(|(&id, t)| (id, t.last_centroid.add(&t.last_velocity)))
            .collect();

        // Step 2: score candidate pairs within max_match_distance_mm.
        let mut candidates = Vec::new();
        for (&id, pred) in &predicted {
            for (cluster_index, cluster) in clusters.iter().enumerate() {
                let distance_mm = pred.distance(&cluster.centroid);
                if distance_mm <= self.max_match_distance_mm {
                    candidates.push(Candidate {
                        track_id: id,
                        cluster_index,
                        distance_mm,
                    });
                }
            }
        }

        // Step 3: greedy assignment, sorted once and swept with occupancy flags.
        let matched: HashMap<u64, usize> = voting::assign(candidates).into_iter().collect();
        let matched_clusters: HashSet<usize> = matched.values().copied().collect();

        let mut retired_public_ids = Vec::new();
        let track_ids: Vec<u64> = self.tracks.keys().copied().collect();

        for id in track_ids {
            if let Some(&cluster_index) = matched.get(&id) {
                self.apply_match(id, &clusters[cluster_index]);
            } else if let Some(public_id) = self.age(id) {
                retired_public_ids.push(public_id);
            }
        }

        // Step 6: spawn tentative tracks for unmatched clusters.
        for (cluster_index, cluster) in clusters.iter().enumerate() {
            if matched_clusters.contains(&cluster_index) {
                continue;
            }
            self.spawn(cluster);
        }

        // Step 7: emit confirmed tracks only, ascending by public id.
        let mut tracked_objects: Vec<TrackedObject> = self
            .tracks
            .values()
            .filter(|t| t.status == TrackStatus::Confirmed)
            .map(|t| TrackedObject {
                public_id: t.public_id.expect("confirmed track always has a public id"),
                centroid: t.last_centroid,
                velocity: t.last_velocity,
            })
            .collect();
        tracked_objects.sort_by_key(|o| o.public_id);

        TrackerUpdate {
            tracked_objects,
            retired_public_ids,
        }
    }

    /// Step 4: apply a match to a track.
    fn apply_match(&mut self, id: u64, cluster: &Cluster) {
        let track = self.tracks.get_mut(&id).expect("matched id must be live");
        track.last_velocity = cluster.centroid.sub(&track.last_centroid);
        track.last_centroid = cluster.centroid;
        track.consecutive_seen += 1;
        track.consecutive_missing = 0;

        match track.status {
            TrackStatus::Tentative => {
                if track.consecutive_seen >= self.min_confirm_frames {
                    track.status = TrackStatus::Confirmed;
                    track.public_id = Some(self.next_public_id);
                    self.next_public_id += 1;
                    debug!("track {} confirmed as public id {:?}", id, track.public_id);
                }
            }
            TrackStatus::Lost => {
                track.status = TrackStatus::Confirmed;
                debug!("track {} reconnected after occlusion", id);
            }
            TrackStatus::Confirmed => {}
        }
    }

    /// Step 5: dead-reckon and age a track that went unmatched this frame. Returns
    /// the track's public id if it was retired.
    fn age(&mut self, id: u64) -> Option<u64> {
        let mut should_retire = false;
        {
            let track = self.tracks.get_mut(&id).expect("id must be live");
            track.last_centroid = track.last_centroid.add(&track.last_velocity);
            track.consecutive_seen = 0;
            track.consecutive_missing += 1;

            match track.status {
                TrackStatus::Tentative => should_retire = true,
                TrackStatus::Confirmed | TrackStatus::Lost => {
                    track.status = TrackStatus::Lost;
                    if track.consecutive_missing > self.max_missing_frames {
                        should_retire = true;
                    }
                }
            }
        }

        if should_retire {
            let track = self.tracks.remove(&id).expect("id must be live");
            debug!("track {} retired", id);
            track.public_id
        } else {
            None
        }
    }

    /// Step 6: open a new tentative track for an unmatched cluster.
    fn spawn(&mut self, cluster: &Cluster) {
        let internal_id = self.next_internal_id;
        self.next_internal_id += 1;
        self.tracks.insert(
            internal_id,
            Track {
                internal_id,
                public_id: None,
                last_centroid: cluster.centroid,
                last_velocity: PlanarPoint::zero(),
                consecutive_seen: 1,
                consecutive_missing: 0,
                status: TrackStatus::Tentative,
            },
        );
        debug!("track {} spawned (tentative)", internal_id);
    }

    /// Number of live tracks in any status, for diagnostics and tests.
    pub fn live_track_count(&self) -> usize {
        self.tracks.len()
    }
}

use std::collections::HashSet;

/// A scored (track, cluster) pair eligible for assignment — its predicted-centroid
/// to cluster-centroid distance is within `max_match_distance_mm`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub track_id: u64,
    pub cluster_index: usize,
    pub distance_mm: f64,
}

/// Greedily assigns candidates to (track, cluster) pairs.
///
/// The candidate list is sorted once by `(distance, track_id, cluster_index)` and then
/// swept a single time while two occupancy sets track which tracks and clusters are
/// already spoken for, avoiding the quadratic rescans a naive repeated-argmin would
/// need.
pub fn assign(mut candidates: Vec<Candidate>) -> Vec<(u64, usize)> {
    candidates.sort_by(|a, b| {
        a.distance_mm
            .partial_cmp(&b.distance_mm)
            .unwrap()
            .then(a.track_id.cmp(&b.track_id))
            .then(a.cluster_index.cmp(&b.cluster_index))
    });

    let mut matched_tracks: HashSet<u64> = HashSet::new();
    let mut matched_clusters: HashSet<usize> = HashSet::new();
    let mut assignment = Vec::new();

    for candidate in candidates {
        if matched_tracks.contains(&candidate.track_id)
            || matched_clusters.contains(&candidate.cluster_index)
        {
            continue;
        }
        matched_tracks.insert(candidate.track_id);
        matched_clusters.insert(candidate.cluster_index);
        assignment.push((candidate.track_id, candidate.cluster_index));
    }

    assignment
}

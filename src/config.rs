use crate::Error;

/// Tunable parameters for a [`crate::scene::Scene`].
///
/// All fields default to the values fixed by the specification this crate implements;
/// [`TrackerConfig::validate`] enforces the constraints on them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerConfig {
    /// `alpha` in the background model's asymmetric EMA. Must lie in `(0, 1]`.
    pub background_learning_rate: f64,
    /// How much closer than the learned range a sample must be to count as foreground, in mm.
    pub foreground_threshold_mm: f64,
    /// Number of processed frames before the background model is considered ready.
    pub min_learning_frames: usize,
    /// Number of equal-width angular bins `B` partitioning `[0, 360)`.
    pub angle_bins: usize,
    /// Neighborhood radius used by the clusterer, in mm.
    pub cluster_eps_mm: f64,
    /// Minimum neighbor count (including the point itself) for a core point.
    pub cluster_min_samples: usize,
    /// Clusters with a bounding radius larger than this are dropped, in mm.
    pub max_cluster_radius_mm: f64,
    /// Maximum predicted-centroid-to-cluster-centroid distance considered for matching, in mm.
    pub max_match_distance_mm: f64,
    /// Frames a track may remain unmatched (`lost`) before it is retired.
    pub max_missing_frames: usize,
    /// Consecutive matched frames required before a tentative track is confirmed.
    pub min_confirm_frames: usize,
    /// Maximum recorded centroids kept per trajectory; `0` means unbounded.
    pub max_trajectory_length: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            background_learning_rate: 0.02,
            foreground_threshold_mm: 150.0,
            min_learning_frames: 30,
            angle_bins: 720,
            cluster_eps_mm: 200.0,
            cluster_min_samples: 3,
            max_cluster_radius_mm: 500.0,
            max_match_distance_mm: 800.0,
            max_missing_frames: 10,
            min_confirm_frames: 2,
            max_trajectory_length: 0,
        }
    }
}

impl TrackerConfig {
    /// Checks every constraint from the specification's external-interfaces section.
    ///
    /// Returns the first violated constraint found; construction proceeds only when
    /// this returns `Ok`.
    pub fn validate(&self) -> Result<(), Error> {
        if self.angle_bins < 1 {
            return Err(Error::InvalidConfig {
                field: "angle_bins",
                message: "must be >= 1".to_string(),
            });
        }
        if !(self.background_learning_rate > 0.0 && self.background_learning_rate <= 1.0) {
            return Err(Error::InvalidConfig {
                field: "background_learning_rate",
                message: "must lie in (0, 1]".to_string(),
            });
        }
        for (field, value) in [
            ("foreground_threshold_mm", self.foreground_threshold_mm),
            ("cluster_eps_mm", self.cluster_eps_mm),
            ("max_cluster_radius_mm", self.max_cluster_radius_mm),
            ("max_match_distance_mm", self.max_match_distance_mm),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(Error::InvalidConfig {
                    field,
                    message: "must be a non-negative finite distance".to_string(),
                });
            }
        }
        if self.min_confirm_frames < 1 {
            return Err(Error::InvalidConfig {
                field: "min_confirm_frames",
                message: "must be >= 1".to_string(),
            });
        }
        if self.cluster_min_samples < 1 {
            return Err(Error::InvalidConfig {
                field: "cluster_min_samples",
                message: "must be >= 1".to_string(),
            });
        }
        Ok(())
    }
}

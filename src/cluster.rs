use crate::config::TrackerConfig;
use crate::geometry::PlanarPoint;
use itertools::iproduct;
use log::trace;
use std::collections::{HashMap, HashSet, VecDeque};

/// A group of spatially dense foreground points that plausibly corresponds to one
/// physical object.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    pub centroid: PlanarPoint,
    pub member_count: usize,
    pub bounding_radius_mm: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum PointState {
    Unvisited,
    Noise,
    Member(usize),
}

/// Grid-accelerated density-based clusterer.
///
/// Points are hashed into `eps_mm`-sided cells so that a neighborhood query only has
/// to scan the 3x3 block of cells around a point, keeping the expected cost close to
/// `O(n)` for the sensor's expected foreground point counts.
#[derive(Debug, Clone)]
pub struct Clusterer {
    eps_mm: f64,
    min_samples: usize,
    max_cluster_radius_mm: f64,
}

type Cell = (i64, i64);

impl Clusterer {
    pub fn new(config: &TrackerConfig) -> Self {
        Self {
            eps_mm: config.cluster_eps_mm,
            min_samples: config.cluster_min_samples,
            max_cluster_radius_mm: config.max_cluster_radius_mm,
        }
    }

    fn cell_of(&self, p: &PlanarPoint) -> Cell {
        let side = self.eps_mm.max(f64::MIN_POSITIVE);
        ((p.x_mm() / side).floor() as i64, (p.y_mm() / side).floor() as i64)
    }

    fn build_grid(&self, points: &[PlanarPoint]) -> HashMap<Cell, Vec<usize>> {
        let mut grid: HashMap<Cell, Vec<usize>> = HashMap::new();
        for (i, p) in points.iter().enumerate() {
            grid.entry(self.cell_of(p)).or_default().push(i);
        }
        grid
    }

    fn neighbors(&self, points: &[PlanarPoint], grid: &HashMap<Cell, Vec<usize>>, i: usize) -> Vec<usize> {
        let (cx, cy) = self.cell_of(&points[i]);
        let eps_sq = self.eps_mm * self.eps_mm;
        let mut out = Vec::new();
        for (dx, dy) in iproduct!(-1..=1, -1..=1) {
            if let Some(indices) = grid.get(&(cx + dx, cy + dy)) {
                for &j in indices {
                    if points[i].squared_distance(&points[j]) <= eps_sq {
                        out.push(j);
                    }
                }
            }
        }
        out
    }

    /// Groups `points` into clusters, discarding clusters whose bounding radius
    /// exceeds `max_cluster_radius_mm`.
    ///
    /// Clusters are returned in the order they were opened, which is deterministic
    /// given the input order.
    pub fn cluster(&self, points: &[PlanarPoint]) -> Vec<Cluster> {
        if points.is_empty() {
            return Vec::new();
        }

        let grid = self.build_grid(points);
        let mut state = vec![PointState::Unvisited; points.len()];
        let mut members: Vec<Vec<usize>> = Vec::new();

        for i in 0..points.len() {
            if state[i] != PointState::Unvisited {
                continue;
            }

            let neighbors_i = self.neighbors(points, &grid, i);
            if neighbors_i.len() < self.min_samples {
                state[i] = PointState::Noise;
                continue;
            }

            let cluster_index = members.len();
            members.push(Vec::new());
            state[i] = PointState::Member(cluster_index);
            members[cluster_index].push(i);

            let mut in_queue: HashSet<usize> = neighbors_i.iter().copied().collect();
            let mut queue: VecDeque<usize> = neighbors_i.into_iter().collect();

            while let Some(j) = queue.pop_front() {
                match state[j] {
                    PointState::Noise => {
                        state[j] = PointState::Member(cluster_index);
                        members[cluster_index].push(j);
                    }
                    PointState::Unvisited => {
                        state[j] = PointState::Member(cluster_index);
                        members[cluster_index].push(j);

                        let neighbors_j = self.neighbors(points, &grid, j);
                        if neighbors_j.len() >= self.min_samples {
                            for k in neighbors_j {
                                if !matches!(state[k], PointState::Member(_)) && !in_queue.contains(&k) {
                                    in_queue.insert(k);
                                    queue.push_back(k);
                                }
                            }
                        }
                    }
                    PointState::Member(_) => {}
                }
            }
        }

        let clusters: Vec<Cluster> = members
            .into_iter()
            .filter_map(|indices| self.finalize(points, indices))
            .collect();

        trace!(
            "clustered {} points into {} clusters",
            points.len(),
            clusters.len()
        );
        clusters
    }

    fn finalize(&self, points: &[PlanarPoint], indices: Vec<usize>) -> Option<Cluster> {
        let member_count = indices.len();
        let (sum_x, sum_y) = indices.iter().fold((0.0, 0.0), |(sx, sy), &i| {
            (sx + points[i].x_mm(), sy + points[i].y_mm())
        });
        let centroid = PlanarPoint::new(sum_x / member_count as f64, sum_y / member_count as f64);

        let bounding_radius_mm = indices
            .iter()
            .map(|&i| points[i].distance(&centroid))
            .fold(0.0_f64, f64::max);

        if bounding_radius_mm > self.max_cluster_radius_mm {
            return None;
        }

        Some(Cluster {
            centroid,
            member_count,
            bounding_radius_mm,
        })
    }
}

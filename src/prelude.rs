//! Re-exports of the types most callers need, so `use scanline_tracker::prelude::*;`
//! is enough for typical usage.

pub use crate::background::Label;
pub use crate::cluster::Cluster;
pub use crate::config::TrackerConfig;
pub use crate::geometry::{PlanarPoint, PolarSample};
pub use crate::scene::{FrameRecord, Scene};
pub use crate::tracker::{TrackStatus, TrackedObject};
pub use crate::Error;

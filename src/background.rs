use crate::config::TrackerConfig;
use crate::geometry::PolarSample;
use log::trace;

/// Classification assigned to a sample against the learned background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Background,
    Foreground,
    Unknown,
}

/// The learned static range for one angular bin.
#[derive(Debug, Clone, Copy, Default)]
struct BackgroundBin {
    learned_range_mm: Option<f64>,
    sample_count: u64,
}

/// Per-angular-bin background estimator.
///
/// Owns `B` bins and a frame counter; see [`BackgroundModel::is_ready`] for the
/// learning gate that the orchestrator uses to withhold tracking output.
#[derive(Debug, Clone)]
pub struct BackgroundModel {
    bins: Vec<BackgroundBin>,
    learning_rate: f64,
    foreground_threshold_mm: f64,
    min_learning_frames: usize,
    frame_count: usize,
}

impl BackgroundModel {
    pub fn new(config: &TrackerConfig) -> Self {
        Self {
            bins: vec![BackgroundBin::default(); config.angle_bins],
            learning_rate: config.background_learning_rate,
            foreground_threshold_mm: config.foreground_threshold_mm,
            min_learning_frames: config.min_learning_frames,
            frame_count: 0,
        }
    }

    fn bin_index(&self, angle_deg: f64) -> usize {
        let bins = self.bins.len();
        let idx = (angle_deg * bins as f64 / 360.0).floor() as i64;
        idx.rem_euclid(bins as i64) as usize
    }

    /// Applies the asymmetric EMA to every sample, in input order, then advances the
    /// frame counter: the samples passed to one `update` call constitute one frame.
    pub fn update(&mut self, samples: &[PolarSample]) {
        for sample in samples {
            let idx = self.bin_index(sample.angle_deg);
            let bin = &mut self.bins[idx];
            bin.sample_count += 1;
            match bin.learned_range_mm {
                None => bin.learned_range_mm = Some(sample.range_mm),
                Some(learned) => {
                    if sample.range_mm >= learned - self.foreground_threshold_mm {
                        bin.learned_range_mm =
                            Some((1.0 - self.learning_rate) * learned + self.learning_rate * sample.range_mm);
                    }
                }
            }
        }
        self.frame_count += 1;
        trace!(
            "background model updated: frame={} samples={}",
            self.frame_count,
            samples.len()
        );
    }

    /// Classifies each sample against the model's current state.
    ///
    /// Must be called after [`BackgroundModel::update`] has processed the same
    /// samples, per the pipeline's data flow.
    pub fn classify(&self, samples: &[PolarSample]) -> Vec<Label> {
        samples
            .iter()
            .map(|sample| {
                let idx = self.bin_index(sample.angle_deg);
                match self.bins[idx].learned_range_mm {
                    None => Label::Unknown,
                    Some(learned) => {
                        if sample.range_mm <= learned - self.foreground_threshold_mm {
                            Label::Foreground
                        } else {
                            Label::Background
                        }
                    }
                }
            })
            .collect()
    }

    /// True once `min_learning_frames` frames have been processed.
    pub fn is_ready(&self) -> bool {
        self.frame_count >= self.min_learning_frames
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }
}

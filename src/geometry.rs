use nalgebra::Point2;

/// A single polar range-sensor reading.
///
/// `angle_deg` is normalized into `[0, 360)` and `range_mm` is positive and finite by
/// the time a sample reaches any pipeline stage; see [`normalize_samples`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarSample {
    pub angle_deg: f64,
    pub range_mm: f64,
}

impl PolarSample {
    pub fn new(angle_deg: f64, range_mm: f64) -> Self {
        Self {
            angle_deg,
            range_mm,
        }
    }
}

/// A point on the sensor's local plane, in mm, with `x` to the right and `y` up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanarPoint {
    pub p: Point2<f64>,
}

impl PlanarPoint {
    pub fn new(x_mm: f64, y_mm: f64) -> Self {
        Self {
            p: Point2::new(x_mm, y_mm),
        }
    }

    pub fn x_mm(&self) -> f64 {
        self.p.x
    }

    pub fn y_mm(&self) -> f64 {
        self.p.y
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    pub fn add(&self, other: &PlanarPoint) -> PlanarPoint {
        PlanarPoint::new(self.p.x + other.p.x, self.p.y + other.p.y)
    }

    pub fn sub(&self, other: &PlanarPoint) -> PlanarPoint {
        PlanarPoint::new(self.p.x - other.p.x, self.p.y - other.p.y)
    }

    pub fn squared_distance(&self, other: &PlanarPoint) -> f64 {
        let dx = self.p.x - other.p.x;
        let dy = self.p.y - other.p.y;
        dx * dx + dy * dy
    }

    pub fn distance(&self, other: &PlanarPoint) -> f64 {
        self.squared_distance(other).sqrt()
    }
}

/// Converts a normalized polar sample into a planar point, in mm.
///
/// Axes are fixed by the crate's units contract: `x` to the right, `y` up, origin at
/// the sensor, angle measured counter-clockwise from the positive `x` axis.
pub fn polar_to_planar(sample: &PolarSample) -> PlanarPoint {
    let theta = sample.angle_deg.to_radians();
    PlanarPoint::new(
        sample.range_mm * theta.cos(),
        sample.range_mm * theta.sin(),
    )
}

/// Converts any caller-provided value into a [`PolarSample`], or rejects it.
///
/// Implemented for the bare `(angle_deg, range_mm)` tuple as well as for
/// [`PolarSample`] itself, so `process_scan` accepts either.
pub trait IntoPolarSample {
    fn into_polar_sample(self) -> Option<PolarSample>;
}

impl IntoPolarSample for PolarSample {
    fn into_polar_sample(self) -> Option<PolarSample> {
        Some(self)
    }
}

impl IntoPolarSample for (f64, f64) {
    fn into_polar_sample(self) -> Option<PolarSample> {
        let (angle_deg, range_mm) = self;
        PolarSample::new(angle_deg, range_mm).into_polar_sample()
    }
}

/// Normalizes a caller-provided sequence into valid [`PolarSample`]s.
///
/// Angles are wrapped into `[0, 360)` with `rem_euclid`; samples with a non-finite
/// angle or a non-positive, non-finite range are silently discarded, per the crate's
/// input-rejection rule.
pub fn normalize_samples<I, T>(samples: I) -> Vec<PolarSample>
where
    I: IntoIterator<Item = T>,
    T: IntoPolarSample,
{
    samples
        .into_iter()
        .filter_map(|s| s.into_polar_sample())
        .filter(|s| s.angle_deg.is_finite() && s.range_mm.is_finite() && s.range_mm > 0.0)
        .map(|s| PolarSample::new(s.angle_deg.rem_euclid(360.0), s.range_mm))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EPS;

    #[test]
    fn converts_cardinal_directions() {
        let p = polar_to_planar(&PolarSample::new(0.0, 1000.0));
        assert!((p.x_mm() - 1000.0).abs() < 1e-6);
        assert!(p.y_mm().abs() < 1e-6);

        let p = polar_to_planar(&PolarSample::new(90.0, 1000.0));
        assert!(p.x_mm().abs() < 1e-6);
        assert!((p.y_mm() - 1000.0).abs() < 1e-6);
    }

    #[test]
    fn normalizes_out_of_range_angle() {
        let samples = normalize_samples(vec![(370.0, 1000.0), (-10.0, 1000.0)]);
        assert_eq!(samples.len(), 2);
        assert!((samples[0].angle_deg - 10.0).abs() < EPS);
        assert!((samples[1].angle_deg - 350.0).abs() < EPS);
    }

    #[test]
    fn drops_non_positive_range_and_non_finite_angle() {
        let samples = normalize_samples(vec![
            (10.0, 0.0),
            (10.0, -5.0),
            (f64::NAN, 100.0),
            (10.0, f64::NAN),
            (10.0, 500.0),
        ]);
        assert_eq!(samples.len(), 1);
        assert!((samples[0].range_mm - 500.0).abs() < EPS);
    }

    #[test]
    fn distance_is_euclidean() {
        let a = PlanarPoint::new(0.0, 0.0);
        let b = PlanarPoint::new(3.0, 4.0);
        assert!((a.distance(&b) - 5.0).abs() < EPS);
    }
}

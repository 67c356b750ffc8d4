use std::ops::Index;

use super::constants::LANDMARK_COUNT;
use super::error::ScanError;

/// A facial landmark normalized to frame dimensions.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Landmark {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    pub fn with_depth(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Pixel position `(px, py)` divided by the frame size, clamped into `[0, 1]`.
    pub fn normalized(px: f64, py: f64, frame_w: u32, frame_h: u32) -> Self {
        Self::new(
            (px / frame_w.max(1) as f64).clamp(0.0, 1.0),
            (py / frame_h.max(1) as f64).clamp(0.0, 1.0),
        )
    }

    /// `x` and `y` clamped into `[0, 1]`; depth is unbounded.
    pub fn clamped(self) -> Self {
        Self {
            x: self.x.clamp(0.0, 1.0),
            y: self.y.clamp(0.0, 1.0),
            z: self.z,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    pub fn distance(&self, other: &Landmark) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// Ordered set of exactly [`LANDMARK_COUNT`] landmarks.
///
/// Index ranges map to fixed facial regions (see `shared::constants`);
/// consumers address points by index. Every point is finite with `x` and
/// `y` in `[0, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct LandmarkSet {
    points: Vec<Landmark>,
}

impl LandmarkSet {
    pub fn new(points: Vec<Landmark>) -> Result<Self, ScanError> {
        if points.len() != LANDMARK_COUNT {
            return Err(ScanError::LandmarkCount {
                expected: LANDMARK_COUNT,
                actual: points.len(),
            });
        }
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(ScanError::InvalidLandmark { index });
        }
        Ok(Self {
            points: points.into_iter().map(Landmark::clamped).collect(),
        })
    }

    /// Every point set to `fill`; handy as a base for hand-placed layouts.
    pub fn filled(fill: Landmark) -> Result<Self, ScanError> {
        Self::new(vec![fill; LANDMARK_COUNT])
    }

    /// Returns a copy with the point at `index` replaced.
    pub fn with_point(mut self, index: usize, point: Landmark) -> Result<Self, ScanError> {
        if !point.is_finite() {
            return Err(ScanError::InvalidLandmark { index });
        }
        self.points[index] = point.clamped();
        Ok(self)
    }

    pub fn get(&self, index: usize) -> Option<&Landmark> {
        self.points.get(index)
    }

    pub fn points(&self) -> &[Landmark] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Landmark> {
        self.points.iter()
    }
}

impl Index<usize> for LandmarkSet {
    type Output = Landmark;

    fn index(&self, index: usize) -> &Landmark {
        &self.points[index]
    }
}

impl<'a> IntoIterator for &'a LandmarkSet {
    type Item = &'a Landmark;
    type IntoIter = std::slice::Iter<'a, Landmark>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_distance_2d() {
        let a = Landmark::new(0.0, 0.0);
        let b = Landmark::new(0.3, 0.4);
        assert_relative_eq!(a.distance(&b), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_distance_uses_depth() {
        let a = Landmark::with_depth(0.0, 0.0, 0.0);
        let b = Landmark::with_depth(0.0, 0.0, 0.25);
        assert_relative_eq!(a.distance(&b), 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_normalized_divides_by_frame() {
        let lm = Landmark::normalized(32.0, 24.0, 64, 48);
        assert_relative_eq!(lm.x, 0.5);
        assert_relative_eq!(lm.y, 0.5);
        assert_relative_eq!(lm.z, 0.0);
    }

    #[test]
    fn test_normalized_clamps_out_of_frame() {
        let lm = Landmark::normalized(-3.0, 500.0, 100, 100);
        assert_relative_eq!(lm.x, 0.0);
        assert_relative_eq!(lm.y, 1.0);
    }

    #[test]
    fn test_normalized_zero_frame_stays_finite() {
        let lm = Landmark::normalized(0.0, 5.0, 0, 0);
        assert!(lm.is_finite());
        assert_relative_eq!(lm.y, 1.0);
    }

    #[rstest]
    #[case::empty(0)]
    #[case::one_short(467)]
    #[case::one_over(469)]
    fn test_wrong_count_rejected(#[case] count: usize) {
        let result = LandmarkSet::new(vec![Landmark::default(); count]);
        assert!(matches!(
            result,
            Err(ScanError::LandmarkCount { expected: 468, actual }) if actual == count
        ));
    }

    #[test]
    fn test_exact_count_accepted() {
        let set = LandmarkSet::new(vec![Landmark::default(); 468]).unwrap();
        assert_eq!(set.len(), 468);
        assert!(!set.is_empty());
        assert!(set.get(468).is_none());
    }

    #[test]
    fn test_with_point_replaces_single_index() {
        let set = LandmarkSet::filled(Landmark::new(0.5, 0.5))
            .unwrap()
            .with_point(10, Landmark::new(0.1, 0.2))
            .unwrap();
        assert_eq!(set[10], Landmark::new(0.1, 0.2));
        assert_eq!(set[11], Landmark::new(0.5, 0.5));
        assert_eq!(set.iter().count(), 468);
    }

    #[rstest]
    #[case::nan_x(Landmark::new(f64::NAN, 0.5))]
    #[case::infinite_y(Landmark::new(0.5, f64::INFINITY))]
    #[case::nan_depth(Landmark::with_depth(0.5, 0.5, f64::NAN))]
    fn test_non_finite_point_rejected(#[case] bad: Landmark) {
        let mut points = vec![Landmark::new(0.5, 0.5); 468];
        points[42] = bad;
        assert!(matches!(
            LandmarkSet::new(points),
            Err(ScanError::InvalidLandmark { index: 42 })
        ));
        let base = LandmarkSet::filled(Landmark::new(0.5, 0.5)).unwrap();
        assert!(matches!(
            base.with_point(7, bad),
            Err(ScanError::InvalidLandmark { index: 7 })
        ));
    }

    #[test]
    fn test_out_of_range_points_clamped() {
        let mut points = vec![Landmark::new(0.5, 0.5); 468];
        points[0] = Landmark::with_depth(-0.2, 1.4, -3.0);
        let set = LandmarkSet::new(points).unwrap();
        assert_eq!(set[0], Landmark::with_depth(0.0, 1.0, -3.0));

        let set = set.with_point(1, Landmark::new(2.0, -1.0)).unwrap();
        assert_eq!(set[1], Landmark::new(1.0, 0.0));
    }
}

use crate::kdtree::Point;

/// Generic bounding box for N-dimensional space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox<const D: usize> {
    pub min: [f64; D],
    pub max: [f64; D],
}

impl<const D: usize> BoundingBox<D> {
    pub fn new(min: [f64; D], max: [f64; D]) -> Self {
        Self { min, max }
    }

    /// Returns true if `point` lies inside the box, boundary included.
    pub fn contains(&self, point: &[f64; D]) -> bool {
        (0..D).all(|i| point[i] >= self.min[i] && point[i] <= self.max[i])
    }

    /// Returns true if `other` lies entirely inside this box.
    pub fn encloses(&self, other: &Self) -> bool {
        (0..D).all(|i| other.min[i] >= self.min[i] && other.max[i] <= self.max[i])
    }

    /// Splits the box at `value` along `axis` into the lower and upper halves.
    ///
    /// The split value is not clamped, so a value outside the box yields an
    /// inverted half. The tree only splits at coordinates of enclosed points.
    pub fn split(&self, axis: usize, value: f64) -> (Self, Self) {
        let mut lower = *self;
        let mut upper = *self;
        lower.max[axis] = value;
        upper.min[axis] = value;
        (lower, upper)
    }
}

impl BoundingBox<2> {
    /// Tight extent of `points`, or `None` if there are no points.
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let mut min = *first;
        let mut max = *first;
        for p in &points[1..] {
            for i in 0..2 {
                if p[i] < min[i] { min[i] = p[i]; }
                if p[i] > max[i] { max[i] = p[i]; }
            }
        }
        Some(Self { min, max })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_halves() {
        let bounds = BoundingBox::new([0.0, 0.0], [10.0, 20.0]);
        let (lower, upper) = bounds.split(1, 5.0);
        assert_eq!(lower, BoundingBox::new([0.0, 0.0], [10.0, 5.0]));
        assert_eq!(upper, BoundingBox::new([0.0, 5.0], [10.0, 20.0]));
        assert!(bounds.encloses(&lower));
        assert!(bounds.encloses(&upper));
    }

    #[test]
    fn test_from_points() {
        assert!(BoundingBox::from_points(&[]).is_none());
        let b = BoundingBox::from_points(&[[2.0, 3.0], [9.0, 6.0], [8.0, 1.0]]).unwrap();
        assert_eq!(b.min, [2.0, 1.0]);
        assert_eq!(b.max, [9.0, 6.0]);
        assert!(b.contains(&[8.0, 1.0]));
        assert!(!b.contains(&[1.0, 1.0]));
    }
}

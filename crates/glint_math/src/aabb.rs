use crate::{Interval, Vec3};

/// Axis-aligned bounding box, one interval per axis.
///
/// Bounds are exact: unlike a BVH box there is no padding, because octant
/// membership tests compare vertex coordinates against these bounds directly.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    /// Create an AABB from two corner points, in any order.
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        Self {
            x: Interval::new(a.x.min(b.x), a.x.max(b.x)),
            y: Interval::new(a.y.min(b.y), a.y.max(b.y)),
            z: Interval::new(a.z.min(b.z), a.z.max(b.z)),
        }
    }

    /// Smallest AABB containing every point, or `EMPTY` for no points.
    pub fn enclosing<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Vec3>,
    {
        points
            .into_iter()
            .fold(Aabb::EMPTY, |acc, p| acc.include(p))
    }

    /// Grow the box so that it contains `p`.
    pub fn include(&self, p: Vec3) -> Aabb {
        Aabb {
            x: self.x.include(p.x),
            y: self.y.include(p.y),
            z: self.z.include(p.z),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty() || self.y.is_empty() || self.z.is_empty()
    }

    /// True if `p` lies inside the box or on its surface.
    pub fn contains_point(&self, p: Vec3) -> bool {
        self.x.contains(p.x) && self.y.contains(p.y) && self.z.contains(p.z)
    }

    pub fn min(&self) -> Vec3 {
        Vec3::new(self.x.min, self.y.min, self.z.min)
    }

    pub fn max(&self) -> Vec3 {
        Vec3::new(self.x.max, self.y.max, self.z.max)
    }

    /// Returns the center point of the bounding box.
    pub fn centroid(&self) -> Vec3 {
        Vec3::new(self.x.midpoint(), self.y.midpoint(), self.z.midpoint())
    }

    /// The eight corner points.
    pub fn corners(&self) -> [Vec3; 8] {
        let (lo, hi) = (self.min(), self.max());
        [
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(lo.x, hi.y, hi.z),
            Vec3::new(hi.x, hi.y, hi.z),
        ]
    }

    /// One of the eight octants obtained by splitting at the centroid.
    ///
    /// Bit 0 of `index` selects the upper Y half, bit 1 the upper X half and
    /// bit 2 the upper Z half. Neighbouring octants share their boundary
    /// planes.
    pub fn octant(&self, index: usize) -> Aabb {
        let pick = |interval: Interval, upper: bool| {
            let (low, high) = interval.halves();
            if upper {
                high
            } else {
                low
            }
        };

        Aabb {
            x: pick(self.x, index & 0b010 != 0),
            y: pick(self.y, index & 0b001 != 0),
            z: pick(self.z, index & 0b100 != 0),
        }
    }

    /// All eight octants in index order.
    pub fn octants(&self) -> [Aabb; 8] {
        std::array::from_fn(|i| self.octant(i))
    }

    pub const EMPTY: Aabb = Aabb {
        x: Interval::EMPTY,
        y: Interval::EMPTY,
        z: Interval::EMPTY,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_from_points() {
        let aabb = Aabb::from_points(Vec3::new(10.0, 0.0, 10.0), Vec3::new(0.0, 10.0, 0.0));

        assert_eq!(aabb.min(), Vec3::ZERO);
        assert_eq!(aabb.max(), Vec3::splat(10.0));
    }

    #[test]
    fn test_flat_aabb_is_not_padded() {
        let aabb = Aabb::from_points(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 0.0, 1.0));

        assert_eq!(aabb.y, Interval::new(0.0, 0.0));
        assert!(aabb.contains_point(Vec3::new(0.5, 0.0, 0.5)));
        assert!(!aabb.contains_point(Vec3::new(0.5, 0.0001, 0.5)));
    }

    #[test]
    fn test_aabb_enclosing() {
        let aabb = Aabb::enclosing([
            Vec3::new(-1.0, -2.0, -3.0),
            Vec3::new(4.0, 5.0, 6.0),
            Vec3::ZERO,
        ]);

        assert_eq!(aabb.min(), Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(aabb.max(), Vec3::new(4.0, 5.0, 6.0));
        assert!(Aabb::enclosing(std::iter::empty()).is_empty());
    }

    #[test]
    fn test_aabb_centroid() {
        let aabb = Aabb::from_points(Vec3::new(0.0, 0.0, 0.0), Vec3::new(10.0, 10.0, 10.0));
        assert_eq!(aabb.centroid(), Vec3::new(5.0, 5.0, 5.0));
    }

    #[test]
    fn test_octant_order() {
        let aabb = Aabb::from_points(Vec3::splat(-1.0), Vec3::splat(1.0));

        // 0: -x -y -z
        assert_eq!(aabb.octant(0), Aabb::from_points(Vec3::splat(-1.0), Vec3::ZERO));
        // 1: -x +y -z
        assert_eq!(
            aabb.octant(1),
            Aabb::from_points(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(0.0, 1.0, 0.0))
        );
        // 2: +x -y -z
        assert_eq!(
            aabb.octant(2),
            Aabb::from_points(Vec3::new(0.0, -1.0, -1.0), Vec3::new(1.0, 0.0, 0.0))
        );
        // 7: +x +y +z
        assert_eq!(aabb.octant(7), Aabb::from_points(Vec3::ZERO, Vec3::splat(1.0)));
    }

    #[test]
    fn test_octants_cover_box() {
        let aabb = Aabb::from_points(Vec3::new(-2.0, 0.0, 1.0), Vec3::new(4.0, 3.0, 5.0));
        let union = Aabb::enclosing(aabb.octants().iter().flat_map(|o| o.corners()));

        assert_eq!(union, aabb);
    }

    #[test]
    fn test_centroid_lies_in_every_octant() {
        let aabb = Aabb::from_points(Vec3::new(-2.0, 0.0, 1.0), Vec3::new(4.0, 3.0, 5.0));
        let center = aabb.centroid();

        for octant in aabb.octants() {
            assert!(octant.contains_point(center));
        }
    }

    #[test]
    fn test_corners() {
        let aabb = Aabb::from_points(Vec3::ZERO, Vec3::ONE);
        let corners = aabb.corners();

        assert_eq!(corners[0], Vec3::ZERO);
        assert_eq!(corners[7], Vec3::ONE);
        for corner in corners {
            assert!(aabb.contains_point(corner));
        }
    }
}

use glam::IVec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned box of voxel coordinates with **inclusive** min/max bounds.
///
/// Invariant: min.x <= max.x, min.y <= max.y, min.z <= max.z.
/// The constructor enforces this by swapping components if needed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region3 {
    pub min: IVec3,
    pub max: IVec3,
}

impl Region3 {
    /// Create a region from two corners. Automatically sorts
    /// components so that min <= max on every axis.
    pub fn new(a: IVec3, b: IVec3) -> Self {
        Self {
            min: IVec3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: IVec3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Create a region from its min corner and a size in voxels per axis.
    ///
    /// `size` components must be >= 1; a region always spans at least one voxel.
    pub fn from_min_size(min: IVec3, size: IVec3) -> Self {
        debug_assert!(
            size.x >= 1 && size.y >= 1 && size.z >= 1,
            "region size must be at least 1 voxel per axis"
        );
        Self {
            min,
            max: min + size - IVec3::ONE,
        }
    }

    /// Returns the number of voxels spanned along each axis.
    pub fn size(&self) -> IVec3 {
        self.max - self.min + IVec3::ONE
    }

    /// Returns the total number of voxels in the region.
    pub fn volume(&self) -> i64 {
        let s = self.size();
        s.x as i64 * s.y as i64 * s.z as i64
    }

    /// Returns the number of (x, z) columns in the horizontal footprint.
    pub fn column_count(&self) -> i64 {
        let s = self.size();
        s.x as i64 * s.z as i64
    }

    /// Returns true if the voxel coordinate lies inside or on the boundary.
    pub fn contains(&self, p: IVec3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    /// Returns true if the (x, z) column belongs to the horizontal footprint.
    pub fn contains_column(&self, x: i32, z: i32) -> bool {
        x >= self.min.x && x <= self.max.x && z >= self.min.z && z <= self.max.z
    }

    /// Returns true if this region overlaps with other
    /// (including touching edges/faces).
    pub fn intersects(&self, other: &Region3) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Iterate over every (x, z) column of the horizontal footprint, x-major.
    pub fn columns(&self) -> impl Iterator<Item = (i32, i32)> + use<> {
        let (min, max) = (self.min, self.max);
        (min.x..=max.x).flat_map(move |x| (min.z..=max.z).map(move |z| (x, z)))
    }

    /// Iterate over the vertical range from `max.y` down to `min.y`.
    pub fn ys_descending(&self) -> impl Iterator<Item = i32> + use<> {
        (self.min.y..=self.max.y).rev()
    }

    /// Returns the same-footprint region directly beneath this one.
    ///
    /// The returned region has the same height; its top face touches this
    /// region's bottom face. Columns whose cave reaches `min.y` find their
    /// floor in that region.
    pub fn stacked_below(&self) -> Region3 {
        let height = self.size().y;
        Region3 {
            min: IVec3::new(self.min.x, self.min.y - height, self.min.z),
            max: IVec3::new(self.max.x, self.min.y - 1, self.max.z),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_inside() {
        let region = Region3::new(IVec3::new(0, 0, 0), IVec3::new(10, 10, 10));
        assert!(region.contains(IVec3::new(5, 5, 5)));
    }

    #[test]
    fn test_contains_outside() {
        let region = Region3::new(IVec3::new(0, 0, 0), IVec3::new(10, 10, 10));
        assert!(!region.contains(IVec3::new(11, 5, 5)));
    }

    #[test]
    fn test_contains_bounds_are_inclusive() {
        let region = Region3::new(IVec3::new(0, 0, 0), IVec3::new(10, 10, 10));
        assert!(region.contains(IVec3::new(0, 0, 0))); // min corner
        assert!(region.contains(IVec3::new(10, 10, 10))); // max corner
        assert!(region.contains(IVec3::new(10, 5, 5))); // face
    }

    #[test]
    fn test_constructor_auto_sorts() {
        let region = Region3::new(IVec3::new(10, 10, 10), IVec3::new(0, 0, 0));
        assert_eq!(region.min, IVec3::new(0, 0, 0));
        assert_eq!(region.max, IVec3::new(10, 10, 10));
    }

    #[test]
    fn test_from_min_size() {
        let region = Region3::from_min_size(IVec3::new(32, -64, 32), IVec3::new(32, 128, 32));
        assert_eq!(region.min, IVec3::new(32, -64, 32));
        assert_eq!(region.max, IVec3::new(63, 63, 63));
        assert_eq!(region.size(), IVec3::new(32, 128, 32));
    }

    #[test]
    fn test_size_counts_inclusive_bounds() {
        let region = Region3::new(IVec3::new(0, 0, 0), IVec3::new(0, 9, 0));
        // A single-column region from y=0 to y=9 spans 10 voxels vertically.
        assert_eq!(region.size(), IVec3::new(1, 10, 1));
    }

    #[test]
    fn test_volume() {
        let region = Region3::new(IVec3::new(0, 0, 0), IVec3::new(9, 19, 29));
        assert_eq!(region.volume(), 10 * 20 * 30);
    }

    #[test]
    fn test_column_count() {
        let region = Region3::new(IVec3::new(0, -64, 0), IVec3::new(15, 63, 15));
        assert_eq!(region.column_count(), 256);
    }

    #[test]
    fn test_intersects_overlapping() {
        let a = Region3::new(IVec3::new(0, 0, 0), IVec3::new(10, 10, 10));
        let b = Region3::new(IVec3::new(5, 5, 5), IVec3::new(15, 15, 15));
        assert!(a.intersects(&b));
        assert!(b.intersects(&a)); // symmetric
    }

    #[test]
    fn test_intersects_disjoint() {
        let a = Region3::new(IVec3::new(0, 0, 0), IVec3::new(10, 10, 10));
        let b = Region3::new(IVec3::new(20, 20, 20), IVec3::new(30, 30, 30));
        assert!(!a.intersects(&b));
        assert!(!b.intersects(&a));
    }

    #[test]
    fn test_columns_visits_every_column_once() {
        let region = Region3::new(IVec3::new(0, 0, 0), IVec3::new(3, 7, 2));
        let columns: Vec<(i32, i32)> = region.columns().collect();
        assert_eq!(columns.len(), region.column_count() as usize);
        // x-major ordering, z fastest
        assert_eq!(columns[0], (0, 0));
        assert_eq!(columns[1], (0, 1));
        assert_eq!(columns.last(), Some(&(3, 2)));
    }

    #[test]
    fn test_ys_descending_order() {
        let region = Region3::new(IVec3::new(0, -2, 0), IVec3::new(0, 2, 0));
        let ys: Vec<i32> = region.ys_descending().collect();
        assert_eq!(ys, vec![2, 1, 0, -1, -2]);
    }

    #[test]
    fn test_stacked_below_shares_footprint() {
        let region = Region3::new(IVec3::new(0, 0, 0), IVec3::new(31, 31, 31));
        let below = region.stacked_below();
        assert_eq!(below.min, IVec3::new(0, -32, 0));
        assert_eq!(below.max, IVec3::new(31, -1, 31));
        assert_eq!(below.size(), region.size());
        assert_eq!(below.max.y, region.min.y - 1);
        assert!(!below.intersects(&region));
    }

    #[test]
    fn test_contains_column_matches_footprint() {
        let region = Region3::new(IVec3::new(-4, 0, -4), IVec3::new(4, 0, 4));
        assert!(region.contains_column(-4, 4));
        assert!(region.contains_column(0, 0));
        assert!(!region.contains_column(5, 0));
        assert!(!region.contains_column(0, -5));
    }
}

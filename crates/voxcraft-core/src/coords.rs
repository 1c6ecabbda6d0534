//! Grid coordinates for the voxel world.

use glam::{DVec3, IVec3, Vec3};
use serde::{Deserialize, Serialize};

/// A unit cube on the 1-unit grid, identified by its integer center.
///
/// Serialized as a `[x, y, z]` array.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[i32; 3]", into = "[i32; 3]")]
pub struct VoxelCell {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl VoxelCell {
    /// Create a new cell
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Snap a floating-point position to the nearest cell.
    ///
    /// Each component is rounded half away from zero. Returns `None` for
    /// non-finite components or ones outside the `i32` range.
    pub fn round(pos: DVec3) -> Option<Self> {
        let snap = |v: f64| {
            let r = v.round();
            (r.is_finite() && r >= f64::from(i32::MIN) && r <= f64::from(i32::MAX))
                .then_some(r as i32)
        };
        Some(Self::new(snap(pos.x)?, snap(pos.y)?, snap(pos.z)?))
    }

    /// The neighbouring cell across the given face.
    #[inline]
    pub fn offset(self, face: BlockFace) -> Self {
        Self::from(self.to_ivec3() + face.normal())
    }

    /// Convert to glam IVec3
    #[inline]
    pub const fn to_ivec3(self) -> IVec3 {
        IVec3::new(self.x, self.y, self.z)
    }

    /// Center of the cell in world space
    #[inline]
    pub fn center(self) -> Vec3 {
        self.to_ivec3().as_vec3()
    }
}

impl From<IVec3> for VoxelCell {
    fn from(v: IVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<[i32; 3]> for VoxelCell {
    fn from([x, y, z]: [i32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<VoxelCell> for [i32; 3] {
    fn from(cell: VoxelCell) -> Self {
        [cell.x, cell.y, cell.z]
    }
}

/// One of the six faces of a cube.
///
/// Ordered +X, -X, +Y, -Y, +Z, -Z.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockFace {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl BlockFace {
    /// All faces in index order.
    pub const ALL: [Self; 6] = [
        Self::PosX,
        Self::NegX,
        Self::PosY,
        Self::NegY,
        Self::PosZ,
        Self::NegZ,
    ];

    /// Face whose outward normal best matches `normal`.
    pub fn from_normal(normal: Vec3) -> Option<Self> {
        if !normal.is_finite() || normal.length_squared() == 0.0 {
            return None;
        }
        let abs = normal.abs();
        let face = if abs.x >= abs.y && abs.x >= abs.z {
            if normal.x >= 0.0 { Self::PosX } else { Self::NegX }
        } else if abs.y >= abs.z {
            if normal.y >= 0.0 { Self::PosY } else { Self::NegY }
        } else if normal.z >= 0.0 {
            Self::PosZ
        } else {
            Self::NegZ
        };
        Some(face)
    }

    /// Outward unit normal.
    #[inline]
    pub const fn normal(self) -> IVec3 {
        match self {
            Self::PosX => IVec3::X,
            Self::NegX => IVec3::NEG_X,
            Self::PosY => IVec3::Y,
            Self::NegY => IVec3::NEG_Y,
            Self::PosZ => IVec3::Z,
            Self::NegZ => IVec3::NEG_Z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_is_half_away_from_zero() {
        assert_eq!(
            VoxelCell::round(DVec3::new(1.4, 0.0, 1.4)),
            Some(VoxelCell::new(1, 0, 1))
        );
        assert_eq!(
            VoxelCell::round(DVec3::new(2.5, -2.5, 0.49)),
            Some(VoxelCell::new(3, -3, 0))
        );
    }

    #[test]
    fn rounding_rejects_non_finite_and_huge() {
        assert_eq!(VoxelCell::round(DVec3::new(f64::NAN, 0.0, 0.0)), None);
        assert_eq!(VoxelCell::round(DVec3::new(0.0, f64::INFINITY, 0.0)), None);
        assert_eq!(VoxelCell::round(DVec3::new(0.0, 0.0, 1e12)), None);
    }

    #[test]
    fn offsets_follow_face_normal() {
        let cell = VoxelCell::new(2, 0, 2);
        assert_eq!(cell.offset(BlockFace::PosX), VoxelCell::new(3, 0, 2));
        assert_eq!(cell.offset(BlockFace::NegX), VoxelCell::new(1, 0, 2));
        assert_eq!(cell.offset(BlockFace::PosY), VoxelCell::new(2, 1, 2));
        assert_eq!(cell.offset(BlockFace::NegY), VoxelCell::new(2, -1, 2));
        assert_eq!(cell.offset(BlockFace::PosZ), VoxelCell::new(2, 0, 3));
        assert_eq!(cell.offset(BlockFace::NegZ), VoxelCell::new(2, 0, 1));
    }

    #[test]
    fn faces_from_normals() {
        for face in BlockFace::ALL {
            assert_eq!(BlockFace::from_normal(face.normal().as_vec3()), Some(face));
        }
        // Slanted hit normals pick the dominant axis.
        assert_eq!(BlockFace::from_normal(Vec3::new(0.1, -0.9, 0.2)), Some(BlockFace::NegY));
        assert_eq!(BlockFace::from_normal(Vec3::new(0.3, 0.8, -0.1)), Some(BlockFace::PosY));
        assert_eq!(BlockFace::from_normal(Vec3::new(-0.2, 0.1, -0.7)), Some(BlockFace::NegZ));
        assert_eq!(BlockFace::from_normal(Vec3::ZERO), None);
        assert_eq!(BlockFace::from_normal(Vec3::new(f32::NAN, 1.0, 0.0)), None);
    }

    #[test]
    fn serializes_as_array() {
        let json = serde_json::to_string(&VoxelCell::new(1, -2, 3)).unwrap();
        assert_eq!(json, "[1,-2,3]");
        let cell: VoxelCell = serde_json::from_str("[4,5,6]").unwrap();
        assert_eq!(cell, VoxelCell::new(4, 5, 6));
    }
}

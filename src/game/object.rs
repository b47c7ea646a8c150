//! Placed maze entities.
//!
//! Floors, walls, pegs and the cheese only differ in how the host draws
//! them; collision and layout only look at the shared box geometry, so a
//! single struct with an [`ObjectKind`] tag covers all of them.

use crate::math::Vec3;

/// What a [`MazeObject`] represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ObjectKind {
    Floor,
    Wall,
    Peg,
    Cheese,
}

impl ObjectKind {
    /// Stable numeric tag used in renderer instance data.
    pub fn tag(self) -> u32 {
        match self {
            ObjectKind::Floor => 0,
            ObjectKind::Wall => 1,
            ObjectKind::Peg => 2,
            ObjectKind::Cheese => 3,
        }
    }
}

/// An axis-aligned box placed in the world.
///
/// `position` is the minimum corner of the box, not its centre; `size` is
/// the full extent along each axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MazeObject {
    pub kind: ObjectKind,
    pub position: Vec3,
    pub size: Vec3,
}

impl MazeObject {
    pub fn new(kind: ObjectKind, size: Vec3, position: Vec3) -> Self {
        Self {
            kind,
            position,
            size,
        }
    }

    /// Centre of the box, `position + size / 2`.
    pub fn mid_pos(&self) -> Vec3 {
        self.position + self.size * 0.5
    }

    /// Half of the box size along each axis.
    pub fn half_extent(&self) -> Vec3 {
        self.size * 0.5
    }
}

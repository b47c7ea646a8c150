//! Box overlap test between the mouse and the placed maze objects.
//!
//! # Overview
//!
//! Collision is a coarse proxy, not exact-shape intersection. The mouse is a
//! cube that can turn freely, so its reach along each axis is inflated to
//! the half-diagonal of its footprint ([`AGENT_RADIUS_FACTOR`] times its
//! model size). Maze objects never rotate and use their exact half-extents.
//!
//! The test is run per object and per axis: the mouse and an object are
//! apart if, on any axis `i`,
//!
//! ```text
//! |mouse.mid[i] - object.mid[i]| >= mouse.size[i] * k + object.size[i] / 2
//! ```
//!
//! and they collide only when that fails on all three axes. A hit on any
//! object rejects the whole move; callers never get a contact normal or a
//! push-out vector.

use crate::game::object::MazeObject;
use crate::math::Vec3;
use std::sync::Arc;

/// Reach of the mouse relative to its model size, the half-diagonal of a
/// unit square.
pub const AGENT_RADIUS_FACTOR: f32 = std::f32::consts::FRAC_1_SQRT_2;

/// Bounding box of the mouse at a candidate position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentBounds {
    /// Centre of the mouse
    pub mid_pos: Vec3,
    /// Model size of the mouse cube
    pub model_size: Vec3,
}

impl AgentBounds {
    /// Reach of the mouse along `axis`.
    fn reach(&self, axis: usize) -> f32 {
        self.model_size[axis] * AGENT_RADIUS_FACTOR
    }

    /// Whether this mouse box overlaps `object` on every axis.
    pub fn overlaps(&self, object: &MazeObject) -> bool {
        let object_mid = object.mid_pos();
        let object_half = object.half_extent();
        (0..3).all(|axis| {
            (self.mid_pos[axis] - object_mid[axis]).abs() < self.reach(axis) + object_half[axis]
        })
    }
}

/// Returns `true` as soon as any object overlaps the mouse box.
pub fn collides(agent: &AgentBounds, objects: &[MazeObject]) -> bool {
    objects.iter().any(|object| agent.overlaps(object))
}

/// The set of solid objects the mouse moves through.
///
/// Holds the cached layout output. The list is shared with the renderer and
/// swapped out wholesale on regeneration, never edited in place, so a
/// reader holding the previous `Arc` keeps a consistent snapshot.
#[derive(Debug, Clone)]
pub struct CollisionWorld {
    objects: Arc<[MazeObject]>,
}

impl Default for CollisionWorld {
    fn default() -> Self {
        Self {
            objects: Arc::from(Vec::new()),
        }
    }
}

impl CollisionWorld {
    pub fn new(objects: Vec<MazeObject>) -> Self {
        Self {
            objects: Arc::from(objects),
        }
    }

    /// Replaces the object list with a freshly built layout.
    pub fn replace(&mut self, objects: Vec<MazeObject>) {
        self.objects = Arc::from(objects);
    }

    /// Shared handle to the current object list.
    pub fn objects(&self) -> Arc<[MazeObject]> {
        Arc::clone(&self.objects)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn collides(&self, agent: &AgentBounds) -> bool {
        collides(agent, &self.objects)
    }
}

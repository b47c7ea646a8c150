//! Mouse state and movement logic.
//!
//! This module defines the [`Mouse`], the kinematic agent the player steers
//! through the maze, and the camera rigs derived from its pose.
//!
//! # Coordinate System
//!
//! - X/Z: the floor plane
//! - Y: up
//! - Heading: radians about `+y`; `0` faces `+z`, positive turns towards `+x`
//!
//! Velocity is given in the mouse's body frame: `z` is forward, `x` is
//! sideways. Input handling lives in the host; it only ever hands the mouse
//! resolved linear and angular velocities.
//!
//! # Usage Example
//!
//! ```rust
//! use mouse_maze::game::collision::CollisionWorld;
//! use mouse_maze::game::mouse::Mouse;
//! use mouse_maze::math::Vec3;
//!
//! let mut mouse = Mouse::new(Vec3::new(2.0, 1.0, 2.0), 0.0);
//! mouse.set_velocity(0.0, 4.0);
//! mouse.move_with_collision(&CollisionWorld::default(), 0.5);
//! assert_eq!(mouse.position(), Vec3::new(2.0, 1.0, 4.0));
//! ```

use crate::game::collision::{AgentBounds, CollisionWorld};
use crate::math::Vec3;

/// Size of the mouse cube.
pub const MOUSE_MODEL_SIZE: Vec3 = Vec3::new(1.0, 1.0, 1.0);

/// Position and heading of the mouse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub heading: f32,
}

/// Camera placements available to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraView {
    /// Eyes of the mouse, looking along its heading
    #[default]
    FirstPerson,
    /// Behind and above the mouse, looking at it
    Chase,
    /// Ahead of and above the mouse, looking back at it
    Front,
}

/// Eye, look-at and up vectors for a view matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    pub eye: Vec3,
    pub at: Vec3,
    pub up: Vec3,
}

const CHASE_DISTANCE: f32 = 3.0;
const CHASE_HEIGHT: f32 = 2.0;

/// The kinematic agent.
///
/// Movement is all-or-nothing: a step that would overlap any maze object is
/// dropped entirely, restoring both position and heading to the last pose
/// that was accepted.
#[derive(Debug, Clone)]
pub struct Mouse {
    /// Centre of the mouse cube
    position: Vec3,
    heading: f32,
    /// Body-frame linear velocity, units per second
    velocity: Vec3,
    /// Radians per second about `+y`
    angular_velocity: f32,
    model_size: Vec3,
    /// Last pose that passed the collision test
    last_valid: Pose,
    spawn: Pose,
    blocked: bool,
}

impl Mouse {
    /// Creates a mouse at rest at its spawn pose.
    pub fn new(spawn_position: Vec3, spawn_heading: f32) -> Self {
        let spawn = Pose {
            position: spawn_position,
            heading: spawn_heading,
        };
        Self {
            position: spawn_position,
            heading: spawn_heading,
            velocity: Vec3::ZERO,
            angular_velocity: 0.0,
            model_size: MOUSE_MODEL_SIZE,
            last_valid: spawn,
            spawn,
            blocked: false,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn heading(&self) -> f32 {
        self.heading
    }

    pub fn pose(&self) -> Pose {
        Pose {
            position: self.position,
            heading: self.heading,
        }
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn angular_velocity(&self) -> f32 {
        self.angular_velocity
    }

    /// The mouse model is centred on its position.
    pub fn mid_pos(&self) -> Vec3 {
        self.position
    }

    pub fn bounds(&self) -> AgentBounds {
        AgentBounds {
            mid_pos: self.mid_pos(),
            model_size: self.model_size,
        }
    }

    /// Whether the most recent move was rejected by a collision.
    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    /// Sets the body-frame velocity: `vx` sideways, `vz` forward.
    pub fn set_velocity(&mut self, vx: f32, vz: f32) {
        self.velocity = Vec3::new(vx, self.velocity.y(), vz);
    }

    /// Sets the vertical velocity, which is applied unrotated.
    pub fn set_vertical_velocity(&mut self, vy: f32) {
        self.velocity = Vec3::new(self.velocity.x(), vy, self.velocity.z());
    }

    pub fn set_angular_velocity(&mut self, w: f32) {
        self.angular_velocity = w;
    }

    /// Places the mouse directly, accepting the pose without a collision test.
    pub fn teleport(&mut self, position: Vec3, heading: f32) {
        self.position = position;
        self.heading = heading;
        self.last_valid = self.pose();
        self.blocked = false;
    }

    /// Integrates one step of motion and keeps it only if it is collision free.
    ///
    /// This is the mouse's per-tick move; the session calls it once per
    /// tick with the current collision world.
    ///
    /// # Movement Calculation
    ///
    /// - `heading' = heading + angular_velocity * dt`
    /// - body velocity `(vx, vy, vz)` is rotated by `heading'` in the floor
    ///   plane: `wx = vx cos h' + vz sin h'`, `wz = vz cos h' - vx sin h'`
    /// - `position' = position + (wx, vy, wz) * dt`
    ///
    /// If the mouse box at `position'` overlaps any object in `world`, the
    /// mouse returns to the last accepted pose, heading included. A mouse
    /// pinned against a wall simply stays put tick after tick.
    pub fn move_with_collision(&mut self, world: &CollisionWorld, delta_time: f32) {
        let heading = self.heading + self.angular_velocity * delta_time;
        let (sin, cos) = heading.sin_cos();
        let v = self.velocity;
        let world_velocity = Vec3::new(
            v.x() * cos + v.z() * sin,
            v.y(),
            v.z() * cos - v.x() * sin,
        );

        let tentative = AgentBounds {
            mid_pos: self.position + world_velocity * delta_time,
            model_size: self.model_size,
        };

        if world.collides(&tentative) {
            self.position = self.last_valid.position;
            self.heading = self.last_valid.heading;
            self.blocked = true;
        } else {
            self.position = tentative.mid_pos;
            self.heading = heading;
            self.last_valid = self.pose();
            self.blocked = false;
        }
    }

    /// Restores the spawn pose and stops the mouse.
    pub fn reset(&mut self) {
        self.teleport(self.spawn.position, self.spawn.heading);
        self.velocity = Vec3::ZERO;
        self.angular_velocity = 0.0;
    }

    /// Changes where [`Mouse::reset`] puts the mouse.
    pub fn set_spawn(&mut self, position: Vec3, heading: f32) {
        self.spawn = Pose { position, heading };
    }

    fn forward(&self) -> Vec3 {
        Vec3::from_heading(self.heading)
    }

    /// First-person eye point, half a unit ahead of the centre.
    pub fn eye_vec(&self) -> Vec3 {
        self.position + self.forward() * 0.5
    }

    /// First-person look-at point, one unit ahead of the centre.
    pub fn at_vec(&self) -> Vec3 {
        self.position + self.forward()
    }

    /// Eye point of the chase camera.
    pub fn chase_eye_vec(&self) -> Vec3 {
        self.position - self.forward() * CHASE_DISTANCE + Vec3::UP * CHASE_HEIGHT
    }

    /// Eye point of the front camera.
    pub fn front_eye_vec(&self) -> Vec3 {
        self.position + self.forward() * CHASE_DISTANCE + Vec3::UP * CHASE_HEIGHT
    }

    /// Eye/look-at/up triple for the requested view.
    pub fn camera(&self, view: CameraView) -> CameraRig {
        let (eye, at) = match view {
            CameraView::FirstPerson => (self.eye_vec(), self.at_vec()),
            CameraView::Chase => (self.chase_eye_vec(), self.position),
            CameraView::Front => (self.front_eye_vec(), self.position),
        };
        CameraRig {
            eye,
            at,
            up: Vec3::UP,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::object::{MazeObject, ObjectKind};
    use proptest::prelude::*;
    use std::f32::consts::FRAC_PI_2;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    /// A z-aligned wall occupying x in [3, 3.5]. A mouse at `NEAR_WALL`
    /// facing +x is just clear of it.
    const NEAR_WALL: Vec3 = Vec3::new(2.29, 1.0, 2.0);

    fn wall_ahead() -> CollisionWorld {
        CollisionWorld::new(vec![MazeObject::new(
            ObjectKind::Wall,
            Vec3::new(0.5, 3.0, 3.0),
            Vec3::new(3.0, 0.0, 0.5),
        )])
    }

    #[test]
    fn test_zero_velocity_never_moves() {
        let world = wall_ahead();
        let mut mouse = Mouse::new(Vec3::new(2.0, 1.0, 2.0), 0.3);
        for _ in 0..100 {
            mouse.move_with_collision(&world, 0.016);
        }
        assert_eq!(mouse.position(), Vec3::new(2.0, 1.0, 2.0));
        assert_eq!(mouse.heading(), 0.3);
    }

    #[test]
    fn test_forward_follows_heading() {
        let world = CollisionWorld::default();
        let mut mouse = Mouse::new(Vec3::new(0.0, 1.0, 0.0), FRAC_PI_2);
        mouse.set_velocity(0.0, 2.0);
        mouse.move_with_collision(&world, 1.0);
        assert!(approx(mouse.position(), Vec3::new(2.0, 1.0, 0.0)));
    }

    #[test]
    fn test_rotation_applies_before_translation() {
        let world = CollisionWorld::default();
        let mut mouse = Mouse::new(Vec3::ZERO, 0.0);
        mouse.set_velocity(1.0, 0.0);
        mouse.set_angular_velocity(FRAC_PI_2);
        mouse.move_with_collision(&world, 1.0);

        // Sideways velocity rotated by the new heading of pi/2 points along -z
        assert!((mouse.heading() - FRAC_PI_2).abs() < 1e-6);
        assert!(approx(mouse.position(), Vec3::new(0.0, 0.0, -1.0)));
    }

    #[test]
    fn test_collision_reverts_position_and_heading() {
        let world = wall_ahead();
        for dt in [0.01, 0.05, 0.1, 0.2] {
            let mut mouse = Mouse::new(NEAR_WALL, FRAC_PI_2);
            assert!(!world.collides(&mouse.bounds()));
            mouse.set_velocity(0.0, 5.0);
            mouse.set_angular_velocity(0.2);

            mouse.move_with_collision(&world, dt);
            assert_eq!(mouse.position(), NEAR_WALL, "dt = {dt}");
            assert_eq!(mouse.heading(), FRAC_PI_2, "dt = {dt}");
            assert!(mouse.is_blocked());
        }
    }

    #[test]
    fn test_pinned_mouse_stays_put() {
        let world = wall_ahead();
        let mut mouse = Mouse::new(NEAR_WALL, FRAC_PI_2);
        mouse.set_velocity(0.0, 5.0);
        for _ in 0..50 {
            mouse.move_with_collision(&world, 0.1);
        }
        assert_eq!(mouse.position(), NEAR_WALL);
    }

    #[test]
    fn test_moving_away_from_wall_is_accepted() {
        let world = wall_ahead();
        let mut mouse = Mouse::new(NEAR_WALL, FRAC_PI_2);
        mouse.set_velocity(0.0, -1.0);
        mouse.move_with_collision(&world, 0.5);
        assert!(approx(mouse.position(), Vec3::new(1.79, 1.0, 2.0)));
        assert!(!mouse.is_blocked());
    }

    #[test]
    fn test_reset_restores_spawn() {
        let mut mouse = Mouse::new(Vec3::new(1.0, 1.0, 1.0), 0.0);
        mouse.set_velocity(0.0, 3.0);
        mouse.set_angular_velocity(1.0);
        mouse.move_with_collision(&CollisionWorld::default(), 1.0);
        assert_ne!(mouse.position(), Vec3::new(1.0, 1.0, 1.0));

        mouse.reset();
        assert_eq!(mouse.pose(), Pose {
            position: Vec3::new(1.0, 1.0, 1.0),
            heading: 0.0,
        });
        assert_eq!(mouse.velocity(), Vec3::ZERO);
        assert_eq!(mouse.angular_velocity(), 0.0);
    }

    #[test]
    fn test_camera_rigs() {
        let mouse = Mouse::new(Vec3::new(4.0, 1.0, 4.0), 0.0);

        let first = mouse.camera(CameraView::FirstPerson);
        assert!(approx(first.eye, Vec3::new(4.0, 1.0, 4.5)));
        assert!(approx(first.at, Vec3::new(4.0, 1.0, 5.0)));
        assert_eq!(first.up, Vec3::UP);

        let chase = mouse.camera(CameraView::Chase);
        assert!(approx(chase.eye, Vec3::new(4.0, 3.0, 1.0)));
        assert_eq!(chase.at, mouse.position());

        let front = mouse.camera(CameraView::Front);
        assert!(approx(front.eye, Vec3::new(4.0, 3.0, 7.0)));
    }

    proptest! {
        #[test]
        fn prop_zero_velocity_is_a_fixed_point(
            heading in -10.0f32..10.0,
            dts in prop::collection::vec(0.0f32..1.0, 1..50),
        ) {
            let world = wall_ahead();
            let mut mouse = Mouse::new(NEAR_WALL, heading);
            for dt in dts {
                mouse.move_with_collision(&world, dt);
            }
            prop_assert_eq!(mouse.pose(), Pose { position: NEAR_WALL, heading });
        }
    }
}

//! The collectible cheese and its placement rules.
//!
//! A single cheese object lives for the whole process; pickups move it
//! rather than replacing it.

use crate::error::{MazeError, Result};
use crate::game::object::{MazeObject, ObjectKind};
use crate::math::Vec3;
use crate::maze::generator::Cell;
use crate::rng::RandomIndex;

/// Size of the cheese box.
pub const CHEESE_SIZE: Vec3 = Vec3::new(1.0, 0.5, 1.0);

/// Horizontal distance on each of x and z within which the mouse picks up
/// the cheese, independent of either object's size.
pub const PICKUP_RADIUS: f32 = 1.0;

/// The collectible target.
#[derive(Debug, Clone)]
pub struct Cheese {
    object: MazeObject,
    cell: Cell,
}

impl Cheese {
    /// Creates the cheese sitting on the floor at `origin`.
    pub fn new(origin: Vec3) -> Self {
        Self {
            object: MazeObject::new(ObjectKind::Cheese, CHEESE_SIZE, origin),
            cell: Cell::default(),
        }
    }

    pub fn object(&self) -> &MazeObject {
        &self.object
    }

    pub fn position(&self) -> Vec3 {
        self.object.position
    }

    pub fn mid_pos(&self) -> Vec3 {
        self.object.mid_pos()
    }

    /// Grid cell the cheese was last placed in.
    pub fn cell(&self) -> Cell {
        self.cell
    }

    /// Moves the cheese to a uniformly random cell of
    /// `[min_x, max_x) x [min_z, max_z)`.
    ///
    /// The cell index maps to world space as `(index + 0.5) * (cell_size +
    /// wall_width)` from `origin` on each horizontal axis; `origin.y` is the
    /// floor the cheese rests on.
    ///
    /// # Errors
    /// Returns [`MazeError::DegenerateRegion`] when the rectangle is empty on
    /// either axis; the cheese is left where it was.
    #[allow(clippy::too_many_arguments)]
    pub fn randomize<R: RandomIndex + ?Sized>(
        &mut self,
        rng: &mut R,
        min_x: usize,
        max_x: usize,
        min_z: usize,
        max_z: usize,
        cell_size: f32,
        wall_width: f32,
        origin: Vec3,
    ) -> Result<Cell> {
        if min_x >= max_x || min_z >= max_z {
            return Err(MazeError::DegenerateRegion {
                min_x,
                max_x,
                min_z,
                max_z,
            });
        }

        let x = min_x + rng.random_index(max_x - min_x);
        let z = min_z + rng.random_index(max_z - min_z);
        let pitch = cell_size + wall_width;

        self.cell = Cell::new(x, z);
        self.object.position = origin
            + Vec3::new((x as f32 + 0.5) * pitch, 0.0, (z as f32 + 0.5) * pitch);
        Ok(self.cell)
    }

    /// Places the cheese in the far quadrant `[N/2, N) x [N/2, N)`, away
    /// from the mouse spawn corner.
    pub fn starting_position<R: RandomIndex + ?Sized>(
        &mut self,
        rng: &mut R,
        n: usize,
        cell_size: f32,
        wall_width: f32,
        origin: Vec3,
    ) -> Result<Cell> {
        let half = n / 2;
        self.randomize(rng, half, n, half, n, cell_size, wall_width, origin)
    }

    /// Whether a mouse centred at `mouse_mid` is close enough to eat the cheese.
    pub fn is_reached_by(&self, mouse_mid: Vec3) -> bool {
        let mid = self.mid_pos();
        (mouse_mid.x() - mid.x()).abs() <= PICKUP_RADIUS
            && (mouse_mid.z() - mid.z()).abs() <= PICKUP_RADIUS
    }
}

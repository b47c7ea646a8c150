//! Conversion of a connectivity [`Grid`] into placed maze geometry.
//!
//! The maze sits on a lattice of grid lines spaced `cell_size + wall_width`
//! apart, starting at the layout origin. Every grid-line intersection gets a
//! peg; every cell edge without a passage gets a wall between the two pegs
//! that bound it. Edges along the far `x = N` and `z = N` lines are always
//! walled, and the near `x = 0` / `z = 0` edges are walled because no
//! passage can leave the grid, so the maze is always fully enclosed.
//!
//! ```text
//!   peg   wall   peg
//!    #==========#
//!    |          |
//!    |   cell   |   wall_width  <->  cell_size  <->  wall_width
//!    |          |
//!    #==========#
//! ```

use crate::error::{MazeError, Result};
use crate::game::object::{MazeObject, ObjectKind};
use crate::math::Vec3;
use crate::maze::generator::{Cell, Direction, Grid};

/// Dimensions used to place maze geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    /// Clear width of a cell between two walls
    pub cell_size: f32,
    /// Thickness of walls and pegs
    pub wall_width: f32,
    /// Height of walls and pegs
    pub wall_height: f32,
    /// Minimum corner of the first peg; `origin.y` is the floor top
    pub origin: Vec3,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            cell_size: 3.0,
            wall_width: 0.5,
            wall_height: 3.0,
            origin: Vec3::ZERO,
        }
    }
}

impl LayoutParams {
    /// Rejects non-positive or non-finite dimensions.
    pub fn validate(&self) -> Result<()> {
        let dims = [
            ("cell_size", self.cell_size),
            ("wall_width", self.wall_width),
            ("wall_height", self.wall_height),
        ];
        for (name, value) in dims {
            if !value.is_finite() || value <= 0.0 {
                return Err(MazeError::invalid(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if !self.origin.is_finite() {
            return Err(MazeError::invalid("origin must be finite"));
        }
        Ok(())
    }

    /// Distance between neighbouring grid lines.
    pub fn pitch(&self) -> f32 {
        self.cell_size + self.wall_width
    }

    /// Side length of the whole maze footprint for an `n x n` grid.
    pub fn footprint(&self, n: usize) -> f32 {
        n as f32 * self.pitch() + self.wall_width
    }

    /// Offset of grid line `i` from the origin along either horizontal axis.
    fn line(&self, i: usize) -> f32 {
        i as f32 * self.pitch()
    }

    /// World-space centre of a cell's floor, `height` above the floor top.
    pub fn cell_center(&self, cell: Cell, height: f32) -> Vec3 {
        let half = self.wall_width + self.cell_size * 0.5;
        self.origin
            + Vec3::new(
                self.line(cell.x) + half,
                height,
                self.line(cell.z) + half,
            )
    }
}

/// Builds the object list for a maze.
#[derive(Debug, Clone)]
pub struct MazeLayoutBuilder {
    params: LayoutParams,
}

impl MazeLayoutBuilder {
    pub fn new(params: LayoutParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &LayoutParams {
        &self.params
    }

    /// Places the floor, every peg, and a wall on every closed cell edge.
    ///
    /// The output depends only on `grid` and the layout parameters, so
    /// rebuilding the same grid yields the same objects in the same order.
    pub fn build(&self, grid: &Grid) -> Vec<MazeObject> {
        let p = &self.params;
        let n = grid.size();
        let mut objects = Vec::with_capacity(1 + (n + 1) * (n + 1) + 2 * n * (n + 1));

        let size = p.footprint(n);
        objects.push(MazeObject::new(
            ObjectKind::Floor,
            Vec3::new(size, 1.0, size),
            p.origin + Vec3::new(0.0, -1.0, 0.0),
        ));

        let peg_size = Vec3::new(p.wall_width, p.wall_height, p.wall_width);
        for z in 0..=n {
            for x in 0..=n {
                objects.push(MazeObject::new(
                    ObjectKind::Peg,
                    peg_size,
                    p.origin + Vec3::new(p.line(x), 0.0, p.line(z)),
                ));
            }
        }

        // x-aligned walls block movement along z, z-aligned walls along x
        let x_wall = Vec3::new(p.cell_size, p.wall_height, p.wall_width);
        let z_wall = Vec3::new(p.wall_width, p.wall_height, p.cell_size);

        for z in 0..=n {
            for x in 0..=n {
                let cell = Cell::new(x, z);

                let north_closed = z == n || !grid.is_open(cell, Direction::North);
                if x < n && north_closed {
                    objects.push(MazeObject::new(
                        ObjectKind::Wall,
                        x_wall,
                        p.origin + Vec3::new(p.line(x) + p.wall_width, 0.0, p.line(z)),
                    ));
                }

                let west_closed = x == n || !grid.is_open(cell, Direction::West);
                if z < n && west_closed {
                    objects.push(MazeObject::new(
                        ObjectKind::Wall,
                        z_wall,
                        p.origin + Vec3::new(p.line(x), 0.0, p.line(z) + p.wall_width),
                    ));
                }
            }
        }

        objects
    }
}

/// Builds the object list for `grid` after validating `params`.
pub fn build_layout(grid: &Grid, params: LayoutParams) -> Result<Vec<MazeObject>> {
    Ok(MazeLayoutBuilder::new(params)?.build(grid))
}

/// Per-object record in the layout a GPU instance buffer expects.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectInstance {
    pub position: Vec3,
    pub size: Vec3,
    pub kind: u32,
}

/// Instance records for the host renderer, in object order.
pub fn instance_data(objects: &[MazeObject]) -> Vec<ObjectInstance> {
    objects
        .iter()
        .map(|object| ObjectInstance {
            position: object.position,
            size: object.size,
            kind: object.kind.tag(),
        })
        .collect()
}

/// Raw bytes of [`instance_data`], ready for a buffer upload.
pub fn instance_bytes(instances: &[ObjectInstance]) -> &[u8] {
    bytemuck::cast_slice(instances)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::generator::{MazeGenerator, StartCell, generate_maze};
    use crate::rng::session_rng;

    fn count(objects: &[MazeObject], kind: ObjectKind) -> usize {
        objects.iter().filter(|o| o.kind == kind).count()
    }

    fn key(object: &MazeObject) -> (ObjectKind, [u32; 3], [u32; 3]) {
        let bits = |v: Vec3| [v.x().to_bits(), v.y().to_bits(), v.z().to_bits()];
        (object.kind, bits(object.position), bits(object.size))
    }

    #[test]
    fn test_single_cell_is_fully_enclosed() {
        let grid = generate_maze(1, Some(0)).unwrap();
        let objects = build_layout(&grid, LayoutParams::default()).unwrap();

        assert_eq!(count(&objects, ObjectKind::Floor), 1);
        assert_eq!(count(&objects, ObjectKind::Peg), 4);
        assert_eq!(count(&objects, ObjectKind::Wall), 4);
    }

    #[test]
    fn test_wall_count_matches_closed_edges() {
        for n in 1..10 {
            let grid = generate_maze(n, Some(n as u64)).unwrap();
            let objects = build_layout(&grid, LayoutParams::default()).unwrap();

            let edges = 2 * n * (n + 1);
            assert_eq!(count(&objects, ObjectKind::Wall), edges - (n * n - 1));
            assert_eq!(count(&objects, ObjectKind::Peg), (n + 1) * (n + 1));
        }
    }

    #[test]
    fn test_floor_spans_footprint_below_origin() {
        let params = LayoutParams {
            origin: Vec3::new(2.0, 1.0, -3.0),
            ..LayoutParams::default()
        };
        let grid = generate_maze(4, Some(5)).unwrap();
        let objects = build_layout(&grid, params).unwrap();
        let floor = objects.iter().find(|o| o.kind == ObjectKind::Floor).unwrap();

        assert_eq!(floor.size, Vec3::new(14.5, 1.0, 14.5));
        assert_eq!(floor.position, Vec3::new(2.0, 0.0, -3.0));
        assert_eq!(floor.position.y() + floor.size.y(), params.origin.y());
    }

    #[test]
    fn test_pegs_sit_on_grid_lines() {
        let params = LayoutParams::default();
        let grid = generate_maze(3, Some(1)).unwrap();
        let objects = build_layout(&grid, params).unwrap();

        for peg in objects.iter().filter(|o| o.kind == ObjectKind::Peg) {
            let gx = peg.position.x() / params.pitch();
            let gz = peg.position.z() / params.pitch();
            assert_eq!(gx.fract(), 0.0);
            assert_eq!(gz.fract(), 0.0);
            assert!(gx <= 3.0 && gz <= 3.0);
            assert_eq!(peg.size, Vec3::new(0.5, 3.0, 0.5));
        }
    }

    #[test]
    fn test_open_passage_has_no_wall() {
        let generator = MazeGenerator::new(2, StartCell::Origin).unwrap();
        let grid = generator.generate(&mut session_rng(Some(11)));
        let params = LayoutParams::default();
        let objects = build_layout(&grid, params).unwrap();

        // The shared edge between (0,0) and (1,0) is the z-aligned wall on grid line x = 1
        let shared = Vec3::new(params.pitch(), 0.0, params.wall_width);
        let has_wall = objects
            .iter()
            .any(|o| o.kind == ObjectKind::Wall && o.position == shared);
        assert_eq!(has_wall, !grid.is_open(Cell::new(0, 0), Direction::East));
    }

    #[test]
    fn test_layout_is_deterministic() {
        let grid = generate_maze(8, Some(77)).unwrap();
        let builder = MazeLayoutBuilder::new(LayoutParams::default()).unwrap();

        let mut first: Vec<_> = builder.build(&grid).iter().map(key).collect();
        let mut second: Vec<_> = builder.build(&grid).iter().map(key).collect();
        first.sort();
        second.sort();
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_params_are_rejected() {
        let bad = [
            LayoutParams {
                cell_size: 0.0,
                ..LayoutParams::default()
            },
            LayoutParams {
                wall_width: -1.0,
                ..LayoutParams::default()
            },
            LayoutParams {
                wall_height: f32::NAN,
                ..LayoutParams::default()
            },
        ];
        for params in bad {
            assert!(MazeLayoutBuilder::new(params).is_err());
        }
    }

    #[test]
    fn test_instance_bytes_cover_every_object() {
        let grid = generate_maze(2, Some(2)).unwrap();
        let objects = build_layout(&grid, LayoutParams::default()).unwrap();
        let instances = instance_data(&objects);

        assert_eq!(instances.len(), objects.len());
        assert_eq!(instances[0].kind, ObjectKind::Floor.tag());
        assert_eq!(
            instance_bytes(&instances).len(),
            objects.len() * std::mem::size_of::<ObjectInstance>()
        );
    }
}

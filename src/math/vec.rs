use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/*
Vec3 is shared read-only with the host renderer, so it keeps a plain
[f32; 3] layout that can be cast to bytes for instance buffers.
*/

#[repr(transparent)]
#[derive(
    Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable, Serialize, Deserialize,
)]
pub struct Vec3([f32; 3]);

impl Vec3 {
    pub const ZERO: Vec3 = Vec3([0.0, 0.0, 0.0]);
    pub const UP: Vec3 = Vec3([0.0, 1.0, 0.0]);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Vec3([x, y, z])
    }

    pub fn length(&self) -> f32 {
        (self.x().powi(2) + self.y().powi(2) + self.z().powi(2)).sqrt()
    }

    /// Heading vector in the horizontal plane for an angle about +y.
    ///
    /// Angle 0 faces +z; positive angles turn towards +x.
    pub fn from_heading(heading: f32) -> Self {
        Vec3([heading.sin(), 0.0, heading.cos()])
    }

    /// Component-wise absolute difference.
    pub fn abs_diff(&self, other: &Self) -> Self {
        Vec3([
            (self.x() - other.x()).abs(),
            (self.y() - other.y()).abs(),
            (self.z() - other.z()).abs(),
        ])
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|c| c.is_finite())
    }

    pub fn as_array(&self) -> &[f32; 3] {
        &self.0
    }
    pub fn x(&self) -> f32 {
        self.0[0]
    }
    pub fn y(&self) -> f32 {
        self.0[1]
    }
    pub fn z(&self) -> f32 {
        self.0[2]
    }
}

impl std::ops::Index<usize> for Vec3 {
    type Output = f32;

    fn index(&self, axis: usize) -> &f32 {
        &self.0[axis]
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from(values: [f32; 3]) -> Self {
        Vec3(values)
    }
}

impl From<Vec3> for [f32; 3] {
    fn from(vec: Vec3) -> Self {
        vec.0
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self([
            self.x() + other.x(),
            self.y() + other.y(),
            self.z() + other.z(),
        ])
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self([
            self.x() - other.x(),
            self.y() - other.y(),
            self.z() - other.z(),
        ])
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self([self.x() * scalar, self.y() * scalar, self.z() * scalar])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_zero_faces_positive_z() {
        let dir = Vec3::from_heading(0.0);
        assert!((dir.z() - 1.0).abs() < 1e-6);
        assert!(dir.x().abs() < 1e-6);
    }

    #[test]
    fn test_abs_diff_is_symmetric() {
        let a = Vec3::new(1.0, -2.0, 3.0);
        let b = Vec3::new(-1.0, 2.0, 0.5);
        assert_eq!(a.abs_diff(&b), b.abs_diff(&a));
        assert_eq!(a.abs_diff(&b), Vec3::new(2.0, 4.0, 2.5));
    }
}

//! Math types for world-space geometry.
//!
//! The maze lives in a right-handed world where `y` is up and the floor is
//! the `x`/`z` plane. Headings are radians about `+y`, with `0` facing `+z`.

pub mod vec;

pub use vec::Vec3;

#[macro_use]
extern crate log;

pub mod consts;
pub mod error;

pub mod tuple;
pub mod matrix;
pub mod ray;

pub mod color;
pub mod pattern;
pub mod light;

pub mod shape;
pub mod intersect;
pub mod world;
pub mod camera;

pub mod canvas;
pub mod scene;

use consts::EPSILON;

/// Approximate floating point equality, using the crate-wide `EPSILON`.
pub fn feq(left: f64, right: f64) -> bool {
    (left - right).abs() < EPSILON
}

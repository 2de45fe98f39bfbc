// Floating point comparisons, ray bias and near-zero checks
pub const EPSILON: f64 = 0.00001;

// Maximum recursion depth for reflected and refracted rays
pub const RECURSION_DEPTH: usize = 5;

// Common refraction indices
pub const VACUUM_RI: f64 = 1.0;
pub const GLASS_RI: f64 = 1.5;

// Runtime defaults
pub const CANVAS_WIDTH: usize = 320;
pub const CANVAS_HEIGHT: usize = 180;
pub const OUT_FILE: &'static str = "./out.ppm";

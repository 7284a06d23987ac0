pub mod bboxes;
pub mod point;
pub mod rect;
pub mod vector;

/// Geometric precision
const EPS: f64 = 1e-9;

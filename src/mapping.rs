pub mod plan;
pub mod twin;

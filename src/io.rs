//! Seed data I/O.
//!
//! Buildings are stored as JSON in the shape of the spatial model
//! (building → floors → rooms).

pub mod seed;

pub use seed::{demo_building, from_seed_string, read_seed, to_seed_string, write_seed};

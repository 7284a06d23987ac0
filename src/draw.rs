//! Drawing to a Rerun recording stream.

pub mod analytics;
pub mod config;
pub mod rerun;
pub mod twin;

pub use analytics::{draw_dashboard_stats, draw_floor_summaries};
pub use config::DrawConfig;
pub use rerun::start_session;
pub use twin::draw_frame;

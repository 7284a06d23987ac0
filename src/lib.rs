pub mod analytics;
pub mod config;
pub mod draw;
pub mod error;
pub mod geom;
pub mod heatmap;
pub mod io;
pub mod mapping;
pub mod metrics;
pub mod model;
mod name;
pub mod notify;
pub mod session;
mod uid;
pub mod view;

// Prelude
pub use config::DashboardConfig;
pub use error::LookupError;
pub use geom::point::Point;
pub use geom::rect::Rect;
pub use geom::vector::Vector;
pub use heatmap::{Color, HeatmapMode};
pub use metrics::RoomMetrics;
pub use model::building::Building;
pub use model::floor::Floor;
pub use model::room::{Room, RoomType, RoomUpdate};
pub use name::{HasName, SortByName};
pub use session::Session;
pub use uid::UID;
pub use view::{Overlay, View};

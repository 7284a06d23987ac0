pub mod building;
pub mod floor;
pub mod room;

/// RGBA color tuple (red, green, blue, alpha) with values in 0.0..=1.0.
pub type Rgba = (f32, f32, f32, f32);

/// Configuration for Rerun visualization sessions.
///
/// Controls session naming, entity prefixes, and default colors/sizes
/// for the digital twin and analytics drawing functions.
pub struct DrawConfig {
    // Labels
    pub session_name: String,
    pub entity_prefix: String,

    // Digital twin
    pub room_alpha: f32,
    pub slab_color: Rgba,
    pub selected_slab_color: Rgba,
    pub wall_color: Rgba,
    pub wall_radius: f32,
    pub highlight_color: Rgba,
    pub highlight_radius: f32,
    pub label_radius: f32,
    pub sensor_color: Rgba,
    pub sensor_radius: f32,
    pub camera_color: Rgba,

    // Analytics
    pub occupancy_series_color: [u8; 3],
    pub energy_series_color: [u8; 3],
    pub series_width: f32,
}

impl DrawConfig {
    pub fn new() -> Self {
        Self {
            session_name: "building-twin".to_string(),
            entity_prefix: "Twin".to_string(),

            room_alpha: 0.85,
            slab_color: (0.8, 0.8, 0.8, 0.25),
            selected_slab_color: (0.4, 0.6, 1.0, 0.4),
            wall_color: (0.1, 0.1, 0.1, 0.6),
            wall_radius: 0.02,
            highlight_color: (1.0, 1.0, 1.0, 1.0),
            highlight_radius: 0.06,
            label_radius: 0.05,
            sensor_color: (0.0, 1.0, 0.4, 1.0),
            sensor_radius: 0.12,
            camera_color: (1.0, 0.8, 0.0, 1.0),

            occupancy_series_color: [80, 160, 255],
            energy_series_color: [255, 140, 40],
            series_width: 1.5,
        }
    }
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self::new()
    }
}

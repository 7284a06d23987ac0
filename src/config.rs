//! Dashboard configuration: layout constants, zoom bounds, heatmap anchors
//! and timing. Every field has a default; a TOML document only needs to name
//! the values it overrides.

use crate::heatmap::{Color, HeatmapMode};
use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::path::Path;

fn require_finite(name: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(anyhow!("Configuration value {} must be finite, got {}", name, value))
    }
}

/// Constants mapping floor units into digital-twin scene units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TwinConfig {
    /// Floor units per scene unit.
    pub scale_divisor: f64,
    /// Smallest box edge in scene units, so zero-area rooms stay visible.
    pub min_size: f64,
    /// Room box height in scene units.
    pub room_height: f64,
    /// Vertical distance between the bases of consecutive floors.
    pub floor_spacing: f64,
    pub slab_thickness: f64,
    /// Camera distance as a multiple of the scene bounding radius.
    pub camera_distance_factor: f64,
    /// Glow pulse angular speed (rad/s) when animation is on.
    pub pulse_speed: f64,
    /// Camera orbit speed (rad/s) when animation is on.
    pub orbit_speed: f64,
}

impl TwinConfig {
    pub fn new() -> Self {
        Self {
            scale_divisor: 10.0,
            min_size: 0.5,
            room_height: 2.5,
            floor_spacing: 4.0,
            slab_thickness: 0.2,
            camera_distance_factor: 1.6,
            pulse_speed: 2.0,
            orbit_speed: 0.1,
        }
    }
}

impl TwinConfig {
    pub fn validate(&self) -> Result<()> {
        require_finite("twin.scale_divisor", self.scale_divisor)?;
        require_finite("twin.min_size", self.min_size)?;
        require_finite("twin.room_height", self.room_height)?;
        require_finite("twin.floor_spacing", self.floor_spacing)?;
        require_finite("twin.slab_thickness", self.slab_thickness)?;
        require_finite("twin.camera_distance_factor", self.camera_distance_factor)?;
        require_finite("twin.pulse_speed", self.pulse_speed)?;
        require_finite("twin.orbit_speed", self.orbit_speed)?;
        if self.scale_divisor <= 0.0 {
            return Err(anyhow!(
                "twin.scale_divisor must be positive, got {}",
                self.scale_divisor
            ));
        }
        if self.min_size < 0.0 {
            return Err(anyhow!("twin.min_size must not be negative, got {}", self.min_size));
        }
        Ok(())
    }
}

impl Default for TwinConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Floor-plan viewport behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanConfig {
    pub zoom_min: f64,
    pub zoom_max: f64,
    /// Zoom change per unit of wheel delta (positive delta zooms out).
    pub wheel_sensitivity: f64,
}

impl PlanConfig {
    pub fn new() -> Self {
        Self {
            zoom_min: 0.5,
            zoom_max: 2.0,
            wheel_sensitivity: 0.001,
        }
    }
}

impl PlanConfig {
    pub fn validate(&self) -> Result<()> {
        require_finite("plan.zoom_min", self.zoom_min)?;
        require_finite("plan.zoom_max", self.zoom_max)?;
        require_finite("plan.wheel_sensitivity", self.wheel_sensitivity)?;
        if self.zoom_min <= 0.0 || self.zoom_min > self.zoom_max {
            return Err(anyhow!(
                "plan zoom bounds must satisfy 0 < zoom_min <= zoom_max, got {}..{}",
                self.zoom_min,
                self.zoom_max
            ));
        }
        Ok(())
    }
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalization range and color pair of one heatmap mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchors {
    pub min: f64,
    pub max: f64,
    pub low: Color,
    pub high: Color,
}

impl Anchors {
    pub fn validate(&self, mode: HeatmapMode) -> Result<()> {
        require_finite(&format!("heatmap.{}.min", mode), self.min)?;
        require_finite(&format!("heatmap.{}.max", mode), self.max)?;
        if self.min >= self.max {
            return Err(anyhow!(
                "heatmap.{} anchors must satisfy min < max, got {}..{}",
                mode,
                self.min,
                self.max
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapConfig {
    pub temperature: Anchors,
    pub occupancy: Anchors,
    pub air_quality: Anchors,
    pub energy: Anchors,
}

impl HeatmapConfig {
    pub fn new() -> Self {
        Self {
            // °C
            temperature: Anchors {
                min: 18.0,
                max: 30.0,
                low: Color::rgb(0.23, 0.51, 0.96),
                high: Color::rgb(0.94, 0.27, 0.27),
            },
            // occupancy / capacity
            occupancy: Anchors {
                min: 0.0,
                max: 1.0,
                low: Color::rgb(0.13, 0.77, 0.37),
                high: Color::rgb(0.94, 0.27, 0.27),
            },
            // ppm CO2
            air_quality: Anchors {
                min: 400.0,
                max: 1000.0,
                low: Color::rgb(0.13, 0.77, 0.37),
                high: Color::rgb(0.96, 0.62, 0.04),
            },
            // kW
            energy: Anchors {
                min: 0.0,
                max: 10.0,
                low: Color::rgb(0.08, 0.72, 0.65),
                high: Color::rgb(0.98, 0.45, 0.09),
            },
        }
    }

    pub fn anchors(&self, mode: HeatmapMode) -> &Anchors {
        match mode {
            HeatmapMode::Temperature => &self.temperature,
            HeatmapMode::Occupancy => &self.occupancy,
            HeatmapMode::AirQuality => &self.air_quality,
            HeatmapMode::Energy => &self.energy,
        }
    }
}

impl HeatmapConfig {
    pub fn validate(&self) -> Result<()> {
        for mode in HeatmapMode::ALL {
            self.anchors(mode).validate(mode)?;
        }
        Ok(())
    }
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub twin: TwinConfig,
    pub plan: PlanConfig,
    pub heatmap: HeatmapConfig,
    /// Simulated loading delay before the first digital-twin frame, in seconds.
    pub loading_delay_secs: f64,
}

impl DashboardConfig {
    pub fn new() -> Self {
        Self {
            twin: TwinConfig::new(),
            plan: PlanConfig::new(),
            heatmap: HeatmapConfig::new(),
            loading_delay_secs: 1.5,
        }
    }

    /// Checks bounds and ranges that the layout and the floor plan rely on.
    pub fn validate(&self) -> Result<()> {
        self.twin.validate()?;
        self.plan.validate()?;
        self.heatmap.validate()?;
        require_finite("loading_delay_secs", self.loading_delay_secs)?;
        Ok(())
    }

    /// Parses a (possibly partial) TOML document over the defaults and validates it.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(text).context("Failed to parse dashboard configuration")?;
        config
            .validate()
            .context("Invalid dashboard configuration")?;
        Ok(config)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        Self::from_toml_str(&text)
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::new();
        assert_eq!(config.twin.scale_divisor, 10.0);
        assert_eq!(config.twin.min_size, 0.5);
        assert_eq!(config.plan.zoom_min, 0.5);
        assert_eq!(config.plan.zoom_max, 2.0);
        assert_eq!(config.heatmap.temperature.min, 18.0);
        assert_eq!(config.loading_delay_secs, 1.5);
    }

    #[test]
    fn test_default_trait() {
        assert_eq!(DashboardConfig::default(), DashboardConfig::new());
    }

    #[test]
    fn test_partial_toml_overrides() -> Result<()> {
        let text = r#"
            loading_delay_secs = 0.5

            [twin]
            floor_spacing = 6.0

            [heatmap.energy]
            min = 0.0
            max = 20.0
            low = { r = 0.0, g = 0.0, b = 1.0 }
            high = { r = 1.0, g = 0.0, b = 0.0 }
        "#;
        let config = DashboardConfig::from_toml_str(text)?;
        assert_eq!(config.loading_delay_secs, 0.5);
        assert_eq!(config.twin.floor_spacing, 6.0);
        assert_eq!(config.twin.scale_divisor, 10.0);
        assert_eq!(config.heatmap.energy.max, 20.0);
        assert_eq!(config.heatmap.temperature, HeatmapConfig::new().temperature);
        assert_eq!(config.plan, PlanConfig::new());
        Ok(())
    }

    #[test]
    fn test_empty_toml_is_default() -> Result<()> {
        assert_eq!(DashboardConfig::from_toml_str("")?, DashboardConfig::new());
        Ok(())
    }

    #[test]
    fn test_invalid_toml() {
        assert!(DashboardConfig::from_toml_str("twin = 3").is_err());
    }

    #[test]
    fn test_defaults_are_valid() -> Result<()> {
        DashboardConfig::new().validate()
    }

    #[test]
    fn test_rejects_inverted_zoom_bounds() {
        let text = "[plan]\nzoom_min = 3.0\nzoom_max = 2.0";
        assert!(DashboardConfig::from_toml_str(text).is_err());
        assert!(DashboardConfig::from_toml_str("[plan]\nzoom_min = nan").is_err());
    }

    #[test]
    fn test_rejects_bad_twin_and_anchors() {
        assert!(DashboardConfig::from_toml_str("[twin]\nscale_divisor = 0.0").is_err());
        assert!(DashboardConfig::from_toml_str("[twin]\nmin_size = -1.0").is_err());
        let text = r#"
            [heatmap.temperature]
            min = 30.0
            max = 18.0
            low = { r = 0.0, g = 0.0, b = 1.0 }
            high = { r = 1.0, g = 0.0, b = 0.0 }
        "#;
        assert!(DashboardConfig::from_toml_str(text).is_err());
    }

    #[test]
    fn test_toml_file() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("dashboard.toml");
        std::fs::write(&path, "loading_delay_secs = 0.0\n\n[plan]\nzoom_max = 3.0\n")?;

        let config = DashboardConfig::from_toml_file(&path)?;
        assert_eq!(config.loading_delay_secs, 0.0);
        assert_eq!(config.plan.zoom_max, 3.0);
        assert_eq!(config.twin, TwinConfig::new());

        assert!(DashboardConfig::from_toml_file(&dir.path().join("missing.toml")).is_err());
        Ok(())
    }

    #[test]
    fn test_anchors_by_mode() {
        let heatmap = HeatmapConfig::new();
        assert_eq!(heatmap.anchors(HeatmapMode::AirQuality).max, 1000.0);
        assert_eq!(heatmap.anchors(HeatmapMode::Occupancy).max, 1.0);
    }
}

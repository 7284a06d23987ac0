//! Render state handed to the rendering collaborator.
//!
//! Both builders are pure: the same building, view state and elapsed time
//! always produce the same output.

use crate::UID;
use crate::config::HeatmapConfig;
use crate::geom::point::Point;
use crate::geom::rect::Rect;
use crate::heatmap::{self, Color, HeatmapMode};
use crate::mapping::plan::PlanView;
use crate::mapping::twin::{TwinLayout, WorldBox};
use crate::metrics;
use crate::model::building::Building;
use crate::model::floor::Floor;
use crate::view::{Overlays, ViewState};

/// Glow of the selected room regardless of its metric.
pub const SELECTED_GLOW: f64 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct RoomVisual {
    pub floor_id: UID,
    pub room_id: UID,
    pub name: String,
    pub bounds: WorldBox,
    pub color: Color,
    /// Heatmap intensity in `[0, 1]`.
    pub intensity: f64,
    /// Emissive strength for this frame in `[0, 1]`.
    pub glow: f64,
    pub selected: bool,
    pub hovered: bool,
    pub label: Option<String>,
    /// Ceiling-mounted sensor position, when the sensors overlay is on.
    pub sensor: Option<Point>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SlabVisual {
    pub floor_id: UID,
    pub name: String,
    pub bounds: WorldBox,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub elapsed: f64,
    pub mode: HeatmapMode,
    pub overlays: Overlays,
    pub camera_eye: Point,
    pub camera_target: Point,
    pub slabs: Vec<SlabVisual>,
    pub rooms: Vec<RoomVisual>,
}

/// Floor-plan tile of one room, in screen space.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanTile {
    pub room_id: UID,
    pub name: String,
    pub screen: Rect,
    pub color: Color,
    pub intensity: f64,
    pub performance_score: u32,
    pub selected: bool,
    pub hovered: bool,
    pub label: Option<String>,
}

/// Modulates `intensity` by a slow sine, staying within `[intensity / 2, intensity]`.
pub fn pulse(intensity: f64, elapsed: f64, speed: f64) -> f64 {
    let phase = elapsed * speed;
    if !phase.is_finite() {
        return intensity;
    }
    intensity * (0.75 + 0.25 * phase.sin())
}

/// Builds the digital-twin render state for one frame tick.
pub fn twin_frame(
    building: &Building,
    view: &ViewState,
    layout: &TwinLayout,
    heatmap_config: &HeatmapConfig,
    elapsed: f64,
) -> Frame {
    let elapsed = if elapsed.is_finite() { elapsed } else { 0.0 };
    let overlays = view.overlays;
    let mode = view.heatmap_mode;
    let camera = layout.camera(building);
    let camera_eye = if overlays.animation {
        camera.orbit(elapsed * layout.config.orbit_speed)
    } else {
        camera.eye
    };

    let mut slabs = Vec::new();
    let mut rooms = Vec::new();
    for (index, floor) in building.floors_by_level().into_iter().enumerate() {
        let floor_selected = view.selected_floor() == Some(&floor.id);
        slabs.push(SlabVisual {
            floor_id: floor.id.clone(),
            name: floor.name.clone(),
            bounds: layout.slab_box(floor, index),
            selected: floor_selected,
        });
        for room in floor.rooms() {
            let sample = heatmap::sample_room(heatmap_config, mode, room);
            let bounds = layout.room_box(floor, index, room);
            let selected = floor_selected && view.is_room_selected(&room.id);
            let glow = if selected {
                SELECTED_GLOW
            } else if overlays.animation {
                pulse(sample.intensity, elapsed, layout.config.pulse_speed)
            } else {
                sample.intensity
            };
            let label = overlays
                .labels
                .then(|| format!("{}\n{}", room.name, mode.format_value(sample.value)));
            let sensor = overlays
                .sensors
                .then(|| Point::new(bounds.center.x, bounds.max().y, bounds.center.z));
            rooms.push(RoomVisual {
                floor_id: floor.id.clone(),
                room_id: room.id.clone(),
                name: room.name.clone(),
                bounds,
                color: sample.color,
                intensity: sample.intensity,
                glow,
                selected,
                hovered: view.is_room_hovered(&floor.id, &room.id),
                label,
                sensor,
            });
        }
    }

    Frame {
        elapsed,
        mode,
        overlays,
        camera_eye,
        camera_target: camera.target,
        slabs,
        rooms,
    }
}

/// Builds the floor-plan tiles of one floor.
pub fn plan_tiles(
    floor: &Floor,
    view: &ViewState,
    plan: &PlanView,
    heatmap_config: &HeatmapConfig,
) -> Vec<PlanTile> {
    let mode = view.heatmap_mode;
    let floor_selected = view.selected_floor() == Some(&floor.id);
    floor
        .rooms()
        .iter()
        .map(|room| {
            let sample = heatmap::sample_room(heatmap_config, mode, room);
            PlanTile {
                room_id: room.id.clone(),
                name: room.name.clone(),
                screen: plan.project(&room.bounds),
                color: sample.color,
                intensity: sample.intensity,
                performance_score: metrics::performance_score(room),
                selected: floor_selected && view.is_room_selected(&room.id),
                hovered: view.is_room_hovered(&floor.id, &room.id),
                label: view.overlays.labels.then(|| room.name.clone()),
            }
        })
        .collect()
}

//! 3D digital-twin layout (y up).
//!
//! Floors stack bottom to top in level order, each in a fixed vertical slot.
//! Floor-local rectangles are scaled into scene units and shifted so that each
//! floor footprint is centered on the origin: floor-local x maps to world x,
//! floor-local y maps to world z.

use crate::config::TwinConfig;
use crate::geom::bboxes::bounding_box;
use crate::geom::point::Point;
use crate::geom::vector::Vector;
use crate::model::building::Building;
use crate::model::floor::Floor;
use crate::model::room::Room;
use crate::UID;

/// Axis-aligned box in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBox {
    pub center: Point,
    /// Full extents along x (width), y (height) and z (depth).
    pub size: Vector,
}

impl WorldBox {
    pub fn min(&self) -> Point {
        self.center + self.size * -0.5
    }

    pub fn max(&self) -> Point {
        self.center + self.size * 0.5
    }

    /// Corners ordered bottom face then top face, counter-clockwise seen from above.
    pub fn corners(&self) -> [Point; 8] {
        let lo = self.min();
        let hi = self.max();
        [
            Point::new(lo.x, lo.y, lo.z),
            Point::new(hi.x, lo.y, lo.z),
            Point::new(hi.x, lo.y, hi.z),
            Point::new(lo.x, lo.y, hi.z),
            Point::new(lo.x, hi.y, lo.z),
            Point::new(hi.x, hi.y, lo.z),
            Point::new(hi.x, hi.y, hi.z),
            Point::new(lo.x, hi.y, hi.z),
        ]
    }
}

/// World-space layout of one floor.
#[derive(Debug, Clone, PartialEq)]
pub struct FloorLayout {
    pub floor_id: UID,
    pub stacking_index: usize,
    pub slab: WorldBox,
    pub rooms: Vec<(UID, WorldBox)>,
}

/// Camera position and target framing the whole building.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFrame {
    pub target: Point,
    pub eye: Point,
    /// Bounding radius of the framed scene.
    pub radius: f64,
}

impl CameraFrame {
    /// Eye position after orbiting `yaw` radians around the vertical axis through the target.
    pub fn orbit(&self, yaw: f64) -> Point {
        let off = self.eye - self.target;
        let (s, c) = yaw.sin_cos();
        self.target + Vector::new(off.dx * c + off.dz * s, off.dy, -off.dx * s + off.dz * c)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TwinLayout {
    pub config: TwinConfig,
}

impl TwinLayout {
    pub fn new(config: TwinConfig) -> Self {
        Self { config }
    }

    /// Converts a floor-unit length into scene units.
    pub fn scale(&self, length: f64) -> f64 {
        length / self.config.scale_divisor
    }

    /// Scaled length with the minimum size applied.
    fn scale_clamped(&self, length: f64) -> f64 {
        self.scale(length).max(self.config.min_size)
    }

    /// Elevation of the base of the floor at `stacking_index`.
    pub fn floor_base(&self, stacking_index: usize) -> f64 {
        stacking_index as f64 * self.config.floor_spacing
    }

    pub fn slab_box(&self, floor: &Floor, stacking_index: usize) -> WorldBox {
        let t = self.config.slab_thickness;
        WorldBox {
            center: Point::new(0., self.floor_base(stacking_index) + t * 0.5, 0.),
            size: Vector::new(
                self.scale_clamped(floor.width),
                t,
                self.scale_clamped(floor.height),
            ),
        }
    }

    pub fn room_box(&self, floor: &Floor, stacking_index: usize, room: &Room) -> WorldBox {
        let (cx, cy) = room.bounds.center();
        let h = self.config.room_height;
        let base = self.floor_base(stacking_index) + self.config.slab_thickness;
        WorldBox {
            center: Point::new(
                self.scale(cx - floor.width * 0.5),
                base + h * 0.5,
                self.scale(cy - floor.height * 0.5),
            ),
            size: Vector::new(
                self.scale_clamped(room.bounds.width),
                h,
                self.scale_clamped(room.bounds.height),
            ),
        }
    }

    pub fn floor_layout(&self, floor: &Floor, stacking_index: usize) -> FloorLayout {
        FloorLayout {
            floor_id: floor.id.clone(),
            stacking_index,
            slab: self.slab_box(floor, stacking_index),
            rooms: floor
                .rooms()
                .iter()
                .map(|r| (r.id.clone(), self.room_box(floor, stacking_index, r)))
                .collect(),
        }
    }

    /// Layouts of all floors, bottom to top.
    pub fn building_layout(&self, building: &Building) -> Vec<FloorLayout> {
        building
            .floors_by_level()
            .into_iter()
            .enumerate()
            .map(|(i, f)| self.floor_layout(f, i))
            .collect()
    }

    /// Frames the building: target at the scene center, eye on the diagonal.
    pub fn camera(&self, building: &Building) -> CameraFrame {
        let layouts = self.building_layout(building);
        let corners: Vec<Point> = layouts
            .iter()
            .flat_map(|l| {
                std::iter::once(l.slab)
                    .chain(l.rooms.iter().map(|(_, b)| *b))
                    .flat_map(|b| b.corners())
            })
            .collect();
        let (target, radius) = match bounding_box(&corners) {
            Some((pmin, pmax)) => (pmin.midpoint(&pmax), ((pmax - pmin).length() * 0.5).max(1.0)),
            None => (Point::origin(), 1.0),
        };
        let dir = Vector::new(1.0, 0.8, 1.0)
            .normalize()
            .unwrap_or(Vector::new(0., 0., 1.));
        CameraFrame {
            target,
            eye: target + dir * (radius * self.config.camera_distance_factor),
            radius,
        }
    }
}

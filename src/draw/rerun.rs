use crate::geom::point::Point;
use crate::mapping::twin::WorldBox;
use anyhow::Result;
use rerun as rr;

use super::config::{DrawConfig, Rgba};

/// Triangles of a [`WorldBox`] over the vertex order of `WorldBox::corners()`.
pub const BOX_TRIANGLES: [[u32; 3]; 12] = [
    // bottom
    [0, 2, 1],
    [0, 3, 2],
    // top
    [4, 5, 6],
    [4, 6, 7],
    // sides
    [0, 1, 5],
    [0, 5, 4],
    [1, 2, 6],
    [1, 6, 5],
    [2, 3, 7],
    [2, 7, 6],
    [3, 0, 4],
    [3, 4, 7],
];

/// Converts Point to native format of Rerun
impl From<Point> for rr::Vec3D {
    fn from(val: Point) -> Self {
        rr::Vec3D([val.x as f32, val.y as f32, val.z as f32])
    }
}

pub fn color(rgba: Rgba) -> rr::Color {
    let (r, g, b, a) = rgba;
    rr::Color(rr::Rgba32::from_linear_unmultiplied_rgba_f32(r, g, b, a))
}

pub fn start_session(config: &DrawConfig) -> Result<rr::RecordingStream> {
    // Spawns a viewer (or connects to a running one) on the default address
    let session = rr::RecordingStreamBuilder::new(config.session_name.as_str()).spawn()?;

    Ok(session)
}

/// Logs a box as a solid mesh.
pub fn draw_box(
    session: &rr::RecordingStream,
    name: &str,
    bounds: &WorldBox,
    rgba: Rgba,
) -> Result<()> {
    let vertices: Vec<Point> = bounds.corners().to_vec();
    let triangles: Vec<rr::TriangleIndices> = BOX_TRIANGLES
        .iter()
        .map(|t| rr::TriangleIndices(rr::datatypes::UVec3D(*t)))
        .collect();
    let (r, g, b, a) = rgba;

    session.log(
        name,
        &rr::Mesh3D::new(vertices)
            .with_triangle_indices(triangles)
            .with_albedo_factor(rr::Rgba32::from_linear_unmultiplied_rgba_f32(r, g, b, a)),
    )?;

    Ok(())
}

/// The twelve edges of a box as two-point line strips.
pub fn box_edges(bounds: &WorldBox) -> Vec<Vec<rr::Vec3D>> {
    let c = bounds.corners();
    let pairs = [
        (0, 1),
        (1, 2),
        (2, 3),
        (3, 0),
        (4, 5),
        (5, 6),
        (6, 7),
        (7, 4),
        (0, 4),
        (1, 5),
        (2, 6),
        (3, 7),
    ];
    pairs
        .iter()
        .map(|&(a, b)| vec![rr::Vec3D::from(c[a]), rr::Vec3D::from(c[b])])
        .collect()
}

use anyhow::Result;
use rerun as rr;

use crate::geom::point::Point;
use crate::heatmap::Color;
use crate::session::frame::Frame;

use super::config::DrawConfig;
use super::rerun::{box_edges, color, draw_box};

/// How far the glow pushes a room color towards white.
const GLOW_WHITEN: f64 = 0.3;

/// Draws one digital-twin frame.
///
/// Rooms are colored by the frame's heatmap and brightened by their glow.
/// Walls, labels and sensors follow the frame's overlays; the selected and
/// hovered rooms always get highlighted edges.
pub fn draw_frame(
    session: &rr::RecordingStream,
    frame: &Frame,
    frame_index: i64,
    config: &DrawConfig,
) -> Result<()> {
    let prefix = config.entity_prefix.as_str();
    session.set_time_sequence("frame", frame_index);

    for slab in frame.slabs.iter() {
        let rgba = if slab.selected {
            config.selected_slab_color
        } else {
            config.slab_color
        };
        let name = format!("{}/{}/slab", prefix, slab.floor_id);
        draw_box(session, &name, &slab.bounds, rgba)?;
    }

    let white = Color::rgb(1.0, 1.0, 1.0);
    for room in frame.rooms.iter() {
        let path = format!("{}/{}/{}", prefix, room.floor_id, room.room_id);

        let fill = room.color.lerp(&white, room.glow * GLOW_WHITEN);
        draw_box(
            session,
            &format!("{}/box", path),
            &room.bounds,
            fill.with_alpha(config.room_alpha),
        )?;

        let highlighted = room.selected || room.hovered;
        if frame.overlays.walls || highlighted {
            let (rgba, radius) = if highlighted {
                (config.highlight_color, config.highlight_radius)
            } else {
                (config.wall_color, config.wall_radius)
            };
            let edges = box_edges(&room.bounds);
            let n = edges.len();
            session.log(
                format!("{}/walls", path),
                &rr::LineStrips3D::new(edges)
                    .with_radii(vec![radius; n])
                    .with_colors(vec![color(rgba); n]),
            )?;
        } else {
            session.log(format!("{}/walls", path), &rr::Clear::flat())?;
        }

        match &room.label {
            Some(label) => {
                let top = Point::new(
                    room.bounds.center.x,
                    room.bounds.max().y,
                    room.bounds.center.z,
                );
                session.log(
                    format!("{}/label", path),
                    &rr::Points3D::new(vec![top])
                        .with_radii(vec![config.label_radius])
                        .with_colors(vec![color(fill.with_alpha(1.0))])
                        .with_labels(vec![label.clone()]),
                )?;
            }
            None => session.log(format!("{}/label", path), &rr::Clear::flat())?,
        }
    }

    let sensors: Vec<Point> = frame.rooms.iter().filter_map(|r| r.sensor).collect();
    let n = sensors.len();
    session.log(
        format!("{}/sensors", prefix),
        &rr::Points3D::new(sensors)
            .with_radii(vec![config.sensor_radius; n])
            .with_colors(vec![color(config.sensor_color); n]),
    )?;

    session.log(
        format!("{}/camera", prefix),
        &rr::Points3D::new(vec![frame.camera_eye, frame.camera_target])
            .with_radii(vec![config.label_radius; 2])
            .with_colors(vec![color(config.camera_color); 2]),
    )?;

    Ok(())
}

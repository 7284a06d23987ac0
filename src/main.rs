use anyhow::Result;
use building_twin::analytics::{dashboard_stats, floor_summaries, top_performers};
use building_twin::draw::{self, DrawConfig};
use building_twin::io::demo_building;
use building_twin::{DashboardConfig, HeatmapMode, Overlay, Session};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Simulated frame rate of the demo animation.
const FPS: f64 = 10.0;
const FRAMES: i64 = 60;

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let building = demo_building()?;
    let config = DashboardConfig::new();
    let mut session = Session::with_log_notifier(building, config);

    let stats = dashboard_stats(session.building());
    info!(
        rooms = stats.rooms,
        occupancy_rate = stats.occupancy_rate,
        energy_kw = stats.total_energy,
        over_capacity = stats.over_capacity.len(),
        "Building overview"
    );
    for (room, score) in top_performers(session.building(), 3) {
        info!(room = %room.name, floor = %room.floor_name, score, "Top performer");
    }

    let draw_config = DrawConfig::new();
    let rec = draw::start_session(&draw_config)?;
    draw::draw_dashboard_stats(&rec, &stats)?;
    draw::draw_floor_summaries(&rec, &floor_summaries(session.building()), &draw_config)?;

    // Wait out the loading gate, then animate the twin through every heatmap mode
    let dt = 1.0 / FPS;
    while !session.loading().is_ready() {
        session.tick_loading(dt);
    }
    session.toggle(Overlay::Sensors);
    for i in 0..FRAMES {
        let mode = HeatmapMode::ALL[(i as usize * HeatmapMode::ALL.len()) / FRAMES as usize];
        if session.view().heatmap_mode != mode {
            session.set_heatmap_mode(mode);
        }
        if let Some(frame) = session.frame(i as f64 * dt) {
            draw::draw_frame(&rec, &frame, i, &draw_config)?;
        }
    }

    Ok(())
}

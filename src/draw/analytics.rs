use anyhow::Result;
use rerun as rr;

use crate::analytics::{DashboardStats, FloorSummary};

use super::config::DrawConfig;

/// Draws per-floor occupancy and energy as series over the floor level.
///
/// Logged under top-level paths so that Rerun puts them in a time series view
/// separate from the 3D twin.
pub fn draw_floor_summaries(
    session: &rr::RecordingStream,
    summaries: &[FloorSummary],
    config: &DrawConfig,
) -> Result<()> {
    let occupancy_path = "analytics/occupancy_rate";
    let energy_path = "analytics/energy";

    // Configure series appearance (static, logged once)
    session.log_static(
        occupancy_path,
        &rr::SeriesLines::new()
            .with_colors([config.occupancy_series_color])
            .with_names(["Occupancy (%)"])
            .with_widths([config.series_width]),
    )?;
    session.log_static(
        energy_path,
        &rr::SeriesLines::new()
            .with_colors([config.energy_series_color])
            .with_names(["Energy (kW)"])
            .with_widths([config.series_width]),
    )?;

    for summary in summaries.iter() {
        session.set_time_sequence("level", summary.level as i64);
        session.log(
            occupancy_path,
            &rr::Scalars::single(summary.occupancy_rate * 100.0),
        )?;
        session.log(energy_path, &rr::Scalars::single(summary.total_energy))?;
    }

    Ok(())
}

/// Renders the dashboard cards as a markdown document.
pub fn stats_markdown(stats: &DashboardStats) -> String {
    let mut text = String::new();
    text.push_str("# Building overview\n\n");
    text.push_str(&format!("- Floors: {}\n", stats.floors));
    text.push_str(&format!("- Rooms: {}\n", stats.rooms));
    text.push_str(&format!(
        "- Occupancy: {} / {} ({:.0}%)\n",
        stats.occupancy,
        stats.capacity,
        stats.occupancy_rate * 100.0
    ));
    text.push_str(&format!(
        "- Mean temperature: {:.1} °C\n",
        stats.mean_temperature
    ));
    text.push_str(&format!("- Energy: {:.1} kW\n", stats.total_energy));
    if !stats.over_capacity.is_empty() {
        let ids: Vec<&str> = stats.over_capacity.iter().map(|id| id.as_str()).collect();
        text.push_str(&format!("- Over capacity: {}\n", ids.join(", ")));
    }
    text.push_str(&format!(
        "- Maintenance notes: {}\n",
        stats.maintenance_notes
    ));
    text
}

pub fn draw_dashboard_stats(session: &rr::RecordingStream, stats: &DashboardStats) -> Result<()> {
    session.log_static(
        "analytics/overview",
        &rr::TextDocument::new(stats_markdown(stats)),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UID;

    fn buffered_session() -> rr::RecordingStream {
        rr::RecordingStreamBuilder::new("test").buffered().unwrap()
    }

    fn stats() -> DashboardStats {
        DashboardStats {
            floors: 2,
            rooms: 5,
            capacity: 40,
            occupancy: 10,
            occupancy_rate: 0.25,
            mean_temperature: 22.44,
            total_energy: 12.0,
            over_capacity: vec![UID::from("r3")],
            maintenance_notes: 1,
        }
    }

    #[test]
    fn test_stats_markdown() {
        let text = stats_markdown(&stats());
        assert!(text.contains("- Occupancy: 10 / 40 (25%)"));
        assert!(text.contains("- Mean temperature: 22.4 °C"));
        assert!(text.contains("- Over capacity: r3"));
    }

    #[test]
    fn test_draw_analytics_is_ok() {
        let session = buffered_session();
        let summaries = vec![FloorSummary {
            floor_id: UID::from("f0"),
            name: "Ground".to_string(),
            level: 0,
            rooms: 3,
            capacity: 20,
            occupancy: 5,
            occupancy_rate: 0.25,
            mean_temperature: 22.0,
            mean_air_quality: 550.0,
            total_energy: 6.0,
        }];
        draw_floor_summaries(&session, &summaries, &DrawConfig::default()).unwrap();
        draw_dashboard_stats(&session, &stats()).unwrap();
    }
}

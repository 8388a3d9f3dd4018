//! Plain-text output for each subcommand.

use std::io::{self, Write};

use agri_core::YieldEstimate;
use agri_core::analytics::{Dashboard, driest_zone, latest_moisture, weekly_rainfall};
use agri_core::assistant::{ChatMessage, Role};
use agri_core::detection::DetectionResult;
use chrono::Local;
use clap::ValueEnum;

use crate::utils::format_kg;

/// Dashboard sections that can be shown on their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Panel {
    Yield,
    Weather,
    Health,
    Moisture,
}

fn write_list<W: Write>(
    out: &mut W,
    title: &str,
    items: &[String],
) -> io::Result<()> {
    writeln!(out, "{title}")?;
    for item in items {
        writeln!(out, "  - {item}")?;
    }
    Ok(())
}

pub fn write_estimate<W: Write>(
    out: &mut W,
    estimate: &YieldEstimate,
) -> io::Result<()> {
    writeln!(out, "Predicted Yield")?;
    writeln!(out, "  {} kg", format_kg(estimate.predicted_yield_kg))?;
    writeln!(
        out,
        "  Prediction Confidence: {:.1}%",
        estimate.confidence_percent
    )?;

    if !estimate.risk_factors.is_empty() {
        writeln!(out)?;
        write_list(out, "Risk Factors", &estimate.risk_factors)?;
    }

    writeln!(out)?;
    write_list(out, "Optimization Recommendations", &estimate.recommendations)
}

pub fn write_detection<W: Write>(
    out: &mut W,
    result: &DetectionResult,
) -> io::Result<()> {
    writeln!(out, "{}", result.summary())?;
    writeln!(
        out,
        "  {:.1}% Confidence, {} severity",
        result.confidence,
        result.severity.as_str()
    )?;
    writeln!(out)?;
    write_list(out, "Treatment Recommendations", &result.treatment)?;
    writeln!(out)?;
    write_list(out, "Prevention Tips", &result.prevention)
}

pub fn write_chat_message<W: Write>(
    out: &mut W,
    message: &ChatMessage,
) -> io::Result<()> {
    let speaker = match message.role {
        Role::User => "You",
        Role::Assistant => "Assistant",
    };
    writeln!(
        out,
        "[{}] {speaker}: {}",
        message.timestamp.with_timezone(&Local).format("%H:%M"),
        message.content
    )
}

/// Writes the KPI cards followed by one panel, or all of them.
pub fn write_dashboard<W: Write>(
    out: &mut W,
    dashboard: &Dashboard,
    panel: Option<Panel>,
) -> io::Result<()> {
    for kpi in &dashboard.kpis {
        writeln!(out, "{:<20} {:>8}  {}", kpi.title, kpi.value, kpi.caption)?;
    }

    let panels = match panel {
        Some(panel) => vec![panel],
        None => vec![Panel::Yield, Panel::Weather, Panel::Health, Panel::Moisture],
    };
    for panel in panels {
        writeln!(out)?;
        match panel {
            Panel::Yield => write_yield_panel(out, dashboard)?,
            Panel::Weather => write_weather_panel(out, dashboard)?,
            Panel::Health => write_health_panel(out, dashboard)?,
            Panel::Moisture => write_moisture_panel(out, dashboard)?,
        }
    }
    Ok(())
}

fn write_yield_panel<W: Write>(
    out: &mut W,
    dashboard: &Dashboard,
) -> io::Result<()> {
    writeln!(out, "Yield Prediction Analysis (kg)")?;
    writeln!(
        out,
        "  {:<5} {:>9} {:>9} {:>9} {:>6}",
        "Month", "Predicted", "Actual", "Optimal", "Gap"
    )?;
    for point in dashboard.yield_series {
        let actual = point
            .actual_kg
            .map_or_else(|| "-".to_string(), |kg| kg.to_string());
        writeln!(
            out,
            "  {:<5} {:>9} {:>9} {:>9} {:>6}",
            point.month,
            point.predicted_kg,
            actual,
            point.optimal_kg,
            point.yield_gap()
        )?;
    }
    Ok(())
}

fn write_weather_panel<W: Write>(
    out: &mut W,
    dashboard: &Dashboard,
) -> io::Result<()> {
    writeln!(out, "7-Day Weather Forecast")?;
    for day in dashboard.weather {
        writeln!(
            out,
            "  {:<4} {:>3}°F  {:>4.1} in  {:>3}% humidity",
            day.day, day.temp_f, day.rainfall_inches, day.humidity_percent
        )?;
    }
    writeln!(
        out,
        "  Total rainfall: {:.1} in",
        weekly_rainfall(dashboard.weather)
    )
}

fn write_health_panel<W: Write>(
    out: &mut W,
    dashboard: &Dashboard,
) -> io::Result<()> {
    writeln!(out, "Crop Health Monitoring")?;
    for crop in dashboard.crop_health {
        writeln!(
            out,
            "  {:<9} health {:>3}%  expected yield {:>3}%  {} Risk",
            crop.crop,
            crop.health_percent,
            crop.expected_yield_percent,
            crop.risk.label()
        )?;
    }
    Ok(())
}

fn write_moisture_panel<W: Write>(
    out: &mut W,
    dashboard: &Dashboard,
) -> io::Result<()> {
    writeln!(out, "Soil Moisture Tracking (%)")?;
    writeln!(
        out,
        "  {:<5} {:>6} {:>6} {:>6} {:>6}",
        "Date", "Zone 1", "Zone 2", "Zone 3", "Zone 4"
    )?;
    for reading in dashboard.soil_moisture {
        let [z1, z2, z3, z4] = reading.zones;
        writeln!(
            out,
            "  {:<5} {:>6} {:>6} {:>6} {:>6}",
            reading.date, z1, z2, z3, z4
        )?;
    }
    if let Some(latest) = latest_moisture(dashboard.soil_moisture) {
        writeln!(
            out,
            "  Driest zone on {}: Zone {}",
            latest.date,
            driest_zone(latest)
        )?;
    }
    for note in dashboard.irrigation_notes {
        writeln!(out, "  {note}")?;
    }
    Ok(())
}

//! Dashboard data for the analytics panel.
//!
//! All series are fixed sample data. The helpers here derive the few
//! figures the dashboard shows on top of them.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YieldPoint {
    pub month: &'static str,
    pub predicted_kg: u32,
    /// Not yet harvested when `None`.
    pub actual_kg: Option<u32>,
    pub optimal_kg: u32,
}

impl YieldPoint {
    /// Shortfall of the prediction against the optimal yield, in kg.
    pub fn yield_gap(&self) -> i64 {
        i64::from(self.optimal_kg) - i64::from(self.predicted_kg)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeatherDay {
    pub day: &'static str,
    pub temp_f: u8,
    pub rainfall_inches: f64,
    pub humidity_percent: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CropHealth {
    pub crop: &'static str,
    pub health_percent: u8,
    pub risk: RiskLevel,
    pub expected_yield_percent: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoistureReading {
    pub date: &'static str,
    /// Moisture percentage for zones 1 to 4.
    pub zones: [u8; 4],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiCard {
    pub title: &'static str,
    pub value: String,
    pub caption: &'static str,
}

pub static YIELD_SERIES: [YieldPoint; 7] = [
    YieldPoint { month: "Mar", predicted_kg: 2400, actual_kg: Some(2300), optimal_kg: 2800 },
    YieldPoint { month: "Apr", predicted_kg: 3200, actual_kg: Some(3100), optimal_kg: 3500 },
    YieldPoint { month: "May", predicted_kg: 4100, actual_kg: Some(4200), optimal_kg: 4500 },
    YieldPoint { month: "Jun", predicted_kg: 5300, actual_kg: Some(5100), optimal_kg: 5800 },
    YieldPoint { month: "Jul", predicted_kg: 6200, actual_kg: Some(6400), optimal_kg: 6800 },
    YieldPoint { month: "Aug", predicted_kg: 6800, actual_kg: None, optimal_kg: 7200 },
    YieldPoint { month: "Sep", predicted_kg: 5900, actual_kg: None, optimal_kg: 6400 },
];

pub static WEATHER_FORECAST: [WeatherDay; 7] = [
    WeatherDay { day: "Mon", temp_f: 72, rainfall_inches: 0.2, humidity_percent: 65 },
    WeatherDay { day: "Tue", temp_f: 75, rainfall_inches: 0.0, humidity_percent: 60 },
    WeatherDay { day: "Wed", temp_f: 78, rainfall_inches: 0.8, humidity_percent: 70 },
    WeatherDay { day: "Thu", temp_f: 74, rainfall_inches: 1.2, humidity_percent: 75 },
    WeatherDay { day: "Fri", temp_f: 71, rainfall_inches: 0.5, humidity_percent: 68 },
    WeatherDay { day: "Sat", temp_f: 73, rainfall_inches: 0.1, humidity_percent: 62 },
    WeatherDay { day: "Sun", temp_f: 76, rainfall_inches: 0.0, humidity_percent: 58 },
];

pub static CROP_HEALTH: [CropHealth; 5] = [
    CropHealth { crop: "Tomatoes", health_percent: 92, risk: RiskLevel::Low, expected_yield_percent: 95 },
    CropHealth { crop: "Corn", health_percent: 78, risk: RiskLevel::Medium, expected_yield_percent: 82 },
    CropHealth { crop: "Wheat", health_percent: 85, risk: RiskLevel::Low, expected_yield_percent: 88 },
    CropHealth { crop: "Soybeans", health_percent: 68, risk: RiskLevel::High, expected_yield_percent: 70 },
    CropHealth { crop: "Lettuce", health_percent: 94, risk: RiskLevel::Low, expected_yield_percent: 96 },
];

pub static SOIL_MOISTURE: [MoistureReading; 5] = [
    MoistureReading { date: "2/24", zones: [65, 58, 72, 61] },
    MoistureReading { date: "2/26", zones: [62, 55, 68, 59] },
    MoistureReading { date: "2/28", zones: [58, 52, 65, 56] },
    MoistureReading { date: "3/1", zones: [70, 68, 75, 72] },
    MoistureReading { date: "3/2", zones: [68, 65, 73, 70] },
];

pub static IRRIGATION_NOTES: [&str; 2] = [
    "Zone 2 showing lower moisture levels. Recommend irrigation within 24 hours.",
    "Zones 1 and 3 are in optimal range. Zone 4 may need irrigation in 2-3 days.",
];

/// Everything the analytics panel renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub kpis: Vec<KpiCard>,
    pub yield_series: &'static [YieldPoint],
    pub weather: &'static [WeatherDay],
    pub crop_health: &'static [CropHealth],
    pub soil_moisture: &'static [MoistureReading],
    pub irrigation_notes: &'static [&'static str],
}

impl Dashboard {
    /// The fixed sample dashboard.
    pub fn standard() -> Self {
        Self {
            kpis: vec![
                KpiCard {
                    title: "Avg. Yield Forecast",
                    value: "+15.3%".to_string(),
                    caption: "vs. last season",
                },
                KpiCard {
                    title: "Soil Moisture",
                    value: "68%".to_string(),
                    caption: "Optimal range",
                },
                KpiCard {
                    title: "Weather Score",
                    value: "8.5/10".to_string(),
                    caption: "Next 7 days",
                },
                KpiCard {
                    title: "Risk Alerts",
                    value: risk_alert_count(&CROP_HEALTH).to_string(),
                    caption: "Require attention",
                },
            ],
            yield_series: &YIELD_SERIES,
            weather: &WEATHER_FORECAST,
            crop_health: &CROP_HEALTH,
            soil_moisture: &SOIL_MOISTURE,
            irrigation_notes: &IRRIGATION_NOTES,
        }
    }
}

/// Crops whose risk is above low.
pub fn risk_alert_count(crops: &[CropHealth]) -> usize {
    crops
        .iter()
        .filter(|crop| crop.risk != RiskLevel::Low)
        .count()
}

/// The most recent moisture reading, if any.
pub fn latest_moisture(readings: &[MoistureReading]) -> Option<&MoistureReading> {
    readings.last()
}

/// 1-based zone number with the lowest moisture in `reading`.
/// Ties go to the lower zone number.
pub fn driest_zone(reading: &MoistureReading) -> usize {
    reading
        .zones
        .iter()
        .enumerate()
        .min_by_key(|(_, moisture)| **moisture)
        .map(|(index, _)| index + 1)
        .unwrap_or(1)
}

/// Total forecast rainfall over the week, in inches.
pub fn weekly_rainfall(days: &[WeatherDay]) -> f64 {
    days.iter().map(|day| day.rainfall_inches).sum()
}

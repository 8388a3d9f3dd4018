//! The yield prediction form as typed on the command line.

use std::fmt;

use agri_core::{CropType, FarmInputDraft, FertilizerUsage, IrrigationType, SoilType};
use tracing::warn;

use crate::utils::{opt_decimal_display, parse_decimal, parse_optional_decimal};

/// Raw form values, exactly as entered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YieldForm {
    pub crop_type: String,
    pub land_size_acres: String,
    pub soil_type: String,
    pub irrigation_type: String,
    pub fertilizer_usage: String,
    pub annual_rainfall_inches: String,
    pub previous_yield_kg: String,
}

impl YieldForm {
    /// Coerces the text fields into a draft for validation.
    ///
    /// Blank fields become `None`. So do unknown options and unparseable
    /// numbers, which are also logged.
    pub fn to_draft(&self) -> FarmInputDraft {
        FarmInputDraft {
            crop_type: parse_option("crop", &self.crop_type, CropType::parse),
            land_size_acres: parse_optional_decimal(&self.land_size_acres),
            soil_type: parse_option("soil", &self.soil_type, SoilType::parse),
            irrigation_type: parse_option(
                "irrigation",
                &self.irrigation_type,
                IrrigationType::parse,
            ),
            fertilizer_usage: parse_option(
                "fertilizer",
                &self.fertilizer_usage,
                FertilizerUsage::parse,
            ),
            annual_rainfall_inches: parse_optional_decimal(&self.annual_rainfall_inches),
            previous_yield_kg: parse_optional_decimal(&self.previous_yield_kg),
        }
    }

    /// Notes for numeric fields that were filled in but could not be read.
    ///
    /// These are hints only; [`Self::to_draft`] still treats such a field
    /// as missing and validation reports it.
    pub fn number_warnings(&self) -> Vec<String> {
        [
            ("land size", &self.land_size_acres),
            ("annual rainfall", &self.annual_rainfall_inches),
            ("previous yield", &self.previous_yield_kg),
        ]
        .into_iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .filter_map(|(field, value)| {
            parse_decimal(value)
                .err()
                .map(|e| format!("{field}: {e}"))
        })
        .collect()
    }
}

fn parse_option<T>(
    field: &'static str,
    value: &str,
    parse: fn(&str) -> Option<T>,
) -> Option<T> {
    if value.trim().is_empty() {
        return None;
    }
    let parsed = parse(value);
    if parsed.is_none() {
        warn!(field, value, "unrecognised option");
    }
    parsed
}

impl fmt::Display for YieldForm {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let draft = self.to_draft();
        writeln!(
            f,
            "Crop:            {}",
            draft.crop_type.map_or("-", |c| c.label())
        )?;
        writeln!(
            f,
            "Land size:       {} acres",
            opt_decimal_display(&draft.land_size_acres)
        )?;
        writeln!(
            f,
            "Soil:            {}",
            draft.soil_type.map_or("-", |s| s.label())
        )?;
        writeln!(
            f,
            "Irrigation:      {}",
            draft.irrigation_type.map_or("-", |i| i.label())
        )?;
        writeln!(
            f,
            "Fertilizer:      {}",
            draft.fertilizer_usage.map_or("-", |u| u.label())
        )?;
        writeln!(
            f,
            "Annual rainfall: {} in",
            opt_decimal_display(&draft.annual_rainfall_inches)
        )?;
        writeln!(
            f,
            "Previous yield:  {} kg",
            opt_decimal_display(&draft.previous_yield_kg)
        )
    }
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CropType {
    Wheat,
    Corn,
    Rice,
    Soybeans,
    Tomatoes,
    Cotton,
}

impl CropType {
    pub const ALL: [Self; 6] = [
        Self::Wheat,
        Self::Corn,
        Self::Rice,
        Self::Soybeans,
        Self::Tomatoes,
        Self::Cotton,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wheat => "wheat",
            Self::Corn => "corn",
            Self::Rice => "rice",
            Self::Soybeans => "soybeans",
            Self::Tomatoes => "tomatoes",
            Self::Cotton => "cotton",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Wheat => "Wheat",
            Self::Corn => "Corn",
            Self::Rice => "Rice",
            Self::Soybeans => "Soybeans",
            Self::Tomatoes => "Tomatoes",
            Self::Cotton => "Cotton",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wheat" => Some(Self::Wheat),
            "corn" => Some(Self::Corn),
            "rice" => Some(Self::Rice),
            "soybeans" => Some(Self::Soybeans),
            "tomatoes" => Some(Self::Tomatoes),
            "cotton" => Some(Self::Cotton),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoilType {
    Loamy,
    Clay,
    Sandy,
    Silty,
}

impl SoilType {
    pub const ALL: [Self; 4] = [Self::Loamy, Self::Clay, Self::Sandy, Self::Silty];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Loamy => "loamy",
            Self::Clay => "clay",
            Self::Sandy => "sandy",
            Self::Silty => "silty",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Loamy => "Loamy",
            Self::Clay => "Clay",
            Self::Sandy => "Sandy",
            Self::Silty => "Silty",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "loamy" => Some(Self::Loamy),
            "clay" => Some(Self::Clay),
            "sandy" => Some(Self::Sandy),
            "silty" => Some(Self::Silty),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IrrigationType {
    Drip,
    Sprinkler,
    Flood,
    Rainfed,
}

impl IrrigationType {
    pub const ALL: [Self; 4] = [Self::Drip, Self::Sprinkler, Self::Flood, Self::Rainfed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Drip => "drip",
            Self::Sprinkler => "sprinkler",
            Self::Flood => "flood",
            Self::Rainfed => "rainfed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Drip => "Drip Irrigation",
            Self::Sprinkler => "Sprinkler",
            Self::Flood => "Flood/Surface",
            Self::Rainfed => "Rainfed Only",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "drip" => Some(Self::Drip),
            "sprinkler" => Some(Self::Sprinkler),
            "flood" => Some(Self::Flood),
            "rainfed" => Some(Self::Rainfed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FertilizerUsage {
    Organic,
    Synthetic,
    Mixed,
    None,
}

impl FertilizerUsage {
    pub const ALL: [Self; 4] = [Self::Organic, Self::Synthetic, Self::Mixed, Self::None];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Organic => "organic",
            Self::Synthetic => "synthetic",
            Self::Mixed => "mixed",
            Self::None => "none",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Organic => "Organic",
            Self::Synthetic => "Synthetic",
            Self::Mixed => "Mixed (Organic + Synthetic)",
            Self::None => "None",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "organic" => Some(Self::Organic),
            "synthetic" => Some(Self::Synthetic),
            "mixed" => Some(Self::Mixed),
            "none" => Some(Self::None),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_accepts_every_form_value() {
        for crop in CropType::ALL {
            assert_eq!(CropType::parse(crop.as_str()), Some(crop));
        }
        for soil in SoilType::ALL {
            assert_eq!(SoilType::parse(soil.as_str()), Some(soil));
        }
        for irrigation in IrrigationType::ALL {
            assert_eq!(IrrigationType::parse(irrigation.as_str()), Some(irrigation));
        }
        for fertilizer in FertilizerUsage::ALL {
            assert_eq!(FertilizerUsage::parse(fertilizer.as_str()), Some(fertilizer));
        }
    }

    #[test]
    fn parse_ignores_case_and_surrounding_whitespace() {
        assert_eq!(CropType::parse("  Tomatoes "), Some(CropType::Tomatoes));
        assert_eq!(IrrigationType::parse("DRIP"), Some(IrrigationType::Drip));
    }

    #[test]
    fn parse_rejects_unknown_values() {
        assert_eq!(CropType::parse("barley"), None);
        assert_eq!(SoilType::parse(""), None);
        assert_eq!(FertilizerUsage::parse("compost"), None);
    }
}

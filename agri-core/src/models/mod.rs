mod farm_input;
mod farm_options;
mod yield_estimate;

pub use farm_input::{FarmInput, FarmInputDraft};
pub use farm_options::{CropType, FertilizerUsage, IrrigationType, SoilType};
pub use yield_estimate::{YieldEstimate, YieldMultipliers};

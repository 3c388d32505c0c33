pub mod engine;
pub mod lot_table;
pub mod params;
pub mod results;
pub mod simulation;
pub mod validation;

#[cfg(feature = "sensitivity")]
pub mod sensitivity;

#[cfg(feature = "records")]
pub mod record;

pub use engine::calculate_all;
pub use lot_table::{generate_lot_ratio_table, HedgePhase, LotRatioRow};
pub use params::{HedgeCalculationParams, HedgeParameter};
pub use results::{HedgeCalculationResults, HedgeMetric};

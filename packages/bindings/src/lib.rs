use napi::Result as NapiResult;
use napi_derive::napi;

use hedge_sim_core::hedge::sensitivity::{self, SensitivityInput};
use hedge_sim_core::hedge::{self, simulation, validation, HedgeCalculationParams, HedgePhase};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_params(params_json: &str) -> NapiResult<HedgeCalculationParams> {
    serde_json::from_str(params_json).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Raw engine run. No validation: degenerate params come back as nulls
/// where the engine produced NaN or an infinity.
#[napi]
pub fn calculate_all(params_json: String) -> NapiResult<String> {
    let params = parse_params(&params_json)?;
    let results = hedge::calculate_all(&params);
    let non_finite = results.non_finite_fields();
    if !non_finite.is_empty() {
        tracing::warn!(fields = ?non_finite, "non-finite hedge results");
    }
    serde_json::to_string(&results).map_err(to_napi_error)
}

#[napi]
pub fn generate_lot_ratio_table(ratio: f64, phase: String) -> NapiResult<String> {
    let rows = hedge::generate_lot_ratio_table(ratio, HedgePhase::from_label(&phase));
    serde_json::to_string(&rows).map_err(to_napi_error)
}

#[napi]
pub fn default_params() -> NapiResult<String> {
    serde_json::to_string(&HedgeCalculationParams::default()).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Boundary
// ---------------------------------------------------------------------------

#[napi]
pub fn validate_params(params_json: String) -> NapiResult<String> {
    let params = parse_params(&params_json)?;
    let violations = validation::validate_params(&params);
    serde_json::to_string(&violations).map_err(to_napi_error)
}

#[napi]
pub fn run_hedge_simulation(params_json: String) -> NapiResult<String> {
    let params = parse_params(&params_json)?;
    let output = simulation::run_hedge_simulation(&params).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn run_sensitivity(input_json: String) -> NapiResult<String> {
    let input: SensitivityInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = sensitivity::run_sensitivity(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

use clap::Args;
use serde_json::Value;

use hedge_sim_core::hedge::simulation;
use hedge_sim_core::hedge::validation;

use crate::input::params::ParamSource;

/// Arguments for a full hedge simulation
#[derive(Args)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub source: ParamSource,
}

pub fn run_simulate(args: SimulateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = args.source.load()?;
    tracing::info!(
        account_size = params.account_size,
        max_dd_pct = params.max_dd_pct,
        "running hedge simulation"
    );
    let result = simulation::run_hedge_simulation(&params)?;
    for warning in &result.warnings {
        tracing::warn!(%warning, "simulation warning");
    }
    Ok(serde_json::to_value(result)?)
}

/// Arguments for param validation only
#[derive(Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub source: ParamSource,
}

pub fn run_validate(args: ValidateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = args.source.load()?;
    let violations = validation::validate_params(&params);
    tracing::info!(violations = violations.len(), "validated params");
    Ok(serde_json::json!({
        "valid": violations.is_empty(),
        "violations": violations,
    }))
}

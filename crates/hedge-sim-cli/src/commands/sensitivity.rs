use clap::Args;
use serde_json::Value;

use hedge_sim_core::hedge::sensitivity::{self, SensitivityInput, SweepVariable};
use hedge_sim_core::hedge::{HedgeMetric, HedgeParameter};

use crate::input::params::ParamSource;

/// Arguments for a parameter sweep
#[derive(Args)]
pub struct SensitivityArgs {
    /// First sweep variable as name:min:max:step
    /// (e.g. "safety_multiplier_f1:1.0:2.0:0.1")
    #[arg(long)]
    pub var1: String,

    /// Second sweep variable (optional, creates a 2D grid)
    #[arg(long)]
    pub var2: Option<String>,

    /// Result field to report
    #[arg(long, default_value = "roi_percentage")]
    pub metric: String,

    #[command(flatten)]
    pub source: ParamSource,
}

fn parse_sweep_var(spec: &str) -> Result<SweepVariable, Box<dyn std::error::Error>> {
    let parts: Vec<&str> = spec.split(':').collect();
    if parts.len() != 4 {
        return Err(format!(
            "Sweep variable must be name:min:max:step, got '{}'",
            spec
        )
        .into());
    }
    let parameter: HedgeParameter = parts[0].parse()?;
    let number = |label: &str, raw: &str| -> Result<f64, Box<dyn std::error::Error>> {
        raw.trim()
            .parse::<f64>()
            .map_err(|e| format!("Invalid {} '{}' in '{}': {}", label, raw, spec, e).into())
    };
    Ok(SweepVariable {
        parameter,
        min: number("min", parts[1])?,
        max: number("max", parts[2])?,
        step: number("step", parts[3])?,
    })
}

pub fn run_sensitivity(args: SensitivityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let input = SensitivityInput {
        base_params: args.source.load()?,
        variable_1: parse_sweep_var(&args.var1)?,
        variable_2: args.var2.as_deref().map(parse_sweep_var).transpose()?,
        output_metric: args.metric.parse()?,
    };
    tracing::info!(
        var1 = %input.variable_1.parameter,
        metric = %input.output_metric,
        "running sensitivity sweep"
    );
    let result = sensitivity::run_sensitivity(&input)?;
    Ok(serde_json::to_value(result)?)
}

use clap::Args;
use serde_json::{Map, Value};

use hedge_sim_core::hedge::{HedgeCalculationParams, HedgeParameter};

use crate::input;

/// Where simulation params come from. Layered: built-in defaults, then the
/// input file (or piped stdin), then individual flags.
#[derive(Args, Debug, Default)]
pub struct ParamSource {
    /// Path to a JSON or YAML file with (some of) the simulation params
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub overrides: ParamOverrides,
}

/// Per-field overrides, applied last.
#[derive(Args, Debug, Default)]
pub struct ParamOverrides {
    /// Prop-firm evaluation account size
    #[arg(long)]
    pub account_size: Option<f64>,
    /// Evaluation fee per attempt
    #[arg(long)]
    pub test_cost: Option<f64>,
    /// Phase 1 profit target (%)
    #[arg(long)]
    pub target_pct_f1: Option<f64>,
    /// Phase 2 profit target (%)
    #[arg(long)]
    pub target_pct_f2: Option<f64>,
    /// Maximum drawdown (%)
    #[arg(long)]
    pub max_dd_pct: Option<f64>,
    /// Trader's share of funded profit (%)
    #[arg(long)]
    pub profit_division_pct: Option<f64>,
    #[arg(long)]
    pub extra_hedge_amount_f1: Option<f64>,
    #[arg(long)]
    pub extra_hedge_amount_f2: Option<f64>,
    #[arg(long)]
    pub extra_hedge_amount_funded: Option<f64>,
    #[arg(long)]
    pub safety_multiplier_f1: Option<f64>,
    #[arg(long)]
    pub safety_multiplier_f2: Option<f64>,
    #[arg(long)]
    pub safety_multiplier_funded: Option<f64>,
    /// Absolute profit target once funded
    #[arg(long)]
    pub funded_target_amount: Option<f64>,
    /// Whether the evaluation fee is refunded on funding (true/false)
    #[arg(long)]
    pub test_refund: Option<bool>,
}

impl ParamOverrides {
    fn numeric(&self) -> [(HedgeParameter, Option<f64>); 13] {
        [
            (HedgeParameter::AccountSize, self.account_size),
            (HedgeParameter::TestCost, self.test_cost),
            (HedgeParameter::TargetPctF1, self.target_pct_f1),
            (HedgeParameter::TargetPctF2, self.target_pct_f2),
            (HedgeParameter::MaxDdPct, self.max_dd_pct),
            (HedgeParameter::ProfitDivisionPct, self.profit_division_pct),
            (HedgeParameter::ExtraHedgeAmountF1, self.extra_hedge_amount_f1),
            (HedgeParameter::ExtraHedgeAmountF2, self.extra_hedge_amount_f2),
            (HedgeParameter::ExtraHedgeAmountFunded, self.extra_hedge_amount_funded),
            (HedgeParameter::SafetyMultiplierF1, self.safety_multiplier_f1),
            (HedgeParameter::SafetyMultiplierF2, self.safety_multiplier_f2),
            (HedgeParameter::SafetyMultiplierFunded, self.safety_multiplier_funded),
            (HedgeParameter::FundedTargetAmount, self.funded_target_amount),
        ]
    }

    pub fn apply(&self, params: &mut HedgeCalculationParams) {
        for (param, value) in self.numeric() {
            if let Some(v) = value {
                tracing::debug!(parameter = %param, value = v, "flag override");
                param.apply(params, v);
            }
        }
        if let Some(refund) = self.test_refund {
            params.test_refund = refund;
        }
    }
}

/// Overlay a partial params object onto the defaults. Unknown keys are
/// rejected so typos do not silently fall back to a default.
pub fn merge_onto_defaults(
    partial: &Value,
) -> Result<HedgeCalculationParams, Box<dyn std::error::Error>> {
    let Value::Object(overlay) = partial else {
        return Err("Params input must be a JSON/YAML object".into());
    };

    let mut merged: Map<String, Value> =
        match serde_json::to_value(HedgeCalculationParams::default())? {
            Value::Object(map) => map,
            _ => return Err("Default params did not serialise to an object".into()),
        };

    for (key, value) in overlay {
        if !merged.contains_key(key) {
            return Err(format!("Unknown parameter '{}'", key).into());
        }
        merged.insert(key.clone(), value.clone());
    }

    Ok(serde_json::from_value(Value::Object(merged))?)
}

impl ParamSource {
    /// Resolve the final params, reading stdin only when no file is given.
    pub fn load(&self) -> Result<HedgeCalculationParams, Box<dyn std::error::Error>> {
        let partial = if let Some(ref path) = self.input {
            tracing::debug!(path = %path, "reading params file");
            Some(input::file::read_value(path)?)
        } else {
            input::stdin::read_stdin()?
        };

        let mut params = match partial {
            Some(value) => merge_onto_defaults(&value)?,
            None => HedgeCalculationParams::default(),
        };
        self.overrides.apply(&mut params);
        Ok(params)
    }
}

use clap::Args;
use serde_json::Value;

use hedge_sim_core::hedge::lot_table::{self, HedgePhase};

/// Arguments for a lot-ratio table
#[derive(Args)]
pub struct LotTableArgs {
    /// Real-account lot per prop-firm lot (e.g. 0.072)
    #[arg(long, allow_hyphen_values = true)]
    pub ratio: f64,

    /// Stage label: "Phase 1", "Phase 2"; anything else means funded
    #[arg(long, default_value = "Phase 1")]
    pub phase: String,
}

pub fn run_lot_table(args: LotTableArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let phase = HedgePhase::from_label(&args.phase);
    tracing::info!(ratio = args.ratio, %phase, "generating lot table");
    let rows = lot_table::generate_lot_ratio_table(args.ratio, phase);
    Ok(serde_json::to_value(rows)?)
}

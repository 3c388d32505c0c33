use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::*;

const PHASE_1_LOTS: [f64; 5] = [5.0, 4.0, 3.0, 2.0, 1.0];
const PHASE_2_LOTS: [f64; 5] = [0.5, 0.3, 0.15, 0.1, 0.05];
const FUNDED_LOTS: [f64; 5] = [2.1, 1.0, 0.8, 0.5, 0.4];

const LOT_DECIMALS: u32 = 5;

/// Evaluation stage a lot table is drawn for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HedgePhase {
    #[serde(rename = "Phase 1")]
    Phase1,
    #[serde(rename = "Phase 2")]
    Phase2,
    Funded,
}

impl HedgePhase {
    /// Map a dashboard label to a phase. Anything that is not "Phase 1" or
    /// "Phase 2" is treated as the funded stage.
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Phase 1" => HedgePhase::Phase1,
            "Phase 2" => HedgePhase::Phase2,
            _ => HedgePhase::Funded,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HedgePhase::Phase1 => "Phase 1",
            HedgePhase::Phase2 => "Phase 2",
            HedgePhase::Funded => "Funded",
        }
    }

    /// Illustrative prop-firm lot sizes for this stage.
    pub fn sample_lots(self) -> &'static [f64; 5] {
        match self {
            HedgePhase::Phase1 => &PHASE_1_LOTS,
            HedgePhase::Phase2 => &PHASE_2_LOTS,
            HedgePhase::Funded => &FUNDED_LOTS,
        }
    }
}

impl fmt::Display for HedgePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of a lot-ratio table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LotRatioRow {
    pub propfirm_lot: f64,
    pub real_account_lot: f64,
}

/// Mirror the stage's sample prop-firm lots onto the real account at `ratio`.
pub fn generate_lot_ratio_table(ratio: Ratio, phase: HedgePhase) -> Vec<LotRatioRow> {
    phase
        .sample_lots()
        .iter()
        .map(|&propfirm_lot| LotRatioRow {
            propfirm_lot,
            real_account_lot: round_lot(propfirm_lot * ratio),
        })
        .collect()
}

/// Round to five decimals, half away from zero. NaN and infinities have no
/// decimal form and pass through untouched.
fn round_lot(value: f64) -> f64 {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(LOT_DECIMALS, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}

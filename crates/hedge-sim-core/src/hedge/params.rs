use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::HedgeSimError;
use crate::types::*;

/// Inputs for one hedge simulation. Every field is required; callers fill
/// defaults upstream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HedgeCalculationParams {
    /// Prop-firm evaluation account notional
    pub account_size: Money,
    /// Fee paid per evaluation attempt
    pub test_cost: Money,
    /// Phase 1 profit target, in percent of account size
    pub target_pct_f1: Percent,
    /// Phase 2 profit target, in percent of account size
    pub target_pct_f2: Percent,
    /// Maximum drawdown allowed by the prop firm, in percent
    pub max_dd_pct: Percent,
    /// Trader's share of funded-phase profit, in percent
    pub profit_division_pct: Percent,
    pub extra_hedge_amount_f1: Money,
    pub extra_hedge_amount_f2: Money,
    pub extra_hedge_amount_funded: Money,
    pub safety_multiplier_f1: Ratio,
    pub safety_multiplier_f2: Ratio,
    pub safety_multiplier_funded: Ratio,
    /// Absolute profit target once funded
    pub funded_target_amount: Money,
    /// Whether the evaluation fee is refunded upon funding
    pub test_refund: bool,
}

impl Default for HedgeCalculationParams {
    /// The dashboard's stock inputs: a 100k two-phase evaluation.
    fn default() -> Self {
        Self {
            account_size: 100_000.0,
            test_cost: 600.0,
            target_pct_f1: 8.0,
            target_pct_f2: 5.0,
            max_dd_pct: 10.0,
            profit_division_pct: 80.0,
            extra_hedge_amount_f1: 120.0,
            extra_hedge_amount_f2: 140.0,
            extra_hedge_amount_funded: 800.0,
            safety_multiplier_f1: 1.3,
            safety_multiplier_f2: 1.2,
            safety_multiplier_funded: 1.15,
            funded_target_amount: 3400.0,
            test_refund: true,
        }
    }
}

/// The numeric inputs of [`HedgeCalculationParams`], addressable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HedgeParameter {
    AccountSize,
    TestCost,
    TargetPctF1,
    TargetPctF2,
    MaxDdPct,
    ProfitDivisionPct,
    ExtraHedgeAmountF1,
    ExtraHedgeAmountF2,
    ExtraHedgeAmountFunded,
    SafetyMultiplierF1,
    SafetyMultiplierF2,
    SafetyMultiplierFunded,
    FundedTargetAmount,
}

impl HedgeParameter {
    pub const ALL: [HedgeParameter; 13] = [
        HedgeParameter::AccountSize,
        HedgeParameter::TestCost,
        HedgeParameter::TargetPctF1,
        HedgeParameter::TargetPctF2,
        HedgeParameter::MaxDdPct,
        HedgeParameter::ProfitDivisionPct,
        HedgeParameter::ExtraHedgeAmountF1,
        HedgeParameter::ExtraHedgeAmountF2,
        HedgeParameter::ExtraHedgeAmountFunded,
        HedgeParameter::SafetyMultiplierF1,
        HedgeParameter::SafetyMultiplierF2,
        HedgeParameter::SafetyMultiplierFunded,
        HedgeParameter::FundedTargetAmount,
    ];

    pub fn name(self) -> &'static str {
        match self {
            HedgeParameter::AccountSize => "account_size",
            HedgeParameter::TestCost => "test_cost",
            HedgeParameter::TargetPctF1 => "target_pct_f1",
            HedgeParameter::TargetPctF2 => "target_pct_f2",
            HedgeParameter::MaxDdPct => "max_dd_pct",
            HedgeParameter::ProfitDivisionPct => "profit_division_pct",
            HedgeParameter::ExtraHedgeAmountF1 => "extra_hedge_amount_f1",
            HedgeParameter::ExtraHedgeAmountF2 => "extra_hedge_amount_f2",
            HedgeParameter::ExtraHedgeAmountFunded => "extra_hedge_amount_funded",
            HedgeParameter::SafetyMultiplierF1 => "safety_multiplier_f1",
            HedgeParameter::SafetyMultiplierF2 => "safety_multiplier_f2",
            HedgeParameter::SafetyMultiplierFunded => "safety_multiplier_funded",
            HedgeParameter::FundedTargetAmount => "funded_target_amount",
        }
    }

    pub fn get(self, params: &HedgeCalculationParams) -> f64 {
        match self {
            HedgeParameter::AccountSize => params.account_size,
            HedgeParameter::TestCost => params.test_cost,
            HedgeParameter::TargetPctF1 => params.target_pct_f1,
            HedgeParameter::TargetPctF2 => params.target_pct_f2,
            HedgeParameter::MaxDdPct => params.max_dd_pct,
            HedgeParameter::ProfitDivisionPct => params.profit_division_pct,
            HedgeParameter::ExtraHedgeAmountF1 => params.extra_hedge_amount_f1,
            HedgeParameter::ExtraHedgeAmountF2 => params.extra_hedge_amount_f2,
            HedgeParameter::ExtraHedgeAmountFunded => params.extra_hedge_amount_funded,
            HedgeParameter::SafetyMultiplierF1 => params.safety_multiplier_f1,
            HedgeParameter::SafetyMultiplierF2 => params.safety_multiplier_f2,
            HedgeParameter::SafetyMultiplierFunded => params.safety_multiplier_funded,
            HedgeParameter::FundedTargetAmount => params.funded_target_amount,
        }
    }

    pub fn apply(self, params: &mut HedgeCalculationParams, value: f64) {
        let slot = match self {
            HedgeParameter::AccountSize => &mut params.account_size,
            HedgeParameter::TestCost => &mut params.test_cost,
            HedgeParameter::TargetPctF1 => &mut params.target_pct_f1,
            HedgeParameter::TargetPctF2 => &mut params.target_pct_f2,
            HedgeParameter::MaxDdPct => &mut params.max_dd_pct,
            HedgeParameter::ProfitDivisionPct => &mut params.profit_division_pct,
            HedgeParameter::ExtraHedgeAmountF1 => &mut params.extra_hedge_amount_f1,
            HedgeParameter::ExtraHedgeAmountF2 => &mut params.extra_hedge_amount_f2,
            HedgeParameter::ExtraHedgeAmountFunded => &mut params.extra_hedge_amount_funded,
            HedgeParameter::SafetyMultiplierF1 => &mut params.safety_multiplier_f1,
            HedgeParameter::SafetyMultiplierF2 => &mut params.safety_multiplier_f2,
            HedgeParameter::SafetyMultiplierFunded => &mut params.safety_multiplier_funded,
            HedgeParameter::FundedTargetAmount => &mut params.funded_target_amount,
        };
        *slot = value;
    }
}

impl fmt::Display for HedgeParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HedgeParameter {
    type Err = HedgeSimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HedgeParameter::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| HedgeSimError::UnknownField {
                kind: "parameter".into(),
                name: s.to_string(),
            })
    }
}

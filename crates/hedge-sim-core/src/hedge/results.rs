use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::HedgeSimError;
use crate::types::*;

/// Phase 1 figures. The real account mirrors the prop account at `ratio`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseOneResults {
    pub recovery_amount: Money,
    pub ratio: Ratio,
    pub phase_cost: Money,
    pub min_real_deposit: Money,
    /// Real-account balance after the prop account hits max drawdown
    pub final_balance_if_fail: Money,
    /// Real-account balance after the prop account hits its target
    pub remaining_balance_if_pass: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseTwoResults {
    pub recovery_amount: Money,
    pub ratio: Ratio,
    pub phase_cost: Money,
    pub min_real_deposit: Money,
    /// Top-up beyond what remained from Phase 1. Negative when the leftover
    /// already covers the Phase 2 deposit.
    pub additional_deposit: Money,
    pub final_balance_if_fail: Money,
    pub remaining_balance_if_pass: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FundedResults {
    pub recovery_amount: Money,
    pub ratio: Ratio,
    pub phase_cost: Money,
    pub min_real_deposit: Money,
    pub trader_profit_share: Money,
    pub test_refund_amount: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TotalsResults {
    pub total_test_cost: Money,
    pub total_used: Money,
    pub total_withdraw: Money,
    pub total_profit: Money,
    pub roi_percentage: Percent,
    pub propfirm_breakeven: Percent,
}

/// Profit if the evaluation fails at each stage, as percent of deposit risked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResults {
    pub profit_projection_f1: Percent,
    pub profit_projection_f2: Percent,
    pub profit_projection_funded: Percent,
}

/// Every derived metric of a hedge simulation, grouped by phase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HedgeCalculationResults {
    pub phase_1: PhaseOneResults,
    pub phase_2: PhaseTwoResults,
    pub funded: FundedResults,
    pub totals: TotalsResults,
    pub projections: ProjectionResults,
}

/// The numeric outputs of [`HedgeCalculationResults`], addressable by their
/// flat column names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HedgeMetric {
    RecoveryAmountF1,
    RatioF1,
    PhaseCostF1,
    MinRealDepositF1,
    FinalBalanceRealAccountF1Fail,
    RemainingBalanceF1,
    RecoveryAmountF2,
    RatioF2,
    PhaseCostF2,
    MinRealDepositF2,
    AdditionalDepositF2,
    FinalBalanceRealAccountF2Fail,
    RemainingBalanceF2,
    RecoveryAmountFunded,
    RatioFunded,
    PhaseCostFunded,
    MinRealDepositFunded,
    TraderProfitShare,
    TestRefundAmount,
    TotalTestCost,
    TotalUsed,
    TotalWithdraw,
    TotalProfit,
    RoiPercentage,
    PropfirmBreakeven,
    ProfitProjectionF1,
    ProfitProjectionF2,
    ProfitProjectionFunded,
}

impl HedgeMetric {
    pub const ALL: [HedgeMetric; 28] = [
        HedgeMetric::RecoveryAmountF1,
        HedgeMetric::RatioF1,
        HedgeMetric::PhaseCostF1,
        HedgeMetric::MinRealDepositF1,
        HedgeMetric::FinalBalanceRealAccountF1Fail,
        HedgeMetric::RemainingBalanceF1,
        HedgeMetric::RecoveryAmountF2,
        HedgeMetric::RatioF2,
        HedgeMetric::PhaseCostF2,
        HedgeMetric::MinRealDepositF2,
        HedgeMetric::AdditionalDepositF2,
        HedgeMetric::FinalBalanceRealAccountF2Fail,
        HedgeMetric::RemainingBalanceF2,
        HedgeMetric::RecoveryAmountFunded,
        HedgeMetric::RatioFunded,
        HedgeMetric::PhaseCostFunded,
        HedgeMetric::MinRealDepositFunded,
        HedgeMetric::TraderProfitShare,
        HedgeMetric::TestRefundAmount,
        HedgeMetric::TotalTestCost,
        HedgeMetric::TotalUsed,
        HedgeMetric::TotalWithdraw,
        HedgeMetric::TotalProfit,
        HedgeMetric::RoiPercentage,
        HedgeMetric::PropfirmBreakeven,
        HedgeMetric::ProfitProjectionF1,
        HedgeMetric::ProfitProjectionF2,
        HedgeMetric::ProfitProjectionFunded,
    ];

    pub fn name(self) -> &'static str {
        match self {
            HedgeMetric::RecoveryAmountF1 => "recovery_amount_f1",
            HedgeMetric::RatioF1 => "ratio_f1",
            HedgeMetric::PhaseCostF1 => "phase_cost_f1",
            HedgeMetric::MinRealDepositF1 => "min_real_deposit_f1",
            HedgeMetric::FinalBalanceRealAccountF1Fail => "final_balance_real_account_f1_fail",
            HedgeMetric::RemainingBalanceF1 => "remaining_balance_f1",
            HedgeMetric::RecoveryAmountF2 => "recovery_amount_f2",
            HedgeMetric::RatioF2 => "ratio_f2",
            HedgeMetric::PhaseCostF2 => "phase_cost_f2",
            HedgeMetric::MinRealDepositF2 => "min_real_deposit_f2",
            HedgeMetric::AdditionalDepositF2 => "additional_deposit_f2",
            HedgeMetric::FinalBalanceRealAccountF2Fail => "final_balance_real_account_f2_fail",
            HedgeMetric::RemainingBalanceF2 => "remaining_balance_f2",
            HedgeMetric::RecoveryAmountFunded => "recovery_amount_funded",
            HedgeMetric::RatioFunded => "ratio_funded",
            HedgeMetric::PhaseCostFunded => "phase_cost_funded",
            HedgeMetric::MinRealDepositFunded => "min_real_deposit_funded",
            HedgeMetric::TraderProfitShare => "trader_profit_share",
            HedgeMetric::TestRefundAmount => "test_refund_amount",
            HedgeMetric::TotalTestCost => "total_test_cost",
            HedgeMetric::TotalUsed => "total_used",
            HedgeMetric::TotalWithdraw => "total_withdraw",
            HedgeMetric::TotalProfit => "total_profit",
            HedgeMetric::RoiPercentage => "roi_percentage",
            HedgeMetric::PropfirmBreakeven => "propfirm_breakeven",
            HedgeMetric::ProfitProjectionF1 => "profit_projection_f1",
            HedgeMetric::ProfitProjectionF2 => "profit_projection_f2",
            HedgeMetric::ProfitProjectionFunded => "profit_projection_funded",
        }
    }

    pub fn extract(self, r: &HedgeCalculationResults) -> f64 {
        match self {
            HedgeMetric::RecoveryAmountF1 => r.phase_1.recovery_amount,
            HedgeMetric::RatioF1 => r.phase_1.ratio,
            HedgeMetric::PhaseCostF1 => r.phase_1.phase_cost,
            HedgeMetric::MinRealDepositF1 => r.phase_1.min_real_deposit,
            HedgeMetric::FinalBalanceRealAccountF1Fail => r.phase_1.final_balance_if_fail,
            HedgeMetric::RemainingBalanceF1 => r.phase_1.remaining_balance_if_pass,
            HedgeMetric::RecoveryAmountF2 => r.phase_2.recovery_amount,
            HedgeMetric::RatioF2 => r.phase_2.ratio,
            HedgeMetric::PhaseCostF2 => r.phase_2.phase_cost,
            HedgeMetric::MinRealDepositF2 => r.phase_2.min_real_deposit,
            HedgeMetric::AdditionalDepositF2 => r.phase_2.additional_deposit,
            HedgeMetric::FinalBalanceRealAccountF2Fail => r.phase_2.final_balance_if_fail,
            HedgeMetric::RemainingBalanceF2 => r.phase_2.remaining_balance_if_pass,
            HedgeMetric::RecoveryAmountFunded => r.funded.recovery_amount,
            HedgeMetric::RatioFunded => r.funded.ratio,
            HedgeMetric::PhaseCostFunded => r.funded.phase_cost,
            HedgeMetric::MinRealDepositFunded => r.funded.min_real_deposit,
            HedgeMetric::TraderProfitShare => r.funded.trader_profit_share,
            HedgeMetric::TestRefundAmount => r.funded.test_refund_amount,
            HedgeMetric::TotalTestCost => r.totals.total_test_cost,
            HedgeMetric::TotalUsed => r.totals.total_used,
            HedgeMetric::TotalWithdraw => r.totals.total_withdraw,
            HedgeMetric::TotalProfit => r.totals.total_profit,
            HedgeMetric::RoiPercentage => r.totals.roi_percentage,
            HedgeMetric::PropfirmBreakeven => r.totals.propfirm_breakeven,
            HedgeMetric::ProfitProjectionF1 => r.projections.profit_projection_f1,
            HedgeMetric::ProfitProjectionF2 => r.projections.profit_projection_f2,
            HedgeMetric::ProfitProjectionFunded => r.projections.profit_projection_funded,
        }
    }
}

impl fmt::Display for HedgeMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HedgeMetric {
    type Err = HedgeSimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HedgeMetric::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| HedgeSimError::UnknownField {
                kind: "metric".into(),
                name: s.to_string(),
            })
    }
}

impl HedgeCalculationResults {
    /// Every metric with its flat name, in [`HedgeMetric::ALL`] order.
    pub fn named_values(&self) -> [(&'static str, f64); 28] {
        HedgeMetric::ALL.map(|m| (m.name(), m.extract(self)))
    }

    pub fn metric(&self, metric: HedgeMetric) -> f64 {
        metric.extract(self)
    }

    /// Names of fields holding NaN or an infinity.
    pub fn non_finite_fields(&self) -> Vec<&'static str> {
        HedgeMetric::ALL
            .into_iter()
            .filter(|m| !m.extract(self).is_finite())
            .map(HedgeMetric::name)
            .collect()
    }
}

/// The results as one flat row, using the suffixed column names the
/// persistence layer stores alongside the params.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlatHedgeResults {
    pub recovery_amount_f1: Money,
    pub ratio_f1: Ratio,
    pub phase_cost_f1: Money,
    pub min_real_deposit_f1: Money,
    pub final_balance_real_account_f1_fail: Money,
    pub remaining_balance_f1: Money,
    pub recovery_amount_f2: Money,
    pub ratio_f2: Ratio,
    pub phase_cost_f2: Money,
    pub min_real_deposit_f2: Money,
    pub additional_deposit_f2: Money,
    pub final_balance_real_account_f2_fail: Money,
    pub remaining_balance_f2: Money,
    pub recovery_amount_funded: Money,
    pub ratio_funded: Ratio,
    pub phase_cost_funded: Money,
    pub min_real_deposit_funded: Money,
    pub trader_profit_share: Money,
    pub test_refund_amount: Money,
    pub total_test_cost: Money,
    pub total_used: Money,
    pub total_withdraw: Money,
    pub total_profit: Money,
    pub roi_percentage: Percent,
    pub propfirm_breakeven: Percent,
    pub profit_projection_f1: Percent,
    pub profit_projection_f2: Percent,
    pub profit_projection_funded: Percent,
}

impl From<&HedgeCalculationResults> for FlatHedgeResults {
    fn from(r: &HedgeCalculationResults) -> Self {
        Self {
            recovery_amount_f1: r.phase_1.recovery_amount,
            ratio_f1: r.phase_1.ratio,
            phase_cost_f1: r.phase_1.phase_cost,
            min_real_deposit_f1: r.phase_1.min_real_deposit,
            final_balance_real_account_f1_fail: r.phase_1.final_balance_if_fail,
            remaining_balance_f1: r.phase_1.remaining_balance_if_pass,
            recovery_amount_f2: r.phase_2.recovery_amount,
            ratio_f2: r.phase_2.ratio,
            phase_cost_f2: r.phase_2.phase_cost,
            min_real_deposit_f2: r.phase_2.min_real_deposit,
            additional_deposit_f2: r.phase_2.additional_deposit,
            final_balance_real_account_f2_fail: r.phase_2.final_balance_if_fail,
            remaining_balance_f2: r.phase_2.remaining_balance_if_pass,
            recovery_amount_funded: r.funded.recovery_amount,
            ratio_funded: r.funded.ratio,
            phase_cost_funded: r.funded.phase_cost,
            min_real_deposit_funded: r.funded.min_real_deposit,
            trader_profit_share: r.funded.trader_profit_share,
            test_refund_amount: r.funded.test_refund_amount,
            total_test_cost: r.totals.total_test_cost,
            total_used: r.totals.total_used,
            total_withdraw: r.totals.total_withdraw,
            total_profit: r.totals.total_profit,
            roi_percentage: r.totals.roi_percentage,
            propfirm_breakeven: r.totals.propfirm_breakeven,
            profit_projection_f1: r.projections.profit_projection_f1,
            profit_projection_f2: r.projections.profit_projection_f2,
            profit_projection_funded: r.projections.profit_projection_funded,
        }
    }
}

impl From<&FlatHedgeResults> for HedgeCalculationResults {
    fn from(f: &FlatHedgeResults) -> Self {
        Self {
            phase_1: PhaseOneResults {
                recovery_amount: f.recovery_amount_f1,
                ratio: f.ratio_f1,
                phase_cost: f.phase_cost_f1,
                min_real_deposit: f.min_real_deposit_f1,
                final_balance_if_fail: f.final_balance_real_account_f1_fail,
                remaining_balance_if_pass: f.remaining_balance_f1,
            },
            phase_2: PhaseTwoResults {
                recovery_amount: f.recovery_amount_f2,
                ratio: f.ratio_f2,
                phase_cost: f.phase_cost_f2,
                min_real_deposit: f.min_real_deposit_f2,
                additional_deposit: f.additional_deposit_f2,
                final_balance_if_fail: f.final_balance_real_account_f2_fail,
                remaining_balance_if_pass: f.remaining_balance_f2,
            },
            funded: FundedResults {
                recovery_amount: f.recovery_amount_funded,
                ratio: f.ratio_funded,
                phase_cost: f.phase_cost_funded,
                min_real_deposit: f.min_real_deposit_funded,
                trader_profit_share: f.trader_profit_share,
                test_refund_amount: f.test_refund_amount,
            },
            totals: TotalsResults {
                total_test_cost: f.total_test_cost,
                total_used: f.total_used,
                total_withdraw: f.total_withdraw,
                total_profit: f.total_profit,
                roi_percentage: f.roi_percentage,
                propfirm_breakeven: f.propfirm_breakeven,
            },
            projections: ProjectionResults {
                profit_projection_f1: f.profit_projection_f1,
                profit_projection_f2: f.profit_projection_f2,
                profit_projection_funded: f.profit_projection_funded,
            },
        }
    }
}

use super::params::HedgeCalculationParams;
use super::results::*;

/// Run the three-phase hedge model.
///
/// Each phase's cost feeds the next: Phase 2 recovers the Phase 1 cost, the
/// funded phase recovers the combined evaluation cost. The function is total:
/// zero denominators yield NaN/Infinity in the affected fields rather than an
/// error, so validation belongs to the caller (see
/// [`validation`](super::validation)).
pub fn calculate_all(p: &HedgeCalculationParams) -> HedgeCalculationResults {
    // Real-account gain when the prop account is stopped out at max drawdown,
    // per unit of ratio.
    let max_dd_amount = p.max_dd_pct / 100.0 * p.account_size;

    // -- Phase 1 --
    let recovery_amount_f1 = p.test_cost + p.extra_hedge_amount_f1;
    let ratio_f1 = recovery_amount_f1 / max_dd_amount;
    let target_amount_f1 = p.target_pct_f1 / 100.0 * p.account_size;
    let phase_cost_f1 = ratio_f1 * target_amount_f1;
    let min_real_deposit_f1 = phase_cost_f1 * p.safety_multiplier_f1;
    let final_balance_f1_fail = min_real_deposit_f1 + ratio_f1 * max_dd_amount;
    let remaining_balance_f1 = min_real_deposit_f1 - ratio_f1 * target_amount_f1;

    // -- Phase 2 --
    let recovery_amount_f2 = phase_cost_f1 + p.extra_hedge_amount_f2 + p.test_cost;
    let ratio_f2 = recovery_amount_f2 / max_dd_amount;
    // Ratio of percentages, not the Phase 1 scaling. Kept as the dashboard
    // computes it.
    let phase_cost_f2 = (p.target_pct_f2 / p.max_dd_pct) * recovery_amount_f2;
    let min_real_deposit_f2 = phase_cost_f2 * p.safety_multiplier_f2;
    let additional_deposit_f2 = min_real_deposit_f2 - remaining_balance_f1;
    let target_amount_f2 = p.target_pct_f2 / 100.0 * p.account_size;
    let final_balance_f2_fail = min_real_deposit_f2 + ratio_f2 * max_dd_amount;
    let remaining_balance_f2 = min_real_deposit_f2 - ratio_f2 * target_amount_f2;

    // -- Funded --
    let total_test_cost = phase_cost_f1 + phase_cost_f2 + p.test_cost;
    let recovery_amount_funded = total_test_cost + p.extra_hedge_amount_funded;
    let ratio_funded = recovery_amount_funded / max_dd_amount;
    let phase_cost_funded = (p.funded_target_amount / p.account_size) * recovery_amount_funded;
    let min_real_deposit_funded = phase_cost_funded * p.safety_multiplier_funded;
    let trader_profit_share = p.funded_target_amount * (p.profit_division_pct / 100.0);
    let test_refund_amount = if p.test_refund { p.test_cost } else { 0.0 };

    // -- Totals --
    let total_withdraw = trader_profit_share + test_refund_amount;
    let total_used = total_test_cost + phase_cost_funded;
    let total_profit = total_withdraw - total_used;
    let roi_percentage = total_profit / total_used * 100.0;
    let propfirm_breakeven = total_used / (p.account_size * p.profit_division_pct / 100.0) * 100.0;

    // -- Projections --
    let profit_projection_f1 = (recovery_amount_f1 - p.test_cost) / min_real_deposit_f1 * 100.0;
    let profit_projection_f2 = (recovery_amount_f2 - (phase_cost_f1 + p.test_cost))
        / (min_real_deposit_f1 + additional_deposit_f2)
        * 100.0;
    let profit_projection_funded =
        (recovery_amount_funded - total_test_cost) / min_real_deposit_funded * 100.0;

    HedgeCalculationResults {
        phase_1: PhaseOneResults {
            recovery_amount: recovery_amount_f1,
            ratio: ratio_f1,
            phase_cost: phase_cost_f1,
            min_real_deposit: min_real_deposit_f1,
            final_balance_if_fail: final_balance_f1_fail,
            remaining_balance_if_pass: remaining_balance_f1,
        },
        phase_2: PhaseTwoResults {
            recovery_amount: recovery_amount_f2,
            ratio: ratio_f2,
            phase_cost: phase_cost_f2,
            min_real_deposit: min_real_deposit_f2,
            additional_deposit: additional_deposit_f2,
            final_balance_if_fail: final_balance_f2_fail,
            remaining_balance_if_pass: remaining_balance_f2,
        },
        funded: FundedResults {
            recovery_amount: recovery_amount_funded,
            ratio: ratio_funded,
            phase_cost: phase_cost_funded,
            min_real_deposit: min_real_deposit_funded,
            trader_profit_share,
            test_refund_amount,
        },
        totals: TotalsResults {
            total_test_cost,
            total_used,
            total_withdraw,
            total_profit,
            roi_percentage,
            propfirm_breakeven,
        },
        projections: ProjectionResults {
            profit_projection_f1,
            profit_projection_f2,
            profit_projection_funded,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_phase_1_reference_values() {
        let r = calculate_all(&HedgeCalculationParams::default());
        assert_eq!(r.phase_1.recovery_amount, 720.0);
        assert_eq!(r.phase_1.ratio, 0.072);
        assert_eq!(r.phase_1.phase_cost, 576.0);
        assert_approx(r.phase_1.min_real_deposit, 748.8);
        assert_approx(r.phase_1.final_balance_if_fail, 1468.8);
        assert_approx(r.phase_1.remaining_balance_if_pass, 172.8);
    }

    #[test]
    fn test_phase_2_reference_values() {
        let r = calculate_all(&HedgeCalculationParams::default());
        // 576 + 140 + 600
        assert_approx(r.phase_2.recovery_amount, 1316.0);
        assert_approx(r.phase_2.ratio, 0.1316);
        // (5 / 10) * 1316
        assert_approx(r.phase_2.phase_cost, 658.0);
        assert_approx(r.phase_2.min_real_deposit, 789.6);
        assert_approx(r.phase_2.additional_deposit, 616.8);
        assert_approx(r.phase_2.final_balance_if_fail, 2105.6);
        assert_approx(r.phase_2.remaining_balance_if_pass, 131.6);
    }

    #[test]
    fn test_funded_and_totals_reference_values() {
        let r = calculate_all(&HedgeCalculationParams::default());
        assert_approx(r.totals.total_test_cost, 1834.0);
        assert_approx(r.funded.recovery_amount, 2634.0);
        assert_approx(r.funded.ratio, 0.2634);
        assert_approx(r.funded.phase_cost, 89.556);
        assert_approx(r.funded.min_real_deposit, 102.9894);
        assert_approx(r.funded.trader_profit_share, 2720.0);
        assert_eq!(r.funded.test_refund_amount, 600.0);

        assert_approx(r.totals.total_withdraw, 3320.0);
        assert_approx(r.totals.total_used, 1923.556);
        assert_approx(r.totals.total_profit, 1396.444);
        assert_approx(r.totals.roi_percentage, 72.59700263470364);
        assert_approx(r.totals.propfirm_breakeven, 2.404445);
    }

    #[test]
    fn test_projection_reference_values() {
        let r = calculate_all(&HedgeCalculationParams::default());
        // 120 / 748.8
        assert_approx(r.projections.profit_projection_f1, 16.025641025641026);
        // 140 / (748.8 + 616.8)
        assert_approx(r.projections.profit_projection_f2, 10.251903925014647);
        // 800 / 102.9894
        assert_approx(r.projections.profit_projection_funded, 776.7789694861801);
    }

    #[test]
    fn test_phase_2_recovers_phase_1_cost() {
        let p = HedgeCalculationParams {
            safety_multiplier_f1: 2.5,
            ..Default::default()
        };
        let r = calculate_all(&p);
        assert_eq!(
            r.phase_2.recovery_amount,
            r.phase_1.phase_cost + p.extra_hedge_amount_f2 + p.test_cost
        );
        // The Phase 1 multiplier inflates the deposit, not the cost carried forward.
        let base = calculate_all(&HedgeCalculationParams::default());
        assert_eq!(r.phase_2.recovery_amount, base.phase_2.recovery_amount);
    }

    #[test]
    fn test_no_refund_zeroes_refund_amount() {
        let p = HedgeCalculationParams {
            test_refund: false,
            test_cost: 1200.0,
            ..Default::default()
        };
        let r = calculate_all(&p);
        assert_eq!(r.funded.test_refund_amount, 0.0);
        assert_eq!(r.totals.total_withdraw, r.funded.trader_profit_share);
    }

    #[test]
    fn test_zero_drawdown_propagates_non_finite() {
        let p = HedgeCalculationParams {
            max_dd_pct: 0.0,
            ..Default::default()
        };
        let r = calculate_all(&p);
        assert!(r.phase_1.ratio.is_infinite());
        assert!(r.phase_2.ratio.is_infinite());
        assert!(r.funded.ratio.is_infinite());
        assert!(!r.totals.roi_percentage.is_finite());
    }

    #[test]
    fn test_zero_account_size_yields_nan() {
        let p = HedgeCalculationParams {
            account_size: 0.0,
            ..Default::default()
        };
        let r = calculate_all(&p);
        assert!(r.phase_1.ratio.is_infinite());
        // inf * 0 target amount
        assert!(r.phase_1.phase_cost.is_nan());
        assert!(r.totals.total_profit.is_nan());
    }

    #[test]
    fn test_zero_recovery_makes_projection_nan() {
        let p = HedgeCalculationParams {
            test_cost: 0.0,
            extra_hedge_amount_f1: 0.0,
            ..Default::default()
        };
        let r = calculate_all(&p);
        assert_eq!(r.phase_1.min_real_deposit, 0.0);
        assert!(r.projections.profit_projection_f1.is_nan());
    }

    #[test]
    fn test_zero_total_used_roi() {
        let free = HedgeCalculationParams {
            test_cost: 0.0,
            extra_hedge_amount_f1: 0.0,
            extra_hedge_amount_f2: 0.0,
            extra_hedge_amount_funded: 0.0,
            ..Default::default()
        };
        let r = calculate_all(&free);
        assert_eq!(r.totals.total_used, 0.0);
        // Payout still positive, so x / 0
        assert_eq!(r.totals.roi_percentage, f64::INFINITY);

        let r = calculate_all(&HedgeCalculationParams {
            profit_division_pct: 0.0,
            ..free
        });
        assert_eq!(r.totals.total_used, 0.0);
        assert_eq!(r.totals.total_profit, 0.0);
        assert!(r.totals.roi_percentage.is_nan());
        assert!(r.totals.propfirm_breakeven.is_nan());
    }
}

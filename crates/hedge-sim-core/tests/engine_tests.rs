use hedge_sim_core::hedge::results::FlatHedgeResults;
use hedge_sim_core::hedge::simulation::run_hedge_simulation;
use hedge_sim_core::hedge::{
    calculate_all, generate_lot_ratio_table, HedgeCalculationParams, HedgeCalculationResults,
    HedgePhase, LotRatioRow,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Reference scenario (dashboard defaults)
// ---------------------------------------------------------------------------

fn reference_params() -> HedgeCalculationParams {
    HedgeCalculationParams {
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

fn bits(results: &HedgeCalculationResults) -> Vec<u64> {
    results
        .named_values()
        .iter()
        .map(|(_, v)| v.to_bits())
        .collect()
}

#[test]
fn test_reference_matches_defaults() {
    assert_eq!(reference_params(), HedgeCalculationParams::default());
}

#[test]
fn test_reference_golden_values() {
    let r = calculate_all(&reference_params());
    assert_eq!(r.phase_1.recovery_amount, 720.0);
    assert_eq!(r.phase_1.ratio, 0.072);
    assert_eq!(r.phase_1.phase_cost, 576.0);
    assert!((r.phase_1.min_real_deposit - 748.8).abs() < 1e-9);
    assert!((r.totals.total_test_cost - 1834.0).abs() < 1e-9);
    assert!((r.totals.total_profit - 1396.444).abs() < 1e-9);
    assert!((r.totals.roi_percentage - 72.597_002_634_703_64).abs() < 1e-9);
}

#[test]
fn test_flat_row_of_reference_run() {
    let flat = FlatHedgeResults::from(&calculate_all(&reference_params()));
    let json = serde_json::to_value(flat).unwrap();
    assert_eq!(json["recovery_amount_f1"], 720.0);
    assert_eq!(json["ratio_f1"], 0.072);
    assert_eq!(json["test_refund_amount"], 600.0);
}

#[test]
fn test_simulation_report_wraps_engine_output() {
    let out = run_hedge_simulation(&reference_params()).unwrap();
    assert_eq!(bits(&out.result.results), bits(&calculate_all(&reference_params())));
    assert_eq!(out.metadata.precision, "ieee754_f64");
    assert_eq!(
        out.result.lot_tables[0].rows,
        generate_lot_ratio_table(0.072, HedgePhase::Phase1)
    );
}

#[test]
fn test_phase_1_lot_table_for_reference_ratio() {
    let ratio = calculate_all(&reference_params()).phase_1.ratio;
    let expected: Vec<LotRatioRow> = [
        (5.0, 0.36),
        (4.0, 0.288),
        (3.0, 0.216),
        (2.0, 0.144),
        (1.0, 0.072),
    ]
    .into_iter()
    .map(|(propfirm_lot, real_account_lot)| LotRatioRow {
        propfirm_lot,
        real_account_lot,
    })
    .collect();
    assert_eq!(
        generate_lot_ratio_table(ratio, HedgePhase::from_label("Phase 1")),
        expected
    );
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

fn valid_params() -> impl Strategy<Value = HedgeCalculationParams> {
    let sizing = (
        5_000.0f64..1_000_000.0,
        1.0f64..5_000.0,
        1.0f64..20.0,
        1.0f64..20.0,
        1.0f64..20.0,
        1.0f64..100.0,
        100.0f64..50_000.0,
    );
    let hedging = (
        0.0f64..2_000.0,
        0.0f64..2_000.0,
        0.0f64..2_000.0,
        1.0f64..3.0,
        1.0f64..3.0,
        1.0f64..3.0,
        any::<bool>(),
    );
    (sizing, hedging).prop_map(
        |(
            (
                account_size,
                test_cost,
                target_pct_f1,
                target_pct_f2,
                max_dd_pct,
                profit_division_pct,
                funded_target_amount,
            ),
            (extra_f1, extra_f2, extra_funded, mult_f1, mult_f2, mult_funded, test_refund),
        )| HedgeCalculationParams {
            account_size,
            test_cost,
            target_pct_f1,
            target_pct_f2,
            max_dd_pct,
            profit_division_pct,
            extra_hedge_amount_f1: extra_f1,
            extra_hedge_amount_f2: extra_f2,
            extra_hedge_amount_funded: extra_funded,
            safety_multiplier_f1: mult_f1,
            safety_multiplier_f2: mult_f2,
            safety_multiplier_funded: mult_funded,
            funded_target_amount,
            test_refund,
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_repeated_runs_are_bit_identical(params in valid_params()) {
        prop_assert_eq!(bits(&calculate_all(&params)), bits(&calculate_all(&params)));
    }

    #[test]
    fn prop_valid_inputs_give_finite_results(params in valid_params()) {
        let r = calculate_all(&params);
        prop_assert!(r.non_finite_fields().is_empty(), "{:?}", r.non_finite_fields());
    }

    #[test]
    fn prop_totals_are_consistent(params in valid_params()) {
        let r = calculate_all(&params);
        prop_assert_eq!(r.totals.total_profit, r.totals.total_withdraw - r.totals.total_used);
        prop_assert_eq!(
            r.totals.total_test_cost,
            r.phase_1.phase_cost + r.phase_2.phase_cost + params.test_cost
        );
        prop_assert_eq!(
            r.totals.total_withdraw,
            r.funded.trader_profit_share + r.funded.test_refund_amount
        );
    }

    #[test]
    fn prop_phase_2_recovers_phase_1_cost(params in valid_params()) {
        let r = calculate_all(&params);
        prop_assert_eq!(
            r.phase_2.recovery_amount,
            r.phase_1.phase_cost + params.extra_hedge_amount_f2 + params.test_cost
        );
        prop_assert_eq!(
            r.phase_2.additional_deposit,
            r.phase_2.min_real_deposit - r.phase_1.remaining_balance_if_pass
        );
    }

    #[test]
    fn prop_phase_1_multiplier_is_monotonic(params in valid_params(), bump in 0.01f64..2.0) {
        let base = calculate_all(&params);
        let raised = calculate_all(&HedgeCalculationParams {
            safety_multiplier_f1: params.safety_multiplier_f1 + bump,
            ..params
        });
        prop_assert!(raised.phase_1.min_real_deposit > base.phase_1.min_real_deposit);
        prop_assert!(raised.phase_1.remaining_balance_if_pass > base.phase_1.remaining_balance_if_pass);
        // a larger Phase 1 leftover means a smaller Phase 2 top-up
        prop_assert!(raised.phase_2.additional_deposit < base.phase_2.additional_deposit);
        // the cost carried into Phase 2 does not depend on the multiplier
        prop_assert_eq!(raised.phase_2.recovery_amount, base.phase_2.recovery_amount);
    }

    #[test]
    fn prop_no_refund_means_zero_refund(params in valid_params()) {
        let r = calculate_all(&HedgeCalculationParams { test_refund: false, ..params });
        prop_assert_eq!(r.funded.test_refund_amount, 0.0);
        let r = calculate_all(&HedgeCalculationParams { test_refund: true, ..params });
        prop_assert_eq!(r.funded.test_refund_amount, params.test_cost);
    }

    #[test]
    fn prop_lot_tables_have_five_rounded_rows(ratio in 0.0f64..5.0, label in "(Phase 1|Phase 2|Funded|.*)") {
        let phase = HedgePhase::from_label(&label);
        let rows = generate_lot_ratio_table(ratio, phase);
        prop_assert_eq!(rows.len(), 5);
        for (row, lot) in rows.iter().zip(phase.sample_lots()) {
            prop_assert_eq!(row.propfirm_lot, *lot);
            let scaled = row.real_account_lot * 100_000.0;
            prop_assert!((scaled - scaled.round()).abs() < 1e-6);
            prop_assert!((row.real_account_lot - lot * ratio).abs() <= 0.000_005 + 1e-12);
        }
    }
}

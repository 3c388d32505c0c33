use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::engine::calculate_all;
use super::lot_table::{generate_lot_ratio_table, HedgePhase, LotRatioRow};
use super::params::HedgeCalculationParams;
use super::results::HedgeCalculationResults;
use super::validation::ensure_valid;
use crate::types::*;
use crate::HedgeSimResult;

/// Lot mirroring guide for one stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseLotTable {
    pub phase: HedgePhase,
    pub ratio: Ratio,
    pub rows: Vec<LotRatioRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HedgeSimulationReport {
    pub results: HedgeCalculationResults,
    pub lot_tables: Vec<PhaseLotTable>,
}

/// Validate, run the engine, and attach a lot table per stage.
pub fn run_hedge_simulation(
    params: &HedgeCalculationParams,
) -> HedgeSimResult<ComputationOutput<HedgeSimulationReport>> {
    let start = Instant::now();

    ensure_valid(params)?;

    let results = calculate_all(params);
    let warnings = collect_warnings(params, &results);

    let lot_tables = [
        (HedgePhase::Phase1, results.phase_1.ratio),
        (HedgePhase::Phase2, results.phase_2.ratio),
        (HedgePhase::Funded, results.funded.ratio),
    ]
    .into_iter()
    .map(|(phase, ratio)| PhaseLotTable {
        phase,
        ratio,
        rows: generate_lot_ratio_table(ratio, phase),
    })
    .collect();

    let output = HedgeSimulationReport {
        results,
        lot_tables,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Prop-Firm Hedge Simulation (Phase 1 -> Phase 2 -> Funded)",
        params,
        warnings,
        elapsed,
        output,
    ))
}

fn collect_warnings(
    params: &HedgeCalculationParams,
    results: &HedgeCalculationResults,
) -> Vec<String> {
    let mut warnings = Vec::new();

    for (name, multiplier) in [
        ("safety_multiplier_f1", params.safety_multiplier_f1),
        ("safety_multiplier_f2", params.safety_multiplier_f2),
        ("safety_multiplier_funded", params.safety_multiplier_funded),
    ] {
        if multiplier < 1.0 {
            warnings.push(format!(
                "{name} is {multiplier}: minimum deposit is below the phase cost"
            ));
        }
    }

    if results.phase_2.additional_deposit < 0.0 {
        warnings.push(format!(
            "Phase 1 leftover exceeds the Phase 2 deposit by {:.2}; no top-up needed",
            -results.phase_2.additional_deposit
        ));
    }

    if results.totals.roi_percentage < 0.0 {
        warnings.push(format!(
            "Negative ROI ({:.2}%): withdrawals do not cover total hedge cost",
            results.totals.roi_percentage
        ));
    }

    let non_finite = results.non_finite_fields();
    if !non_finite.is_empty() {
        warnings.push(format!("Non-finite results: {}", non_finite.join(", ")));
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HedgeSimError;

    #[test]
    fn test_report_matches_engine() {
        let params = HedgeCalculationParams::default();
        let out = run_hedge_simulation(&params).unwrap();
        assert_eq!(out.result.results, calculate_all(&params));
        assert!(out.warnings.is_empty(), "{:?}", out.warnings);
        assert_eq!(out.assumptions["account_size"], 100_000.0);
    }

    #[test]
    fn test_report_has_lot_table_per_phase() {
        let out = run_hedge_simulation(&HedgeCalculationParams::default()).unwrap();
        let phases: Vec<HedgePhase> = out.result.lot_tables.iter().map(|t| t.phase).collect();
        assert_eq!(
            phases,
            vec![HedgePhase::Phase1, HedgePhase::Phase2, HedgePhase::Funded]
        );
        assert_eq!(out.result.lot_tables[0].rows[4].real_account_lot, 0.072);
        assert!(out.result.lot_tables.iter().all(|t| t.rows.len() == 5));
    }

    #[test]
    fn test_invalid_params_rejected() {
        let params = HedgeCalculationParams {
            max_dd_pct: 0.0,
            ..Default::default()
        };
        let err = run_hedge_simulation(&params).unwrap_err();
        assert!(matches!(err, HedgeSimError::InvalidInput { ref field, .. } if field == "max_dd_pct"));
    }

    #[test]
    fn test_negative_roi_warning() {
        let params = HedgeCalculationParams {
            funded_target_amount: 100.0,
            test_refund: false,
            ..Default::default()
        };
        let out = run_hedge_simulation(&params).unwrap();
        assert!(out.result.results.totals.roi_percentage < 0.0);
        assert!(out.warnings.iter().any(|w| w.contains("Negative ROI")));
    }

    #[test]
    fn test_low_multiplier_warning() {
        let params = HedgeCalculationParams {
            safety_multiplier_funded: 0.8,
            ..Default::default()
        };
        let out = run_hedge_simulation(&params).unwrap();
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].starts_with("safety_multiplier_funded"));
    }

    #[test]
    fn test_leftover_covers_phase_2_warning() {
        let params = HedgeCalculationParams {
            safety_multiplier_f1: 3.0,
            ..Default::default()
        };
        let out = run_hedge_simulation(&params).unwrap();
        assert!(out.result.results.phase_2.additional_deposit < 0.0);
        assert!(out.warnings.iter().any(|w| w.contains("no top-up needed")));
    }

    #[test]
    fn test_zero_profit_share_flags_breakeven() {
        let params = HedgeCalculationParams {
            profit_division_pct: 0.0,
            ..Default::default()
        };
        let out = run_hedge_simulation(&params).unwrap();
        assert!(out
            .warnings
            .iter()
            .any(|w| w.starts_with("Non-finite results") && w.contains("propfirm_breakeven")));
    }
}

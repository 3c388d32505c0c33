use serde::{Deserialize, Serialize};

use super::params::{HedgeCalculationParams, HedgeParameter};
use crate::error::HedgeSimError;
use crate::HedgeSimResult;

/// A single rejected field, worded for display next to the form input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub reason: String,
}

impl FieldViolation {
    fn new(param: HedgeParameter, reason: &str) -> Self {
        Self {
            field: param.name().to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Check params before handing them to the engine. Returns every violation,
/// one per field at most, in declaration order.
pub fn validate_params(params: &HedgeCalculationParams) -> Vec<FieldViolation> {
    HedgeParameter::ALL
        .into_iter()
        .filter_map(|param| check(param, param.get(params)))
        .collect()
}

/// Fail on the first violation, as [`HedgeSimError::InvalidInput`].
pub fn ensure_valid(params: &HedgeCalculationParams) -> HedgeSimResult<()> {
    match validate_params(params).into_iter().next() {
        Some(v) => Err(HedgeSimError::InvalidInput {
            field: v.field,
            reason: v.reason,
        }),
        None => Ok(()),
    }
}

fn check(param: HedgeParameter, value: f64) -> Option<FieldViolation> {
    use HedgeParameter::*;

    if !value.is_finite() {
        return Some(FieldViolation::new(param, "Must be a finite number"));
    }
    match param {
        AccountSize | MaxDdPct | FundedTargetAmount | TargetPctF1 | TargetPctF2
            if value <= 0.0 =>
        {
            Some(FieldViolation::new(param, "Must be positive"))
        }
        SafetyMultiplierF1 | SafetyMultiplierF2 | SafetyMultiplierFunded if value <= 0.0 => {
            Some(FieldViolation::new(param, "Must be positive"))
        }
        TestCost | ExtraHedgeAmountF1 | ExtraHedgeAmountF2 | ExtraHedgeAmountFunded
            if value < 0.0 =>
        {
            Some(FieldViolation::new(param, "Cannot be negative"))
        }
        ProfitDivisionPct if !(0.0..=100.0).contains(&value) => {
            Some(FieldViolation::new(param, "Must be between 0 and 100"))
        }
        _ => None,
    }
}

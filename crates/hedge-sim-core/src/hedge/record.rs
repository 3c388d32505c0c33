use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::engine::calculate_all;
use super::params::HedgeCalculationParams;
use super::results::{FlatHedgeResults, HedgeCalculationResults};
use super::validation::ensure_valid;
use crate::error::HedgeSimError;
use crate::HedgeSimResult;

/// A saved simulation: metadata plus params and results flattened into a
/// single row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HedgeSimulationRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub params: HedgeCalculationParams,
    #[serde(flatten)]
    pub results: FlatHedgeResults,
}

impl HedgeSimulationRecord {
    /// Build a new row. Params are validated and every result column must be
    /// finite, since JSON has no encoding for NaN or infinity.
    pub fn new(
        name: &str,
        owner_id: &str,
        params: HedgeCalculationParams,
        now: DateTime<Utc>,
    ) -> HedgeSimResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(HedgeSimError::InvalidInput {
                field: "name".into(),
                reason: "Simulation name is required".into(),
            });
        }
        if owner_id.trim().is_empty() {
            return Err(HedgeSimError::InvalidInput {
                field: "owner_id".into(),
                reason: "Owner is required".into(),
            });
        }
        let results = storable_results(&params)?;

        Ok(Self {
            id: None,
            name: name.to_string(),
            notes: None,
            owner_id: owner_id.to_string(),
            created_at: now,
            updated_at: now,
            params,
            results,
        })
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        let notes = notes.into();
        self.notes = if notes.trim().is_empty() { None } else { Some(notes) };
        self
    }

    /// Replace the params and recompute results. On error the record is left
    /// untouched.
    pub fn update_params(
        &mut self,
        params: HedgeCalculationParams,
        now: DateTime<Utc>,
    ) -> HedgeSimResult<()> {
        let results = storable_results(&params)?;
        self.params = params;
        self.results = results;
        self.updated_at = now;
        Ok(())
    }

    pub fn results(&self) -> HedgeCalculationResults {
        HedgeCalculationResults::from(&self.results)
    }

    /// Whether the stored results are exactly what the engine produces for
    /// the stored params. Rows edited outside this type may drift.
    pub fn is_consistent(&self) -> bool {
        let fresh = calculate_all(&self.params).named_values();
        self.results()
            .named_values()
            .iter()
            .zip(fresh.iter())
            .all(|((_, a), (_, b))| a.to_bits() == b.to_bits())
    }
}

/// Validate `params` and compute the results, refusing any combination that
/// leaves a non-finite column.
fn storable_results(params: &HedgeCalculationParams) -> HedgeSimResult<FlatHedgeResults> {
    ensure_valid(params)?;
    let results = calculate_all(params);
    if let Some(field) = results.non_finite_fields().first() {
        return Err(HedgeSimError::InvalidInput {
            field: (*field).to_string(),
            reason: "Result is not finite for these params and cannot be stored".into(),
        });
    }
    Ok(FlatHedgeResults::from(&results))
}

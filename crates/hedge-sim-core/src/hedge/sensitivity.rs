use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::engine::calculate_all;
use super::params::{HedgeCalculationParams, HedgeParameter};
use super::results::HedgeMetric;
use super::validation::ensure_valid;
use crate::error::HedgeSimError;
use crate::types::*;
use crate::HedgeSimResult;

const MAX_POINTS_PER_AXIS: usize = 10_000;

/// A parameter swept from `min` to `max` inclusive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SweepVariable {
    pub parameter: HedgeParameter,
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivityInput {
    pub base_params: HedgeCalculationParams,
    pub variable_1: SweepVariable,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable_2: Option<SweepVariable>,
    /// Result field to report, e.g. `roi_percentage`
    pub output_metric: HedgeMetric,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivityOutput {
    pub variable_1_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable_2_name: Option<String>,
    pub variable_1_values: Vec<f64>,
    pub variable_2_values: Vec<f64>,
    pub output_metric: HedgeMetric,
    /// matrix[i][j] = metric at variable_1_values[i], variable_2_values[j].
    /// Single-column rows for a one-way sweep.
    pub matrix: Vec<Vec<f64>>,
    /// Metric at the unmodified base params
    pub base_case_value: f64,
}

fn generate_sweep_values(var: &SweepVariable) -> HedgeSimResult<Vec<f64>> {
    let invalid = |reason: &str| HedgeSimError::InvalidSweep {
        variable: var.parameter.name().to_string(),
        reason: reason.to_string(),
    };

    if !(var.min.is_finite() && var.max.is_finite() && var.step.is_finite()) {
        return Err(invalid("Bounds and step must be finite"));
    }
    if var.step <= 0.0 {
        return Err(invalid("Step must be positive"));
    }
    if var.min > var.max {
        return Err(invalid("Min must be <= max"));
    }

    let span = (var.max - var.min) / var.step;
    // Absorb representation error so 0.5 / 0.1 still counts 5 steps.
    let steps = (span + 1e-9).floor();
    if steps >= MAX_POINTS_PER_AXIS as f64 {
        return Err(invalid("Too many sweep points"));
    }

    let mut values: Vec<f64> = (0..=steps as usize)
        .map(|i| (var.min + i as f64 * var.step).min(var.max))
        .collect();
    if let Some(&last) = values.last() {
        if var.max - last > var.step * 1e-9 {
            values.push(var.max);
        }
    }
    Ok(values)
}

fn evaluate(
    base: &HedgeCalculationParams,
    assignments: &[(HedgeParameter, f64)],
    metric: HedgeMetric,
) -> f64 {
    let mut params = *base;
    for &(param, value) in assignments {
        param.apply(&mut params, value);
    }
    calculate_all(&params).metric(metric)
}

/// Re-run the engine across a one- or two-way parameter grid.
pub fn run_sensitivity(
    input: &SensitivityInput,
) -> HedgeSimResult<ComputationOutput<SensitivityOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    ensure_valid(&input.base_params)?;

    if let Some(v2) = &input.variable_2 {
        if v2.parameter == input.variable_1.parameter {
            return Err(HedgeSimError::InvalidSweep {
                variable: v2.parameter.name().to_string(),
                reason: "Both sweep variables name the same parameter".into(),
            });
        }
    }

    let v1 = input.variable_1;
    let v1_values = generate_sweep_values(&v1)?;
    let v2_values = match &input.variable_2 {
        Some(v2) => generate_sweep_values(v2)?,
        None => Vec::new(),
    };

    let metric = input.output_metric;
    let matrix: Vec<Vec<f64>> = v1_values
        .iter()
        .map(|&x| match &input.variable_2 {
            Some(v2) => v2_values
                .iter()
                .map(|&y| {
                    evaluate(
                        &input.base_params,
                        &[(v1.parameter, x), (v2.parameter, y)],
                        metric,
                    )
                })
                .collect(),
            None => vec![evaluate(&input.base_params, &[(v1.parameter, x)], metric)],
        })
        .collect();

    let non_finite = matrix.iter().flatten().filter(|v| !v.is_finite()).count();
    if non_finite > 0 {
        warnings.push(format!(
            "{non_finite} grid point(s) produced a non-finite {metric}"
        ));
    }

    let base_case_value = evaluate(&input.base_params, &[], metric);

    let output = SensitivityOutput {
        variable_1_name: v1.parameter.name().to_string(),
        variable_2_name: input.variable_2.map(|v| v.parameter.name().to_string()),
        variable_1_values: v1_values,
        variable_2_values: v2_values,
        output_metric: input.output_metric,
        matrix,
        base_case_value,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Hedge Simulation Sensitivity Sweep",
        &serde_json::json!({
            "variable_1": input.variable_1,
            "variable_2": input.variable_2,
            "output_metric": input.output_metric,
        }),
        warnings,
        elapsed,
        output,
    ))
}

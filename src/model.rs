//! Logistic regression fit/predict entry points.
//!
//! Neither entry point loops or times itself; a repeated-measurement harness
//! (see `benches/logistic.rs`) calls them and keeps the statistics.

use crate::errors::{BenchError, BenchResult};
use smartcore::dataset::breast_cancer;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linear::logistic_regression::{LogisticRegression, LogisticRegressionParameters};
use tracing::debug;

pub type LogisticModel = LogisticRegression<f64, u32, DenseMatrix<f64>, Vec<u32>>;

/// Feature matrix and labels of the bundled breast cancer set.
#[derive(Debug)]
pub struct ModelData {
    pub x: DenseMatrix<f64>,
    pub y: Vec<u32>,
    pub num_samples: usize,
    pub num_features: usize,
}

fn model_err(e: smartcore::error::Failed) -> BenchError {
    BenchError::ModelError(e.to_string())
}

/// 569 samples, 30 features, labels 0 (malignant) and 1 (benign).
pub fn load_dataset() -> BenchResult<ModelData> {
    let dataset = breast_cancer::load_dataset();
    let values: Vec<f64> = dataset.data.iter().map(|&v| f64::from(v)).collect();

    // Samples are stored row after row.
    let x = DenseMatrix::new(dataset.num_samples, dataset.num_features, values, false)
        .map_err(model_err)?;

    Ok(ModelData {
        x,
        y: dataset.target,
        num_samples: dataset.num_samples,
        num_features: dataset.num_features,
    })
}

/// L-BFGS solver, capped at 1000 iterations, no regularisation.
fn fit(data: &ModelData) -> BenchResult<LogisticModel> {
    let params = LogisticRegressionParameters::default();
    let model = LogisticRegression::fit(&data.x, &data.y, params).map_err(model_err)?;
    debug!(samples = data.num_samples, "Model fitted");
    Ok(model)
}

pub fn train() -> BenchResult<LogisticModel> {
    let data = load_dataset()?;
    fit(&data)
}

/// Fits a fresh model, then predicts a class for every sample.
pub fn predict() -> BenchResult<Vec<u32>> {
    let data = load_dataset()?;
    let model = fit(&data)?;
    model.predict(&data.x).map_err(model_err)
}

pub fn accuracy(predicted: &[u32], expected: &[u32]) -> f64 {
    if expected.is_empty() {
        return 0.0;
    }
    let hits = predicted
        .iter()
        .zip(expected)
        .filter(|(p, e)| p == e)
        .count();
    hits as f64 / expected.len() as f64
}

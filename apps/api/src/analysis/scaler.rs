use serde::{Deserialize, Serialize};

use crate::errors::AnalysisError;

/// Zero-mean / unit-variance scaling with parameters frozen at fit time.
/// Dimensions with zero variance keep a scale of 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler {
    pub fn fit(rows: &[Vec<f64>]) -> Result<Self, AnalysisError> {
        let first = rows.first().ok_or_else(|| {
            AnalysisError::Training("cannot fit scaler on zero rows".to_string())
        })?;
        let width = first.len();
        if rows.iter().any(|r| r.len() != width) {
            return Err(AnalysisError::Training(
                "scaler rows have inconsistent widths".to_string(),
            ));
        }

        let n = rows.len() as f64;
        let mut mean = vec![0.0; width];
        for row in rows {
            for (m, v) in mean.iter_mut().zip(row) {
                *m += v;
            }
        }
        mean.iter_mut().for_each(|m| *m /= n);

        let mut variance = vec![0.0; width];
        for row in rows {
            for ((var, v), m) in variance.iter_mut().zip(row).zip(&mean) {
                *var += (v - m).powi(2);
            }
        }

        let scale = variance
            .into_iter()
            .map(|var| {
                let std = (var / n).sqrt();
                if std > f64::EPSILON {
                    std
                } else {
                    1.0
                }
            })
            .collect();

        Ok(Self { mean, scale })
    }

    pub fn width(&self) -> usize {
        self.mean.len()
    }

    pub fn transform(&self, row: &[f64]) -> Result<Vec<f64>, AnalysisError> {
        if row.len() != self.width() {
            return Err(AnalysisError::Inference(format!(
                "expected {} features, got {}",
                self.width(),
                row.len()
            )));
        }
        Ok(row
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(v, (m, s))| (v - m) / s)
            .collect())
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.mean.len() != self.scale.len() {
            return Err(AnalysisError::Artifact(
                "scaler mean and scale lengths differ".to_string(),
            ));
        }
        Ok(())
    }
}

//! Random-forest regressor over dense feature rows.
//!
//! Each tree is grown on a bootstrap sample drawn from a seeded `StdRng`, so the same
//! training data and parameters always produce the same forest.

use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::errors::AnalysisError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ForestParams {
    pub n_trees: usize,
    pub seed: u64,
    pub min_samples_split: usize,
    pub max_depth: Option<usize>,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: 100,
            seed: 42,
            min_samples_split: 2,
            max_depth: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    fn predict(&self, row: &[f64]) -> f64 {
        match self {
            Node::Leaf { value } => *value,
            Node::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                if row[*feature] <= *threshold {
                    left.predict(row)
                } else {
                    right.predict(row)
                }
            }
        }
    }

    fn max_feature(&self) -> Option<usize> {
        match self {
            Node::Leaf { .. } => None,
            Node::Split {
                feature,
                left,
                right,
                ..
            } => [Some(*feature), left.max_feature(), right.max_feature()]
                .into_iter()
                .flatten()
                .max(),
        }
    }
}

struct SplitCandidate {
    feature: usize,
    threshold: f64,
    sse: f64,
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

fn sse(targets: &[f64], indices: &[usize]) -> f64 {
    let m = mean(indices.iter().map(|&i| targets[i]));
    indices.iter().map(|&i| (targets[i] - m).powi(2)).sum()
}

fn best_split(rows: &[Vec<f64>], targets: &[f64], indices: &[usize]) -> Option<SplitCandidate> {
    let width = rows[indices[0]].len();
    let mut best: Option<SplitCandidate> = None;

    for feature in 0..width {
        let mut values: Vec<f64> = indices.iter().map(|&i| rows[i][feature]).collect();
        values.sort_by(|a, b| a.total_cmp(b));
        values.dedup();

        for pair in values.windows(2) {
            let threshold = (pair[0] + pair[1]) / 2.0;
            let (left, right): (Vec<usize>, Vec<usize>) =
                indices.iter().partition(|&&i| rows[i][feature] <= threshold);
            let total = sse(targets, &left) + sse(targets, &right);
            if best.as_ref().map_or(true, |b| total < b.sse) {
                best = Some(SplitCandidate {
                    feature,
                    threshold,
                    sse: total,
                });
            }
        }
    }

    best
}

fn grow(
    rows: &[Vec<f64>],
    targets: &[f64],
    indices: &[usize],
    depth: usize,
    params: &ForestParams,
) -> Node {
    let leaf = Node::Leaf {
        value: mean(indices.iter().map(|&i| targets[i])),
    };

    let depth_reached = params.max_depth.is_some_and(|max| depth >= max);
    if indices.len() < params.min_samples_split || depth_reached {
        return leaf;
    }

    let parent_sse = sse(targets, indices);
    if parent_sse <= f64::EPSILON {
        return leaf;
    }

    match best_split(rows, targets, indices) {
        Some(split) if split.sse < parent_sse - f64::EPSILON => {
            let (left, right): (Vec<usize>, Vec<usize>) = indices
                .iter()
                .partition(|&&i| rows[i][split.feature] <= split.threshold);
            Node::Split {
                feature: split.feature,
                threshold: split.threshold,
                left: Box::new(grow(rows, targets, &left, depth + 1, params)),
                right: Box::new(grow(rows, targets, &right, depth + 1, params)),
            }
        }
        _ => leaf,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForestRegressor {
    params: ForestParams,
    n_features: usize,
    trees: Vec<Node>,
}

impl RandomForestRegressor {
    pub fn fit(
        rows: &[Vec<f64>],
        targets: &[f64],
        params: ForestParams,
    ) -> Result<Self, AnalysisError> {
        if rows.is_empty() {
            return Err(AnalysisError::Training(
                "cannot fit regressor on zero samples".to_string(),
            ));
        }
        if rows.len() != targets.len() {
            return Err(AnalysisError::Training(format!(
                "{} rows but {} targets",
                rows.len(),
                targets.len()
            )));
        }
        if params.n_trees == 0 {
            return Err(AnalysisError::Training(
                "forest needs at least one tree".to_string(),
            ));
        }
        let n_features = rows[0].len();
        if rows.iter().any(|r| r.len() != n_features) {
            return Err(AnalysisError::Training(
                "training rows have inconsistent widths".to_string(),
            ));
        }

        let mut rng = StdRng::seed_from_u64(params.seed);
        let n = rows.len();
        let trees = (0..params.n_trees)
            .map(|_| {
                let sample: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
                grow(rows, targets, &sample, 0, &params)
            })
            .collect();

        Ok(Self {
            params,
            n_features,
            trees,
        })
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn predict(&self, row: &[f64]) -> Result<f64, AnalysisError> {
        if row.len() != self.n_features {
            return Err(AnalysisError::Inference(format!(
                "regressor expects {} features, got {}",
                self.n_features,
                row.len()
            )));
        }
        if self.trees.is_empty() {
            return Err(AnalysisError::Inference("forest has no trees".to_string()));
        }
        Ok(mean(self.trees.iter().map(|t| t.predict(row))))
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.trees.is_empty() {
            return Err(AnalysisError::Artifact("forest has no trees".to_string()));
        }
        let out_of_range = self
            .trees
            .iter()
            .filter_map(Node::max_feature)
            .any(|f| f >= self.n_features);
        if out_of_range {
            return Err(AnalysisError::Artifact(
                "tree splits on a feature outside the input width".to_string(),
            ));
        }
        Ok(())
    }
}

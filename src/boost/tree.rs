//! Depth-limited regression trees fit to residuals.
//!
//! Splits are found by exact greedy search: every feature, every boundary
//! between distinct adjacent values, maximizing squared-error reduction.
//! Ties keep the first candidate in feature order, so a fit is fully
//! deterministic for a given input.

use ndarray::{Array2, ArrayView1};

/// Gains below this are treated as no gain at all; they stop pure or
/// float-dust nodes from splitting.
const MIN_GAIN: f64 = 1e-12;

#[derive(Debug, Clone)]
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

/// One regression tree of the boosting ensemble.
#[derive(Debug, Clone)]
pub struct RegressionTree {
    root: Node,
}

impl RegressionTree {
    /// Fits a tree to `residuals` over all rows of `features`.
    pub(crate) fn fit(features: &Array2<f64>, residuals: &[f64], max_depth: usize) -> Self {
        let rows: Vec<usize> = (0..features.nrows()).collect();
        Self {
            root: build_node(features, residuals, rows, max_depth),
        }
    }

    pub(crate) fn predict_row(&self, row: ArrayView1<'_, f64>) -> f64 {
        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf { value } => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[*feature] <= *threshold { left } else { right };
                }
            }
        }
    }

    /// Adds this tree's split decisions into `counts`, one slot per
    /// feature.
    pub(crate) fn accumulate_split_counts(&self, counts: &mut [u64]) {
        fn walk(node: &Node, counts: &mut [u64]) {
            if let Node::Split {
                feature,
                left,
                right,
                ..
            } = node
            {
                counts[*feature] += 1;
                walk(left, counts);
                walk(right, counts);
            }
        }
        walk(&self.root, counts);
    }
}

fn build_node(
    features: &Array2<f64>,
    residuals: &[f64],
    rows: Vec<usize>,
    depth_left: usize,
) -> Node {
    let mean = rows.iter().map(|&r| residuals[r]).sum::<f64>() / rows.len() as f64;
    if depth_left == 0 || rows.len() < 2 {
        return Node::Leaf { value: mean };
    }
    let Some(split) = best_split(features, residuals, &rows) else {
        return Node::Leaf { value: mean };
    };

    let (left_rows, right_rows): (Vec<usize>, Vec<usize>) = rows
        .into_iter()
        .partition(|&r| features[[r, split.feature]] <= split.threshold);
    Node::Split {
        feature: split.feature,
        threshold: split.threshold,
        left: Box::new(build_node(features, residuals, left_rows, depth_left - 1)),
        right: Box::new(build_node(features, residuals, right_rows, depth_left - 1)),
    }
}

struct SplitCandidate {
    feature: usize,
    threshold: f64,
    gain: f64,
}

/// Best single split over the given rows, or `None` when no boundary
/// reduces squared error.
fn best_split(features: &Array2<f64>, residuals: &[f64], rows: &[usize]) -> Option<SplitCandidate> {
    let n = rows.len() as f64;
    let total_sum: f64 = rows.iter().map(|&r| residuals[r]).sum();
    let total_sq: f64 = rows.iter().map(|&r| residuals[r] * residuals[r]).sum();
    let parent_sse = total_sq - total_sum * total_sum / n;

    let mut best: Option<SplitCandidate> = None;
    for feature in 0..features.ncols() {
        let mut order = rows.to_vec();
        order.sort_by(|&a, &b| features[[a, feature]].total_cmp(&features[[b, feature]]));

        let mut left_sum = 0.0;
        let mut left_sq = 0.0;
        for i in 0..order.len() - 1 {
            let y = residuals[order[i]];
            left_sum += y;
            left_sq += y * y;

            let here = features[[order[i], feature]];
            let next = features[[order[i + 1], feature]];
            if next <= here {
                // no boundary between equal values
                continue;
            }

            let n_left = (i + 1) as f64;
            let n_right = n - n_left;
            let left_sse = left_sq - left_sum * left_sum / n_left;
            let right_sum = total_sum - left_sum;
            let right_sq = total_sq - left_sq;
            let right_sse = right_sq - right_sum * right_sum / n_right;
            let gain = parent_sse - left_sse - right_sse;

            let current_best = best.as_ref().map_or(MIN_GAIN, |b| b.gain);
            if gain > current_best {
                best = Some(SplitCandidate {
                    feature,
                    threshold: 0.5 * (here + next),
                    gain,
                });
            }
        }
    }
    best
}

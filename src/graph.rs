//! Dependency graph construction.
//!
//! The importance table is dense and mostly noise; the graph keeps only
//! the edges that clear a contribution threshold. Every channel stays in
//! the node list even when isolated, so downstream visualization can show
//! channels that predict nothing and are predicted by nothing.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::xcorr::ImportanceTable;

/// Contribution scores below this produce no edge.
pub const DEFAULT_EDGE_THRESHOLD: f64 = 0.05;

/// One channel node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
}

/// One directed edge: `source` contributed `value` when predicting
/// `target`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
    pub value: f64,
}

/// Thresholded dependency graph in node/link form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependencyGraph {
    pub threshold: f64,
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

impl DependencyGraph {
    /// Builds the graph from an importance table, keeping edges whose
    /// score is at least `threshold`.
    ///
    /// Rows absent from the table (targets never analyzed) simply
    /// produce no incoming edges.
    pub fn from_importance(table: &ImportanceTable, threshold: f64) -> Self {
        let nodes = table
            .columns
            .iter()
            .map(|name| GraphNode { id: name.clone() })
            .collect();

        let mut links = Vec::new();
        for row in &table.rows {
            for (predictor, &score) in table.columns.iter().zip(row.scores.iter()) {
                if predictor == &row.target || score < threshold {
                    continue;
                }
                links.push(GraphLink {
                    source: predictor.clone(),
                    target: row.target.clone(),
                    value: score,
                });
            }
        }
        Self {
            threshold,
            nodes,
            links,
        }
    }

    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn n_links(&self) -> usize {
        self.links.len()
    }

    /// Edges arriving at `target`, strongest first.
    pub fn incoming(&self, target: &str) -> Vec<&GraphLink> {
        let mut edges: Vec<&GraphLink> = self
            .links
            .iter()
            .filter(|link| link.target == target)
            .collect();
        edges.sort_by(|a, b| b.value.total_cmp(&a.value));
        edges
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Writes the graph, creating the parent directory if needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xcorr::ImportanceMatrix;
    use std::collections::BTreeMap;

    fn three_channel_table() -> ImportanceTable {
        let names: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        let mut matrix = ImportanceMatrix::new(&names);
        let row = |pairs: &[(&str, f64)]| -> BTreeMap<String, f64> {
            pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
        };
        matrix
            .set_row("a", &row(&[("b", 0.9), ("c", 0.1)]))
            .expect("row should install");
        matrix
            .set_row("b", &row(&[("a", 0.96), ("c", 0.04)]))
            .expect("row should install");
        matrix
            .set_row("c", &row(&[("a", 0.5), ("b", 0.5)]))
            .expect("row should install");
        matrix.as_table()
    }

    #[test]
    fn test_threshold_filters_edges() {
        let graph = DependencyGraph::from_importance(&three_channel_table(), 0.05);

        assert_eq!(graph.n_nodes(), 3);
        // the 0.04 edge is cut, the rest survive
        assert_eq!(graph.n_links(), 5);
        assert!(!graph
            .links
            .iter()
            .any(|l| l.source == "c" && l.target == "b"));
    }

    #[test]
    fn test_edge_direction_is_predictor_to_target() {
        let graph = DependencyGraph::from_importance(&three_channel_table(), 0.5);

        // b scored 0.9 predicting a, so the edge runs b -> a
        assert!(graph
            .links
            .iter()
            .any(|l| l.source == "b" && l.target == "a" && l.value == 0.9));
    }

    #[test]
    fn test_isolated_nodes_are_kept() {
        let graph = DependencyGraph::from_importance(&three_channel_table(), 0.99);
        assert_eq!(graph.n_links(), 0);
        assert_eq!(graph.n_nodes(), 3);
    }

    #[test]
    fn test_sparse_table_produces_no_incoming_edges() {
        let names: Vec<String> = ["a", "b"].iter().map(|s| s.to_string()).collect();
        let mut matrix = ImportanceMatrix::new(&names);
        matrix
            .set_row("a", &[("b".to_string(), 0.8)].into_iter().collect())
            .expect("row should install");

        let graph = DependencyGraph::from_importance(&matrix.as_table(), 0.05);
        assert_eq!(graph.n_nodes(), 2);
        assert_eq!(graph.incoming("a").len(), 1);
        assert!(graph.incoming("b").is_empty());
    }

    #[test]
    fn test_incoming_sorted_strongest_first() {
        let graph = DependencyGraph::from_importance(&three_channel_table(), 0.0);
        let incoming = graph.incoming("c");
        assert_eq!(incoming.len(), 2);
        assert!(incoming[0].value >= incoming[1].value);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let path = dir.path().join("graph").join("graph.json");

        let graph = DependencyGraph::from_importance(&three_channel_table(), 0.05);
        graph.save(&path).expect("save should succeed");
        let restored = DependencyGraph::load(&path).expect("load should succeed");
        assert_eq!(restored, graph);
    }
}

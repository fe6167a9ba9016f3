//! Reference graph over pattern names for cycle detection.
//!
//! This module provides the graph data structure and the cycle check that
//! make fixed-point expansion safe: a dictionary in which pattern `A`
//! references pattern `B` and `B` (directly or transitively) references `A`
//! would expand forever, so the expander builds this graph from the full
//! dictionary and refuses to start when a cycle is present.
//!
//! The graph is rebuilt from the current dictionary state on every compile
//! call; nothing is cached across calls.

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::trace;

use crate::store::PatternMap;
use crate::token::find_placeholders;

/// Adjacency entry for one pattern name.
#[derive(Debug, Clone, Default)]
struct GraphNode {
    /// Names of patterns that reference this one.
    incoming: HashSet<String>,
    /// Names of patterns this one references.
    outgoing: HashSet<String>,
}

/// Directed graph of `referrer -> referenced` edges between pattern names.
///
/// An edge `A -> B` exists iff `B`'s name appears as a placeholder token
/// inside `A`'s template and `B` is a key of the dictionary. Names with no
/// incoming or outgoing edges are not represented as nodes, since they
/// cannot participate in a cycle.
pub struct PatternGraph {
    nodes: HashMap<String, GraphNode>,
}

impl PatternGraph {
    /// Build the reference graph for a pattern dictionary.
    ///
    /// Every template is scanned with the same token grammar the expander
    /// uses. Tokens naming unknown patterns contribute no edge — unresolved
    /// references are the expander's concern, not the graph's. Referencing
    /// the same pattern twice from one template contributes a single edge.
    pub fn build(patterns: &PatternMap) -> Self {
        let mut nodes: HashMap<String, GraphNode> = HashMap::new();

        for (name, template) in patterns {
            for token in find_placeholders(template) {
                if !patterns.contains_key(&token.name) {
                    continue;
                }
                nodes.entry(name.clone()).or_default().outgoing.insert(token.name.clone());
                nodes.entry(token.name).or_default().incoming.insert(name.clone());
            }
        }

        trace!("built pattern graph: {} nodes", nodes.len());
        Self { nodes }
    }

    /// Detect a cycle, returning the name of one implicated pattern.
    ///
    /// Implemented as iterative leaf stripping over a working copy of the
    /// adjacency sets: nodes with no incoming edges are removed repeatedly,
    /// detaching their outgoing edges as they go. A directed graph is
    /// acyclic iff this eventually removes every edge; any node still
    /// carrying an edge afterwards sits on a cycle.
    pub fn find_cycle(&self) -> Option<String> {
        let mut nodes = self.nodes.clone();

        let mut leaves: VecDeque<String> = nodes
            .iter()
            .filter(|(_, node)| node.incoming.is_empty())
            .map(|(name, _)| name.clone())
            .collect();

        while let Some(name) = leaves.pop_front() {
            let Some(node) = nodes.get_mut(&name) else {
                continue;
            };
            let outgoing = std::mem::take(&mut node.outgoing);
            for target in outgoing {
                let Some(target_node) = nodes.get_mut(&target) else {
                    continue;
                };
                target_node.incoming.remove(&name);
                if target_node.incoming.is_empty() {
                    leaves.push_back(target);
                }
            }
        }

        nodes
            .iter()
            .find(|(_, node)| !node.incoming.is_empty() || !node.outgoing.is_empty())
            .map(|(name, _)| name.clone())
    }

    /// Check whether the graph contains any cycle.
    pub fn has_cycles(&self) -> bool {
        self.find_cycle().is_some()
    }

    /// Check if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of pattern names participating in at least one edge.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Total number of reference edges.
    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|node| node.outgoing.len()).sum()
    }
}

//! # Context Builder
//!
//! Summarises a topic's neighbourhood (parents, siblings through those
//! parents, and children) as a short text blob for suggestion prompts.
//! Query-only: nothing here mutates the graph.

use std::fmt::Write as _;

use itertools::Itertools;

use crate::model::{Edge, Node, NodeId};

/// Labels around one focus topic. Each list is in edge order without repeats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicContext {
    pub current: String,
    pub parents: Vec<String>,
    pub siblings: Vec<String>,
    pub children: Vec<String>,
}

impl TopicContext {
    /// Gather the neighbourhood of `focus`, or `None` if it is not in `nodes`.
    pub fn gather(nodes: &[Node], edges: &[Edge], focus: &NodeId) -> Option<Self> {
        let current = nodes.iter().find(|n| n.id() == focus)?;
        let lookup = |id: &NodeId| nodes.iter().find(|n| n.id() == id);

        let parents: Vec<&Node> = edges
            .iter()
            .filter(|e| e.target() == focus)
            .filter_map(|e| lookup(e.source()))
            .unique_by(|n| n.id().clone())
            .collect();

        let siblings = edges
            .iter()
            .filter(|e| parents.iter().any(|p| p.id() == e.source()))
            .filter(|e| e.target() != focus)
            .filter_map(|e| lookup(e.target()))
            .unique_by(|n| n.id().clone());

        let children = edges
            .iter()
            .filter(|e| e.source() == focus)
            .filter_map(|e| lookup(e.target()))
            .unique_by(|n| n.id().clone());

        Some(Self {
            current: current.label().to_string(),
            parents: parents.iter().map(|n| n.label().to_string()).collect(),
            siblings: siblings.map(|n| n.label().to_string()).collect(),
            children: children.map(|n| n.label().to_string()).collect(),
        })
    }

    /// Multi-line summary; sections without members are left out.
    pub fn render(&self) -> String {
        let mut out = format!("Current topic: \"{}\"", self.current);
        for (heading, labels) in [
            ("Parent topics", &self.parents),
            ("Related topics", &self.siblings),
            ("Subtopics", &self.children),
        ] {
            if labels.is_empty() {
                continue;
            }
            let joined = labels.iter().map(|l| format!("\"{l}\"")).join(", ");
            let _ = write!(out, "\n{heading}: {joined}");
        }
        out
    }
}

/// The context blob for `focus`; empty when the node does not exist.
pub fn build_context(nodes: &[Node], edges: &[Edge], focus: &NodeId) -> String {
    TopicContext::gather(nodes, edges, focus)
        .map(|ctx| ctx.render())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::model::{EdgeOptions, NodeData, NodeSize, Position};

    fn id(s: &str) -> NodeId {
        NodeId::new(s).unwrap()
    }

    fn graph(labels: &[(&str, &str)], links: &[(&str, &str)]) -> (Vec<Node>, Vec<Edge>) {
        let nodes = labels
            .iter()
            .map(|(i, l)| Node::new(id(i), Position::origin(), NodeData::new(*l, NodeSize::Small)))
            .collect();
        let edges = links
            .iter()
            .map(|(a, b)| Edge::new(id(a), id(b), EdgeOptions::default()).unwrap())
            .collect();
        (nodes, edges)
    }

    #[test]
    fn test_parent_and_siblings_without_children() {
        let (nodes, edges) = graph(
            &[("p", "Travel"), ("a", "Packing"), ("b", "Flights"), ("c", "Hotels")],
            &[("p", "a"), ("p", "b"), ("p", "c")],
        );

        let context = build_context(&nodes, &edges, &id("a"));

        assert_eq!(
            context,
            "Current topic: \"Packing\"\n\
             Parent topics: \"Travel\"\n\
             Related topics: \"Flights\", \"Hotels\""
        );
        assert!(!context.contains("Subtopics"));
    }

    #[test]
    fn test_root_with_children_only() {
        let (nodes, edges) = graph(&[("1", "Main Topic"), ("2", "Ideas")], &[("1", "2")]);
        let context = build_context(&nodes, &edges, &id("1"));
        assert_eq!(context, "Current topic: \"Main Topic\"\nSubtopics: \"Ideas\"");
    }

    #[test]
    fn test_isolated_topic() {
        let (nodes, edges) = graph(&[("1", "Alone")], &[]);
        assert_eq!(build_context(&nodes, &edges, &id("1")), "Current topic: \"Alone\"");
    }

    #[test]
    fn test_unknown_focus_is_empty() {
        let (nodes, edges) = graph(&[("1", "Main Topic")], &[]);
        assert_eq!(build_context(&nodes, &edges, &id("404")), "");
    }

    #[test]
    fn test_shared_sibling_listed_once() {
        // "s" hangs off both of "a"'s parents.
        let (nodes, edges) = graph(
            &[("p1", "P1"), ("p2", "P2"), ("a", "A"), ("s", "Shared")],
            &[("p1", "a"), ("p2", "a"), ("p1", "s"), ("p2", "s")],
        );
        let ctx = TopicContext::gather(&nodes, &edges, &id("a")).unwrap();
        assert_eq!(ctx.parents, vec!["P1", "P2"]);
        assert_eq!(ctx.siblings, vec!["Shared"]);
        assert!(ctx.children.is_empty());
    }

    #[test]
    fn test_gather_does_not_mutate() {
        let (nodes, edges) = graph(&[("1", "Root"), ("2", "Child")], &[("1", "2")]);
        let (nodes_before, edges_before) = (nodes.clone(), edges.clone());
        let _ = build_context(&nodes, &edges, &id("2"));
        assert_eq!(nodes, nodes_before);
        assert_eq!(edges, edges_before);
    }
}

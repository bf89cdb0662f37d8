//! Scene-graph ordering and nesting.

use std::collections::{HashMap, HashSet};

use tracing::warn;

use crate::types::DesignNode;

/// Order nodes so every parent precedes its children.
///
/// Walks each node's parent chain with an explicit stack. Ids that point
/// at nothing are treated as roots; a parent chain that loops back on
/// itself is cut at the repeated id instead of spinning forever.
pub fn topological_order(nodes: &[DesignNode]) -> Vec<DesignNode> {
    let index: HashMap<&str, &DesignNode> = nodes.iter().map(|n| (n.id.as_str(), n)).collect();

    let mut sorted: Vec<DesignNode> = Vec::with_capacity(nodes.len());
    let mut visited: HashSet<&str> = HashSet::with_capacity(nodes.len());

    for node in nodes {
        if visited.contains(node.id.as_str()) {
            continue;
        }

        // ancestors first, nearest last
        let mut chain: Vec<&DesignNode> = Vec::new();
        let mut on_chain: HashSet<&str> = HashSet::new();
        let mut current = Some(node);
        while let Some(n) = current {
            if visited.contains(n.id.as_str()) || !on_chain.insert(n.id.as_str()) {
                break;
            }
            chain.push(n);
            current = n
                .parent_id
                .as_deref()
                .and_then(|pid| index.get(pid).copied());
        }

        for n in chain.into_iter().rev() {
            if visited.insert(n.id.as_str()) {
                sorted.push(n.clone());
            }
        }
    }

    sorted
}

/// A design node with its children nested in place.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct DesignNodeTree {
    #[serde(flatten)]
    pub node: DesignNode,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DesignNodeTree>,
}

/// Nest a flat node list into a single tree rooted at the parentless node.
///
/// When every node claims a parent the first node becomes the root; that
/// choice is arbitrary and logged so malformed captures stay diagnosable.
pub fn build_nested_tree(nodes: &[DesignNode]) -> Option<DesignNodeTree> {
    if nodes.is_empty() {
        return None;
    }

    let ids: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
    let root_id = nodes
        .iter()
        .find(|n| {
            n.parent_id
                .as_deref()
                .map_or(true, |pid| !ids.contains(pid))
        })
        .map(|n| n.id.as_str())
        .unwrap_or_else(|| {
            warn!(
                fallback_root = %nodes[0].id,
                "no parentless node found, using the first node as root"
            );
            nodes[0].id.as_str()
        });

    let ordered = topological_order(nodes);

    // assemble bottom-up: reverse topological order guarantees all of a
    // node's children are finished before the node itself is attached
    let mut pending: HashMap<String, Vec<DesignNodeTree>> = HashMap::new();
    let mut root: Option<DesignNodeTree> = None;
    for node in ordered.into_iter().rev() {
        let id = node.id.clone();
        let parent_id = node.parent_id.clone();
        let subtree = DesignNodeTree {
            children: pending.remove(&id).unwrap_or_default(),
            node,
        };
        if id == root_id {
            root = Some(subtree);
        } else if let Some(pid) = parent_id {
            pending.entry(pid).or_default().push(subtree);
        }
    }

    // children were collected in reverse order
    if let Some(tree) = root.as_mut() {
        let mut stack: Vec<&mut DesignNodeTree> = vec![tree];
        while let Some(current) = stack.pop() {
            current.children.reverse();
            stack.extend(current.children.iter_mut());
        }
    }

    root
}

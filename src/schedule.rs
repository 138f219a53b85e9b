use crate::graph::{Graph, NodeId};
use ahash::AHashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Orders the graph's nodes so every node comes after all of its upstream
/// dependencies.
///
/// Depth-first with three-colour marking: a node is emitted once all nodes
/// feeding it are emitted. Reaching a node that is still in progress means the
/// graph contains a cycle, in which case `None` is returned.
///
/// The result is deterministic for a given node and connection insertion order.
/// Independent branches have no prescribed relative order.
pub fn topological_sort(graph: &Graph) -> Option<Vec<NodeId>> {
    let nodes = graph.nodes();
    let index: AHashMap<NodeId, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, node)| (node.id, i))
        .collect();

    let mut upstream: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
    for conn in graph.connections() {
        if let (Some(&from), Some(&to)) = (index.get(&conn.from_node), index.get(&conn.to_node)) {
            upstream[to].push(from);
        }
    }

    let mut marks = vec![Mark::Unvisited; nodes.len()];
    let mut order = Vec::with_capacity(nodes.len());
    // Explicit (node, next upstream cursor) stack keeps deep chains off the call stack.
    let mut stack: Vec<(usize, usize)> = Vec::new();
    for root in 0..nodes.len() {
        if marks[root] != Mark::Unvisited {
            continue;
        }
        marks[root] = Mark::InProgress;
        stack.push((root, 0));

        while let Some((node, cursor)) = stack.last_mut() {
            let node = *node;
            match upstream[node].get(*cursor) {
                Some(&dep) => {
                    *cursor += 1;
                    match marks[dep] {
                        Mark::Done => {}
                        Mark::InProgress => {
                            tracing::debug!("Cycle detected while visiting node {}", nodes[dep].id);
                            return None;
                        }
                        Mark::Unvisited => {
                            marks[dep] = Mark::InProgress;
                            stack.push((dep, 0));
                        }
                    }
                }
                None => {
                    marks[node] = Mark::Done;
                    order.push(node);
                    stack.pop();
                }
            }
        }
    }

    Some(order.into_iter().map(|i| nodes[i].id).collect())
}

impl Graph {
    /// See [`topological_sort`].
    pub fn execution_order(&self) -> Option<Vec<NodeId>> {
        topological_sort(self)
    }

    pub fn has_cycle(&self) -> bool {
        self.execution_order().is_none()
    }
}

//! Per-input conduction trees.
//!
//! Every input node roots its own tree, built once by a depth-first walk of
//! the intermediate graph starting from that node. An edge is added for
//! every transistor that can be reached without re-entering a node already
//! on the current path and without tripping the forbidden-pattern rule
//! below. The tree is read-only after construction; only the `state` field
//! on each [`TreeNode`] changes as the simulation runs.
//!
//! The walk is iterative rather than recursive — a large transistor fan-out
//! would otherwise risk exhausting the call stack — using an explicit stack
//! of frames, each a tree node plus a cursor into that node's list of
//! graph-terminal transistors still to consider.

use crate::graph::Graph;
use crate::ids::{FetId, LinkId, NodeId, TreeNodeId};
use crate::lattice::NodeState;
use crate::runtime::RuntimeState;
use index_vec::IndexVec;

/// One node's position within a conduction tree.
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub node: NodeId,
    /// The link used to reach this tree node from its parent. `None` only
    /// for the tree's root.
    pub upstream: Option<LinkId>,
    pub downstream: Vec<LinkId>,
    pub state: NodeState,
    listed: bool,
}

/// One edge of a conduction tree: the transistor whose channel this edge
/// crosses, and the tree nodes on either side of it.
#[derive(Debug, Clone, Copy)]
pub struct PathLink {
    pub fet: FetId,
    pub upstream: TreeNodeId,
    pub downstream: TreeNodeId,
}

/// The conduction tree rooted at a single input node.
#[derive(Debug, Clone)]
pub struct ConductionTree {
    pub nodes: IndexVec<TreeNodeId, TreeNode>,
    pub links: IndexVec<LinkId, PathLink>,
    pub root: TreeNodeId,
}

impl ConductionTree {
    pub fn node_state(&self, id: TreeNodeId) -> NodeState {
        self.nodes[id].state
    }

    pub fn is_listed(&self, id: TreeNodeId) -> bool {
        self.nodes[id].listed
    }

    pub fn set_listed(&mut self, id: TreeNodeId, listed: bool) {
        self.nodes[id].listed = listed;
    }

    pub fn set_state(&mut self, id: TreeNodeId, state: NodeState) {
        self.nodes[id].state = state;
    }
}

/// Whether an edge from `current` across `candidate` to a not-yet-visited
/// node is allowed, per the forbidden-pattern rule.
///
/// Walk from `current` back towards the tree's root, one ancestor edge at a
/// time. At each step, stop and reject if either:
///
///   - the ancestor edge's transistor shares `candidate`'s gate node but is
///     of the opposite polarity (an N/P pair gated by the same node,
///     already crossed once, would let the new edge double back through its
///     complementary half), or
///   - the tree node currently being examined sits on `candidate`'s own
///     gate node (descending further would route the tree through a node
///     that controls the very transistor being added).
///
/// Reaching the root without tripping either condition means the edge is
/// allowed.
fn forbidden_pattern_blocks(
    tree: &ConductionTree,
    runtime: &RuntimeState,
    current: TreeNodeId,
    candidate: FetId,
) -> bool {
    let candidate_gate = runtime.fets[candidate].gate;
    let candidate_kind = runtime.fets[candidate].kind;

    let mut el = current;
    loop {
        let Some(link_id) = tree.nodes[el].upstream else {
            return false; // reached the root: allowed
        };
        let link = &tree.links[link_id];
        let ancestor = &runtime.fets[link.fet];
        let distinct_pair = ancestor.gate == candidate_gate && ancestor.kind != candidate_kind;
        let standing_on_gate = tree.nodes[el].node == candidate_gate;
        if distinct_pair || standing_on_gate {
            return true; // blocked
        }
        el = link.upstream;
    }
}

/// Builds the conduction tree rooted at `root_node`, marking it as an input
/// in `runtime` and registering every link it creates against the
/// transistor it crosses.
pub fn build(
    graph: &Graph,
    runtime: &mut RuntimeState,
    this_input: crate::ids::InputIdx,
    root_node: NodeId,
) -> ConductionTree {
    let mut nodes = IndexVec::new();
    let mut links = IndexVec::new();
    let root = nodes.push(TreeNode {
        node: root_node,
        upstream: None,
        downstream: Vec::new(),
        state: NodeState::Undriven,
        listed: false,
    });

    let mut tree = ConductionTree { nodes, links, root };

    let mut visited = vec![false; graph.nodes.len()];
    visited[root_node.index()] = true;

    struct Frame {
        tree_node: TreeNodeId,
        node: NodeId,
        cursor: usize,
    }
    let mut stack = vec![Frame {
        tree_node: root,
        node: root_node,
        cursor: 0,
    }];

    while let Some(frame) = stack.last_mut() {
        let candidates = &graph.nodes[frame.node].terminal_fets;
        if frame.cursor >= candidates.len() {
            visited[frame.node.index()] = false;
            stack.pop();
            continue;
        }
        let candidate = candidates[frame.cursor];
        frame.cursor += 1;

        let other = graph.other_terminal(candidate, frame.node);
        if visited[other.index()] {
            continue;
        }
        if forbidden_pattern_blocks(&tree, runtime, frame.tree_node, candidate) {
            continue;
        }

        let parent = frame.tree_node;
        let child = tree.nodes.push(TreeNode {
            node: other,
            upstream: None,
            downstream: Vec::new(),
            state: NodeState::Undriven,
            listed: false,
        });
        let link = tree.links.push(PathLink {
            fet: candidate,
            upstream: parent,
            downstream: child,
        });
        tree.nodes[child].upstream = Some(link);
        tree.nodes[parent].downstream.push(link);
        runtime.fets[candidate].links.push((this_input, link));

        visited[other.index()] = true;
        stack.push(Frame {
            tree_node: child,
            node: other,
            cursor: 0,
        });
    }

    runtime.nodes[root_node].state = NodeState::Undriven;
    tree
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::FetKind;
    use crate::netlist::{Netlist, Transistor};

    fn inverter_graph() -> Graph {
        let netlist = Netlist {
            transistors: vec![
                Transistor {
                    kind: FetKind::P,
                    gate: 2,
                    source: 1,
                    drain: 3,
                },
                Transistor {
                    kind: FetKind::N,
                    gate: 2,
                    source: 3,
                    drain: 0,
                },
            ],
            inputs: vec![0, 1, 2],
            outputs: vec![3],
        };
        Graph::build(&netlist)
    }

    #[test]
    fn tree_rooted_at_gate_reaches_both_fets() {
        let graph = inverter_graph();
        let mut runtime = RuntimeState::build(&graph);
        let tree = build(
            &graph,
            &mut runtime,
            crate::ids::InputIdx::from_usize(2),
            NodeId::from_usize(2),
        );
        assert_eq!(tree.links.len(), 2);
        assert_eq!(tree.nodes[tree.root].node, NodeId::from_usize(2));
    }

    #[test]
    fn forbidden_pattern_rejects_complementary_pair_on_same_gate() {
        // root(0) --fetX(N,gate=1)--> node(2) --fetY(P,gate=1)--> node(3)
        // fetY shares fetX's gate but is the opposite polarity, so the walk
        // back from node 2 towards the root stops at that ancestor edge and
        // the second hop to node 3 is rejected.
        let netlist = Netlist {
            transistors: vec![
                Transistor {
                    kind: FetKind::N,
                    gate: 1,
                    source: 0,
                    drain: 2,
                },
                Transistor {
                    kind: FetKind::P,
                    gate: 1,
                    source: 2,
                    drain: 3,
                },
            ],
            inputs: vec![0],
            outputs: vec![3],
        };
        let graph = Graph::build(&netlist);
        let mut runtime = RuntimeState::build(&graph);
        let tree = build(
            &graph,
            &mut runtime,
            crate::ids::InputIdx::from_usize(0),
            NodeId::from_usize(0),
        );
        assert_eq!(tree.links.len(), 1);
    }
}

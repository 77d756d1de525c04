//! The intermediate graph: a read-only scaffold built once from a
//! [`Netlist`], giving every node and transistor a stable arena index and
//! recording, per node, which transistors gate it and which are attached to
//! it by a source/drain terminal.
//!
//! Sizing happens in the same two passes as the original: a first pass over
//! the transistor list counts how many transistors touch each node, then a
//! second pass fills already-capacity-reserved per-node lists, so no node's
//! list is repeatedly reallocated as it grows.

use crate::ids::{FetId, NodeId};
use crate::lattice::FetKind;
use crate::netlist::Netlist;
use index_vec::IndexVec;

/// One node's attachments within the graph.
#[derive(Debug, Clone, Default)]
pub struct GraphNode {
    /// Transistors whose gate terminal is this node.
    pub gate_fets: Vec<FetId>,
    /// Transistors with a source or drain terminal on this node. This is
    /// the list [`crate::tree`] walks when extending a conduction tree.
    pub terminal_fets: Vec<FetId>,
}

/// One transistor's endpoints, translated from the netlist's raw `usize`
/// node indices into arena-backed [`NodeId`]s.
#[derive(Debug, Clone, Copy)]
pub struct GraphFet {
    pub kind: FetKind,
    pub gate: NodeId,
    pub terminals: [NodeId; 2],
}

/// The intermediate graph: every node and transistor from a netlist, with
/// indices resolved and adjacency precomputed.
#[derive(Debug, Clone)]
pub struct Graph {
    pub nodes: IndexVec<NodeId, GraphNode>,
    pub fets: IndexVec<FetId, GraphFet>,
}

impl Graph {
    pub fn build(netlist: &Netlist) -> Graph {
        let node_count = netlist.node_count();

        let mut gate_counts = vec![0usize; node_count];
        let mut terminal_counts = vec![0usize; node_count];
        for fet in &netlist.transistors {
            gate_counts[fet.gate] += 1;
            terminal_counts[fet.source] += 1;
            terminal_counts[fet.drain] += 1;
        }

        let mut nodes: IndexVec<NodeId, GraphNode> = gate_counts
            .iter()
            .zip(&terminal_counts)
            .map(|(&gate, &terminal)| GraphNode {
                gate_fets: Vec::with_capacity(gate),
                terminal_fets: Vec::with_capacity(terminal),
            })
            .collect();

        let mut fets = IndexVec::with_capacity(netlist.transistors.len());
        for fet in &netlist.transistors {
            let gate = NodeId::from_usize(fet.gate);
            let source = NodeId::from_usize(fet.source);
            let drain = NodeId::from_usize(fet.drain);
            let fet_id = fets.push(GraphFet {
                kind: fet.kind,
                gate,
                terminals: [source, drain],
            });
            nodes[gate].gate_fets.push(fet_id);
            nodes[source].terminal_fets.push(fet_id);
            nodes[drain].terminal_fets.push(fet_id);
        }

        Graph { nodes, fets }
    }

    /// The terminal of `fet` that isn't `from`. Source and drain are
    /// interchangeable, so this is always well-defined even for a
    /// transistor whose source and drain are the same node.
    pub fn other_terminal(&self, fet: FetId, from: NodeId) -> NodeId {
        let terminals = self.fets[fet].terminals;
        if from == terminals[0] {
            terminals[1]
        } else {
            terminals[0]
        }
    }
}

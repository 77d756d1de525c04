//! Mutable simulation state: one drive tally per node, one conduction state
//! per transistor, and the transistor worklist that drives phase one of
//! [`crate::session::Session::resolve`].
//!
//! Everything here is sized once from a [`crate::graph::Graph`] and then
//! only ever mutated in place — no node or transistor is ever added or
//! removed after a [`crate::session::Session`] is built.

use crate::graph::Graph;
use crate::ids::{FetId, NodeId};
use crate::lattice::{FetKind, FetState, NodeState};
use index_vec::IndexVec;
use std::collections::VecDeque;

/// A node's four drive counters (`[low, high, unstable_low,
/// unstable_high]`) plus its last-resolved state, cached so re-deriving it
/// from the counters is only needed when a counter actually changes.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuntimeNode {
    counts: [u32; 4],
    pub state: NodeState,
}

/// A transistor's current conduction state plus its membership in the
/// dirty-transistor worklist. `links` records every conduction-tree link
/// that this transistor carries current across — a single transistor can
/// appear in more than one input's tree, so this is a list, not a single
/// link.
#[derive(Debug, Clone)]
pub struct RuntimeTransistor {
    pub kind: FetKind,
    pub gate: NodeId,
    pub state: FetState,
    listed: bool,
    pub links: Vec<(crate::ids::InputIdx, crate::ids::LinkId)>,
}

/// Owns every node's drive tally and every transistor's conduction state,
/// plus the FIFO queue of transistors whose conduction state needs
/// recomputing.
#[derive(Debug)]
pub struct RuntimeState {
    pub nodes: IndexVec<NodeId, RuntimeNode>,
    pub fets: IndexVec<FetId, RuntimeTransistor>,
    fet_queue: VecDeque<FetId>,
}

impl RuntimeState {
    pub fn build(graph: &Graph) -> RuntimeState {
        let nodes = graph.nodes.iter().map(|_| RuntimeNode::default()).collect();
        let fets = graph
            .fets
            .iter()
            .map(|fet| RuntimeTransistor {
                kind: fet.kind,
                gate: fet.gate,
                // Every transistor starts Unstable: its gate is Undriven
                // until an input is set, and `FetState::recompute` maps
                // Undriven to Unstable for both polarities.
                state: FetState::Unstable,
                listed: false,
                links: Vec::new(),
            })
            .collect();
        RuntimeState {
            nodes,
            fets,
            fet_queue: VecDeque::new(),
        }
    }

    /// Adds or removes one drive of `state` from `node`'s tally and
    /// refreshes its cached resolved state. A no-op for the two derived
    /// states, which are never themselves driven onto a node.
    pub fn adjust_drive(&mut self, node: NodeId, state: NodeState, added: bool) {
        if let Some(slot) = state.drive_index() {
            let counts = &mut self.nodes[node].counts;
            if added {
                counts[slot] += 1;
            } else {
                debug_assert!(counts[slot] > 0, "removed a drive that was never added");
                counts[slot] -= 1;
            }
            self.nodes[node].state = NodeState::from_counts(*counts);
        }
    }

    pub fn enqueue_fet(&mut self, fet: FetId) {
        let entry = &mut self.fets[fet];
        if !entry.listed {
            entry.listed = true;
            self.fet_queue.push_back(fet);
        }
    }

    pub fn pop_fet(&mut self) -> Option<FetId> {
        let fet = self.fet_queue.pop_front()?;
        self.fets[fet].listed = false;
        Some(fet)
    }

    pub fn fet_queue_is_empty(&self) -> bool {
        self.fet_queue.is_empty()
    }
}

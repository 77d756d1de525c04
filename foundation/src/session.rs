//! The public façade: build a session from a netlist, drive its inputs,
//! step the resolver, and read its outputs back.
//!
//! A [`Session`] owns the intermediate graph, the runtime state, and every
//! input's conduction tree. There is no separate teardown operation — all
//! three are plain owned arenas with no `Rc`/`RefCell` cycles between them,
//! so dropping the `Session` value is teardown.

use crate::error::SimError;
use crate::graph::Graph;
use crate::ids::{InputIdx, OutputIdx, TreeNodeId};
use crate::lattice::{self, NodeState};
use crate::netlist::Netlist;
use crate::runtime::RuntimeState;
use crate::tree::{self, ConductionTree};
use index_vec::IndexVec;
use std::collections::VecDeque;

/// A live simulation built from one netlist: its intermediate graph, its
/// runtime node/transistor state, and one conduction tree per input.
pub struct Session {
    graph: Graph,
    runtime: RuntimeState,
    trees: IndexVec<InputIdx, ConductionTree>,
    outputs: IndexVec<OutputIdx, crate::ids::NodeId>,
    tree_queue: VecDeque<(InputIdx, TreeNodeId)>,
}

impl Session {
    /// Builds a session from a netlist: the intermediate graph, one
    /// conduction tree per input (in input-list order), and a runtime state
    /// with every node `Undriven` and every transistor `Unstable`.
    pub fn build(netlist: &Netlist) -> Session {
        let graph = Graph::build(netlist);
        let mut runtime = RuntimeState::build(&graph);

        let mut trees = IndexVec::with_capacity(netlist.inputs.len());
        for (ordinal, &node) in netlist.inputs.iter().enumerate() {
            let input_idx = InputIdx::from_usize(ordinal);
            let root = crate::ids::NodeId::from_usize(node);
            trees.push(tree::build(&graph, &mut runtime, input_idx, root));
        }

        let outputs = netlist
            .outputs
            .iter()
            .map(|&n| crate::ids::NodeId::from_usize(n))
            .collect();

        Session {
            graph,
            runtime,
            trees,
            outputs,
            tree_queue: VecDeque::new(),
        }
    }

    /// The number of inputs this session was built with, i.e. the valid
    /// range of ordinals for [`Session::set_input`].
    pub fn input_count(&self) -> usize {
        self.trees.len()
    }

    /// The number of outputs this session was built with, i.e. the valid
    /// range of ordinals for [`Session::read_output`].
    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    /// Drives `state` onto the input at `input` (an ordinal into the
    /// netlist's input list, not a node index).
    pub fn set_input(&mut self, input: usize, state: NodeState) -> Result<(), SimError> {
        if input >= self.trees.len() {
            return Err(SimError::PARAM);
        }
        let input_idx = InputIdx::from_usize(input);
        let root = self.trees[input_idx].root;
        self.set_tree_node_state(input_idx, root, state);
        Ok(())
    }

    /// Reads the current resolved state of the output at `output` (an
    /// ordinal into the netlist's output list).
    pub fn read_output(&self, output: usize) -> Result<NodeState, SimError> {
        if output >= self.outputs.len() {
            return Err(SimError::PARAM);
        }
        let node = self.outputs[OutputIdx::from_usize(output)];
        Ok(self.runtime.nodes[node].state)
    }

    /// The number of nodes currently resolved to `UnstableMultiple`, i.e.
    /// genuinely multiply-driven.
    pub fn count_multi_driven(&self) -> usize {
        self.runtime
            .nodes
            .iter()
            .filter(|node| node.state == NodeState::UnstableMultiple)
            .count()
    }

    /// One resolution step: drains the dirty-transistor worklist, then
    /// drains the dirty-tree-node worklist it may have fed, then reports
    /// whether the transistor worklist ended the step empty. A fixed point
    /// is reached once this returns `true`; the tree-node worklist reaching
    /// empty is not itself sufficient, since settling tree nodes can still
    /// flip a transistor's conduction state and refill the transistor
    /// worklist for the next call.
    pub fn resolve(&mut self) -> bool {
        while let Some(fet_id) = self.runtime.pop_fet() {
            let gate = self.runtime.fets[fet_id].gate;
            let gate_state = self.runtime.nodes[gate].state;
            let kind = self.runtime.fets[fet_id].kind;
            let new_state = crate::lattice::FetState::recompute(kind, gate_state);
            if new_state == self.runtime.fets[fet_id].state {
                continue;
            }
            self.runtime.fets[fet_id].state = new_state;
            let links = self.runtime.fets[fet_id].links.clone();
            for (input, link_id) in links {
                let child = self.trees[input].links[link_id].downstream;
                if !self.trees[input].is_listed(child) {
                    self.trees[input].set_listed(child, true);
                    self.tree_queue.push_back((input, child));
                }
            }
        }

        while let Some((input, tree_node)) = self.tree_queue.pop_front() {
            self.trees[input].set_listed(tree_node, false);
            let link_id = self.trees[input].nodes[tree_node]
                .upstream
                .expect("only non-root tree nodes are ever queued");
            let link = self.trees[input].links[link_id];
            let upstream_state = self.trees[input].node_state(link.upstream);
            let fet_kind = self.runtime.fets[link.fet].kind;
            let fet_state = self.runtime.fets[link.fet].state;
            let computed = lattice::link_output(fet_kind, fet_state, upstream_state);
            self.set_tree_node_state(input, tree_node, computed);
        }

        self.runtime.fet_queue_is_empty()
    }

    /// Calls `resolve` in a loop until it reports a fixed point, or until
    /// `max_steps` is exceeded (when given), returning the number of steps
    /// taken. The plain CLI demo calls this with no cap; the vector-
    /// simulation driver instead loops `resolve` itself so its cap can
    /// accumulate across every row rather than resetting per call.
    pub fn resolve_to_fixed_point(&mut self, max_steps: Option<usize>) -> Result<usize, SimError> {
        let mut steps = 0usize;
        loop {
            if max_steps.is_some_and(|limit| steps >= limit) {
                return Err(SimError::TIMEOUT);
            }
            let resolved = self.resolve();
            steps += 1;
            if resolved {
                return Ok(steps);
            }
        }
    }

    fn set_tree_node_state(&mut self, input: InputIdx, tree_node: TreeNodeId, new_state: NodeState) {
        let old_state = self.trees[input].node_state(tree_node);
        if old_state == new_state {
            return;
        }
        let underlying = self.trees[input].nodes[tree_node].node;
        self.trees[input].set_state(tree_node, new_state);

        self.runtime.adjust_drive(underlying, old_state, false);
        self.runtime.adjust_drive(underlying, new_state, true);

        let downstream = self.trees[input].nodes[tree_node].downstream.clone();
        for link_id in downstream {
            let child = self.trees[input].links[link_id].downstream;
            if !self.trees[input].is_listed(child) {
                self.trees[input].set_listed(child, true);
                self.tree_queue.push_back((input, child));
            }
        }

        for fet_id in self.graph.nodes[underlying].gate_fets.clone() {
            self.runtime.enqueue_fet(fet_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::FetKind;
    use crate::netlist::Transistor;

    fn inverter() -> Netlist {
        Netlist {
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
        }
    }

    #[test]
    fn cmos_inverter_inverts() {
        let mut session = Session::build(&inverter());
        session.set_input(0, NodeState::Low).unwrap();
        session.set_input(1, NodeState::High).unwrap();
        session.set_input(2, NodeState::Low).unwrap();
        session.resolve_to_fixed_point(None).unwrap();
        assert_eq!(session.read_output(0).unwrap(), NodeState::High);

        session.set_input(2, NodeState::High).unwrap();
        session.resolve_to_fixed_point(None).unwrap();
        assert_eq!(session.read_output(0).unwrap(), NodeState::Low);
    }

    #[test]
    fn direct_short_between_ground_and_supply_is_multiply_driven() {
        // A single N-fet permanently closed (gate tied to its own source,
        // driven High) straps node 0 (Low) straight to node 1 (High).
        let netlist = Netlist {
            transistors: vec![Transistor {
                kind: FetKind::N,
                gate: 2,
                source: 0,
                drain: 1,
            }],
            inputs: vec![0, 1, 2],
            outputs: vec![1],
        };
        let mut session = Session::build(&netlist);
        session.set_input(0, NodeState::Low).unwrap();
        session.set_input(1, NodeState::High).unwrap();
        session.set_input(2, NodeState::High).unwrap();
        session.resolve_to_fixed_point(None).unwrap();
        assert_eq!(session.count_multi_driven(), 1);
    }

    #[test]
    fn floating_output_is_undriven() {
        let netlist = Netlist {
            transistors: vec![Transistor {
                kind: FetKind::N,
                gate: 1,
                source: 0,
                drain: 2,
            }],
            inputs: vec![0, 1],
            outputs: vec![2],
        };
        let mut session = Session::build(&netlist);
        session.set_input(0, NodeState::Low).unwrap();
        session.set_input(1, NodeState::Low).unwrap(); // gate low: N-fet open
        session.resolve_to_fixed_point(None).unwrap();
        assert_eq!(session.read_output(0).unwrap(), NodeState::Undriven);
    }

    /// Two cross-coupled inverters (nodes 2=Q, 3=Qn) plus a set/reset access
    /// transistor pulling straight to ground: `set` (gate 4) pulls Qn low,
    /// `reset` (gate 5) pulls Q low, each forcing the other output high
    /// through the feedback loop once the access transistor is released.
    fn feedback_latch() -> Netlist {
        Netlist {
            transistors: vec![
                Transistor { kind: FetKind::P, gate: 3, source: 1, drain: 2 }, // Qn -> Q
                Transistor { kind: FetKind::N, gate: 3, source: 2, drain: 0 }, // Qn -> Q
                Transistor { kind: FetKind::P, gate: 2, source: 1, drain: 3 }, // Q -> Qn
                Transistor { kind: FetKind::N, gate: 2, source: 3, drain: 0 }, // Q -> Qn
                Transistor { kind: FetKind::N, gate: 4, source: 3, drain: 0 }, // set pulls Qn low
                Transistor { kind: FetKind::N, gate: 5, source: 2, drain: 0 }, // reset pulls Q low
            ],
            inputs: vec![0, 1, 4, 5],
            outputs: vec![2],
        }
    }

    #[test]
    fn feedback_latch_holds_last_driven_value() {
        let mut session = Session::build(&feedback_latch());
        session.set_input(0, NodeState::Low).unwrap(); // ground
        session.set_input(1, NodeState::High).unwrap(); // supply

        session.set_input(2, NodeState::High).unwrap(); // set
        session.set_input(3, NodeState::Low).unwrap(); // reset
        session.resolve_to_fixed_point(None).unwrap();
        assert_eq!(session.read_output(0).unwrap(), NodeState::High);

        // Releasing both access transistors leaves the loop to hold Q high.
        session.set_input(2, NodeState::Low).unwrap();
        session.resolve_to_fixed_point(None).unwrap();
        assert_eq!(session.read_output(0).unwrap(), NodeState::High);

        session.set_input(3, NodeState::High).unwrap(); // reset
        session.resolve_to_fixed_point(None).unwrap();
        assert_eq!(session.read_output(0).unwrap(), NodeState::Low);

        // Releasing reset leaves the loop holding Q low.
        session.set_input(3, NodeState::Low).unwrap();
        session.resolve_to_fixed_point(None).unwrap();
        assert_eq!(session.read_output(0).unwrap(), NodeState::Low);
    }

    #[test]
    fn feedback_latch_simultaneous_release_can_stay_metastable() {
        // Asserting set and reset together is the latch's forbidden state:
        // each access transistor pulls straight to ground while the
        // opposite inverter tries to pull the same node high, so Q ends up
        // multiply driven rather than settling.
        let mut session = Session::build(&feedback_latch());
        session.set_input(0, NodeState::Low).unwrap();
        session.set_input(1, NodeState::High).unwrap();
        session.set_input(2, NodeState::High).unwrap(); // set
        session.set_input(3, NodeState::High).unwrap(); // reset
        session.resolve_to_fixed_point(None).unwrap();
        assert!(session.count_multi_driven() >= 1);

        // Releasing both at once is under-specified: the loop is permitted
        // to settle on a single value or stay metastable. Here it stays
        // multiply driven, since both halves of the loop were already
        // fighting each other before the access transistors let go.
        session.set_input(2, NodeState::Low).unwrap();
        session.set_input(3, NodeState::Low).unwrap();
        session.resolve_to_fixed_point(None).unwrap();
        assert_eq!(session.read_output(0).unwrap(), NodeState::UnstableMultiple);
    }

    /// Three series N-fets gated independently (nodes 4, 5, 6), forming a
    /// pass-gate chain from a driven input (node 0) to an output (node 3).
    fn pass_gate_chain() -> Netlist {
        Netlist {
            transistors: vec![
                Transistor { kind: FetKind::N, gate: 4, source: 0, drain: 1 },
                Transistor { kind: FetKind::N, gate: 5, source: 1, drain: 2 },
                Transistor { kind: FetKind::N, gate: 6, source: 2, drain: 3 },
            ],
            inputs: vec![0, 4, 5, 6],
            outputs: vec![3],
        }
    }

    #[test]
    fn pass_gate_chain_breaks_when_middle_gate_opens() {
        let mut session = Session::build(&pass_gate_chain());
        session.set_input(0, NodeState::Low).unwrap();
        session.set_input(1, NodeState::High).unwrap();
        session.set_input(2, NodeState::High).unwrap();
        session.set_input(3, NodeState::High).unwrap();
        session.resolve_to_fixed_point(None).unwrap();
        assert_eq!(session.read_output(0).unwrap(), NodeState::Low);

        // Opening the middle gate breaks the chain: nothing drives the
        // output anymore, so it goes undriven rather than holding low.
        session.set_input(2, NodeState::Low).unwrap();
        session.resolve_to_fixed_point(None).unwrap();
        assert_eq!(session.read_output(0).unwrap(), NodeState::Undriven);
    }

    #[test]
    fn out_of_range_ordinals_are_param_errors() {
        let mut session = Session::build(&inverter());
        assert_eq!(
            session.set_input(99, NodeState::Low).unwrap_err(),
            SimError::PARAM
        );
        assert_eq!(session.read_output(99).unwrap_err(), SimError::PARAM);
    }

    #[test]
    fn resolve_to_fixed_point_times_out() {
        let mut session = Session::build(&inverter());
        session.set_input(0, NodeState::Low).unwrap();
        session.set_input(1, NodeState::High).unwrap();
        session.set_input(2, NodeState::Low).unwrap();
        assert_eq!(
            session.resolve_to_fixed_point(Some(0)).unwrap_err(),
            SimError::TIMEOUT
        );
    }
}

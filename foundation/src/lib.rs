//! A switch-level digital circuit simulator. Transistors are modeled as
//! three-terminal switches (gate/source/drain) rather than as logic gates,
//! so the simulator can represent circuits a gate-level model cannot —
//! shorts, floating nodes, pass-gate chains, feedback latches — the same
//! way an analog-flavored netlist of real N- and P-type FETs would.
//!
//! # Overview
//!
//! A circuit is described as a flat [`netlist::Netlist`] of N/P transistors
//! plus an ordered input list and output list. Building a
//! [`session::Session`] from a netlist does all the one-time setup: an
//! intermediate graph gives every node and transistor a stable arena index,
//! and one conduction tree is built per input by walking outward from that
//! input's node along every transistor it can legally reach.
//!
//! Driving an input and calling [`session::Session::resolve`] (in a loop,
//! via [`session::Session::resolve_to_fixed_point`]) propagates the change
//! through the tree: a transistor's channel opens or closes based on its
//! gate's resolved state, and an open or closed channel in turn changes
//! what state is delivered to the tree node downstream of it. The process
//! is a worklist-driven fixed point — it terminates because each step only
//! recomputes entries that some earlier step marked dirty, and a circuit
//! with finitely many nodes and transistors has finitely many distinct
//! states to cycle through.
//!
//! # Node states
//!
//! A node's resolved state ([`lattice::NodeState`]) is derived from how
//! many transistor channels are currently driving it towards `Low`,
//! `High`, `UnstableLow`, or `UnstableHigh` — see
//! [`lattice::NodeState::from_counts`] for the exact precedence. A node
//! driven both low and high at once resolves to `UnstableMultiple`, a
//! genuine electrical conflict; a node driven by nothing at all resolves to
//! `Undriven`, a floating node.
//!
//! # Transistors
//!
//! An N-type transistor conducts when its gate is `High` and insulates when
//! its gate is `Low` (and vice versa for P-type); any other gate state
//! leaves its conduction `Unstable`. [`lattice::link_output`] computes what
//! a transistor, in its current conduction state, delivers to its far
//! terminal given the near terminal's resolved state — an open channel
//! never delivers anything, and each polarity only ever pulls its output
//! towards the state it's built to conduct, never the opposite one.
//!
//! # Usage
//!
//! ```
//! use foundation::lattice::{FetKind, NodeState};
//! use foundation::netlist::{Netlist, Transistor};
//! use foundation::session::Session;
//!
//! // A CMOS inverter: P-fet pulls the output high, N-fet pulls it low.
//! let netlist = Netlist {
//!     transistors: vec![
//!         Transistor { kind: FetKind::P, gate: 2, source: 1, drain: 3 },
//!         Transistor { kind: FetKind::N, gate: 2, source: 3, drain: 0 },
//!     ],
//!     inputs: vec![0, 1, 2],
//!     outputs: vec![3],
//! };
//!
//! let mut session = Session::build(&netlist);
//! session.set_input(0, NodeState::Low).unwrap();  // node 0: ground
//! session.set_input(1, NodeState::High).unwrap(); // node 1: supply
//! session.set_input(2, NodeState::Low).unwrap();  // node 2: the logical input
//! session.resolve_to_fixed_point(None).unwrap();
//! assert_eq!(session.read_output(0).unwrap(), NodeState::High);
//! ```

#![deny(missing_docs)]

mod graph;
mod ids;
mod runtime;
mod tree;

pub mod error;
pub mod lattice;
pub mod netlist;
pub mod session;

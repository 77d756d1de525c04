//! Stable integer indices into the simulator's arenas.
//!
//! The original switch-level simulator links nodes, transistors, and the
//! per-input conduction trees together with raw pointers. Here every
//! cross-reference is a typed index into an [`index_vec::IndexVec`] arena
//! instead, so a transistor index can never be mistaken for a node index at
//! the type level, and nothing in the graph needs `Rc`/`RefCell` to be
//! mutated after construction.

index_vec::define_index_type! {
    /// Indexes [`crate::graph::Graph::nodes`] and [`crate::runtime::RuntimeState::nodes`].
    pub struct NodeId = u32;
}

index_vec::define_index_type! {
    /// Indexes [`crate::graph::Graph::fets`] and [`crate::runtime::RuntimeState::fets`].
    pub struct FetId = u32;
}

index_vec::define_index_type! {
    /// The ordinal position of an input node in the netlist's input list.
    /// Also used to index [`crate::session::Session`]'s per-input conduction
    /// trees, since there is exactly one tree per input.
    pub struct InputIdx = u32;
}

index_vec::define_index_type! {
    /// The ordinal position of an output node in the netlist's output list.
    pub struct OutputIdx = u32;
}

index_vec::define_index_type! {
    /// Indexes [`crate::tree::ConductionTree::nodes`]. Scoped to a single
    /// tree; the same numeric value in two different trees refers to two
    /// unrelated tree nodes.
    pub struct TreeNodeId = u32;
}

index_vec::define_index_type! {
    /// Indexes [`crate::tree::ConductionTree::links`]. Scoped to a single
    /// tree, like [`TreeNodeId`].
    pub struct LinkId = u32;
}

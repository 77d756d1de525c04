//! The in-memory netlist: a flat list of transistors plus the two ordered
//! lists that name which nodes are inputs and which are outputs.
//!
//! This module is pure data — no file I/O, no text grammar. Parsing a
//! netlist out of the text format described in the external interface is
//! the job of a collaborating crate; this one only has to describe what a
//! netlist *is* once it's been read.

use crate::lattice::FetKind;

/// A single N- or P-type transistor, named by the node index of its gate,
/// source, and drain terminals.
///
/// Source and drain are interchangeable: [`crate::graph::Graph`] always
/// looks a transistor up by "the terminal that isn't the one I'm standing
/// on", never by which field is named `source` vs. `drain`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transistor {
    /// N-type or P-type.
    pub kind: FetKind,
    /// The node index whose state controls this transistor's channel.
    pub gate: usize,
    /// One of the two channel terminals.
    pub source: usize,
    /// The other channel terminal.
    pub drain: usize,
}

/// A netlist: every transistor in declaration order, plus the ordered input
/// and output node lists.
///
/// Node indices are plain `usize`s here — they only become the typed
/// [`crate::ids::NodeId`] once [`crate::graph::Graph::build`] has checked
/// them against a node count and can hand out arena-backed indices.
#[derive(Debug, Clone, Default)]
pub struct Netlist {
    /// Every transistor, in declaration order. A transistor's position in
    /// this list is preserved as arena order by [`crate::graph::Graph`],
    /// and is what the netlist text format's round-trip law checks against.
    pub transistors: Vec<Transistor>,
    /// Node indices that are driven from outside the circuit, in the order
    /// a caller addresses them by ordinal.
    pub inputs: Vec<usize>,
    /// Node indices that are read back, in the order a caller addresses
    /// them by ordinal.
    pub outputs: Vec<usize>,
}

impl Netlist {
    /// An empty netlist: no transistors, no inputs, no outputs.
    pub fn new() -> Netlist {
        Netlist::default()
    }

    /// The number of distinct nodes referenced anywhere in the netlist, i.e.
    /// one more than the highest node index mentioned by any transistor
    /// terminal, input, or output. A netlist with unreferenced low-numbered
    /// nodes (a gap) still reserves room for them, matching the original's
    /// "highest index + 1" sizing rule.
    pub fn node_count(&self) -> usize {
        let mut max = None::<usize>;
        let mut see = |index: usize| {
            max = Some(max.map_or(index, |m| m.max(index)));
        };
        for fet in &self.transistors {
            see(fet.gate);
            see(fet.source);
            see(fet.drain);
        }
        for &index in self.inputs.iter().chain(&self.outputs) {
            see(index);
        }
        max.map_or(0, |m| m + 1)
    }
}

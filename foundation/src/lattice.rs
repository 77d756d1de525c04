//! The node-state lattice and the two transistor conduction rules derived
//! from it.

/// The resolved electrical state of a node, after combining every drive
/// currently reaching it through a closed transistor.
///
/// Four of the six variants are "drive" states — they are the ones a node
/// can be pushed towards by a transistor link, and the ones counted by
/// [`crate::runtime::RuntimeNode`]'s four drive counters. `UnstableMultiple`
/// and `Undriven` are derived states: no transistor ever delivers either of
/// them directly, they only ever fall out of [`NodeState::from_counts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeState {
    /// Driven low/false/0 and nothing else drives it otherwise.
    Low,
    /// Driven high/true/1 and nothing else drives it otherwise.
    High,
    /// Driven towards low, but only through a transistor whose own
    /// conduction state is itself in question.
    UnstableLow,
    /// Driven towards high, but only through a transistor whose own
    /// conduction state is itself in question.
    UnstableHigh,
    /// Driven both low and high at once, or towards both unstably — a
    /// genuine electrical conflict.
    UnstableMultiple,
    /// Not driven by anything (floating).
    Undriven,
}

impl Default for NodeState {
    /// A node with no drives at all is `Undriven`.
    fn default() -> Self {
        NodeState::Undriven
    }
}

impl NodeState {
    /// The slot in a node's four-counter drive tally this state occupies,
    /// or `None` for the two derived states that are never themselves
    /// driven onto a node.
    pub fn drive_index(self) -> Option<usize> {
        match self {
            NodeState::Low => Some(0),
            NodeState::High => Some(1),
            NodeState::UnstableLow => Some(2),
            NodeState::UnstableHigh => Some(3),
            NodeState::UnstableMultiple | NodeState::Undriven => None,
        }
    }

    /// The digit a test-vector file uses for this state: the enum's
    /// declared order, `0` through `5`.
    pub fn to_digit(self) -> u8 {
        match self {
            NodeState::Low => 0,
            NodeState::High => 1,
            NodeState::UnstableLow => 2,
            NodeState::UnstableHigh => 3,
            NodeState::UnstableMultiple => 4,
            NodeState::Undriven => 5,
        }
    }

    /// The inverse of [`NodeState::to_digit`]; `None` for anything outside
    /// `0..=5`.
    pub fn from_digit(digit: u8) -> Option<NodeState> {
        match digit {
            0 => Some(NodeState::Low),
            1 => Some(NodeState::High),
            2 => Some(NodeState::UnstableLow),
            3 => Some(NodeState::UnstableHigh),
            4 => Some(NodeState::UnstableMultiple),
            5 => Some(NodeState::Undriven),
            _ => None,
        }
    }

    /// Derives a node's resolved state from its four drive counters
    /// (`[low, high, unstable_low, unstable_high]`).
    ///
    /// A real conflict — some link driving `Low` and another driving `High`
    /// — always wins out as `UnstableMultiple`, regardless of what else is
    /// present. Short of that, a single real drive (`Low` or `High`) settles
    /// the node even if the opposite *unstable* drive is also present; only
    /// when both drives present are themselves unstable does the node
    /// collapse to `UnstableMultiple` rather than to one unstable state.
    pub fn from_counts(counts: [u32; 4]) -> NodeState {
        let [low, high, unstable_low, unstable_high] = counts;
        if low != 0 && high != 0 {
            NodeState::UnstableMultiple
        } else if low != 0 {
            NodeState::Low
        } else if high != 0 {
            NodeState::High
        } else if unstable_low != 0 && unstable_high != 0 {
            NodeState::UnstableMultiple
        } else if unstable_low != 0 {
            NodeState::UnstableLow
        } else if unstable_high != 0 {
            NodeState::UnstableHigh
        } else {
            NodeState::Undriven
        }
    }
}

/// The channel polarity of a transistor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetKind {
    /// Conducts when its gate is driven high.
    N,
    /// Conducts when its gate is driven low.
    P,
}

/// Whether a transistor's channel currently conducts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetState {
    /// The channel does not conduct; the source and drain are isolated.
    Open,
    /// The channel conducts; the drain side relays the source side's state.
    Closed,
    /// The gate's own state doesn't resolve to a definite open or closed,
    /// so the channel's conduction is itself unresolved.
    Unstable,
}

impl FetState {
    /// Recomputes a transistor's conduction state from its gate's resolved
    /// node state. N-type and P-type channels are mirror images of each
    /// other: a `Low` gate opens an N-type channel and closes a P-type one,
    /// and vice versa for `High`. Any other gate state leaves the channel's
    /// conduction genuinely unknown.
    pub fn recompute(kind: FetKind, gate_state: NodeState) -> FetState {
        match (kind, gate_state) {
            (FetKind::N, NodeState::Low) | (FetKind::P, NodeState::High) => FetState::Open,
            (FetKind::N, NodeState::High) | (FetKind::P, NodeState::Low) => FetState::Closed,
            _ => FetState::Unstable,
        }
    }
}

/// Computes the state a transistor link delivers downstream, given the
/// transistor's kind, its current conduction state, and the resolved state
/// of the node on the link's upstream side.
///
/// An open channel never delivers anything (`Undriven`). A closed or
/// unstable channel relays the upstream state, except that an N-type
/// channel never relays a `High`/`UnstableHigh` upstream (mirrored for
/// P-type and `Low`/`UnstableLow`) — the channel's own polarity can only
/// pull its output towards the state it is built to conduct, so the
/// opposite polarity from upstream is blocked rather than relayed, and an
/// `Unstable` channel downgrades a relayed real drive to its unstable
/// counterpart since the channel itself might not actually be conducting.
pub fn link_output(kind: FetKind, fet_state: FetState, upstream: NodeState) -> NodeState {
    if fet_state == FetState::Open {
        return NodeState::Undriven;
    }
    let blocked = match kind {
        FetKind::N => matches!(upstream, NodeState::High | NodeState::UnstableHigh),
        FetKind::P => matches!(upstream, NodeState::Low | NodeState::UnstableLow),
    };
    if blocked {
        return NodeState::Undriven;
    }
    if fet_state == FetState::Unstable {
        return match (kind, upstream) {
            (FetKind::N, NodeState::Low) => NodeState::UnstableLow,
            (FetKind::P, NodeState::High) => NodeState::UnstableHigh,
            _ => upstream,
        };
    }
    upstream
}

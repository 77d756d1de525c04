//! The vector-simulation driver and the built-in inverter demo shared by
//! both binaries in this crate.
//!
//! Neither belongs in the core engine: [`foundation::session::Session`]
//! exposes `set_input`/`resolve`/`read_output`, but looping `resolve` over
//! every row of an input vector, imposing an iteration cap that accumulates
//! across the whole vector, and tallying multiply-driven nodes along the
//! way is host behavior, not core engine behavior — exactly the role this
//! crate plays.

use foundation::error::SimError;
use foundation::lattice::NodeState;
use foundation::netlist::{Netlist, Transistor};
use foundation::session::Session;
use netfmt::Vector;

/// The result of simulating one input vector against a netlist.
pub struct SimRun {
    /// One output row per input row, same order.
    pub outputs: Vector,
    /// The summed multiply-driven node count across every row, taken right
    /// after each row's `resolve` loop reaches a fixed point.
    pub multi_driven: u64,
    /// The total number of unresolved `resolve` steps across every row
    /// (the step that finally reports resolved is not counted).
    pub time: u64,
}

/// Drives `inputs` (one row per time step, one column per netlist input)
/// through `netlist`, one row at a time: set every input column, call
/// `resolve` until it reports a fixed point, record the multiply-driven
/// count and the output columns, then move to the next row.
///
/// `time_limit` caps the number of unresolved `resolve` steps across the
/// whole vector, not per row — the counter accumulates over every row's
/// settling rather than resetting between rows, matching the original's
/// single `time` counter declared outside its row loop. `0` means no cap.
/// Exceeding it surfaces as [`SimError::TIMEOUT`], leaving the session's
/// state as of the last completed step (still internally consistent, just
/// not yet settled). The core itself never imposes this cap — bounding
/// `resolve` is always the caller's job.
pub fn simulate_vector(netlist: &Netlist, inputs: &Vector, time_limit: u64) -> Result<SimRun, SimError> {
    if inputs.width() != netlist.inputs.len() {
        return Err(SimError::PARAM);
    }

    let mut session = Session::build(netlist);
    let mut output_rows = Vec::with_capacity(inputs.len());
    let mut multi_driven = 0u64;
    let mut time = 0u64;

    for row in &inputs.rows {
        for (ordinal, &state) in row.iter().enumerate() {
            session.set_input(ordinal, state)?;
        }

        while !session.resolve() {
            time += 1;
            if time_limit != 0 && time > time_limit {
                return Err(SimError::TIMEOUT);
            }
        }

        multi_driven += session.count_multi_driven() as u64;

        let mut out_row = Vec::with_capacity(netlist.outputs.len());
        for ordinal in 0..netlist.outputs.len() {
            out_row.push(session.read_output(ordinal)?);
        }
        output_rows.push(out_row);
    }

    Ok(SimRun {
        outputs: Vector { rows: output_rows },
        multi_driven,
        time,
    })
}

/// The built-in CMOS inverter netlist used by `fetsim` when run with no
/// arguments: nodes 0=GND, 1=Vcc, 2=in, 3=out.
pub fn inverter_netlist() -> Netlist {
    use foundation::lattice::FetKind;
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

/// Runs the built-in inverter demo: grounds node 0, sets node 1 high, then
/// resolves with the logical input first low, then high, printing the
/// output each time. Mirrors the original tool's zero-argument mode.
pub fn run_inverter_demo() {
    let netlist = inverter_netlist();
    let mut session = Session::build(&netlist);

    session.set_input(0, NodeState::Low).unwrap();
    session.set_input(1, NodeState::High).unwrap();

    session.set_input(2, NodeState::Low).unwrap();
    session.resolve_to_fixed_point(None).unwrap();
    println!("Cleared input, output: {:?}", session.read_output(0).unwrap());

    session.set_input(2, NodeState::High).unwrap();
    session.resolve_to_fixed_point(None).unwrap();
    println!("Set input, output: {:?}", session.read_output(0).unwrap());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulates_inverter_across_two_rows() {
        let netlist = inverter_netlist();
        let inputs = Vector {
            rows: vec![
                vec![NodeState::Low, NodeState::High, NodeState::Low],
                vec![NodeState::Low, NodeState::High, NodeState::High],
            ],
        };
        let run = simulate_vector(&netlist, &inputs, 0).unwrap();
        assert_eq!(run.outputs.rows[0], vec![NodeState::High]);
        assert_eq!(run.outputs.rows[1], vec![NodeState::Low]);
        assert_eq!(run.multi_driven, 0);
    }

    #[test]
    fn width_mismatch_is_a_param_error() {
        let netlist = inverter_netlist();
        let inputs = Vector {
            rows: vec![vec![NodeState::Low, NodeState::High]],
        };
        assert_eq!(
            simulate_vector(&netlist, &inputs, 0).unwrap_err(),
            SimError::PARAM
        );
    }

    /// Three inverter stages in series: gate N's conduction state isn't
    /// recomputed until the `resolve` call after stage N-1's output node
    /// settles (a gate's new resolved state only refills the transistor
    /// worklist between top-level `resolve` calls, never within one), so
    /// this chain needs one unresolved step per stage before the last
    /// settles the chain. A `time_limit` of 1 is exceeded by the second
    /// unresolved step.
    fn three_stage_inverter_chain() -> Netlist {
        use foundation::lattice::FetKind;
        Netlist {
            transistors: vec![
                Transistor { kind: FetKind::P, gate: 2, source: 1, drain: 3 },
                Transistor { kind: FetKind::N, gate: 2, source: 3, drain: 0 },
                Transistor { kind: FetKind::P, gate: 3, source: 1, drain: 4 },
                Transistor { kind: FetKind::N, gate: 3, source: 4, drain: 0 },
                Transistor { kind: FetKind::P, gate: 4, source: 1, drain: 5 },
                Transistor { kind: FetKind::N, gate: 4, source: 5, drain: 0 },
            ],
            inputs: vec![0, 1, 2],
            outputs: vec![5],
        }
    }

    #[test]
    fn chain_settles_given_enough_steps() {
        let netlist = three_stage_inverter_chain();
        let inputs = Vector {
            rows: vec![vec![NodeState::Low, NodeState::High, NodeState::Low]],
        };
        let run = simulate_vector(&netlist, &inputs, 0).unwrap();
        // Low -> inverted three times -> High.
        assert_eq!(run.outputs.rows[0], vec![NodeState::High]);
    }

    #[test]
    fn tight_time_limit_times_out_before_the_chain_settles() {
        let netlist = three_stage_inverter_chain();
        let inputs = Vector {
            rows: vec![vec![NodeState::Low, NodeState::High, NodeState::Low]],
        };
        assert_eq!(
            simulate_vector(&netlist, &inputs, 1).unwrap_err(),
            SimError::TIMEOUT
        );
    }
}

//! The netlist text format: whitespace-separated tokens, a leading `i`,
//! `o`, `n`, or `p` token selecting what the numbers that follow it mean.
//!
//! ```text
//! i 0 1 2
//! o 3
//! p 2 1 3
//! n 2 3 0
//! ```
//!
//! `i`/`o` introduce the input/output node-index lists; `n`/`p` introduce
//! one transistor apiece, each followed by exactly three node indices
//! (gate, source, drain). The writer always emits the normalized form
//! above — one `i` line, one `o` line, then one `n`/`p` line per
//! transistor in declaration order — which is what the round-trip law
//! checks byte-for-byte.

use crate::error::FormatError;
use foundation::lattice::FetKind;
use foundation::netlist::{Netlist, Transistor};
use std::fmt::Write as _;
use std::path::Path;

#[derive(Clone, Copy)]
enum Mode {
    Inputs,
    Outputs,
    Fet(FetKind),
}

/// Parses a netlist from its text form.
///
/// Tokens are whitespace-separated. A non-numeric token must begin with
/// `i`, `o`, `n`, or `p`, selecting the list that subsequent numeric tokens
/// are appended to; `n`/`p` expect their numbers in groups of three (gate,
/// source, drain), one transistor per group.
pub fn parse_netlist(text: &str) -> Result<Netlist, FormatError> {
    let mut netlist = Netlist::new();
    let mut mode: Option<Mode> = None;
    let mut pending_fet = Vec::with_capacity(3);

    for token in text.split_whitespace() {
        if let Ok(value) = token.parse::<usize>() {
            match mode {
                Some(Mode::Inputs) => netlist.inputs.push(value),
                Some(Mode::Outputs) => netlist.outputs.push(value),
                Some(Mode::Fet(kind)) => {
                    pending_fet.push(value);
                    if pending_fet.len() == 3 {
                        netlist.transistors.push(Transistor {
                            kind,
                            gate: pending_fet[0],
                            source: pending_fet[1],
                            drain: pending_fet[2],
                        });
                        pending_fet.clear();
                    }
                }
                None => return Err(FormatError::Grammar),
            }
        } else {
            mode = Some(match token.chars().next() {
                Some('i') => Mode::Inputs,
                Some('o') => Mode::Outputs,
                Some('n') => Mode::Fet(FetKind::N),
                Some('p') => Mode::Fet(FetKind::P),
                _ => return Err(FormatError::Grammar),
            });
            pending_fet.clear();
        }
    }

    if !pending_fet.is_empty() {
        return Err(FormatError::Grammar);
    }
    Ok(netlist)
}

/// Renders a netlist in its normalized text form: one `i` line, one `o`
/// line, then one `n`/`p` line per transistor in declaration order.
pub fn write_netlist(netlist: &Netlist) -> String {
    let mut out = String::new();
    out.push('i');
    for node in &netlist.inputs {
        let _ = write!(out, " {node}");
    }
    out.push_str("\no");
    for node in &netlist.outputs {
        let _ = write!(out, " {node}");
    }
    out.push('\n');
    for fet in &netlist.transistors {
        let prefix = match fet.kind {
            FetKind::N => 'n',
            FetKind::P => 'p',
        };
        let _ = writeln!(out, "{prefix} {} {} {}", fet.gate, fet.source, fet.drain);
    }
    out
}

/// Reads and parses a netlist file.
pub fn read_netlist_file(path: impl AsRef<Path>) -> Result<Netlist, FormatError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            FormatError::Open {
                path: path.to_path_buf(),
                source,
            }
        } else {
            FormatError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    parse_netlist(&text)
}

/// Writes a netlist file in normalized form.
pub fn write_netlist_file(netlist: &Netlist, path: impl AsRef<Path>) -> Result<(), FormatError> {
    let path = path.as_ref();
    std::fs::write(path, write_netlist(netlist)).map_err(|source| FormatError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn parses_basic_inverter_text() {
        let text = "i 0 1 2\no 3\np 2 1 3\nn 2 3 0\n";
        let netlist = parse_netlist(text).unwrap();
        assert_eq!(netlist.inputs, vec![0, 1, 2]);
        assert_eq!(netlist.outputs, vec![3]);
        assert_eq!(netlist.transistors.len(), 2);
        assert_eq!(netlist.transistors[0].kind, FetKind::P);
        assert_eq!(netlist.transistors[1].kind, FetKind::N);
    }

    #[test]
    fn unknown_leading_character_is_a_grammar_error() {
        assert!(matches!(
            parse_netlist("x 1 2 3"),
            Err(FormatError::Grammar)
        ));
    }

    #[test]
    fn incomplete_transistor_triple_is_a_grammar_error() {
        assert!(matches!(parse_netlist("n 1 2"), Err(FormatError::Grammar)));
    }

    #[test]
    fn round_trip_is_byte_identical_to_normalized_form() {
        let netlist = inverter();
        let written = write_netlist(&netlist);
        assert_eq!(written, "i 0 1 2\no 3\np 2 1 3\nn 2 3 0\n");
        let reparsed = parse_netlist(&written).unwrap();
        assert_eq!(write_netlist(&reparsed), written);
    }
}

use bitflags::bitflags;

bitflags! {
    /// The simulator's combinable error taxonomy.
    ///
    /// A single failure can legitimately set more than one flag — a format
    /// error while reading a netlist that then also fails to close its file
    /// is reported as `FFORMAT | FCLOSE`. [`SimError::NONE`] (the empty set)
    /// means success.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SimError: u8 {
        /// No error: the empty set. Named explicitly (rather than relying
        /// on [`SimError::empty`]) so the boundary taxonomy's "no error"
        /// value has the same standing as its failure flags.
        const NONE    = 0;
        /// A caller-supplied parameter was out of range (bad ordinal, vector
        /// width mismatch against the netlist's input/output count, ...).
        const PARAM   = 1 << 0;
        /// A memory allocation failed. Safe Rust's global allocator aborts
        /// on allocation failure rather than returning an error, so nothing
        /// in this crate ever actually sets this flag; it exists to keep
        /// the taxonomy a faithful superset of the original's.
        const ALLOC   = 1 << 1;
        /// A file could not be opened.
        const FOPEN   = 1 << 2;
        /// A file could not be closed (flushed) cleanly.
        const FCLOSE  = 1 << 3;
        /// Text did not match the expected netlist/vector grammar.
        const FFORMAT = 1 << 4;
        /// An I/O error other than open/close/format occurred while reading
        /// or writing.
        const IO      = 1 << 5;
        /// `resolve` was stepped more than the caller's iteration cap
        /// without reaching a fixed point.
        const TIMEOUT = 1 << 6;
    }
}

impl std::fmt::Display for SimError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "no error");
        }
        let mut first = true;
        for (name, _) in self.iter_names() {
            if !first {
                write!(f, "|")?;
            }
            write!(f, "{name}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for SimError {}

// Per-phase warning and error accumulator

/// Human-readable warnings and errors collected during one phase invocation.
///
/// A fresh instance is created at phase start and drained once the phase has
/// reported, so nothing leaks from one phase into the next.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Diagnostics {
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn<S: Into<String>>(&mut self, msg: S) {
        let msg = msg.into();
        log::debug!("warning recorded: {}", msg);
        self.warnings.push(msg);
    }

    pub fn error<S: Into<String>>(&mut self, msg: S) {
        let msg = msg.into();
        log::debug!("error recorded: {}", msg);
        self.errors.push(msg);
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty() && self.errors.is_empty()
    }

    /// Take everything collected so far, leaving the accumulator empty
    pub fn drain(&mut self) -> Diagnostics {
        std::mem::take(self)
    }
}

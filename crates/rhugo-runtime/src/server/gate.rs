//! Readiness gate state machine.
//!
//! Consumes output chunks in arrival order and decides, once, whether the
//! server came up (a stdout line starting with the readiness marker) or
//! failed (any byte on stderr first). Events after the verdict are ignored.

use rhugo_core::{OutputChunk, OutputStream};

/// Startup progress of a server subprocess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupState {
    /// Spawned, nothing observed yet.
    Launching,
    /// Stdout seen, marker not yet seen.
    Accumulating,
    /// Marker seen on stdout.
    Ready,
    /// Stderr produced output before readiness. Holds the decoded text.
    Failed(String),
}

impl StartupState {
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Ready | Self::Failed(_))
    }
}

/// Accumulates startup output and tracks [`StartupState`].
#[derive(Debug, Clone)]
pub struct ReadinessGate {
    marker: String,
    output: String,
    state: StartupState,
}

impl ReadinessGate {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            output: String::new(),
            state: StartupState::Launching,
        }
    }

    pub const fn state(&self) -> &StartupState {
        &self.state
    }

    /// Startup output accumulated so far.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Consume the gate, returning its state and accumulated output.
    pub fn finish(self) -> (StartupState, String) {
        (self.state, self.output)
    }

    /// Feed one chunk from either stream.
    pub fn on_chunk(&mut self, chunk: &OutputChunk) -> &StartupState {
        match chunk.stream {
            OutputStream::Stdout => self.on_stdout(&chunk.data),
            OutputStream::Stderr => self.on_stderr(&chunk.data),
        }
    }

    /// Feed a stdout chunk.
    ///
    /// Every line of the chunk is appended (each prefixed with `\n`) before
    /// the verdict is taken, so lines flushed together with the marker are
    /// part of the startup output.
    pub fn on_stdout(&mut self, data: &[u8]) -> &StartupState {
        if self.state.is_terminal() {
            return &self.state;
        }

        let text = String::from_utf8_lossy(data);
        let mut ready = false;
        for line in text.split('\n') {
            self.output.push('\n');
            self.output.push_str(line);
            if line.starts_with(self.marker.as_str()) {
                ready = true;
            }
        }

        self.state = if ready {
            StartupState::Ready
        } else {
            StartupState::Accumulating
        };
        &self.state
    }

    /// Feed a stderr chunk. Any data before readiness is fatal.
    pub fn on_stderr(&mut self, data: &[u8]) -> &StartupState {
        if !self.state.is_terminal() {
            self.state = StartupState::Failed(String::from_utf8_lossy(data).into_owned());
        }
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARKER: &str = "Built in";

    #[test]
    fn starts_launching() {
        let gate = ReadinessGate::new(MARKER);
        assert_eq!(gate.state(), &StartupState::Launching);
        assert_eq!(gate.output(), "");
    }

    #[test]
    fn accumulates_until_marker() {
        let mut gate = ReadinessGate::new(MARKER);

        gate.on_stdout(b"Start building sites \xe2\x80\xa6\n");
        assert_eq!(gate.state(), &StartupState::Accumulating);

        gate.on_stdout(b"Built in 12 ms\n");
        assert_eq!(gate.state(), &StartupState::Ready);
    }

    #[test]
    fn lines_after_marker_in_same_chunk_are_kept() {
        let mut gate = ReadinessGate::new(MARKER);

        gate.on_stdout(b"Pages | 2\nBuilt in 5 ms\nWatching for changes in /site\n");

        assert_eq!(gate.state(), &StartupState::Ready);
        assert_eq!(
            gate.output(),
            "\nPages | 2\nBuilt in 5 ms\nWatching for changes in /site\n"
        );
    }

    #[test]
    fn each_chunk_line_gets_leading_separator() {
        let mut gate = ReadinessGate::new(MARKER);

        gate.on_stdout(b"a\n");
        gate.on_stdout(b"b");

        assert_eq!(gate.output(), "\na\n\nb");
    }

    #[test]
    fn marker_must_be_a_case_sensitive_prefix() {
        let mut gate = ReadinessGate::new(MARKER);

        gate.on_stdout(b"  Built in 3 ms\nbuilt in 3 ms\nTotal: Built in\n");

        assert_eq!(gate.state(), &StartupState::Accumulating);
    }

    #[test]
    fn stderr_before_ready_fails_with_raw_text() {
        let mut gate = ReadinessGate::new(MARKER);

        gate.on_stdout(b"Start building sites\n");
        gate.on_stderr(b"Error: unable to locate config file\n");

        assert_eq!(
            gate.state(),
            &StartupState::Failed("Error: unable to locate config file\n".to_string())
        );
    }

    #[test]
    fn verdict_is_final() {
        let mut gate = ReadinessGate::new(MARKER);
        gate.on_stdout(b"Built in 1 ms\n");
        gate.on_stderr(b"WARN late warning\n");
        gate.on_stdout(b"Change detected\n");

        assert_eq!(gate.state(), &StartupState::Ready);
        assert_eq!(gate.output(), "\nBuilt in 1 ms\n");

        let mut gate = ReadinessGate::new(MARKER);
        gate.on_stderr(b"boom");
        gate.on_stdout(b"Built in 1 ms\n");
        assert_eq!(gate.state(), &StartupState::Failed("boom".to_string()));
    }

    #[test]
    fn on_chunk_dispatches_by_stream() {
        let mut gate = ReadinessGate::new("READY");
        gate.on_chunk(&OutputChunk::stdout("READY now"));
        assert!(gate.state().is_terminal());

        let mut gate = ReadinessGate::new("READY");
        gate.on_chunk(&OutputChunk::stderr("READY now"));
        assert!(matches!(gate.state(), StartupState::Failed(_)));
    }
}

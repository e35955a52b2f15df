use std::io::Write;

/// Receives the human-readable request/response trace printed in verbose
/// mode. Sinks must not fail; the trace never affects the outcome of a call.
pub trait TraceSink {
    fn trace(&mut self, line: &str);
}

/// Discards everything.
pub struct NoTrace;

impl TraceSink for NoTrace {
    fn trace(&mut self, _line: &str) {}
}

/// Writes each trace line to `W`, ignoring write failures.
pub struct WriterTrace<W: Write>(pub W);

impl<W: Write> TraceSink for WriterTrace<W> {
    fn trace(&mut self, line: &str) {
        let _ = writeln!(self.0, "{line}");
    }
}

impl TraceSink for Vec<String> {
    fn trace(&mut self, line: &str) {
        self.push(line.to_string());
    }
}

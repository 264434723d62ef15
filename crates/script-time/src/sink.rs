// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Output sinks for the `print_*` family of session methods

use std::io::{self, Write};

/// Line-oriented destination for printed reports
pub trait OutputSink {
    /// Write `line` followed by a newline
    fn write_line(&mut self, line: &str) -> io::Result<()>;
}

/// Writes report lines to standard output
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{line}")?;
        stdout.flush()
    }
}

/// Any `io::Write` can serve as a sink
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consume the sink and return the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputSink for WriterSink<W> {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.writer, "{line}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_sink_appends_newlines() {
        let mut sink = WriterSink::new(Vec::new());
        sink.write_line("Start time: 09:00:00 AM").unwrap();
        sink.write_line("done").unwrap();

        let written = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(written, "Start time: 09:00:00 AM\ndone\n");
    }
}

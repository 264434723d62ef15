// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Output sink that keeps printed lines in memory

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use script_time::OutputSink;

/// Collects lines written by a session's `print_*` methods
///
/// Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct CaptureSink {
    lines: Rc<RefCell<Vec<String>>>,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All lines written so far
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    /// Most recent line, if any
    pub fn last(&self) -> Option<String> {
        self.lines.borrow().last().cloned()
    }

    /// Everything written, newline-joined
    pub fn contents(&self) -> String {
        self.lines.borrow().join("\n")
    }
}

impl OutputSink for CaptureSink {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.lines.borrow_mut().push(line.to_string());
        Ok(())
    }
}

//! In-memory ring of formatted log lines.
//!
//! The tracing subscriber writes here instead of the terminal while the
//! viewer owns the screen; the log dock renders the tail of the buffer.
use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, OnceLock};

use crate::constants::DEFAULT_LOG_LINES;

static GLOBAL_LOG: OnceLock<LogBufferHandle> = OnceLock::new();

/// Install `handle` as the process-wide log sink. Returns `false` if one was
/// already installed.
pub fn set_global_log_buffer(handle: LogBufferHandle) -> bool {
    GLOBAL_LOG.set(handle).is_ok()
}

pub fn global_log_buffer() -> Option<LogBufferHandle> {
    GLOBAL_LOG.get().cloned()
}

#[derive(Debug)]
struct LogBuffer {
    lines: VecDeque<String>,
    max_lines: usize,
}

impl LogBuffer {
    fn new(max_lines: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            max_lines: max_lines.max(1),
        }
    }

    fn push_line(&mut self, line: String) {
        self.lines.push_back(line);
        while self.lines.len() > self.max_lines {
            self.lines.pop_front();
        }
    }
}

#[derive(Clone, Debug)]
pub struct LogBufferHandle {
    inner: Arc<Mutex<LogBuffer>>,
}

impl Default for LogBufferHandle {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_LINES)
    }
}

impl LogBufferHandle {
    pub fn new(max_lines: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(LogBuffer::new(max_lines))),
        }
    }

    pub fn push(&self, line: impl Into<String>) {
        if let Ok(mut buffer) = self.inner.lock() {
            buffer.push_line(line.into());
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().map(|b| b.lines.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Up to `count` lines ending `skip_from_end` lines before the newest.
    pub fn tail(&self, count: usize, skip_from_end: usize) -> Vec<String> {
        let Ok(buffer) = self.inner.lock() else {
            return Vec::new();
        };
        let end = buffer.lines.len().saturating_sub(skip_from_end);
        let start = end.saturating_sub(count);
        buffer.lines.range(start..end).cloned().collect()
    }

    pub fn lines(&self) -> Vec<String> {
        self.inner
            .lock()
            .map(|b| b.lines.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn writer(&self) -> LogBufferWriter {
        LogBufferWriter::new(self.clone())
    }
}

/// `io::Write` adapter that splits bytes into lines for a [`LogBufferHandle`].
#[derive(Debug)]
pub struct LogBufferWriter {
    handle: LogBufferHandle,
    pending: Vec<u8>,
}

impl LogBufferWriter {
    pub fn new(handle: LogBufferHandle) -> Self {
        Self {
            handle,
            pending: Vec::new(),
        }
    }

    fn flush_pending(&mut self, force: bool) {
        if self.pending.is_empty() {
            return;
        }
        let end = if force {
            self.pending.len()
        } else {
            match self.pending.iter().rposition(|b| *b == b'\n') {
                Some(pos) => pos + 1,
                None => return,
            }
        };
        let drained: Vec<u8> = self.pending.drain(..end).collect();
        let text = String::from_utf8_lossy(&drained);
        for line in text.split('\n') {
            if !line.is_empty() {
                self.handle.push(line.to_string());
            }
        }
    }
}

impl Write for LogBufferWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);
        self.flush_pending(false);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flush_pending(true);
        Ok(())
    }
}

impl Drop for LogBufferWriter {
    fn drop(&mut self) {
        self.flush_pending(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn buffer_is_capped() {
        let handle = LogBufferHandle::new(3);
        for line in ["one", "two", "three", "four"] {
            handle.push(line);
        }
        assert_eq!(handle.lines(), vec!["two", "three", "four"]);
    }

    #[test]
    fn writer_splits_lines_and_flushes_partial() {
        let handle = LogBufferHandle::new(10);
        let mut writer = handle.writer();
        writer
            .write_all(b"first line\nsecond line\npartial")
            .expect("write to memory");
        assert_eq!(handle.len(), 2);
        writer.flush().expect("flush to memory");
        assert_eq!(handle.lines(), vec!["first line", "second line", "partial"]);
    }

    #[test]
    fn dropping_writer_keeps_partial_line() {
        let handle = LogBufferHandle::new(10);
        {
            let mut writer = handle.writer();
            writer.write_all(b"no newline").expect("write to memory");
        }
        assert_eq!(handle.lines(), vec!["no newline"]);
    }

    #[test]
    fn tail_windows_from_the_end() {
        let handle = LogBufferHandle::new(10);
        for i in 0..6 {
            handle.push(format!("l{i}"));
        }
        assert_eq!(handle.tail(2, 0), vec!["l4", "l5"]);
        assert_eq!(handle.tail(2, 1), vec!["l3", "l4"]);
        assert_eq!(handle.tail(10, 4), vec!["l0", "l1"]);
        assert!(handle.tail(3, 20).is_empty());
    }
}

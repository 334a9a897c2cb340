//! User-facing output of an application
//!
//! [`Logger`] writes whole lines to standard output (or any writer), optionally
//! prefixed with the application name. Diagnostics of the library itself go
//! through `tracing` instead.

use std::{
    fmt,
    io::{self, Write},
    sync::{Arc, Mutex, PoisonError},
};
use tracing::warn;

type Sink = Arc<Mutex<Box<dyn Write + Send>>>;

/// Line-oriented logging helper bound to an application identity
#[derive(Clone)]
pub struct Logger {
    prefix: Option<String>,
    sink: Sink,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

impl Logger {
    /// Create a logger writing to standard output
    pub fn stdout(prefix: Option<String>) -> Self {
        Self::with_writer(prefix, io::stdout())
    }

    /// Create a logger writing to an arbitrary writer
    pub fn with_writer<W: Write + Send + 'static>(prefix: Option<String>, writer: W) -> Self {
        Self {
            prefix,
            sink: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    /// Create a logger that records everything into memory
    pub fn buffered(prefix: Option<String>) -> (Self, LogBuffer) {
        let buffer = LogBuffer::default();
        (Self::with_writer(prefix, buffer.clone()), buffer)
    }

    /// Write one message followed by a newline
    pub fn log(&self, message: impl fmt::Display) {
        let mut sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
        let written = match &self.prefix {
            Some(prefix) => writeln!(sink, "{prefix}{message}"),
            None => writeln!(sink, "{message}"),
        };

        if let Err(e) = written.and_then(|()| sink.flush()) {
            warn!("Failed to write log message: {}", e);
        }
    }
}

/// In-memory writer shared between a [`Logger`] and its reader
#[derive(Debug, Clone, Default)]
pub struct LogBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl LogBuffer {
    /// Everything written so far, lossily decoded
    pub fn contents(&self) -> String {
        let bytes = self.bytes.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Written lines, without their terminators
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

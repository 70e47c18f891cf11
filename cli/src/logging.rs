//! Logging initialization: logs go to a file or are dropped, never to the console.
//!
//! `RUST_LOG` sets the filter (default `info`). When `LOG_FILE` is set, logs are appended
//! there as plain text; otherwise they are dropped so stdout carries only the transcript.

use std::io::Write;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use crate::log_format::TextWithSpanIds;

const DEFAULT_FILTER: &str = "info,hyper_util=off,reqwest=warn";

pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_FILTER));

    match std::env::var("LOG_FILE") {
        Ok(path) if !path.trim().is_empty() => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)?;
            let writer = std::sync::Mutex::new(StripAnsiWriter::new(file));
            let file_layer = tracing_subscriber::fmt::layer()
                .event_format(TextWithSpanIds::new())
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(filter);
            tracing_subscriber::registry().with(file_layer).init();
            tracing::info!(path = %path, "quill logging to file");
        }
        _ => {
            let sink_layer = tracing_subscriber::fmt::layer()
                .with_writer(std::io::sink)
                .with_filter(filter);
            tracing_subscriber::registry().with(sink_layer).init();
        }
    }
    Ok(())
}

/// Drops ANSI CSI sequences (`ESC [ params final`) so file logs stay plain text.
/// Other escapes pass through unchanged.
struct StripAnsiWriter<W> {
    inner: W,
    pending: Vec<u8>,
}

impl<W: Write> StripAnsiWriter<W> {
    fn new(inner: W) -> Self {
        Self {
            inner,
            pending: Vec::with_capacity(16),
        }
    }

    fn flush_pending(&mut self) -> std::io::Result<()> {
        self.inner.write_all(&self.pending)?;
        self.pending.clear();
        Ok(())
    }
}

impl<W: Write> Write for StripAnsiWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let mut rest = buf;
        while let Some((&b, tail)) = rest.split_first() {
            if self.pending.is_empty() {
                match rest.iter().position(|&c| c == 0x1b) {
                    Some(i) => {
                        self.inner.write_all(&rest[..i])?;
                        self.pending.push(0x1b);
                        rest = &rest[i + 1..];
                    }
                    None => {
                        self.inner.write_all(rest)?;
                        rest = &[];
                    }
                }
                continue;
            }
            rest = tail;
            if self.pending.len() == 1 {
                self.pending.push(b);
                if b != b'[' {
                    self.flush_pending()?;
                }
            } else if (0x40..=0x7e).contains(&b) {
                self.pending.clear();
            } else if b.is_ascii_digit() || matches!(b, b';' | b'?' | b':') {
                self.pending.push(b);
                if self.pending.len() > 64 {
                    self.flush_pending()?;
                }
            } else {
                self.flush_pending()?;
                self.inner.write_all(&[b])?;
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        if !self.pending.is_empty() {
            self.flush_pending()?;
        }
        self.inner.flush()
    }
}

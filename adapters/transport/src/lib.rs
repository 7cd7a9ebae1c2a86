#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Transport adapter that exchanges snapshots and decisions with the engine.
//!
//! The engine writes one JSON snapshot per line and reads one decision per
//! line. Failures are reported to the caller and never retried here.

use std::io::{self, BufRead, StdinLock, Stdout, Write};

use harvest_bot_core::{Decision, ItemType, UpgradeType};
use harvest_bot_world::{GameState, SnapshotError};
use thiserror::Error;
use tracing::trace;

/// Errors raised while talking to the engine.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The engine closed its end of the stream.
    #[error("engine closed the connection")]
    Closed,
    /// Reading from or writing to the engine failed.
    #[error("engine i/o failed: {0}")]
    Io(#[from] io::Error),
    /// The engine sent a snapshot that could not be decoded.
    #[error("engine sent an unreadable snapshot: {0}")]
    Snapshot(#[from] SnapshotError),
}

/// Synchronous link to the match engine.
pub trait Transport {
    /// Announces the item and upgrade chosen for the match.
    fn send_loadout(&mut self, item: ItemType, upgrade: UpgradeType) -> Result<(), TransportError>;

    /// Blocks until the engine delivers the next snapshot.
    fn fetch_snapshot(&mut self) -> Result<GameState, TransportError>;

    /// Sends a movement or action decision.
    fn send_decision(&mut self, decision: &Decision) -> Result<(), TransportError>;
}

/// Line-oriented transport over any reader/writer pair.
#[derive(Debug)]
pub struct LineTransport<R, W> {
    reader: R,
    writer: W,
    line: String,
}

impl<R, W> LineTransport<R, W>
where
    R: BufRead,
    W: Write,
{
    /// Wraps the provided reader and writer.
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            line: String::new(),
        }
    }

    /// Releases the underlying reader and writer.
    pub fn into_parts(self) -> (R, W) {
        (self.reader, self.writer)
    }

    fn write_line(&mut self, text: &str) -> Result<(), TransportError> {
        trace!(text, "sending to engine");
        writeln!(self.writer, "{text}")?;
        self.writer.flush()?;
        Ok(())
    }
}

impl LineTransport<StdinLock<'static>, Stdout> {
    /// Transport over the process's standard input and output.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R, W> Transport for LineTransport<R, W>
where
    R: BufRead,
    W: Write,
{
    fn send_loadout(&mut self, item: ItemType, upgrade: UpgradeType) -> Result<(), TransportError> {
        self.write_line(item.wire_name())?;
        self.write_line(upgrade.wire_name())
    }

    fn fetch_snapshot(&mut self) -> Result<GameState, TransportError> {
        loop {
            self.line.clear();
            if self.reader.read_line(&mut self.line)? == 0 {
                return Err(TransportError::Closed);
            }
            let text = self.line.trim();
            if text.is_empty() {
                continue;
            }
            trace!(bytes = text.len(), "snapshot received");
            return Ok(GameState::from_json(text)?);
        }
    }

    fn send_decision(&mut self, decision: &Decision) -> Result<(), TransportError> {
        self.write_line(&decision.to_string())
    }
}

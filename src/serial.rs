//! ==============================================================================
//! serial.rs - serial line input for the sensor bridge
//! ==============================================================================
//!
//! purpose:
//!     reads newline-delimited json from the microcontroller and keeps the
//!     latest good reading in the bridge's ReadingSlot.
//!
//! relationships:
//!     - used by: main.rs (spawn_reader + run_ingest)
//!     - writes: domain.rs (ReadingSlot)
//!     - uses: serialport (blocking port access)
//!
//! threading:
//!     the serial port is blocking, so it lives on its own blocking task and
//!     hands complete lines to the async side over an mpsc channel. the http
//!     server never waits on the port.
//!
//! ```text
//! ┌──────────────┐  lines   ┌─────────────┐  replace  ┌─────────────┐
//! │ port reader  │ ───────> │ run_ingest  │ ────────> │ ReadingSlot │
//! │ (blocking)   │  mpsc    │ (async)     │           │             │
//! └──────────────┘          └─────────────┘           └─────────────┘
//! ```
//!
//! ==============================================================================

use crate::config::SerialConfig;
use crate::domain::{ReadingSlot, SensorReading};
use crate::error::Result;

use std::io::{ErrorKind, Read};
use tokio::sync::mpsc;

// ==============================================================================
// line assembly
// ==============================================================================

/// longest line the assembler will hold before giving up on it
pub const MAX_LINE_BYTES: usize = 4096;

/// splits a byte stream into lines
///
/// bytes after the last `\n` are held until the rest of the line arrives.
/// a trailing `\r` is stripped and blank lines are dropped. a line that grows
/// past `MAX_LINE_BYTES` (wrong baud rate, line noise) is thrown away up to
/// its next newline.
#[derive(Default)]
pub struct LineAssembler {
    pending: Vec<u8>,
    discarding: bool,
}

impl LineAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        let mut lines = Vec::new();

        // only the new bytes are scanned, pending never contains a newline
        for chunk in bytes.split_inclusive(|b| *b == b'\n') {
            let (body, complete) = match chunk.split_last() {
                Some((&b'\n', body)) => (body, true),
                _ => (chunk, false),
            };

            if !self.discarding {
                if self.pending.len() + body.len() > MAX_LINE_BYTES {
                    tracing::warn!(
                        "[SERIAL] Dropping line longer than {} bytes (check baud rate)",
                        MAX_LINE_BYTES
                    );
                    self.pending.clear();
                    self.discarding = true;
                } else {
                    self.pending.extend_from_slice(body);
                }
            }

            if complete {
                if self.discarding {
                    self.discarding = false;
                } else if let Some(line) = self.take_line() {
                    lines.push(line);
                }
            }
        }
        lines
    }

    fn take_line(&mut self) -> Option<String> {
        let line = String::from_utf8_lossy(&self.pending)
            .trim_end_matches('\r')
            .to_string();
        self.pending.clear();
        (!line.trim().is_empty()).then_some(line)
    }

    /// bytes waiting for a newline
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

// ==============================================================================
// ingest - async side
// ==============================================================================

/// parse one line and, if it is a reading, swap it into the slot
///
/// a bad line leaves the slot exactly as it was.
pub async fn handle_line(line: &str, slot: &ReadingSlot, show_data: bool) -> Result<SensorReading> {
    let reading: SensorReading = match serde_json::from_str(line.trim()) {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!(line = %line, error = %e, "[SERIAL] Error parsing device data");
            return Err(e.into());
        }
    };

    if show_data {
        tracing::info!(
            "[SERIAL] Temp: {:.1}°C | Humidity: {:.1}% | Soil: {:.1} | Light: {}",
            reading.temperature, reading.humidity, reading.soil_moisture, reading.light
        );
    } else {
        tracing::debug!(?reading, "[SERIAL] reading updated");
    }

    slot.replace(reading.clone()).await;
    Ok(reading)
}

/// drain lines until every sender is gone
pub async fn run_ingest(mut lines: mpsc::Receiver<String>, slot: ReadingSlot, show_data: bool) {
    while let Some(line) = lines.recv().await {
        // errors are already logged in handle_line
        let _ = handle_line(&line, &slot, show_data).await;
    }
    tracing::info!("[SERIAL] Line channel closed, ingest stopped");
}

// ==============================================================================
// port reader - blocking side
// ==============================================================================

/// why a pump over one open port stopped
#[derive(Debug)]
pub enum PumpEnd {
    /// the reader hit end of stream (device unplugged)
    Closed,
    /// a read failed with something other than a timeout
    ReadFailed(std::io::Error),
    /// the ingest side hung up, stop for good
    ReceiverGone,
}

/// forward every complete line from `reader` until it ends
///
/// timeouts are normal on an idle serial port and just loop.
pub fn pump_lines<R: Read>(mut reader: R, tx: &mpsc::Sender<String>) -> PumpEnd {
    let mut assembler = LineAssembler::new();
    let mut buf = [0u8; 256];

    loop {
        match reader.read(&mut buf) {
            Ok(0) => return PumpEnd::Closed,
            Ok(n) => {
                for line in assembler.push(&buf[..n]) {
                    if tx.blocking_send(line).is_err() {
                        return PumpEnd::ReceiverGone;
                    }
                }
            }
            Err(e) if matches!(e.kind(), ErrorKind::TimedOut | ErrorKind::WouldBlock | ErrorKind::Interrupted) => {
                if tx.is_closed() {
                    return PumpEnd::ReceiverGone;
                }
            }
            Err(e) => return PumpEnd::ReadFailed(e),
        }
    }
}

fn open_port(config: &SerialConfig) -> Result<Box<dyn serialport::SerialPort>> {
    let port = serialport::new(&config.device, config.baud_rate)
        .timeout(config.read_timeout())
        .open()?;
    Ok(port)
}

/// open the port and keep it open for as long as ingest wants lines
///
/// failures to open or read are logged and retried after `reconnect_seconds`.
fn read_port_forever(config: SerialConfig, tx: mpsc::Sender<String>) {
    loop {
        match open_port(&config) {
            Ok(port) => {
                tracing::info!("[SERIAL] ✓ Opened {} at {} baud", config.device, config.baud_rate);
                match pump_lines(port, &tx) {
                    PumpEnd::ReceiverGone => return,
                    PumpEnd::Closed => tracing::warn!("[SERIAL] {} closed", config.device),
                    PumpEnd::ReadFailed(e) => tracing::warn!("[SERIAL] Read error on {}: {}", config.device, e),
                }
            }
            Err(e) => {
                tracing::error!("[SERIAL] Failed to open {}: {}", config.device, e);
            }
        }

        if tx.is_closed() {
            return;
        }
        tracing::info!("[SERIAL] Retrying in {}s", config.reconnect_seconds);
        std::thread::sleep(config.reconnect_delay());
    }
}

/// start the blocking port reader and return the line stream it feeds
pub fn spawn_reader(config: SerialConfig) -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(config.channel_capacity.max(1));
    tokio::task::spawn_blocking(move || read_port_forever(config, tx));
    rx
}

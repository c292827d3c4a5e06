//! Serial transport bridge: owns the one physical connection a session may
//! hold, encodes outbound lines, and runs the inbound reader as a background
//! thread that republishes decoded lines over the kernel bus.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::kernel::services::bus::KernelBusSender;
use crate::kernel::services::ports::{SerialError, SerialEvent};
use crate::kernel::Action;

/// Poll interval of the blocking read; also bounds how long `disconnect`
/// waits for the reader thread to observe the stop flag.
const READ_POLL: Duration = Duration::from_millis(100);
const READ_BUF: usize = 512;

pub struct SerialLink {
    bus: KernelBusSender,
    /// Last received line, last-value-wins; the reader thread is its only
    /// writer.
    latest: Arc<Mutex<Option<String>>>,
    active: Option<ActiveLink>,
}

struct ActiveLink {
    port_name: String,
    writer: Box<dyn io::Write + Send>,
    stop: Arc<AtomicBool>,
    reader: Option<JoinHandle<()>>,
}

impl SerialLink {
    pub fn new(bus: KernelBusSender) -> Self {
        Self {
            bus,
            latest: Arc::new(Mutex::new(None)),
            active: None,
        }
    }

    /// Enumerates candidate devices for the picker. An enumeration failure
    /// means the host has no usable serial capability.
    pub fn available_ports() -> Result<Vec<String>, SerialError> {
        let ports = serialport::available_ports().map_err(|e| SerialError::Unavailable {
            reason: e.to_string(),
        })?;
        if ports.is_empty() {
            return Err(SerialError::NoPorts);
        }
        Ok(ports.into_iter().map(|p| p.port_name).collect())
    }

    pub fn is_connected(&self) -> bool {
        self.active.is_some()
    }

    pub fn latest_line(&self) -> Option<String> {
        self.latest.lock().ok().and_then(|latest| latest.clone())
    }

    pub fn connect(&mut self, port: &str, baud: u32) -> Result<(), SerialError> {
        if self.active.is_some() {
            // Never a second reader on the same port.
            tracing::warn!(port = %port, "connect rejected: already connected");
            return Err(SerialError::AlreadyConnected);
        }

        let writer = serialport::new(port, baud)
            .timeout(READ_POLL)
            .open()
            .map_err(|source| SerialError::Open {
                port: port.to_string(),
                source,
            })?;
        let reader = writer.try_clone().map_err(|source| SerialError::Open {
            port: port.to_string(),
            source,
        })?;

        self.attach(port.to_string(), Box::new(writer), reader)?;
        tracing::info!(port = %port, baud, "serial connected");
        Ok(())
    }

    /// Installs an already-open writer/reader pair and starts the reader
    /// thread. Split out of [`connect`] so tests can drive the lifecycle with
    /// scripted streams instead of hardware.
    pub(crate) fn attach<R>(
        &mut self,
        port_name: String,
        writer: Box<dyn io::Write + Send>,
        reader: R,
    ) -> Result<(), SerialError>
    where
        R: io::Read + Send + 'static,
    {
        if self.active.is_some() {
            return Err(SerialError::AlreadyConnected);
        }

        let stop = Arc::new(AtomicBool::new(false));
        let handle = std::thread::Builder::new()
            .name("pindeck-serial-reader".to_string())
            .spawn({
                let stop = stop.clone();
                let latest = self.latest.clone();
                let bus = self.bus.clone();
                move || read_loop(reader, stop, latest, bus)
            })
            .map_err(|e| SerialError::Unavailable {
                reason: format!("spawn serial reader failed: {e}"),
            })?;

        self.active = Some(ActiveLink {
            port_name,
            writer,
            stop,
            reader: Some(handle),
        });
        Ok(())
    }

    /// Writes a wire line to the open port. Without a connection this is a
    /// no-op with a diagnostic; the caller is not expected to track link
    /// state before every send.
    pub fn send(&mut self, text: &str) {
        let Some(active) = self.active.as_mut() else {
            tracing::debug!("serial writer not available; dropping line");
            return;
        };

        if let Err(e) = active
            .writer
            .write_all(text.as_bytes())
            .and_then(|()| active.writer.flush())
        {
            tracing::warn!(port = %active.port_name, error = %e, "serial write failed");
        }
    }

    /// Tears the connection down: stop flag first, then join the reader (its
    /// port handle is released on thread exit), then drop the writer, which
    /// closes the port. Idempotent; calling while disconnected is a no-op.
    pub fn disconnect(&mut self) {
        let Some(mut active) = self.active.take() else {
            return;
        };

        active.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = active.reader.take() {
            if handle.join().is_err() {
                tracing::warn!(port = %active.port_name, "serial reader thread panicked");
            }
        }
        drop(active.writer);
        if let Ok(mut latest) = self.latest.lock() {
            *latest = None;
        }
        tracing::info!(port = %active.port_name, "serial disconnected");
    }

    /// Reconciles a connection whose reader ended on its own (end-of-stream
    /// or read fault) so the link never claims Connected with a dead reader.
    pub fn reap(&mut self) {
        self.disconnect();
    }
}

impl Drop for SerialLink {
    fn drop(&mut self) {
        self.disconnect();
    }
}

fn read_loop<R: io::Read>(
    mut reader: R,
    stop: Arc<AtomicBool>,
    latest: Arc<Mutex<Option<String>>>,
    bus: KernelBusSender,
) {
    let mut chunk = [0u8; READ_BUF];
    let mut pending: Vec<u8> = Vec::new();

    loop {
        if stop.load(Ordering::Relaxed) {
            return;
        }

        match reader.read(&mut chunk) {
            Ok(0) => {
                tracing::debug!("serial stream ended");
                if !stop.load(Ordering::Relaxed) {
                    let _ = bus.send_action(Action::Serial(SerialEvent::Closed));
                }
                return;
            }
            Ok(n) => {
                pending.extend_from_slice(&chunk[..n]);
                for line in drain_lines(&mut pending) {
                    if let Ok(mut latest) = latest.lock() {
                        *latest = Some(line.clone());
                    }
                    let _ = bus.send_action(Action::Serial(SerialEvent::Line(line)));
                }
            }
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::TimedOut | io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock
                ) =>
            {
                continue;
            }
            Err(e) => {
                tracing::warn!(error = %e, "serial read failed");
                if !stop.load(Ordering::Relaxed) {
                    let _ = bus.send_action(Action::Serial(SerialEvent::Fault {
                        message: format!("serial read failed: {e}"),
                    }));
                }
                return;
            }
        }
    }
}

/// Splits complete `\n`-terminated lines off the pending buffer; a trailing
/// partial line stays buffered for the next chunk. CR is stripped, bytes are
/// decoded lossily.
fn drain_lines(pending: &mut Vec<u8>) -> Vec<String> {
    let mut lines = Vec::new();
    while let Some(pos) = pending.iter().position(|b| *b == b'\n') {
        let raw: Vec<u8> = pending.drain(..=pos).collect();
        let text = String::from_utf8_lossy(&raw);
        lines.push(text.trim_end_matches(['\r', '\n']).to_string());
    }
    lines
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/serial.rs"]
mod tests;

use thiserror::Error;

/// Lifecycle of the one physical serial connection a runner session owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

impl LinkState {
    pub fn label(self) -> &'static str {
        match self {
            Self::Disconnected => "Disconnected",
            Self::Connecting => "Connecting",
            Self::Connected => "Connected",
        }
    }
}

/// Events the serial adapter publishes on the kernel bus. `Line` carries one
/// complete decoded inbound line; `Closed` is a clean end-of-stream, `Fault`
/// an unrecoverable read error. Both terminate the reader, and the store
/// reconciles the link to `Disconnected` on either.
#[derive(Debug, Clone)]
pub enum SerialEvent {
    Opened { port: String },
    Line(String),
    Closed,
    Fault { message: String },
}

#[derive(Debug, Error)]
pub enum SerialError {
    #[error("serial support unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("no serial devices detected")]
    NoPorts,

    #[error("already connected; disconnect first")]
    AlreadyConnected,

    #[error("failed to open {port}: {source}")]
    Open {
        port: String,
        #[source]
        source: serialport::Error,
    },
}

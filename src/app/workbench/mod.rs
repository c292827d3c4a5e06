//! Workbench: owns the store, the service adapters and the last-rendered
//! geometry used for mouse hit testing, and routes input/bus traffic into
//! kernel dispatches.

use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::layout::Rect;
use ratatui::Frame;
use uuid::Uuid;

use super::theme::UiTheme;
use crate::kernel::services::adapters::{storage, AsyncRuntime, SerialLink};
use crate::kernel::services::ports::{SerialEvent, StoreBlob};
use crate::kernel::services::{kernel_bus, KernelBusReceiver, KernelMessage};
use crate::kernel::{Action, AppState, Effect, Store};

mod input;
mod mouse;
mod render;

pub struct Workbench {
    store: Store,
    theme: UiTheme,
    serial: SerialLink,
    runtime: AsyncRuntime,
    bus_rx: KernelBusReceiver,
    dirty: bool,
    // Geometry of the last rendered frame, for mouse routing.
    last_canvas_area: Option<Rect>,
    last_widget_rects: Vec<(Uuid, Rect)>,
    last_home_rows_area: Option<Rect>,
}

impl Workbench {
    pub fn new() -> Self {
        let (bus_tx, bus_rx) = kernel_bus();
        let blob = storage::load_blob().unwrap_or_default();
        let store = Store::new(AppState::new(blob));
        let serial = SerialLink::new(bus_tx.clone());
        let runtime = AsyncRuntime::new(bus_tx);

        Self {
            store,
            theme: UiTheme::default(),
            serial,
            runtime,
            bus_rx,
            dirty: true,
            last_canvas_area: None,
            last_widget_rects: Vec::new(),
            last_home_rows_area: None,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.store.state().should_quit
    }

    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        input::handle_key(self, key);
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        mouse::handle_mouse(self, mouse);
    }

    pub fn render(&mut self, frame: &mut Frame) {
        render::render(self, frame);
    }

    /// Drains Actions queued by background services since the last tick.
    pub fn drain_bus(&mut self) {
        loop {
            let msg = match self.bus_rx.try_recv() {
                Ok(msg) => msg,
                Err(_) => break,
            };
            let KernelMessage::Action(action) = msg;
            if let Action::Serial(SerialEvent::Closed | SerialEvent::Fault { .. }) = &action {
                // The reader ended on its own; release its handles before the
                // reducer flips the link state.
                self.serial.reap();
            }
            self.dispatch(action);
        }
    }

    pub(super) fn dispatch(&mut self, action: Action) {
        let result = self.store.dispatch(action);
        if result.state_changed {
            self.dirty = true;
        }
        for effect in result.effects {
            self.run_effect(effect);
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::PersistStore => {
                self.runtime
                    .persist(StoreBlob::snapshot(&self.store.state().projects));
            }
            Effect::ListPorts => match SerialLink::available_ports() {
                Ok(ports) => self.dispatch(Action::PortsListed { ports }),
                Err(e) => self.dispatch(Action::SerialUnavailable {
                    message: e.to_string(),
                }),
            },
            Effect::SerialConnect { port, baud } => match self.serial.connect(&port, baud) {
                Ok(()) => self.dispatch(Action::Serial(SerialEvent::Opened { port })),
                Err(e) => self.dispatch(Action::SerialOpenFailed {
                    message: e.to_string(),
                }),
            },
            Effect::SerialDisconnect => self.serial.disconnect(),
            Effect::SerialSend { line } => self.serial.send(&line),
        }
    }

    /// Final synchronous write of the durable blob, for shutdown; in-session
    /// writes go through the async runtime.
    pub fn flush_store(&self) {
        if let Err(e) = storage::save_blob(&StoreBlob::snapshot(&self.store.state().projects)) {
            tracing::error!(error = %e, "final store flush failed");
        }
    }

    pub(super) fn store(&self) -> &Store {
        &self.store
    }
}

impl Default for Workbench {
    fn default() -> Self {
        Self::new()
    }
}

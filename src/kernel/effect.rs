/// Side effects the reducer requests; the workbench executes them against
/// the service adapters after each dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Overwrite the durable blob with the store's state (side channel,
    /// independent of save semantics).
    PersistStore,
    /// Enumerate serial devices for the port picker.
    ListPorts,
    SerialConnect { port: String, baud: u32 },
    SerialDisconnect,
    SerialSend { line: String },
}

pub const DEFAULT_BAUD: u32 = 9600;

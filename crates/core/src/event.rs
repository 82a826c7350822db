use crate::state::AppState;

/// All messages (events) that can flow into the display loop.
///
/// Sources:
/// - System monitor task   → `Sampled`
/// - Config watcher task   → `ConfigReloaded`
/// - Ctrl-C handler        → `Shutdown`
#[derive(Debug, Clone)]
pub enum Message {
    // ── System monitor ────────────────────────────────────────────────────────
    /// Fresh snapshot plus history from the background monitor task.
    Sampled(Box<AppState>),

    // ── Config ────────────────────────────────────────────────────────────────
    /// Config file changed on disk.
    ConfigReloaded,

    // ── Internal ──────────────────────────────────────────────────────────────
    /// Graceful shutdown requested.
    Shutdown,
}

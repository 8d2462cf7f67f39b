//! User-facing notifications raised by the bridge.

/// Shown when an operation needs a wallet and none is available.
pub const NO_WALLET_ALERT: &str = "Please install and connect an Ethereum wallet";

/// Host hooks for messages the user must see.
pub trait Notifier: Send + Sync + std::fmt::Debug {
    /// Blocking alert.
    fn alert(&self, message: &str);

    /// The bridge rebuilt its state after a new wallet connection.
    fn reload_requested(&self) {}
}

/// Notifier for headless hosts: alerts become warnings in the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn alert(&self, message: &str) {
        tracing::warn!(alert = %message, "User alert");
    }

    fn reload_requested(&self) {
        tracing::info!("Bridge state reloaded");
    }
}

use log::{error, info};

use crate::domain::{Notification, NotificationKind};
use crate::notify::Notifier;

/// `env_logger` with `RUST_LOG` defaulting to `info`.
pub fn init() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    let _ = env_logger::try_init();
}

pub fn log_rejection(reason: &str) {
    error!("❌ {}", reason);
}

pub fn log_success(msg: &str) {
    info!("✅ {}", msg);
}

/// Notifier that writes every notification to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Success => log_success(&notification.message),
            NotificationKind::Error => log_rejection(&notification.message),
        }
    }
}

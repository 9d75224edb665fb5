//! Fire-and-forget notifications: welcome, inactivity warning, auto-drop.
//!
//! Delivery failures are never surfaced to callers; implementations log and
//! swallow them. The engine treats every send as best-effort.

/// A notification sink. The web binary uses [`LogNotifier`]; a real deployment
/// plugs an email sender behind the same trait.
pub trait Notifier: Send + Sync {
    fn send(&self, to: &str, subject: &str, body: &str);
}

/// Logs notifications at info level instead of delivering them.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn send(&self, to: &str, subject: &str, body: &str) {
        log::info!("notify {}: {} / {}", to, subject, body);
    }
}

/// Drops notifications entirely. Useful in tests.
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn send(&self, _to: &str, _subject: &str, _body: &str) {}
}

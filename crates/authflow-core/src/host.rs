//! Hooks into the surrounding application: routing and notifications.
//!
//! Both are fire-and-forget; the login flow never waits on them.

/// Moves the user to another page.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// Shows a transient success message (toast, banner, status line).
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
}

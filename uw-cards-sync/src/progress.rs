//! Sync progress reporting.

/// Trait for receiving sync progress updates.
pub trait SyncProgress {
    /// Called when a phase starts (e.g., "Fetching de cards").
    fn on_phase(&self, message: &str);

    /// Called after each merged card's image has been checked or fetched.
    fn on_image(&self, current: usize, total: usize, name: &str);

    /// Called when a locale is done.
    fn on_complete(&self, message: &str);
}

/// A no-op progress reporter that discards all updates.
pub struct SilentProgress;

impl SyncProgress for SilentProgress {
    fn on_phase(&self, _message: &str) {}
    fn on_image(&self, _current: usize, _total: usize, _name: &str) {}
    fn on_complete(&self, _message: &str) {}
}

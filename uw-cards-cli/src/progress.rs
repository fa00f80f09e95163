//! Progress bar for the image cache pass.

use std::cell::RefCell;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use uw_cards_sync::SyncProgress;

/// Logs phases and draws a bar while card images are checked.
pub(crate) struct BarProgress {
    quiet: bool,
    bar: RefCell<Option<ProgressBar>>,
}

impl BarProgress {
    pub(crate) fn new(quiet: bool) -> Self {
        Self {
            quiet,
            bar: RefCell::new(None),
        }
    }

    fn finish(&self) {
        if let Some(bar) = self.bar.borrow_mut().take() {
            bar.finish_and_clear();
        }
    }

    fn new_bar(&self, total: usize) -> ProgressBar {
        let bar = if self.quiet {
            ProgressBar::with_draw_target(Some(total as u64), ProgressDrawTarget::hidden())
        } else {
            ProgressBar::new(total as u64)
        };
        bar.set_style(
            ProgressStyle::with_template("  {bar:30.cyan/blue} {pos}/{len} {msg}")
                .expect("static pattern"),
        );
        bar
    }
}

impl SyncProgress for BarProgress {
    fn on_phase(&self, message: &str) {
        self.finish();
        log::info!("{message}");
    }

    fn on_image(&self, current: usize, total: usize, name: &str) {
        let mut slot = self.bar.borrow_mut();
        let bar = slot.get_or_insert_with(|| self.new_bar(total));
        bar.set_position(current as u64);
        bar.set_message(name.to_string());
    }

    fn on_complete(&self, message: &str) {
        self.finish();
        log::debug!("{message}");
    }
}

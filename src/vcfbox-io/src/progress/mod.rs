use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use located_error::LocatedError;
use logger::Logger;

#[cfg(any(test, feature = "mock"))]
use mockall::automock;

const TICK_STRINGS: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Sink for per-record progress notifications.
#[cfg_attr(any(test, feature = "mock"), automock)]
pub trait ProgressSink {
    /// One more record was processed.
    fn increment(&self);

    /// The stream is exhausted.
    fn finish(&self);
}

impl ProgressSink for ProgressBar {
    fn increment(&self) {
        self.inc(1);
    }

    fn finish(&self) {
        ProgressBar::finish(self);
    }
}

/// A sink that discards every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl ProgressSink for Silent {
    fn increment(&self) {}
    fn finish(&self) {}
}

/// Attach `bar` to the logger's `MultiProgress`. Bars are hidden when no logger is running.
fn register(bar: ProgressBar) -> ProgressBar {
    match Logger::multi() {
        Some(multi) => multi.add(bar),
        None        => {
            bar.set_draw_target(indicatif::ProgressDrawTarget::hidden());
            bar
        }
    }
}

/// Bounded progress bar, for a stream of `total` records.
///
/// # Errors
/// - if the progress bar template is invalid.
pub fn progress_bar(total: u64, message: &'static str) -> Result<ProgressBar> {
    let style = ProgressStyle::with_template("{spinner:.green} {msg} [{bar:40.cyan/blue}] {pos}/{len} ({per_sec}, eta: {eta})")
        .loc("While building progress bar style")?
        .tick_strings(&TICK_STRINGS)
        .progress_chars("#>-");

    let bar = register(ProgressBar::new(total).with_style(style).with_message(message));
    bar.enable_steady_tick(Duration::from_millis(100));
    Ok(bar)
}

/// Unbounded spinner, displaying the running number of processed records.
///
/// # Errors
/// - if the spinner template is invalid.
pub fn spinner(message: &'static str) -> Result<ProgressBar> {
    let style = ProgressStyle::with_template("{spinner:.green} {msg} {pos} ({per_sec})")
        .loc("While building spinner style")?
        .tick_strings(&TICK_STRINGS);

    let bar = register(ProgressBar::new_spinner().with_style(style).with_message(message));
    bar.enable_steady_tick(Duration::from_millis(100));
    Ok(bar)
}

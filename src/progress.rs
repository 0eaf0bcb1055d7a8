// src/progress.rs

//! Defines the loading indicator shown while the repository is cloned.
//!
//! The indicator is decorative: it is started right before the blocking clone
//! call and stopped right after it, on success and failure alike, before
//! anything else is printed.
#[cfg(feature = "progress")]
use indicatif::{ProgressBar, ProgressStyle};
#[cfg(feature = "progress")]
use std::sync::Mutex;

/// A trait for animating a wait, abstracting over specific implementations like `indicatif`.
///
/// # Examples
///
/// ```
/// use repo_slice::progress::LoadingIndicator;
/// use std::sync::Mutex;
///
/// // A mock indicator that records what happened.
/// struct MockIndicator {
///     events: Mutex<Vec<String>>,
/// }
/// impl LoadingIndicator for MockIndicator {
///     fn start(&self, msg: &str) {
///         self.events.lock().unwrap().push(format!("start {}", msg));
///     }
///     fn stop(&self) {
///         self.events.lock().unwrap().push("stop".to_string());
///     }
/// }
///
/// let indicator = MockIndicator { events: Mutex::new(Vec::new()) };
/// indicator.start("Cloning");
/// indicator.stop();
/// assert_eq!(*indicator.events.lock().unwrap(), vec!["start Cloning", "stop"]);
/// ```
pub trait LoadingIndicator: Send + Sync {
    /// Starts animating with the given message.
    fn start(&self, msg: &str);
    /// Stops the animation and erases its line.
    fn stop(&self);
}

/// A `LoadingIndicator` that does nothing.
///
/// This is used when stderr is not a terminal or the spinner is disabled.
pub struct NoOpIndicator;

impl LoadingIndicator for NoOpIndicator {
    fn start(&self, _msg: &str) {}
    fn stop(&self) {}
}

/// A ticking "Please wait..." spinner built on `indicatif`.
///
/// A background timer redraws the line every
/// [`LOADING_TICK_INTERVAL_MS`](crate::constants::LOADING_TICK_INTERVAL_MS),
/// cycling through zero to three dots.
#[cfg(feature = "progress")]
#[derive(Default)]
pub struct SpinnerIndicator {
    bar: Mutex<Option<ProgressBar>>,
}

#[cfg(feature = "progress")]
impl SpinnerIndicator {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(feature = "progress")]
impl LoadingIndicator for SpinnerIndicator {
    fn start(&self, msg: &str) {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("   {msg}{spinner}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["", ".", "..", "...", ""]),
        );
        bar.set_message(msg.to_string());
        bar.enable_steady_tick(std::time::Duration::from_millis(
            crate::constants::LOADING_TICK_INTERVAL_MS,
        ));
        if let Ok(mut slot) = self.bar.lock() {
            if let Some(previous) = slot.replace(bar) {
                previous.finish_and_clear();
            }
        }
    }

    fn stop(&self) {
        if let Ok(mut slot) = self.bar.lock() {
            if let Some(bar) = slot.take() {
                bar.finish_and_clear();
            }
        }
    }
}

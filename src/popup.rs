//! Debounced, cancelable popup display
//!
//! The popup is shown only after the typing pause exceeds the configured
//! delay. Every call to [`PopupScheduler::show`] or [`PopupScheduler::hide`]
//! starts a new generation; a delayed render checks the generation before
//! drawing, so keys typed in quick succession never flash stale popups.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use crate::keymap::{KeySequence, Keystroke};
use crate::resolver::Mapping;

/// Everything the renderer needs for one popup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupContent {
    pub typed: KeySequence,
    /// Custom description of the typed prefix, if any
    pub title: Option<String>,
    pub mappings: Vec<(Keystroke, Mapping)>,
}

/// Host-side renderer
pub trait PopupSink: Send + Sync {
    fn show(&self, content: &PopupContent);
    fn hide(&self);
}

#[derive(Debug, Default)]
struct PopupState {
    generation: u64,
    visible: bool,
}

fn lock(state: &Mutex<PopupState>) -> MutexGuard<'_, PopupState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub struct PopupScheduler {
    sink: Arc<dyn PopupSink>,
    delay: Duration,
    state: Arc<Mutex<PopupState>>,
}

impl PopupScheduler {
    pub fn new(sink: Arc<dyn PopupSink>, delay: Duration) -> Self {
        Self {
            sink,
            delay,
            state: Arc::new(Mutex::new(PopupState::default())),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Whether the sink currently shows a popup
    pub fn is_visible(&self) -> bool {
        lock(&self.state).visible
    }

    /// Schedule `content` for display `delay` after `started`
    ///
    /// Time already spent since `started` counts against the delay. With no
    /// delay left the popup is drawn before returning. Empty content cancels
    /// whatever was pending and hides the popup on screen.
    pub fn show(&self, started: Instant, content: PopupContent) {
        let generation = {
            let mut state = lock(&self.state);
            state.generation += 1;
            if content.mappings.is_empty() {
                if state.visible {
                    self.sink.hide();
                    state.visible = false;
                }
                return;
            }
            state.generation
        };

        let remaining = self.delay.saturating_sub(started.elapsed());
        if remaining.is_zero() {
            render(&self.state, self.sink.as_ref(), generation, &content);
            return;
        }

        let state = Arc::clone(&self.state);
        let sink = Arc::clone(&self.sink);
        std::thread::spawn(move || {
            std::thread::sleep(remaining);
            render(&state, sink.as_ref(), generation, &content);
        });
    }

    /// Cancel any pending popup and hide the visible one
    pub fn hide(&self) {
        let mut state = lock(&self.state);
        state.generation += 1;
        if state.visible {
            self.sink.hide();
            state.visible = false;
        }
    }
}

fn render(state: &Mutex<PopupState>, sink: &dyn PopupSink, generation: u64, content: &PopupContent) {
    let mut state = lock(state);
    if state.generation != generation {
        tracing::trace!("Dropping superseded popup for {}", content.typed);
        return;
    }
    sink.show(content);
    state.visible = true;
}

impl Drop for PopupScheduler {
    fn drop(&mut self) {
        // Pending renders see a newer generation and give up
        lock(&self.state).generation += 1;
    }
}

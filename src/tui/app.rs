//! GradientApp: the TEA model.
//!
//! All state lives here. Update receives AppMessages, mutates state.
//! View reads state to produce ratatui widgets. No side effects in view;
//! work that leaves the loop (clipboard, timers, saving) is queued as
//! `Effect`s for the runner.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, error, info};

use crate::clipboard::ClipboardError;
use crate::config::GradientConfig;
use crate::gradient::{self, GradientError, GradientState};

use super::event::AppMessage;
use super::stops::StopList;

/// Copy control label at rest.
pub const COPY_LABEL: &str = "Copy to Clipboard";
/// Copy control label after a successful write.
pub const COPIED_LABEL: &str = "Copied!";
/// Copy control label after a failed write.
pub const COPY_FAILED_LABEL: &str = "Copy failed";

/// Ticks a status message stays visible (4Hz tick → ~3s).
const STATUS_TICKS: u8 = 12;

/// State of the copy control's label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyLabel {
    Idle,
    Copied,
    Failed,
}

impl CopyLabel {
    pub fn text(self) -> &'static str {
        match self {
            CopyLabel::Idle => COPY_LABEL,
            CopyLabel::Copied => COPIED_LABEL,
            CopyLabel::Failed => COPY_FAILED_LABEL,
        }
    }
}

/// Transient status-bar message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub is_error: bool,
    ticks_left: u8,
}

/// Work the runner performs on the app's behalf.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Write this text to the clipboard.
    Copy(String),
    /// Post `ResetCopyLabel(generation)` after the delay.
    ResetCopyLabel { generation: u64, after: Duration },
    /// Persist this gradient as the startup preset.
    SavePreset(GradientState),
}

/// The main TUI application state (TEA model).
pub struct GradientApp {
    /// The gradient. Single source of truth for every output.
    pub state: GradientState,
    /// Per-stop controls, derived from `state`.
    pub stops: StopList,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Copy control label.
    pub copy_label: CopyLabel,
    /// Bumped every time the copy label changes away from idle.
    pub copy_generation: u64,
    /// Transient status message.
    pub status: Option<StatusLine>,
    /// Keep the stop count on randomize.
    pub preserve_count: bool,
    /// How long copy feedback stays up.
    pub copy_feedback: Duration,
    rng: StdRng,
    effects: Vec<Effect>,
}

impl GradientApp {
    /// Create a new app with the default gradient and an entropy-seeded RNG.
    pub fn new() -> Self {
        Self::with_rng(&GradientConfig::default(), StdRng::from_entropy())
    }

    /// Create from configuration with an explicit random source.
    pub fn with_rng(config: &GradientConfig, rng: StdRng) -> Self {
        let state = config.initial_state();
        let stops = StopList::from_state(&state);
        Self {
            state,
            stops,
            should_quit: false,
            copy_label: CopyLabel::Idle,
            copy_generation: 0,
            status: None,
            preserve_count: config.randomize.preserve_count,
            copy_feedback: Duration::from_millis(config.copy.feedback_ms),
            rng,
            effects: Vec::new(),
        }
    }

    /// Create from configuration; `seed` makes randomness reproducible.
    pub fn from_config(config: &GradientConfig, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    /// Handle an AppMessage (TEA update).
    pub fn update(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::Input(key) => {
                super::input::handle_key(self, key);
            }
            AppMessage::Tick => {
                if let Some(status) = &mut self.status {
                    status.ticks_left = status.ticks_left.saturating_sub(1);
                    if status.ticks_left == 0 {
                        self.status = None;
                    }
                }
            }
            AppMessage::CopyFinished(result) => self.copy_finished(result),
            AppMessage::ResetCopyLabel(generation) => {
                // Stale timers from earlier copies are ignored.
                if generation == self.copy_generation {
                    self.copy_label = CopyLabel::Idle;
                }
            }
            AppMessage::Quit => {
                self.should_quit = true;
            }
        }
    }

    /// Drain queued effects (consumed by the runner after each update).
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    // ── Derived outputs ──

    /// The gradient function text.
    pub fn gradient_string(&self) -> String {
        gradient::render(&self.state)
    }

    /// The declaration shown in the CSS pane and copied.
    pub fn css_text(&self) -> String {
        gradient::css_declaration(&self.state)
    }

    /// Angle label, e.g. `90°`.
    pub fn angle_label(&self) -> String {
        format!("{}\u{00B0}", self.state.angle())
    }

    /// The angle control is only shown for linear gradients.
    pub fn angle_visible(&self) -> bool {
        self.state.kind().uses_angle()
    }

    // ── Actions ──

    pub fn toggle_kind(&mut self) {
        self.state.toggle_kind();
        debug!(kind = %self.state.kind(), "gradient kind changed");
    }

    pub fn nudge_angle(&mut self, delta: i64) {
        if self.angle_visible() {
            self.state.nudge_angle(delta);
        }
    }

    /// Set an exact angle. Out-of-range values are rejected and reported.
    pub fn set_angle(&mut self, angle: i64) {
        if let Err(e) = self.state.set_angle(angle) {
            self.reject(e);
        }
    }

    /// Append a random stop and rebuild the stop controls.
    pub fn add_stop(&mut self) {
        match self.state.add_random_stop(&mut self.rng) {
            Ok(color) => {
                self.stops.rebuild(&self.state);
                self.stops.select(self.state.len() - 1);
                debug!(%color, count = self.state.len(), "stop added");
            }
            Err(e) => self.reject(e),
        }
    }

    /// Remove the selected stop and rebuild the stop controls.
    pub fn remove_selected(&mut self) {
        let index = self.stops.selected();
        match self.state.remove_stop(index) {
            Ok(color) => {
                self.stops.rebuild(&self.state);
                debug!(%color, index, count = self.state.len(), "stop removed");
            }
            Err(e) => self.reject(e),
        }
    }

    /// Replace one stop's color. Never rebuilds the controls.
    pub fn set_stop_color(&mut self, index: usize, hex: &str) {
        if let Err(e) = self.state.set_stop_hex(index, hex) {
            self.reject(e);
        }
    }

    /// Fresh colors and angle; controls rebuilt.
    pub fn randomize(&mut self) {
        self.state.randomize(&mut self.rng, self.preserve_count);
        self.stops.rebuild(&self.state);
        debug!(gradient = %self.gradient_string(), "randomized");
    }

    /// Queue a clipboard write of the current declaration.
    pub fn copy_current_css(&mut self) {
        self.effects.push(Effect::Copy(self.css_text()));
    }

    /// Queue saving the current gradient as the startup preset.
    pub fn save_preset(&mut self) {
        self.effects.push(Effect::SavePreset(self.state.clone()));
    }

    // ── Hex editor ──

    pub fn begin_edit(&mut self) {
        self.stops.begin_edit(&self.state);
    }

    pub fn edit_push(&mut self, ch: char) {
        if let Some((index, text)) = self.stops.push_char(ch) {
            self.apply_draft(index, &text);
        }
    }

    pub fn edit_backspace(&mut self) {
        if let Some((index, text)) = self.stops.backspace() {
            self.apply_draft(index, &text);
        }
    }

    /// Close the editor, committing the draft. An incomplete draft is
    /// rejected and the last valid color stays.
    pub fn commit_edit(&mut self) {
        if let Some((index, draft)) = self.stops.finish_edit() {
            if draft.text != self.state.stops()[index].to_string() {
                self.set_stop_color(index, &draft.text);
            }
        }
    }

    /// Close the editor, restoring the color from before the edit.
    pub fn cancel_edit(&mut self) {
        if let Some((index, draft)) = self.stops.finish_edit() {
            if let Err(e) = self.state.set_stop_color(index, draft.original) {
                self.reject(e);
            }
        }
    }

    /// A complete draft is applied live; partial drafts wait.
    fn apply_draft(&mut self, index: usize, text: &str) {
        if text.len() == 7 {
            self.set_stop_color(index, text);
        }
    }

    // ── Status ──

    pub fn set_status(&mut self, text: impl Into<String>, is_error: bool) {
        self.status = Some(StatusLine {
            text: text.into(),
            is_error,
            ticks_left: STATUS_TICKS,
        });
    }

    /// Capacity limits are silent no-ops; invalid input is shown.
    fn reject(&mut self, e: GradientError) {
        if e.is_capacity() {
            debug!("ignored: {e}");
        } else {
            debug!("rejected: {e}");
            self.set_status(e.to_string(), true);
        }
    }

    fn copy_finished(&mut self, result: Result<(), ClipboardError>) {
        self.copy_generation += 1;
        match result {
            Ok(()) => {
                info!("copied gradient CSS to clipboard");
                self.copy_label = CopyLabel::Copied;
            }
            Err(e) => {
                error!("Failed to copy: {e}");
                self.copy_label = CopyLabel::Failed;
                self.set_status(e.to_string(), true);
            }
        }
        self.effects.push(Effect::ResetCopyLabel {
            generation: self.copy_generation,
            after: self.copy_feedback,
        });
    }
}

impl Default for GradientApp {
    fn default() -> Self {
        Self::new()
    }
}

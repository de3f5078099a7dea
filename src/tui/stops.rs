//! Stop-list reconciliation: per-stop controls derived from state.
//!
//! One `StopControl` per color stop, matched by index. Structural changes
//! (add, remove, randomize) tear the whole list down and rebuild it from
//! `GradientState`; color edits never do, so an open hex editor keeps its
//! draft and focus. Controls are never read back into state.

use crate::gradient::{ColorStop, GradientState};

/// Maximum length of a hex draft (`#rrggbb`).
const DRAFT_MAX_LEN: usize = 7;

/// An in-progress hex edit on one stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    /// Text as typed, always starting with `#`.
    pub text: String,
    /// Color when editing began (restored on cancel).
    pub original: ColorStop,
}

/// The on-screen control for one stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopControl {
    pub index: usize,
    /// Remove affordance is shown only above the two-stop floor.
    pub removable: bool,
    pub draft: Option<Draft>,
}

/// Ordered controls plus selection.
#[derive(Debug, Clone)]
pub struct StopList {
    controls: Vec<StopControl>,
    selected: usize,
    generation: u64,
}

impl StopList {
    pub fn from_state(state: &GradientState) -> Self {
        let mut list = Self {
            controls: Vec::new(),
            selected: 0,
            generation: 0,
        };
        list.rebuild(state);
        list
    }

    /// Tear down every control and rebuild from `state` in order.
    /// Selection is kept when still in range, else clamped to the last stop.
    pub fn rebuild(&mut self, state: &GradientState) {
        let removable = state.can_remove();
        self.controls = (0..state.len())
            .map(|index| StopControl {
                index,
                removable,
                draft: None,
            })
            .collect();
        self.selected = self.selected.min(self.controls.len().saturating_sub(1));
        self.generation += 1;
    }

    pub fn controls(&self) -> &[StopControl] {
        &self.controls
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// How many times the list has been rebuilt.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Select a specific stop (clamped).
    pub fn select(&mut self, index: usize) {
        self.selected = index.min(self.controls.len().saturating_sub(1));
    }

    pub fn select_next(&mut self) {
        if self.editing().is_none() && self.selected + 1 < self.controls.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        if self.editing().is_none() && self.selected > 0 {
            self.selected -= 1;
        }
    }

    /// Index of the control with an open editor, if any.
    pub fn editing(&self) -> Option<usize> {
        self.controls.iter().position(|c| c.draft.is_some())
    }

    /// Open the hex editor on the selected stop, seeded with its color.
    pub fn begin_edit(&mut self, state: &GradientState) {
        let index = self.selected;
        let Some(color) = state.stops().get(index).copied() else { return };
        if let Some(control) = self.controls.get_mut(index) {
            control.draft = Some(Draft {
                text: color.to_string(),
                original: color,
            });
        }
    }

    fn draft_mut(&mut self) -> Option<(usize, &mut Draft)> {
        self.controls
            .iter_mut()
            .find_map(|c| {
                let index = c.index;
                c.draft.as_mut().map(|d| (index, d))
            })
    }

    /// Append a hex digit to the open draft. Returns the draft text after
    /// the change, with the control's index.
    pub fn push_char(&mut self, ch: char) -> Option<(usize, String)> {
        let (index, draft) = self.draft_mut()?;
        if ch.is_ascii_hexdigit() && draft.text.len() < DRAFT_MAX_LEN {
            draft.text.push(ch.to_ascii_lowercase());
        }
        Some((index, draft.text.clone()))
    }

    /// Delete the last digit (the leading `#` stays).
    pub fn backspace(&mut self) -> Option<(usize, String)> {
        let (index, draft) = self.draft_mut()?;
        if draft.text.len() > 1 {
            draft.text.pop();
        }
        Some((index, draft.text.clone()))
    }

    /// Close the editor. Returns the index, final text and original color.
    pub fn finish_edit(&mut self) -> Option<(usize, Draft)> {
        self.controls
            .iter_mut()
            .find_map(|c| {
                let index = c.index;
                c.draft.take().map(|d| (index, d))
            })
    }
}

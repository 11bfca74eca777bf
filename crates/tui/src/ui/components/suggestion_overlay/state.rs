//! Suggestion overlay state: filtered candidates and the highlighted row.
//!
//! The overlay is pure presentation over the partial input and the candidate
//! list supplied by the application. It owns only the highlight.
//!
//! Key behaviors:
//! - Navigation clamps at both ends of the list; it never wraps.
//! - Any change to the candidates or to the partial input re-filters the list
//!   and resets the highlight to the first row.
//! - Selecting from an empty list does nothing.

use quill_types::{Outcome, OverlayCommand, OverlayEvent};
use tracing::debug;

/// Rows shown at once when the caller does not configure a limit.
pub const DEFAULT_MAX_ROWS: usize = 8;

#[derive(Clone, Debug)]
pub struct SuggestionOverlayState {
    /// Partial input the candidates are filtered against
    input: String,
    /// Every candidate supplied by the suggestion source
    candidates: Vec<String>,
    /// Candidates matching `input`, in display order
    filtered: Vec<String>,
    /// Index into `filtered`
    highlighted: usize,
    /// Number of rows visible at once
    max_rows: usize,
}

impl Default for SuggestionOverlayState {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ROWS)
    }
}

impl SuggestionOverlayState {
    pub fn new(max_rows: usize) -> Self {
        Self {
            input: String::new(),
            candidates: Vec::new(),
            filtered: Vec::new(),
            highlighted: 0,
            max_rows: max_rows.max(1),
        }
    }

    // ===== SELECTORS =====

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn filtered(&self) -> &[String] {
        &self.filtered
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn highlighted_candidate(&self) -> Option<&str> {
        self.filtered.get(self.highlighted).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.filtered.is_empty()
    }

    /// Height of the row area when rendered.
    pub fn visible_rows(&self) -> usize {
        self.filtered.len().min(self.max_rows)
    }

    // ===== REDUCERS =====

    /// Replace the candidate list. Last write wins.
    pub fn set_candidates(&mut self, candidates: Vec<String>) {
        debug!(count = candidates.len(), "overlay received candidates");
        self.candidates = candidates;
        self.refilter();
    }

    /// Update the partial input; a no-op when unchanged.
    pub fn set_input(&mut self, input: &str) {
        if self.input == input {
            return;
        }
        self.input = input.to_string();
        self.refilter();
    }

    pub fn set_max_rows(&mut self, max_rows: usize) {
        self.max_rows = max_rows.max(1);
    }

    /// Apply a command from the input core.
    pub fn handle_command(&mut self, command: OverlayCommand) -> Outcome<OverlayEvent> {
        match command {
            OverlayCommand::SelectUp => {
                self.highlighted = self.highlighted.saturating_sub(1);
                Outcome::handled()
            }
            OverlayCommand::SelectDown => {
                if !self.filtered.is_empty() {
                    self.highlighted = (self.highlighted + 1).min(self.filtered.len() - 1);
                }
                Outcome::handled()
            }
            OverlayCommand::Select => match self.highlighted_candidate() {
                Some(candidate) => Outcome::handled().with_event(OverlayEvent::SuggestionSelected(candidate.to_string())),
                None => Outcome::ignored(),
            },
        }
    }

    /// Pointer activation of a row. `commit` additionally asks the input core
    /// to submit the applied value.
    pub fn click_row(&mut self, row: usize, commit: bool) -> Outcome<OverlayEvent> {
        let Some(candidate) = self.filtered.get(row).cloned() else {
            return Outcome::ignored();
        };
        self.highlighted = row;
        let outcome = Outcome::handled().with_event(OverlayEvent::SuggestionSelected(candidate));
        if commit { outcome.with_event(OverlayEvent::Submit) } else { outcome }
    }

    fn refilter(&mut self) {
        self.filtered = filter_candidates(&self.input, &self.candidates);
        self.highlighted = 0;
    }
}

/// Candidates matching `input`, case-insensitively.
///
/// Prefix matches come first, then other substring matches, each group in
/// source order. Exact matches of the input and repeated candidates are
/// dropped. An empty input matches nothing.
pub fn filter_candidates(input: &str, candidates: &[String]) -> Vec<String> {
    if input.is_empty() {
        return Vec::new();
    }
    let needle = input.to_lowercase();
    let mut prefix: Vec<String> = Vec::new();
    let mut contains: Vec<String> = Vec::new();
    for candidate in candidates {
        let hay = candidate.to_lowercase();
        if hay == needle || prefix.contains(candidate) || contains.contains(candidate) {
            continue;
        }
        if hay.starts_with(&needle) {
            prefix.push(candidate.clone());
        } else if hay.contains(&needle) {
            contains.push(candidate.clone());
        }
    }
    prefix.extend(contains);
    prefix
}

//! # Quill TUI
//!
//! Terminal tag editor built on a suggestion-aware text input.
//!
//! ## Architecture
//!
//! Each widget is a plain reducer over typed messages that returns the events
//! it raises and the side effects it needs:
//!
//! - [`SuggestionInputState`]: field text, debounced focus, dismissal and
//!   overlay visibility
//! - [`SuggestionOverlayState`]: filtered candidates and the highlighted row
//! - [`TagEditorState`]: committed tags, fed by the input's `Submitted` and the
//!   tag list's `Deleted` events
//!
//! Components under `ui::components` render those states with ratatui and map
//! crossterm input onto reducer messages. The runtime executes effects (blur
//! timers, quitting) and delivers fetched suggestions.

mod app;
mod ui;

use anyhow::Result;
use quill_util::AppConfig;

pub use ui::components::common::TextInputState;
pub use ui::components::suggestion_input::{InputMsg, SuggestionInputState, show_overlay};
pub use ui::components::suggestion_overlay::{DEFAULT_MAX_ROWS, SuggestionOverlayState, filter_candidates};
pub use ui::components::tag_editor::{EMPTY_TAGS_LABEL, TagEditorMsg, TagEditorState, TagListState, TagListView};

/// Runs the tag editor until the user quits and returns the final tag set.
///
/// `tags` seeds the editor; `seed_candidates` are offered as suggestions until
/// the configured suggestion endpoint (if any) answers.
///
/// # Errors
///
/// Fails on an invalid suggestion base URL or when the terminal cannot be put
/// into raw mode / the alternate screen.
pub async fn run(config: AppConfig, tags: Vec<String>, seed_candidates: Vec<String>) -> Result<Vec<String>> {
    ui::runtime::run_app(config, tags, seed_candidates).await
}

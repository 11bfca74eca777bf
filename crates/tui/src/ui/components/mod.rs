//! UI components: suggestion input, suggestion overlay, tag editor.

pub mod common;
pub mod component;
pub mod suggestion_input;
pub mod suggestion_overlay;
pub mod tag_editor;

pub use component::*;
pub use suggestion_input::SuggestionInputComponent;
pub use suggestion_overlay::SuggestionOverlayComponent;
pub use tag_editor::TagEditorComponent;

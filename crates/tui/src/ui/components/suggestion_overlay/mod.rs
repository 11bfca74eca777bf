pub mod state;
pub mod suggestion_overlay_component;

pub use state::{DEFAULT_MAX_ROWS, SuggestionOverlayState, filter_candidates};
pub use suggestion_overlay_component::SuggestionOverlayComponent;

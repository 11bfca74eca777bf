pub mod state;
pub mod suggestion_input_component;

pub use state::{InputMsg, SuggestionInputState, show_overlay};
pub use suggestion_input_component::SuggestionInputComponent;

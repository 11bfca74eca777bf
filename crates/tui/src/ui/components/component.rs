//! Component system for the tag editor UI.
//!
//! Components are thin views over the reducers held in [`App`]. They translate
//! terminal input into reducer messages, render from the current state, and
//! report side effects back to the runtime as [`Effect`]s.

use crossterm::event::{KeyEvent, MouseEvent};
use quill_types::Effect;
use ratatui::{Frame, layout::Rect, text::Span};

use crate::app::App;

/// A UI component with its own rendering and input handling.
///
/// # Component Lifecycle
///
/// 1. **Event Handling**: keys and mouse events arrive through
///    `handle_key_events` / `handle_mouse_events`
/// 2. **State Updates**: handlers dispatch messages into `App`, which returns
///    the effects the runtime must execute (timers, quitting)
/// 3. **Rendering**: `render()` draws the component into the provided area
pub(crate) trait Component {
    /// Handle key events when this component has focus.
    fn handle_key_events(&mut self, _app: &mut App, _key: KeyEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle mouse events. Components hit-test against the areas they
    /// recorded during the last render.
    fn handle_mouse_events(&mut self, _app: &mut App, _mouse: MouseEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Render the component into the given area.
    ///
    /// Implementations should be side-effect free except for frame drawing,
    /// cursor placement and recording hit-test areas.
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App);

    /// Key hints shown in the footer while this component is focused.
    fn get_hint_spans(&self, _app: &App) -> Vec<Span<'_>> {
        Vec::new()
    }
}

//! Tag editor screen: input field, chip list, floating suggestions and hints.
//!
//! Routing rules:
//! - Tab / BackTab cycle focus between the field and the chip list
//! - Other keys go to whichever child holds focus
//! - Mouse presses hit the overlay first, since it floats above the list

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use quill_types::Effect;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::tag_list_component::TagListComponent;
use crate::app::App;
use crate::ui::components::component::Component;
use crate::ui::components::suggestion_input::SuggestionInputComponent;
use crate::ui::components::suggestion_overlay::SuggestionOverlayComponent;
use crate::ui::theme::{Theme, theme_helpers as th};

#[derive(Debug, Default)]
pub struct TagEditorComponent {
    input: SuggestionInputComponent,
    overlay: SuggestionOverlayComponent,
    list: TagListComponent,
}

impl TagEditorComponent {
    pub fn new() -> Self {
        Self::default()
    }

    fn layout(area: Rect) -> [Rect; 3] {
        Layout::vertical([
            Constraint::Length(3), // Input field
            Constraint::Min(3),    // Chip list
            Constraint::Length(1), // Hints
        ])
        .areas(area)
    }
}

impl Component for TagEditorComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Tab => {
                app.focus.next();
                app.sync_focus()
            }
            KeyCode::BackTab => {
                app.focus.prev();
                app.sync_focus()
            }
            _ if app.editor.f_list.get() => self.list.handle_key_events(app, key),
            _ => self.input.handle_key_events(app, key),
        }
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Vec::new();
        }
        if self.overlay.contains(mouse.column, mouse.row) {
            return self.overlay.handle_mouse_events(app, mouse);
        }
        if self.input.area().contains(Position::new(mouse.column, mouse.row)) {
            return app.focus_input();
        }
        self.list.handle_mouse_events(app, mouse)
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let [input_area, list_area, hints_area] = Self::layout(rect);
        self.input.render(frame, input_area, app);
        self.list.render(frame, list_area, app);

        let hints = Paragraph::new(Line::from(self.get_hint_spans(app))).style(app.theme.text_muted_style());
        frame.render_widget(hints, hints_area);

        // Last, so it floats above the chips.
        self.overlay.set_anchor(input_area);
        self.overlay.render(frame, rect, app);
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        let theme = &*app.theme;
        if app.editor.f_list.get() {
            return th::build_hint_spans(
                theme,
                &[
                    ("←/→", " Select  "),
                    ("Del", " Remove  "),
                    ("Tab", " Input  "),
                    ("Ctrl+C", " Done"),
                ],
            );
        }
        if app.editor.input().is_overlay_visible() {
            return th::build_hint_spans(
                theme,
                &[
                    ("↑/↓", " Highlight  "),
                    ("Enter", " Apply  "),
                    ("Esc", " Dismiss  "),
                    ("Ctrl+Click", " Apply & add"),
                ],
            );
        }
        th::build_hint_spans(
            theme,
            &[("Enter", " Add tag  "), ("Tab", " Tags  "), ("Ctrl+C", " Done")],
        )
    }
}

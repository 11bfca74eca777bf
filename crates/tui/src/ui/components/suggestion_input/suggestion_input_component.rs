//! Renders the text field of the suggestion input and feeds it keys.

use crossterm::event::KeyEvent;
use quill_types::{ControlKind, Effect};
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};
use unicode_width::UnicodeWidthStr;

use super::{InputMsg, SuggestionInputState};
use crate::app::App;
use crate::ui::components::component::Component;
use crate::ui::components::tag_editor::TagEditorMsg;
use crate::ui::theme::{Theme, theme_helpers as th};

const MASK: char = '•';

#[derive(Debug, Default)]
pub struct SuggestionInputComponent {
    /// Area drawn during the last render; the overlay anchors below it
    area: Rect,
}

impl SuggestionInputComponent {
    pub fn area(&self) -> Rect {
        self.area
    }

    fn create_input_line<'a>(&self, input: &'a SuggestionInputState, theme: &dyn Theme) -> Line<'a> {
        let value = input.value();
        if value.is_empty() {
            return Line::from(Span::styled(input.placeholder(), th::placeholder_style(theme)));
        }
        if input.kind().is_masked() {
            let masked: String = value.chars().map(|_| MASK).collect();
            return Line::from(masked);
        }
        Line::from(value)
    }

    /// Terminal column of the cursor relative to the start of the text.
    fn cursor_offset(input: &SuggestionInputState) -> u16 {
        let text = input.text();
        let columns = if input.kind().is_masked() {
            text.cursor_column()
        } else {
            text.input()[..text.cursor()].width()
        };
        u16::try_from(columns).unwrap_or(u16::MAX)
    }
}

impl Component for SuggestionInputComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        app.dispatch(TagEditorMsg::Input(InputMsg::Key {
            source: ControlKind::TextField,
            key,
        }))
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        self.area = rect;
        let theme = &*app.theme;
        let input = app.editor.input();
        let focused = app.editor.f_input.get();

        let title = format!("Add tag ({})", input.kind());
        let block = th::block(theme, None, focused).title(Span::styled(title, theme.text_secondary_style()));
        let inner = block.inner(rect);
        let paragraph = Paragraph::new(self.create_input_line(input, theme))
            .style(th::input_style(theme, focused))
            .block(block);
        frame.render_widget(paragraph, rect);

        if focused && input.has_focus() {
            let x = inner.x.saturating_add(Self::cursor_offset(input)).min(inner.right().saturating_sub(1));
            frame.set_cursor_position((x, inner.y));
        }
    }
}

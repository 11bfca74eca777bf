//! Chip strip for the committed tags.

use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use quill_types::Effect;
use ratatui::{
    Frame,
    layout::{Position, Rect},
    text::Span,
    widgets::Paragraph,
};

use super::tag_list::{TagListView, chip_label};
use super::TagEditorMsg;
use crate::app::App;
use crate::ui::components::component::Component;
use crate::ui::theme::{Theme, theme_helpers as th};

pub const EMPTY_TAGS_LABEL: &str = "No tags are set";

#[derive(Debug, Default)]
pub struct TagListComponent {
    area: Rect,
}

impl TagListComponent {
    pub fn contains(&self, column: u16, row: u16) -> bool {
        self.area.contains(Position::new(column, row))
    }
}

impl Component for TagListComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        app.dispatch(TagEditorMsg::ListKey(key))
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) || !self.contains(mouse.column, mouse.row) {
            return Vec::new();
        }
        let mut effects = app.focus_list();
        effects.extend(app.dispatch(TagEditorMsg::ListClick {
            column: mouse.column,
            row: mouse.row,
        }));
        effects
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        self.area = rect;
        let focused = app.editor.f_list.get();
        let block = th::block(&*app.theme, Some("Tags"), focused);
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        if let TagListView::Empty = app.editor.view() {
            let empty = Paragraph::new(EMPTY_TAGS_LABEL).style(app.theme.text_muted_style());
            frame.render_widget(empty, inner);
            return;
        }

        let chips = app.editor.layout_tags(inner);
        let theme = &*app.theme;
        let selected = app.editor.list().selected();
        for (index, (chip, tag)) in chips.iter().zip(app.editor.tags()).enumerate() {
            let style = if focused && index == selected {
                th::badge_selected_style(theme)
            } else {
                th::badge_style(theme)
            };
            frame.render_widget(Paragraph::new(Span::styled(chip_label(tag), style)), chip.chip);
        }
    }
}

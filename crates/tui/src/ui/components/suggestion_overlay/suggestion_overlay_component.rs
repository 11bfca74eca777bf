//! Floating suggestion list anchored below the text field.
//!
//! The overlay is mounted only while the input reports it visible, so an empty
//! filtered set never reaches the screen. Rows are hit-tested against the area
//! and scroll offset recorded during the last render.

use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use quill_types::Effect;
use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
};

use super::SuggestionOverlayState;
use crate::app::App;
use crate::ui::components::component::Component;
use crate::ui::components::suggestion_input::InputMsg;
use crate::ui::components::tag_editor::TagEditorMsg;
use crate::ui::theme::Theme;

#[derive(Debug, Default)]
pub struct SuggestionOverlayComponent {
    /// Field the overlay hangs from, set by the parent before rendering
    anchor: Rect,
    /// Rows area drawn during the last render; empty while unmounted
    rows_area: Rect,
    list_state: ListState,
}

impl SuggestionOverlayComponent {
    pub fn set_anchor(&mut self, anchor: Rect) {
        self.anchor = anchor;
    }

    pub fn is_mounted(&self) -> bool {
        !self.rows_area.is_empty()
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        self.is_mounted() && self.rows_area.contains(Position::new(column, row))
    }

    /// Index into the filtered list for a screen row, if it hits a row.
    pub fn row_at(&self, column: u16, row: u16) -> Option<usize> {
        if !self.contains(column, row) {
            return None;
        }
        Some(self.list_state.offset() + usize::from(row - self.rows_area.y))
    }

    /// Place the popup below the anchor, or above it when the screen runs out.
    fn popup_area(&self, frame_area: Rect, rows: usize) -> Rect {
        let height = u16::try_from(rows).unwrap_or(u16::MAX).saturating_add(2);
        let below = frame_area.bottom().saturating_sub(self.anchor.bottom());
        let above = self.anchor.y.saturating_sub(frame_area.y);
        let (y, height) = if below >= height || below >= above {
            (self.anchor.bottom(), height.min(below))
        } else {
            let height = height.min(above);
            (self.anchor.y - height, height)
        };
        Rect::new(self.anchor.x, y, self.anchor.width, height)
    }

    fn create_list<'a>(&self, overlay: &'a SuggestionOverlayState, theme: &dyn Theme) -> List<'a> {
        let items: Vec<ListItem> = overlay
            .filtered()
            .iter()
            .map(|candidate| ListItem::new(Line::from(Span::raw(candidate.as_str()))))
            .collect();
        List::new(items)
            .style(theme.overlay_style())
            .highlight_style(theme.selection_style().add_modifier(Modifier::BOLD))
            .highlight_symbol("► ")
    }
}

impl Component for SuggestionOverlayComponent {
    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Vec::new();
        }
        let Some(row) = self.row_at(mouse.column, mouse.row) else {
            return Vec::new();
        };
        let commit = mouse.modifiers.contains(KeyModifiers::CONTROL);
        app.dispatch(TagEditorMsg::Input(InputMsg::OverlayClick { row, commit }))
    }

    fn render(&mut self, frame: &mut Frame, _rect: Rect, app: &mut App) {
        let input = app.editor.input();
        if !input.is_overlay_visible() {
            self.rows_area = Rect::default();
            *self.list_state.offset_mut() = 0;
            return;
        }
        let theme = &*app.theme;
        let overlay = input.overlay();

        let area = self.popup_area(frame.area(), overlay.visible_rows());
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style(true))
            .style(theme.overlay_style());
        self.rows_area = block.inner(area);

        self.list_state.select(Some(overlay.highlighted()));
        frame.render_widget(Clear, area);
        frame.render_stateful_widget(self.create_list(overlay, theme).block(block), area, &mut self.list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn popup_flips_above_when_there_is_no_room_below() {
        let mut overlay = SuggestionOverlayComponent::default();
        overlay.set_anchor(Rect::new(0, 0, 20, 3));
        assert_eq!(overlay.popup_area(Rect::new(0, 0, 20, 24), 5), Rect::new(0, 3, 20, 7));

        overlay.set_anchor(Rect::new(0, 18, 20, 3));
        assert_eq!(overlay.popup_area(Rect::new(0, 0, 20, 24), 5), Rect::new(0, 11, 20, 7));
    }

    #[test]
    fn row_hit_test_accounts_for_scroll() {
        let mut overlay = SuggestionOverlayComponent {
            rows_area: Rect::new(1, 4, 18, 5),
            ..Default::default()
        };
        *overlay.list_state.offset_mut() = 3;
        assert_eq!(overlay.row_at(2, 4), Some(3));
        assert_eq!(overlay.row_at(2, 8), Some(7));
        assert_eq!(overlay.row_at(2, 9), None);
        assert_eq!(overlay.row_at(0, 4), None);
    }
}

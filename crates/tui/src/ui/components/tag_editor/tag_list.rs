//! Tag list display: committed tags rendered as chips.
//!
//! The list never mutates the tags it shows. It only raises `Deleted` for the
//! selected chip (Delete/Backspace) or for a chip whose `×` was clicked.

use crossterm::event::{KeyCode, KeyEvent};
use quill_types::{Outcome, TagListEvent};
use ratatui::layout::{Position, Rect};
use unicode_width::UnicodeWidthStr;

/// What the list presents. There is no loading variant: an empty tag set is a
/// terminal state and renders the "no tags" affordance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagListView<'a> {
    Empty,
    Tags(&'a [String]),
}

impl<'a> TagListView<'a> {
    pub fn of(tags: &'a [String]) -> Self {
        if tags.is_empty() { TagListView::Empty } else { TagListView::Tags(tags) }
    }
}

/// Screen placement of one chip, recorded while rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChipArea {
    pub chip: Rect,
    pub delete: Rect,
}

#[derive(Debug, Clone, Default)]
pub struct TagListState {
    /// Index of the selected chip
    selected: usize,
    /// Chip placements from the last layout pass
    chip_areas: Vec<ChipArea>,
}

impl TagListState {
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn chip_areas(&self) -> &[ChipArea] {
        &self.chip_areas
    }

    /// Keep the selection inside `[0, len - 1]` after the tags changed.
    pub fn clamp(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    pub fn handle_key(&mut self, key: KeyEvent, tags: &[String]) -> Outcome<TagListEvent> {
        if tags.is_empty() {
            return Outcome::ignored();
        }
        self.clamp(tags.len());
        match key.code {
            KeyCode::Left => {
                self.selected = self.selected.saturating_sub(1);
                Outcome::handled()
            }
            KeyCode::Right => {
                self.selected = (self.selected + 1).min(tags.len() - 1);
                Outcome::handled()
            }
            KeyCode::Home => {
                self.selected = 0;
                Outcome::handled()
            }
            KeyCode::End => {
                self.selected = tags.len() - 1;
                Outcome::handled()
            }
            KeyCode::Delete | KeyCode::Backspace => {
                Outcome::handled().with_event(TagListEvent::Deleted(tags[self.selected].clone()))
            }
            _ => Outcome::ignored(),
        }
    }

    /// Pointer click. Clicking a chip selects it; clicking its `×` deletes it.
    pub fn click(&mut self, column: u16, row: u16, tags: &[String]) -> Outcome<TagListEvent> {
        let position = Position::new(column, row);
        let Some(index) = self.chip_areas.iter().position(|area| area.chip.contains(position)) else {
            return Outcome::ignored();
        };
        let Some(tag) = tags.get(index) else {
            return Outcome::ignored();
        };
        self.selected = index;
        if self.chip_areas[index].delete.contains(position) {
            Outcome::handled().with_event(TagListEvent::Deleted(tag.clone()))
        } else {
            Outcome::handled()
        }
    }

    /// Lay chips out left to right inside `area`, wrapping onto the next row
    /// when a chip does not fit. Chips that do not fit vertically are dropped.
    pub fn layout(&mut self, area: Rect, tags: &[String]) -> &[ChipArea] {
        self.chip_areas.clear();
        let mut x = area.x;
        let mut y = area.y;
        for tag in tags {
            let width = chip_width(tag).min(area.width);
            if x > area.x && x + width > area.right() {
                x = area.x;
                y += 1;
            }
            if y >= area.bottom() || width == 0 {
                break;
            }
            let chip = Rect::new(x, y, width, 1);
            let delete = Rect::new(chip.right().saturating_sub(2), y, 1, 1);
            self.chip_areas.push(ChipArea { chip, delete });
            x = x.saturating_add(width + 1);
        }
        &self.chip_areas
    }
}

/// Rendered chip text: ` tag × `.
pub fn chip_label(tag: &str) -> String {
    format!(" {tag} × ")
}

pub fn chip_width(tag: &str) -> u16 {
    u16::try_from(chip_label(tag).width()).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn view_distinguishes_empty() {
        assert_eq!(TagListView::of(&[]), TagListView::Empty);
        let values = tags(&["veg"]);
        assert_eq!(TagListView::of(&values), TagListView::Tags(&values));
    }

    #[test]
    fn delete_key_emits_selected_tag() {
        let values = tags(&["veg", "fruit", "grain"]);
        let mut st = TagListState::default();
        st.handle_key(press(KeyCode::Right), &values);
        st.handle_key(press(KeyCode::Right), &values);
        st.handle_key(press(KeyCode::Right), &values);
        assert_eq!(st.selected(), 2);
        let outcome = st.handle_key(press(KeyCode::Delete), &values);
        assert_eq!(outcome.events, vec![TagListEvent::Deleted("grain".into())]);
    }

    #[test]
    fn keys_on_empty_list_are_ignored() {
        let mut st = TagListState::default();
        assert!(!st.handle_key(press(KeyCode::Delete), &[]).handled);
    }

    #[test]
    fn layout_wraps_and_click_hits_delete_button() {
        let values = tags(&["veg", "fruit", "grain"]);
        let mut st = TagListState::default();
        // " veg × " is 7 wide, " fruit × " is 9 wide.
        let areas = st.layout(Rect::new(0, 0, 18, 2), &values).to_vec();
        assert_eq!(areas.len(), 3);
        assert_eq!(areas[0].chip, Rect::new(0, 0, 7, 1));
        assert_eq!(areas[1].chip, Rect::new(8, 0, 9, 1));
        assert_eq!(areas[2].chip, Rect::new(0, 1, 9, 1));

        let outcome = st.click(2, 0, &values);
        assert!(outcome.events.is_empty());
        assert_eq!(st.selected(), 0);

        let delete = areas[1].delete;
        let outcome = st.click(delete.x, delete.y, &values);
        assert_eq!(outcome.events, vec![TagListEvent::Deleted("fruit".into())]);

        assert!(!st.click(17, 1, &values).handled);
    }
}

use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders},
};

use super::roles::{Theme, ThemeRoles};

/// Build a standard Block with theme surfaces and borders.
pub fn block<'a, T: Theme + ?Sized>(theme: &'a T, title: Option<&'a str>, focused: bool) -> Block<'a> {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(theme.border_style(focused))
        .style(panel_style(theme));
    if let Some(t) = title {
        block = block.title(Span::styled(t, theme.text_secondary_style().add_modifier(Modifier::BOLD)));
    }
    block
}

/// Style for panel-like containers (set background on widget using `.style`).
pub fn panel_style<T: Theme + ?Sized>(theme: &T) -> Style {
    let ThemeRoles { surface, text, .. } = *theme.roles();
    Style::default().bg(surface).fg(text)
}

/// Style for the text field; masked and invalid states are the caller's concern.
pub fn input_style<T: Theme + ?Sized>(theme: &T, focused: bool) -> Style {
    let ThemeRoles { surface, text, .. } = *theme.roles();
    let style = Style::default().bg(surface).fg(text);
    if focused { style.add_modifier(Modifier::BOLD) } else { style }
}

/// Placeholder text shown while the field is empty.
pub fn placeholder_style<T: Theme + ?Sized>(theme: &T) -> Style {
    theme.text_muted_style().add_modifier(Modifier::ITALIC)
}

/// Tag chip style (filled accent, readable text).
pub fn badge_style<T: Theme + ?Sized>(theme: &T) -> Style {
    let ThemeRoles { accent_secondary, .. } = *theme.roles();
    Style::default().bg(accent_secondary).fg(Color::Black)
}

/// Chip style for the selected tag while the list has focus.
pub fn badge_selected_style<T: Theme + ?Sized>(theme: &T) -> Style {
    let ThemeRoles { accent_primary, .. } = *theme.roles();
    Style::default()
        .bg(accent_primary)
        .fg(Color::Black)
        .add_modifier(Modifier::BOLD)
}

/// Key hint strip: each pair renders as an emphasized key and a muted label.
pub fn build_hint_spans<T: Theme + ?Sized>(theme: &T, hints: &[(&'static str, &'static str)]) -> Vec<Span<'static>> {
    hints
        .iter()
        .flat_map(|(key, label)| {
            [
                Span::styled(*key, theme.accent_emphasis_style()),
                Span::styled(*label, theme.text_muted_style()),
            ]
        })
        .collect()
}

/// Darken an RGB color by a multiplicative factor (0.0..=1.0).
/// If the color is not RGB, returns it unchanged.
pub fn darken_rgb(color: Color, factor: f32) -> Color {
    match color {
        Color::Rgb(r, g, b) => {
            let f = factor.clamp(0.0, 1.0);
            let scale = |c: u8| (c as f32 * f).round().clamp(0.0, 255.0) as u8;
            Color::Rgb(scale(r), scale(g), scale(b))
        }
        other => other,
    }
}

/// Move an RGB color toward white by `amount` (0.0..=1.0).
pub fn lighten_rgb(color: Color, amount: f32) -> Color {
    match color {
        Color::Rgb(r, g, b) => {
            let a = amount.clamp(0.0, 1.0);
            let lift = |c: u8| (c as f32 + (255.0 - c as f32) * a).round().clamp(0.0, 255.0) as u8;
            Color::Rgb(lift(r), lift(g), lift(b))
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn darken_and_lighten_only_touch_rgb() {
        assert_eq!(darken_rgb(Color::Rgb(100, 50, 10), 0.5), Color::Rgb(50, 25, 5));
        assert_eq!(lighten_rgb(Color::Rgb(0, 0, 0), 1.0), Color::Rgb(255, 255, 255));
        assert_eq!(darken_rgb(Color::Red, 0.5), Color::Red);
    }

    #[test]
    fn hint_spans_pair_keys_with_labels() {
        let theme = crate::ui::theme::NordTheme::new();
        let spans = build_hint_spans(&theme, &[("Enter", " Add "), ("Esc", " Dismiss")]);
        let text: Vec<&str> = spans.iter().map(|span| span.content.as_ref()).collect();
        assert_eq!(text, ["Enter", " Add ", "Esc", " Dismiss"]);
        assert_eq!(spans[0].style, theme.accent_emphasis_style());
    }
}

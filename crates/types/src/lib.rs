//! Shared event contract for the Quill input components.
//!
//! Components only talk to each other through the values defined here.
//! Properties flow down as plain fields and events flow up as the enums
//! below; nothing in this crate depends on a terminal backend.

use std::{error::Error, fmt, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};

/// Delay between a blur and the moment the field is considered unfocused.
///
/// Focus that returns within this window (tabbing away and back, a terminal
/// focus flicker) never hides the suggestion overlay.
pub const DEFAULT_BLUR_DELAY: Duration = Duration::from_millis(200);

/// Semantic kind of a text field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    #[default]
    Text,
    Search,
    Email,
    Url,
    Number,
    Password,
}

impl InputKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            InputKind::Text => "text",
            InputKind::Search => "search",
            InputKind::Email => "email",
            InputKind::Url => "url",
            InputKind::Number => "number",
            InputKind::Password => "password",
        }
    }

    /// Whether `c` may be typed into a field of this kind.
    pub fn accepts(&self, c: char) -> bool {
        if c.is_control() {
            return false;
        }
        match self {
            InputKind::Number => c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'),
            InputKind::Email | InputKind::Url => !c.is_whitespace(),
            InputKind::Text | InputKind::Search | InputKind::Password => true,
        }
    }

    /// Password fields render their content masked.
    pub const fn is_masked(&self) -> bool {
        matches!(self, InputKind::Password)
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputKind {
    type Err = ParseInputKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "search" => Ok(Self::Search),
            "email" => Ok(Self::Email),
            "url" => Ok(Self::Url),
            "number" => Ok(Self::Number),
            "password" => Ok(Self::Password),
            _ => Err(ParseInputKindError),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseInputKindError;

impl fmt::Display for ParseInputKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid input kind; expected one of text, search, email, url, number, password")
    }
}

impl Error for ParseInputKindError {}

/// The kind of control an input event originated from.
///
/// The text input core only reacts to events coming from a text field;
/// everything else is ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlKind {
    TextField,
    TagList,
}

/// Events the text input core broadcasts to any ancestor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum InputEvent {
    /// The field text changed, either by typing or by applying a suggestion.
    #[serde(rename = "action-input-changed")]
    Changed(String),
    /// The user committed the current value.
    #[serde(rename = "action-input-submitted")]
    Submitted(String),
}

/// Commands the input core sends to its suggestion overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayCommand {
    SelectUp,
    SelectDown,
    Select,
}

/// Events the suggestion overlay sends back to its input core.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OverlayEvent {
    SuggestionSelected(String),
    /// The overlay itself requested a commit of the current value.
    Submit,
}

/// Events emitted by the tag list display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TagListEvent {
    Deleted(String),
}

/// Events the tag collection editor broadcasts to its ancestors.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum TagEditorEvent {
    Updated { tags: Vec<String> },
}

/// Generation token identifying one scheduled blur timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlurToken(pub u64);

/// Side effects a reducer asks the runtime to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Deliver `Msg::BlurElapsed(token)` after `delay`.
    ScheduleBlur { token: BlurToken, delay: Duration },
    /// Abort the timer scheduled with `token`, if it is still pending.
    CancelBlur(BlurToken),
    /// Leave the application.
    Quit,
}

/// Result of feeding one message into a component reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome<E> {
    /// Events to broadcast to the parent, in emission order.
    pub events: Vec<E>,
    /// Side effects for the runtime.
    pub effects: Vec<Effect>,
    /// Whether the message was consumed (the key must not fall through).
    pub handled: bool,
}

impl<E> Default for Outcome<E> {
    fn default() -> Self {
        Self {
            events: Vec::new(),
            effects: Vec::new(),
            handled: false,
        }
    }
}

impl<E> Outcome<E> {
    /// A message that was ignored.
    pub fn ignored() -> Self {
        Self::default()
    }

    /// A message that was consumed without producing anything.
    pub fn handled() -> Self {
        Self {
            handled: true,
            ..Self::default()
        }
    }

    pub fn with_event(mut self, event: E) -> Self {
        self.events.push(event);
        self.handled = true;
        self
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Append another outcome, keeping emission order.
    pub fn merge(&mut self, other: Outcome<E>) {
        self.events.extend(other.events);
        self.effects.extend(other.effects);
        self.handled |= other.handled;
    }

    /// Convert the events into a parent's event type, keeping effects.
    pub fn map_events<F, T>(self, f: F) -> Outcome<T>
    where
        F: FnMut(E) -> T,
    {
        Outcome {
            events: self.events.into_iter().map(f).collect(),
            effects: self.effects,
            handled: self.handled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_kind_parses_case_insensitively() {
        assert_eq!("Email".parse::<InputKind>(), Ok(InputKind::Email));
        assert_eq!(" search ".parse::<InputKind>(), Ok(InputKind::Search));
        assert_eq!("date".parse::<InputKind>(), Err(ParseInputKindError));
    }

    #[test]
    fn number_kind_rejects_letters() {
        assert!(InputKind::Number.accepts('7'));
        assert!(InputKind::Number.accepts('-'));
        assert!(!InputKind::Number.accepts('x'));
        assert!(!InputKind::Email.accepts(' '));
        assert!(InputKind::Text.accepts(' '));
        assert!(!InputKind::Text.accepts('\u{7}'));
    }

    #[test]
    fn input_events_serialize_with_wire_names() {
        let json = serde_json::to_value(InputEvent::Changed("veg".into())).expect("serialize");
        assert_eq!(json, serde_json::json!({"type": "action-input-changed", "value": "veg"}));

        let json = serde_json::to_value(TagEditorEvent::Updated {
            tags: vec!["veg".into()],
        })
        .expect("serialize");
        assert_eq!(json, serde_json::json!({"type": "updated", "tags": ["veg"]}));
    }

    #[test]
    fn outcome_merge_keeps_order() {
        let mut first: Outcome<u8> = Outcome::ignored().with_event(1);
        let second = Outcome::handled().with_event(2).with_effect(Effect::Quit);
        first.merge(second);
        assert_eq!(first.events, vec![1, 2]);
        assert_eq!(first.effects, vec![Effect::Quit]);
        assert!(first.handled);
    }
}

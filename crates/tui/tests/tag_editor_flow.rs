use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use quill_types::{ControlKind, Effect, InputEvent, TagEditorEvent};
use quill_tui::{InputMsg, SuggestionInputState, TagEditorMsg, TagEditorState, TagListView};

fn press(code: KeyCode) -> TagEditorMsg {
    TagEditorMsg::Input(InputMsg::Key {
        source: ControlKind::TextField,
        key: KeyEvent::new(code, KeyModifiers::NONE),
    })
}

fn type_into(editor: &mut TagEditorState, text: &str) {
    for c in text.chars() {
        editor.update(press(KeyCode::Char(c)));
    }
}

fn focused_editor(tags: Vec<String>, candidates: &[&str]) -> TagEditorState {
    let mut input = SuggestionInputState::default();
    input.set_candidates(candidates.iter().map(|c| c.to_string()).collect());
    let mut editor = TagEditorState::new(tags, input);
    editor.update(TagEditorMsg::Input(InputMsg::Focus));
    editor
}

#[test]
fn typing_and_enter_without_suggestions_adds_a_tag() {
    let mut editor = focused_editor(Vec::new(), &[]);
    assert_eq!(editor.view(), TagListView::Empty);

    type_into(&mut editor, "veg");
    assert_eq!(editor.value(), "veg");
    assert!(!editor.input().is_overlay_shown());

    let outcome = editor.update(press(KeyCode::Enter));
    assert_eq!(
        outcome.events,
        vec![TagEditorEvent::Updated {
            tags: vec!["veg".to_string()]
        }]
    );
    assert_eq!(editor.tags(), ["veg"]);
    assert_eq!(editor.input().value(), "");
}

#[test]
fn enter_over_visible_suggestions_applies_instead_of_submitting() {
    let mut input = SuggestionInputState::default();
    input.set_candidates(vec!["apple".into(), "apricot".into()]);
    input.update(InputMsg::Focus);

    let mut changed = Vec::new();
    for c in "ap".chars() {
        changed.extend(
            input
                .update(InputMsg::Key {
                    source: ControlKind::TextField,
                    key: KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE),
                })
                .events,
        );
    }
    assert_eq!(changed.last(), Some(&InputEvent::Changed("ap".into())));
    assert!(input.is_overlay_visible());

    let down = input.update(InputMsg::Key {
        source: ControlKind::TextField,
        key: KeyEvent::new(KeyCode::Down, KeyModifiers::NONE),
    });
    assert!(down.events.is_empty());

    let enter = input.update(InputMsg::Key {
        source: ControlKind::TextField,
        key: KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE),
    });
    assert_eq!(enter.events, vec![InputEvent::Changed("apricot".into())]);
    assert!(input.is_auto_dismissed());
    assert!(!enter.events.iter().any(|event| matches!(event, InputEvent::Submitted(_))));
}

#[test]
fn second_enter_after_applying_a_suggestion_commits_it() {
    let mut editor = focused_editor(vec!["fruit".into()], &["apple", "apricot"]);
    type_into(&mut editor, "ap");
    editor.update(press(KeyCode::Down));

    let applied = editor.update(press(KeyCode::Enter));
    assert!(applied.events.is_empty());
    assert_eq!(editor.value(), "apricot");

    let committed = editor.update(press(KeyCode::Enter));
    assert_eq!(
        committed.events,
        vec![TagEditorEvent::Updated {
            tags: vec!["fruit".into(), "apricot".into()]
        }]
    );
}

#[test]
fn blur_then_quick_refocus_keeps_the_field_active() {
    let mut editor = focused_editor(Vec::new(), &["apple"]);
    type_into(&mut editor, "ap");

    let blur = editor.update(TagEditorMsg::Input(InputMsg::Blur));
    let token = match blur.effects.as_slice() {
        [Effect::ScheduleBlur { token, .. }] => *token,
        other => panic!("expected a scheduled blur, got {other:?}"),
    };

    let focus = editor.update(TagEditorMsg::Input(InputMsg::Focus));
    assert_eq!(focus.effects, vec![Effect::CancelBlur(token)]);

    editor.update(TagEditorMsg::Input(InputMsg::BlurElapsed(token)));
    assert!(editor.input().has_focus());
    assert!(editor.input().is_overlay_visible());
}

#[test]
fn ctrl_click_on_a_row_applies_and_commits() {
    let mut editor = focused_editor(Vec::new(), &["apple", "apricot"]);
    type_into(&mut editor, "ap");

    let outcome = editor.update(TagEditorMsg::Input(InputMsg::OverlayClick { row: 1, commit: true }));
    assert_eq!(
        outcome.events,
        vec![TagEditorEvent::Updated {
            tags: vec!["apricot".into()]
        }]
    );
    assert_eq!(editor.value(), "");
}

#[test]
fn deleting_from_the_list_broadcasts_the_remaining_tags() {
    let mut editor = focused_editor(vec!["veg".into(), "fruit".into(), "veg".into()], &[]);
    let outcome = editor.update(TagEditorMsg::ListKey(KeyEvent::new(KeyCode::Delete, KeyModifiers::NONE)));
    assert_eq!(
        outcome.events,
        vec![TagEditorEvent::Updated {
            tags: vec!["fruit".into()]
        }]
    );
}

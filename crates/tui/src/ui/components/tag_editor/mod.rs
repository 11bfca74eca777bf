pub mod state;
pub mod tag_editor_component;
pub mod tag_list;
pub mod tag_list_component;

pub use state::{TagEditorMsg, TagEditorState};
pub use tag_editor_component::TagEditorComponent;
pub use tag_list::{ChipArea, TagListState, TagListView};
pub use tag_list_component::{EMPTY_TAGS_LABEL, TagListComponent};

pub mod category_selector;
pub mod note_card;
pub mod password_input;
pub mod ui;

pub use category_selector::CategorySelector;
pub use note_card::{EmptyNotes, NoteCard};
pub use password_input::PasswordInput;

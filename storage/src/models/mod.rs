//! Stored models: photo memory entries, checklist items, brain notes.

mod brain_note;
mod checklist_item;
mod photo_entry;

pub use brain_note::{BrainNote, NoteSource};
pub use checklist_item::ChecklistItem;
pub use photo_entry::PhotoEntry;

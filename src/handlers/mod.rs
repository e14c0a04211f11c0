pub mod create;
pub mod delete;
pub mod list;

pub use create::create_note;
pub use delete::delete_note;
pub use list::list_notes;

use crate::dispatch::NoteDispatcher;

/// Shared state for the local server
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: NoteDispatcher,
}

// Route templates, as API Gateway reports them in the event's `resource` field

pub const NOTES: &str = "/notes";
pub const NOTE_ITEM: &str = "/notes/{id}";

/// A recognized (method, resource) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    CreateNote,
    ListNotes,
    DeleteNote,
    Unsupported,
}

impl Route {
    /// Resolve a route from the raw method and resource template
    ///
    /// Matching is exact and case-sensitive; any other combination, including
    /// a known resource with an unmatched method, is `Unsupported`.
    pub fn resolve(method: &str, resource: Option<&str>) -> Self {
        match (method, resource) {
            ("POST", Some(NOTES)) => Route::CreateNote,
            ("GET", Some(NOTES)) => Route::ListNotes,
            ("DELETE", Some(NOTE_ITEM)) => Route::DeleteNote,
            _ => Route::Unsupported,
        }
    }
}

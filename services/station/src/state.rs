use crate::domain::repository::BackendPort;

/// Shared application state passed to every handler via axum `State`.
///
/// Generic over the backend port so tests can run the full router against an
/// in-memory backend.
#[derive(Clone)]
pub struct AppState<B: BackendPort> {
    pub backend: B,
}

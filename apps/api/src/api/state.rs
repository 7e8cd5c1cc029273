use std::sync::Arc;

use crate::domain::repositories::MemberSearchRepository;

/// Shared handler state
///
/// Holds the search port as a trait object so the router can run against
/// PostgreSQL or the in-memory store.
#[derive(Clone)]
pub struct AppState {
    pub members: Arc<dyn MemberSearchRepository>,
}

impl AppState {
    pub fn new(members: Arc<dyn MemberSearchRepository>) -> Self {
        Self { members }
    }
}

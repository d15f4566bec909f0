//! Conditional-edge routers.

use std::sync::Arc;

/// Router for a conditional edge: maps the just-merged state to the id of the
/// next node. The returned id must be one of the targets declared in
/// `add_conditional_edge`; anything else is a `RunError::RouterContract` at
/// run time.
///
/// Routers must be pure functions of the state: no side effects, no hidden
/// counters.
pub type Router<S> = Arc<dyn Fn(&S) -> String + Send + Sync>;

/// A compiled conditional edge: router plus its declared allowed targets.
pub(super) struct ConditionalEdge<S> {
    pub router: Router<S>,
    pub allowed: Vec<String>,
}

impl<S> Clone for ConditionalEdge<S> {
    fn clone(&self) -> Self {
        Self {
            router: Arc::clone(&self.router),
            allowed: self.allowed.clone(),
        }
    }
}

//! Feature modules implementing the intake API
//!
//! Each feature is a vertical slice with its own commands and routes.
//!
//! # Features
//!
//! - **contacts**: single contact submission

pub mod contacts;

use axum::Router;

use crate::store::SharedStore;

/// Shared state for all feature routes
#[derive(Clone)]
pub struct FeatureState {
    /// Contact store used by every write path
    pub store: SharedStore,
}

/// Creates the API router with all feature routes mounted
///
/// - `/contacts` - Contact submission
pub fn router(state: FeatureState) -> Router<()> {
    Router::new().nest("/contacts", contacts::contacts_routes().with_state(state.store))
}

use axum::{Router, middleware};

use crate::{auth, state::SharedState};

pub mod admin;
pub mod docs;
pub mod health;
pub mod teams;
pub mod tournaments;
pub mod users;

/// Compose all route trees, wiring in shared state, authentication and the
/// documentation routes.
///
/// The admin subtree carries its own role gate; the bearer-token layer is
/// applied here, outermost, so it runs before the role check.
pub fn router(state: SharedState) -> Router<()> {
    let public = health::router().merge(users::public_router());

    let authenticated = users::router()
        .merge(teams::router())
        .merge(tournaments::router())
        .merge(admin::router(state.clone()))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth,
        ));

    public
        .merge(authenticated)
        .merge(docs::router())
        .with_state(state)
}

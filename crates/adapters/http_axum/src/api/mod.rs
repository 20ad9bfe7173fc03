//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod accounts;

use axum::Router;
use axum::routing::get;

use accounts_app::ports::AccountRepository;

use crate::state::AppState;

/// Build the account sub-router.
pub fn routes<AR>() -> Router<AppState<AR>>
where
    AR: AccountRepository + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/accounts",
            get(accounts::list::<AR>).post(accounts::create::<AR>),
        )
        .route(
            "/accounts/{account_id}",
            get(accounts::get::<AR>)
                .put(accounts::update::<AR>)
                .delete(accounts::delete::<AR>),
        )
}

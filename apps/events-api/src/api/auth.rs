use axum::Router;
use domain_accounts::{AccountService, PgAccountRepository};

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PgAccountRepository::new(state.db.clone());
    let service = AccountService::new(repository);

    super::public_routes(
        service,
        state.jwt.clone(),
        state.config.properties.client(),
    )
}

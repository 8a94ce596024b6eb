//! Router construction for the three services.

use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, post, put},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::{
    config::Config,
    handlers::{
        AppState, accounts, cards,
        fallback::{method_not_allowed, no_route},
        health::{StoreHealth, health_check},
        info::{build_info, service_info},
        loans,
    },
    middleware::{
        api_path::api_path,
        audit::{DefaultAuditor, audit_context},
    },
    services::{
        account_service::AccountService, card_service::CardService, loan_service::LoanService,
    },
};

/// Routes of the accounts service, mounted under `/api`.
pub fn accounts_router(service: AccountService, config: &Config) -> Router {
    let routes = Router::new()
        .route("/api/create", post(accounts::create_account))
        .route("/api/fetch/{mobile_number}", get(accounts::fetch_account))
        .route("/api/update", put(accounts::update_account))
        .route("/api/delete/{mobile_number}", delete(accounts::delete_account))
        .route("/api/build-info", get(build_info::<AccountService>))
        .route("/api/account-info", get(service_info::<AccountService>));

    finish(routes, service, config)
}

/// Routes of the cards service, mounted under `/cards`.
pub fn cards_router(service: CardService, config: &Config) -> Router {
    let routes = Router::new()
        .route("/cards", put(cards::update_card))
        .route(
            "/cards/{mobile_number}",
            post(cards::create_card)
                .get(cards::fetch_card)
                .delete(cards::delete_card),
        )
        .route("/cards/build-info", get(build_info::<CardService>))
        .route("/cards/card-info", get(service_info::<CardService>));

    finish(routes, service, config)
}

/// Routes of the loans service, mounted under `/loans`.
pub fn loans_router(service: LoanService, config: &Config) -> Router {
    let routes = Router::new()
        .route("/loans", put(loans::update_loan))
        .route(
            "/loans/{mobile_number}",
            post(loans::create_loan)
                .get(loans::fetch_loan)
                .delete(loans::delete_loan),
        )
        .route("/loans/build-info", get(build_info::<LoanService>))
        .route("/loans/loans-info", get(service_info::<LoanService>));

    finish(routes, service, config)
}

/// Add `/health`, the fallbacks, the shared middleware stack and the state.
///
/// Fallbacks are registered before the layers so their errors get the same
/// body. Layers run top to bottom on the way in:
/// 1. `TraceLayer` logs every request
/// 2. `api_path` fills `apiPath` into error bodies on the way out
/// 3. `audit_context` resolves the audit identity
fn finish<S>(routes: Router<AppState<S>>, service: S, config: &Config) -> Router
where
    S: StoreHealth + Clone + 'static,
{
    routes
        .route("/health", get(health_check::<S>))
        .fallback(no_route)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(from_fn(api_path))
                .layer(from_fn_with_state(
                    DefaultAuditor(config.default_auditor.clone()),
                    audit_context,
                )),
        )
        .with_state(AppState::new(service, config))
}

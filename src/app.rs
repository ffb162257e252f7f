/*
 * Responsibility
 * - tracing / panic hook setup
 * - Config → AppState → Router assembly
 * - Middleware order (negotiation on every route, gate on protected ones,
 *   HTTP layers outermost)
 * - axum::serve()
 */
use std::{panic, process};

use anyhow::{Context, Result};
use axum::Router;
use tower_http::services::ServeDir;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{api, config::Config, middleware, state::AppState};

fn init_tracing() {
    // RUST_LOG=info,ntlm_gate=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // Development: crash so it gets noticed. Production: default hook, keep serving.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env().context("failed to load configuration")?;
    init_panic_hook(!config.app_env.is_production());

    let state = AppState::from_config(&config);
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr()))?;

    log_startup(&config);

    axum::serve(listener, app).await?;
    Ok(())
}

fn log_startup(config: &Config) {
    tracing::info!(
        "NTLM gate started in {:?} mode on http://{}",
        config.app_env,
        config.bind_addr()
    );
    tracing::info!(
        domain = config.ntlm_domain.as_deref().unwrap_or("-"),
        workstation = config.ntlm_workstation.as_deref().unwrap_or("-"),
        "NTLM defaults"
    );
    tracing::info!("{} authorized user(s):", config.registry.len());
    for principal in config.registry.principals() {
        tracing::info!("  - {}\\{}", principal.domain, principal.username);
    }
    if config.expose_authorized_users {
        tracing::warn!("403 responses include the authorized user list");
    }
    tracing::info!("GET  /                 - test UI ({})", config.static_dir.display());
    tracing::info!("GET  /api/status       - NTLM authentication status");
    tracing::info!("GET  /api/protected    - protected resource (requires NTLM auth)");
    tracing::info!("GET  /api/test-users   - list available test users");
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .nest("/api", api::routes(state.clone()))
        .fallback_service(ServeDir::new(&config.static_dir));
    let router = middleware::negotiation::apply(router, state.clone()).with_state(state);

    middleware::http::apply(router, config)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
        response::Response,
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::services::identity::negotiator::{
        DOMAIN_HEADER, PROVIDER_HEADER, USER_HEADER, WORKSTATION_HEADER,
    };

    fn test_config(extra: &[(&str, &str)]) -> Config {
        let mut vars = vec![(
            "AUTHORIZED_USERS",
            "testdomain\\user1,testdomain\\user2,localhost\\admin",
        )];
        vars.extend_from_slice(extra);
        Config::from_lookup(|key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        })
        .unwrap()
    }

    fn app(config: &Config) -> Router {
        build_router(AppState::from_config(config), config)
    }

    async fn get(app: Router, uri: &str, headers: &[(&str, &str)]) -> Response {
        let mut req = Request::builder().uri(uri);
        for (k, v) in headers {
            req = req.header(*k, *v);
        }
        app.oneshot(req.body(Body::empty()).unwrap()).await.unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn status_without_identity_reports_nulls() {
        let config = test_config(&[]);
        let response = get(app(&config), "/api/status", &[]).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store");
        assert!(response.headers().contains_key("x-request-id"));

        let body = body_json(response).await;
        assert_eq!(body["authenticated"], false);
        assert_eq!(
            body["ntlmInfo"],
            json!({"username": null, "domain": null, "workstation": null, "provider": null})
        );
        assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
    }

    #[tokio::test]
    async fn status_reports_unregistered_identity_without_gating() {
        let config = test_config(&[]);
        let response = get(
            app(&config),
            "/api/status",
            &[
                (USER_HEADER, "nobody"),
                (DOMAIN_HEADER, "OTHER"),
                (WORKSTATION_HEADER, "TESTPC"),
                (PROVIDER_HEADER, "NTLM"),
            ],
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["authenticated"], true);
        assert_eq!(
            body["ntlmInfo"],
            json!({"username": "nobody", "domain": "OTHER", "workstation": "TESTPC", "provider": "NTLM"})
        );
    }

    #[tokio::test]
    async fn protected_allows_registered_user_case_insensitively() {
        let config = test_config(&[]);
        let response = get(
            app(&config),
            "/api/protected",
            &[(USER_HEADER, "TESTDOMAIN\\USER1")],
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Access granted to protected resource");
        assert_eq!(
            body["user"],
            json!({"username": "user1", "domain": "testdomain", "authenticated": true})
        );
        assert_eq!(
            body["data"]["secretMessage"],
            "This is protected data only authenticated users can see"
        );
    }

    #[tokio::test]
    async fn protected_without_identity_is_401() {
        let config = test_config(&[]);
        let response = get(app(&config), "/api/protected", &[]).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "NTLM");
        assert_eq!(
            body_json(response).await,
            json!({"error": "NTLM authentication required"})
        );
    }

    #[tokio::test]
    async fn protected_with_negotiation_in_progress_is_401() {
        let config = test_config(&[]);
        let response = get(
            app(&config),
            "/api/protected",
            &[(PROVIDER_HEADER, "NTLM"), (DOMAIN_HEADER, "testdomain")],
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn protected_with_unregistered_user_is_403_with_diagnostics() {
        let config = test_config(&[]);
        let response = get(
            app(&config),
            "/api/protected",
            &[(USER_HEADER, "otherdomain\\user1")],
        )
        .await;

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            body_json(response).await,
            json!({
                "error": "User not authorized",
                "receivedUser": "otherdomain\\user1",
                "authorizedUsers": ["testdomain\\user1", "testdomain\\user2", "localhost\\admin"],
            })
        );
    }

    #[tokio::test]
    async fn production_403_omits_authorized_users() {
        let config = test_config(&[("APP_ENV", "production")]);
        let response = get(
            app(&config),
            "/api/protected",
            &[(USER_HEADER, "otherdomain\\user1")],
        )
        .await;

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let body = body_json(response).await;
        assert_eq!(body["receivedUser"], "otherdomain\\user1");
        assert!(body.get("authorizedUsers").is_none());
    }

    #[tokio::test]
    async fn bare_username_uses_configured_domain() {
        let config = test_config(&[("NTLM_DOMAIN", "TestDomain")]);
        let response = get(app(&config), "/api/protected", &[(USER_HEADER, "user2")]).await;

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_users_lists_registry_keys() {
        let config = test_config(&[]);
        let response = get(app(&config), "/api/test-users", &[]).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({
                "testUsers": ["testdomain\\user1", "testdomain\\user2", "localhost\\admin"],
                "instructions": "Use these credentials to test NTLM authentication. Format: domain\\username",
            })
        );
    }

    #[tokio::test]
    async fn static_page_is_served_with_http_layers() {
        let config = test_config(&[("STATIC_DIR", concat!(env!("CARGO_MANIFEST_DIR"), "/public"))]);
        let response = get(app(&config), "/", &[]).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response.headers()[header::CONTENT_TYPE]
                .to_str()
                .unwrap()
                .starts_with("text/html")
        );
        assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store");
        assert!(response.headers().contains_key("x-request-id"));

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let page = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(page.contains("<title>NTLM gate</title>"));
    }
}

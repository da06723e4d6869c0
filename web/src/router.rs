use crate::{
    controller::{
        api_controller, health_check_controller, meeting_sdk_controller, oauth_controller,
        webhook_controller,
    },
    middleware::auth::require_auth,
    params, AppState,
};
use axum::{
    middleware::from_fn_with_state,
    routing::get,
    Router,
};
use tower_http::services::ServeFile;

use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_rapidoc::RapiDoc;

// This is the global definition of our OpenAPI document. To be a part
// of the rendered document, a path and schema must be listed here.
#[derive(OpenApi)]
#[openapi(
        info(
            title = "Zoom Bridge API"
        ),
        paths(
            health_check_controller::health_check,
            webhook_controller::receive,
            webhook_controller::last_event,
            oauth_controller::s2s_token,
            oauth_controller::redirect,
            oauth_controller::refresh,
            meeting_sdk_controller::usage,
            meeting_sdk_controller::generate_signature,
            api_controller::call_api,
        ),
        components(
            schemas(
                params::meeting_sdk::SignatureParams,
            )
        ),
        modifiers(&SecurityAddon),
        tags(
            (name = "zoom_bridge", description = "Bridge to Zoom's OAuth, REST, webhook and Meeting SDK APIs")
        )
    )]
struct ApiDoc;

struct SecurityAddon;

// Defines the optional bearer token requirement (REQUIRE_AUTH) for OpenAPI.
impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            )
        }
    }
}

pub fn define_routes(app_state: AppState) -> Router {
    Router::new()
        .merge(landing_routes(&app_state))
        .merge(health_routes())
        .merge(webhook_routes(app_state.clone()))
        .merge(oauth_routes(app_state.clone()))
        .merge(meeting_sdk_routes(app_state.clone()))
        .merge(api_routes(app_state.clone()))
        .merge(documentation_routes(app_state))
}

fn landing_routes(app_state: &AppState) -> Router {
    Router::new().route_service("/", ServeFile::new(&app_state.config.landing_page))
}

fn health_routes() -> Router {
    Router::new().route("/health", get(health_check_controller::health_check))
}

// Zoom delivers webhooks without our bearer token, so these stay open.
fn webhook_routes(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/webhook",
            get(webhook_controller::last_event).post(webhook_controller::receive),
        )
        .with_state(app_state)
}

fn oauth_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/s2soauth", get(oauth_controller::s2s_token))
        .route("/redirecturlforoauth", get(oauth_controller::redirect))
        .route("/oauthrefreshtoken", get(oauth_controller::refresh))
        .route_layer(from_fn_with_state(app_state.clone(), require_auth))
        .with_state(app_state)
}

fn meeting_sdk_routes(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/meetingsdktoken",
            get(meeting_sdk_controller::usage).post(meeting_sdk_controller::generate_signature),
        )
        .route_layer(from_fn_with_state(app_state.clone(), require_auth))
        .with_state(app_state)
}

fn api_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/callapi", get(api_controller::call_api))
        .route_layer(from_fn_with_state(app_state.clone(), require_auth))
        .with_state(app_state)
}

fn documentation_routes(app_state: AppState) -> Router {
    Router::new()
        .merge(RapiDoc::with_openapi("/api-docs/openapi.json", ApiDoc::openapi()).path("/rapidoc"))
        .route_layer(from_fn_with_state(app_state, require_auth))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use axum::response::Response;
    use clap::Parser;
    use jsonwebtoken::{decode, DecodingKey, Validation};
    use mockito::Matcher;
    use serde_json::{json, Value};
    use service::config::Config;
    use service::snapshot::{FileSnapshotStore, MemorySnapshotStore, SnapshotStore};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn config(args: &[&str]) -> Config {
        let mut argv = vec!["zoom_bridge_rs"];
        argv.extend_from_slice(args);
        Config::try_parse_from(argv).unwrap()
    }

    fn app(config: Config) -> Router {
        let store: Arc<dyn SnapshotStore> = Arc::new(MemorySnapshotStore::new());
        let cors_layer = crate::cors_layer(&config);
        define_routes(AppState::new(config, &store)).layer(cors_layer)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn body_json(response: Response) -> Value {
        serde_json::from_str(&body_text(response).await).unwrap()
    }

    #[tokio::test]
    async fn health_check_returns_healthy() {
        let response = app(config(&[]))
            .oneshot(get_request("/health"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "healthy");
    }

    #[tokio::test]
    async fn root_serves_landing_page() {
        let dir = tempfile::tempdir().unwrap();
        let page = dir.path().join("index.html");
        std::fs::write(&page, "<h1>Zoom bridge</h1>").unwrap();
        let config = config(&["--landing-page", page.to_str().unwrap()]);

        let response = app(config).oneshot(get_request("/")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "<h1>Zoom bridge</h1>");
    }

    #[tokio::test]
    async fn webhook_validation_challenge_returns_hmac_digest() {
        // RFC 4231 test case 2
        let app = app(config(&["--zoom-webhook-secret-token", "Jefe"]));
        let challenge = json!({
            "event": "endpoint.url_validation",
            "payload": {"plainToken": "what do ya want for nothing?"}
        });

        let response = app.oneshot(post_json("/webhook", &challenge)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({
                "plainToken": "what do ya want for nothing?",
                "encryptedToken": "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
            })
        );
    }

    #[tokio::test]
    async fn webhook_get_before_any_event_returns_sentinel() {
        let response = app(config(&[]))
            .oneshot(get_request("/webhook"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"message": "No webhook data yet"})
        );
    }

    #[tokio::test]
    async fn webhook_event_is_archived_and_returned() {
        let app = app(config(&[]));
        let first = json!({"event": "meeting.started", "payload": {"object": {"id": "1"}}});
        let second = json!({"event": "meeting.ended", "payload": {"object": {"id": "2"}}});

        for event in [&first, &second] {
            let response = app
                .clone()
                .oneshot(post_json("/webhook", event))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(body_text(response).await, "");
        }

        let response = app.oneshot(get_request("/webhook")).await.unwrap();
        assert_eq!(body_json(response).await, second);
    }

    #[tokio::test]
    async fn webhook_is_acknowledged_when_archive_write_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store: Arc<dyn SnapshotStore> =
            Arc::new(FileSnapshotStore::new(dir.path().join("missing")));
        let app = define_routes(AppState::new(config(&[]), &store));

        let response = app
            .oneshot(post_json("/webhook", &json!({"event": "meeting.started"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "");
    }

    #[tokio::test]
    async fn webhook_with_invalid_json_is_bad_request() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/webhook")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app(config(&[])).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await.get("error").is_some());
    }

    #[tokio::test]
    async fn webhook_without_signature_is_rejected_when_verification_enabled() {
        let app = app(config(&[
            "--zoom-webhook-secret-token",
            "webhook_secret",
            "--verify-webhook-signatures",
        ]));

        let response = app
            .oneshot(post_json("/webhook", &json!({"event": "meeting.started"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(body_json(response).await.get("error").is_some());
    }

    #[tokio::test]
    async fn refresh_without_code_is_bad_request() {
        let response = app(config(&[]))
            .oneshot(get_request("/oauthrefreshtoken"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({"error": "Missing ?code=refresh_token parameter"})
        );
    }

    #[tokio::test]
    async fn refresh_with_code_calls_token_endpoint_once() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/oauth/token")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("grant_type".into(), "refresh_token".into()),
                Matcher::UrlEncoded("refresh_token".into(), "eyJ.refresh".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"access_token":"eyJ.new","token_type":"bearer","refresh_token":"eyJ.next","expires_in":3599,"scope":"user:read"}"#)
            .expect(1)
            .create_async()
            .await;
        let app = app(config(&[
            "--zoom-oauth-base-url",
            &server.url(),
            "--zoom-oauth-userlevel-client-id",
            "user_id",
            "--zoom-oauth-userlevel-client-secret",
            "user_secret",
        ]));

        let response = app
            .oneshot(get_request("/oauthrefreshtoken?code=eyJ.refresh"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["access_token"], json!("eyJ.new"));
    }

    #[tokio::test]
    async fn redirect_exchanges_code_then_serves_archived_token() {
        let mut server = mockito::Server::new_async().await;
        let token = json!({
            "access_token": "eyJ.access",
            "token_type": "bearer",
            "refresh_token": "eyJ.refresh",
            "expires_in": 3599,
            "scope": "user:read"
        });
        server
            .mock("POST", "/oauth/token")
            .match_body(Matcher::UrlEncoded("code".into(), "auth_code".into()))
            .with_status(200)
            .with_body(token.to_string())
            .create_async()
            .await;
        let app = app(config(&[
            "--zoom-oauth-base-url",
            &server.url(),
            "--zoom-oauth-userlevel-client-id",
            "user_id",
            "--zoom-oauth-userlevel-client-secret",
            "user_secret",
        ]));

        let before = app
            .clone()
            .oneshot(get_request("/redirecturlforoauth"))
            .await
            .unwrap();
        assert_eq!(
            body_json(before).await,
            json!({"message": "No OAuth data. Add ?code=xxx to exchange authorization code."})
        );

        let exchanged = app
            .clone()
            .oneshot(get_request("/redirecturlforoauth?code=auth_code"))
            .await
            .unwrap();
        assert_eq!(exchanged.status(), StatusCode::OK);
        assert_eq!(body_json(exchanged).await, token);

        let archived = app
            .oneshot(get_request("/redirecturlforoauth"))
            .await
            .unwrap();
        assert_eq!(body_json(archived).await, token);
    }

    #[tokio::test]
    async fn s2s_rejection_is_server_error_with_upstream_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/oauth/token")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body(r#"{"reason":"Invalid client_id or client_secret","error":"invalid_client"}"#)
            .create_async()
            .await;
        let app = app(config(&[
            "--zoom-oauth-base-url",
            &server.url(),
            "--zoom-s2s-client-id",
            "s2s_id",
            "--zoom-s2s-client-secret",
            "wrong",
            "--zoom-s2s-account-id",
            "account_123",
        ]));

        let response = app.oneshot(get_request("/s2soauth")).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({"error": {"reason": "Invalid client_id or client_secret", "error": "invalid_client"}})
        );
    }

    #[tokio::test]
    async fn meeting_sdk_signature_embeds_meeting_and_role() {
        let app = app(config(&[
            "--zoom-sdk-key",
            "sdk_key",
            "--zoom-sdk-secret",
            "sdk_secret",
        ]));

        let response = app
            .oneshot(post_json(
                "/meetingsdktoken",
                &json!({"meetingNumber": "123", "role": 1}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["sdkKey"], json!("sdk_key"));

        let signature = body["signature"].as_str().unwrap();
        let claims = decode::<Value>(
            signature,
            &DecodingKey::from_secret(b"sdk_secret"),
            &Validation::default(),
        )
        .unwrap()
        .claims;
        assert_eq!(claims["mn"], json!("123"));
        assert_eq!(claims["role"], json!(1));
        assert_eq!(
            claims["exp"].as_i64().unwrap() - claims["iat"].as_i64().unwrap(),
            7200
        );
        assert_eq!(claims["tokenExp"], claims["exp"]);
    }

    #[tokio::test]
    async fn meeting_sdk_signature_without_meeting_number_is_bad_request() {
        let app = app(config(&[
            "--zoom-sdk-key",
            "sdk_key",
            "--zoom-sdk-secret",
            "sdk_secret",
        ]));

        let response = app
            .oneshot(post_json("/meetingsdktoken", &json!({"role": 0})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await.get("error").is_some());
    }

    #[tokio::test]
    async fn meeting_sdk_signature_with_null_role_signs_as_attendee() {
        let app = app(config(&[
            "--zoom-sdk-key",
            "sdk_key",
            "--zoom-sdk-secret",
            "sdk_secret",
        ]));

        let response = app
            .oneshot(post_json(
                "/meetingsdktoken",
                &json!({"meetingNumber": "123", "role": null}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let claims = decode::<Value>(
            body["signature"].as_str().unwrap(),
            &DecodingKey::from_secret(b"sdk_secret"),
            &Validation::default(),
        )
        .unwrap()
        .claims;
        assert_eq!(claims["role"], json!(0));
    }

    #[tokio::test]
    async fn meeting_sdk_signature_with_malformed_body_is_bad_request() {
        let malformed = Request::builder()
            .method(Method::POST)
            .uri("/meetingsdktoken")
            .header("content-type", "application/json")
            .body(Body::from("{bad"))
            .unwrap();
        let untyped = Request::builder()
            .method(Method::POST)
            .uri("/meetingsdktoken")
            .body(Body::from("meetingNumber=123"))
            .unwrap();

        for request in [malformed, untyped] {
            let app = app(config(&[
                "--zoom-sdk-key",
                "sdk_key",
                "--zoom-sdk-secret",
                "sdk_secret",
            ]));
            let response = app.oneshot(request).await.unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert!(body_json(response).await.get("error").is_some());
        }
    }

    #[tokio::test]
    async fn meeting_sdk_usage_never_exposes_secret() {
        let app = app(config(&[
            "--zoom-sdk-key",
            "sdk_key",
            "--zoom-sdk-secret",
            "sdk_secret",
        ]));

        let response = app.oneshot(get_request("/meetingsdktoken")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("sdk_key"));
        assert!(!body.contains("sdk_secret"));
    }

    #[tokio::test]
    async fn callapi_without_token_returns_usage_hint_without_upstream_call() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", Matcher::Any)
            .expect(0)
            .create_async()
            .await;
        let app = app(config(&["--zoom-api-base-url", &server.url()]));

        for uri in ["/callapi", "/callapi?accesstoken=xxxx"] {
            let response = app.clone().oneshot(get_request(uri)).await.unwrap();

            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(
                body_json(response).await,
                json!({
                    "message": "Add ?accesstoken=your_token to call the API",
                    "example": "/callapi?accesstoken=eyJ..."
                })
            );
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn callapi_relays_upstream_status_and_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/users/me")
            .match_header("authorization", "Bearer good")
            .with_status(200)
            .with_body(r#"{"id":"KDcuGIm1QgePTO8WbOqwIQ"}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/users/me")
            .match_header("authorization", "Bearer expired")
            .with_status(401)
            .with_body(r#"{"code":124,"message":"Invalid access token."}"#)
            .create_async()
            .await;
        let app = app(config(&["--zoom-api-base-url", &server.url()]));

        let ok = app
            .clone()
            .oneshot(get_request("/callapi?accesstoken=good"))
            .await
            .unwrap();
        assert_eq!(ok.status(), StatusCode::OK);
        assert_eq!(body_json(ok).await, json!({"id": "KDcuGIm1QgePTO8WbOqwIQ"}));

        let rejected = app
            .oneshot(get_request("/callapi?accesstoken=expired"))
            .await
            .unwrap();
        assert_eq!(rejected.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_json(rejected).await,
            json!({"error": {"code": 124, "message": "Invalid access token."}})
        );
    }

    #[tokio::test]
    async fn require_auth_gates_api_routes_but_not_webhook_or_health() {
        let app = app(config(&["--require-auth", "--api-auth-token", "s3cret"]));

        let gated = app
            .clone()
            .oneshot(get_request("/meetingsdktoken"))
            .await
            .unwrap();
        assert_eq!(gated.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(gated).await, json!({"error": "Unauthorized"}));

        let authorized = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/meetingsdktoken")
                    .header("authorization", "Bearer s3cret")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(authorized.status(), StatusCode::OK);

        for uri in ["/health", "/webhook"] {
            let response = app.clone().oneshot(get_request(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{uri} should not be gated");
        }
    }

    #[tokio::test]
    async fn cors_preflight_reflects_any_origin() {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/callapi")
            .header("origin", "https://app.example.com")
            .header("access-control-request-method", "GET")
            .header("access-control-request-headers", "authorization")
            .body(Body::empty())
            .unwrap();

        let response = app(config(&[])).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "https://app.example.com"
        );
        assert_eq!(response.headers()["access-control-allow-methods"], "GET");
    }

    #[tokio::test]
    async fn cors_only_admits_listed_origins_when_narrowed() {
        let app = app(config(&["--allowed-origins", "https://allowed.example.com"]));
        let request = |origin: &str| {
            Request::builder()
                .uri("/health")
                .header("origin", origin)
                .body(Body::empty())
                .unwrap()
        };

        let allowed = app
            .clone()
            .oneshot(request("https://allowed.example.com"))
            .await
            .unwrap();
        assert_eq!(
            allowed.headers()["access-control-allow-origin"],
            "https://allowed.example.com"
        );

        let other = app.oneshot(request("https://other.example.com")).await.unwrap();
        assert!(other.headers().get("access-control-allow-origin").is_none());
    }

    #[tokio::test]
    async fn openapi_document_lists_every_endpoint() {
        let response = app(config(&[]))
            .oneshot(get_request("/api-docs/openapi.json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let document = body_json(response).await;
        for path in [
            "/health",
            "/webhook",
            "/s2soauth",
            "/redirecturlforoauth",
            "/oauthrefreshtoken",
            "/meetingsdktoken",
            "/callapi",
        ] {
            assert!(document["paths"].get(path).is_some(), "{path} missing");
        }
    }
}

//! `GovpalServer` — Axum HTTP server over the composition engine.
//!
//! Route map:
//! - `POST   /sessions` — create a session
//! - `DELETE /sessions/{id}` — end a session
//! - `GET    /sessions/{id}/view` — composition view for the session
//! - `PUT    /sessions/{id}/context` — switch department and/or role
//! - `POST   /sessions/{id}/actions` — record an action, returns fired events
//! - `POST   /sessions/{id}/documents` — ingest an analyzed batch
//! - `DELETE /sessions/{id}/widgets/{widget_id}` — dismiss an adaptive widget
//! - `GET    /sessions/{id}/adaptations` — recent audit events
//! - `GET    /sessions/{id}/proposal` — current project proposal
//! - `POST   /departments/{id}/manifest/reload` — drop the cached manifest
//! - `GET    /health` — liveness probe

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{delete, get, post, put};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use govpal_core::actions::UserAction;
use govpal_core::events::AdaptationEvent;
use govpal_engine::{SessionRegistry, composition, engine};
use govpal_manifest::{HttpManifestFetcher, ManifestStore};
use govpal_settings::GovpalSettings;

use crate::error::ApiError;
use crate::wire::{
    ActionRequest, CreateSessionRequest, DocumentBatchRequest, DocumentBatchResponse,
    EventsResponse, HealthResponse, RemoveWidgetResponse, SessionResponse, SwitchContextRequest,
    ViewResponse,
};

/// Shared state accessible from Axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// Live sessions.
    pub registry: Arc<SessionRegistry>,
    /// Fail-soft manifest supplier.
    pub manifests: Arc<ManifestStore>,
    /// Loaded settings snapshot.
    pub settings: Arc<GovpalSettings>,
    /// When the server started.
    pub start_time: Instant,
}

/// The GovPal HTTP server.
pub struct GovpalServer {
    state: AppState,
}

impl GovpalServer {
    /// Create a server from loaded settings.
    ///
    /// A configured manifest base URL enables remote fetching; otherwise
    /// only the built-in manifests are served.
    #[must_use]
    pub fn new(settings: Arc<GovpalSettings>) -> Self {
        let manifests = match &settings.manifest.base_url {
            Some(url) => ManifestStore::new(Arc::new(HttpManifestFetcher::new(url.clone()))),
            None => ManifestStore::builtin_only(),
        };
        Self {
            state: AppState {
                registry: Arc::new(SessionRegistry::new()),
                manifests: Arc::new(manifests),
                settings,
                start_time: Instant::now(),
            },
        }
    }

    /// Build the Axum router with all routes and middleware.
    #[must_use]
    pub fn router(&self) -> Router {
        let settings = &self.state.settings.server;
        Router::new()
            .route("/health", get(health))
            .route("/sessions", post(create_session))
            .route("/sessions/{id}", delete(remove_session))
            .route("/sessions/{id}/view", get(composition_view))
            .route("/sessions/{id}/context", put(switch_context))
            .route("/sessions/{id}/actions", post(record_action))
            .route("/sessions/{id}/documents", post(ingest_documents))
            .route("/sessions/{id}/widgets/{widget_id}", delete(remove_widget))
            .route("/sessions/{id}/adaptations", get(adaptations))
            .route("/sessions/{id}/proposal", get(proposal))
            .route(
                "/departments/{id}/manifest/reload",
                post(reload_manifest),
            )
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .layer(RequestBodyLimitLayer::new(settings.body_limit_bytes))
            .layer(TimeoutLayer::new(Duration::from_millis(
                settings.request_timeout_ms,
            )))
            .with_state(self.state.clone())
    }

    /// The shared handler state.
    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }
}

// ── Handlers ──────────────────────────────────────────────────────────

/// GET /health
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        active_sessions: state.registry.len(),
    })
}

/// POST /sessions
async fn create_session(
    State(state): State<AppState>,
    Json(req): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), ApiError> {
    if state.registry.len() >= state.settings.session.max_sessions {
        return Err(ApiError::SessionLimit);
    }
    let department_id = req
        .department_id
        .unwrap_or_else(|| state.settings.session.default_department.clone());
    let role = req
        .role
        .unwrap_or_else(|| state.settings.session.default_role.clone());
    let session_id = state.registry.create(&department_id, &role);
    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            session_id,
            department_id,
            role,
        }),
    ))
}

/// DELETE /sessions/{id}
async fn remove_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.registry.remove(&id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("session {id}")))
    }
}

/// GET /sessions/{id}/view
///
/// Manifest loading is async and happens outside the session lock. The
/// render re-checks the department under the lock and retries when a
/// concurrent context switch landed in between, so the returned name,
/// theme, and widgets always describe the same department.
async fn composition_view(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ViewResponse>, ApiError> {
    loop {
        let department_id = state
            .registry
            .with_session(&id, |s| s.department_id.clone())?;
        let manifest = state.manifests.load(&department_id).await;
        let rendered = state.registry.with_session(&id, |s| {
            if s.department_id != department_id {
                return None;
            }
            Some((s.role.clone(), composition::render(&manifest, s)))
        })?;
        if let Some((role, widgets)) = rendered {
            return Ok(Json(ViewResponse {
                department_id,
                department_name: manifest.name.clone(),
                role,
                widgets,
                theme: manifest.theme.clone(),
            }));
        }
    }
}

/// PUT /sessions/{id}/context
async fn switch_context(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<SwitchContextRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let response = state.registry.with_session(&id, |s| {
        if let Some(department_id) = req.department_id {
            s.switch_department(department_id);
        }
        if let Some(role) = req.role {
            s.switch_role(role);
        }
        SessionResponse {
            session_id: s.id.clone(),
            department_id: s.department_id.clone(),
            role: s.role.clone(),
        }
    })?;
    Ok(Json(response))
}

/// POST /sessions/{id}/actions
async fn record_action(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ActionRequest>,
) -> Result<Json<EventsResponse>, ApiError> {
    let mut action = UserAction::new(req.action_type, req.content)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    if let Some(metadata) = req.metadata {
        action = action.with_metadata(metadata);
    }
    let events = state
        .registry
        .with_session(&id, |s| engine::record_action(s, action))??;
    Ok(Json(EventsResponse { events }))
}

/// POST /sessions/{id}/documents
async fn ingest_documents(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<DocumentBatchRequest>,
) -> Result<Json<DocumentBatchResponse>, ApiError> {
    let (events, proposal) = state.registry.with_session(&id, |s| {
        let events = engine::ingest_documents(s, req.documents)?;
        Ok::<_, govpal_engine::EngineError>((events, s.proposal().cloned()))
    })??;
    Ok(Json(DocumentBatchResponse { events, proposal }))
}

/// DELETE /sessions/{id}/widgets/{widget_id}
async fn remove_widget(
    State(state): State<AppState>,
    Path((id, widget_id)): Path<(String, String)>,
) -> Result<Json<RemoveWidgetResponse>, ApiError> {
    let removed = state
        .registry
        .with_session(&id, |s| engine::remove_adaptive_widget(s, &widget_id))??;
    Ok(Json(RemoveWidgetResponse { removed }))
}

/// Query parameters for GET /sessions/{id}/adaptations.
#[derive(Debug, Deserialize)]
struct AdaptationsQuery {
    /// Maximum number of events to return (most recent first).
    limit: Option<usize>,
}

/// GET /sessions/{id}/adaptations
async fn adaptations(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<AdaptationsQuery>,
) -> Result<Json<EventsResponse>, ApiError> {
    let limit = query.limit.unwrap_or(20);
    let events: Vec<AdaptationEvent> = state
        .registry
        .with_session(&id, |s| s.log().recent(limit).into_iter().cloned().collect())?;
    Ok(Json(EventsResponse { events }))
}

/// GET /sessions/{id}/proposal
async fn proposal(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<govpal_engine::ProjectProposal>, ApiError> {
    state
        .registry
        .with_session(&id, |s| s.proposal().cloned())?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("proposal for session {id}")))
}

/// POST /departments/{id}/manifest/reload
///
/// Drops the cached manifest so the next view compiles against a fresh
/// fetch. Rule evaluation is unaffected.
async fn reload_manifest(State(state): State<AppState>, Path(id): Path<String>) -> StatusCode {
    state.manifests.invalidate(&id);
    StatusCode::NO_CONTENT
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn app() -> Router {
        GovpalServer::new(Arc::new(GovpalSettings::default())).router()
    }

    async fn body_json(resp: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(resp.into_body(), 1_000_000).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn create_session_on(app: &Router) -> String {
        let resp = app
            .clone()
            .oneshot(post_json(
                "/sessions",
                json!({"departmentId": "planning", "role": "planner"}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body = body_json(resp).await;
        body["sessionId"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn health_reports_active_sessions() {
        let app = app();
        let _ = create_session_on(&app).await;
        let resp = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["activeSessions"], 1);
    }

    #[tokio::test]
    async fn create_session_uses_settings_defaults() {
        let app = app();
        let resp = app.oneshot(post_json("/sessions", json!({}))).await.unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body = body_json(resp).await;
        assert_eq!(body["departmentId"], "planning");
        assert_eq!(body["role"], "viewer");
        assert!(body["sessionId"].as_str().unwrap().starts_with("sess_"));
    }

    #[tokio::test]
    async fn view_compiles_base_widgets() {
        let app = app();
        let id = create_session_on(&app).await;
        let resp = app
            .oneshot(
                Request::builder()
                    .uri(format!("/sessions/{id}/view"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["departmentName"], "Planning & Zoning");
        let ids: Vec<&str> = body["widgets"]
            .as_array()
            .unwrap()
            .iter()
            .map(|w| w["id"].as_str().unwrap())
            .collect();
        assert_eq!(
            ids,
            vec!["permit_queue", "zoning_summary", "document_search", "gis_overview"]
        );
    }

    #[tokio::test]
    async fn address_queries_fire_adaptation_through_http() {
        let app = app();
        let id = create_session_on(&app).await;

        let first = app
            .clone()
            .oneshot(post_json(
                &format!("/sessions/{id}/actions"),
                json!({"type": "query", "content": "123 Main Street"}),
            ))
            .await
            .unwrap();
        assert!(body_json(first).await["events"].as_array().unwrap().is_empty());

        let second = app
            .clone()
            .oneshot(post_json(
                &format!("/sessions/{id}/actions"),
                json!({"type": "query", "content": "500 Oak Ave"}),
            ))
            .await
            .unwrap();
        let body = body_json(second).await;
        let events = body["events"].as_array().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["trigger"], "address-pattern");

        // adaptive widgets now appear after the base view
        let view = app
            .oneshot(
                Request::builder()
                    .uri(format!("/sessions/{id}/view"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let view_body = body_json(view).await;
        let widgets = view_body["widgets"].as_array().unwrap();
        assert_eq!(widgets.last().unwrap()["id"], "adaptive_timeline");
        assert_eq!(widgets.last().unwrap()["source"]["kind"], "adaptive");
    }

    #[tokio::test]
    async fn empty_action_content_is_rejected() {
        let app = app();
        let id = create_session_on(&app).await;
        let resp = app
            .oneshot(post_json(
                &format!("/sessions/{id}/actions"),
                json!({"type": "click", "content": "   "}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn document_batch_returns_events_and_proposal() {
        let app = app();
        let id = create_session_on(&app).await;
        let resp = app
            .clone()
            .oneshot(post_json(
                &format!("/sessions/{id}/documents"),
                json!({"documents": [
                    {"filename": "permit.pdf", "category": "building_permit", "confidence": 0.9},
                    {"filename": "contract.pdf", "category": "contract", "confidence": 0.8}
                ]}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["events"].as_array().unwrap().len(), 2);
        assert_eq!(body["proposal"]["type"], "Building Project");

        let proposal = app
            .oneshot(
                Request::builder()
                    .uri(format!("/sessions/{id}/proposal"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(proposal.status(), StatusCode::OK);
        assert_eq!(body_json(proposal).await["riskAssessment"]["level"], "low");
    }

    #[tokio::test]
    async fn proposal_before_documents_is_404() {
        let app = app();
        let id = create_session_on(&app).await;
        let resp = app
            .oneshot(
                Request::builder()
                    .uri(format!("/sessions/{id}/proposal"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn widget_removal_round_trip() {
        let app = app();
        let id = create_session_on(&app).await;
        for content in ["123 Main Street", "500 Oak Ave"] {
            let _ = app
                .clone()
                .oneshot(post_json(
                    &format!("/sessions/{id}/actions"),
                    json!({"type": "query", "content": content}),
                ))
                .await
                .unwrap();
        }

        let removed = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/sessions/{id}/widgets/adaptive_map"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(body_json(removed).await["removed"], true);

        // absent id is a no-op, not an error
        let again = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/sessions/{id}/widgets/never_there"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(body_json(again).await["removed"], false);

        let log = app
            .oneshot(
                Request::builder()
                    .uri(format!("/sessions/{id}/adaptations?limit=1"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let events = body_json(log).await;
        assert_eq!(events["events"][0]["trigger"], "user_dismissed");
        assert_eq!(events["events"][0]["widgetsRemoved"][0], "adaptive_map");
    }

    #[tokio::test]
    async fn context_switch_preserves_adaptations() {
        let app = app();
        let id = create_session_on(&app).await;
        for content in ["123 Main Street", "500 Oak Ave"] {
            let _ = app
                .clone()
                .oneshot(post_json(
                    &format!("/sessions/{id}/actions"),
                    json!({"type": "query", "content": content}),
                ))
                .await
                .unwrap();
        }

        let switch = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri(format!("/sessions/{id}/context"))
                    .header("content-type", "application/json")
                    .body(Body::from(
                        json!({"departmentId": "finance", "role": "auditor"}).to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(body_json(switch).await["departmentId"], "finance");

        let view = app
            .oneshot(
                Request::builder()
                    .uri(format!("/sessions/{id}/view"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = body_json(view).await;
        assert_eq!(body["departmentName"], "Finance");
        let ids: Vec<&str> = body["widgets"]
            .as_array()
            .unwrap()
            .iter()
            .map(|w| w["id"].as_str().unwrap())
            .collect();
        assert_eq!(
            ids,
            vec!["expense_table", "document_search", "adaptive_map", "adaptive_timeline"]
        );
    }

    #[tokio::test]
    async fn view_stays_consistent_across_repeated_switches() {
        let app = app();
        let id = create_session_on(&app).await;
        for (dept, role, name) in [
            ("finance", "analyst", "Finance"),
            ("clerk", "clerk", "City Clerk"),
            ("planning", "planner", "Planning & Zoning"),
        ] {
            let _ = app
                .clone()
                .oneshot(
                    Request::builder()
                        .method("PUT")
                        .uri(format!("/sessions/{id}/context"))
                        .header("content-type", "application/json")
                        .body(Body::from(
                            json!({"departmentId": dept, "role": role}).to_string(),
                        ))
                        .unwrap(),
                )
                .await
                .unwrap();
            let view = app
                .clone()
                .oneshot(
                    Request::builder()
                        .uri(format!("/sessions/{id}/view"))
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            let body = body_json(view).await;
            // name, role, and widgets must all describe the same department
            assert_eq!(body["departmentId"], dept);
            assert_eq!(body["departmentName"], name);
            assert_eq!(body["role"], role);
        }
    }

    #[tokio::test]
    async fn unknown_session_is_404() {
        let app = app();
        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/sessions/sess_missing/view")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_session_then_404() {
        let app = app();
        let id = create_session_on(&app).await;
        let resp = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/sessions/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let again = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/sessions/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(again.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn manifest_reload_returns_no_content() {
        let app = app();
        let resp = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/departments/planning/manifest/reload")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn session_limit_returns_503() {
        let mut settings = GovpalSettings::default();
        settings.session.max_sessions = 1;
        let app = GovpalServer::new(Arc::new(settings)).router();
        let _ = create_session_on(&app).await;
        let resp = app.oneshot(post_json("/sessions", json!({}))).await.unwrap();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}

//! HTTP surface for the dialogue service.
//!
//! Endpoints (all under `/api/v1` except the banner and `/health`):
//! - `POST /api/v1/sms`                              — SMS webhook, TwiML reply
//! - `GET  /api/v1/sms/status`                       — status probe
//! - `POST /api/v1/voice`                            — call entry, greeting TwiML
//! - `POST /api/v1/voice/handle-input?session_id=…`  — speech turn, TwiML reply
//! - `GET  /api/v1/voice/conversation/{session_id}`  — transcript introspection
//! - `GET  /api/v1/voice/ws`                         — raw audio socket
//! - `GET  /api/v1/knowledge/query?query=…`          — classified knowledge lookup
//! - `POST /api/v1/knowledge/update`                 — admin partial update
//! - `GET  /api/v1/knowledge/business-type`          — configured business type
//! - `GET  /`                                        — service banner

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket},
        Form, Path, Query, State, WebSocketUpgrade,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::{debug, error};
use uuid::Uuid;

use frontdesk_agent::classify;
use frontdesk_channels::{
    AudioSocketAdapter, ChannelError, SmsAdapter, SmsWebhook, VoiceAdapter,
};
use frontdesk_core::config::AppConfig;
use frontdesk_core::knowledge::KnowledgeDocument;
use frontdesk_store::{KnowledgeStore, SessionStore};

pub const API_VERSION: &str = "/api/v1";

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub sessions: Arc<SessionStore>,
    pub knowledge: Arc<KnowledgeStore>,
    pub sms: Arc<SmsAdapter>,
    pub voice: Arc<VoiceAdapter>,
    pub audio: Arc<AudioSocketAdapter>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/v1/sms", post(sms_webhook))
        .route("/api/v1/sms/status", get(sms_status))
        .route("/api/v1/voice", post(voice_call))
        .route("/api/v1/voice/handle-input", post(voice_input))
        .route("/api/v1/voice/conversation/{session_id}", get(conversation))
        .route("/api/v1/voice/ws", get(audio_socket))
        .route("/api/v1/knowledge/query", get(knowledge_query))
        .route("/api/v1/knowledge/update", post(knowledge_update))
        .route("/api/v1/knowledge/business-type", get(business_type))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn xml_response(twiml: String) -> Response {
    ([(header::CONTENT_TYPE, "application/xml")], twiml).into_response()
}

async fn root(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "message": state.config.business.name,
        "business_type": state.config.business.business_type,
        "api_version": API_VERSION,
    }))
}

async fn sms_webhook(State(state): State<AppState>, Form(webhook): Form<SmsWebhook>) -> Response {
    match state.sms.handle(&webhook).await {
        Ok(twiml) => xml_response(twiml),
        Err(ChannelError::MissingSender) => (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "inbound payload is missing the sender number"})),
        )
            .into_response(),
        Err(channel_error) => {
            error!(
                event_name = "http.sms.failed",
                error = %channel_error,
                "sms webhook failed"
            );
            (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": "sms handling failed"})))
                .into_response()
        }
    }
}

async fn sms_status() -> Json<serde_json::Value> {
    Json(json!({"status": "SMS endpoint active"}))
}

async fn voice_call(State(state): State<AppState>) -> Response {
    match state.voice.answer_call().await {
        Ok(twiml) => xml_response(twiml),
        Err(channel_error) => {
            error!(
                event_name = "http.voice.answer_failed",
                error = %channel_error,
                "voice call entry failed"
            );
            (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": "voice handling failed"})))
                .into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
struct VoiceInputQuery {
    session_id: String,
}

#[derive(Debug, Default, Deserialize)]
struct VoiceInputForm {
    #[serde(rename = "SpeechResult", default)]
    speech_result: String,
}

async fn voice_input(
    State(state): State<AppState>,
    Query(query): Query<VoiceInputQuery>,
    Form(form): Form<VoiceInputForm>,
) -> Response {
    let twiml = state.voice.handle_speech(&query.session_id, &form.speech_result).await;
    xml_response(twiml)
}

async fn conversation(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Json<serde_json::Value> {
    let history = state.sessions.history(&session_id).await;
    Json(json!({"session_id": session_id, "history": history}))
}

#[derive(Debug, Default, Deserialize)]
struct AudioSocketQuery {
    session_id: Option<String>,
}

async fn audio_socket(
    State(state): State<AppState>,
    Query(query): Query<AudioSocketQuery>,
    upgrade: WebSocketUpgrade,
) -> Response {
    let session_key = query.session_id.unwrap_or_else(|| Uuid::new_v4().to_string());
    upgrade.on_upgrade(move |socket| run_audio_socket(socket, state.audio, session_key))
}

async fn run_audio_socket(mut socket: WebSocket, adapter: Arc<AudioSocketAdapter>, key: String) {
    debug!(event_name = "http.audio.connected", session_key = %key, "audio socket opened");

    while let Some(Ok(message)) = socket.recv().await {
        match message {
            Message::Binary(audio) => {
                let reply = adapter.handle_utterance(&key, &audio).await;
                let payload = match serde_json::to_string(&reply) {
                    Ok(payload) => payload,
                    Err(error) => {
                        error!(
                            event_name = "http.audio.encode_failed",
                            session_key = %key,
                            error = %error,
                            "could not encode audio reply"
                        );
                        continue;
                    }
                };
                if socket.send(Message::Text(payload.into())).await.is_err() {
                    break;
                }
            }
            Message::Close(_) => break,
            _ => {}
        }
    }

    debug!(event_name = "http.audio.closed", session_key = %key, "audio socket closed");
}

#[derive(Debug, Deserialize)]
struct KnowledgeQueryParams {
    query: String,
}

async fn knowledge_query(
    State(state): State<AppState>,
    Query(params): Query<KnowledgeQueryParams>,
) -> Json<serde_json::Value> {
    let label = classify(&params.query);
    let answer = state.knowledge.query(label).await;
    Json(answer.to_json())
}

async fn knowledge_update(
    State(state): State<AppState>,
    Json(partial): Json<serde_json::Map<String, serde_json::Value>>,
) -> Response {
    match state.knowledge.update(KnowledgeDocument(partial)).await {
        Ok(()) => Json(json!({"status": "updated"})).into_response(),
        Err(knowledge_error) => (
            StatusCode::BAD_GATEWAY,
            Json(json!({"error": knowledge_error.to_string(), "applied_in_memory": true})),
        )
            .into_response(),
    }
}

async fn business_type(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({"business_type": state.config.business.business_type}))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::util::ServiceExt;

    use frontdesk_agent::DialogueEngine;
    use frontdesk_channels::{
        AudioSocketAdapter, SmsAdapter, UnavailableTranscriber, VoiceAdapter,
    };
    use frontdesk_core::business::BusinessType;
    use frontdesk_core::config::AppConfig;
    use frontdesk_store::{InMemoryKnowledgeRepository, KnowledgeStore, SessionStore};

    use super::{router, AppState};

    async fn state(business_type: BusinessType) -> AppState {
        let mut config = AppConfig::default();
        config.business.business_type = business_type;

        let sessions = Arc::new(SessionStore::new());
        let knowledge = Arc::new(
            KnowledgeStore::open(business_type, Arc::new(InMemoryKnowledgeRepository::new()))
                .await,
        );
        let engine = Arc::new(DialogueEngine::new(Arc::clone(&sessions), Arc::clone(&knowledge)));

        AppState {
            config: Arc::new(config),
            sessions,
            knowledge,
            sms: Arc::new(SmsAdapter::new(Arc::clone(&engine), business_type)),
            voice: Arc::new(VoiceAdapter::new(Arc::clone(&engine), business_type)),
            audio: Arc::new(AudioSocketAdapter::new(
                engine,
                Arc::new(UnavailableTranscriber),
                business_type,
            )),
        }
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.expect("body");
        String::from_utf8(bytes.to_vec()).expect("utf8 body")
    }

    fn form_request(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_owned()))
            .expect("request")
    }

    fn json_request(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).expect("request")
    }

    #[tokio::test]
    async fn banner_reports_business_type() {
        let app = router(state(BusinessType::Restaurant).await);
        let response = app.oneshot(get_request("/")).await.expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("\"business_type\":\"restaurant\""));
        assert!(body.contains("/api/v1"));
    }

    #[tokio::test]
    async fn sms_webhook_replies_with_twiml() {
        let app = router(state(BusinessType::Restaurant).await);
        let response = app
            .oneshot(form_request(
                "/api/v1/sms",
                "Body=What+are+your+hours%3F&From=%2B15551234567",
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()),
            Some("application/xml")
        );
        let body = body_string(response).await;
        assert!(body.contains("<Message>We are open Monday-Sunday: 11am-10pm.</Message>"));
    }

    #[tokio::test]
    async fn sms_webhook_without_sender_is_bad_request() {
        let app = router(state(BusinessType::Restaurant).await);
        let response =
            app.oneshot(form_request("/api/v1/sms", "Body=Hi")).await.expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn sms_status_probe_is_active() {
        let app = router(state(BusinessType::Restaurant).await);
        let response = app.oneshot(get_request("/api/v1/sms/status")).await.expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains("SMS endpoint active"));
    }

    #[tokio::test]
    async fn voice_entry_greets_and_gathers() {
        let app = router(state(BusinessType::Restaurant).await);
        let response = app
            .oneshot(form_request("/api/v1/voice", ""))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("<Say>Hello! Welcome to our AI customer service."));
        assert!(body.contains("session_id="));
    }

    #[tokio::test]
    async fn voice_input_runs_a_turn_for_the_session() {
        let test_state = state(BusinessType::Restaurant).await;
        let sessions = Arc::clone(&test_state.sessions);
        let app = router(test_state);

        let response = app
            .oneshot(form_request(
                "/api/v1/voice/handle-input?session_id=call-1",
                "SpeechResult=what+are+your+hours",
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("<Say>We are open Monday-Sunday: 11am-10pm.</Say>"));
        assert_eq!(sessions.history("call-1").await.len(), 2);
    }

    #[tokio::test]
    async fn conversation_introspection_returns_ordered_history() {
        let test_state = state(BusinessType::Restaurant).await;
        let app = router(test_state.clone());

        app.clone()
            .oneshot(form_request("/api/v1/sms", "Body=Hi&From=%2B15550001111"))
            .await
            .expect("response");

        let response = app
            .oneshot(get_request("/api/v1/voice/conversation/%2B15550001111"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let body: serde_json::Value =
            serde_json::from_str(&body_string(response).await).expect("json");
        let history = body["history"].as_array().expect("history");
        assert_eq!(history.len(), 2);
        assert_eq!(history[0]["role"], "user");
        assert_eq!(history[1]["role"], "assistant");
    }

    #[tokio::test]
    async fn conversation_for_unknown_session_is_empty_not_an_error() {
        let app = router(state(BusinessType::Restaurant).await);
        let response = app
            .oneshot(get_request("/api/v1/voice/conversation/nobody"))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value =
            serde_json::from_str(&body_string(response).await).expect("json");
        assert_eq!(body["history"].as_array().map(Vec::len), Some(0));
    }

    #[tokio::test]
    async fn knowledge_query_classifies_and_answers() {
        let app = router(state(BusinessType::Restaurant).await);
        let response = app
            .oneshot(get_request("/api/v1/knowledge/query?query=what+are+your+hours"))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value =
            serde_json::from_str(&body_string(response).await).expect("json");
        assert_eq!(body["type"], "hours");
        assert_eq!(body["data"], "Monday-Sunday: 11am-10pm");
    }

    #[tokio::test]
    async fn knowledge_update_replaces_scalar_values() {
        let app = router(state(BusinessType::Restaurant).await);

        let response = app
            .clone()
            .oneshot(json_request(
                "/api/v1/knowledge/update",
                serde_json::json!({"hours": "Mon-Fri 9-5"}),
            ))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(get_request("/api/v1/knowledge/query?query=hours"))
            .await
            .expect("response");
        let body: serde_json::Value =
            serde_json::from_str(&body_string(response).await).expect("json");
        assert_eq!(body["data"], "Mon-Fri 9-5");
    }

    #[tokio::test]
    async fn business_type_endpoint_reflects_configuration() {
        let app = router(state(BusinessType::RealEstate).await);
        let response = app
            .oneshot(get_request("/api/v1/knowledge/business-type"))
            .await
            .expect("response");

        let body = body_string(response).await;
        assert!(body.contains("real_estate"));
    }

    #[tokio::test]
    async fn real_estate_sms_counts_properties() {
        let app = router(state(BusinessType::RealEstate).await);
        let response = app
            .oneshot(form_request(
                "/api/v1/sms",
                "Body=I+am+looking+for+a+house&From=%2B15559998888",
            ))
            .await
            .expect("response");

        let body = body_string(response).await;
        assert!(body.contains("We have 3 properties available."));
    }
}

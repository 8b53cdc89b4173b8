//! HTTP surface for the chat platform.
//!
//! `POST /interactions` takes a platform-shaped command payload, runs the
//! command and answers with the platform's reply shape. Replies carrying an
//! image are sent as `multipart/form-data`.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;
use tracing::warn;
use uuid::Uuid;

use crate::commands::{self, Command, Context};
use crate::models::Reply;
use crate::state::AppState;

pub const PING: u8 = 1;
pub const APPLICATION_COMMAND: u8 = 2;

const PONG: u8 = 1;
const CHANNEL_MESSAGE: u8 = 4;
const EPHEMERAL_FLAG: u64 = 1 << 6;

#[derive(Debug, Deserialize)]
pub struct Interaction {
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(default)]
    pub guild_id: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub data: Option<CommandData>,
}

#[derive(Debug, Deserialize)]
pub struct User {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct CommandData {
    pub name: String,
    #[serde(default)]
    pub options: Vec<CommandOption>,
    #[serde(default)]
    pub target_message: Option<TargetMessage>,
}

#[derive(Debug, Deserialize)]
pub struct CommandOption {
    pub name: String,
    pub value: Value,
}

#[derive(Debug, Deserialize)]
pub struct TargetMessage {
    pub id: String,
    #[serde(default)]
    pub content: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/interactions", post(interactions))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "named_colors": {
            "source": state.colors.source().as_str(),
            "count": state.colors.len(),
        },
    }))
}

async fn interactions(State(state): State<AppState>, Json(interaction): Json<Interaction>) -> Response {
    match interaction.kind {
        PING => Json(json!({ "type": PONG })).into_response(),
        APPLICATION_COMMAND => {
            let Some(data) = interaction.data else {
                return (StatusCode::BAD_REQUEST, "Missing command data").into_response();
            };

            let options: Vec<(String, Value)> = data
                .options
                .into_iter()
                .map(|o| (o.name, o.value))
                .collect();
            let target = data.target_message.as_ref().map(|m| m.content.as_str());

            let command = match Command::parse(&data.name, &options, target) {
                Ok(command) => command,
                Err(e) => {
                    warn!(error = %e, "Rejected interaction");
                    return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
                }
            };

            let ctx = Context {
                user_id: interaction.user.map(|u| u.id),
                guild_id: interaction.guild_id,
            };
            encode_reply(commands::run(&state, &ctx, command).await)
        }
        other => (
            StatusCode::BAD_REQUEST,
            format!("Unsupported interaction type {other}"),
        )
            .into_response(),
    }
}

/// JSON body of a channel-message reply
pub fn reply_payload(reply: &Reply) -> Value {
    let mut data = json!({
        "content": reply.content,
        "embeds": reply.embeds,
        "allowed_mentions": { "parse": [], "users": reply.mentions },
        "flags": if reply.ephemeral { EPHEMERAL_FLAG } else { 0 },
    });
    if let Some(attachment) = &reply.attachment {
        data["attachments"] = json!([{ "id": 0, "filename": attachment.filename }]);
    }
    json!({ "type": CHANNEL_MESSAGE, "data": data })
}

fn encode_reply(reply: Reply) -> Response {
    let payload = reply_payload(&reply);
    let Some(attachment) = reply.attachment else {
        return Json(payload).into_response();
    };

    let payload = payload.to_string();
    let boundary = pick_boundary(&[payload.as_bytes(), attachment.bytes.as_slice()]);
    let body = multipart_body(&boundary, &payload, &attachment.filename, &attachment.bytes);

    (
        [(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )],
        body,
    )
        .into_response()
}

/// A fresh boundary that occurs in none of `parts`
fn pick_boundary(parts: &[&[u8]]) -> String {
    loop {
        let boundary = format!("pencil-{}", Uuid::new_v4().simple());
        let needle = boundary.as_bytes();
        if !parts
            .iter()
            .any(|part| part.windows(needle.len()).any(|w| w == needle))
        {
            return boundary;
        }
    }
}

fn multipart_body(boundary: &str, payload: &str, filename: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(bytes.len() + payload.len() + 512);
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"payload_json\"\r\nContent-Type: application/json\r\n\r\n{payload}\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"files[0]\"; filename=\"{filename}\"\r\nContent-Type: image/png\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    body
}

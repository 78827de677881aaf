//! `postMessage` protocol of the YouTube iframe API.

use std::sync::{Arc, Mutex, PoisonError};

use quiz_core::model::{SurfaceCapabilities, VideoKind};
use serde::Deserialize;
use serde_json::{Value, json};

use super::surface::{PlayerState, SurfaceEvent, VideoSurface};
use crate::error::SurfaceDecodeError;

/// Outbound channel into the player window.
pub trait MessagePort {
    fn post(&mut self, message: &str);
}

/// Port that keeps every posted message. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingPort {
    messages: Arc<Mutex<Vec<String>>>,
}

impl RecordingPort {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drain and return the recorded messages.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.messages.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl MessagePort for RecordingPort {
    fn post(&mut self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_owned());
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerCommand {
    Play,
    Pause,
    SeekTo(f64),
}

impl PlayerCommand {
    #[must_use]
    pub fn func(self) -> &'static str {
        match self {
            Self::Play => "playVideo",
            Self::Pause => "pauseVideo",
            Self::SeekTo(_) => "seekTo",
        }
    }

    #[must_use]
    pub fn encode(self) -> String {
        let args = match self {
            Self::Play | Self::Pause => json!([]),
            Self::SeekTo(secs) => json!([secs, true]),
        };
        json!({
            "event": "command",
            "func": self.func(),
            "args": args,
        })
        .to_string()
    }
}

/// Subscribe message that makes the player start sending `infoDelivery` updates.
#[must_use]
pub fn listening_message() -> String {
    json!({ "event": "listening" }).to_string()
}

#[derive(Debug, Deserialize)]
struct InboundMessage {
    #[serde(default)]
    event: Option<String>,
    #[serde(default)]
    info: Option<Value>,
}

/// Decode one message received from the player window.
///
/// # Errors
///
/// Returns `SurfaceDecodeError` if `raw` is not a JSON object.
pub fn decode_message(raw: &str) -> Result<Option<SurfaceEvent>, SurfaceDecodeError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|err| SurfaceDecodeError::Malformed(err.to_string()))?;
    if !value.is_object() {
        return Err(SurfaceDecodeError::NotAnObject);
    }
    let message: InboundMessage = serde_json::from_value(value)
        .map_err(|err| SurfaceDecodeError::Malformed(err.to_string()))?;

    let Some(info) = message.info else {
        return Ok(None);
    };

    if let Some(code) = info.as_i64() {
        return Ok((message.event.as_deref() == Some("onStateChange"))
            .then(|| SurfaceEvent::StateChange(PlayerState::from_code(code))));
    }

    let player_state = info
        .get("playerState")
        .and_then(Value::as_i64)
        .map(PlayerState::from_code);
    let event = match info.get("currentTime").and_then(Value::as_f64) {
        Some(current_time) => Some(SurfaceEvent::Time {
            current_time,
            player_state,
        }),
        None => player_state.map(SurfaceEvent::StateChange),
    };
    Ok(event)
}

/// YouTube iframe driven through a `MessagePort`.
#[derive(Debug, Clone)]
pub struct YouTubeSurface<P> {
    port: P,
}

impl<P: MessagePort> YouTubeSurface<P> {
    pub fn new(port: P) -> Self {
        Self { port }
    }

    fn send(&mut self, command: PlayerCommand) {
        self.port.post(&command.encode());
    }
}

impl<P: MessagePort> VideoSurface for YouTubeSurface<P> {
    fn capabilities(&self) -> SurfaceCapabilities {
        VideoKind::YouTube.capabilities()
    }

    fn play(&mut self) {
        self.send(PlayerCommand::Play);
    }

    fn pause(&mut self) {
        self.send(PlayerCommand::Pause);
    }

    fn seek_to(&mut self, secs: f64) {
        self.send(PlayerCommand::SeekTo(secs));
    }

    fn poll(&mut self) {
        self.port.post(&listening_message());
    }

    fn decode_event(&self, raw: &str) -> Result<Option<SurfaceEvent>, SurfaceDecodeError> {
        decode_message(raw)
    }
}

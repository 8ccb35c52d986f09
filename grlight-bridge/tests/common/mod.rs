//! Shared test doubles for the bridge integration tests

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use grlight_api::{HttpClient, HttpError, HttpResponse};
use grlight_bridge::{
    AccessoryInformation, Channel, CharacteristicRegistry, DeviceIdentity, GetHandler,
    LightAccessory, LightClient, SetHandler,
};
use tokio::sync::oneshot;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

// ============================================================================
// Scripted transport
// ============================================================================

/// One canned reply, optionally held back until a gate opens
pub struct Reply {
    response: Result<HttpResponse, HttpError>,
    hold: Option<oneshot::Receiver<()>>,
}

impl Reply {
    pub fn ok(body: &str) -> Self {
        Self {
            response: Ok(HttpResponse::new(200, body)),
            hold: None,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            response: Ok(HttpResponse::new(status, "")),
            hold: None,
        }
    }

    pub fn network_error() -> Self {
        Self {
            response: Err(HttpError::Network("connection refused".to_string())),
            hold: None,
        }
    }

    /// Deliver this reply only after `gate` fires
    pub fn held_until(mut self, gate: oneshot::Receiver<()>) -> Self {
        self.hold = Some(gate);
        self
    }
}

/// Transport that answers requests from a queue and records every URL
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new(replies: Vec<Reply>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpClient for ScriptedTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, HttpError> {
        self.requests.lock().unwrap().push(url.to_string());
        let reply = { self.replies.lock().unwrap().pop_front() };

        let Some(reply) = reply else {
            return Err(HttpError::Network(format!("no scripted reply for {}", url)));
        };
        if let Some(gate) = reply.hold {
            let _ = gate.await;
        }
        reply.response
    }
}

/// Accessory at `10.0.0.5:8080` over https, backed by `transport`
pub fn scripted_accessory(transport: Arc<ScriptedTransport>, debug: bool) -> LightAccessory {
    let identity = DeviceIdentity::new("Desk", "10.0.0.5")
        .with_port("8080")
        .with_scheme("https")
        .with_debug(debug);
    LightAccessory::with_client(identity, LightClient::with_http_client(transport)).unwrap()
}

// ============================================================================
// Stateful device
// ============================================================================

/// Transport that behaves like the lightbulb firmware
///
/// Writes update an in-memory state keyed by field name and reads answer with
/// the stored field, so the reply depends only on the URL and not on arrival
/// order.
#[derive(Default)]
pub struct FakeDevice {
    state: Mutex<HashMap<String, serde_json::Value>>,
    requests: Mutex<Vec<String>>,
}

impl FakeDevice {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpClient for FakeDevice {
    async fn get(&self, url: &str) -> Result<HttpResponse, HttpError> {
        self.requests.lock().unwrap().push(url.to_string());

        let path = url
            .split_once("://")
            .and_then(|(_, rest)| rest.split_once('/'))
            .map(|(_, path)| path)
            .unwrap_or("");
        let segments: Vec<&str> = path.split('/').collect();
        let mut state = self.state.lock().unwrap();

        let body = match segments.as_slice() {
            ["on"] => {
                state.insert("state".to_string(), true.into());
                String::new()
            }
            ["off"] => {
                state.insert("state".to_string(), false.into());
                String::new()
            }
            [field, value] => {
                let Ok(level) = value.parse::<i64>() else {
                    return Ok(HttpResponse::new(400, ""));
                };
                state.insert(field.to_string(), level.into());
                String::new()
            }
            [field] => {
                let mut body = serde_json::Map::new();
                if let Some(value) = state.get(*field) {
                    body.insert(field.to_string(), value.clone());
                }
                serde_json::Value::Object(body).to_string()
            }
            _ => return Ok(HttpResponse::new(404, "")),
        };
        Ok(HttpResponse::new(200, body))
    }
}

/// Accessory at `10.0.0.5:8080` talking to `device`
pub fn fake_accessory(device: Arc<FakeDevice>) -> LightAccessory {
    let identity = DeviceIdentity::new("Desk", "10.0.0.5").with_port("8080");
    LightAccessory::with_client(identity, LightClient::with_http_client(device)).unwrap()
}

// ============================================================================
// Host registry double
// ============================================================================

/// In-memory stand-in for the host's characteristic registry
#[derive(Default)]
pub struct MemoryRegistry {
    pub name: Option<String>,
    pub information: Option<AccessoryInformation>,
    pub getters: HashMap<Channel, GetHandler>,
    pub setters: HashMap<Channel, SetHandler>,
}

impl CharacteristicRegistry for MemoryRegistry {
    fn set_information(&mut self, name: &str, info: &AccessoryInformation) {
        self.name = Some(name.to_string());
        self.information = Some(info.clone());
    }

    fn on_get(&mut self, channel: Channel, handler: GetHandler) {
        self.getters.insert(channel, handler);
    }

    fn on_set(&mut self, channel: Channel, handler: SetHandler) {
        self.setters.insert(channel, handler);
    }
}

// ============================================================================
// Log capture
// ============================================================================

/// Layer recording level and message of every per-call diagnostic
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<(Level, String)>>>);

impl CapturedLogs {
    pub fn entries(&self) -> Vec<(Level, String)> {
        self.0.lock().unwrap().clone()
    }
}

struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{:?}", value);
        }
    }
}

impl<S: Subscriber> Layer<S> for CapturedLogs {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if event.metadata().target() != "grlight_bridge::device" {
            return;
        }
        let mut visitor = MessageVisitor(String::new());
        event.record(&mut visitor);
        self.0
            .lock()
            .unwrap()
            .push((*event.metadata().level(), visitor.0));
    }
}

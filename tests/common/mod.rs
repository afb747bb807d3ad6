//! Stand-in job matching backend: a rocket server that records every request
//! and answers with a canned status and body.
#![allow(dead_code)]

use std::convert::Infallible;
use std::net::Ipv4Addr;
use std::sync::{Arc, Mutex};

use rocket::config::{LogLevel, Shutdown as ShutdownConfig};
use rocket::data::{Data, ToByteUnit};
use rocket::fairing::AdHoc;
use rocket::http::{ContentType, Status};
use rocket::request::{FromRequest, Outcome, Request};
use rocket::{post, routes, Config, Shutdown, State};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("request body is not JSON")
    }
}

/// Method, path and headers of an incoming request.
struct RequestHead {
    method: String,
    path: String,
    headers: Vec<(String, String)>,
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for RequestHead {
    type Error = Infallible;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        Outcome::Success(RequestHead {
            method: request.method().as_str().to_string(),
            path: request.uri().path().to_string(),
            headers: request
                .headers()
                .iter()
                .map(|h| (h.name().as_str().to_ascii_lowercase(), h.value().to_string()))
                .collect(),
        })
    }
}

struct CannedReply {
    status: Status,
    body: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

#[post("/<_..>", data = "<data>")]
async fn record(
    head: RequestHead,
    data: Data<'_>,
    reply: &State<CannedReply>,
) -> (Status, (ContentType, String)) {
    let body = data
        .open(64.mebibytes())
        .into_bytes()
        .await
        .map(|bytes| bytes.into_inner())
        .unwrap_or_default();

    reply.requests.lock().unwrap().push(RecordedRequest {
        method: head.method,
        path: head.path,
        headers: head.headers,
        body,
    });

    (reply.status, (ContentType::JSON, reply.body.clone()))
}

pub struct MockBackend {
    url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    shutdown: Shutdown,
}

impl MockBackend {
    /// Every request gets `status` with `body`.
    pub async fn start(status: u16, body: impl Into<String>) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let (tx, rx) = oneshot::channel::<(u16, Shutdown)>();

        let config = Config {
            address: Ipv4Addr::LOCALHOST.into(),
            port: 0,
            log_level: LogLevel::Off,
            shutdown: ShutdownConfig {
                ctrlc: false,
                grace: 0,
                mercy: 0,
                ..ShutdownConfig::default()
            },
            ..Config::debug_default()
        };

        let rocket = rocket::custom(config)
            .manage(CannedReply {
                status: Status::new(status),
                body: body.into(),
                requests: Arc::clone(&requests),
            })
            .mount("/", routes![record])
            .attach(AdHoc::on_liftoff("Bound port", move |rocket| {
                Box::pin(async move {
                    let _ = tx.send((rocket.config().port, rocket.shutdown()));
                })
            }));

        tokio::spawn(async move {
            let _ = rocket.launch().await;
        });
        let (port, shutdown) = rx.await.expect("mock backend failed to launch");

        Self {
            url: format!("http://127.0.0.1:{}", port),
            requests,
            shutdown,
        }
    }

    pub async fn json(status: u16, body: Value) -> Self {
        Self::start(status, body.to_string()).await
    }

    pub fn url(&self) -> String {
        self.url.clone()
    }

    pub fn hits(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("backend received no requests")
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.shutdown.clone().notify();
    }
}

/// An address nothing listens on.
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// A small but well-formed PDF.
pub fn sample_pdf() -> Vec<u8> {
    b"%PDF-1.4\n1 0 obj << /Type /Catalog >> endobj\ntrailer << /Root 1 0 R >>\n%%EOF\n"
        .to_vec()
}

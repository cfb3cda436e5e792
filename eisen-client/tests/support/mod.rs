//! Shared test fixtures
//!
//! [`FakeBackend`] is an in-memory matrix service mounted on a wiremock
//! server. [`Harness`] drives the board state machine against it with the
//! real effect runner.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use eisen_client::api::ApiClient;
use eisen_client::config::ApiConfig;
use eisen_client::runtime::EffectRunner;
use eisen_client::state::{update, AppState, Effect, Msg};
use serde_json::{json, Value};
use tokio::sync::mpsc;
use wiremock::matchers::path_regex;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

const PREFIX: &str = "/api/v1";

#[derive(Debug, Clone)]
struct TaskRow {
    id: i64,
    title: String,
    description: String,
    quadrant: String,
    label_ids: Vec<i64>,
}

#[derive(Debug, Clone)]
struct LabelRow {
    id: i64,
    name: String,
    color: Option<String>,
}

#[derive(Debug, Default)]
struct MatrixRow {
    tasks: Vec<TaskRow>,
    labels: Vec<LabelRow>,
}

#[derive(Debug, Default)]
struct Store {
    matrices: HashMap<String, MatrixRow>,
    next_id: i64,
}

impl Store {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

fn label_json(label: &LabelRow) -> Value {
    json!({"id": label.id, "name": label.name, "color": label.color})
}

fn task_json(task: &TaskRow, labels: &[LabelRow]) -> Value {
    let expanded: Vec<Value> = task
        .label_ids
        .iter()
        .filter_map(|id| labels.iter().find(|l| l.id == *id))
        .map(label_json)
        .collect();
    json!({
        "id": task.id,
        "title": task.title,
        "description": task.description,
        "quadrant": task.quadrant,
        "labels": expanded
    })
}

fn detail(message: &str) -> Value {
    json!({"detail": message})
}

fn name_taken(labels: &[LabelRow], name: &str, except: Option<i64>) -> bool {
    let wanted = name.trim().to_lowercase();
    labels
        .iter()
        .filter(|l| Some(l.id) != except)
        .any(|l| l.name.trim().to_lowercase() == wanted)
}

/// In-memory matrix service speaking the REST API
#[derive(Clone, Default)]
pub struct FakeBackend {
    store: Arc<Mutex<Store>>,
}

impl FakeBackend {
    /// Start a mock server with a fresh backend mounted under `/api/v1`
    pub async fn start() -> (MockServer, FakeBackend) {
        let server = MockServer::start().await;
        let backend = FakeBackend::default();
        Mock::given(path_regex(format!("^{}/", PREFIX)))
            .respond_with(backend.clone())
            .mount(&server)
            .await;
        (server, backend)
    }

    pub fn api_base(server: &MockServer) -> String {
        format!("{}{}", server.uri(), PREFIX)
    }

    pub fn client(server: &MockServer) -> ApiClient {
        ApiClient::new(&ApiConfig {
            base_url: Self::api_base(server),
            timeout_secs: 5,
        })
        .unwrap()
    }

    /// Label ids attached to a task, straight from the store
    pub fn task_label_ids(&self, matrix: &str, task_id: i64) -> Option<Vec<i64>> {
        let store = self.store.lock().unwrap();
        store
            .matrices
            .get(matrix)?
            .tasks
            .iter()
            .find(|t| t.id == task_id)
            .map(|t| t.label_ids.clone())
    }

    fn handle(&self, method: &str, segments: &[&str], body: &[u8]) -> ResponseTemplate {
        let mut store = self.store.lock().unwrap();
        let body: Value = serde_json::from_slice(body).unwrap_or(Value::Null);

        if let ["matrices"] = segments {
            if method != "POST" {
                return ResponseTemplate::new(405);
            }
            let id = uuid::Uuid::new_v4().to_string();
            store.matrices.insert(id.clone(), MatrixRow::default());
            return ResponseTemplate::new(201).set_body_json(json!({
                "id": id,
                "sharable_link": format!("/matrix/{}", id),
                "created_at": "2026-01-01T00:00:00",
                "updated_at": "2026-01-01T00:00:00"
            }));
        }

        let Some(matrix_id) = segments.get(1).map(|s| s.to_string()) else {
            return ResponseTemplate::new(404).set_body_json(detail("Not Found"));
        };
        if !store.matrices.contains_key(&matrix_id) {
            return ResponseTemplate::new(404).set_body_json(detail("Matrix not found"));
        }
        let next_id = store.next_id();
        let Some(matrix) = store.matrices.get_mut(&matrix_id) else {
            return ResponseTemplate::new(404).set_body_json(detail("Matrix not found"));
        };

        match (method, &segments[2..]) {
            ("GET", []) => {
                let tasks: Vec<Value> = matrix.tasks.iter().map(|t| task_json(t, &matrix.labels)).collect();
                let labels: Vec<Value> = matrix.labels.iter().map(label_json).collect();
                ResponseTemplate::new(200).set_body_json(json!({
                    "id": matrix_id,
                    "tasks": tasks,
                    "labels": labels
                }))
            }

            ("POST", ["tasks"]) => {
                let label_ids: Vec<i64> = body["label_ids"]
                    .as_array()
                    .map(|ids| ids.iter().filter_map(Value::as_i64).collect())
                    .unwrap_or_default();
                let task = TaskRow {
                    id: next_id,
                    title: body["title"].as_str().unwrap_or_default().to_string(),
                    description: body["description"].as_str().unwrap_or_default().to_string(),
                    quadrant: body["quadrant"].as_str().unwrap_or("urgent_important").to_string(),
                    label_ids: label_ids
                        .into_iter()
                        .filter(|id| matrix.labels.iter().any(|l| l.id == *id))
                        .collect(),
                };
                let response = task_json(&task, &matrix.labels);
                matrix.tasks.push(task);
                ResponseTemplate::new(201).set_body_json(response)
            }

            ("PUT", ["tasks", task_id]) => {
                let labels = matrix.labels.clone();
                let Some(task) = matrix.tasks.iter_mut().find(|t| t.id.to_string() == *task_id) else {
                    return ResponseTemplate::new(404).set_body_json(detail("Task not found"));
                };
                if let Some(title) = body["title"].as_str() {
                    task.title = title.to_string();
                }
                if let Some(description) = body["description"].as_str() {
                    task.description = description.to_string();
                }
                if let Some(quadrant) = body["quadrant"].as_str() {
                    task.quadrant = quadrant.to_string();
                }
                if let Some(ids) = body["label_ids"].as_array() {
                    task.label_ids = ids
                        .iter()
                        .filter_map(Value::as_i64)
                        .filter(|id| labels.iter().any(|l| l.id == *id))
                        .collect();
                }
                ResponseTemplate::new(200).set_body_json(task_json(task, &labels))
            }

            ("DELETE", ["tasks", task_id]) => {
                let before = matrix.tasks.len();
                matrix.tasks.retain(|t| t.id.to_string() != *task_id);
                if matrix.tasks.len() == before {
                    return ResponseTemplate::new(404).set_body_json(detail("Task not found"));
                }
                ResponseTemplate::new(204)
            }

            ("POST", ["labels"]) => {
                let name = body["name"].as_str().unwrap_or_default().to_string();
                if name_taken(&matrix.labels, &name, None) {
                    return ResponseTemplate::new(409)
                        .set_body_json(detail("Label with this name already exists for this matrix"));
                }
                let label = LabelRow {
                    id: next_id,
                    name,
                    color: body["color"].as_str().map(str::to_string),
                };
                let response = label_json(&label);
                matrix.labels.push(label);
                ResponseTemplate::new(201).set_body_json(response)
            }

            ("PUT", ["labels", label_id]) => {
                let Some(id) = label_id.parse::<i64>().ok() else {
                    return ResponseTemplate::new(422);
                };
                if let Some(name) = body["name"].as_str() {
                    if name_taken(&matrix.labels, name, Some(id)) {
                        return ResponseTemplate::new(409).set_body_json(detail(
                            "Another label with this name already exists for this matrix",
                        ));
                    }
                }
                let Some(label) = matrix.labels.iter_mut().find(|l| l.id == id) else {
                    return ResponseTemplate::new(404).set_body_json(detail("Label not found"));
                };
                if let Some(name) = body["name"].as_str() {
                    label.name = name.to_string();
                }
                ResponseTemplate::new(200).set_body_json(label_json(label))
            }

            ("DELETE", ["labels", label_id]) => {
                let Some(id) = label_id.parse::<i64>().ok() else {
                    return ResponseTemplate::new(422);
                };
                let before = matrix.labels.len();
                matrix.labels.retain(|l| l.id != id);
                if matrix.labels.len() == before {
                    return ResponseTemplate::new(404).set_body_json(detail("Label not found"));
                }
                for task in &mut matrix.tasks {
                    task.label_ids.retain(|l| *l != id);
                }
                ResponseTemplate::new(204)
            }

            _ => ResponseTemplate::new(405),
        }
    }
}

impl Respond for FakeBackend {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let path = request.url.path();
        let rest = path.strip_prefix(PREFIX).unwrap_or(path);
        let segments: Vec<&str> = rest.trim_matches('/').split('/').collect();
        self.handle(request.method.as_str(), &segments, &request.body)
    }
}

/// Board state machine wired to the real effect runner
///
/// Every effect that talks to the server produces exactly one message, so
/// [`Harness::settle`] can wait for all of them.
pub struct Harness {
    pub state: AppState,
    runner: EffectRunner,
    rx: mpsc::UnboundedReceiver<Msg>,
    outstanding: usize,
}

impl Harness {
    pub fn new(server: &MockServer) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let runner = EffectRunner::new(FakeBackend::client(server), tx, Duration::from_secs(3600));
        Self {
            state: AppState::new("http://web.test"),
            runner,
            rx,
            outstanding: 0,
        }
    }

    /// Apply a message and start its effects, returning what was requested
    pub fn dispatch(&mut self, msg: Msg) -> Vec<Effect> {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.outstanding += effects
            .iter()
            .filter(|e| matches!(e, Effect::CreateMatrix | Effect::Fetch(_) | Effect::Mutate { .. }))
            .count();
        self.runner.run_all(effects.clone());
        effects
    }

    /// Feed completions back until nothing is in flight
    pub async fn settle(&mut self) {
        while self.outstanding > 0 {
            let msg = tokio::time::timeout(Duration::from_secs(5), self.rx.recv())
                .await
                .expect("timed out waiting for the runner")
                .expect("runner channel closed");
            if matches!(msg, Msg::PollTick(_)) {
                continue;
            }
            self.outstanding -= 1;
            self.dispatch(msg);
        }
    }

    /// Dispatch a batch of user messages, then settle
    pub async fn run(&mut self, msgs: Vec<Msg>) {
        for msg in msgs {
            self.dispatch(msg);
        }
        self.settle().await;
    }
}

//! reqwest-backed client for the matrix REST API

use eisen_protocol::{
    Label, LabelCreate, LabelId, LabelUpdate, MatrixCreated, MatrixDetail, MatrixId, Method,
    Route, Task, TaskCreate, TaskId, TaskUpdate,
};
use eisen_utils::{EisenError, Result};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use url::Url;

use super::status::error_for_status;
use crate::config::ApiConfig;

/// Client for the matrix service
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
    timeout_secs: u64,
}

impl ApiClient {
    /// Build a client from configuration
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base = Url::parse(&config.base_url).map_err(|e| EisenError::InvalidUrl {
            url: config.base_url.clone(),
            message: e.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(EisenError::InvalidUrl {
                url: config.base_url.clone(),
                message: "URL cannot carry a path".into(),
            });
        }

        let timeout = config.timeout();
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("eisen/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| EisenError::http(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base,
            timeout_secs: timeout.as_secs(),
        })
    }

    /// Absolute URL for a route, with each segment percent-encoded
    pub fn url_for(&self, route: &Route) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(route.segments());
        }
        url
    }

    fn request(&self, route: &Route) -> RequestBuilder {
        let method = match route.method() {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };
        self.http.request(method, self.url_for(route))
    }

    /// Send a request and turn transport failures and non-2xx statuses into errors
    async fn dispatch(&self, route: &Route, request: RequestBuilder) -> Result<Response> {
        tracing::debug!("{}", route);

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                EisenError::Timeout {
                    seconds: self.timeout_secs,
                }
            } else {
                EisenError::http(e.to_string())
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = error_for_status(route, status, &body);
        tracing::debug!("{} failed: {}", route, err);
        Err(err)
    }

    async fn decode<T: DeserializeOwned>(route: &Route, response: Response) -> Result<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| EisenError::invalid_response(format!("{}: {}", route, e)))
    }

    /// `POST /matrices`
    pub async fn create_matrix(&self) -> Result<MatrixCreated> {
        let route = Route::CreateMatrix;
        let response = self.dispatch(&route, self.request(&route)).await?;
        let created: MatrixCreated = Self::decode(&route, response).await?;
        tracing::info!("Created matrix {}", created.id);
        Ok(created)
    }

    /// `GET /matrices/{id}`: tasks and labels of one matrix
    pub async fn fetch_matrix(&self, id: &MatrixId) -> Result<MatrixDetail> {
        let route = Route::GetMatrix(id.clone());
        let response = self.dispatch(&route, self.request(&route)).await?;
        Self::decode(&route, response).await
    }

    /// `POST /matrices/{id}/tasks`
    pub async fn create_task(&self, id: &MatrixId, task: &TaskCreate) -> Result<Task> {
        let route = Route::CreateTask(id.clone());
        let response = self.dispatch(&route, self.request(&route).json(task)).await?;
        Self::decode(&route, response).await
    }

    /// `PUT /matrices/{id}/tasks/{task_id}` with a partial body
    pub async fn update_task(&self, id: &MatrixId, task_id: TaskId, update: &TaskUpdate) -> Result<Task> {
        let route = Route::UpdateTask(id.clone(), task_id);
        let response = self.dispatch(&route, self.request(&route).json(update)).await?;
        Self::decode(&route, response).await
    }

    /// `DELETE /matrices/{id}/tasks/{task_id}`
    pub async fn delete_task(&self, id: &MatrixId, task_id: TaskId) -> Result<()> {
        let route = Route::DeleteTask(id.clone(), task_id);
        self.dispatch(&route, self.request(&route)).await?;
        Ok(())
    }

    /// `POST /matrices/{id}/labels`; a duplicate name comes back as `Conflict`
    pub async fn create_label(&self, id: &MatrixId, label: &LabelCreate) -> Result<Label> {
        let route = Route::CreateLabel(id.clone());
        let response = self.dispatch(&route, self.request(&route).json(label)).await?;
        Self::decode(&route, response).await
    }

    /// `PUT /matrices/{id}/labels/{label_id}`
    pub async fn update_label(&self, id: &MatrixId, label_id: LabelId, update: &LabelUpdate) -> Result<Label> {
        let route = Route::UpdateLabel(id.clone(), label_id);
        let response = self.dispatch(&route, self.request(&route).json(update)).await?;
        Self::decode(&route, response).await
    }

    /// `DELETE /matrices/{id}/labels/{label_id}`
    pub async fn delete_label(&self, id: &MatrixId, label_id: LabelId) -> Result<()> {
        let route = Route::DeleteLabel(id.clone(), label_id);
        self.dispatch(&route, self.request(&route)).await?;
        Ok(())
    }
}

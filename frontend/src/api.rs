//! Collections backed by the REST API, called through the browser's fetch.

use std::marker::PhantomData;

use async_trait::async_trait;
use shared::{Collection, PersistenceError, PersistenceResult, Record};
use uuid::Uuid;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

pub const API_BASE: &str = "/api";

pub struct HttpCollection<R> {
    base: String,
    _record: PhantomData<fn() -> R>,
}

impl<R> std::fmt::Debug for HttpCollection<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpCollection")
            .field("base", &self.base)
            .finish()
    }
}

impl<R: Record> HttpCollection<R> {
    /// Collection rooted at `<API_BASE>/<segment>`.
    pub fn new(segment: &str) -> Self {
        Self {
            base: format!("{API_BASE}/{segment}"),
            _record: PhantomData,
        }
    }

    fn item_url(&self, id: Uuid) -> String {
        format!("{}/{}", self.base, id)
    }

    async fn send(
        &self,
        method: &str,
        url: &str,
        body: Option<String>,
        id: Option<Uuid>,
    ) -> PersistenceResult<Option<String>> {
        let opts = RequestInit::new();
        opts.set_method(method);
        if let Some(body) = &body {
            opts.set_body(&JsValue::from_str(body));
        }

        let request = Request::new_with_str_and_init(url, &opts)
            .map_err(|_| PersistenceError::transport("Failed to create request"))?;
        if body.is_some() {
            request
                .headers()
                .set("Content-Type", "application/json")
                .map_err(|_| PersistenceError::transport("Failed to set header"))?;
        }

        let window = web_sys::window().ok_or_else(|| PersistenceError::transport("No window"))?;
        let response: Response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|_| PersistenceError::transport(format!("Failed to send {method} {url}")))?
            .into();

        match (response.status(), id) {
            (404, Some(id)) => return Err(PersistenceError::NotFound { kind: R::KIND, id }),
            (204, _) => return Ok(None),
            (status, _) if !response.ok() => {
                return Err(PersistenceError::storage(format!(
                    "{method} {url} returned {status}"
                )))
            }
            _ => {}
        }

        let text_promise = response
            .text()
            .map_err(|_| PersistenceError::transport("Failed to read response"))?;
        let text = JsFuture::from(text_promise)
            .await
            .map_err(|_| PersistenceError::transport("Failed to get text"))?
            .as_string()
            .ok_or_else(|| PersistenceError::transport("Failed to convert to string"))?;
        Ok(Some(text))
    }

    async fn send_json<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        url: &str,
        body: Option<String>,
        id: Option<Uuid>,
    ) -> PersistenceResult<T> {
        let text = self
            .send(method, url, body, id)
            .await?
            .ok_or_else(|| PersistenceError::transport(format!("Empty response from {url}")))?;
        serde_json::from_str(&text)
            .map_err(|e| PersistenceError::transport(format!("Failed to parse JSON: {e}")))
    }
}

fn to_body<T: serde::Serialize>(value: &T) -> PersistenceResult<String> {
    serde_json::to_string(value).map_err(|_| PersistenceError::transport("Failed to serialize request"))
}

#[async_trait(?Send)]
impl<R: Record> Collection for HttpCollection<R> {
    type Record = R;
    type Draft = R::Draft;
    type Patch = R::Patch;

    async fn get_all(&self) -> PersistenceResult<Vec<R>> {
        self.send_json("GET", &self.base, None, None).await
    }

    async fn create(&self, draft: R::Draft) -> PersistenceResult<R> {
        let body = to_body(&draft)?;
        self.send_json("POST", &self.base, Some(body), None).await
    }

    async fn update(&self, id: Uuid, patch: R::Patch) -> PersistenceResult<R> {
        let body = to_body(&patch)?;
        self.send_json("PUT", &self.item_url(id), Some(body), Some(id))
            .await
    }

    async fn delete(&self, id: Uuid) -> PersistenceResult<()> {
        self.send("DELETE", &self.item_url(id), None, Some(id))
            .await
            .map(|_| ())
    }
}

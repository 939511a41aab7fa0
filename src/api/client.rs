//! HTTP client with credential injection and authentication-failure
//! recovery.
//!
//! Owns one long-lived reqwest client (base address, 30s timeout, JSON
//! default headers). Before every call the current bearer token is resolved
//! through the [`Session`]; a missing credential is not an error — the
//! request simply goes out unauthenticated. A 401 response triggers the
//! session invalidation sequence before the failure is re-raised.

use std::io;
use std::sync::Arc;

use bytes::Bytes;
use futures_util::stream::{Stream, StreamExt};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::envelope::{ApiResponse, UploadProgress};
use super::error::ApiError;
use crate::config::ApiConfig;
use crate::session::Session;

/// Chunk size for progress-reporting upload bodies.
const UPLOAD_CHUNK_SIZE: usize = 64 * 1024;

/// Callback invoked with a fresh [`UploadProgress`] per transmitted chunk.
pub type ProgressCallback = Arc<dyn Fn(UploadProgress) + Send + Sync>;

/// Binary payload for a multipart upload.
pub struct FilePayload {
    pub file_name: String,
    pub mime_type: String,
    source: FileSource,
}

enum FileSource {
    /// Fully buffered payload; the total size is known.
    Bytes(Vec<u8>),
    /// Streamed payload; the total size may be unknown.
    Stream {
        stream: futures_util::stream::BoxStream<'static, io::Result<Bytes>>,
        length: Option<u64>,
    },
}

impl FilePayload {
    /// Payload from an in-memory buffer. Progress reports carry a total.
    pub fn from_bytes(file_name: &str, mime_type: &str, data: Vec<u8>) -> Self {
        Self {
            file_name: file_name.to_string(),
            mime_type: mime_type.to_string(),
            source: FileSource::Bytes(data),
        }
    }

    /// Payload from a byte stream. When `length` is unknown, progress
    /// reports carry `total = None` and no percentage.
    pub fn from_stream<S>(file_name: &str, mime_type: &str, stream: S, length: Option<u64>) -> Self
    where
        S: Stream<Item = io::Result<Bytes>> + Send + 'static,
    {
        Self {
            file_name: file_name.to_string(),
            mime_type: mime_type.to_string(),
            source: FileSource::Stream {
                stream: stream.boxed(),
                length,
            },
        }
    }

    /// Build the multipart part, wiring the progress callback into the body
    /// stream when one was supplied.
    fn into_part(self, progress: Option<ProgressCallback>) -> Result<Part, ApiError> {
        let part = match self.source {
            FileSource::Bytes(data) => {
                let total = data.len() as u64;
                match progress {
                    Some(callback) => {
                        let stream = chunked_with_progress(data, Some(total), callback);
                        Part::stream_with_length(Body::wrap_stream(stream), total)
                    }
                    None => Part::bytes(data),
                }
            }
            FileSource::Stream { stream, length } => {
                let body = match progress {
                    Some(callback) => {
                        Body::wrap_stream(counted_stream(stream, length, callback))
                    }
                    None => Body::wrap_stream(stream),
                };
                match length {
                    Some(length) => Part::stream_with_length(body, length),
                    None => Part::stream(body),
                }
            }
        };

        part.file_name(self.file_name)
            .mime_str(&self.mime_type)
            .map_err(|e| ApiError::Transport(format!("invalid upload part: {}", e)))
    }
}

/// Split a buffer into chunks, reporting cumulative progress per chunk.
fn chunked_with_progress(
    data: Vec<u8>,
    total: Option<u64>,
    callback: ProgressCallback,
) -> impl Stream<Item = io::Result<Bytes>> {
    let chunks: Vec<Bytes> = data
        .chunks(UPLOAD_CHUNK_SIZE)
        .map(Bytes::copy_from_slice)
        .collect();
    let mut loaded: u64 = 0;
    futures_util::stream::iter(chunks).map(move |chunk| {
        loaded += chunk.len() as u64;
        callback(UploadProgress::new(loaded, total));
        Ok(chunk)
    })
}

/// Wrap a payload stream so every successful chunk reports progress.
fn counted_stream(
    stream: futures_util::stream::BoxStream<'static, io::Result<Bytes>>,
    total: Option<u64>,
    callback: ProgressCallback,
) -> impl Stream<Item = io::Result<Bytes>> {
    let mut loaded: u64 = 0;
    stream.map(move |result| {
        if let Ok(ref chunk) = result {
            loaded += chunk.len() as u64;
            callback(UploadProgress::new(loaded, total));
        }
        result
    })
}

/// Message fields a failure body may carry.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Normalize a failure body: envelope message, then raw text, then the
/// status line.
fn server_message(body: &str, status: StatusCode) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(message) = parsed.message {
            if !message.trim().is_empty() {
                return message;
            }
        }
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    format!("request failed with status {}", status)
}

/// HTTP client wrapper for Meridian API communication.
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Arc<Session>,
}

impl ApiClient {
    /// Create a client from the resolved configuration.
    pub fn new(config: &ApiConfig, session: Arc<Session>) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            http,
            base_url: config.base_url.clone(),
            session,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach the resolved credential (if any) and send, routing 401s
    /// through session invalidation.
    async fn execute(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let builder = match self.session.bearer_for_request().await {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };

        let response = builder.send().await.map_err(|e| ApiError::transport(&e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = server_message(&body, status);

        if status == StatusCode::UNAUTHORIZED {
            log::info!("401 received, invalidating session");
            self.session.invalidate().await;
            return Err(ApiError::Unauthorized { message });
        }

        Err(ApiError::Server {
            status: Some(status.as_u16()),
            message,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<ApiResponse<T>, ApiError> {
        response
            .json::<ApiResponse<T>>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn send_json<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        query: &[(&str, String)],
    ) -> Result<ApiResponse<T>, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let mut builder = self.http.request(method, self.url(path));
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let response = self.execute(builder).await?;
        Self::decode(response).await
    }

    // ── Generic verbs ────────────────────────────────────────────────────

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<ApiResponse<T>, ApiError> {
        self.send_json::<T, ()>(Method::GET, path, None, &[]).await
    }

    pub async fn get_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<ApiResponse<T>, ApiError> {
        self.send_json::<T, ()>(Method::GET, path, None, query).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<ApiResponse<T>, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_json(Method::POST, path, Some(body), &[]).await
    }

    /// POST addressed entirely by query parameters, with an empty body.
    pub async fn post_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<ApiResponse<T>, ApiError> {
        self.send_json::<T, ()>(Method::POST, path, None, query).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<ApiResponse<T>, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_json(Method::PUT, path, Some(body), &[]).await
    }

    /// PUT with no body (state-transition endpoints like approve/reject).
    pub async fn put_empty<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<ApiResponse<T>, ApiError> {
        self.send_json::<T, ()>(Method::PUT, path, None, &[]).await
    }

    pub async fn patch<T, B>(&self, path: &str, body: &B) -> Result<ApiResponse<T>, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_json(Method::PATCH, path, Some(body), &[]).await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<ApiResponse<T>, ApiError> {
        self.send_json::<T, ()>(Method::DELETE, path, None, &[]).await
    }

    // ── Binary boundaries ────────────────────────────────────────────────

    /// Send a multipart upload: the `file` part plus discriminator fields.
    ///
    /// When `progress` is supplied it receives a report per transmitted
    /// chunk; the total is only present for payloads whose size is known.
    pub async fn upload<T: DeserializeOwned>(
        &self,
        path: &str,
        payload: FilePayload,
        fields: &[(&str, String)],
        progress: Option<ProgressCallback>,
    ) -> Result<ApiResponse<T>, ApiError> {
        let part = payload.into_part(progress)?;
        let mut form = Form::new().part("file", part);
        for (name, value) in fields {
            form = form.text(name.to_string(), value.clone());
        }

        let builder = self.http.post(self.url(path)).multipart(form);
        let response = self.execute(builder).await?;
        Self::decode(response).await
    }

    /// Fetch a binary response.
    ///
    /// As a convenience the payload is also written into the user's
    /// downloads directory under `file_name` when such a directory exists;
    /// a write failure is logged, never raised. The bytes are returned
    /// regardless so non-interactive callers can process them directly.
    pub async fn download(&self, path: &str, file_name: Option<&str>) -> Result<Vec<u8>, ApiError> {
        let response = self.execute(self.http.get(self.url(path))).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::transport(&e))?
            .to_vec();

        if let Some(dir) = dirs::download_dir() {
            // Keep only the final path component of the suggested name.
            let name = file_name
                .unwrap_or("download")
                .rsplit(['/', '\\'])
                .next()
                .unwrap_or("download");
            let target = dir.join(name);
            match tokio::fs::write(&target, &bytes).await {
                Ok(()) => log::info!("download saved to {}", target.display()),
                Err(e) => log::warn!("could not save download to {}: {}", target.display(), e),
            }
        }

        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_server_message_prefers_envelope_message() {
        let body = r#"{"success":false,"message":"invalid credentials","data":null}"#;
        assert_eq!(
            server_message(body, StatusCode::BAD_REQUEST),
            "invalid credentials"
        );
    }

    #[test]
    fn test_server_message_falls_back_to_raw_body() {
        assert_eq!(
            server_message("service unavailable", StatusCode::BAD_GATEWAY),
            "service unavailable"
        );
    }

    #[test]
    fn test_server_message_falls_back_to_status() {
        assert_eq!(
            server_message("", StatusCode::INTERNAL_SERVER_ERROR),
            "request failed with status 500 Internal Server Error"
        );
    }

    #[tokio::test]
    async fn test_buffered_upload_reports_cumulative_progress() {
        let reports: Arc<Mutex<Vec<UploadProgress>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&reports);
        let callback: ProgressCallback = Arc::new(move |report| {
            sink.lock().unwrap().push(report);
        });

        // Three full chunks plus a short tail.
        let data = vec![0u8; UPLOAD_CHUNK_SIZE * 3 + 100];
        let total = data.len() as u64;
        let stream = chunked_with_progress(data, Some(total), callback);
        let chunks: Vec<_> = stream.collect().await;

        assert_eq!(chunks.len(), 4);
        let reports = reports.lock().unwrap();
        assert_eq!(reports.len(), 4);
        assert_eq!(reports.last().unwrap().loaded, total);
        assert_eq!(reports.last().unwrap().progress, Some(100.0));
        assert!(reports.iter().all(|r| r.length_computable));
        // Monotonically increasing counters.
        assert!(reports.windows(2).all(|w| w[0].loaded < w[1].loaded));
    }

    #[tokio::test]
    async fn test_streamed_upload_without_length_reports_no_total() {
        let reports: Arc<Mutex<Vec<UploadProgress>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&reports);
        let callback: ProgressCallback = Arc::new(move |report| {
            sink.lock().unwrap().push(report);
        });

        let source = futures_util::stream::iter(vec![
            Ok(Bytes::from_static(b"abc")),
            Ok(Bytes::from_static(b"defgh")),
        ])
        .boxed();
        let stream = counted_stream(source, None, callback);
        let _collected: Vec<_> = stream.collect().await;

        let reports = reports.lock().unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports.last().unwrap().loaded, 8);
        assert_eq!(reports.last().unwrap().total, None);
        assert_eq!(reports.last().unwrap().progress, None);
        assert!(!reports.last().unwrap().length_computable);
    }
}

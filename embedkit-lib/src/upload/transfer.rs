//! Asynchronous file transfer.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client};
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::error::TransferError;

use super::FileMeta;

/// Progress callback handle, reporting `(bytes_sent, bytes_total)`.
///
/// Cheap to clone; transports call [`Progress::report`] as bytes go out.
/// Reports may repeat or arrive coarsely chunked, the consumer is expected
/// to clamp them monotonically.
#[derive(Clone)]
pub struct Progress {
    inner: Arc<dyn Fn(u64, u64) + Send + Sync>,
}

impl Progress {
    pub fn new(f: impl Fn(u64, u64) + Send + Sync + 'static) -> Self {
        Self { inner: Arc::new(f) }
    }

    /// A handle that discards every report.
    pub fn noop() -> Self {
        Self::new(|_, _| {})
    }

    pub fn report(&self, sent: u64, total: u64) {
        (self.inner)(sent, total);
    }
}

impl fmt::Debug for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Progress").finish_non_exhaustive()
    }
}

/// One file ready to go over the wire.
#[derive(Debug, Clone)]
pub struct TransferRequest {
    pub meta: FileMeta,
    pub data: Arc<Vec<u8>>,
}

/// Moves file bytes to the upload endpoint.
///
/// The controller treats this as a seam: [`HttpTransport`] is the
/// production implementation, tests substitute their own.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends one file. A 2xx acknowledgement is `Ok`; anything else maps
    /// onto a [`TransferError`]. Implementations must observe `cancel` and
    /// return [`TransferError::Cancelled`] instead of completing.
    async fn send(
        &self,
        request: TransferRequest,
        progress: Progress,
        cancel: CancellationToken,
    ) -> Result<(), TransferError>;
}

/// Multipart HTTP transport.
///
/// Posts the file as one part of a `multipart/form-data` submission to the
/// configured endpoint. The body streams in chunks so progress reports
/// track bytes handed to the connection.
///
/// # Example
///
/// ```ignore
/// let transport = HttpTransport::new("https://example.com/upload".parse()?)
///     .timeout(Duration::from_secs(30))
///     .field_name("attachment");
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: Url,
    field_name: String,
    chunk_size: usize,
    timeout: Option<Duration>,
}

impl HttpTransport {
    /// Creates a transport posting to `endpoint`.
    pub fn new(endpoint: Url) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            field_name: "file".to_string(),
            chunk_size: 64 * 1024,
            timeout: None,
        }
    }

    /// Sets a custom HTTP client.
    pub fn client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the multipart field name for the file part.
    pub fn field_name(mut self, name: impl Into<String>) -> Self {
        self.field_name = name.into();
        self
    }

    /// Sets the streamed-body chunk size.
    pub fn chunk_size(mut self, bytes: usize) -> Self {
        self.chunk_size = bytes.max(1);
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn body(&self, data: Arc<Vec<u8>>, progress: Progress) -> Body {
        let chunk_size = self.chunk_size;
        let stream = async_stream::stream! {
            let total = data.len() as u64;
            let mut sent: u64 = 0;
            let mut offset = 0;
            while offset < data.len() {
                let end = usize::min(offset + chunk_size, data.len());
                let chunk = data[offset..end].to_vec();
                sent += chunk.len() as u64;
                offset = end;
                progress.report(sent, total);
                yield Ok::<Vec<u8>, std::io::Error>(chunk);
            }
        };
        Body::wrap_stream(stream)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        request: TransferRequest,
        progress: Progress,
        cancel: CancellationToken,
    ) -> Result<(), TransferError> {
        let total = request.data.len() as u64;
        let body = self.body(request.data.clone(), progress.clone());

        let mut part = Part::stream_with_length(body, total).file_name(request.meta.name.clone());
        if !request.meta.mime.is_empty() {
            part = part
                .mime_str(&request.meta.mime)
                .map_err(|e| TransferError::InvalidBody(e.to_string()))?;
        }
        let form = Form::new().part(self.field_name.clone(), part);

        let mut http_request = self.client.post(self.endpoint.clone()).multipart(form);
        if let Some(timeout) = self.timeout {
            http_request = http_request.timeout(timeout);
        }

        let response = tokio::select! {
            _ = cancel.cancelled() => return Err(TransferError::Cancelled),
            result = http_request.send() => {
                result.map_err(|e| match (e.is_timeout(), self.timeout) {
                    (true, Some(timeout)) => TransferError::Timeout(timeout),
                    _ => TransferError::Network(e),
                })?
            }
        };

        if response.status().is_success() {
            // The whole body went out by the time the server answered;
            // zero-length files get their single 100% tick here.
            progress.report(total, total);
            Ok(())
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            Err(TransferError::Http { status, message })
        }
    }
}

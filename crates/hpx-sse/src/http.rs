//! HTTP transport backed by `reqwest`.

use std::{future, time::Duration};

use futures_util::{StreamExt, stream};
use http::HeaderMap;
use tracing::debug;

use crate::{
    error::EventSourceError,
    transport::{SignalStream, Transport, TransportSignal},
};

/// [`Transport`] that issues a `GET` request per connection attempt.
///
/// Non-success statuses and responses whose `Content-Type` is present but not
/// `text/event-stream` are reported as [`TransportSignal::Failed`], so the
/// engine treats them like any other transient failure.
///
/// ```rust,no_run
/// use std::time::Duration;
///
/// use hpx_sse::{EventSource, EventSourceConfig, http::HttpTransport};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let transport = HttpTransport::builder("https://api.example.com/v1/stream")
///     .connect_timeout(Duration::from_secs(10))
///     .build()?;
/// let source = EventSource::new(EventSourceConfig::default(), transport)?;
/// source.on_message(|event| println!("{:?}", event.data()));
/// source.connect();
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
    headers: HeaderMap,
}

impl HttpTransport {
    /// Create a transport for `url` with a default client.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            headers: HeaderMap::new(),
        }
    }

    /// Start configuring a transport for `url`.
    pub fn builder(url: impl Into<String>) -> HttpTransportBuilder {
        HttpTransportBuilder {
            url: url.into(),
            headers: HeaderMap::new(),
            connect_timeout: None,
            client: None,
        }
    }

    /// The endpoint this transport connects to.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Transport for HttpTransport {
    fn open(&self, headers: HeaderMap) -> SignalStream {
        let mut request_headers = self.headers.clone();
        // Engine headers win over static ones.
        for (name, value) in &headers {
            request_headers.insert(name.clone(), value.clone());
        }

        debug!(url = %self.url, "Opening SSE request");
        let request = self.client.get(&self.url).headers(request_headers);

        let attempt = async move {
            let response = match request.send().await {
                Ok(response) => response,
                Err(err) => return failed(err.into()),
            };

            let status = response.status();
            if !status.is_success() {
                return failed(EventSourceError::invalid_status(status));
            }

            if let Some(content_type) = response.headers().get(http::header::CONTENT_TYPE) {
                let content_type = content_type.to_str().unwrap_or("");
                if !content_type.contains("text/event-stream") {
                    return failed(EventSourceError::invalid_content_type(content_type));
                }
            }

            let headers = response.headers().clone();
            let body = response.bytes_stream().map(|chunk| match chunk {
                Ok(bytes) => TransportSignal::Data(bytes),
                Err(err) => TransportSignal::Failed(err.into()),
            });

            stream::once(future::ready(TransportSignal::Connected { status, headers }))
                .chain(body)
                .chain(stream::once(future::ready(TransportSignal::Completed)))
                .boxed()
        };

        stream::once(attempt).flatten().boxed()
    }
}

fn failed(err: EventSourceError) -> SignalStream {
    stream::once(future::ready(TransportSignal::Failed(err))).boxed()
}

/// Builder for [`HttpTransport`].
#[derive(Debug)]
pub struct HttpTransportBuilder {
    url: String,
    headers: HeaderMap,
    connect_timeout: Option<Duration>,
    client: Option<reqwest::Client>,
}

impl HttpTransportBuilder {
    /// Headers sent with every request, e.g. authorization.
    #[must_use]
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Connect timeout for the default client.
    ///
    /// Ignored when a custom client is supplied.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Use a preconfigured client (proxies, TLS roots, pooling).
    #[must_use]
    pub fn client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Build the transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is empty or the HTTP client cannot be
    /// built.
    pub fn build(self) -> Result<HttpTransport, EventSourceError> {
        if self.url.is_empty() {
            return Err(EventSourceError::config("URL cannot be empty"));
        }

        let client = match self.client {
            Some(client) => client,
            None => {
                let mut builder = reqwest::Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build().map_err(|e| {
                    EventSourceError::config(format!("Failed to build HTTP client: {e}"))
                })?
            }
        };

        Ok(HttpTransport {
            client,
            url: self.url,
            headers: self.headers,
        })
    }
}

// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use std::time::Duration;

use headers::{ContentLength, HeaderMapExt as _, UserAgent};
use opentelemetry_semantic_conventions::{
    attribute::{HTTP_REQUEST_BODY_SIZE, HTTP_RESPONSE_BODY_SIZE},
    trace::{
        HTTP_REQUEST_METHOD, HTTP_RESPONSE_STATUS_CODE, NETWORK_PEER_ADDRESS, NETWORK_PEER_PORT,
        NETWORK_TRANSPORT, NETWORK_TYPE, SERVER_ADDRESS, SERVER_PORT, URL_FULL,
        USER_AGENT_ORIGINAL,
    },
};
use rustls_platform_verifier::ConfigVerifierExt;
use thiserror::Error;
use tokio::time::Instant;
use tracing::Instrument;

/// The user agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = concat!("odbg/", env!("CARGO_PKG_VERSION"));

/// Parameters of the HTTP client talking to identity providers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpClientOptions {
    /// Total timeout of a request, from connecting to reading the body.
    pub timeout: Duration,

    /// Timeout of the connection phase only.
    pub connect_timeout: Duration,

    /// Value of the `User-Agent` header.
    pub user_agent: String,
}

impl Default for HttpClientOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(30),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

/// An error which happened while building the HTTP client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The platform certificate verifier could not be set up.
    #[error("failed to create TLS config")]
    Tls(#[from] rustls::Error),

    /// The client itself could not be built.
    #[error("failed to create HTTP client")]
    Build(#[from] reqwest::Error),
}

/// Create a new [`reqwest::Client`] with the given options
///
/// Certificates are checked with the verifier of the platform. If no
/// [`rustls::crypto::CryptoProvider`] was installed by the application, the
/// `aws-lc-rs` one is installed as the process default.
///
/// # Errors
///
/// Returns an error if the TLS configuration or the client fail to build
pub fn client(options: &HttpClientOptions) -> Result<reqwest::Client, ClientError> {
    if rustls::crypto::CryptoProvider::get_default().is_none() {
        // Losing a race with another thread installing one is fine
        let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();
    }

    // The explicit typing here is because `use_preconfigured_tls` accepts
    // `Any`, but wants a `ClientConfig` under the hood.
    let tls_config: rustls::ClientConfig = rustls::ClientConfig::with_platform_verifier()?;

    let client = reqwest::Client::builder()
        .use_preconfigured_tls(tls_config)
        .user_agent(options.user_agent.as_str())
        .timeout(options.timeout)
        .connect_timeout(options.connect_timeout)
        .build()?;

    Ok(client)
}

async fn send_traced(
    request: reqwest::RequestBuilder,
) -> Result<reqwest::Response, reqwest::Error> {
    let start = Instant::now();
    let (client, request) = request.build_split();
    let request = request?;

    let headers = request.headers();
    let server_address = request.url().host_str().map(ToOwned::to_owned);
    let server_port = request.url().port_or_known_default();
    let user_agent = headers
        .typed_get::<UserAgent>()
        .map(tracing::field::display);
    let content_length = headers.typed_get().map(|ContentLength(len)| len);
    let method = request.method().to_string();

    let span = tracing::info_span!(
        "http.client.request",
        "otel.kind" = "client",
        "otel.status_code" = tracing::field::Empty,
        { HTTP_REQUEST_METHOD } = method,
        { URL_FULL } = %request.url(),
        { HTTP_RESPONSE_STATUS_CODE } = tracing::field::Empty,
        { SERVER_ADDRESS } = server_address,
        { SERVER_PORT } = server_port,
        { HTTP_REQUEST_BODY_SIZE } = content_length,
        { HTTP_RESPONSE_BODY_SIZE } = tracing::field::Empty,
        { NETWORK_TRANSPORT } = "tcp",
        { NETWORK_TYPE } = tracing::field::Empty,
        { NETWORK_PEER_ADDRESS } = tracing::field::Empty,
        { NETWORK_PEER_PORT } = tracing::field::Empty,
        { USER_AGENT_ORIGINAL } = user_agent,
        "rust.error" = tracing::field::Empty,
    );

    async move {
        let span = tracing::Span::current();
        let result = client.execute(request).await;

        match &result {
            Ok(response) => {
                span.record("otel.status_code", "OK");
                span.record(HTTP_RESPONSE_STATUS_CODE, response.status().as_u16());

                if let Some(ContentLength(content_length)) = response.headers().typed_get() {
                    span.record(HTTP_RESPONSE_BODY_SIZE, content_length);
                }

                if let Some(peer) = response.remote_addr() {
                    let family = if peer.is_ipv4() { "ipv4" } else { "ipv6" };
                    span.record(NETWORK_TYPE, family);
                    span.record(NETWORK_PEER_ADDRESS, peer.ip().to_string());
                    span.record(NETWORK_PEER_PORT, peer.port());
                }
            }
            Err(err) => {
                span.record("otel.status_code", "ERROR");
                span.record("rust.error", err as &dyn std::error::Error);
            }
        }

        let duration_ms: u64 = start.elapsed().as_millis().try_into().unwrap_or(u64::MAX);
        tracing::debug!(duration_ms, "HTTP request finished");

        result
    }
    .instrument(span)
    .await
}

/// An extension trait implemented for [`reqwest::RequestBuilder`] to send a
/// request with a tracing span.
pub trait RequestBuilderExt {
    /// Send the request within a `http.client.request` span, recording the
    /// outcome on it.
    fn send_traced(self) -> impl Future<Output = Result<reqwest::Response, reqwest::Error>> + Send;
}

impl RequestBuilderExt for reqwest::RequestBuilder {
    fn send_traced(self) -> impl Future<Output = Result<reqwest::Response, reqwest::Error>> + Send {
        send_traced(self)
    }
}

//! HTTP prober implementation.
//!
//! Issues a single `GET /` per target. Port 443 is probed over TLS, every
//! other port over plain HTTP; this is a heuristic keyed on the port
//! number, not a protocol sniff, so TLS services on non-standard ports will
//! show up as connection errors.

use crate::probe::traits::{ProbeOutcome, ProbeStatus, Prober};
use crate::types::Target;
use async_trait::async_trait;
use reqwest::redirect;
use reqwest::Client;
use std::time::Duration;
use tracing::trace;

/// Scheme used to probe a port. TLS for 443, plain HTTP otherwise.
pub fn scheme_for_port(port: u16) -> &'static str {
    if port == 443 {
        "https"
    } else {
        "http"
    }
}

/// HTTP reachability prober.
///
/// The client is built once per run; the per-request timeout covers the
/// whole exchange and aborts the in-flight connection when it fires, so a
/// timed-out probe does not leak its socket.
pub struct HttpProber {
    client: Client,
}

impl HttpProber {
    /// Create a prober with the given per-request timeout.
    ///
    /// Redirects are not followed: the reported status code is whatever the
    /// first response carried, a 301 included.
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(redirect::Policy::none())
            .build()?;

        Ok(Self { client })
    }

    fn url_for(target: &Target) -> String {
        format!(
            "{}://{}:{}/",
            scheme_for_port(target.port),
            target.host,
            target.port
        )
    }
}

#[async_trait]
impl Prober for HttpProber {
    async fn probe(&self, target: &Target) -> ProbeOutcome {
        let url = Self::url_for(target);
        trace!(%url, "sending probe request");

        let status = match self.client.get(&url).send().await {
            Ok(response) => ProbeStatus::Open(response.status().as_u16()),
            Err(e) if e.is_timeout() => ProbeStatus::TimedOut,
            Err(e) => ProbeStatus::ConnectionError(root_cause(&e)),
        };

        ProbeOutcome::new(target.clone(), status)
    }
}

/// Innermost source message of a reqwest error. The outer layers only say
/// "error sending request"; the transport-level text is the useful part.
fn root_cause(err: &reqwest::Error) -> String {
    let mut cause: &dyn std::error::Error = err;
    while let Some(source) = cause.source() {
        cause = source;
    }
    cause.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    #[test]
    fn test_scheme_selection_is_pure_on_port() {
        assert_eq!(scheme_for_port(443), "https");
        assert_eq!(scheme_for_port(80), "http");
        assert_eq!(scheme_for_port(8443), "http");
        assert_eq!(scheme_for_port(0), "http");
    }

    #[test]
    fn test_url_building() {
        assert_eq!(
            HttpProber::url_for(&Target::new("10.0.0.1", 8080)),
            "http://10.0.0.1:8080/"
        );
        assert_eq!(
            HttpProber::url_for(&Target::new("example.com", 443)),
            "https://example.com:443/"
        );
    }

    /// Serve one canned HTTP response on an ephemeral local port.
    async fn one_shot_server(response: &'static str) -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        tokio::spawn(async move {
            if let Ok((mut stream, _)) = listener.accept().await {
                let mut buf = [0u8; 1024];
                let _ = stream.read(&mut buf).await;
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });

        port
    }

    #[tokio::test]
    async fn test_probe_open_reports_status_code() {
        let port =
            one_shot_server("HTTP/1.1 200 OK\r\ncontent-length: 0\r\n\r\n").await;
        let prober = HttpProber::new(Duration::from_secs(5)).unwrap();

        let outcome = prober.probe(&Target::new("127.0.0.1", port)).await;
        assert_eq!(outcome.status, ProbeStatus::Open(200));
    }

    #[tokio::test]
    async fn test_probe_non_2xx_is_still_open() {
        let port = one_shot_server(
            "HTTP/1.1 503 Service Unavailable\r\ncontent-length: 0\r\n\r\n",
        )
        .await;
        let prober = HttpProber::new(Duration::from_secs(5)).unwrap();

        let outcome = prober.probe(&Target::new("127.0.0.1", port)).await;
        assert_eq!(outcome.status, ProbeStatus::Open(503));
        assert!(outcome.is_open());
    }

    #[tokio::test]
    async fn test_probe_refused_port_is_connection_error() {
        // Bind then drop to get a port nothing listens on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let prober = HttpProber::new(Duration::from_secs(5)).unwrap();
        let outcome = prober.probe(&Target::new("127.0.0.1", port)).await;

        assert!(matches!(
            outcome.status,
            ProbeStatus::ConnectionError(_)
        ));
    }

    #[tokio::test]
    async fn test_probe_silent_server_times_out() {
        // Accepts the connection but never answers
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            if let Ok((stream, _)) = listener.accept().await {
                tokio::time::sleep(Duration::from_secs(30)).await;
                drop(stream);
            }
        });

        let prober = HttpProber::new(Duration::from_millis(250)).unwrap();
        let outcome = prober.probe(&Target::new("127.0.0.1", port)).await;

        assert_eq!(outcome.status, ProbeStatus::TimedOut);
    }
}

use std::fmt;
use std::time::Duration;

use ureq::Agent;

use crate::error::Error;

/// Location of the latest APNIC delegated statistics report.
pub const APNIC_DELEGATED_LATEST: &str =
    "https://ftp.apnic.net/apnic/stats/apnic/delegated-apnic-latest";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

// The full report is several megabytes; ureq's default body limit is 10 MiB.
const BODY_LIMIT: u64 = 64 * 1024 * 1024;

/// A blocking HTTP client for the delegation report.
///
/// # Examples
///
/// ``` no_run
/// use genip::{generate, AddressType, Fetcher, Filter};
///
/// let report = Fetcher::default().fetch()?;
/// let filter = Filter::new(["CN"], [AddressType::Ipv4]);
/// _ = generate(&report, "chnip4", &filter, &mut std::io::stdout())?;
/// # Ok::<_, genip::Error>(())
/// ```
#[derive(Clone)]
pub struct Fetcher {
    agent: Agent,
    timeout: Duration,
}

impl Fetcher {
    /// Construct a new [`Fetcher`] whose requests are abandoned after `timeout`.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(timeout))
            .build();
        Self {
            agent: Agent::new_with_config(config),
            timeout,
        }
    }

    /// Request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Download [`APNIC_DELEGATED_LATEST`].
    ///
    /// # Errors
    ///
    /// An [`Error::Fetch`] is returned on any transport failure, on a non-success HTTP status,
    /// or if the body is not valid UTF-8.
    pub fn fetch(&self) -> Result<String, Error> {
        self.fetch_from(APNIC_DELEGATED_LATEST)
    }

    /// Download a delegation report from `url`.
    ///
    /// # Errors
    ///
    /// See [`Fetcher::fetch`].
    #[tracing::instrument(skip(self), fields(timeout = ?self.timeout), level = "info")]
    pub fn fetch_from(&self, url: &str) -> Result<String, Error> {
        tracing::info!("fetching delegation report");
        let report = self
            .agent
            .get(url)
            .call()?
            .body_mut()
            .with_config()
            .limit(BODY_LIMIT)
            .read_to_string()?;
        tracing::debug!(bytes = report.len(), "delegation report received");
        Ok(report)
    }
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl fmt::Debug for Fetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fetcher")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    use super::*;

    /// Serve a single canned HTTP response on a local port, returning its URL.
    fn serve_once(status: &'static str, body: &'static [u8]) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        _ = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0; 1024];
            while !request.ends_with(b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            write!(
                stream,
                "HTTP/1.1 {status}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            )
            .unwrap();
            stream.write_all(body).unwrap();
            stream.flush().unwrap();
        });
        format!("http://{addr}/delegated-apnic-latest")
    }

    #[test]
    fn default_timeout() {
        assert_eq!(Fetcher::default().timeout(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn custom_timeout() {
        let fetcher = Fetcher::new(Duration::from_secs(5));
        assert_eq!(fetcher.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn unreachable_host_is_fetch_error() {
        let fetcher = Fetcher::new(Duration::from_secs(5));
        let err = fetcher.fetch_from("http://127.0.0.1:1/").unwrap_err();
        assert!(matches!(err, Error::Fetch(_)), "{err:?}");
    }

    #[test]
    fn report_body_returned_verbatim() {
        let body = b"2|apnic|20240101|1|19830613|20231229|+1000\napnic|CN|ipv4|1.0.1.0|256|20110414|allocated\n";
        let url = serve_once("200 OK", body);
        let report = Fetcher::new(Duration::from_secs(5)).fetch_from(&url).unwrap();
        assert_eq!(report.as_bytes(), body);
    }

    #[test]
    fn not_found_is_fetch_error() {
        let url = serve_once("404 Not Found", b"not found");
        let err = Fetcher::new(Duration::from_secs(5))
            .fetch_from(&url)
            .unwrap_err();
        assert!(
            matches!(err, Error::Fetch(ureq::Error::StatusCode(404))),
            "{err:?}"
        );
    }

    #[test]
    fn non_utf8_body_is_fetch_error() {
        let url = serve_once("200 OK", b"\xff\xfe");
        let err = Fetcher::new(Duration::from_secs(5))
            .fetch_from(&url)
            .unwrap_err();
        assert!(matches!(err, Error::Fetch(_)), "{err:?}");
    }

    #[test]
    fn fetch_error_message_omits_source() {
        let err = Fetcher::new(Duration::from_secs(5))
            .fetch_from("http://127.0.0.1:1/")
            .unwrap_err();
        assert_eq!(err.to_string(), "failed to fetch delegation report");
        assert!(std::error::Error::source(&err).is_some());
    }
}

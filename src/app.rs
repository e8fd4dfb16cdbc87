use crate::api::{Fetch, MapsProvider};
use crate::config::Config;
use crate::error::ResolveError;
use crate::location::Resolver;
use crate::models::Coordinate;
use crate::trace::TraceLog;
use serde_json::json;
use std::future::Future;
use std::io;
use tracing::{error, info, warn};

pub const FAILURE_MESSAGE: &str = "unable to resolve geo :(";

/// How a single link resolution ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Resolved(Coordinate),
    /// Every strategy came up empty.
    Unresolved,
    /// An error aborted the run; payload is its message.
    Failed(String),
    Cancelled,
}

/// What the host hands to the viewer and to the diagnostics surface.
#[derive(Debug, Clone)]
pub struct Report {
    pub url: String,
    pub outcome: Outcome,
    pub trace: String,
}

impl Report {
    pub fn coordinate(&self) -> Option<&Coordinate> {
        match &self.outcome {
            Outcome::Resolved(geo) => Some(geo),
            _ => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        let trace: Vec<&str> = if self.trace.is_empty() {
            Vec::new()
        } else {
            self.trace.lines().collect()
        };
        let error = match &self.outcome {
            Outcome::Resolved(_) => None,
            Outcome::Unresolved => Some(FAILURE_MESSAGE.to_string()),
            Outcome::Failed(msg) => Some(msg.clone()),
            Outcome::Cancelled => Some(ResolveError::Cancelled.to_string()),
        };
        json!({
            "url": self.url,
            "resolved": self.coordinate().is_some(),
            "coordinate": self.coordinate(),
            "error": error,
            "trace": trace,
        })
    }
}

/// Turns a shutdown signal into a cancellation future.
///
/// If the signal cannot be listened for, the returned future never completes,
/// so resolutions run to the end instead of being cancelled up front.
pub async fn cancel_on<S>(signal: S)
where
    S: Future<Output = io::Result<()>>,
{
    if let Err(e) = signal.await {
        warn!("Could not listen for shutdown signal: {}. Cancellation disabled.", e);
        std::future::pending::<()>().await;
    }
}

/// Runs one resolution per incoming link and packages the result.
pub struct App<F> {
    resolver: Resolver<F>,
}

impl App<MapsProvider> {
    pub fn from_config(config: &Config) -> Result<Self, ResolveError> {
        let provider = MapsProvider::new(config.http.timeout())?;
        Ok(Self::new(
            Resolver::new(provider).with_max_redirects(config.resolver.max_redirects),
        ))
    }
}

impl<F: Fetch> App<F> {
    pub fn new(resolver: Resolver<F>) -> Self {
        Self { resolver }
    }

    /// Resolves `url` on a fresh trace, stopping early if `shutdown` fires.
    ///
    /// The trace is always returned. Failures get an `err:` line and the
    /// input URL is echoed as the last line, except after cancellation, when
    /// the trace is left exactly as it stood.
    pub async fn run<S>(&self, url: &str, shutdown: S) -> Report
    where
        S: Future<Output = ()>,
    {
        let trace = TraceLog::new();
        let result = self.resolver.resolve_until(url, &trace, shutdown).await;

        let outcome = match result {
            Ok(Some(geo)) => {
                info!(%geo, "resolved");
                Outcome::Resolved(geo)
            }
            Ok(None) => {
                trace.append(format!("err: {FAILURE_MESSAGE}"));
                Outcome::Unresolved
            }
            Err(ResolveError::Cancelled) => Outcome::Cancelled,
            Err(e) => {
                error!("Resolution of {} failed: {}", url, e);
                trace.append(format!("err: {e}"));
                trace.append(format!("err: {FAILURE_MESSAGE}"));
                Outcome::Failed(e.to_string())
            }
        };

        if outcome != Outcome::Cancelled && !url.trim().is_empty() {
            trace.append(format!("-> {url}"));
        }

        Report {
            url: url.to_string(),
            outcome,
            trace: trace.render(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FetchResult;
    use std::time::Duration;

    const LONG: &str = "https://www.google.com/maps/place/Spot/data=!3d12.345!4d-67.890";

    struct Fixed(u16);

    impl Fetch for Fixed {
        async fn fetch(&self, url: &str) -> Result<FetchResult, ResolveError> {
            Ok(FetchResult {
                url: url.to_string(),
                status: self.0,
                redirect: None,
                body: Some(String::new()),
            })
        }
    }

    struct Broken;

    impl Fetch for Broken {
        async fn fetch(&self, url: &str) -> Result<FetchResult, ResolveError> {
            Err(ResolveError::InvalidUrl(url.to_string()))
        }
    }

    struct Hang;

    impl Fetch for Hang {
        async fn fetch(&self, _url: &str) -> Result<FetchResult, ResolveError> {
            std::future::pending().await
        }
    }

    fn app<F: Fetch>(fetcher: F) -> App<F> {
        App::new(Resolver::new(fetcher))
    }

    #[tokio::test]
    async fn resolved_report_echoes_url_last() {
        let report = app(Fixed(500)).run(LONG, std::future::pending()).await;
        assert_eq!(
            report.coordinate().map(Coordinate::to_geo_uri).as_deref(),
            Some("geo:12.345,-67.890?q=12.345,-67.890")
        );
        assert_eq!(
            report.trace,
            format!("-> {LONG}\n-> geo:12.345,-67.890?q=12.345,-67.890\n-> {LONG}")
        );
    }

    #[tokio::test]
    async fn unresolved_report_carries_failure_line() {
        let url = "https://maps.app.goo.gl/x";
        let report = app(Fixed(404)).run(url, std::future::pending()).await;
        assert_eq!(report.outcome, Outcome::Unresolved);
        assert_eq!(
            report.trace,
            format!("-> {url}\nerror: 404 @ {url}\nerr: unable to resolve geo :(\n-> {url}")
        );
    }

    #[tokio::test]
    async fn errors_become_failed_with_trace() {
        let url = "https://maps.app.goo.gl/y";
        let report = app(Broken).run(url, std::future::pending()).await;
        assert!(matches!(report.outcome, Outcome::Failed(ref m) if m.starts_with("invalid url")));
        let lines: Vec<&str> = report.trace.lines().collect();
        assert_eq!(lines.first(), Some(&format!("-> {url}").as_str()));
        assert!(lines[1].starts_with("err: invalid url"));
        assert_eq!(lines[2], "err: unable to resolve geo :(");
        assert_eq!(lines.len(), 4);
    }

    #[tokio::test]
    async fn blank_url_only_gets_the_failure_line() {
        let report = app(Fixed(200)).run("", std::future::pending()).await;
        assert_eq!(report.outcome, Outcome::Unresolved);
        assert_eq!(report.trace, "err: unable to resolve geo :(");
    }

    #[tokio::test]
    async fn cancelled_run_adds_nothing() {
        let url = "https://maps.app.goo.gl/z";
        let report = app(Hang)
            .run(url, tokio::time::sleep(Duration::from_millis(20)))
            .await;
        assert_eq!(report.outcome, Outcome::Cancelled);
        assert_eq!(report.trace, format!("-> {url}"));
    }

    #[tokio::test]
    async fn broken_signal_never_cancels() {
        let url = "https://maps.app.goo.gl/w";
        let signal = async { Err(io::Error::other("no signal handler")) };
        let report = app(Fixed(404)).run(url, cancel_on(signal)).await;
        assert_eq!(report.outcome, Outcome::Unresolved);
        assert!(report.trace.contains(&format!("error: 404 @ {url}")));
    }

    #[tokio::test]
    async fn delivered_signal_cancels() {
        let url = "https://maps.app.goo.gl/v";
        let report = app(Hang).run(url, cancel_on(async { Ok(()) })).await;
        assert_eq!(report.outcome, Outcome::Cancelled);
        assert_eq!(report.trace, "");
    }

    #[tokio::test]
    async fn json_report_shape() {
        let report = app(Fixed(200)).run(LONG, std::future::pending()).await;
        let v = report.to_json();
        assert_eq!(v["resolved"], true);
        assert_eq!(v["coordinate"]["geo"], "geo:12.345,-67.890?q=12.345,-67.890");
        assert!(v["error"].is_null());
        assert_eq!(v["trace"].as_array().unwrap().len(), 3);

        let failed = app(Fixed(404)).run("https://x.test/", std::future::pending()).await;
        let v = failed.to_json();
        assert_eq!(v["resolved"], false);
        assert!(v["coordinate"].is_null());
        assert_eq!(v["error"], FAILURE_MESSAGE);
    }
}

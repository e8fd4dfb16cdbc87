use crate::error::ResolveError;
use crate::models::FetchResult;
use reqwest::header::{HeaderMap, HeaderValue, COOKIE, LOCATION, USER_AGENT};
use reqwest::{redirect, Client, Url};
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Consent cookie that skips the regional consent interstitial.
pub const CONSENT_COOKIE: &str = "SOCS=CAESEwgDEgk1NjE2NDA4NTIaAmVuIAEaBgiA9smnBg";

/// Desktop browser UA; the service serves a different page to unknown clients.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/100.0.4896.60 Safari/537.36";

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// One HTTP GET that never follows redirects.
pub trait Fetch {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<FetchResult, ResolveError>> + Send;
}

pub struct MapsProvider {
    client: Client,
}

impl MapsProvider {
    pub fn new(timeout: Duration) -> Result<Self, ResolveError> {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static(CONSENT_COOKIE));
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));

        let client = Client::builder()
            .redirect(redirect::Policy::none())
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| ResolveError::Client(e.to_string()))?;

        Ok(Self { client })
    }
}

impl Fetch for MapsProvider {
    async fn fetch(&self, url: &str) -> Result<FetchResult, ResolveError> {
        let target = Url::parse(url).map_err(|e| ResolveError::InvalidUrl(format!("{url}: {e}")))?;

        let res = self.client.get(target.clone()).send().await?;
        let status = res.status().as_u16();
        let redirect = res
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(|loc| absolute_location(&target, loc));

        // Read the body regardless of status so errors can be diagnosed.
        let body = res.text().await?;
        debug!(status, url, bytes = body.len(), "fetched");

        Ok(FetchResult {
            url: url.to_string(),
            status,
            redirect,
            body: Some(body),
        })
    }
}

// Absolute targets are passed through untouched; relative ones are joined
// onto the URL that produced them.
fn absolute_location(base: &Url, loc: &str) -> String {
    if loc.trim().is_empty() || Url::parse(loc).is_ok() {
        return loc.to_string();
    }
    match base.join(loc) {
        Ok(joined) => joined.to_string(),
        Err(_) => loc.to_string(),
    }
}

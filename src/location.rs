//! Link resolution for map share links.
//!
//! [`Resolver::resolve`] turns a short link or share link into a
//! [`Coordinate`]. It first tries to read the pin straight out of the URL and
//! only touches the network when that fails, following `302` hops one at a
//! time so that every hop lands in the [`TraceLog`].

use crate::api::Fetch;
use crate::error::ResolveError;
use crate::extract::{extract_from_content, extract_from_url};
use crate::models::Coordinate;
use crate::trace::TraceLog;
use std::future::Future;
use tracing::{debug, info, warn};

pub const DEFAULT_MAX_REDIRECTS: usize = 10;

pub struct Resolver<F> {
    fetcher: F,
    max_redirects: usize,
}

impl<F: Fetch> Resolver<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }

    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    /// Resolves `url` to a coordinate.
    ///
    /// Each hop is handled the same way:
    ///
    /// 1. A blank URL ends the chain with `Ok(None)` and no trace line.
    /// 2. The URL itself is checked for an embedded pin; a hit never fetches.
    /// 3. Otherwise it is fetched once. A `302` moves on to the `Location`
    ///    target, any `2xx` body is scanned for a preview-place marker, and
    ///    every other status is traced as `error: <status> @ <url>`.
    ///
    /// # Errors
    ///
    /// Transport failures from the fetcher are returned as-is and end the
    /// whole resolution. Following more than `max_redirects` hops returns
    /// [`ResolveError::TooManyRedirects`].
    pub async fn resolve(
        &self,
        url: &str,
        trace: &TraceLog,
    ) -> Result<Option<Coordinate>, ResolveError> {
        let mut current = url.to_string();
        let mut hops = 0;

        loop {
            if current.trim().is_empty() {
                debug!(hops, "no url left to resolve");
                return Ok(None);
            }

            trace.append(format!("-> {current}"));

            if let Some(geo) = extract_from_url(&current) {
                info!(hops, %geo, "coordinate found in url");
                trace.append(format!("-> {geo}"));
                return Ok(Some(geo));
            }

            let res = self.fetcher.fetch(&current).await?;
            match res.status {
                302 => {
                    if hops >= self.max_redirects {
                        warn!(limit = self.max_redirects, url = %res.url, "redirect limit reached");
                        trace.append(format!(
                            "error: more than {} redirects @ {}",
                            self.max_redirects, res.url
                        ));
                        return Err(ResolveError::TooManyRedirects {
                            limit: self.max_redirects,
                        });
                    }
                    hops += 1;
                    debug!(hops, next = ?res.redirect, "following redirect");
                    current = res.redirect.unwrap_or_default();
                }
                _ if res.is_success() => {
                    let geo = res.body.as_deref().and_then(extract_from_content);
                    match &geo {
                        Some(geo) => {
                            info!(hops, %geo, "coordinate found in page");
                            trace.append(format!("-> {geo}"));
                        }
                        None => debug!(url = %res.url, "page has no preview place"),
                    }
                    return Ok(geo);
                }
                status => {
                    warn!(status, url = %res.url, "unexpected upstream status");
                    trace.append(format!("error: {} @ {}", status, res.url));
                    return Ok(None);
                }
            }
        }
    }

    /// Like [`resolve`](Self::resolve), but gives up as soon as `shutdown`
    /// completes.
    ///
    /// An in-flight fetch is dropped rather than awaited, and nothing more is
    /// appended to `trace` once cancellation wins.
    pub async fn resolve_until<S>(
        &self,
        url: &str,
        trace: &TraceLog,
        shutdown: S,
    ) -> Result<Option<Coordinate>, ResolveError>
    where
        S: Future<Output = ()>,
    {
        tokio::select! {
            biased;
            _ = shutdown => {
                info!("resolution cancelled");
                Err(ResolveError::Cancelled)
            }
            res = self.resolve(url, trace) => res,
        }
    }
}

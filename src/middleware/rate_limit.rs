use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

/// Budget used for one upload route during the current window.
#[derive(Debug, Clone, Copy)]
struct Bucket {
    opened_at: Instant,
    used: u32,
}

impl Bucket {
    fn fresh(now: Instant) -> Self {
        Self {
            opened_at: now,
            used: 0,
        }
    }

    /// `Ok` when the request fits the budget, otherwise the time left
    /// until the window reopens.
    fn take(&mut self, now: Instant, limit: u32, span: Duration) -> Result<(), Duration> {
        let elapsed = now.saturating_duration_since(self.opened_at);
        if elapsed >= span {
            *self = Bucket::fresh(now);
        }
        if self.used >= limit {
            return Err(span.saturating_sub(elapsed.min(span)));
        }
        self.used += 1;
        Ok(())
    }
}

/// Caps anonymous uploads per route. Every path wrapped by the layer gets its
/// own budget of `limit` requests per window, so a burst of dropped resumes
/// does not starve job applications.
#[derive(Clone, Debug)]
pub struct UploadThrottle {
    limit: u32,
    span: Duration,
    buckets: Arc<Mutex<HashMap<String, Bucket>>>,
}

impl UploadThrottle {
    pub fn per_second(limit: u32) -> Self {
        Self::with_window(limit, Duration::from_secs(1))
    }

    pub fn with_window(limit: u32, span: Duration) -> Self {
        Self {
            limit: limit.max(1),
            span,
            buckets: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn admit(&self, route: &str, now: Instant) -> Result<(), Duration> {
        let mut buckets = self
            .buckets
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        buckets
            .entry(route.to_string())
            .or_insert_with(|| Bucket::fresh(now))
            .take(now, self.limit, self.span)
    }
}

pub async fn throttle_uploads(
    State(throttle): State<UploadThrottle>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let route = req.uri().path().to_string();
    if let Err(wait) = throttle.admit(&route, Instant::now()) {
        let retry_after = wait.as_secs().max(1);
        tracing::warn!(route = %route, retry_after, "Upload rate limit exceeded");
        return (
            StatusCode::TOO_MANY_REQUESTS,
            [(header::RETRY_AFTER, retry_after.to_string())],
            Json(json!({ "error": "Too many requests, please try again later" })),
        )
            .into_response();
    }
    next.run(req).await
}

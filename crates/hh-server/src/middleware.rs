//! Request ids, the superadmin bearer check and the superadmin rate limit.
//!
//! Rejections use the same `{ error, meta }` envelope as the handlers, so the
//! request-id layer must run outside the other two.

use std::{
    sync::{Arc, Mutex, PoisonError},
    time::{Duration, Instant},
};

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use subtle::ConstantTimeEq;
use uuid::Uuid;

use crate::api::ApiError;

pub const SUPERADMIN_KEYS_VAR: &str = "HH_SUPERADMIN_KEYS";
const REQUEST_ID_HEADER: &str = "x-request-id";

/// The id echoed in `x-request-id` and in every response's `meta`.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

impl RequestId {
    fn of(req: &Request) -> String {
        req.extensions()
            .get::<RequestId>()
            .map_or_else(String::new, |id| id.0.clone())
    }
}

/// Bearer tokens accepted on the superadmin routes. No tokens means the
/// routes are open, which is only allowed in development.
#[derive(Debug, Clone)]
pub struct AuthState {
    tokens: Arc<[String]>,
}

impl AuthState {
    /// Reads comma-separated tokens from `HH_SUPERADMIN_KEYS`.
    ///
    /// # Errors
    ///
    /// Returns an error outside development when no tokens are configured.
    pub fn from_env(is_development: bool) -> anyhow::Result<Self> {
        let raw = std::env::var(SUPERADMIN_KEYS_VAR).ok();
        Self::from_raw(raw.as_deref(), is_development)
    }

    /// # Errors
    ///
    /// Returns an error outside development when `raw` holds no tokens.
    pub fn from_raw(raw: Option<&str>, is_development: bool) -> anyhow::Result<Self> {
        let mut tokens: Vec<String> = raw
            .into_iter()
            .flat_map(|r| r.split(','))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
        tokens.sort_unstable();
        tokens.dedup();

        match (tokens.is_empty(), is_development) {
            (false, _) => Ok(Self {
                tokens: tokens.into(),
            }),
            (true, true) => {
                tracing::warn!("{SUPERADMIN_KEYS_VAR} is empty; superadmin routes are open");
                Ok(Self::open())
            }
            (true, false) => anyhow::bail!(
                "{SUPERADMIN_KEYS_VAR} must list at least one bearer token outside development"
            ),
        }
    }

    /// No tokens: every caller is treated as the superadmin.
    #[must_use]
    pub fn open() -> Self {
        Self {
            tokens: Arc::from(Vec::new()),
        }
    }

    #[must_use]
    pub fn is_enforced(&self) -> bool {
        !self.tokens.is_empty()
    }

    /// Checks `presented` against every token without stopping at the first
    /// match.
    fn accepts(&self, presented: &str) -> bool {
        let matched = self.tokens.iter().fold(subtle::Choice::from(0), |acc, token| {
            acc | token.as_bytes().ct_eq(presented.as_bytes())
        });
        bool::from(matched)
    }
}

/// One shared request budget per window for the superadmin routes.
#[derive(Debug, Clone)]
pub struct RateLimitState {
    budget: u32,
    window: Duration,
    current: Arc<Mutex<(Instant, u32)>>,
}

impl RateLimitState {
    #[must_use]
    pub fn new(budget: u32, window: Duration) -> Self {
        Self {
            budget,
            window,
            current: Arc::new(Mutex::new((Instant::now(), 0))),
        }
    }

    /// Spend one request from the budget, or report how long until the
    /// window resets.
    fn try_acquire(&self, now: Instant) -> Result<(), Duration> {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        let (started, used) = &mut *current;
        let elapsed = now.saturating_duration_since(*started);
        if elapsed >= self.window {
            *started = now;
            *used = 0;
        }
        if *used >= self.budget {
            return Err(self.window.saturating_sub(elapsed.min(self.window)));
        }
        *used += 1;
        Ok(())
    }
}

/// Reuses the caller's `x-request-id` or generates a UUID, and echoes it on
/// the response.
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.trim().is_empty())
        .map_or_else(|| Uuid::new_v4().to_string(), str::to_string);
    req.extensions_mut().insert(RequestId(id.clone()));

    let mut response = next.run(req).await;
    if let Ok(value) = HeaderValue::from_str(&id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

pub async fn require_bearer_auth(
    State(auth): State<AuthState>,
    req: Request,
    next: Next,
) -> Response {
    if !auth.is_enforced() {
        return next.run(req).await;
    }

    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(bearer_token);
    if token.is_some_and(|t| auth.accepts(t)) {
        return next.run(req).await;
    }

    tracing::debug!(path = %req.uri().path(), "superadmin request without a valid token");
    ApiError::new(
        RequestId::of(&req),
        "unauthorized",
        "missing or invalid bearer token",
    )
    .into_response()
}

pub async fn enforce_rate_limit(
    State(limit): State<RateLimitState>,
    req: Request,
    next: Next,
) -> Response {
    match limit.try_acquire(Instant::now()) {
        Ok(()) => next.run(req).await,
        Err(retry_after) => {
            let mut response =
                ApiError::new(RequestId::of(&req), "rate_limited", "rate limit exceeded")
                    .into_response();
            let secs = retry_after.as_secs().max(1);
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(secs));
            response
        }
    }
}

/// The token from an `Authorization: Bearer <token>` value. The scheme is
/// matched case-insensitively.
fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_token_parsing() {
        assert_eq!(bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(bearer_token("bearer  abc "), Some("abc"));
        assert_eq!(bearer_token("Basic abc"), None);
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("Bearer"), None);
    }

    #[test]
    fn development_without_tokens_is_open() {
        let auth = AuthState::from_raw(None, true).unwrap();
        assert!(!auth.is_enforced());
    }

    #[test]
    fn production_without_tokens_fails() {
        assert!(AuthState::from_raw(None, false).is_err());
        assert!(AuthState::from_raw(Some(" , "), false).is_err());
    }

    #[test]
    fn any_configured_token_is_accepted() {
        let auth = AuthState::from_raw(Some("alpha, beta,alpha"), false).unwrap();
        assert!(auth.is_enforced());
        assert!(auth.accepts("alpha"));
        assert!(auth.accepts("beta"));
        assert!(!auth.accepts("alph"));
        assert!(!auth.accepts(""));
    }

    #[test]
    fn budget_is_spent_then_refused_until_window_ends() {
        let limit = RateLimitState::new(2, Duration::from_secs(60));
        let start = Instant::now();
        assert!(limit.try_acquire(start).is_ok());
        assert!(limit.try_acquire(start).is_ok());

        let wait = limit
            .try_acquire(start + Duration::from_secs(20))
            .unwrap_err();
        assert!(wait <= Duration::from_secs(40));

        assert!(limit.try_acquire(start + Duration::from_secs(61)).is_ok());
    }
}

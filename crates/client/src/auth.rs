//! Login with retries.
//!
//! The remote service sleeps when idle and the first request after a nap can
//! take most of a minute. Transport failures and timeouts are retried until
//! the wait budget runs out; a real answer from the server, positive or not,
//! ends the loop.

use crate::api::ApiClient;
use shared_types::{AppError, LoginPolicy, LoginRequest, LoginResponse, SessionIdentity};
use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep, timeout, Instant};

const WAKE_UP_FAILED: &str = "The service did not respond in time. Please try again in a moment.";

/// Progress reported while logging in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginProgress {
    /// Attempt number `n` (1-based) is starting.
    Attempt(u32),
    /// The service looks asleep; tell the user it is waking up.
    WakingUp,
}

/// Run `attempt` until it yields a server answer or the budget is spent.
pub async fn login_with_retry<F, Fut>(
    mut attempt: F,
    policy: LoginPolicy,
    mut progress: impl FnMut(LoginProgress),
) -> Result<LoginResponse, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<LoginResponse, AppError>>,
{
    let start = Instant::now();
    let attempt_timeout = Duration::from_millis(policy.attempt_timeout_ms);
    let retry_delay = Duration::from_millis(policy.retry_delay_ms);
    let max_wait = Duration::from_millis(policy.max_wait_ms);
    let slow_notice = Duration::from_millis(policy.slow_notice_ms);
    let mut notified = false;
    let mut attempts = 0u32;

    loop {
        attempts += 1;
        progress(LoginProgress::Attempt(attempts));

        let call = timeout(attempt_timeout, attempt());
        tokio::pin!(call);
        let outcome = if notified {
            call.await
        } else {
            tokio::select! {
                result = &mut call => result,
                _ = sleep(slow_notice.saturating_sub(start.elapsed())) => {
                    notified = true;
                    progress(LoginProgress::WakingUp);
                    call.await
                }
            }
        };

        let error = match outcome {
            Ok(Ok(response)) => {
                tracing::info!(attempts, elapsed_ms = start.elapsed().as_millis() as u64, "login answered");
                return Ok(response);
            }
            Ok(Err(e)) if !e.is_transport() => return Err(e),
            Ok(Err(e)) => e,
            Err(_) => AppError::timeout("Login attempt timed out"),
        };

        tracing::warn!(attempts, error = %error, "login attempt failed");
        let remaining = max_wait.saturating_sub(start.elapsed());
        if remaining <= retry_delay {
            tracing::error!(attempts, "login gave up waiting for the service");
            return Err(AppError::timeout(WAKE_UP_FAILED));
        }
        if !notified {
            notified = true;
            progress(LoginProgress::WakingUp);
        }
        sleep(retry_delay).await;
    }
}

/// Validate credentials before any request is made.
pub fn login_request(username: &str, password: &str) -> Result<LoginRequest, AppError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(AppError::missing("username", "Enter your username"));
    }
    if password.is_empty() {
        return Err(AppError::missing("password", "Enter your password"));
    }
    Ok(LoginRequest {
        username: username.to_string(),
        password: password.to_string(),
    })
}

/// Log in against the remote service with the configured retry policy.
///
/// The session id is the username; the display name comes from the server
/// when it sends one.
pub async fn login(
    api: &ApiClient,
    username: &str,
    password: &str,
    policy: LoginPolicy,
    progress: impl FnMut(LoginProgress),
) -> Result<SessionIdentity, AppError> {
    let request = login_request(username, password)?;
    let response = login_with_retry(|| api.login(&request), policy, progress).await?;
    Ok(SessionIdentity::new(request.username.clone(), response.name))
}

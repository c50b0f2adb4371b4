//! Error types for agent-runner

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use thiserror::Error;

/// Failure raised by a lifecycle hook (`initialize`, `execute`, `shutdown`).
///
/// A hook that *returns* an error-status payload has not failed; only this
/// type marks the hook itself as failed.
#[derive(Debug, Clone, Error)]
pub enum HookError {
    /// The hook reported a failure
    #[error("{0}")]
    Failed(String),

    /// The hook panicked
    #[error("{hook} panicked: {message}")]
    Panicked { hook: &'static str, message: String },
}

impl HookError {
    /// Create a Failed error
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

/// Errors returned synchronously by `AgentRunner::run`
#[derive(Debug, Error)]
pub enum RunError {
    /// Another run holds this agent instance
    #[error("Agent {agent_id} is already running")]
    AlreadyRunning { agent_id: String },
}

/// Drive a hook future to completion, turning a panic into a `HookError`.
pub(crate) async fn guarded<T, F>(hook: &'static str, future: F) -> Result<T, HookError>
where
    F: Future<Output = Result<T, HookError>>,
{
    match AssertUnwindSafe(future).catch_unwind().await {
        Ok(result) => result,
        Err(payload) => Err(HookError::Panicked {
            hook,
            message: panic_message(payload.as_ref()),
        }),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

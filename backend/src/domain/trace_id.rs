//! Correlation id carried by every request.
//!
//! [`crate::Trace`] puts one in tokio task-local storage for the life of a
//! request, where [`crate::domain::Error`] and log events read it. Spawned
//! tasks start without one unless wrapped in [`TraceId::scope`].

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use uuid::Uuid;

/// Response and request header holding the id.
pub const TRACE_ID_HEADER: &str = "trace-id";

tokio::task_local! {
    static CURRENT: TraceId;
}

/// UUID naming one request in logs, error bodies, and the `trace-id` header.
///
/// # Examples
/// ```
/// use backend::domain::TraceId;
///
/// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
/// let id = TraceId::generate();
/// assert_eq!(TraceId::scope(id, async { TraceId::current() }).await, Some(id));
/// assert_eq!(TraceId::current(), None);
/// # });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Accept a caller's id, tolerating surrounding whitespace.
    #[must_use]
    pub fn from_header_value(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }

    /// Id of the request the current task serves.
    #[must_use]
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    /// Drive `fut` as part of the request named by `id`.
    pub async fn scope<F: Future>(id: Self, fut: F) -> F::Output {
        CURRENT.scope(id, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[tokio::test]
    async fn nested_scopes_shadow_and_restore() {
        let outer = TraceId::generate();
        let inner = TraceId::generate();
        let seen = TraceId::scope(outer, async move {
            let nested = TraceId::scope(inner, async { TraceId::current() }).await;
            (nested, TraceId::current())
        })
        .await;
        assert_eq!(seen, (Some(inner), Some(outer)));
    }

    #[tokio::test]
    async fn spawned_tasks_start_unscoped() {
        let seen = TraceId::scope(TraceId::generate(), async {
            tokio::spawn(async { TraceId::current() })
                .await
                .expect("join")
        })
        .await;
        assert_eq!(seen, None);
    }

    #[rstest]
    #[case::padded(" 3fa85f64-5717-4562-b3fc-2c963f66afa6 ", true)]
    #[case::simple_form("3fa85f6457174562b3fc2c963f66afa6", true)]
    #[case::slug("recipe-42", false)]
    #[case::empty("", false)]
    fn header_values_must_be_uuids(#[case] raw: &str, #[case] accepted: bool) {
        assert_eq!(TraceId::from_header_value(raw).is_some(), accepted);
    }

    #[rstest]
    fn display_is_hyphenated_lowercase() {
        let id = TraceId::from_header_value("3FA85F6457174562B3FC2C963F66AFA6").expect("uuid");
        assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    }
}

//! Correlation identifier for one API request.
//!
//! [`crate::Trace`] assigns every request a fresh [`TraceId`], echoes it in
//! the `trace-id` response header and runs the handler inside
//! [`TraceId::scope`]. An [`Error`](crate::domain::Error) created in that
//! scope copies the identifier into its `traceId` field, so a failed post,
//! like or login can be matched to the server logs.
//!
//! The value lives in a Tokio task-local and does not follow `tokio::spawn`
//! or `spawn_blocking`; re-enter [`TraceId::scope`] on the new task.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

/// Response header carrying the request trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

task_local! {
    static CURRENT: TraceId;
}

/// Random UUID naming one request.
///
/// # Examples
/// ```
/// use microblog::domain::TraceId;
///
/// fn log_line(event: &str) -> String {
///     match TraceId::current() {
///         Some(id) => format!("[{id}] {event}"),
///         None => event.to_owned(),
///     }
/// }
///
/// assert_eq!(log_line("post created"), "post created");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Fresh identifier for an incoming request.
    #[must_use]
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Identifier of the request being served, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    /// Run `fut` with `trace_id` as the current identifier.
    ///
    /// # Examples
    /// ```
    /// use microblog::domain::TraceId;
    ///
    /// # tokio::runtime::Runtime::new().unwrap().block_on(async {
    /// let trace_id: TraceId = "6f1c2b9e-0d4a-4c1e-9a57-3b8e2f7d1c40"
    ///     .parse()
    ///     .expect("valid UUID");
    /// let seen = TraceId::scope(trace_id, async { TraceId::current() }).await;
    /// assert_eq!(seen, Some(trace_id));
    /// # });
    /// ```
    pub async fn scope<Fut>(trace_id: Self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        CURRENT.scope(trace_id, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(raw).map(Self)
    }
}

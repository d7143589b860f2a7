use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};

/// Outcome of a call made inside the crash-containment boundary.
#[derive(Debug)]
pub enum Contained<T> {
    Completed(T),
    /// The call faulted; `fallback` is a best-effort replacement value.
    Fatal { fallback: T, message: String },
}

impl<T> Contained<T> {
    pub fn is_fatal(&self) -> bool {
        matches!(self, Contained::Fatal { .. })
    }

    pub fn into_inner(self) -> T {
        match self {
            Contained::Completed(value) => value,
            Contained::Fatal { fallback, .. } => fallback,
        }
    }

    pub fn fatal_message(&self) -> Option<&str> {
        match self {
            Contained::Completed(_) => None,
            Contained::Fatal { message, .. } => Some(message),
        }
    }
}

/// Runs `op`; if it panics, records the fault and returns `fallback()` instead.
///
/// Meant for the traversal-heavy calls (query-match processing, tree
/// walks). State touched by `op` may be partially updated when this
/// returns `Fatal`, so callers must leave it in a clearable shape.
pub fn contain<T>(label: &str, op: impl FnOnce() -> T, fallback: impl FnOnce() -> T) -> Contained<T> {
    match catch_unwind(AssertUnwindSafe(op)) {
        Ok(value) => Contained::Completed(value),
        Err(payload) => {
            let message = format!("{label}: {}", panic_message(payload.as_ref()));
            tracing::error!(boundary = label, "{}", message);
            Contained::Fatal {
                fallback: fallback(),
                message,
            }
        }
    }
}

/// Like [`contain`], but bypassed entirely when `enabled` is false.
pub fn contain_if<T>(
    enabled: bool,
    label: &str,
    op: impl FnOnce() -> T,
    fallback: impl FnOnce() -> T,
) -> Contained<T> {
    if enabled {
        contain(label, op, fallback)
    } else {
        Contained::Completed(op())
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown fault".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completed_calls_pass_through() {
        let out = contain("walk", || 7, || 0);
        assert!(!out.is_fatal());
        assert_eq!(out.into_inner(), 7);
    }

    #[test]
    fn faults_yield_fallback_and_message() {
        let mut touched = Vec::new();
        let out = contain(
            "query",
            || {
                touched.push(1);
                panic!("index out of bounds");
            },
            || -1,
        );
        assert!(out.is_fatal());
        assert_eq!(out.fatal_message(), Some("query: index out of bounds"));
        assert_eq!(out.into_inner(), -1);
        assert_eq!(touched, vec![1]);
    }
}

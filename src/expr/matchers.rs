//! Argument placeholders for quoted expressions.
//!
//! Every parameter of a quoted call accepts an [`Arg`]: a plain value (via
//! `From`), [`is_any`] or [`is`]. They mix freely within one call:
//!
//! ```ignore
//! worker.call_count(|w| w.do_something(it::is_any(), it::is(|s: &String| s.len() > 3), true))?;
//! ```

use std::fmt;
use std::sync::Arc;

/// Typed argument matcher for a parameter of type `T`.
pub enum Arg<T> {
    /// Matches every value.
    Any,
    /// Matches values the predicate accepts.
    Is(Arc<dyn Fn(&T) -> bool + Send + Sync>),
    /// Matches values equal to the captured one.
    Eq(T),
}

/// Match anything.
pub fn is_any<T>() -> Arg<T> {
    Arg::Any
}

/// Match via a custom predicate.
pub fn is<T, F>(predicate: F) -> Arg<T>
where
    F: Fn(&T) -> bool + Send + Sync + 'static,
{
    Arg::Is(Arc::new(predicate))
}

impl<T> From<T> for Arg<T> {
    fn from(value: T) -> Self {
        Arg::Eq(value)
    }
}

impl From<&str> for Arg<String> {
    fn from(value: &str) -> Self {
        Arg::Eq(value.to_string())
    }
}

impl<T: Clone> Clone for Arg<T> {
    fn clone(&self) -> Self {
        match self {
            Arg::Any => Arg::Any,
            Arg::Is(predicate) => Arg::Is(Arc::clone(predicate)),
            Arg::Eq(value) => Arg::Eq(value.clone()),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Arg<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Any => f.write_str("is_any()"),
            Arg::Is(_) => f.write_str("is(<predicate>)"),
            Arg::Eq(value) => write!(f, "{:?}", value),
        }
    }
}

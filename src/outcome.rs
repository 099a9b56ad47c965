//! Railway-style outcome type for composing fallible steps
//!
//! An [`Outcome`] is either a successful value or a single free-form failure reason.
//! Combinators consume the outcome and return a new one, so a chain of steps reads
//! top to bottom and a failure at any point switches every later step off:
//!
//! ```
//! use docsend_lib::outcome::Outcome;
//!
//! let parsed = Outcome::evaluate(|| "42".parse::<u32>())
//!     .map(|n| n * 2)
//!     .bind(|n| if n > 50 { Outcome::success(n) } else { Outcome::failure("too small") })
//!     .refine_error("Can't read answer");
//!
//! assert_eq!(parsed, Outcome::success(84));
//! ```
//!
//! Errors become failures only inside [`Outcome::evaluate`] (and the combinators
//! defined through it). Panics are never caught.

use crate::error::{DocSendError, DocSendResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Either a successful value or a failure reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome<T> {
    Success(T),
    Failure(String),
}

impl<T> Outcome<T> {
    /// Wrap a value in the success track
    pub fn success(value: T) -> Self {
        Outcome::Success(value)
    }

    /// Start on the failure track with the given reason
    ///
    /// The reason is expected to be non-empty; this is not checked.
    pub fn failure(reason: impl Into<String>) -> Self {
        Outcome::Failure(reason.into())
    }

    /// Run `f` and capture its error, if any, as the failure reason
    ///
    /// This is the boundary where `Err` values enter the failure track. The reason is
    /// the error's `Display` text.
    pub fn evaluate<F, E>(f: F) -> Self
    where
        F: FnOnce() -> Result<T, E>,
        E: fmt::Display,
    {
        match f() {
            Ok(value) => Outcome::Success(value),
            Err(e) => Outcome::Failure(e.to_string()),
        }
    }

    /// Like [`Outcome::evaluate`], but a captured error is reported as `reason`
    pub fn evaluate_or<F, E>(f: F, reason: impl Into<String>) -> Self
    where
        F: FnOnce() -> Result<T, E>,
    {
        match f() {
            Ok(value) => Outcome::Success(value),
            Err(_) => Outcome::Failure(reason.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// Borrow the value, if on the success track
    pub fn value(&self) -> Option<&T> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Failure(_) => None,
        }
    }

    /// Borrow the failure reason, if on the failure track
    pub fn reason(&self) -> Option<&str> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(reason) => Some(reason),
        }
    }

    /// Take the value out of a successful outcome
    ///
    /// Calling this on a failure is a caller bug: check [`Outcome::is_success`] first or
    /// stay inside the combinators. The returned error names the stored reason.
    pub fn value_or_raise(self) -> DocSendResult<T> {
        match self {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(reason) => Err(DocSendError::InvalidState(reason)),
        }
    }

    /// Continue with `f` on success; forward the failure reason untouched otherwise
    pub fn bind<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> Outcome<U>,
    {
        match self {
            Outcome::Success(value) => f(value),
            Outcome::Failure(reason) => Outcome::Failure(reason),
        }
    }

    /// Project the value with an infallible function
    pub fn map<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
    {
        self.bind(|value| Outcome::Success(f(value)))
    }

    /// Project the value with a fallible function, capturing its error as in
    /// [`Outcome::evaluate`]
    pub fn try_map<U, E, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> Result<U, E>,
        E: fmt::Display,
    {
        self.bind(|value| Outcome::evaluate(|| f(value)))
    }

    /// Observe the failure reason without changing the outcome
    pub fn on_failure<F>(self, handler: F) -> Self
    where
        F: FnOnce(&str),
    {
        if let Outcome::Failure(reason) = &self {
            handler(reason);
        }
        self
    }

    /// Rewrite the failure reason; successes pass through
    pub fn replace_error<F>(self, transform: F) -> Self
    where
        F: FnOnce(String) -> String,
    {
        match self {
            Outcome::Success(value) => Outcome::Success(value),
            Outcome::Failure(reason) => Outcome::Failure(transform(reason)),
        }
    }

    /// Prefix the failure reason with `context` and a `". "` separator
    pub fn refine_error(self, context: impl fmt::Display) -> Self {
        self.replace_error(|reason| format!("{}. {}", context, reason))
    }

    /// Convert into a plain `Result`, with the reason as the error
    pub fn into_result(self) -> Result<T, String> {
        match self {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(reason) => Err(reason),
        }
    }
}

impl<T, E: fmt::Display> From<Result<T, E>> for Outcome<T> {
    fn from(result: Result<T, E>) -> Self {
        Outcome::evaluate(|| result)
    }
}

/// Lift any value onto the success track
///
/// ```
/// use docsend_lib::outcome::{IntoOutcome, Outcome};
///
/// assert_eq!("4.0".into_outcome(), Outcome::success("4.0"));
/// ```
pub trait IntoOutcome: Sized {
    fn into_outcome(self) -> Outcome<Self> {
        Outcome::success(self)
    }
}

impl<T> IntoOutcome for T {}

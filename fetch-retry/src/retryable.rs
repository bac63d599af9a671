use crate::error::Error;

/// Verdict of a [`RetryPolicy`](crate::RetryPolicy) on an attempt that should
/// not simply be handed back to the caller.
#[derive(Debug)]
pub enum Retryable {
    /// The failure might resolve on its own: attempt again. If attempts run
    /// out, the attempt's own error (if any) is reported as the cause.
    Transient,
    /// Attempt again. If attempts run out, report this error as the cause.
    TransientWith(Error),
    /// Stop now and return this error instead of the attempt's outcome,
    /// even if a response was obtained.
    Fatal(Error),
}

impl Retryable {
    pub fn should_retry(&self) -> bool {
        match self {
            Retryable::Transient | Retryable::TransientWith(_) => true,
            Retryable::Fatal(_) => false,
        }
    }

    /// The overriding error carried by the verdict, if any.
    pub fn into_error(self) -> Option<Error> {
        match self {
            Retryable::Transient => None,
            Retryable::TransientWith(err) | Retryable::Fatal(err) => Some(err),
        }
    }
}

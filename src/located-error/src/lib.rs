use std::{fmt::Display, panic::Location};

use anyhow::{Context, Result};

/// Format a `std::panic::Location` as `[file:line:col]`
macro_rules! loc_caller {
    ($caller:expr) => {
        format!("[{}:{}:{}]", $caller.file(), $caller.line(), $caller.column())
    }
}

/// Early-return an `Err`, wrapped with the location at which the macro was invoked.
///
/// ```ignore
/// return loc!(VariantReaderError::InvalidFileExt)
/// ```
#[macro_export]
macro_rules! loc {
    ($err:expr) => {
        ::anyhow::Context::context(
            Err(::anyhow::Error::from($err)),
            format!("[{}:{}:{}]", file!(), line!(), column!())
        )
    };
}

/// Attach a located context to the `Err` variant of a `Result`.
pub trait LocatedError<T, E> {
    /// Wrap the error value with additional context + the location at which it was called.
    fn loc<C>(self, context: C) -> Result<T, anyhow::Error>
    where
        C: Display + Send + Sync + 'static;

    /// Same as `loc()`, but `context` is only evaluated once an error does occur.
    fn with_loc<C, F>(self, f: F) -> Result<T, anyhow::Error>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E> LocatedError<T, E> for Result<T, E>
where
    E: Display + Send + Sync + 'static,
    Result<T, E>: Context<T, E>,
{
    #[track_caller]
    fn loc<C>(self, context: C) -> Result<T, anyhow::Error>
    where
        C: Display + Send + Sync + 'static
    {
        match self {
            Ok(ok) => Ok(ok),
            Err(e) => {
                let loc = loc_caller!(Location::caller());
                Err::<T, E>(e).context(format!("{loc} {context}"))
            }
        }
    }

    #[track_caller]
    fn with_loc<C, F>(self, f: F) -> Result<T, anyhow::Error>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C
    {
        let loc = loc_caller!(Location::caller());
        self.with_context(|| format!("{loc} {}", f()))
    }
}

use std::error::Error as StdError;
use std::fmt;

use thiserror::Error as ThisError;

/// Boxed error detail type shared across the crate.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A step sequence was rejected before any execution.
    Validation,
    /// Pipeline compilation failed; no chain or task was produced.
    Build,
    /// A task failed while executing a step body.
    Task,
    /// A payload did not match a declared type tag (strict mode).
    TypeCheck,
    /// The shared task deque misbehaved; treated as unrecoverable.
    Queue,
    /// Invalid runtime configuration.
    Config,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Validation => write!(f, "validation"),
            ErrorKind::Build => write!(f, "build"),
            ErrorKind::Task => write!(f, "task"),
            ErrorKind::TypeCheck => write!(f, "type check"),
            ErrorKind::Queue => write!(f, "queue"),
            ErrorKind::Config => write!(f, "config"),
        }
    }
}

pub struct ErrorInner {
    pub kind: ErrorKind,
    pub source: Option<BoxError>,
    pub message: Option<String>,
}

pub struct Error {
    pub inner: Box<ErrorInner>,
}

impl Error {
    pub fn new<E>(kind: ErrorKind, source: Option<E>) -> Error
    where
        E: Into<BoxError>,
    {
        Error {
            inner: Box::new(ErrorInner {
                kind,
                source: source.map(Into::into),
                message: None,
            }),
        }
    }

    pub fn with_message<E>(kind: ErrorKind, message: String, source: Option<E>) -> Error
    where
        E: Into<BoxError>,
    {
        Error {
            inner: Box::new(ErrorInner {
                kind,
                source: source.map(Into::into),
                message: Some(message),
            }),
        }
    }

    pub fn build(message: impl Into<String>) -> Error {
        Error::with_message(ErrorKind::Build, message.into(), None::<BoxError>)
    }

    pub fn task(message: impl Into<String>) -> Error {
        Error::with_message(ErrorKind::Task, message.into(), None::<BoxError>)
    }

    pub fn type_check(message: impl Into<String>) -> Error {
        Error::with_message(ErrorKind::TypeCheck, message.into(), None::<BoxError>)
    }

    pub fn queue(message: impl Into<String>) -> Error {
        Error::with_message(ErrorKind::Queue, message.into(), None::<BoxError>)
    }

    pub fn config(message: impl Into<String>) -> Error {
        Error::with_message(ErrorKind::Config, message.into(), None::<BoxError>)
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.inner.kind
    }

    pub fn is_validation(&self) -> bool {
        matches!(self.inner.kind, ErrorKind::Validation)
    }

    pub fn is_build(&self) -> bool {
        matches!(self.inner.kind, ErrorKind::Build)
    }

    pub fn is_task(&self) -> bool {
        matches!(self.inner.kind, ErrorKind::Task)
    }

    pub fn is_type_check(&self) -> bool {
        matches!(self.inner.kind, ErrorKind::TypeCheck)
    }

    pub fn is_queue(&self) -> bool {
        matches!(self.inner.kind, ErrorKind::Queue)
    }

    pub fn is_config(&self) -> bool {
        matches!(self.inner.kind, ErrorKind::Config)
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_struct("strand::Error");
        f.field("kind", &self.inner.kind);
        if let Some(ref message) = self.inner.message {
            f.field("message", message);
        }
        if let Some(ref source) = self.inner.source {
            f.field("source", source);
        }
        f.finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref message) = self.inner.message {
            write!(f, "{} error: {}", self.inner.kind, message)?;
        } else {
            write!(f, "{} error", self.inner.kind)?;
        }

        if let Some(ref source) = self.inner.source {
            write!(f, ": {source}")?;
        }

        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner
            .source
            .as_ref()
            .map(|e| &**e as &(dyn StdError + 'static))
    }
}

/// Rule-level failures produced by the step sequence validator.
///
/// Each variant maps to exactly one validation rule; the first rule that
/// fails wins and validation stops there.
#[derive(Debug, ThisError)]
pub enum ValidationError {
    #[error("step sequence is empty")]
    EmptySequence,
    #[error(
        "steps {first} and {second} are not compatible: \
         {first} produces {output}, {second} accepts {input}"
    )]
    IncompatibleStepTypes {
        first: String,
        second: String,
        output: &'static str,
        input: &'static str,
    },
    #[error("{position} step must use the absent type {expected} at the pipeline boundary, found {found}")]
    InvalidEndpoints {
        position: &'static str,
        expected: &'static str,
        found: &'static str,
    },
}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        Error::new(ErrorKind::Validation, Some(err))
    }
}

mod error;

pub use error::{BoxError, Error, ErrorInner, ErrorKind, Result, ValidationError};

use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::pin::Pin;

use futures::stream::{self, Stream};

use crate::errors::Result;

/// Type-erased value moved between steps of a chain.
pub type Payload = Box<dyn Any + Send>;

/// Lazy, finite, non-restartable sequence of step outputs.
///
/// Pulled one element per `Task::step()` call; an `Err` item is a step
/// execution failure and terminates the owning task.
pub type PayloadStream = Pin<Box<dyn Stream<Item = Result<Payload>> + Send>>;

/// Declared input/output type tag of a step, attached at declaration time
/// and compared by plain `TypeId` equality.
///
/// The pipeline endpoint contract uses the "absent" sentinel, which is the
/// tag of `()`.
#[derive(Clone, Copy, Debug)]
pub struct StepType {
    id: TypeId,
    name: &'static str,
}

impl StepType {
    pub fn of<T: 'static>() -> StepType {
        StepType {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// The sentinel tag marking "no data": first-step input and
    /// last-step output.
    pub fn absent() -> StepType {
        StepType::of::<()>()
    }

    pub fn is_absent(&self) -> bool {
        self.id == TypeId::of::<()>()
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Checks a payload's runtime type against this declared tag.
    pub fn matches_value(&self, value: &Payload) -> bool {
        (**value).type_id() == self.id
    }
}

impl PartialEq for StepType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for StepType {}

impl fmt::Display for StepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Result of one `Step::start()` invocation.
pub enum StepOutput {
    /// The step produced a single value.
    Value(Payload),
    /// The step produced a lazy sequence of values.
    Stream(PayloadStream),
}

impl StepOutput {
    /// Normalizes the output into a stream: a single value becomes a
    /// one-element sequence.
    pub fn into_stream(self) -> PayloadStream {
        match self {
            StepOutput::Value(value) => {
                let single: [Result<Payload>; 1] = [Ok(value)];
                Box::pin(stream::iter(single))
            }
            StepOutput::Stream(inner) => inner,
        }
    }
}

/// The absent payload carried into the first step of every chain.
pub fn absent() -> Payload {
    Box::new(())
}

/// Wraps a concrete value into a type-erased payload.
pub fn payload<T: Send + 'static>(value: T) -> Payload {
    Box::new(value)
}

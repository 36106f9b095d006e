use std::any::type_name;
use std::marker::PhantomData;
use std::pin::Pin;

use async_trait::async_trait;
use futures::stream::{self, Stream, StreamExt};

use crate::errors::{Error, Result};
use crate::step::core::Step;
use crate::step::types::{Payload, StepOutput, StepType};

/// What a typed step body hands back: one value or a lazy sequence of them.
pub enum Emit<O> {
    One(O),
    Many(Pin<Box<dyn Stream<Item = Result<O>> + Send>>),
}

impl<O: Send + 'static> Emit<O> {
    /// Builds a `Many` emission from an in-memory collection.
    pub fn many<It>(values: It) -> Emit<O>
    where
        It: IntoIterator<Item = O>,
    {
        let items: Vec<Result<O>> = values.into_iter().map(Ok).collect();
        Emit::Many(Box::pin(stream::iter(items)))
    }
}

/// Bridges a strongly-typed closure into the erased [`Step`] object.
///
/// The wrapper records `(I, O)` as the step's declared type tags and
/// downcasts the incoming payload on entry, failing fast on a mismatch.
pub struct FnStep<I, O, F> {
    name: String,
    func: F,
    // Function-pointer PhantomData prevents auto-trait leakage from I/O.
    _phantom: PhantomData<fn(I) -> O>,
}

impl<I, O, F> FnStep<I, O, F>
where
    I: Send + 'static,
    O: Send + 'static,
    F: Fn(I) -> Result<Emit<O>> + Send + Sync,
{
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
            _phantom: PhantomData,
        }
    }
}

#[async_trait]
impl<I, O, F> Step for FnStep<I, O, F>
where
    I: Send + 'static,
    O: Send + 'static,
    F: Fn(I) -> Result<Emit<O>> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn input_type(&self) -> StepType {
        StepType::of::<I>()
    }

    fn output_type(&self) -> StepType {
        StepType::of::<O>()
    }

    async fn start(&self, input: Payload) -> Result<StepOutput> {
        let typed_input = input.downcast::<I>().map_err(|_| {
            Error::type_check(format!(
                "type mismatch when entering step {}: expected input {}",
                self.name,
                type_name::<I>()
            ))
        })?;

        match (self.func)(*typed_input)? {
            Emit::One(value) => Ok(StepOutput::Value(Box::new(value))),
            Emit::Many(values) => Ok(StepOutput::Stream(Box::pin(
                values.map(|item| item.map(|value| Box::new(value) as Payload)),
            ))),
        }
    }
}

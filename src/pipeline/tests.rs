use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::errors::{Error, Result, ValidationError};
use crate::pipeline::chain::build_chain;
use crate::pipeline::task::Task;
use crate::pipeline::validation::StepSequenceValidator;
use crate::pipeline::TaskBuilder;
use crate::step::{absent, payload, Emit, FnStep, Payload, Step, StepOutput, StepType};

fn counter(values: Vec<i64>) -> Arc<dyn Step> {
    Arc::new(FnStep::new("counter", move |_: ()| {
        Ok(Emit::many(values.clone()))
    }))
}

fn answer() -> Arc<dyn Step> {
    Arc::new(FnStep::new("answer", |_: ()| Ok(Emit::One(42_i64))))
}

fn doubler() -> Arc<dyn Step> {
    Arc::new(FnStep::new("doubler", |value: i64| Ok(Emit::One(value * 2))))
}

fn collector(seen: Arc<Mutex<Vec<i64>>>) -> Arc<dyn Step> {
    Arc::new(FnStep::new("collector", move |value: i64| {
        seen.lock().unwrap().push(value);
        Ok(Emit::One(()))
    }))
}

fn failing() -> Arc<dyn Step> {
    Arc::new(FnStep::new("failing", |_: ()| -> Result<Emit<()>> {
        Err(Error::task("boom"))
    }))
}

/// Yields one good value, then fails mid-stream, then would yield another.
fn flaky_counter() -> Arc<dyn Step> {
    Arc::new(FnStep::new("flaky counter", |_: ()| {
        let items: Vec<Result<i64>> = vec![Ok(1), Err(Error::task("wire dropped")), Ok(3)];
        Ok(Emit::Many(Box::pin(futures::stream::iter(items))))
    }))
}

/// Declares `() -> i64` but actually produces a `String`. Strict runtime
/// typing exists to catch exactly this.
struct MislabeledStep;

#[async_trait]
impl Step for MislabeledStep {
    fn name(&self) -> &str {
        "mislabeled"
    }

    fn input_type(&self) -> StepType {
        StepType::absent()
    }

    fn output_type(&self) -> StepType {
        StepType::of::<i64>()
    }

    async fn start(&self, _input: Payload) -> Result<StepOutput> {
        Ok(StepOutput::Value(payload("not an i64".to_string())))
    }
}

#[test]
fn validator_accepts_compatible_sequence() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let steps = [counter(vec![1, 2]), doubler(), collector(seen)];

    assert!(StepSequenceValidator::validate(&steps).is_ok());
}

#[test]
fn chain_has_one_node_per_step() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let steps = [counter(vec![1]), doubler(), collector(seen)];

    let head = build_chain(&steps).unwrap();
    assert_eq!(head.len(), 3);
    assert!(!head.is_terminal());
}

#[test]
fn empty_sequence_is_rejected() {
    let result = StepSequenceValidator::validate(&[]);
    assert!(matches!(result, Err(ValidationError::EmptySequence)));

    let built = TaskBuilder::build_from(&[], true, false);
    assert!(built.unwrap_err().is_build());

    // The chain builder re-checks even without the validator.
    assert!(build_chain(&[]).unwrap_err().is_build());
}

#[test]
fn incompatible_adjacent_steps_name_the_pair() {
    let stringer: Arc<dyn Step> =
        Arc::new(FnStep::new("stringer", |_value: String| Ok(Emit::One(()))));
    let steps = [counter(vec![1]), stringer];

    match StepSequenceValidator::validate(&steps) {
        Err(ValidationError::IncompatibleStepTypes { first, second, .. }) => {
            assert_eq!(first, "counter");
            assert_eq!(second, "stringer");
        }
        other => panic!("expected incompatibility error, got {other:?}"),
    }

    let built = TaskBuilder::build_from(&steps, true, false);
    assert!(built.unwrap_err().is_build());
}

#[test]
fn endpoint_contract_is_enforced() {
    let seen = Arc::new(Mutex::new(Vec::new()));

    // First step accepts i64 instead of the absent type.
    let steps = [doubler(), collector(Arc::clone(&seen))];
    match StepSequenceValidator::validate(&steps) {
        Err(ValidationError::InvalidEndpoints { position, .. }) => {
            assert_eq!(position, "first")
        }
        other => panic!("expected endpoint error, got {other:?}"),
    }

    // Last step produces i64 instead of the absent type.
    let steps = [counter(vec![1]), doubler()];
    match StepSequenceValidator::validate(&steps) {
        Err(ValidationError::InvalidEndpoints { position, .. }) => {
            assert_eq!(position, "last")
        }
        other => panic!("expected endpoint error, got {other:?}"),
    }
}

#[tokio::test]
async fn two_step_chain_runs_end_to_end() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let steps = [answer(), collector(Arc::clone(&seen))];

    let mut first = TaskBuilder::build_from(&steps, true, false).unwrap();

    let continuation = first.step().await.unwrap();
    let mut second = continuation.expect("answer should forward one value");

    // The single-value source is exhausted on the next visit.
    assert!(matches!(first.step().await, Ok(None)));
    assert!(first.is_done());

    // Terminal node: value consumed, nothing forwarded.
    assert!(matches!(second.step().await, Ok(None)));
    assert!(second.is_done());

    assert_eq!(*seen.lock().unwrap(), vec![42]);
}

#[tokio::test]
async fn stepping_a_done_task_is_an_error() {
    let steps = [failing()];
    let mut task = TaskBuilder::build_from(&steps, true, false).unwrap();

    assert!(task.step().await.is_err());
    assert!(task.is_done());

    let again = task.step().await;
    assert!(again.unwrap_err().is_task());
}

#[tokio::test]
async fn generator_step_emits_one_continuation_per_call() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let steps = [counter(vec![1, 2, 3]), collector(seen)];

    let mut source = TaskBuilder::build_from(&steps, true, false).unwrap();

    for _ in 0..3 {
        let continuation = source.step().await.unwrap();
        assert!(continuation.is_some());
        assert!(!source.is_done());
    }

    assert!(matches!(source.step().await, Ok(None)));
    assert!(source.is_done());
}

#[tokio::test]
async fn mid_stream_failure_kills_the_task() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let steps = [flaky_counter(), collector(Arc::clone(&seen))];
    let mut source = TaskBuilder::build_from(&steps, true, false).unwrap();

    // The first element flows through as a normal continuation.
    assert!(source.step().await.unwrap().is_some());
    assert!(!source.is_done());

    // The second element is the stream failure; the task dies there.
    let err = source.step().await.unwrap_err();
    assert!(err.is_task());
    assert!(source.is_done());

    // The element after the failure is never reachable.
    assert!(source.step().await.unwrap_err().is_task());
}

#[test]
fn debug_output_names_the_current_step() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let steps = [answer(), collector(seen)];

    let head = build_chain(&steps).unwrap();
    let rendered = format!("{head:?}");
    assert!(rendered.contains("answer"));
    assert!(rendered.contains("remaining: 2"));

    let task = TaskBuilder::build_from(&steps, true, false).unwrap();
    let rendered = format!("{task:?}");
    assert!(rendered.contains(&task.id().to_string()));
    assert!(rendered.contains("done: false"));
}

#[tokio::test]
async fn failing_step_produces_no_continuation() {
    let steps = [failing()];
    let mut task = TaskBuilder::build_from(&steps, true, false).unwrap();

    let err = task.step().await.unwrap_err();
    assert!(err.is_task());
    assert!(task.is_done());
}

#[tokio::test]
async fn strict_mode_rejects_mislabeled_output() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let steps: [Arc<dyn Step>; 2] = [Arc::new(MislabeledStep), collector(Arc::clone(&seen))];

    let mut task = TaskBuilder::build_from(&steps, true, true).unwrap();

    let err = task.step().await.unwrap_err();
    assert!(err.is_type_check());
    assert!(task.is_done());
    assert!(seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn strict_mode_rejects_mismatched_payload() {
    let sink: Arc<dyn Step> = Arc::new(FnStep::new("sink", |_value: i64| Ok(Emit::One(()))));
    let head = build_chain(&[sink]).unwrap();

    // The absent payload does not match the declared i64 input.
    let mut task = Task::new(head, absent(), true);

    let err = task.step().await.unwrap_err();
    assert!(err.is_type_check());
    assert!(task.is_done());
}

#[tokio::test]
async fn lenient_mode_trusts_runtime_values_over_tags() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink: Arc<dyn Step> = Arc::new(FnStep::new("string sink", {
        let seen = Arc::clone(&seen);
        move |value: String| {
            seen.lock().unwrap().push(value);
            Ok(Emit::One(()))
        }
    }));

    // Mislabeled declares i64 but emits String; with validation and strict
    // checks both off, the value flows on its real runtime type.
    let steps: [Arc<dyn Step>; 2] = [Arc::new(MislabeledStep), sink];
    let mut first = TaskBuilder::build_from(&steps, false, false).unwrap();

    let mut second = first.step().await.unwrap().expect("continuation");
    assert!(matches!(second.step().await, Ok(None)));

    assert_eq!(*seen.lock().unwrap(), vec!["not an i64".to_string()]);
}

use std::sync::Arc;

use crate::errors::ValidationError;
use crate::step::{Step, StepType};

/// One independent check over a candidate step sequence.
trait SequenceRule {
    fn check(&self, steps: &[Arc<dyn Step>]) -> Result<(), ValidationError>;
}

struct NotEmptySequenceRule;

impl SequenceRule for NotEmptySequenceRule {
    fn check(&self, steps: &[Arc<dyn Step>]) -> Result<(), ValidationError> {
        if steps.is_empty() {
            return Err(ValidationError::EmptySequence);
        }
        Ok(())
    }
}

struct StepTypeCompatibilityRule;

impl StepTypeCompatibilityRule {
    fn check_step_pair(
        &self,
        first: &Arc<dyn Step>,
        second: &Arc<dyn Step>,
    ) -> Result<(), ValidationError> {
        let output = first.output_type();
        let input = second.input_type();

        if output != input {
            return Err(ValidationError::IncompatibleStepTypes {
                first: first.name().to_string(),
                second: second.name().to_string(),
                output: output.name(),
                input: input.name(),
            });
        }
        Ok(())
    }
}

impl SequenceRule for StepTypeCompatibilityRule {
    fn check(&self, steps: &[Arc<dyn Step>]) -> Result<(), ValidationError> {
        for pair in steps.windows(2) {
            self.check_step_pair(&pair[0], &pair[1])?;
        }
        Ok(())
    }
}

struct EndPointsRule;

impl SequenceRule for EndPointsRule {
    fn check(&self, steps: &[Arc<dyn Step>]) -> Result<(), ValidationError> {
        let absent = StepType::absent();

        if let Some(first) = steps.first() {
            let input = first.input_type();
            if input != absent {
                return Err(ValidationError::InvalidEndpoints {
                    position: "first",
                    expected: absent.name(),
                    found: input.name(),
                });
            }
        }

        if let Some(last) = steps.last() {
            let output = last.output_type();
            if output != absent {
                return Err(ValidationError::InvalidEndpoints {
                    position: "last",
                    expected: absent.name(),
                    found: output.name(),
                });
            }
        }

        Ok(())
    }
}

/// Declarative, fail-fast validation of a step sequence before a chain is
/// compiled. Only declared type tags are inspected, never runtime values.
pub struct StepSequenceValidator;

impl StepSequenceValidator {
    /// Runs every rule in order; the first violation wins.
    pub fn validate(steps: &[Arc<dyn Step>]) -> Result<(), ValidationError> {
        let rules: [&dyn SequenceRule; 3] = [
            &NotEmptySequenceRule,
            &StepTypeCompatibilityRule,
            &EndPointsRule,
        ];

        for rule in rules {
            rule.check(steps)?;
        }
        Ok(())
    }
}

use std::fmt;
use std::sync::Arc;

use crate::errors::{Error, Result};
use crate::step::Step;

/// One node of a compiled chain: a step plus the link to its successor.
///
/// Built once, never mutated afterwards; shared read-only by every task
/// instantiated from the same compiled sequence. Following `next` always
/// reaches a terminal node.
pub struct ChainNode {
    pub step: Arc<dyn Step>,
    pub next: Option<Arc<ChainNode>>,
}

impl fmt::Debug for ChainNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainNode")
            .field("step", &self.step.name())
            .field("remaining", &self.len())
            .finish()
    }
}

impl ChainNode {
    pub fn is_terminal(&self) -> bool {
        self.next.is_none()
    }

    /// Number of nodes reachable from this one, itself included.
    pub fn len(&self) -> usize {
        let mut count = 1;
        let mut node = self;
        while let Some(next) = node.next.as_deref() {
            count += 1;
            node = next;
        }
        count
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Compiles an ordered step sequence into a linked chain, returning the head.
///
/// Single O(n) pass, built back to front. The empty sequence is re-checked
/// here even when the validator already ran.
pub fn build_chain(steps: &[Arc<dyn Step>]) -> Result<Arc<ChainNode>> {
    let mut head: Option<Arc<ChainNode>> = None;

    for step in steps.iter().rev() {
        head = Some(Arc::new(ChainNode {
            step: Arc::clone(step),
            next: head.take(),
        }));
    }

    head.ok_or_else(|| Error::build("cannot build a chain from an empty step sequence"))
}

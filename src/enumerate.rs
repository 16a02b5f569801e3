//! Next Closure enumeration of all concepts of a context.
//!
//! [`ConceptEnumerator`] walks the closed attribute sets in lectic order,
//! starting from the closure of the empty set (the intent of the concept whose
//! extent holds every object) and ending with the full attribute set. From a
//! closed set `A` the successor is found by trying attributes from the last
//! index down to the first: for an attribute `i` outside `A`, the candidate
//! `B = closure((A ∩ {0..i}) ∪ {i})` is accepted only if it agrees with `A` on
//! every attribute below `i`. That canonicity test rejects every derivation
//! path to `B` but the one from its lectic predecessor, so each closed set is
//! produced exactly once without remembering what was already produced.
//!
//! Each step costs a polynomial number of closures, but the number of concepts
//! can grow exponentially with the number of attributes. That is a property of
//! the data, not of the algorithm. Consumers facing unknown contexts should
//! bound the walk, either by taking a prefix of the iterator or by using
//! [`ConceptEnumerator::collect_within`] with a [`Budget`].

use std::iter::FusedIterator;
use std::time::{Duration, Instant};

use tracing::{debug, info, trace};

use crate::closure::GaloisClosure;
use crate::concept::Concept;
use crate::context::{AttributeSet, Context, Index};

// ------------- Budget -------------
/// External limits on an enumeration. The default is unlimited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Budget {
    pub max_concepts: Option<usize>,
    pub deadline: Option<Duration>,
}
impl Budget {
    pub fn unlimited() -> Self {
        Self::default()
    }
    pub fn with_max_concepts(mut self, max_concepts: usize) -> Self {
        self.max_concepts = Some(max_concepts);
        self
    }
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }
    pub fn is_unlimited(&self) -> bool {
        self.max_concepts.is_none() && self.deadline.is_none()
    }
}

/// The materialized outcome of a budgeted enumeration.
#[derive(Debug)]
pub struct Enumeration {
    pub concepts: Vec<Concept>,
    /// True when the budget ran out before the last concept was produced.
    pub truncated: bool,
    pub elapsed: Duration,
}

// ------------- Enumerator -------------
#[derive(Debug)]
enum State {
    Fresh,
    After(AttributeSet),
    Exhausted,
}

/// Lazy, finite and non-restartable sequence of every concept of a context,
/// in strictly increasing lectic order of intents.
#[derive(Debug)]
pub struct ConceptEnumerator<'c> {
    closure: GaloisClosure<'c>,
    state: State,
    emitted: usize,
}

impl<'c> ConceptEnumerator<'c> {
    pub fn new(context: &'c Context) -> Self {
        Self {
            closure: GaloisClosure::new(context),
            state: State::Fresh,
            emitted: 0,
        }
    }
    pub fn context(&self) -> &'c Context {
        self.closure.context()
    }
    /// Number of concepts produced so far.
    pub fn emitted(&self) -> usize {
        self.emitted
    }
    /// True once the full attribute set has been produced; every other closed
    /// set has a lectic successor, so nothing can follow it.
    pub fn is_finished(&self) -> bool {
        match &self.state {
            State::Fresh => false,
            State::After(intent) => intent.len() == u64::from(self.attribute_count()),
            State::Exhausted => true,
        }
    }

    /// Drains the sequence until it ends or the budget runs out.
    pub fn collect_within(mut self, budget: Budget) -> Enumeration {
        let started = Instant::now();
        let mut concepts = Vec::new();
        loop {
            if budget.max_concepts.is_some_and(|max| concepts.len() >= max) {
                break;
            }
            if budget.deadline.is_some_and(|deadline| started.elapsed() >= deadline) {
                break;
            }
            match self.next() {
                Some(concept) => concepts.push(concept),
                None => break,
            }
        }
        let truncated = !self.is_finished();
        let elapsed = started.elapsed();
        let ms = elapsed.as_secs_f64() * 1000.0;
        if truncated {
            info!(concepts = concepts.len(), ms, ?budget, "enumeration stopped by budget");
        } else {
            debug!(concepts = concepts.len(), ms, "enumeration complete");
        }
        Enumeration { concepts, truncated, elapsed }
    }

    fn attribute_count(&self) -> Index {
        self.closure.context().attribute_count()
    }

    // The lectically next closed set after `current`, if any.
    fn successor(&self, current: &AttributeSet) -> Option<Concept> {
        let attributes = self.attribute_count();
        if current.len() == u64::from(attributes) {
            return None;
        }
        // invariant at the top of each step: prefix == current ∩ {0..i}
        let mut prefix = current.clone();
        for i in (0..attributes).rev() {
            if prefix.remove(i) {
                continue;
            }
            let mut candidate = prefix.clone();
            candidate.insert(i);
            let concept = self.closure.close(&candidate);
            if below(concept.intent(), i) == prefix {
                return Some(concept);
            }
            trace!(attribute = i, "candidate failed the canonicity test");
        }
        None
    }
}

// The members of `set` ranked strictly below `i`.
fn below(set: &AttributeSet, i: Index) -> AttributeSet {
    let mut lower = set.clone();
    lower.remove_range(i..);
    lower
}

impl Iterator for ConceptEnumerator<'_> {
    type Item = Concept;

    fn next(&mut self) -> Option<Concept> {
        let next = match std::mem::replace(&mut self.state, State::Exhausted) {
            State::Fresh => Some(self.closure.close(&AttributeSet::new())),
            State::After(intent) => self.successor(&intent),
            State::Exhausted => None,
        };
        let concept = next?;
        self.state = State::After(concept.intent().clone());
        self.emitted += 1;
        debug!(
            n = self.emitted,
            extent = concept.extent().len(),
            intent = concept.intent().len(),
            "concept"
        );
        Some(concept)
    }
}
impl FusedIterator for ConceptEnumerator<'_> {}

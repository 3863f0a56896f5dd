//! Per-attempt parse state

use super::error::ParseError;
use super::trace::{TraceReason, Tracer};
use std::sync::Arc;

/// Mutable cursor over one input for one parse attempt
///
/// All mutation goes through [`begin`](State::begin), [`succeed`](State::succeed),
/// [`fail`](State::fail) and [`next`](State::next), so an aborted attempt never
/// leaves the state half-updated.
#[derive(Debug)]
pub struct State {
    input: Arc<[char]>,
    position: usize,
    farthest_position: usize,
    tracer: Tracer,
    depth: usize,
}

impl State {
    /// Create a state positioned at the start of `input`
    pub fn new(input: Arc<[char]>, trace_count: usize) -> Self {
        Self {
            input,
            position: 0,
            farthest_position: 0,
            tracer: Tracer::new(trace_count),
            depth: 0,
        }
    }

    /// Shared input buffer
    #[inline]
    pub fn input(&self) -> &Arc<[char]> {
        &self.input
    }

    /// Offset of the next unconsumed character
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Offset of the farthest character ever examined
    #[inline]
    pub fn farthest_position(&self) -> usize {
        self.farthest_position
    }

    /// Characters left after the cursor
    #[inline]
    pub fn remaining(&self) -> usize {
        self.input.len() - self.position
    }

    /// Recorder of rule events
    #[inline]
    pub fn tracer(&self) -> &Tracer {
        &self.tracer
    }

    /// Record the start of an attempt; returns the position to restore on failure
    pub fn begin(&mut self, rule: &Arc<str>) -> usize {
        self.tracer.add(rule, self.position, TraceReason::Begin);
        self.position
    }

    /// Record a successful attempt
    pub fn succeed(&mut self, rule: &Arc<str>) {
        self.tracer.add(rule, self.position, TraceReason::Success);
    }

    /// Record a failed attempt and backtrack to `restore_position`
    pub fn fail(&mut self, rule: &Arc<str>, restore_position: usize) {
        self.tracer.add(rule, self.position, TraceReason::Fail);
        self.position = restore_position;
    }

    /// Consume one character
    ///
    /// This is the only place the high-water mark moves.
    pub fn next(&mut self) -> Option<char> {
        let c = *self.input.get(self.position)?;
        self.farthest_position = self.farthest_position.max(self.position);
        self.position += 1;
        Some(c)
    }

    /// Move the cursor without tracing (predicates rewinding after success)
    #[inline]
    pub(crate) fn restore(&mut self, position: usize) {
        self.position = position;
    }

    /// Enter a nested rule attempt; `max_depth == 0` disables the guard
    pub(crate) fn enter(&mut self, max_depth: usize) -> Result<(), ParseError> {
        let depth = self.depth + 1;
        if max_depth > 0 && depth > max_depth {
            return Err(ParseError::RecursionLimitExceeded {
                depth,
                max_depth,
                trace: self.tracer.output(),
            });
        }
        self.depth = depth;
        Ok(())
    }

    /// Leave a nested rule attempt
    #[inline]
    pub(crate) fn exit(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Give up the state, keeping only the tracer
    pub fn into_tracer(self) -> Tracer {
        self.tracer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(text: &str) -> State {
        State::new(text.chars().collect::<Vec<_>>().into(), 16)
    }

    #[test]
    fn test_next_and_remaining() {
        let mut s = state("ab");
        assert_eq!(s.remaining(), 2);
        assert_eq!(s.next(), Some('a'));
        assert_eq!(s.next(), Some('b'));
        assert_eq!(s.next(), None);
        assert_eq!(s.remaining(), 0);
        assert_eq!(s.position(), 2);
    }

    #[test]
    fn test_farthest_tracks_examined_offset() {
        let mut s = state("abc");
        let name: Arc<str> = Arc::from("r");
        let start = s.begin(&name);
        s.next();
        s.next();
        assert_eq!(s.farthest_position(), 1);
        s.fail(&name, start);
        assert_eq!(s.position(), 0);
        assert_eq!(s.farthest_position(), 1);

        s.next();
        assert_eq!(s.farthest_position(), 1);
    }

    #[test]
    fn test_trace_events() {
        let mut s = state("x");
        let name: Arc<str> = Arc::from("x");
        s.begin(&name);
        s.next();
        s.succeed(&name);

        let trace = s.tracer().output();
        let reasons: Vec<TraceReason> = trace.elements().iter().map(|e| e.reason()).collect();
        assert_eq!(reasons, vec![TraceReason::Begin, TraceReason::Success]);
        assert_eq!(trace.elements()[1].position(), 1);
    }

    #[test]
    fn test_depth_guard() {
        let mut s = state("");
        assert!(s.enter(2).is_ok());
        assert!(s.enter(2).is_ok());
        let err = s.enter(2).unwrap_err();
        assert!(matches!(
            err,
            ParseError::RecursionLimitExceeded {
                depth: 3,
                max_depth: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_rejected_enter_leaves_depth_unchanged() {
        let mut s = state("");
        s.enter(1).unwrap();
        assert!(s.enter(1).is_err());
        assert_eq!(s.depth, 1);

        s.exit();
        assert_eq!(s.depth, 0);
        assert!(s.enter(1).is_ok());
    }

    #[test]
    fn test_depth_guard_disabled() {
        let mut s = state("");
        for _ in 0..10_000 {
            assert!(s.enter(0).is_ok());
        }
        s.exit();
    }
}

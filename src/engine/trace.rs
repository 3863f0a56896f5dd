//! Bounded parse tracing
//!
//! Every rule attempt records a `Begin` event and exactly one `Success` or
//! `Fail` event. The [`Tracer`] keeps only the most recent events in a
//! fixed-capacity ring while counting every event it was ever given, so it
//! stays cheap on long inputs and still shows what happened last when a
//! parse is aborted.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Why a trace event was recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TraceReason {
    /// A rule attempt started
    Begin,
    /// A rule attempt matched
    Success,
    /// A rule attempt did not match
    Fail,
}

impl TraceReason {
    /// Upper-case label used in printed traces
    pub fn label(&self) -> &'static str {
        match self {
            TraceReason::Begin => "BEGIN",
            TraceReason::Success => "SUCCESS",
            TraceReason::Fail => "FAIL",
        }
    }
}

impl fmt::Display for TraceReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single recorded event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceElement {
    rule: Arc<str>,
    position: usize,
    reason: TraceReason,
}

impl TraceElement {
    /// Create an event
    pub fn new(rule: Arc<str>, position: usize, reason: TraceReason) -> Self {
        Self {
            rule,
            position,
            reason,
        }
    }

    /// Name of the rule the event belongs to
    #[inline]
    pub fn rule(&self) -> &str {
        &self.rule
    }

    /// Cursor position when the event was recorded
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Event kind
    #[inline]
    pub fn reason(&self) -> TraceReason {
        self.reason
    }
}

/// Fixed-capacity ring buffer of trace events
#[derive(Debug, Clone)]
pub struct Tracer {
    capacity: usize,
    /// Ring storage; grows up to `capacity`, then overwrites in place
    entries: Vec<TraceElement>,
    /// Slot the next event is written to once the ring is full
    next_slot: usize,
    total: usize,
}

impl Tracer {
    /// Create a tracer that keeps at most `capacity` events
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::with_capacity(capacity.min(4096)),
            next_slot: 0,
            total: 0,
        }
    }

    /// Maximum number of events kept
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of events ever added, including evicted ones
    #[inline]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Record an event, evicting the oldest one when full
    pub fn add(&mut self, rule: &Arc<str>, position: usize, reason: TraceReason) {
        self.total += 1;

        if self.capacity == 0 {
            return;
        }

        let element = TraceElement::new(Arc::clone(rule), position, reason);
        if self.entries.len() < self.capacity {
            self.entries.push(element);
        } else {
            self.entries[self.next_slot] = element;
            self.next_slot = (self.next_slot + 1) % self.capacity;
        }
    }

    /// Snapshot the kept events, oldest first
    pub fn output(&self) -> Trace {
        let mut elements = Vec::with_capacity(self.entries.len());
        if self.entries.len() < self.capacity {
            elements.extend(self.entries.iter().cloned());
        } else {
            elements.extend(self.entries[self.next_slot..].iter().cloned());
            elements.extend(self.entries[..self.next_slot].iter().cloned());
        }
        Trace {
            elements,
            total: self.total,
        }
    }
}

/// Immutable snapshot of a [`Tracer`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    elements: Vec<TraceElement>,
    total: usize,
}

impl Trace {
    /// Kept events, oldest first
    #[inline]
    pub fn elements(&self) -> &[TraceElement] {
        &self.elements
    }

    /// Number of events recorded over the whole attempt
    #[inline]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Most recent event, if any was kept
    #[inline]
    pub fn last(&self) -> Option<&TraceElement> {
        self.elements.last()
    }

    /// Whether no events were kept
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Tracer Records ({} of {}) (Most Recent Call Last):",
            self.elements.len(),
            self.total
        )?;
        for (i, element) in self.elements.iter().enumerate() {
            writeln!(
                f,
                "    [{}] {} => {} @ {}",
                i, element.rule, element.reason, element.position
            )?;
        }
        Ok(())
    }
}

//! Event types and sinks for observing entrainment selection.
//!
//! This module defines [`EntrainmentEvent`] and a set of sinks and adapters to emit,
//! collect, or forward events while selecting particles via
//! [`crate::entrainment::selector::EntrainmentSelector::select_with_events`].
use crate::bed::Uid;
use crate::entrainment::selector::{SelectionConfig, SelectionResult};

/// Describes events emitted during selection.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum EntrainmentEvent {
    /// Emitted when a selection pass starts.
    SelectionStarted {
        /// The configuration used.
        config: SelectionConfig,
        /// Number of subregions considered.
        subregion_count: usize,
        /// Number of rows in the particle table.
        particle_count: usize,
    },

    /// Emitted after the ghost pass.
    GhostsCollected {
        /// Uids of ghost particles, in table order.
        uids: Vec<Uid>,
    },

    /// Emitted after each subregion has been sampled.
    SubregionSelected {
        /// Index of the subregion in the sequence.
        index: usize,
        /// Subregion name.
        name: String,
        /// Particles that passed the active and eligibility filters.
        eligible: usize,
        /// Uids drawn from this subregion.
        uids: Vec<Uid>,
    },

    /// A subregion supplied fewer eligible particles than requested. Non-fatal.
    Shortfall {
        /// Index of the subregion in the sequence.
        index: usize,
        /// Subregion name.
        name: String,
        /// Requested entrainment events.
        requested: usize,
        /// Eligible particles available.
        available: usize,
    },

    /// Emitted when the selection pass finishes.
    SelectionFinished {
        /// Aggregated result.
        result: SelectionResult,
    },
}

/// Discriminant of [`EntrainmentEvent`], used by sinks to opt out of event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntrainmentEventKind {
    SelectionStarted,
    GhostsCollected,
    SubregionSelected,
    Shortfall,
    SelectionFinished,
}

impl EntrainmentEvent {
    pub fn kind(&self) -> EntrainmentEventKind {
        match self {
            EntrainmentEvent::SelectionStarted { .. } => EntrainmentEventKind::SelectionStarted,
            EntrainmentEvent::GhostsCollected { .. } => EntrainmentEventKind::GhostsCollected,
            EntrainmentEvent::SubregionSelected { .. } => EntrainmentEventKind::SubregionSelected,
            EntrainmentEvent::Shortfall { .. } => EntrainmentEventKind::Shortfall,
            EntrainmentEvent::SelectionFinished { .. } => EntrainmentEventKind::SelectionFinished,
        }
    }
}

/// A generic event sink that accepts [`EntrainmentEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: EntrainmentEvent);

    /// Whether events of `kind` should be built at all.
    #[inline]
    fn wants(&self, _kind: EntrainmentEventKind) -> bool {
        true
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: EntrainmentEvent) {}

    #[inline]
    fn wants(&self, _kind: EntrainmentEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(EntrainmentEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(EntrainmentEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(EntrainmentEvent),
{
    #[inline]
    fn send(&mut self, event: EntrainmentEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects all events in a `Vec`.
#[derive(Default)]
pub struct VecSink {
    events: Vec<EntrainmentEvent>,
}

impl VecSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn into_inner(self) -> Vec<EntrainmentEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[EntrainmentEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Shortfall events collected so far.
    pub fn shortfalls(&self) -> impl Iterator<Item = &EntrainmentEvent> {
        self.events
            .iter()
            .filter(|e| e.kind() == EntrainmentEventKind::Shortfall)
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: EntrainmentEvent) {
        self.events.push(event);
    }
}

/// Fan-out sink that forwards each event to all contained sinks.
pub struct MultiSink<S: EventSink> {
    pub(crate) sinks: Vec<S>,
}

impl<S: EventSink> MultiSink<S> {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn with_sinks(sinks: Vec<S>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: S) {
        self.sinks.push(sink);
    }

    pub fn into_inner(self) -> Vec<S> {
        self.sinks
    }
}

impl<S: EventSink> Default for MultiSink<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EventSink> EventSink for MultiSink<S> {
    fn send(&mut self, event: EntrainmentEvent) {
        let Some(last_idx) = self.sinks.len().checked_sub(1) else {
            return;
        };
        let kind = event.kind();
        for i in 0..last_idx {
            if self.sinks[i].wants(kind) {
                self.sinks[i].send(event.clone());
            }
        }
        if self.sinks[last_idx].wants(kind) {
            self.sinks[last_idx].send(event);
        }
    }

    fn wants(&self, kind: EntrainmentEventKind) -> bool {
        self.sinks.iter().any(|s| s.wants(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shortfall(name: &str) -> EntrainmentEvent {
        EntrainmentEvent::Shortfall {
            index: 0,
            name: name.into(),
            requested: 3,
            available: 1,
        }
    }

    #[test]
    fn vec_sink_collects_events() {
        let mut sink = VecSink::new();
        assert!(sink.is_empty());
        sink.send(shortfall("a"));
        sink.send(EntrainmentEvent::GhostsCollected { uids: vec![1] });
        assert_eq!(sink.len(), 2);
        assert_eq!(sink.shortfalls().count(), 1);
    }

    #[test]
    fn unit_sink_wants_nothing() {
        assert!(!().wants(EntrainmentEventKind::Shortfall));
    }

    #[test]
    fn multi_sink_fans_out_events() {
        let mut multi = MultiSink::with_sinks(vec![VecSink::new(), VecSink::new()]);
        multi.send(shortfall("ctx"));
        let sinks = multi.into_inner();
        assert_eq!(sinks[0].len(), 1);
        assert_eq!(sinks[1].len(), 1);
        assert!(matches!(
            sinks[1].as_slice()[0],
            EntrainmentEvent::Shortfall { available: 1, .. }
        ));
    }

    #[test]
    fn fn_sink_invokes_callback() {
        let mut count = 0;
        let mut sink = FnSink::new(|_event| {
            count += 1;
        });
        sink.send(shortfall("ctx"));
        drop(sink);
        assert_eq!(count, 1);
    }
}

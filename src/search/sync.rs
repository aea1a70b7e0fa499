//! Result synchronization
//!
//! Owns the pins and carousel cards derived from the latest search and keeps
//! them in lock-step: both are rebuilt from the same result sequence, in the
//! same order, or not at all.

use crate::geo::{LocatedItem, Region};
use crate::search::annotation::{Annotation, ListEntry};
use crate::search::session::{Generation, SearchSession};
use crate::search::surface::{ListSurface, MapSurface};
use tracing::debug;

/// What happened to a completed session's results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Results replaced the current pins and cards
    Applied,
    /// A newer session was issued first; nothing changed
    Stale,
}

/// Canonical owner of search-derived presentation state
#[derive(Debug, Default)]
pub struct ResultSynchronizer {
    latest: Generation,
    active: Option<Generation>,
    annotations: Vec<Annotation>,
    entries: Vec<ListEntry>,
}

impl ResultSynchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new session, superseding every session issued before it
    pub fn issue(&mut self, query: impl Into<String>, region: Option<Region>) -> SearchSession {
        self.latest = self.latest.next();
        let session = SearchSession {
            query: query.into(),
            region,
            generation: self.latest,
        };
        debug!(generation = %session.generation, query = %session.query, "issued search session");
        session
    }

    /// Whether `session` is the newest one issued
    pub fn is_current(&self, session: &SearchSession) -> bool {
        session.generation == self.latest
    }

    /// Replace pins and cards with `items`, unless `session` has been superseded
    pub fn apply_session_result(
        &mut self,
        session: &SearchSession,
        items: Vec<LocatedItem>,
    ) -> ApplyOutcome {
        if !self.is_current(session) {
            debug!(
                generation = %session.generation,
                latest = %self.latest,
                "discarding stale search results"
            );
            return ApplyOutcome::Stale;
        }

        self.entries = items
            .iter()
            .cloned()
            .enumerate()
            .map(|(position, item)| ListEntry { position, item })
            .collect();
        self.annotations = items.into_iter().map(Annotation::Place).collect();
        self.active = Some(session.generation);

        debug!(
            generation = %session.generation,
            count = self.entries.len(),
            "applied search results"
        );
        ApplyOutcome::Applied
    }

    /// Remove all results and supersede any pending session
    pub fn clear(&mut self) -> SearchSession {
        let session = self.issue("", None);
        self.apply_session_result(&session, Vec::new());
        session
    }

    /// Push the current state to both surfaces
    pub fn publish<M: MapSurface, L: ListSurface>(&self, map: &mut M, list: &mut L) {
        map.replace_annotations(&self.annotations);
        list.replace_items(&self.entries);
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn entries(&self) -> &[ListEntry] {
        &self.entries
    }

    pub fn latest_generation(&self) -> Generation {
        self.latest
    }

    /// Generation whose results are currently shown
    pub fn active_generation(&self) -> Option<Generation> {
        self.active
    }

    /// Carousel index of the first card with this name
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|entry| entry.item.name == name)
            .map(|entry| entry.position)
    }

    /// First place pin with this name
    pub fn annotation_named(&self, name: &str) -> Option<&Annotation> {
        self.annotations
            .iter()
            .find(|annotation| annotation.place().is_some_and(|p| p.name == name))
    }
}

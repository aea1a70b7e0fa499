//! Presentation surfaces driven by the search workflow
//!
//! The workflow owns the canonical state and pushes read-only snapshots to
//! these surfaces. Surfaces never hand state back except through events.

use crate::route::Route;
use crate::search::annotation::{Annotation, ListEntry};

/// Where a scrolled-to carousel item should end up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAlignment {
    CenteredHorizontally,
    Leading,
}

/// A map showing pins and route overlays
pub trait MapSurface {
    /// Replace every pin on the map
    fn replace_annotations(&mut self, annotations: &[Annotation]);

    /// Highlight one pin
    fn select_annotation(&mut self, annotation: &Annotation);

    /// Draw route polylines on top of the map
    fn add_overlays(&mut self, routes: &[Route]);
}

/// An ordered, index-addressable carousel
pub trait ListSurface {
    /// Replace the full item sequence
    fn replace_items(&mut self, entries: &[ListEntry]);

    /// Bring the item at `index` into view
    fn scroll_to(&mut self, index: usize, alignment: ScrollAlignment, animated: bool);
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Map surface that records what it was told
    #[derive(Debug, Default)]
    pub struct RecordingMap {
        pub annotations: Vec<Annotation>,
        pub selected: Option<Annotation>,
        pub overlays: Vec<Route>,
        pub replace_calls: usize,
    }

    impl MapSurface for RecordingMap {
        fn replace_annotations(&mut self, annotations: &[Annotation]) {
            self.annotations = annotations.to_vec();
            self.replace_calls += 1;
        }

        fn select_annotation(&mut self, annotation: &Annotation) {
            self.selected = Some(annotation.clone());
        }

        fn add_overlays(&mut self, routes: &[Route]) {
            self.overlays.extend_from_slice(routes);
        }
    }

    /// List surface that records what it was told
    #[derive(Debug, Default)]
    pub struct RecordingList {
        pub entries: Vec<ListEntry>,
        pub scrolled_to: Option<(usize, ScrollAlignment, bool)>,
        pub replace_calls: usize,
    }

    impl ListSurface for RecordingList {
        fn replace_items(&mut self, entries: &[ListEntry]) {
            self.entries = entries.to_vec();
            self.replace_calls += 1;
        }

        fn scroll_to(&mut self, index: usize, alignment: ScrollAlignment, animated: bool) {
            self.scrolled_to = Some((index, alignment, animated));
        }
    }
}

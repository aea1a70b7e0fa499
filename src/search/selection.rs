//! Selection bridge between the map and the carousel
//!
//! Pins and cards are joined by place name. Names are not guaranteed unique;
//! with duplicates the first match wins.

use crate::search::annotation::Annotation;
use crate::search::surface::{ListSurface, MapSurface, ScrollAlignment};
use crate::search::sync::ResultSynchronizer;

/// A pin was tapped: scroll the carousel to the matching card
///
/// Returns the card index, or `None` when there is nothing to scroll to
/// (plain pins, or a pin from results that are no longer shown).
pub fn on_annotation_selected<L: ListSurface>(
    sync: &ResultSynchronizer,
    annotation: &Annotation,
    list: &mut L,
) -> Option<usize> {
    let place = annotation.place()?;
    let index = sync.position_of(&place.name)?;
    list.scroll_to(index, ScrollAlignment::CenteredHorizontally, true);
    Some(index)
}

/// A card was tapped: highlight the matching pin
pub fn on_list_entry_selected<M: MapSurface>(
    sync: &ResultSynchronizer,
    index: usize,
    map: &mut M,
) -> Option<Annotation> {
    let entry = sync.entries().get(index)?;
    let annotation = sync.annotation_named(&entry.item.name)?;
    map.select_annotation(annotation);
    Some(annotation.clone())
}

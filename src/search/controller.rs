//! Search workflow controller
//!
//! The single logical owner of search state. Settled queries start gateway
//! calls on the runtime; their completions come back over a channel and are
//! applied here, so state is only ever touched from the controller's task.

use crate::error::Result;
use crate::geo::{LocatedItem, Region, SearchGateway};
use crate::search::annotation::Annotation;
use crate::search::selection;
use crate::search::session::SearchSession;
use crate::search::surface::{ListSurface, MapSurface};
use crate::search::sync::{ApplyOutcome, ResultSynchronizer};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tracing::{debug, warn};

/// A finished gateway call, tagged with the session that started it
#[derive(Debug)]
pub struct SearchCompletion {
    pub session: SearchSession,
    pub result: Result<Vec<LocatedItem>>,
}

/// What a completion did to the shown results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Results were shown; carries the result count
    Applied(usize),
    /// Superseded by a newer session
    Stale,
    /// The gateway failed; previous results stay visible
    Failed,
}

/// User interaction forwarded from the surfaces
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    AnnotationTapped(Annotation),
    ItemTapped(usize),
}

/// Drives search sessions and keeps the map and carousel in sync
pub struct SearchController<G, M, L> {
    gateway: Arc<G>,
    region: Option<Region>,
    sync: ResultSynchronizer,
    map: M,
    list: L,
    in_flight: Option<AbortHandle>,
    completions_tx: mpsc::UnboundedSender<SearchCompletion>,
    completions_rx: mpsc::UnboundedReceiver<SearchCompletion>,
}

impl<G, M, L> SearchController<G, M, L>
where
    G: SearchGateway + 'static,
    M: MapSurface,
    L: ListSurface,
{
    pub fn new(gateway: Arc<G>, map: M, list: L) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            gateway,
            region: None,
            sync: ResultSynchronizer::new(),
            map,
            list,
            in_flight: None,
            completions_tx,
            completions_rx,
        }
    }

    /// Bias subsequent searches to a viewport
    pub fn with_region(mut self, region: Option<Region>) -> Self {
        self.region = region;
        self
    }

    pub fn synchronizer(&self) -> &ResultSynchronizer {
        &self.sync
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn list(&self) -> &L {
        &self.list
    }

    /// Whether a gateway call is still outstanding
    pub fn is_searching(&self) -> bool {
        self.in_flight.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Start a session for a settled query
    ///
    /// Any earlier session is superseded and its gateway call aborted.
    /// A blank query clears the results immediately.
    pub fn submit(&mut self, query: impl Into<String>) -> SearchSession {
        self.cancel_in_flight();
        let session = self.sync.issue(query, self.region);

        if session.is_clear() {
            self.sync.apply_session_result(&session, Vec::new());
            self.sync.publish(&mut self.map, &mut self.list);
            return session;
        }

        let gateway = Arc::clone(&self.gateway);
        let tx = self.completions_tx.clone();
        let task_session = session.clone();
        let handle = tokio::spawn(async move {
            let result = gateway
                .search(&task_session.query, task_session.region)
                .await;
            // Send fails only once the controller is gone
            let _ = tx.send(SearchCompletion {
                session: task_session,
                result,
            });
        });
        self.in_flight = Some(handle.abort_handle());

        session
    }

    /// Apply a completed gateway call
    pub fn handle_completion(&mut self, completion: SearchCompletion) -> SessionOutcome {
        let SearchCompletion { session, result } = completion;

        if !self.sync.is_current(&session) {
            debug!(generation = %session.generation, "ignoring superseded completion");
            return SessionOutcome::Stale;
        }
        self.in_flight = None;

        match result {
            Ok(items) => {
                let count = items.len();
                match self.sync.apply_session_result(&session, items) {
                    ApplyOutcome::Applied => {
                        self.sync.publish(&mut self.map, &mut self.list);
                        SessionOutcome::Applied(count)
                    }
                    ApplyOutcome::Stale => SessionOutcome::Stale,
                }
            }
            Err(e) => {
                warn!(
                    generation = %session.generation,
                    query = %session.query,
                    error = %e,
                    "search failed; keeping current results"
                );
                SessionOutcome::Failed
            }
        }
    }

    /// Wait for the next gateway completion
    pub async fn next_completion(&mut self) -> Option<SearchCompletion> {
        self.completions_rx.recv().await
    }

    /// A pin was tapped
    pub fn select_annotation(&mut self, annotation: &Annotation) -> Option<usize> {
        selection::on_annotation_selected(&self.sync, annotation, &mut self.list)
    }

    /// A carousel card was tapped
    pub fn select_item(&mut self, index: usize) -> Option<Annotation> {
        selection::on_list_entry_selected(&self.sync, index, &mut self.map)
    }

    pub fn handle_ui_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::AnnotationTapped(annotation) => {
                self.select_annotation(&annotation);
            }
            UiEvent::ItemTapped(index) => {
                self.select_item(index);
            }
        }
    }

    /// Event loop: settled queries, UI taps, and gateway completions
    ///
    /// Returns the surfaces once the settled channel has closed and the last
    /// search has finished.
    pub async fn run(
        mut self,
        mut settled: mpsc::Receiver<String>,
        mut ui: mpsc::Receiver<UiEvent>,
    ) -> (M, L) {
        let mut settled_open = true;

        while settled_open || self.is_searching() {
            tokio::select! {
                query = settled.recv(), if settled_open => match query {
                    Some(query) => {
                        self.submit(query);
                    }
                    None => settled_open = false,
                },
                Some(event) = ui.recv() => self.handle_ui_event(event),
                Some(completion) = self.completions_rx.recv() => {
                    self.handle_completion(completion);
                }
                else => break,
            }
        }

        // A call can finish between the loop check and here
        while let Ok(completion) = self.completions_rx.try_recv() {
            self.handle_completion(completion);
        }

        (self.map, self.list)
    }

    fn cancel_in_flight(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}

//! Search-to-map workflow
//!
//! Turns settled free-text queries into pins and carousel cards, keeps the
//! two in step across out-of-order gateway completions, and mirrors
//! selection between them.
//!
//! ```text
//! keystrokes -> debounce -> controller -> gateway (async)
//!                               |
//!                               v
//!                  ResultSynchronizer -> map / carousel
//!                               ^
//!                   selection --+
//! ```

pub mod annotation;
pub mod controller;
pub mod debounce;
pub mod selection;
pub mod session;
pub mod surface;
pub mod sync;

pub use annotation::{Annotation, ListEntry};
pub use controller::{SearchCompletion, SearchController, SessionOutcome, UiEvent};
pub use debounce::Debouncer;
pub use session::{Generation, SearchSession};
pub use surface::{ListSurface, MapSurface, ScrollAlignment};
pub use sync::{ApplyOutcome, ResultSynchronizer};

//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! Two patterns live here:
//!
//! - **Stateless components** receive all data as props and just draw
//!   (the poster tiles inside the grid).
//! - **Stateful components** manage local state and emit high-level
//!   events: `SearchBox` (the filter input) and `GridState` (scroll
//!   offset, layout measurements for the scroll monitor).
//!
//! Each component file is self-contained: state types, event types,
//! rendering, event handling, and tests all in one place.

pub mod grid;
pub mod search_box;

pub use grid::{GridState, PosterGrid};
pub use search_box::{SearchBox, SearchEvent};

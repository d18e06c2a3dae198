//! Sheet composition: layout planning plus canvas drawing.
//!
//! `layout` is the pure core — a single prefix-sum pass that turns a list of
//! image dimensions into canvas dimensions and per-image region descriptors.
//! `compose` allocates the canvas and draws every image at its planned
//! offset; both the drawing and the emitted descriptors come from the same
//! planned slot table, so image and metadata cannot drift apart.

pub mod compose;
pub mod layout;

pub use compose::{compose, Sheet};
pub use layout::{plan_layout, LayoutDescriptor, SheetLayout};

//! Box-tree redraw pass for the Lumen HTML renderer.
//!
//! Given a laid-out [`Document`], [`redraw`] emits the plot calls that
//! reconstruct the visible page for one clip rectangle at one scale:
//! backgrounds (including the root/body canvas rule), borders, inline runs
//! that wrap across lines, text with selection and search highlighting,
//! decorations, form controls, scrollbars and embedded objects.
//!
//! The pass draws through the [`Plotter`](lumen_types::plotter::Plotter)
//! trait and reaches fonts, images and highlights through the
//! collaborator traits in [`collab`]. [`record`] provides recording
//! implementations for tests and tooling.

pub mod background;
pub mod border;
pub mod boxes;
pub mod collab;
pub mod decoration;
pub mod form;
pub mod geometry;
pub mod inline_run;
pub mod print;
pub mod record;
pub mod redraw;
pub mod scrollbar;
pub mod style;
pub mod text;

#[cfg(test)]
pub(crate) mod test_utils;

// -----------------------------------------------------------------------
// Public re-exports
// -----------------------------------------------------------------------

pub use boxes::{BoxId, BoxNode, BoxTree, BoxType, Document};
pub use collab::{Caret, ContentDelegate, FontMetrics, HighlightProvider};
pub use print::PrintSession;
pub use redraw::{RedrawContext, redraw, redraw_box};
pub use style::BoxStyle;

//! Foundation types and traits for the Lumen redraw engine.
//!
//! This crate holds the pieces shared by the redraw core and the surfaces it
//! paints onto: colours and shade arithmetic, device-space geometry, the
//! [`plotter::Plotter`] trait, the theme/options configuration and the error
//! type.

pub mod color;
pub mod config;
pub mod error;
pub mod geom;
pub mod plotter;

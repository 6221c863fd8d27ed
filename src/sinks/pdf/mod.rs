//! PDF output.
//!
//! Recipes are laid out into an in-memory [`layout::DocumentLayout`] by the
//! [`rendering`] module and only then written out with `printpdf`.

mod config;
pub use config::*;

pub mod fonts;
mod helvetica;
mod layout;
mod rendering;
mod writer;

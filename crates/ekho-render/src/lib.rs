//! ekho-render
//!
//! Pure markup generation: canonical report + theme configuration in,
//! HTML out. Deterministic except for the single `generated_at`
//! substitution point supplied by the caller.

pub mod error;
pub mod render;
pub mod theme;

pub use render::{render, Branding};
pub use theme::{classify, Theme};

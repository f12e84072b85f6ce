//! Publication-quality styling on top of a plotting backend.
//!
//! Styles are named [presets][preset::Preset] layered over a `basic`
//! baseline. Each has a global part (rc params and palette, applied with
//! [`Session::set_style`][session::Session::set_style] before drawing) and a
//! post-draw part (spines, ticks, label padding, draggability, applied to an
//! axes with [`Session::fix_style`][session::Session::fix_style]). The
//! [`cycle`] module peeks at and rewinds an axes' automatic color cycle.
//!
//! Backends implement the traits in [`backend`]; [`memory::MemoryBackend`]
//! is a retained in-memory implementation, and with the `plotting` feature
//! [`plotdefs`] renders styles as matplotlib commands.

pub mod error;
pub mod colors;
pub mod style;
pub mod preset;
pub mod backend;
pub mod fixups;
pub mod cycle;
pub mod fonts;
pub mod memory;
pub mod session;
pub mod telemetry;

#[cfg(feature = "config")]
pub mod config;

#[cfg(feature = "plotting")]
pub mod plotdefs;

pub use error::{ StyleError, StyleResult };
pub use session::Session;

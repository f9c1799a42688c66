// SPDX-License-Identifier: MPL-2.0
//! Avatar loading with bounded retry and a fallback glyph.
//!
//! The module is split into a pure state machine ([`loader`]) that owns the
//! retry/epoch bookkeeping, an async driver ([`component`]) that turns its
//! effects into Iced tasks, and the collaborators both delegate to: locator
//! derivation, the fetch primitive, the decoded-avatar cache, and the
//! image-or-glyph view.

pub mod cache;
pub mod component;
pub mod fallback;
pub mod fetch;
pub mod loader;
pub mod source;
pub mod widget;

pub use component::State;
pub use source::SourceLocator;

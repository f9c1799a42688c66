// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::avatar::component;

/// Startup values parsed from the command line by `main.rs`.
#[derive(Debug, Clone, Default)]
pub struct Flags {
    /// Identity token to load immediately.
    pub face_id: Option<String>,
    /// Display name for the label and fallback glyph.
    pub nick_name: Option<String>,
    /// Rendered avatar size in logical pixels.
    pub size: Option<u16>,
}

/// Top-level messages consumed by `App::update`. The `Avatar` variant
/// forwards component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Avatar(component::Message),
    /// The identity-token input changed.
    FaceIdInput(String),
    /// The display-name input changed.
    NickNameInput(String),
    /// The identity token was submitted (enter key or button).
    FaceIdSubmitted,
}

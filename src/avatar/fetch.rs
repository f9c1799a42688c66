// SPDX-License-Identifier: MPL-2.0
//! Image fetch primitive.
//!
//! One HTTP GET per call, no retry or backoff of its own; the retry policy
//! lives entirely in [`crate::avatar::loader`].

use crate::avatar::source::SourceLocator;
use crate::error::FetchError;
use iced::widget::image::Handle;

/// Upper bound on accepted avatar body size.
const MAX_AVATAR_BYTES: u64 = 4 * 1024 * 1024;

const USER_AGENT: &str = concat!("AvatarLens/", env!("CARGO_PKG_VERSION"));

/// A decoded avatar ready for display.
#[derive(Debug, Clone)]
pub struct FetchedAvatar {
    /// RGBA handle consumable by the `iced` image widget.
    pub handle: Handle,
    /// Pixel width of the decoded image.
    pub width: u32,
    /// Pixel height of the decoded image.
    pub height: u32,
}

/// Fetches and decodes the avatar behind `locator`.
///
/// # Errors
///
/// Returns an error if the request fails, the server answers with a
/// non-success status, the body exceeds the size cap, or the body is not a
/// decodable image. All causes count identically against the caller's retry
/// budget.
pub async fn fetch_avatar(locator: SourceLocator) -> Result<FetchedAvatar, FetchError> {
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::limited(10))
        .user_agent(USER_AGENT)
        .build()?;

    let response = client.get(locator.as_str()).send().await?;

    if !response.status().is_success() {
        return Err(FetchError::Http(response.status().as_u16()));
    }

    if let Some(length) = response.content_length() {
        if length > MAX_AVATAR_BYTES {
            return Err(FetchError::TooLarge(length));
        }
    }

    let bytes = response.bytes().await?;
    if bytes.len() as u64 > MAX_AVATAR_BYTES {
        return Err(FetchError::TooLarge(bytes.len() as u64));
    }

    // Decoding is CPU-bound; keep it off the async executor.
    tokio::task::spawn_blocking(move || decode_rgba(&bytes))
        .await
        .map_err(|e| FetchError::Decode(e.to_string()))?
}

/// Decodes raw image bytes into an RGBA widget handle.
fn decode_rgba(bytes: &[u8]) -> Result<FetchedAvatar, FetchError> {
    let image = image_rs::load_from_memory(bytes)?;
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(FetchedAvatar {
        handle: Handle::from_rgba(width, height, rgba.into_raw()),
        width,
        height,
    })
}

// SPDX-License-Identifier: MPL-2.0
//! Decoded-avatar cache.
//!
//! The derived locator carries no cache-busting parameter, so repeated loads
//! of one identity token may legitimately be served without a network round
//! trip. This cache keeps recently decoded avatars keyed by identity token,
//! LRU-evicted and entry-count bounded.

use crate::avatar::fetch::FetchedAvatar;
use lru::LruCache;
use std::num::NonZeroUsize;

/// In-memory LRU cache of decoded avatars, keyed by identity token.
pub struct AvatarCache {
    entries: LruCache<String, FetchedAvatar>,
}

impl std::fmt::Debug for AvatarCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AvatarCache")
            .field("entry_count", &self.entries.len())
            .field("capacity", &self.entries.cap())
            .finish()
    }
}

impl AvatarCache {
    /// Creates a cache holding at most `capacity` avatars (minimum 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
        }
    }

    /// Looks up the avatar for `face_id`, refreshing its recency.
    pub fn get(&mut self, face_id: &str) -> Option<FetchedAvatar> {
        self.entries.get(face_id).cloned()
    }

    /// Stores the avatar for `face_id`, evicting the least recently used
    /// entry when full.
    pub fn insert(&mut self, face_id: String, avatar: FetchedAvatar) {
        self.entries.put(face_id, avatar);
    }

    /// Number of cached avatars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops all cached avatars.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

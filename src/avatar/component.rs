// SPDX-License-Identifier: MPL-2.0
//! Avatar component encapsulating retry state and async loading.
//!
//! Drives the pure machine in [`crate::avatar::loader`]: effects become Iced
//! tasks (a fetch, or a delayed retry message), and every task completion is
//! tagged with the epoch it was issued under so the machine can discard
//! stale deliveries. Decoded avatars are cached by identity token; a cache
//! hit resolves synchronously without touching the network.

use crate::avatar::cache::AvatarCache;
use crate::avatar::fallback;
use crate::avatar::fetch::{self, FetchedAvatar};
use crate::avatar::loader::{self, Phase};
use crate::avatar::widget;
use crate::config;
use crate::error::FetchError;
use iced::{Element, Task};

/// Avatar component state.
#[derive(Debug)]
pub struct State {
    machine: loader::State,
    nick_name: String,
    size: u16,
    /// Decoded avatar for the currently resolved epoch.
    avatar: Option<FetchedAvatar>,
    cache: AvatarCache,
}

/// Messages consumed by the avatar component.
#[derive(Debug, Clone)]
pub enum Message {
    /// A new identity token was observed.
    FaceIdChanged(String),
    /// A fetch issued under `epoch` completed.
    FetchCompleted {
        epoch: u64,
        face_id: String,
        result: Result<FetchedAvatar, FetchError>,
    },
    /// The retry timer scheduled under `epoch` fired.
    RetryElapsed { epoch: u64 },
}

impl Default for State {
    fn default() -> Self {
        Self::new(
            config::DEFAULT_URL_TEMPLATE,
            String::new(),
            config::DEFAULT_AVATAR_SIZE,
            config::DEFAULT_CACHE_ENTRIES,
        )
    }
}

impl State {
    /// Creates a component deriving locators from `template`.
    #[must_use]
    pub fn new(
        template: impl Into<String>,
        nick_name: impl Into<String>,
        size: u16,
        cache_entries: usize,
    ) -> Self {
        Self {
            machine: loader::State::new(template),
            nick_name: nick_name.into(),
            size,
            avatar: None,
            cache: AvatarCache::new(cache_entries),
        }
    }

    /// Handles a component message and returns the follow-up task.
    pub fn handle_message(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::FaceIdChanged(face_id) => {
                let effect = self.machine.handle(loader::Message::FaceIdChanged(face_id));
                self.run_effect(effect)
            }
            Message::FetchCompleted {
                epoch,
                face_id,
                result,
            } => match result {
                Ok(avatar) => {
                    self.machine
                        .handle(loader::Message::FetchSucceeded { epoch });
                    // A stale success is discarded entirely, cache included:
                    // only the active epoch may populate component state.
                    if epoch == self.machine.epoch() {
                        self.cache.insert(face_id, avatar.clone());
                        self.avatar = Some(avatar);
                    }
                    Task::none()
                }
                Err(_) => {
                    let effect = self.machine.handle(loader::Message::FetchFailed { epoch });
                    self.run_effect(effect)
                }
            },
            Message::RetryElapsed { epoch } => {
                let effect = self.machine.handle(loader::Message::RetryElapsed { epoch });
                self.run_effect(effect)
            }
        }
    }

    fn run_effect(&mut self, effect: loader::Effect) -> Task<Message> {
        match effect {
            loader::Effect::None => Task::none(),
            loader::Effect::StartFetch { epoch, locator } => {
                self.avatar = None;
                let Some(face_id) = self.machine.face_id().map(str::to_string) else {
                    return Task::none();
                };

                if let Some(cached) = self.cache.get(&face_id) {
                    self.machine
                        .handle(loader::Message::FetchSucceeded { epoch });
                    self.avatar = Some(cached);
                    Task::none()
                } else {
                    Task::perform(fetch::fetch_avatar(locator), move |result| {
                        Message::FetchCompleted {
                            epoch,
                            face_id: face_id.clone(),
                            result,
                        }
                    })
                }
            }
            loader::Effect::ScheduleRetry { epoch, delay } => {
                Task::perform(tokio::time::sleep(delay), move |()| Message::RetryElapsed {
                    epoch,
                })
            }
        }
    }

    /// Renders the avatar: the image when resolved, the fallback glyph
    /// otherwise. The display name doubles as the accessible label.
    pub fn view(&self) -> Element<'_, Message> {
        match &self.avatar {
            Some(avatar) if self.machine.resolved().is_some() && !self.machine.has_failed() => {
                widget::avatar_image(&avatar.handle, self.size, &self.nick_name)
            }
            _ => widget::fallback_glyph(fallback::glyph(&self.nick_name), self.size),
        }
    }

    /// Updates the display name used for the label and fallback glyph.
    pub fn set_nick_name(&mut self, nick_name: impl Into<String>) {
        self.nick_name = nick_name.into();
    }

    /// Updates the rendered size.
    pub fn set_size(&mut self, size: u16) {
        self.size = size.clamp(config::MIN_AVATAR_SIZE, config::MAX_AVATAR_SIZE);
    }

    /// Tears the component down: pending completions and timers of the
    /// current epoch become no-ops.
    pub fn detach(&mut self) {
        self.machine.detach();
        self.avatar = None;
    }

    /// Current loading phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.machine.phase()
    }

    /// Whether a decoded avatar is available for display.
    #[must_use]
    pub fn has_avatar(&self) -> bool {
        self.avatar.is_some()
    }

    /// Current display name.
    #[must_use]
    pub fn nick_name(&self) -> &str {
        &self.nick_name
    }

    /// Current rendered size.
    #[must_use]
    pub fn size(&self) -> u16 {
        self.size
    }
}

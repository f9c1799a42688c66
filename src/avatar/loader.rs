// SPDX-License-Identifier: MPL-2.0
//! Pure retry state machine for avatar loading.
//!
//! Each accepted identity token opens a new *epoch*. All asynchronous
//! completions (fetch success, fetch failure, retry-timer fire) carry the
//! epoch they were issued under; an event whose epoch is no longer current is
//! silently discarded. Within one epoch the machine moves
//! `Idle → Loading → {Resolved | Failed}`, re-entering `Loading` up to
//! [`MAX_RETRIES`] times before settling into `Failed`.
//!
//! The machine performs no I/O itself. [`State::handle`] returns an
//! [`Effect`] telling the surrounding driver what to do next, which keeps
//! every transition testable with an explicit event sequence.

use crate::avatar::source::SourceLocator;
use std::time::Duration;

/// Maximum number of automatic retries after the initial attempt.
pub const MAX_RETRIES: u32 = 3;

/// Fixed delay between a failed attempt and the next retry.
pub const RETRY_DELAY: Duration = Duration::from_millis(2000);

/// Loading phase for the current identity-token epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No identity token has been accepted yet.
    #[default]
    Idle,
    /// A fetch or retry timer is outstanding.
    Loading,
    /// The locator resolved successfully.
    Resolved,
    /// All attempts failed; the fallback glyph applies.
    Failed,
}

/// Retry state for one avatar instance.
#[derive(Debug, Clone, Default)]
pub struct State {
    /// Identity token of the current epoch, if any.
    face_id: Option<String>,
    /// Monotonic epoch counter; bumped on every accepted token change.
    epoch: u64,
    /// Failures recorded in the current epoch.
    attempt: u32,
    /// Locator that resolved for the current epoch.
    resolved: Option<SourceLocator>,
    /// True once the retry budget is exhausted.
    failed: bool,
    /// URL template the locator is derived from.
    template: String,
}

/// Events consumed by the retry machine.
#[derive(Debug, Clone)]
pub enum Message {
    /// A new identity token was observed.
    FaceIdChanged(String),
    /// The fetch issued under `epoch` succeeded.
    FetchSucceeded { epoch: u64 },
    /// The fetch issued under `epoch` failed.
    FetchFailed { epoch: u64 },
    /// The retry timer scheduled under `epoch` fired.
    RetryElapsed { epoch: u64 },
}

/// Instructions for the surrounding driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Nothing to do. Also produced for every stale-epoch event.
    None,
    /// Start fetching `locator`; tag the completion with `epoch`.
    StartFetch { epoch: u64, locator: SourceLocator },
    /// Fire a `RetryElapsed { epoch }` after `delay`.
    ScheduleRetry { epoch: u64, delay: Duration },
}

impl State {
    /// Creates a machine deriving locators from `template`.
    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            ..Self::default()
        }
    }

    /// Handles one event and returns the effect to perform.
    pub fn handle(&mut self, message: Message) -> Effect {
        match message {
            Message::FaceIdChanged(face_id) => {
                // Empty tokens and repeats of the current token are ignored;
                // switching away and back counts as a new token.
                if face_id.is_empty() || self.face_id.as_deref() == Some(face_id.as_str()) {
                    return Effect::None;
                }

                self.epoch += 1;
                self.attempt = 0;
                self.resolved = None;
                self.failed = false;

                let locator = SourceLocator::derive(&self.template, &face_id);
                self.face_id = Some(face_id);

                Effect::StartFetch {
                    epoch: self.epoch,
                    locator,
                }
            }
            Message::FetchSucceeded { epoch } => {
                if epoch != self.epoch {
                    return Effect::None;
                }
                self.resolved = self
                    .face_id
                    .as_deref()
                    .map(|face_id| SourceLocator::derive(&self.template, face_id));
                self.failed = false;
                Effect::None
            }
            Message::FetchFailed { epoch } => {
                if epoch != self.epoch {
                    return Effect::None;
                }
                if self.attempt < MAX_RETRIES {
                    self.attempt += 1;
                    Effect::ScheduleRetry {
                        epoch,
                        delay: RETRY_DELAY,
                    }
                } else {
                    self.failed = true;
                    Effect::None
                }
            }
            Message::RetryElapsed { epoch } => {
                if epoch != self.epoch || self.failed || self.resolved.is_some() {
                    return Effect::None;
                }
                match self.face_id.as_deref() {
                    Some(face_id) => Effect::StartFetch {
                        epoch,
                        locator: SourceLocator::derive(&self.template, face_id),
                    },
                    None => Effect::None,
                }
            }
        }
    }

    /// Invalidates the current epoch without starting a new one.
    ///
    /// Pending completions and timers of the old epoch become no-ops; the
    /// next token, including the one just detached, is treated as new.
    pub fn detach(&mut self) {
        self.epoch += 1;
        self.face_id = None;
        self.resolved = None;
        self.failed = false;
        self.attempt = 0;
    }

    /// Current phase of the machine.
    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.face_id.is_none() {
            Phase::Idle
        } else if self.resolved.is_some() {
            Phase::Resolved
        } else if self.failed {
            Phase::Failed
        } else {
            Phase::Loading
        }
    }

    /// Identity token of the current epoch.
    #[must_use]
    pub fn face_id(&self) -> Option<&str> {
        self.face_id.as_deref()
    }

    /// Current epoch counter.
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Failures recorded in the current epoch.
    #[must_use]
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    /// Locator that resolved for the current epoch.
    #[must_use]
    pub fn resolved(&self) -> Option<&SourceLocator> {
        self.resolved.as_ref()
    }

    /// Whether the retry budget is exhausted.
    #[must_use]
    pub fn has_failed(&self) -> bool {
        self.failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_URL_TEMPLATE;

    fn machine() -> State {
        State::new(DEFAULT_URL_TEMPLATE)
    }

    #[test]
    fn new_token_starts_fetch() {
        let mut state = machine();
        let effect = state.handle(Message::FaceIdChanged("abc".to_string()));

        match effect {
            Effect::StartFetch { epoch, locator } => {
                assert_eq!(epoch, state.epoch());
                assert_eq!(locator.as_str(), "https://picsum.photos/seed/abc/100");
            }
            other => panic!("expected StartFetch, got {:?}", other),
        }
        assert_eq!(state.phase(), Phase::Loading);
    }

    #[test]
    fn empty_token_is_ignored() {
        let mut state = machine();
        assert_eq!(state.handle(Message::FaceIdChanged(String::new())), Effect::None);
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[test]
    fn repeated_token_is_ignored() {
        let mut state = machine();
        state.handle(Message::FaceIdChanged("abc".to_string()));
        let epoch = state.epoch();

        assert_eq!(state.handle(Message::FaceIdChanged("abc".to_string())), Effect::None);
        assert_eq!(state.epoch(), epoch);
    }

    #[test]
    fn success_resolves_to_derived_locator() {
        let mut state = machine();
        state.handle(Message::FaceIdChanged("abc".to_string()));
        state.handle(Message::FetchSucceeded { epoch: state.epoch() });

        assert_eq!(state.phase(), Phase::Resolved);
        assert_eq!(
            state.resolved().map(SourceLocator::as_str),
            Some("https://picsum.photos/seed/abc/100")
        );
        assert!(!state.has_failed());
    }

    #[test]
    fn failure_schedules_retry_with_fixed_delay() {
        let mut state = machine();
        state.handle(Message::FaceIdChanged("abc".to_string()));
        let epoch = state.epoch();

        let effect = state.handle(Message::FetchFailed { epoch });
        assert_eq!(
            effect,
            Effect::ScheduleRetry {
                epoch,
                delay: RETRY_DELAY
            }
        );
        assert_eq!(state.attempt(), 1);
        assert_eq!(state.phase(), Phase::Loading);
    }

    #[test]
    fn retry_reuses_same_locator() {
        let mut state = machine();
        state.handle(Message::FaceIdChanged("abc".to_string()));
        let epoch = state.epoch();
        state.handle(Message::FetchFailed { epoch });

        match state.handle(Message::RetryElapsed { epoch }) {
            Effect::StartFetch { locator, .. } => {
                assert_eq!(locator.as_str(), "https://picsum.photos/seed/abc/100");
            }
            other => panic!("expected StartFetch, got {:?}", other),
        }
    }

    #[test]
    fn fourth_failure_settles_failed() {
        let mut state = machine();
        state.handle(Message::FaceIdChanged("abc".to_string()));
        let epoch = state.epoch();

        for expected_attempt in 1..=MAX_RETRIES {
            let effect = state.handle(Message::FetchFailed { epoch });
            assert!(matches!(effect, Effect::ScheduleRetry { .. }));
            assert_eq!(state.attempt(), expected_attempt);
            state.handle(Message::RetryElapsed { epoch });
        }

        assert_eq!(state.handle(Message::FetchFailed { epoch }), Effect::None);
        assert_eq!(state.phase(), Phase::Failed);
        assert!(state.has_failed());
        assert!(state.resolved().is_none());
    }

    #[test]
    fn success_on_last_retry_resolves() {
        let mut state = machine();
        state.handle(Message::FaceIdChanged("abc".to_string()));
        let epoch = state.epoch();

        for _ in 0..MAX_RETRIES {
            state.handle(Message::FetchFailed { epoch });
            state.handle(Message::RetryElapsed { epoch });
        }
        state.handle(Message::FetchSucceeded { epoch });

        assert_eq!(state.phase(), Phase::Resolved);
    }

    #[test]
    fn stale_events_are_discarded() {
        let mut state = machine();
        state.handle(Message::FaceIdChanged("abc".to_string()));
        let old_epoch = state.epoch();
        state.handle(Message::FaceIdChanged("xyz".to_string()));

        assert_eq!(state.handle(Message::FetchSucceeded { epoch: old_epoch }), Effect::None);
        assert_eq!(state.handle(Message::FetchFailed { epoch: old_epoch }), Effect::None);
        assert_eq!(state.handle(Message::RetryElapsed { epoch: old_epoch }), Effect::None);

        assert_eq!(state.phase(), Phase::Loading);
        assert_eq!(state.face_id(), Some("xyz"));
        assert!(state.resolved().is_none());
    }

    #[test]
    fn token_change_resets_attempt_counter() {
        let mut state = machine();
        state.handle(Message::FaceIdChanged("abc".to_string()));
        let epoch = state.epoch();
        state.handle(Message::FetchFailed { epoch });
        state.handle(Message::FetchFailed { epoch });
        assert_eq!(state.attempt(), 2);

        state.handle(Message::FaceIdChanged("xyz".to_string()));
        assert_eq!(state.attempt(), 0);
    }

    #[test]
    fn switching_away_and_back_opens_new_epoch() {
        let mut state = machine();
        state.handle(Message::FaceIdChanged("abc".to_string()));
        let first = state.epoch();
        state.handle(Message::FaceIdChanged("xyz".to_string()));

        let effect = state.handle(Message::FaceIdChanged("abc".to_string()));
        assert!(matches!(effect, Effect::StartFetch { .. }));
        assert!(state.epoch() > first + 1);
    }

    #[test]
    fn retry_after_settlement_is_noop() {
        let mut state = machine();
        state.handle(Message::FaceIdChanged("abc".to_string()));
        let epoch = state.epoch();
        state.handle(Message::FetchSucceeded { epoch });

        assert_eq!(state.handle(Message::RetryElapsed { epoch }), Effect::None);
        assert_eq!(state.phase(), Phase::Resolved);
    }

    #[test]
    fn detach_invalidates_pending_epoch() {
        let mut state = machine();
        state.handle(Message::FaceIdChanged("abc".to_string()));
        let epoch = state.epoch();
        state.detach();

        assert_eq!(state.handle(Message::FetchSucceeded { epoch }), Effect::None);
        assert_eq!(state.phase(), Phase::Idle);

        // The detached token is accepted again afterwards.
        let effect = state.handle(Message::FaceIdChanged("abc".to_string()));
        assert!(matches!(effect, Effect::StartFetch { .. }));
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration around the avatar component.
//!
//! The `App` struct wires the identity-entry form to the avatar component
//! and translates launcher flags and user preferences into component
//! configuration. Policy decisions (window sizing, which config values feed
//! the component) stay close to the update loop so user-facing behavior is
//! easy to audit.

mod message;
mod view;

pub use message::{Flags, Message};

use crate::avatar::component;
use crate::config;
use iced::{window, Element, Task, Theme};

pub const WINDOW_DEFAULT_WIDTH: u32 = 480;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 360;
pub const MIN_WINDOW_WIDTH: u32 = 320;
pub const MIN_WINDOW_HEIGHT: u32 = 240;

/// Root Iced application state.
#[derive(Debug, Default)]
pub struct App {
    avatar: component::State,
    face_id_input: String,
    nick_name_input: String,
}

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // Wrap flags in RefCell<Option<_>> to satisfy Fn trait requirement
    // while only consuming flags once (iced 0.14 requires Fn, not FnOnce)
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .run()
}

impl App {
    /// Initializes application state and optionally kicks off the first
    /// avatar load based on `Flags` received from the launcher.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load();
        if let Some(warning) = config_warning {
            eprintln!("Warning: {warning}");
        }

        let nick_name = flags.nick_name.unwrap_or_default();
        let size = flags
            .size
            .unwrap_or_else(|| config.avatar_size())
            .clamp(config::MIN_AVATAR_SIZE, config::MAX_AVATAR_SIZE);

        let mut app = App {
            avatar: component::State::new(
                config.url_template(),
                nick_name.clone(),
                size,
                config.cache_entries(),
            ),
            face_id_input: flags.face_id.clone().unwrap_or_default(),
            nick_name_input: nick_name,
        };

        let task = match flags.face_id {
            Some(face_id) => app
                .avatar
                .handle_message(component::Message::FaceIdChanged(face_id))
                .map(Message::Avatar),
            None => Task::none(),
        };

        (app, task)
    }

    fn title(&self) -> String {
        String::from("Avatar Lens")
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Avatar(msg) => self.avatar.handle_message(msg).map(Message::Avatar),
            Message::FaceIdInput(value) => {
                self.face_id_input = value;
                Task::none()
            }
            Message::NickNameInput(value) => {
                self.avatar.set_nick_name(value.clone());
                self.nick_name_input = value;
                Task::none()
            }
            Message::FaceIdSubmitted => self
                .avatar
                .handle_message(component::Message::FaceIdChanged(self.face_id_input.clone()))
                .map(Message::Avatar),
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(self)
    }
}

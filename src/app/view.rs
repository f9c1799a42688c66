// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.

use super::{App, Message};
use iced::widget::{button, container, text, text_input, Column, Row};
use iced::{alignment, Element, Length};

const FORM_SPACING: u16 = 8;
const FORM_PADDING: u16 = 16;

/// Renders the identity-entry form above the avatar.
pub(super) fn view(app: &App) -> Element<'_, Message> {
    let face_id_input = text_input("identity token", &app.face_id_input)
        .on_input(Message::FaceIdInput)
        .on_submit(Message::FaceIdSubmitted)
        .padding(FORM_SPACING);

    let load_button = button(text("Load"))
        .on_press(Message::FaceIdSubmitted)
        .padding(FORM_SPACING);

    let nick_name_input = text_input("display name", &app.nick_name_input)
        .on_input(Message::NickNameInput)
        .padding(FORM_SPACING);

    let form = Column::new()
        .spacing(f32::from(FORM_SPACING))
        .push(
            Row::new()
                .spacing(f32::from(FORM_SPACING))
                .push(face_id_input)
                .push(load_button),
        )
        .push(nick_name_input);

    let avatar = container(app.avatar.view().map(Message::Avatar))
        .width(Length::Fill)
        .align_x(alignment::Horizontal::Center);

    let content = Column::new()
        .spacing(f32::from(FORM_PADDING))
        .push(form)
        .push(avatar);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(FORM_PADDING)
        .into()
}

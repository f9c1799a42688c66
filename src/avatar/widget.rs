// SPDX-License-Identifier: MPL-2.0
//! Image-or-glyph rendering for the avatar component.

use iced::widget::image::{Handle, Image};
use iced::widget::{container, text, tooltip};
use iced::{alignment, Background, Border, Element, Length, Theme};

/// Renders a resolved avatar image at `size`, with `accessible_label`
/// presented as a tooltip.
pub fn avatar_image<'a, Message: 'a>(
    handle: &Handle,
    size: u16,
    accessible_label: &'a str,
) -> Element<'a, Message> {
    let side = Length::Fixed(f32::from(size));
    let image = Image::new(handle.clone())
        .content_fit(iced::ContentFit::Cover)
        .width(side)
        .height(side);

    tooltip(image, text(accessible_label), tooltip::Position::Bottom)
        .style(container::rounded_box)
        .into()
}

/// Renders the fallback glyph centered in a circular badge of `size`.
pub fn fallback_glyph<'a, Message: 'a>(glyph: char, size: u16) -> Element<'a, Message> {
    let side = f32::from(size);
    let label = text(glyph.to_string()).size(side * 0.45);

    container(label)
        .width(Length::Fixed(side))
        .height(Length::Fixed(side))
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .style(move |theme: &Theme| {
            let palette = theme.extended_palette();
            container::Style {
                background: Some(Background::Color(palette.primary.weak.color)),
                border: Border {
                    color: palette.primary.strong.color,
                    width: 1.0,
                    radius: (side / 2.0).into(),
                },
                text_color: Some(palette.primary.weak.text),
                ..Default::default()
            }
        })
        .into()
}

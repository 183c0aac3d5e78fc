use iced::widget::{button, pick_list, row, text, text_input, Space};
use iced::{Alignment, Element, Length};

use crate::app::Message;
use crate::settings::{Appearance, Settings};

pub fn view<'a>(
    settings: &'a Settings,
    device_input: &'a str,
    backend_error: Option<&'a str>,
) -> Element<'a, Message> {
    let mut items: Vec<Element<'a, Message>> = Vec::new();

    items.push(text("Backend").size(16).into());
    items.push(Space::new().height(8).into());
    items.push(text("Base address").size(13).into());
    items.push(
        text_input("http://localhost:5000", &settings.backend_url)
            .on_input(Message::BackendUrlChanged)
            .size(13)
            .padding(8)
            .into(),
    );
    if let Some(err) = backend_error {
        items.push(text(err).size(12).style(text::danger).into());
    }
    items.push(Space::new().height(12).into());

    items.push(
        row![
            text("Camera device").size(13),
            text_input("0", device_input)
                .on_input(Message::DeviceInputChanged)
                .size(13)
                .padding(8)
                .width(Length::Fixed(80.0)),
        ]
        .spacing(12)
        .align_y(Alignment::Center)
        .into(),
    );
    if device_input.parse::<u32>().is_err() {
        items.push(
            text("Device must be a whole number")
                .size(12)
                .style(text::danger)
                .into(),
        );
    }
    items.push(Space::new().height(20).into());

    items.push(text("Theme").size(16).into());
    items.push(Space::new().height(8).into());
    items.push(
        row![
            text("Mode").size(13),
            pick_list(Appearance::ALL, Some(settings.appearance), |a| {
                Message::AppearanceChanged(a)
            })
            .text_size(13),
        ]
        .spacing(12)
        .align_y(Alignment::Center)
        .into(),
    );
    items.push(Space::new().height(20).into());

    items.push(
        button(text("Restore Defaults").size(13))
            .on_press(Message::RestoreDefaults)
            .padding([8, 16])
            .into(),
    );

    iced::widget::column(items).spacing(0).into()
}

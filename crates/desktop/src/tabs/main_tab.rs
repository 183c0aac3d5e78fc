use iced::widget::{button, column, row, text, Space};
use iced::{Alignment, Element, Length};

use helmetwatch_client::domain::shell_controller::DisplayState;

use crate::app::Message;

const IMAGE_DISPLAY_WIDTH: f32 = 480.0;

pub fn view<'a>(
    display: &'a DisplayState,
    image_handle: Option<&'a iced::widget::image::Handle>,
    live: bool,
    busy: Option<&'static str>,
    backend_error: Option<&'a str>,
) -> Element<'a, Message> {
    let enabled = busy.is_none() && backend_error.is_none();
    let mut items: Vec<Element<'a, Message>> = Vec::new();

    if let Some(err) = backend_error {
        items.push(
            text(format!("Backend address invalid \u{2014} fix it in Settings ({err})"))
                .size(13)
                .style(text::danger)
                .into(),
        );
        items.push(Space::new().height(8).into());
    }
    if let Some(label) = busy {
        items.push(text(label).size(13).into());
        items.push(Space::new().height(8).into());
    }

    // ── Image detection ──────────────────────────────────────────────
    items.push(text("Image detection").size(16).into());
    items.push(Space::new().height(8).into());
    let mut image_row: Vec<Element<'a, Message>> = vec![action_button(
        "Upload Image",
        Message::SelectImage,
        enabled,
    )];
    if image_handle.is_some() {
        image_row.push(clear_button(Message::ClearImage, enabled));
    }
    items.push(row(image_row).spacing(8).align_y(Alignment::Center).into());
    if let Some(handle) = image_handle {
        items.push(Space::new().height(8).into());
        items.push(
            iced::widget::image(handle.clone())
                .width(Length::Fixed(IMAGE_DISPLAY_WIDTH))
                .into(),
        );
    }
    items.push(Space::new().height(20).into());

    // ── Video detection ──────────────────────────────────────────────
    items.push(text("Video detection").size(16).into());
    items.push(Space::new().height(8).into());
    let mut video_row: Vec<Element<'a, Message>> = vec![action_button(
        "Upload Video",
        Message::SelectVideo,
        enabled,
    )];
    if let Some(path) = &display.video_path {
        video_row.push(text(format!("Video saved: {}", path.display())).size(13).into());
        video_row.push(clear_button(Message::ClearVideo, enabled));
    }
    items.push(row(video_row).spacing(8).align_y(Alignment::Center).into());
    items.push(Space::new().height(20).into());

    // ── Live camera ──────────────────────────────────────────────────
    items.push(text("Live camera").size(16).into());
    items.push(Space::new().height(8).into());
    let mut live_row: Vec<Element<'a, Message>> = vec![
        action_button("Start Live", Message::StartLive, enabled),
        action_button("Stop Live", Message::StopLive, enabled),
    ];
    if live {
        live_row.push(action_button(
            "Open Live View",
            Message::OpenLiveView,
            enabled,
        ));
    }
    if display.live_note.is_some() {
        live_row.push(clear_button(Message::ClearLive, enabled));
    }
    items.push(row(live_row).spacing(8).align_y(Alignment::Center).into());
    if let Some(note) = &display.live_note {
        items.push(Space::new().height(4).into());
        items.push(text(note.as_str()).size(13).into());
    }
    items.push(Space::new().height(20).into());

    // ── Server files ─────────────────────────────────────────────────
    items.push(text("Server files").size(16).into());
    items.push(Space::new().height(8).into());
    let mut delete_row: Vec<Element<'a, Message>> = vec![button(text("Delete All Files").size(13))
        .on_press_maybe(enabled.then_some(Message::DeleteAll))
        .style(button::danger)
        .padding([8, 16])
        .into()];
    if let Some(status) = &display.status {
        delete_row.push(text(status.as_str()).size(13).into());
        delete_row.push(clear_button(Message::ClearStatus, enabled));
    }
    items.push(row(delete_row).spacing(8).align_y(Alignment::Center).into());
    items.push(Space::new().height(4).into());
    items.push(
        text("Deletes every uploaded and processed file on the backend immediately.")
            .size(11)
            .into(),
    );

    column(items).spacing(0).into()
}

fn action_button<'a>(label: &'a str, message: Message, enabled: bool) -> Element<'a, Message> {
    button(text(label).size(13))
        .on_press_maybe(enabled.then_some(message))
        .padding([8, 16])
        .into()
}

fn clear_button<'a>(message: Message, enabled: bool) -> Element<'a, Message> {
    button(text("\u{00D7}").size(14))
        .on_press_maybe(enabled.then_some(message))
        .style(button::text)
        .padding([2, 8])
        .into()
}

use iced::widget::{column, text, Space};
use iced::Element;

use crate::app::Message;

pub fn view(backend_url: &str) -> Element<'_, Message> {
    let version = env!("CARGO_PKG_VERSION");

    column![
        text("HelmetWatch").size(22),
        Space::new().height(4),
        text(format!("Version {version}")).size(13),
        Space::new().height(12),
        text(
            "Desktop shell for a YOLOv8 helmet-detection backend. Upload an \
             image or video, run a live camera session, or clear the \
             backend's stored files; the annotated results come straight \
             from the server."
        )
        .size(13),
        Space::new().height(12),
        text(format!("Configured backend: {backend_url}")).size(13),
        Space::new().height(12),
        text(
            "The live feed itself is rendered by the backend. Use Open Live \
             View on the Detection tab to watch it in your browser."
        )
        .size(13),
    ]
    .spacing(0)
    .into()
}

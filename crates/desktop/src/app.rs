use std::path::PathBuf;
use std::time::Duration;

use crossbeam_channel::Receiver;
use iced::widget::{button, column, container, row, scrollable, text};
use iced::{Element, Length, Subscription, Task, Theme};

use helmetwatch_client::config::{IMAGE_EXTENSIONS, VIDEO_EXTENSIONS};
use helmetwatch_client::domain::shell_controller::{
    ActionFailure, ActionOutcome, DisplayState, ShellController, IMAGE_UPLOAD_FAILED,
};
use helmetwatch_client::infrastructure::http_backend_client::HttpBackendClient;

use crate::settings::{Appearance, Settings};
use crate::tabs;
use crate::theme;
use crate::workers::backend_worker::{self, BackendAction, WorkerReply};

const WORKER_POLL: Duration = Duration::from_millis(100);

// ---------------------------------------------------------------------------
// Tab enum
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Main,
    Settings,
    About,
}

impl Tab {
    const ALL: &[Tab] = &[Tab::Main, Tab::Settings, Tab::About];

    fn label(self) -> &'static str {
        match self {
            Tab::Main => "Detection",
            Tab::Settings => "Settings",
            Tab::About => "About",
        }
    }
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub enum Message {
    TabSelected(Tab),
    SelectImage,
    ImageSelected(Option<PathBuf>),
    SelectVideo,
    VideoSelected(Option<PathBuf>),
    StartLive,
    StopLive,
    DeleteAll,
    OpenLiveView,
    ClearImage,
    ClearVideo,
    ClearLive,
    ClearStatus,
    PollWorker,
    FailureDismissed,
    BackendUrlChanged(String),
    DeviceInputChanged(String),
    AppearanceChanged(Appearance),
    RestoreDefaults,
    PollSystemTheme,
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    active_tab: Tab,
    pub settings: Settings,
    /// Interaction core. `None` while an action runs on the worker thread,
    /// or when the configured backend address does not parse.
    controller: Option<ShellController>,
    worker_rx: Option<Receiver<WorkerReply>>,
    busy: Option<&'static str>,
    /// Render mirror of the controller's display state.
    display: DisplayState,
    live: bool,
    image_handle: Option<iced::widget::image::Handle>,
    live_view_url: Option<String>,
    backend_error: Option<String>,
    device_input: String,
    settings_dirty: bool,
}

impl App {
    pub fn new() -> (Self, Task<Message>) {
        let settings = Settings::load();
        let device_input = settings.device.to_string();
        let mut app = Self {
            active_tab: Tab::Main,
            settings,
            controller: None,
            worker_rx: None,
            busy: None,
            display: DisplayState::default(),
            live: false,
            image_handle: None,
            live_view_url: None,
            backend_error: None,
            device_input,
            settings_dirty: false,
        };
        app.apply_settings();
        (app, Task::none())
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::TabSelected(tab) => {
                self.active_tab = tab;
            }
            Message::SelectImage => {
                if self.can_act() {
                    return Task::perform(
                        async {
                            rfd::AsyncFileDialog::new()
                                .set_title("Select an image")
                                .add_filter("Images", IMAGE_EXTENSIONS)
                                .pick_file()
                                .await
                                .map(|h| h.path().to_path_buf())
                        },
                        Message::ImageSelected,
                    );
                }
            }
            Message::ImageSelected(Some(path)) => {
                self.dispatch(BackendAction::UploadImage(path));
            }
            Message::ImageSelected(None) => {}
            Message::SelectVideo => {
                if self.can_act() {
                    return Task::perform(
                        async {
                            rfd::AsyncFileDialog::new()
                                .set_title("Select a video")
                                .add_filter("Videos", VIDEO_EXTENSIONS)
                                .pick_file()
                                .await
                                .map(|h| h.path().to_path_buf())
                        },
                        Message::VideoSelected,
                    );
                }
            }
            Message::VideoSelected(Some(path)) => {
                self.dispatch(BackendAction::UploadVideo(path));
            }
            Message::VideoSelected(None) => {}
            Message::StartLive => {
                self.dispatch(BackendAction::StartLive);
            }
            Message::StopLive => {
                self.dispatch(BackendAction::StopLive);
            }
            Message::DeleteAll => {
                // Preserved observed behavior: no confirmation prompt.
                self.dispatch(BackendAction::DeleteAll);
            }
            Message::OpenLiveView => {
                if let Some(url) = &self.live_view_url {
                    let _ = open::that(url);
                }
            }
            Message::ClearImage => {
                self.image_handle = None;
                self.display.image = None;
                if let Some(controller) = &mut self.controller {
                    controller.clear_image();
                }
            }
            Message::ClearVideo => {
                self.display.video_path = None;
                if let Some(controller) = &mut self.controller {
                    controller.clear_video();
                }
            }
            Message::ClearLive => {
                // Closing the live slot stops a running session and empties
                // the note in the same click.
                if self.live {
                    self.dispatch(BackendAction::DismissLive);
                } else {
                    self.display.live_note = None;
                    if let Some(controller) = &mut self.controller {
                        controller.clear_live_note();
                    }
                }
            }
            Message::ClearStatus => {
                self.display.status = None;
                if let Some(controller) = &mut self.controller {
                    controller.clear_status();
                }
            }
            Message::PollWorker => {
                let reply = self.worker_rx.as_ref().and_then(|rx| rx.try_recv().ok());
                if let Some((controller, result)) = reply {
                    self.worker_rx = None;
                    self.busy = None;
                    self.display = controller.display().clone();
                    self.live = controller.is_live();
                    self.controller = Some(controller);
                    if self.settings_dirty {
                        self.apply_settings();
                    }
                    return self.finish_action(result);
                }
            }
            Message::FailureDismissed => {}
            Message::BackendUrlChanged(url) => {
                self.settings.backend_url = url;
                self.settings.save();
                self.apply_settings();
            }
            Message::DeviceInputChanged(input) => {
                if let Ok(device) = input.parse::<u32>() {
                    self.settings.device = device;
                    self.settings.save();
                    self.apply_settings();
                }
                self.device_input = input;
            }
            Message::AppearanceChanged(appearance) => {
                self.settings.appearance = appearance;
                self.settings.save();
            }
            Message::RestoreDefaults => {
                self.settings = Settings::default();
                self.device_input = self.settings.device.to_string();
                self.settings.save();
                self.apply_settings();
            }
            Message::PollSystemTheme => {
                // Theme is resolved fresh in theme() on every render.
            }
        }
        Task::none()
    }

    pub fn view(&self) -> Element<'_, Message> {
        let tab_bar = row(Tab::ALL
            .iter()
            .map(|&tab| {
                let btn = button(text(tab.label()).size(13))
                    .on_press(Message::TabSelected(tab))
                    .padding([6, 14]);
                if tab == self.active_tab {
                    btn.style(button::primary).into()
                } else {
                    btn.style(button::text).into()
                }
            })
            .collect::<Vec<_>>())
        .spacing(2);

        let content: Element<'_, Message> = match self.active_tab {
            Tab::Main => tabs::main_tab::view(
                &self.display,
                self.image_handle.as_ref(),
                self.live,
                self.busy,
                self.backend_error.as_deref(),
            ),
            Tab::Settings => tabs::settings_tab::view(
                &self.settings,
                &self.device_input,
                self.backend_error.as_deref(),
            ),
            Tab::About => tabs::about_tab::view(&self.settings.backend_url),
        };

        let tab_content = container(scrollable(content).height(Length::Fill))
            .padding(16)
            .height(Length::Fill);

        column![tab_bar, tab_content]
            .spacing(0)
            .height(Length::Fill)
            .into()
    }

    pub fn theme(&self) -> Theme {
        theme::resolve_theme(self.settings.appearance)
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let mut subs = Vec::new();
        if self.worker_rx.is_some() {
            subs.push(iced::time::every(WORKER_POLL).map(|_| Message::PollWorker));
        }
        if self.settings.appearance == Appearance::System {
            subs.push(iced::time::every(Duration::from_secs(2)).map(|_| Message::PollSystemTheme));
        }
        Subscription::batch(subs)
    }

    fn can_act(&self) -> bool {
        self.busy.is_none() && self.controller.is_some()
    }

    /// Hand the controller to a worker thread for one blocking round trip.
    /// Buttons stay disabled until the reply comes back over the channel.
    fn dispatch(&mut self, action: BackendAction) {
        if self.busy.is_some() {
            return;
        }
        let Some(mut controller) = self.controller.take() else {
            return;
        };
        controller.set_device(self.settings.device);
        self.busy = Some(action.busy_label());
        self.worker_rx = Some(backend_worker::spawn(controller, action));
    }

    fn finish_action(&mut self, result: Result<ActionOutcome, ActionFailure>) -> Task<Message> {
        match result {
            Ok(ActionOutcome::ImageReady) => {
                match self.display.image.as_deref().and_then(decode_image) {
                    Some(handle) => {
                        self.image_handle = Some(handle);
                        Task::none()
                    }
                    // The backend answered 2xx but the body is not an image.
                    None => failure_dialog(IMAGE_UPLOAD_FAILED),
                }
            }
            Ok(_) => Task::none(),
            Err(failure) => failure_dialog(failure.message),
        }
    }

    /// Rebuild the HTTP client from settings. Deferred while a request is in
    /// flight; re-run when the controller returns.
    fn apply_settings(&mut self) {
        if self.busy.is_some() {
            self.settings_dirty = true;
            return;
        }
        self.settings_dirty = false;
        match HttpBackendClient::new(&self.settings.backend_url) {
            Ok(client) => {
                self.backend_error = None;
                self.live_view_url = client.live_view_url().ok().map(|u| u.to_string());
                match &mut self.controller {
                    Some(controller) => {
                        controller.set_client(Box::new(client));
                        controller.set_device(self.settings.device);
                    }
                    None => {
                        let mut controller = ShellController::new(Box::new(client));
                        controller.set_device(self.settings.device);
                        self.controller = Some(controller);
                    }
                }
            }
            Err(e) => {
                log::warn!("backend address rejected: {e}");
                self.backend_error = Some(e.to_string());
            }
        }
    }
}

fn decode_image(bytes: &[u8]) -> Option<iced::widget::image::Handle> {
    let img = image::load_from_memory(bytes).ok()?.into_rgba8();
    let (w, h) = img.dimensions();
    Some(iced::widget::image::Handle::from_rgba(w, h, img.into_raw()))
}

/// The one user-facing notification per failed action.
fn failure_dialog(message: &'static str) -> Task<Message> {
    Task::perform(
        async move {
            rfd::AsyncMessageDialog::new()
                .set_level(rfd::MessageLevel::Error)
                .set_title("HelmetWatch")
                .set_description(message)
                .show()
                .await;
        },
        |()| Message::FailureDismissed,
    )
}

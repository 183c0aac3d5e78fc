use std::path::PathBuf;
use std::thread;

use crossbeam_channel::Receiver;

use helmetwatch_client::domain::shell_controller::{
    ActionFailure, ActionOutcome, ShellController,
};

/// One user action, dispatched to the backend off the UI thread.
#[derive(Debug, Clone)]
pub enum BackendAction {
    UploadImage(PathBuf),
    UploadVideo(PathBuf),
    StartLive,
    StopLive,
    /// Stop the session and empty the live slot in one step.
    DismissLive,
    DeleteAll,
}

impl BackendAction {
    /// Short line shown while the request is in flight.
    pub fn busy_label(&self) -> &'static str {
        match self {
            BackendAction::UploadImage(_) => "Uploading image\u{2026}",
            BackendAction::UploadVideo(_) => "Uploading video\u{2026}",
            BackendAction::StartLive => "Starting live feed\u{2026}",
            BackendAction::StopLive | BackendAction::DismissLive => "Stopping live feed\u{2026}",
            BackendAction::DeleteAll => "Deleting backend files\u{2026}",
        }
    }
}

/// The controller travels with the reply so the app gets it back after the
/// blocking round trip; the UI keeps no second copy of its state.
pub type WorkerReply = (ShellController, Result<ActionOutcome, ActionFailure>);

/// Run one action on a worker thread. The app polls the returned receiver
/// from a timed subscription; exactly one reply is ever sent.
pub fn spawn(mut controller: ShellController, action: BackendAction) -> Receiver<WorkerReply> {
    let (tx, rx) = crossbeam_channel::bounded::<WorkerReply>(1);

    thread::spawn(move || {
        let result = match action {
            BackendAction::UploadImage(path) => controller.upload_image(Some(&path)),
            BackendAction::UploadVideo(path) => controller.upload_video(Some(&path)),
            BackendAction::StartLive => controller.start_live(),
            BackendAction::StopLive => controller.stop_live(),
            BackendAction::DismissLive => controller.dismiss_live(),
            BackendAction::DeleteAll => controller.delete_all(),
        };
        let _ = tx.send((controller, result));
    });

    rx
}

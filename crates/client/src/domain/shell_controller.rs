use std::fs;
use std::path::{Path, PathBuf};

use crate::config;
use crate::domain::backend_client::BackendClient;
use crate::error::ClientError;

pub const IMAGE_UPLOAD_FAILED: &str = "Image upload failed";
pub const VIDEO_UPLOAD_FAILED: &str = "Video upload failed";
pub const LIVE_START_FAILED: &str = "Live start failed";
pub const LIVE_STOP_FAILED: &str = "Live stop failed";
pub const DELETE_ALL_FAILED: &str = "Delete all failed";

pub const LIVE_STARTED_NOTE: &str = "Live feed started. Open the backend live view to watch.";
pub const LIVE_STOPPED_NOTE: &str = "Live feed stopped";
pub const ALL_FILES_DELETED_NOTE: &str = "All files deleted";

/// What the shell currently shows. A failed action never touches this.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayState {
    /// Encoded bytes of the last annotated image the backend returned.
    pub image: Option<Vec<u8>>,
    /// Where the last processed video was saved.
    pub video_path: Option<PathBuf>,
    /// Live-session status line.
    pub live_note: Option<String>,
    /// Generic status line (delete-all confirmation).
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    ImageReady,
    VideoSaved(PathBuf),
    LiveStarted,
    LiveStopped,
    AllFilesDeleted,
    /// The file dialog was cancelled; no request was made.
    NoFileSelected,
}

/// The one user-facing line an action failure collapses into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionFailure {
    pub message: &'static str,
}

/// Owns the display state and the live-session flag, and turns every
/// [`ClientError`] into a single [`ActionFailure`] at the action boundary.
///
/// Holds the backend behind the [`BackendClient`] trait so the interaction
/// logic runs under tests without a display or a network.
pub struct ShellController {
    client: Box<dyn BackendClient>,
    device: u32,
    video_output: PathBuf,
    live: bool,
    display: DisplayState,
}

impl ShellController {
    pub fn new(client: Box<dyn BackendClient>) -> Self {
        Self {
            client,
            device: config::DEFAULT_DEVICE,
            video_output: PathBuf::from(config::PROCESSED_VIDEO_FILENAME),
            live: false,
            display: DisplayState::default(),
        }
    }

    pub fn with_video_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.video_output = path.into();
        self
    }

    /// Swap the backend, e.g. after the base address changed in settings.
    /// Display state and the live flag are kept.
    pub fn set_client(&mut self, client: Box<dyn BackendClient>) {
        self.client = client;
    }

    pub fn set_device(&mut self, device: u32) {
        self.device = device;
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    pub fn is_live(&self) -> bool {
        self.live
    }

    pub fn video_output(&self) -> &Path {
        &self.video_output
    }

    /// Upload the selected image and keep the annotated bytes for display.
    /// `None` means the dialog was cancelled: no request, no state change.
    pub fn upload_image(&mut self, path: Option<&Path>) -> Result<ActionOutcome, ActionFailure> {
        let Some(path) = path else {
            return Ok(ActionOutcome::NoFileSelected);
        };
        match self.client.upload_image(path) {
            Ok(bytes) => {
                self.display.image = Some(bytes);
                Ok(ActionOutcome::ImageReady)
            }
            Err(e) => Err(fail("upload_image", IMAGE_UPLOAD_FAILED, &e)),
        }
    }

    /// Upload the selected video and write the processed bytes verbatim to
    /// the configured output path, overwriting any prior file there.
    pub fn upload_video(&mut self, path: Option<&Path>) -> Result<ActionOutcome, ActionFailure> {
        let Some(path) = path else {
            return Ok(ActionOutcome::NoFileSelected);
        };
        let bytes = match self.client.upload_video(path) {
            Ok(bytes) => bytes,
            Err(e) => return Err(fail("upload_video", VIDEO_UPLOAD_FAILED, &e)),
        };
        if let Err(e) = fs::write(&self.video_output, &bytes) {
            let e = ClientError::Write {
                path: self.video_output.clone(),
                source: e,
            };
            return Err(fail("upload_video", VIDEO_UPLOAD_FAILED, &e));
        }
        self.display.video_path = Some(self.video_output.clone());
        Ok(ActionOutcome::VideoSaved(self.video_output.clone()))
    }

    pub fn start_live(&mut self) -> Result<ActionOutcome, ActionFailure> {
        match self.client.start_live(self.device) {
            Ok(()) => {
                self.live = true;
                self.display.live_note = Some(LIVE_STARTED_NOTE.to_string());
                Ok(ActionOutcome::LiveStarted)
            }
            Err(e) => Err(fail("start_live", LIVE_START_FAILED, &e)),
        }
    }

    pub fn stop_live(&mut self) -> Result<ActionOutcome, ActionFailure> {
        match self.client.stop_live() {
            Ok(()) => {
                self.live = false;
                self.display.live_note = Some(LIVE_STOPPED_NOTE.to_string());
                Ok(ActionOutcome::LiveStopped)
            }
            Err(e) => Err(fail("stop_live", LIVE_STOP_FAILED, &e)),
        }
    }

    /// Wipe all server-side files. Fires exactly one request, with no
    /// confirmation prompt and no undo; preserved observed behavior, flagged
    /// as a risk in the tests below rather than silently changed.
    pub fn delete_all(&mut self) -> Result<ActionOutcome, ActionFailure> {
        match self.client.delete_all() {
            Ok(()) => {
                self.display.status = Some(ALL_FILES_DELETED_NOTE.to_string());
                Ok(ActionOutcome::AllFilesDeleted)
            }
            Err(e) => Err(fail("delete_all", DELETE_ALL_FAILED, &e)),
        }
    }

    /// Stop the session and empty the live slot in one step, for the slot's
    /// clear control. A failed stop keeps the session and its note, like
    /// [`Self::stop_live`].
    pub fn dismiss_live(&mut self) -> Result<ActionOutcome, ActionFailure> {
        let outcome = self.stop_live()?;
        self.display.live_note = None;
        Ok(outcome)
    }

    pub fn clear_image(&mut self) {
        self.display.image = None;
    }

    pub fn clear_video(&mut self) {
        self.display.video_path = None;
    }

    pub fn clear_live_note(&mut self) {
        self.display.live_note = None;
    }

    pub fn clear_status(&mut self) {
        self.display.status = None;
    }
}

fn fail(action: &str, message: &'static str, err: &ClientError) -> ActionFailure {
    log::warn!("{action}: {err}");
    ActionFailure { message }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::{Arc, Mutex};

    use rstest::rstest;
    use tempfile::TempDir;

    type CallLog = Arc<Mutex<Vec<&'static str>>>;

    /// Scripted backend: `Some(bytes)` responses succeed, `None` fails with
    /// a synthetic HTTP 500. Records every call into a shared log the test
    /// keeps a handle to.
    #[derive(Default)]
    struct MockBackend {
        image_response: Option<Vec<u8>>,
        video_response: Option<Vec<u8>>,
        live_ok: bool,
        calls: CallLog,
    }

    impl MockBackend {
        fn log(&self) -> CallLog {
            self.calls.clone()
        }

        fn record(&self, call: &'static str) {
            self.calls.lock().unwrap().push(call);
        }
    }

    fn server_error(endpoint: &str) -> ClientError {
        ClientError::Status {
            endpoint: endpoint.to_string(),
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    impl BackendClient for MockBackend {
        fn upload_image(&self, _path: &Path) -> Result<Vec<u8>, ClientError> {
            self.record("upload_image");
            self.image_response
                .clone()
                .ok_or_else(|| server_error("/upload_image"))
        }

        fn upload_video(&self, _path: &Path) -> Result<Vec<u8>, ClientError> {
            self.record("upload_video");
            self.video_response
                .clone()
                .ok_or_else(|| server_error("/upload_video"))
        }

        fn start_live(&self, _device: u32) -> Result<(), ClientError> {
            self.record("start_live");
            self.live_ok
                .then_some(())
                .ok_or_else(|| server_error("/start_live"))
        }

        fn stop_live(&self) -> Result<(), ClientError> {
            self.record("stop_live");
            self.live_ok
                .then_some(())
                .ok_or_else(|| server_error("/stop_live"))
        }

        fn delete_all(&self) -> Result<(), ClientError> {
            self.record("delete_all");
            self.live_ok
                .then_some(())
                .ok_or_else(|| server_error("/delete_all"))
        }
    }

    #[test]
    fn cancelled_dialog_sends_no_request() {
        let mock = MockBackend::default();
        let log = mock.log();
        let mut controller = ShellController::new(Box::new(mock));
        assert_eq!(
            controller.upload_image(None),
            Ok(ActionOutcome::NoFileSelected)
        );
        assert_eq!(
            controller.upload_video(None),
            Ok(ActionOutcome::NoFileSelected)
        );
        assert!(log.lock().unwrap().is_empty());
        assert_eq!(controller.display(), &DisplayState::default());
    }

    #[test]
    fn image_success_updates_display() {
        let mock = MockBackend {
            image_response: Some(b"annotated".to_vec()),
            ..Default::default()
        };
        let mut controller = ShellController::new(Box::new(mock));
        let outcome = controller.upload_image(Some(Path::new("site.jpg")));
        assert_eq!(outcome, Ok(ActionOutcome::ImageReady));
        assert_eq!(controller.display().image.as_deref(), Some(&b"annotated"[..]));
    }

    #[test]
    fn image_failure_leaves_prior_display_untouched() {
        let mock = MockBackend {
            image_response: Some(b"first".to_vec()),
            ..Default::default()
        };
        let mut controller = ShellController::new(Box::new(mock));
        controller
            .upload_image(Some(Path::new("a.jpg")))
            .expect("first upload succeeds");
        let before = controller.display().clone();

        controller.set_client(Box::new(MockBackend::default()));
        let outcome = controller.upload_image(Some(Path::new("b.jpg")));
        assert_eq!(
            outcome,
            Err(ActionFailure {
                message: IMAGE_UPLOAD_FAILED
            })
        );
        assert_eq!(controller.display(), &before);
    }

    #[test]
    fn start_then_stop_leaves_flag_false_after_two_requests() {
        let mock = MockBackend {
            live_ok: true,
            ..Default::default()
        };
        let log = mock.log();
        let mut controller = ShellController::new(Box::new(mock));
        assert!(!controller.is_live());
        controller.start_live().expect("start succeeds");
        assert!(controller.is_live());
        controller.stop_live().expect("stop succeeds");
        assert!(!controller.is_live());
        assert_eq!(*log.lock().unwrap(), vec!["start_live", "stop_live"]);
    }

    #[test]
    fn start_failure_leaves_flag_unchanged() {
        let mut controller = ShellController::new(Box::new(MockBackend::default()));
        assert!(controller.start_live().is_err());
        assert!(!controller.is_live());
        assert!(controller.display().live_note.is_none());
    }

    #[test]
    fn stop_failure_keeps_session_live() {
        let mock = MockBackend {
            live_ok: true,
            ..Default::default()
        };
        let mut controller = ShellController::new(Box::new(mock));
        controller.start_live().expect("start succeeds");
        controller.set_client(Box::new(MockBackend::default()));
        assert!(controller.stop_live().is_err());
        assert!(controller.is_live());
    }

    #[test]
    fn dismissing_live_slot_stops_and_clears_in_one_step() {
        let mock = MockBackend {
            live_ok: true,
            ..Default::default()
        };
        let log = mock.log();
        let mut controller = ShellController::new(Box::new(mock));
        controller.start_live().expect("start succeeds");
        assert_eq!(controller.dismiss_live(), Ok(ActionOutcome::LiveStopped));
        assert!(!controller.is_live());
        assert!(controller.display().live_note.is_none());
        assert_eq!(*log.lock().unwrap(), vec!["start_live", "stop_live"]);
    }

    #[test]
    fn failed_dismiss_keeps_session_and_note() {
        let mock = MockBackend {
            live_ok: true,
            ..Default::default()
        };
        let mut controller = ShellController::new(Box::new(mock));
        controller.start_live().expect("start succeeds");
        controller.set_client(Box::new(MockBackend::default()));
        assert!(controller.dismiss_live().is_err());
        assert!(controller.is_live());
        assert_eq!(
            controller.display().live_note.as_deref(),
            Some(LIVE_STARTED_NOTE)
        );
    }

    #[test]
    fn video_response_written_verbatim_overwriting_prior_file() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("processed_video.mp4");
        fs::write(&out, b"stale earlier output").unwrap();

        let mock = MockBackend {
            video_response: Some(b"fresh mp4 bytes".to_vec()),
            ..Default::default()
        };
        let mut controller = ShellController::new(Box::new(mock)).with_video_output(&out);
        let outcome = controller.upload_video(Some(Path::new("clip.mp4")));
        assert_eq!(outcome, Ok(ActionOutcome::VideoSaved(out.clone())));
        assert_eq!(fs::read(&out).unwrap(), b"fresh mp4 bytes");
        assert_eq!(controller.display().video_path.as_deref(), Some(out.as_path()));
    }

    #[test]
    fn video_write_failure_is_collapsed_and_display_unchanged() {
        let tmp = TempDir::new().unwrap();
        // Output path points at a directory, so the write must fail.
        let mock = MockBackend {
            video_response: Some(b"bytes".to_vec()),
            ..Default::default()
        };
        let mut controller = ShellController::new(Box::new(mock)).with_video_output(tmp.path());
        let outcome = controller.upload_video(Some(Path::new("clip.mp4")));
        assert_eq!(
            outcome,
            Err(ActionFailure {
                message: VIDEO_UPLOAD_FAILED
            })
        );
        assert!(controller.display().video_path.is_none());
    }

    // Risk, preserved as observed: delete-all is irreversible yet fires with
    // no confirmation step between the caller's intent and the request.
    #[test]
    fn delete_all_fires_once_with_no_confirmation_guard() {
        let mock = MockBackend {
            live_ok: true,
            ..Default::default()
        };
        let log = mock.log();
        let mut controller = ShellController::new(Box::new(mock));
        controller.delete_all().expect("delete succeeds");
        assert_eq!(*log.lock().unwrap(), vec!["delete_all"]);
        assert_eq!(
            controller.display().status.as_deref(),
            Some(ALL_FILES_DELETED_NOTE)
        );
    }

    #[test]
    fn delete_all_failure_is_not_retried() {
        let mock = MockBackend::default();
        let log = mock.log();
        let mut controller = ShellController::new(Box::new(mock));
        assert!(controller.delete_all().is_err());
        assert_eq!(*log.lock().unwrap(), vec!["delete_all"]);
        assert!(controller.display().status.is_none());
    }

    #[rstest]
    #[case::image(IMAGE_UPLOAD_FAILED)]
    #[case::video(VIDEO_UPLOAD_FAILED)]
    #[case::start(LIVE_START_FAILED)]
    #[case::stop(LIVE_STOP_FAILED)]
    #[case::delete(DELETE_ALL_FAILED)]
    fn failures_collapse_to_one_line(#[case] expected: &'static str) {
        let mut controller = ShellController::new(Box::new(MockBackend::default()));
        let failure = match expected {
            IMAGE_UPLOAD_FAILED => controller.upload_image(Some(Path::new("a.jpg"))),
            VIDEO_UPLOAD_FAILED => controller.upload_video(Some(Path::new("a.mp4"))),
            LIVE_START_FAILED => controller.start_live(),
            LIVE_STOP_FAILED => controller.stop_live(),
            _ => controller.delete_all(),
        }
        .unwrap_err();
        assert_eq!(failure.message, expected);
    }

    #[test]
    fn clear_controls_reset_their_slot_only() {
        let mock = MockBackend {
            image_response: Some(b"img".to_vec()),
            live_ok: true,
            ..Default::default()
        };
        let mut controller = ShellController::new(Box::new(mock));
        controller.upload_image(Some(Path::new("a.jpg"))).unwrap();
        controller.start_live().unwrap();
        controller.delete_all().unwrap();

        controller.clear_image();
        assert!(controller.display().image.is_none());
        assert!(controller.display().live_note.is_some());
        assert!(controller.display().status.is_some());

        controller.clear_live_note();
        controller.clear_status();
        assert_eq!(controller.display(), &DisplayState::default());
    }
}

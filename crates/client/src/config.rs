//! Backend endpoints and client defaults.

/// Default backend base address, used when nothing is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Default camera index sent in the start-live payload.
pub const DEFAULT_DEVICE: u32 = 0;

/// Filename the processed video response is written to.
pub const PROCESSED_VIDEO_FILENAME: &str = "processed_video.mp4";

pub const UPLOAD_IMAGE_ENDPOINT: &str = "/upload_image";
pub const UPLOAD_VIDEO_ENDPOINT: &str = "/upload_video";
pub const START_LIVE_ENDPOINT: &str = "/start_live";
pub const STOP_LIVE_ENDPOINT: &str = "/stop_live";
pub const DELETE_ALL_ENDPOINT: &str = "/delete_all";

/// MJPEG page the backend serves while a live session runs. The shell never
/// consumes the stream itself; it hands this address to the browser.
pub const LIVE_VIEW_ENDPOINT: &str = "/video_feed";

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "mkv", "webm"];

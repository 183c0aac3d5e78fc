use std::path::Path;

use crate::error::ClientError;

/// Domain interface for the detection backend.
///
/// One method per backend operation, each a single blocking round trip.
/// `Send` so a controller holding an implementation can run on a worker
/// thread.
pub trait BackendClient: Send {
    /// Upload an image for detection; the returned bytes are the annotated
    /// image, encoded.
    fn upload_image(&self, path: &Path) -> Result<Vec<u8>, ClientError>;

    /// Upload a video for detection; the returned bytes are the processed
    /// video file, verbatim.
    fn upload_video(&self, path: &Path) -> Result<Vec<u8>, ClientError>;

    /// Start a live camera session on the backend using the given device
    /// index. The response body carries no information the shell uses.
    fn start_live(&self, device: u32) -> Result<(), ClientError>;

    /// Stop the live camera session.
    fn stop_live(&self) -> Result<(), ClientError>;

    /// Delete every uploaded and processed file the backend holds.
    /// Irreversible; the backend offers no undo.
    fn delete_all(&self) -> Result<(), ClientError>;
}

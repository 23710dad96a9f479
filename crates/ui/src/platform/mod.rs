use std::path::Path;
use std::sync::Arc;

mod opener;
mod webcam;

pub trait UiFileOpener: Send + Sync {
    fn open_path(&self, path: &Path);
}

pub type FileOpenerRef = Arc<dyn UiFileOpener>;

pub use opener::DesktopFileOpener;
pub use webcam::{PREVIEW_ELEMENT_ID, WebviewCamera, attach_preview_script};

use std::path::Path;
use std::process::Command;

use tracing::warn;

use super::UiFileOpener;

/// Opens exported files with the desktop's default viewer.
pub struct DesktopFileOpener;

impl UiFileOpener for DesktopFileOpener {
    fn open_path(&self, path: &Path) {
        if !path.exists() {
            warn!(path = %path.display(), "cannot open missing file");
            return;
        }
        #[cfg(target_os = "macos")]
        let spawned = Command::new("open").arg(path).spawn();
        #[cfg(target_os = "windows")]
        let spawned = Command::new("cmd")
            .args(["/C", "start", ""])
            .arg(path)
            .spawn();
        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        let spawned = Command::new("xdg-open").arg(path).spawn();

        if let Err(err) = spawned {
            warn!(path = %path.display(), error = %err, "failed to open file");
        }
    }
}

use async_trait::async_trait;
use dioxus::document::eval;
use serde::Deserialize;
use services::{CameraDevice, CameraError, StreamHandle};
use tracing::debug;

/// Element id of the `<video>` tag that shows the proctoring preview.
pub const PREVIEW_ELEMENT_ID: &str = "proctor-video";

const ACQUIRE_SCRIPT: &str = r#"(async function() {
    const registry = window.__quizProctor || (window.__quizProctor = {
        next: 1,
        current: null,
        streams: {},
    });
    try {
        const stream = await navigator.mediaDevices.getUserMedia({ video: true });
        const id = registry.next++;
        registry.streams[id] = stream;
        dioxus.send({ stream: id, error: null, denied: false });
    } catch (err) {
        const denied = !!err && (err.name === "NotAllowedError" || err.name === "SecurityError");
        dioxus.send({ stream: null, error: String(err), denied: denied });
    }
})();"#;

#[derive(Debug, Deserialize)]
struct AcquireReply {
    stream: Option<u64>,
    error: Option<String>,
    denied: bool,
}

/// Camera backed by `getUserMedia` inside the desktop webview.
///
/// Streams live in a registry on `window` keyed by handle id, so release can
/// stop the exact stream it was given even if a newer one exists. A new
/// stream is only registered; it becomes `current` once it is attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebviewCamera;

#[async_trait(?Send)]
impl CameraDevice for WebviewCamera {
    async fn acquire(&self) -> Result<StreamHandle, CameraError> {
        let mut script = eval(ACQUIRE_SCRIPT);
        let reply: AcquireReply = script
            .recv()
            .await
            .map_err(|err| CameraError::Device(format!("{err:?}")))?;

        match reply {
            AcquireReply {
                stream: Some(id), ..
            } => Ok(StreamHandle::new(id)),
            AcquireReply { denied: true, .. } => Err(CameraError::PermissionDenied),
            AcquireReply { error, .. } => Err(CameraError::Device(
                error.unwrap_or_else(|| "unknown camera error".to_string()),
            )),
        }
    }

    async fn attach(&self, handle: StreamHandle) {
        debug!(stream = handle.value(), "showing webview camera stream");
        let _ = eval(&attach_script(handle.value()));
    }

    async fn release(&self, handle: StreamHandle) {
        debug!(stream = handle.value(), "stopping webview camera stream");
        let _ = eval(&release_script(handle.value()));
    }
}

fn release_script(id: u64) -> String {
    format!(
        r#"(function() {{
    const registry = window.__quizProctor;
    if (!registry) return;
    const stream = registry.streams[{id}];
    if (stream) {{
        stream.getTracks().forEach((track) => track.stop());
        delete registry.streams[{id}];
    }}
    if (registry.current === {id}) {{
        registry.current = null;
        const video = document.getElementById({PREVIEW_ELEMENT_ID:?});
        if (video) video.srcObject = null;
    }}
}})();"#
    )
}

fn attach_script(id: u64) -> String {
    format!(
        r#"(function() {{
    const registry = window.__quizProctor;
    if (!registry || !registry.streams[{id}]) return;
    registry.current = {id};
    const video = document.getElementById({PREVIEW_ELEMENT_ID:?});
    if (video) video.srcObject = registry.streams[{id}];
}})();"#
    )
}

/// Script that attaches the live stream to a freshly mounted preview element.
#[must_use]
pub fn attach_preview_script() -> String {
    format!(
        r#"(function() {{
    const registry = window.__quizProctor;
    const video = document.getElementById({PREVIEW_ELEMENT_ID:?});
    if (!registry || !video || !registry.current) return;
    const stream = registry.streams[registry.current];
    if (stream && video.srcObject !== stream) video.srcObject = stream;
}})();"#
    )
}

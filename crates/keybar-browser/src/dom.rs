//! Small DOM helpers shared by the browser modules.

use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

use keybar_core::PlatformError;

pub(crate) fn html_document() -> Option<HtmlDocument> {
    web_sys::window()?.document()?.dyn_into::<HtmlDocument>().ok()
}

/// Run a `document.execCommand`. `Ok(false)` means the browser refused.
pub(crate) fn exec_command(command: &str) -> Result<bool, PlatformError> {
    let doc = html_document().ok_or("no document")?;
    doc.exec_command(command)
        .map_err(|e| PlatformError(format!("execCommand({command}) threw: {e:?}")))
}

pub(crate) fn exec_command_with_value(command: &str, value: &str) -> Result<bool, PlatformError> {
    let doc = html_document().ok_or("no document")?;
    doc.exec_command_with_show_ui_and_value(command, false, value)
        .map_err(|e| PlatformError(format!("execCommand({command}) threw: {e:?}")))
}

/// Drop `value` once the current event handler has returned.
///
/// Listeners and timers can't be dropped from inside their own callback.
pub(crate) fn defer_drop<T: 'static>(value: T) {
    wasm_bindgen_futures::spawn_local(async move {
        drop(value);
    });
}

//! System clipboard access through `arboard`.

use crate::markdown::{Clipboard, CopyError};

/// Clipboard backed by the platform clipboard.
///
/// The handle is opened on the first write and kept for the lifetime of the
/// value, since on X11 the selection is only served while it is alive.
#[derive(Default)]
pub struct SystemClipboard {
    #[cfg(not(target_os = "android"))]
    inner: Option<arboard::Clipboard>,
}

#[cfg(not(target_os = "android"))]
impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), CopyError> {
        let clipboard = match &mut self.inner {
            Some(clipboard) => clipboard,
            slot => slot.insert(arboard::Clipboard::new().map_err(open_error)?),
        };
        clipboard.set_text(text).map_err(write_error)
    }
}

#[cfg(target_os = "android")]
impl Clipboard for SystemClipboard {
    fn write_text(&mut self, _text: &str) -> Result<(), CopyError> {
        Err(CopyError::Unavailable("not supported on this platform".into()))
    }
}

#[cfg(not(target_os = "android"))]
fn open_error(err: arboard::Error) -> CopyError {
    CopyError::Unavailable(err.to_string())
}

#[cfg(not(target_os = "android"))]
fn write_error(err: arboard::Error) -> CopyError {
    match err {
        arboard::Error::ClipboardNotSupported => CopyError::Unavailable(err.to_string()),
        other => CopyError::Write(other.to_string()),
    }
}

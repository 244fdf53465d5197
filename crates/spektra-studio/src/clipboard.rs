use anyhow::{Context, Result};

/// Destination for copied text.
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// The system clipboard via `arboard`.
///
/// The handle is opened on first use and kept for the rest of the session:
/// on X11 the copied text is only served while the handle is alive.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        let cb = match self.inner.take() {
            Some(cb) => cb,
            None => arboard::Clipboard::new().context("clipboard unavailable")?,
        };
        self.inner
            .insert(cb)
            .set_text(text.to_owned())
            .context("clipboard write failed")
    }
}

use thiserror::Error;

/// Why a clipboard write did not go through
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("clipboard write failed: {0}")]
pub struct ClipboardError(pub String);

/// Host capabilities the copy utility needs
///
/// In the browser these map onto the Clipboard API, a temporary `textarea`
/// with `execCommand("copy")`, and a modal overlay. Tests provide a recorder.
pub trait PlatformServices {
    /// Whether the asynchronous clipboard-write capability exists
    fn has_clipboard(&self) -> bool;

    /// Writes `text` through the clipboard-write capability
    fn write_clipboard(&mut self, text: &str) -> Result<(), ClipboardError>;

    /// Copies `text` through an offscreen editable field and the legacy copy command
    fn legacy_copy(&mut self, text: &str) -> Result<(), ClipboardError>;

    /// Shows a dismissible confirmation with `message`
    fn show_confirmation(&mut self, message: &str);
}

/// Copies `text` and always tells the user it worked
///
/// The primary clipboard capability is used when present, otherwise the
/// legacy fallback. Either way the outcome is not checked: failures are
/// logged and the confirmation is shown regardless.
///
/// # Arguments
/// * `platform` - Host services performing the copy and showing the dialog
/// * `text` - Text to place on the clipboard
/// * `message` - Confirmation text shown to the user
pub fn copy_to_clipboard<P: PlatformServices + ?Sized>(platform: &mut P, text: &str, message: &str) {
    let result = if platform.has_clipboard() {
        platform.write_clipboard(text)
    } else {
        platform.legacy_copy(text)
    };

    if let Err(e) = result {
        log::debug!("ignoring {}", e);
    }

    platform.show_confirmation(message);
}

/// Label state of a "copy" button in the gift panel
///
/// Once clicked the button keeps showing the copied label for as long as the
/// page is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyButton {
    idle_label: String,
    copied_label: String,
    copied: bool,
}

impl CopyButton {
    pub fn new(idle_label: &str, copied_label: &str) -> Self {
        Self {
            idle_label: idle_label.to_string(),
            copied_label: copied_label.to_string(),
            copied: false,
        }
    }

    pub fn label(&self) -> &str {
        if self.copied {
            &self.copied_label
        } else {
            &self.idle_label
        }
    }

    pub fn is_copied(&self) -> bool {
        self.copied
    }

    /// Copies `text`, shows `message`, and flips the button to its copied label
    pub fn click<P: PlatformServices + ?Sized>(&mut self, platform: &mut P, text: &str, message: &str) {
        copy_to_clipboard(platform, text, message);
        self.copied = true;
    }
}

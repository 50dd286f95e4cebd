use undangan::clipboard::{ClipboardError, CopyButton, PlatformServices, copy_to_clipboard};

#[derive(Default)]
struct RecordingPlatform {
    clipboard_available: bool,
    clipboard_fails: bool,
    legacy_fails: bool,
    written: Vec<String>,
    legacy_copied: Vec<String>,
    dialogs: Vec<String>,
}

impl PlatformServices for RecordingPlatform {
    fn has_clipboard(&self) -> bool {
        self.clipboard_available
    }

    fn write_clipboard(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.clipboard_fails {
            return Err(ClipboardError("permission denied".to_string()));
        }
        self.written.push(text.to_string());
        Ok(())
    }

    fn legacy_copy(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.legacy_fails {
            return Err(ClipboardError("execCommand unsupported".to_string()));
        }
        self.legacy_copied.push(text.to_string());
        Ok(())
    }

    fn show_confirmation(&mut self, message: &str) {
        self.dialogs.push(message.to_string());
    }
}

#[test]
fn uses_clipboard_when_available() {
    let mut platform = RecordingPlatform {
        clipboard_available: true,
        ..Default::default()
    };
    copy_to_clipboard(&mut platform, "0462804871", "Nomor rekening berhasil disalin!");

    assert_eq!(platform.written, vec!["0462804871"]);
    assert!(platform.legacy_copied.is_empty());
    assert_eq!(platform.dialogs, vec!["Nomor rekening berhasil disalin!"]);
}

#[test]
fn falls_back_without_clipboard() {
    let mut platform = RecordingPlatform::default();
    copy_to_clipboard(&mut platform, "Jl. Wanasida\nDusun 3", "Alamat berhasil disalin!");

    assert!(platform.written.is_empty());
    assert_eq!(platform.legacy_copied, vec!["Jl. Wanasida\nDusun 3"]);
    assert_eq!(platform.dialogs.len(), 1);
}

#[test]
fn failed_write_still_confirms() {
    let mut platform = RecordingPlatform {
        clipboard_available: true,
        clipboard_fails: true,
        ..Default::default()
    };
    copy_to_clipboard(&mut platform, "0971122624", "Disalin!");

    assert!(platform.written.is_empty());
    assert_eq!(platform.dialogs, vec!["Disalin!"]);
}

#[test]
fn failed_fallback_still_confirms() {
    let mut platform = RecordingPlatform {
        legacy_fails: true,
        ..Default::default()
    };
    copy_to_clipboard(&mut platform, "0971122624", "Disalin!");
    assert_eq!(platform.dialogs, vec!["Disalin!"]);
}

#[test]
fn copy_button_stays_copied() {
    let mut platform = RecordingPlatform::default();
    let mut button = CopyButton::new("Salin No. Rek", "Tersalin!");
    assert_eq!(button.label(), "Salin No. Rek");
    assert!(!button.is_copied());

    button.click(&mut platform, "0462804871", "Disalin!");
    assert_eq!(button.label(), "Tersalin!");

    button.click(&mut platform, "0462804871", "Disalin!");
    assert_eq!(button.label(), "Tersalin!");
    assert_eq!(platform.dialogs.len(), 2);
}

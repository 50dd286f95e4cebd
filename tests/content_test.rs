use std::fs;

use undangan::InvitationError;
use undangan::content::InvitationContent;

#[test]
fn loads_overrides_from_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("content.json");
    fs::write(
        &path,
        r#"{
            "default_guest": "Sahabat",
            "cover_images": ["/assets/a.jpg", "/assets/b.jpg"],
            "countdown": { "target": "2030-01-01T08:00:00+07:00" }
        }"#,
    )
    .unwrap();

    let content = InvitationContent::load(&path).unwrap();
    assert_eq!(content.default_guest, "Sahabat");
    assert_eq!(content.cover_pool().unwrap().len(), 2);
    assert!(content.countdown_target().instant().is_some());
    assert_eq!(content.couple, "Dewi & Arya");
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = InvitationContent::load(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, InvitationError::Io { .. }));
}

#[test]
fn malformed_file_is_a_content_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("content.json");
    fs::write(&path, "{ \"couple\": 42 }").unwrap();

    let err = InvitationContent::load(&path).unwrap_err();
    assert!(matches!(err, InvitationError::Content { .. }));
}

#[test]
fn no_path_means_built_in_content() {
    let content = InvitationContent::load_or_default(None).unwrap();
    assert_eq!(content, InvitationContent::default());
}

#[test]
fn default_target_is_midnight_western_indonesia() {
    let content = InvitationContent::default();
    let instant = content.countdown_target().instant().unwrap();
    assert_eq!(instant.to_rfc3339(), "2025-06-21T17:00:00+00:00");
}

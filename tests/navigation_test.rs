use undangan::navigation::{HOME_SECTION, SectionNav};

#[test]
fn starts_on_home_without_highlight() {
    let nav = SectionNav::default();
    assert_eq!(nav.active(), HOME_SECTION);
    assert!(nav.sections().iter().all(|s| !nav.is_active(&s.id)));
}

#[test]
fn selecting_a_section_moves_the_highlight() {
    let mut nav = SectionNav::default();
    assert_eq!(nav.select("acara"), Some("acara"));
    assert!(nav.is_active("acara"));

    assert_eq!(nav.select("hadiah"), Some("hadiah"));
    assert!(!nav.is_active("acara"));
    assert!(nav.is_active("hadiah"));
}

#[test]
fn unknown_section_is_ignored() {
    let mut nav = SectionNav::default();
    nav.select("lokasi");
    assert_eq!(nav.select("galeri"), None);
    assert_eq!(nav.active(), "lokasi");
}

#[test]
fn labels_follow_page_order() {
    let nav = SectionNav::default();
    let labels: Vec<&str> = nav.sections().iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["Home", "Kisah", "Acara", "Lokasi", "Hadiah"]);
}

use serde::{Deserialize, Serialize};

/// Anchor of the hero section at the top of the main page
pub const HOME_SECTION: &str = "home";

/// One entry of the bottom navigation bar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub label: String,
}

impl Section {
    pub fn new(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
        }
    }
}

/// Sections of the main page in the order they appear in the bar
pub fn default_sections() -> Vec<Section> {
    vec![
        Section::new("pengantin", "Home"),
        Section::new("cerita", "Kisah"),
        Section::new("acara", "Acara"),
        Section::new("lokasi", "Lokasi"),
        Section::new("hadiah", "Hadiah"),
    ]
}

/// Bottom navigation state
///
/// The page starts on the hero section, which has no entry of its own, so
/// nothing is highlighted until the guest picks a section.
#[derive(Debug, Clone)]
pub struct SectionNav {
    sections: Vec<Section>,
    active: String,
}

impl SectionNav {
    pub fn new(sections: Vec<Section>) -> Self {
        Self {
            sections,
            active: HOME_SECTION.to_string(),
        }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn active(&self) -> &str {
        &self.active
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active == id
    }

    /// Activates the section with `id`
    ///
    /// # Returns
    /// * The anchor to scroll to, or `None` when no such section exists
    pub fn select(&mut self, id: &str) -> Option<&str> {
        let section = self.sections.iter().find(|s| s.id == id)?;
        self.active = section.id.clone();
        Some(&section.id)
    }
}

impl Default for SectionNav {
    fn default() -> Self {
        Self::new(default_sections())
    }
}

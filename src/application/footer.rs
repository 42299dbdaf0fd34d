// src/application/footer.rs
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub label: String,
    /// Font Awesome classes, e.g. `fa-brands fa-instagram`
    pub icon: String,
    #[serde(default)]
    pub href: String,
}

impl SocialLink {
    pub fn new(label: &str, icon: &str, href: &str) -> Self {
        Self {
            label: label.to_string(),
            icon: icon.to_string(),
            href: href.to_string(),
        }
    }
}

/// The `notes-footer` element. Static content, no calls, no state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesFooter {
    links: Vec<SocialLink>,
    copyright: String,
}

impl NotesFooter {
    pub fn new(links: Vec<SocialLink>, copyright: impl Into<String>) -> Self {
        Self {
            links,
            copyright: copyright.into(),
        }
    }

    pub fn links(&self) -> &[SocialLink] {
        &self.links
    }

    pub fn copyright(&self) -> &str {
        &self.copyright
    }

    pub fn default_links() -> Vec<SocialLink> {
        vec![
            SocialLink::new("Instagram", "fa-brands fa-instagram", ""),
            SocialLink::new("Facebook", "fa-brands fa-facebook", ""),
            SocialLink::new("Twitter", "fa-brands fa-twitter", ""),
        ]
    }

    pub fn default_copyright() -> String {
        "Copyright © 2025; Designed by PERWIRA203".to_string()
    }
}

impl Default for NotesFooter {
    fn default() -> Self {
        Self::new(Self::default_links(), Self::default_copyright())
    }
}

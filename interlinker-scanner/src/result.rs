use serde::{Deserialize, Serialize};

/// One outbound same-host link found on a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hyperlink {
    pub target_url: String,
    pub anchor_text: String,
}

impl Hyperlink {
    pub fn new(target_url: impl Into<String>, anchor_text: impl Into<String>) -> Self {
        Self {
            target_url: target_url.into(),
            anchor_text: anchor_text.into(),
        }
    }
}

/// A visited page and the links extracted from it.
///
/// A page whose fetch failed is still recorded, with no links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub url: String,
    pub outbound_links: Vec<Hyperlink>,
}

impl Page {
    pub fn new(url: impl Into<String>, outbound_links: Vec<Hyperlink>) -> Self {
        Self {
            url: url.into(),
            outbound_links,
        }
    }
}

/// Data structures for visited case pages
use serde::{Deserialize, Serialize};

/// A case page the user has visited
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VisitedPageRecord {
    pub id: String,
    pub url: String,
    pub title: String,
}

/// Most-recently-touched first
pub type VisitedPageList = Vec<VisitedPageRecord>;

impl VisitedPageRecord {
    pub fn new(id: &str, url: &str, title: &str) -> VisitedPageRecord {
        VisitedPageRecord {
            id: id.to_string(),
            url: url.to_string(),
            title: title.to_string(),
        }
    }

    /// Label shown in the panel. An empty title falls back to the case id;
    /// the fallback is never written back to storage.
    pub fn display_label(&self) -> String {
        if self.title.is_empty() {
            format!("Case {}", self.id)
        } else {
            self.title.clone()
        }
    }
}

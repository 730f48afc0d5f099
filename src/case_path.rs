/// Case id extraction from page addresses
use regex::Regex;
use url::Url;

use crate::error::{Result, WidgetError};

/// Default classification rule: the segment right after `/case/`.
pub const DEFAULT_CASE_PATH_PATTERN: &str = r"/case/([^/?#&]+)";

/// Decides whether an address is a trackable case page.
///
/// The pattern is matched against the path of the address only, so query
/// strings and fragments never produce an id. The first capture group is the
/// case id.
///
/// Examples:
/// - https://app.test/case/42?tab=notes → 42
/// - /team/7/case/abc-9/notes → abc-9
/// - https://app.test/dashboard → no match
#[derive(Debug, Clone)]
pub struct CasePattern {
    regex: Regex,
}

impl CasePattern {
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)?;

        // captures_len counts the implicit whole-match group
        if regex.captures_len() < 2 {
            return Err(WidgetError::MissingCapture(pattern.to_string()));
        }

        Ok(CasePattern { regex })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Extract the case id from a full URL or a bare path
    pub fn case_id(&self, address: &str) -> Option<String> {
        let path = extract_path(address)?;

        self.regex
            .captures(&path)?
            .get(1)
            .map(|m| m.as_str().to_string())
            .filter(|id| !id.is_empty())
    }
}

impl Default for CasePattern {
    fn default() -> Self {
        CasePattern {
            regex: Regex::new(DEFAULT_CASE_PATH_PATTERN).expect("default case pattern compiles"),
        }
    }
}

/// Path component of an address. Relative addresses ("/case/1?x=y") are
/// accepted by cutting at the first query or fragment marker.
fn extract_path(address: &str) -> Option<String> {
    let address = address.trim();
    if address.is_empty() {
        return None;
    }

    match Url::parse(address) {
        Ok(url) => Some(url.path().to_string()),
        Err(_) => address
            .split(['?', '#'])
            .next()
            .map(|path| path.to_string()),
    }
}

//! Browser family classification.
//!
//! Built once from the inverted browser table after parsing completes. Each
//! tracked family holds an ascending list of browser ids whose display string
//! contains the family substring (case-sensitive); a string matching several
//! families lands in all of them. Membership is a binary search.

pub const CHROME_FAMILY: &str = "Chrome";
pub const IE_FAMILY: &str = "Internet Explorer";

#[derive(Debug, Default)]
pub struct BrowserClassifier {
    chrome_ids: Vec<u32>,
    ie_ids: Vec<u32>,
}

impl BrowserClassifier {
    /// Scans the inverted browser table. Table index order is id order, so
    /// both lists come out sorted ascending without an extra sort.
    pub fn build(browser_table: &[String]) -> Self {
        let mut chrome_ids = Vec::new();
        let mut ie_ids = Vec::new();

        for (id, name) in browser_table.iter().enumerate() {
            let id = id as u32;
            if name.contains(IE_FAMILY) {
                ie_ids.push(id);
            }
            if name.contains(CHROME_FAMILY) {
                chrome_ids.push(id);
            }
        }

        Self { chrome_ids, ie_ids }
    }

    pub fn is_chrome(&self, id: u32) -> bool {
        self.chrome_ids.binary_search(&id).is_ok()
    }

    pub fn is_ie(&self, id: u32) -> bool {
        self.ie_ids.binary_search(&id).is_ok()
    }
}

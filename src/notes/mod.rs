//! Note records and the in-memory batch repository.
//!
//! A [`NoteRecord`] is created once per uploaded file and never mutated.
//! Records live only for the current batch; there is no persistence across
//! runs. The repository answers keyword/category filter queries and groups
//! records for display.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of topic labels a note can be classified into.
///
/// The classifier's raw label is validated against this set; anything outside
/// it falls back to [`Category::Other`] rather than being trusted verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Life,
    Food,
    Tech,
    CurrentEvents,
    Travel,
    Entertainment,
    Learning,
    #[default]
    Other,
}

impl Category {
    /// All categories, in prompt order.
    pub const ALL: [Category; 8] = [
        Category::Life,
        Category::Food,
        Category::Tech,
        Category::CurrentEvents,
        Category::Travel,
        Category::Entertainment,
        Category::Learning,
        Category::Other,
    ];

    /// Parse a classifier label, accepting both the canonical kebab-case names
    /// and the traditional-Chinese labels used in the prompt.
    ///
    /// Returns `None` for labels outside the fixed set; callers decide the
    /// fallback (the classifier maps unknown labels to `Other`).
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "life" | "生活" => Some(Category::Life),
            "food" | "美食" => Some(Category::Food),
            "tech" | "科技" => Some(Category::Tech),
            "current-events" | "時事" => Some(Category::CurrentEvents),
            "travel" | "旅遊" => Some(Category::Travel),
            "entertainment" | "娛樂" => Some(Category::Entertainment),
            "learning" | "學習" => Some(Category::Learning),
            "other" | "其他" => Some(Category::Other),
            _ => None,
        }
    }

    /// The label used in the classification prompt.
    pub fn prompt_label(&self) -> &'static str {
        match self {
            Category::Life => "生活",
            Category::Food => "美食",
            Category::Tech => "科技",
            Category::CurrentEvents => "時事",
            Category::Travel => "旅遊",
            Category::Entertainment => "娛樂",
            Category::Learning => "學習",
            Category::Other => "其他",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Life => "life",
            Category::Food => "food",
            Category::Tech => "tech",
            Category::CurrentEvents => "current-events",
            Category::Travel => "travel",
            Category::Entertainment => "entertainment",
            Category::Learning => "learning",
            Category::Other => "other",
        };
        write!(f, "{}", name)
    }
}

/// A single processed note: one per uploaded file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteRecord {
    /// Name of the uploaded file. Not enforced unique within a batch.
    pub filename: String,
    /// Topic assigned by the classifier, `Other` on parse failure.
    pub category: Category,
    /// Short summary, intended to stay under 100 characters (not enforced).
    pub summary: String,
    /// Full extracted text, unbounded.
    pub source_text: String,
}

/// Category filter with an "all" sentinel that bypasses category matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") || s == "全部" {
            return Ok(CategoryFilter::All);
        }
        Category::from_label(s)
            .map(CategoryFilter::Only)
            .ok_or_else(|| {
                format!(
                    "Unknown category: {}. Use 'all' or one of: {}",
                    s,
                    Category::ALL.map(|c| c.to_string()).join(", ")
                )
            })
    }
}

/// Append-only repository for the current batch of notes.
///
/// Write-once-per-batch, read-many: no deduplication, no update-in-place,
/// no deletion.
#[derive(Debug, Default)]
pub struct NoteStore {
    records: Vec<NoteRecord>,
}

impl NoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record to the batch.
    pub fn push(&mut self, record: NoteRecord) {
        self.records.push(record);
    }

    /// All records in append order.
    pub fn records(&self) -> &[NoteRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Filter the batch: keyword first (case-insensitive substring over
    /// `source_text`), then category (exact match, `All` bypasses).
    ///
    /// With neither filter set this is the identity.
    pub fn filter(&self, keyword: Option<&str>, category: &CategoryFilter) -> Vec<NoteRecord> {
        let mut result: Vec<NoteRecord> = match keyword {
            Some(kw) if !kw.is_empty() => {
                let needle = kw.to_lowercase();
                self.records
                    .iter()
                    .filter(|r| r.source_text.to_lowercase().contains(&needle))
                    .cloned()
                    .collect()
            }
            _ => self.records.clone(),
        };

        if let CategoryFilter::Only(cat) = category {
            result.retain(|r| r.category == *cat);
        }

        result
    }

    /// Distinct categories present in the given records, in first-appearance order.
    pub fn distinct_categories(records: &[NoteRecord]) -> Vec<Category> {
        let mut seen = Vec::new();
        for record in records {
            if !seen.contains(&record.category) {
                seen.push(record.category);
            }
        }
        seen
    }

    /// Partition records by category for display.
    ///
    /// Groups appear in order of first appearance; within a group, records
    /// keep their append order. Counting aside, there is no aggregation.
    pub fn group_by_category(records: &[NoteRecord]) -> Vec<(Category, Vec<NoteRecord>)> {
        let mut groups: Vec<(Category, Vec<NoteRecord>)> = Vec::new();
        for record in records {
            match groups.iter_mut().find(|(cat, _)| *cat == record.category) {
                Some((_, members)) => members.push(record.clone()),
                None => groups.push((record.category, vec![record.clone()])),
            }
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(filename: &str, category: Category, source_text: &str) -> NoteRecord {
        NoteRecord {
            filename: filename.to_string(),
            category,
            summary: format!("summary of {}", filename),
            source_text: source_text.to_string(),
        }
    }

    fn sample_store() -> NoteStore {
        let mut store = NoteStore::new();
        store.push(note("a.txt", Category::Life, "Morning coffee routine"));
        store.push(note("b.txt", Category::Tech, "Rust borrow checker notes"));
        store.push(note("c.txt", Category::Life, "Weekend COFFEE tasting"));
        store.push(note("d.txt", Category::Food, "Ramen place downtown"));
        store
    }

    #[test]
    fn test_filter_identity_when_unset() {
        let store = sample_store();
        let all = store.filter(None, &CategoryFilter::All);
        assert_eq!(all, store.records());
    }

    #[test]
    fn test_filter_keyword_case_insensitive() {
        let store = sample_store();
        let hits = store.filter(Some("coffee"), &CategoryFilter::All);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].filename, "a.txt");
        assert_eq!(hits[1].filename, "c.txt");
    }

    #[test]
    fn test_filter_empty_keyword_is_identity() {
        let store = sample_store();
        let all = store.filter(Some(""), &CategoryFilter::All);
        assert_eq!(all.len(), 4);
    }

    #[test]
    fn test_filter_category_exact() {
        let store = sample_store();
        let hits = store.filter(None, &CategoryFilter::Only(Category::Life));
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|r| r.category == Category::Life));
    }

    #[test]
    fn test_filter_keyword_then_category() {
        let store = sample_store();
        let hits = store.filter(Some("coffee"), &CategoryFilter::Only(Category::Life));
        assert_eq!(hits.len(), 2);

        let none = store.filter(Some("coffee"), &CategoryFilter::Only(Category::Tech));
        assert!(none.is_empty());
    }

    #[test]
    fn test_group_by_category_preserves_order() {
        let store = sample_store();
        let groups = NoteStore::group_by_category(store.records());

        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].0, Category::Life);
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[0].1[0].filename, "a.txt");
        assert_eq!(groups[0].1[1].filename, "c.txt");
        assert_eq!(groups[1].0, Category::Tech);
        assert_eq!(groups[2].0, Category::Food);
    }

    #[test]
    fn test_category_from_label_chinese_and_english() {
        assert_eq!(Category::from_label("生活"), Some(Category::Life));
        assert_eq!(Category::from_label("life"), Some(Category::Life));
        assert_eq!(Category::from_label("時事"), Some(Category::CurrentEvents));
        assert_eq!(Category::from_label("current-events"), Some(Category::CurrentEvents));
        assert_eq!(Category::from_label("astrology"), None);
    }

    #[test]
    fn test_category_filter_parse() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!("全部".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "food".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(Category::Food)
        );
        assert!("bogus".parse::<CategoryFilter>().is_err());
    }
}

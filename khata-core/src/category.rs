//! Keyword-based merchant categorization.
//!
//! Rules are an ordered list evaluated first-match-wins against the
//! lowercased description, so callers can prepend their own rules to
//! override the defaults.

use serde::{Deserialize, Serialize};

/// Spending category assigned from the transaction description
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    #[serde(rename = "food")]
    Food,
    #[serde(rename = "travel")]
    Travel,
    #[serde(rename = "shopping")]
    Shopping,
    #[serde(rename = "utilities")]
    Utilities,
    #[serde(rename = "medical")]
    Medical,
    #[serde(rename = "other")]
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Travel => "Travel",
            Category::Shopping => "Shopping",
            Category::Utilities => "Utilities",
            Category::Medical => "Medical",
            Category::Other => "Other",
        }
    }
}

/// A single categorization rule: any keyword hit assigns the category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryRule {
    pub category: Category,
    /// Lowercase substrings matched against the lowercased description
    pub keywords: Vec<String>,
}

impl CategoryRule {
    pub fn new(category: Category, keywords: &[&str]) -> Self {
        Self {
            category,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    fn matches(&self, desc: &str) -> bool {
        self.keywords.iter().any(|k| desc.contains(k.as_str()))
    }
}

/// Ordered rule list; earlier rules win
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ruleset {
    pub rules: Vec<CategoryRule>,
}

impl Default for Ruleset {
    fn default() -> Self {
        Self {
            rules: vec![
                CategoryRule::new(
                    Category::Food,
                    &["zomato", "restaurant", "cafe", "bar", "hotel", "veg", "swiggy"],
                ),
                CategoryRule::new(
                    Category::Travel,
                    &["uber", "ola", "taxi", "travel", "ksrtc", "depot", "bmtc"],
                ),
                CategoryRule::new(
                    Category::Shopping,
                    &["amazon", "flipkart", "shopping", "store", "myntra"],
                ),
                CategoryRule::new(
                    Category::Utilities,
                    &["bill", "electricity", "water", "utility"],
                ),
                CategoryRule::new(
                    Category::Medical,
                    &["hospital", "pharma", "medical", "doctor"],
                ),
            ],
        }
    }
}

impl Ruleset {
    /// Categorize a description; `Category::Other` when nothing matches.
    pub fn categorize(&self, description: &str) -> Category {
        let desc = description.to_lowercase();
        for rule in &self.rules {
            if rule.matches(&desc) {
                return rule.category;
            }
        }
        Category::Other
    }

    /// Insert a rule ahead of the existing ones so it takes priority.
    pub fn prepend(&mut self, rule: CategoryRule) {
        self.rules.insert(0, rule);
    }
}

//! Expense category table used to infer deductibility.

use serde::{Deserialize, Serialize};

/// Statutory exemptions first, then common personal spending.
pub const COMMON_EXPENSES: [(&str, bool); 9] = [
    ("National Housing Fund (NHF)", true),
    ("National Health Insurance (NHIS)", true),
    ("Life Assurance Premium", true),
    ("Rent", false),
    ("Food & Groceries", false),
    ("Transport", false),
    ("Utilities", false),
    ("Internet/Data", false),
    ("Savings/Investment", false),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomCategory {
    pub label: String,
    pub is_tax_deductible: bool,
}

/// Label to deductibility lookup. Matching ignores case and surrounding
/// whitespace but is otherwise exact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTable {
    entries: Vec<CustomCategory>,
}

impl CategoryTable {
    pub fn empty() -> Self {
        Self { entries: Vec::new() }
    }

    /// Table seeded with [`COMMON_EXPENSES`].
    pub fn common() -> Self {
        let entries = COMMON_EXPENSES
            .iter()
            .map(|(label, is_tax_deductible)| CustomCategory {
                label: label.to_string(),
                is_tax_deductible: *is_tax_deductible,
            })
            .collect();
        Self { entries }
    }

    /// Adds or replaces a category. Later definitions win.
    pub fn insert(
        &mut self,
        category: CustomCategory,
    ) {
        match self.position(&category.label) {
            Some(idx) => self.entries[idx] = category,
            None => self.entries.push(category),
        }
    }

    pub fn with_custom(
        mut self,
        custom: impl IntoIterator<Item = CustomCategory>,
    ) -> Self {
        for category in custom {
            self.insert(category);
        }
        self
    }

    pub fn lookup(
        &self,
        label: &str,
    ) -> Option<bool> {
        self.position(label).map(|idx| self.entries[idx].is_tax_deductible)
    }

    /// Falls back to `default` for unknown categories.
    pub fn is_tax_deductible(
        &self,
        label: &str,
        default: bool,
    ) -> bool {
        self.lookup(label).unwrap_or(default)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CustomCategory> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(
        &self,
        label: &str,
    ) -> Option<usize> {
        let wanted = label.trim();
        self.entries
            .iter()
            .position(|c| c.label.trim().eq_ignore_ascii_case(wanted))
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::common()
    }
}

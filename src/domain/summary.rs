use serde::ser::{Serialize, SerializeMap, Serializer};

use super::{Amount, Expense};

/// Case-insensitive category comparison used by every category filter.
pub fn matches_category(expense: &Expense, category: &str) -> bool {
    expense.category.to_lowercase() == category.to_lowercase()
}

/// Sum of amounts, optionally restricted to one category.
/// An empty category name means no filter.
pub fn total(expenses: &[Expense], category: Option<&str>) -> Amount {
    match category {
        Some(category) if !category.is_empty() => expenses
            .iter()
            .filter(|e| matches_category(e, category))
            .map(|e| e.amount)
            .sum(),
        _ => expenses.iter().map(|e| e.amount).sum(),
    }
}

/// Distinct category names, sorted.
/// Deduplication uses exact string equality, so "Food" and "food" both appear.
pub fn categories(expenses: &[Expense]) -> Vec<String> {
    let mut names: Vec<String> = expenses.iter().map(|e| e.category.clone()).collect();
    names.sort();
    names.dedup();
    names
}

/// Totals grouped by exact category string, in first-seen order.
pub fn summary_by_category(expenses: &[Expense]) -> CategorySummary {
    let mut summary = CategorySummary::default();
    for expense in expenses {
        summary.add(&expense.category, expense.amount);
    }
    summary
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Amount,
}

/// Per-category totals keeping the order in which categories were first seen.
/// Serializes as a JSON object `{category: total, ...}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategorySummary {
    entries: Vec<CategoryTotal>,
}

impl CategorySummary {
    fn add(&mut self, category: &str, amount: Amount) {
        match self.entries.iter_mut().find(|e| e.category == category) {
            Some(entry) => entry.total += amount,
            None => self.entries.push(CategoryTotal {
                category: category.to_string(),
                total: amount,
            }),
        }
    }

    pub fn get(&self, category: &str) -> Option<Amount> {
        self.entries
            .iter()
            .find(|e| e.category == category)
            .map(|e| e.total)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryTotal> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all category totals
    pub fn total(&self) -> Amount {
        self.entries.iter().map(|e| e.total).sum()
    }
}

impl Serialize for CategorySummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.category, &entry.total)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_expense(id: u64, amount: Amount, category: &str) -> Expense {
        Expense::new(id, amount, category, "", Some("2024-01-01".to_string()))
    }

    fn sample() -> Vec<Expense> {
        vec![
            make_expense(1, 12.5, "Food"),
            make_expense(2, 40.0, "Transport"),
            make_expense(3, 7.5, "food"),
            make_expense(4, 3.0, "Food"),
        ]
    }

    #[test]
    fn test_total_empty() {
        assert_eq!(total(&[], None), 0.0);
        assert_eq!(total(&[], Some("Food")), 0.0);
    }

    #[test]
    fn test_total_all() {
        assert_eq!(total(&sample(), None), 63.0);
    }

    #[test]
    fn test_total_by_category_ignores_case() {
        assert_eq!(total(&sample(), Some("FOOD")), 23.0);
        assert_eq!(total(&sample(), Some("transport")), 40.0);
        assert_eq!(total(&sample(), Some("Rent")), 0.0);
    }

    #[test]
    fn test_total_with_empty_category_is_unfiltered() {
        assert_eq!(total(&sample(), Some("")), 63.0);
    }

    #[test]
    fn test_categories_sorted_and_case_sensitive() {
        assert_eq!(categories(&sample()), vec!["Food", "Transport", "food"]);
    }

    #[test]
    fn test_summary_keeps_first_seen_order() {
        let summary = summary_by_category(&sample());
        let order: Vec<&str> = summary.iter().map(|e| e.category.as_str()).collect();

        assert_eq!(order, vec!["Food", "Transport", "food"]);
        assert_eq!(summary.get("Food"), Some(15.5));
        assert_eq!(summary.get("food"), Some(7.5));
        assert_eq!(summary.get("Rent"), None);
    }

    #[test]
    fn test_summary_total_matches_total() {
        let expenses = sample();
        assert_eq!(summary_by_category(&expenses).total(), total(&expenses, None));
    }

    #[test]
    fn test_summary_serializes_as_object_in_order() {
        let summary = summary_by_category(&sample());
        let json = serde_json::to_string(&summary).unwrap();
        assert_eq!(json, r#"{"Food":15.5,"Transport":40.0,"food":7.5}"#);
    }
}

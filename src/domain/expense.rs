use std::fmt;

use chrono::Local;
use serde::{Deserialize, Deserializer, Serialize};

use super::{Amount, format_amount};

pub type ExpenseId = u64;

/// Date format used for every expense date, both in memory and on disk.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Today's local date as `YYYY-MM-DD`.
pub fn today() -> String {
    Local::now().format(DATE_FORMAT).to_string()
}

/// A single expense entry.
///
/// Identifiers are minted by the ledger; an expense never exists outside it
/// without one. Amount, category and date are stored exactly as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub amount: Amount,
    /// Case is preserved; filtering by category ignores it.
    pub category: String,
    pub description: String,
    /// Calendar date as `YYYY-MM-DD`. Missing, null or empty in the store
    /// means today.
    #[serde(default = "today", deserialize_with = "date_or_today")]
    pub date: String,
}

fn date_or_today<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let date = Option::<String>::deserialize(deserializer)?;
    Ok(date.filter(|date| !date.is_empty()).unwrap_or_else(today))
}

impl Expense {
    /// Create an expense. A missing or empty date becomes today's date.
    pub fn new(
        id: ExpenseId,
        amount: Amount,
        category: impl Into<String>,
        description: impl Into<String>,
        date: Option<String>,
    ) -> Self {
        let date = match date {
            Some(date) if !date.is_empty() => date,
            _ => today(),
        };

        Self {
            id,
            amount,
            category: category.into(),
            description: description.into(),
            date,
        }
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] ${} - {}: {}",
            self.date,
            format_amount(self.amount),
            self.category,
            self.description
        )
    }
}

/// A partial update. `None` leaves a field untouched; `Some` always applies,
/// including `Some(0.0)` and `Some(String::new())`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseUpdate {
    pub amount: Option<Amount>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
}

impl ExpenseUpdate {
    pub fn with_amount(mut self, amount: Amount) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Returns true if no field would change
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.category.is_none()
            && self.description.is_none()
            && self.date.is_none()
    }

    pub fn apply(self, expense: &mut Expense) {
        if let Some(amount) = self.amount {
            expense.amount = amount;
        }
        if let Some(category) = self.category {
            expense.category = category;
        }
        if let Some(description) = self.description {
            expense.description = description;
        }
        if let Some(date) = self.date {
            expense.date = date;
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn lunch() -> Expense {
        Expense::new(1, 10.0, "Food", "lunch", Some("2024-01-01".to_string()))
    }

    #[test]
    fn test_create_expense() {
        let expense = lunch();

        assert_eq!(expense.id, 1);
        assert_eq!(expense.amount, 10.0);
        assert_eq!(expense.category, "Food");
        assert_eq!(expense.description, "lunch");
        assert_eq!(expense.date, "2024-01-01");
    }

    #[test]
    fn test_missing_date_defaults_to_today() {
        let expense = Expense::new(1, 5.0, "Food", "snack", None);
        assert!(NaiveDate::parse_from_str(&expense.date, DATE_FORMAT).is_ok());

        let expense = Expense::new(2, 5.0, "Food", "snack", Some(String::new()));
        assert!(NaiveDate::parse_from_str(&expense.date, DATE_FORMAT).is_ok());
    }

    #[test]
    fn test_date_is_not_validated() {
        let expense = Expense::new(1, 5.0, "Food", "snack", Some("yesterday".to_string()));
        assert_eq!(expense.date, "yesterday");
    }

    #[test]
    fn test_stored_record_without_date_defaults_to_today() {
        for record in [
            r#"{"id": 3, "amount": 1.0, "category": "Misc", "description": "gum"}"#,
            r#"{"id": 3, "amount": 1.0, "category": "Misc", "description": "gum", "date": null}"#,
            r#"{"id": 3, "amount": 1.0, "category": "Misc", "description": "gum", "date": ""}"#,
        ] {
            let expense: Expense = serde_json::from_str(record).unwrap();
            assert_eq!(expense.id, 3);
            assert!(NaiveDate::parse_from_str(&expense.date, DATE_FORMAT).is_ok());
        }

        let expense: Expense = serde_json::from_str(
            r#"{"id": 3, "amount": 1.0, "category": "Misc", "description": "gum", "date": "2024-01-01"}"#,
        )
        .unwrap();
        assert_eq!(expense.date, "2024-01-01");
    }

    #[test]
    fn test_display() {
        assert_eq!(lunch().to_string(), "[2024-01-01] $10.00 - Food: lunch");
    }

    #[test]
    fn test_serialized_field_names() {
        let value = serde_json::to_value(lunch()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": 1,
                "amount": 10.0,
                "category": "Food",
                "description": "lunch",
                "date": "2024-01-01"
            })
        );
    }

    #[test]
    fn test_partial_update_preserves_other_fields() {
        let mut expense = lunch();
        ExpenseUpdate::default()
            .with_category("Dining")
            .apply(&mut expense);

        assert_eq!(expense.amount, 10.0);
        assert_eq!(expense.category, "Dining");
        assert_eq!(expense.description, "lunch");
        assert_eq!(expense.date, "2024-01-01");
    }

    #[test]
    fn test_explicit_zero_and_empty_values_apply() {
        let mut expense = lunch();
        ExpenseUpdate::default()
            .with_amount(0.0)
            .with_description("")
            .apply(&mut expense);

        assert_eq!(expense.amount, 0.0);
        assert_eq!(expense.description, "");
        assert_eq!(expense.category, "Food");
    }

    #[test]
    fn test_empty_update() {
        assert!(ExpenseUpdate::default().is_empty());
        assert!(!ExpenseUpdate::default().with_date("2024-02-02").is_empty());
    }
}

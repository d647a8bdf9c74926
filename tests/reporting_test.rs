mod common;

use anyhow::Result;
use common::{SampleExpenses, test_ledger};

#[test]
fn test_basic_scenario() -> Result<()> {
    let (mut ledger, _temp) = test_ledger()?;
    SampleExpenses::create_basic(&mut ledger)?;

    assert_eq!(ledger.get_total(None), 52.50);

    let summary = ledger.get_summary_by_category();
    assert_eq!(summary.len(), 2);
    assert_eq!(summary.get("Food"), Some(12.50));
    assert_eq!(summary.get("Transport"), Some(40.00));

    Ok(())
}

#[test]
fn test_total_by_category() -> Result<()> {
    let (mut ledger, _temp) = test_ledger()?;
    SampleExpenses::create_mixed(&mut ledger)?;

    // Food + food + FOOD
    assert_eq!(ledger.get_total(Some("food")), 12.50 + 8.25 + 3.50);
    assert_eq!(ledger.get_total(Some("Rent")), 950.00);
    assert_eq!(ledger.get_total(Some("Groceries")), 0.0);

    Ok(())
}

#[test]
fn test_empty_ledger_reports() -> Result<()> {
    let (ledger, _temp) = test_ledger()?;

    assert_eq!(ledger.get_total(None), 0.0);
    assert!(ledger.get_categories().is_empty());
    assert!(ledger.get_summary_by_category().is_empty());

    Ok(())
}

#[test]
fn test_total_equals_sum_of_summary() -> Result<()> {
    let (mut ledger, _temp) = test_ledger()?;

    for step in 0..4 {
        let summary_sum: f64 = ledger
            .get_summary_by_category()
            .iter()
            .map(|entry| entry.total)
            .sum();
        assert!((ledger.get_total(None) - summary_sum).abs() < 1e-9, "step {step}");

        SampleExpenses::create_mixed(&mut ledger)?;
    }

    Ok(())
}

#[test]
fn test_categories_are_sorted_and_case_sensitive() -> Result<()> {
    let (mut ledger, _temp) = test_ledger()?;
    SampleExpenses::create_mixed(&mut ledger)?;

    assert_eq!(
        ledger.get_categories(),
        vec!["Entertainment", "FOOD", "Food", "Rent", "Transport", "food"]
    );

    Ok(())
}

#[test]
fn test_summary_groups_case_sensitively_in_first_seen_order() -> Result<()> {
    let (mut ledger, _temp) = test_ledger()?;
    SampleExpenses::create_mixed(&mut ledger)?;

    let summary = ledger.get_summary_by_category();
    let order: Vec<&str> = summary.iter().map(|e| e.category.as_str()).collect();

    assert_eq!(
        order,
        vec!["Food", "Transport", "food", "Rent", "Entertainment", "FOOD"]
    );
    assert_eq!(summary.get("Food"), Some(12.50));
    assert_eq!(summary.get("food"), Some(8.25));

    Ok(())
}

#[test]
fn test_summary_follows_updates_and_deletes() -> Result<()> {
    let (mut ledger, _temp) = test_ledger()?;
    SampleExpenses::create_basic(&mut ledger)?;

    ledger.update(
        2,
        expense_ledger::domain::ExpenseUpdate::default().with_category("Food"),
    )?;
    assert_eq!(ledger.get_summary_by_category().get("Food"), Some(52.50));
    assert_eq!(ledger.get_categories(), vec!["Food"]);

    ledger.delete(1)?;
    assert_eq!(ledger.get_total(Some("food")), 40.00);

    Ok(())
}

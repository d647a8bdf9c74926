use std::io::{BufRead, Write};

use anyhow::Result;

use crate::application::ExpenseLedger;
use crate::domain::{Expense, ExpenseId, ExpenseUpdate, format_amount, parse_amount};

const RULE_WIDTH: usize = 60;

/// Menu-driven loop over any input/output pair. Returns on choice 7 or at
/// end of input. Storage failures abort the loop with an error.
pub fn run_menu<R: BufRead, W: Write>(
    ledger: &mut ExpenseLedger,
    input: R,
    output: W,
) -> Result<()> {
    let mut console = Console { input, output };

    loop {
        console.print_menu()?;
        let Some(choice) = console.prompt("\nEnter your choice (1-7): ")? else {
            break;
        };

        let keep_going = match choice.as_str() {
            "1" => console.add_expense(ledger)?,
            "2" => console.view_expenses(ledger)?,
            "3" => console.view_summary(ledger)?,
            "4" => console.search_by_category(ledger)?,
            "5" => console.update_expense(ledger)?,
            "6" => console.delete_expense(ledger)?,
            "7" => {
                writeln!(console.output, "\nThank you for using Expense Tracker!")?;
                return Ok(());
            }
            _ => {
                writeln!(
                    console.output,
                    "\nInvalid choice. Please enter a number between 1 and 7."
                )?;
                true
            }
        };

        if !keep_going {
            break;
        }
    }

    writeln!(console.output, "\n\nExiting Expense Tracker...")?;
    Ok(())
}

struct Console<R, W> {
    input: R,
    output: W,
}

/// Each action returns `Ok(false)` when input ran out mid-way.
impl<R: BufRead, W: Write> Console<R, W> {
    /// Print `text` and read one trimmed line; `None` at end of input.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn print_header(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "\n{}", "=".repeat(RULE_WIDTH))?;
        writeln!(self.output, " {}", text)?;
        writeln!(self.output, "{}", "=".repeat(RULE_WIDTH))?;
        Ok(())
    }

    fn print_menu(&mut self) -> Result<()> {
        self.print_header("EXPENSE TRACKER")?;
        for line in [
            "1. Add Expense",
            "2. View All Expenses",
            "3. View Summary by Category",
            "4. Search by Category",
            "5. Update Expense",
            "6. Delete Expense",
            "7. Exit",
        ] {
            writeln!(self.output, "{}", line)?;
        }
        writeln!(self.output, "{}", "=".repeat(RULE_WIDTH))?;
        Ok(())
    }

    fn print_expenses(&mut self, expenses: &[Expense]) -> Result<()> {
        if expenses.is_empty() {
            writeln!(self.output, "No expenses found.")?;
            return Ok(());
        }

        writeln!(
            self.output,
            "\n{:<5} {:<12} {:<10} {:<15} DESCRIPTION",
            "ID", "DATE", "AMOUNT", "CATEGORY"
        )?;
        writeln!(self.output, "{}", "-".repeat(80))?;
        for expense in expenses {
            writeln!(
                self.output,
                "{:<5} {:<12} ${:<9} {:<15} {}",
                expense.id,
                expense.date,
                format_amount(expense.amount),
                expense.category,
                expense.description
            )?;
        }
        Ok(())
    }

    fn add_expense(&mut self, ledger: &mut ExpenseLedger) -> Result<bool> {
        self.print_header("Add New Expense")?;

        let Some(amount) = self.prompt("Enter amount: $")? else {
            return Ok(false);
        };
        let amount = match parse_amount(&amount) {
            Ok(amount) => amount,
            Err(_) => {
                writeln!(
                    self.output,
                    "Error: Invalid amount. Please enter a valid number."
                )?;
                return Ok(true);
            }
        };

        let Some(category) =
            self.prompt("Enter category (e.g., Food, Transport, Entertainment): ")?
        else {
            return Ok(false);
        };
        let Some(description) = self.prompt("Enter description: ")? else {
            return Ok(false);
        };
        let Some(date) = self.prompt("Enter date (YYYY-MM-DD) or press Enter for today: ")?
        else {
            return Ok(false);
        };

        let expense = ledger.add(amount, category, description, non_empty(date))?;
        writeln!(
            self.output,
            "\n✓ Expense added successfully! (ID: {})",
            expense.id
        )?;
        Ok(true)
    }

    fn view_expenses(&mut self, ledger: &ExpenseLedger) -> Result<bool> {
        self.print_header("All Expenses")?;
        self.print_expenses(&ledger.get_all())?;
        writeln!(
            self.output,
            "\nTotal Expenses: ${}",
            format_amount(ledger.get_total(None))
        )?;
        Ok(true)
    }

    fn view_summary(&mut self, ledger: &ExpenseLedger) -> Result<bool> {
        self.print_header("Expense Summary by Category")?;

        let summary = ledger.get_summary_by_category();
        if summary.is_empty() {
            writeln!(self.output, "No expenses found.")?;
            return Ok(true);
        }

        let mut rows: Vec<_> = summary.iter().collect();
        rows.sort_by(|a, b| a.category.cmp(&b.category));

        writeln!(self.output, "\n{:<20} {:<15}", "CATEGORY", "TOTAL")?;
        writeln!(self.output, "{}", "-".repeat(35))?;
        for row in rows {
            writeln!(
                self.output,
                "{:<20} ${:<14}",
                row.category,
                format_amount(row.total)
            )?;
        }
        writeln!(self.output, "{}", "-".repeat(35))?;
        writeln!(
            self.output,
            "{:<20} ${:<14}",
            "TOTAL",
            format_amount(ledger.get_total(None))
        )?;
        Ok(true)
    }

    fn search_by_category(&mut self, ledger: &ExpenseLedger) -> Result<bool> {
        self.print_header("Search by Category")?;

        let categories = ledger.get_categories();
        if !categories.is_empty() {
            writeln!(
                self.output,
                "\nAvailable categories: {}",
                categories.join(", ")
            )?;
        }

        let Some(category) = self.prompt("\nEnter category to search: ")? else {
            return Ok(false);
        };

        writeln!(self.output, "\nExpenses in category '{}':", category)?;
        self.print_expenses(&ledger.get_by_category(&category))?;
        writeln!(
            self.output,
            "\nTotal for {}: ${}",
            category,
            format_amount(ledger.get_total(Some(&category)))
        )?;
        Ok(true)
    }

    /// Read an id. The flag is false only at end of input.
    fn prompt_id(&mut self, text: &str) -> Result<(Option<ExpenseId>, bool)> {
        let Some(raw) = self.prompt(text)? else {
            return Ok((None, false));
        };
        match raw.parse() {
            Ok(id) => Ok((Some(id), true)),
            Err(_) => {
                writeln!(self.output, "Error: Invalid ID. Please enter a valid number.")?;
                Ok((None, true))
            }
        }
    }

    fn update_expense(&mut self, ledger: &mut ExpenseLedger) -> Result<bool> {
        self.print_header("Update Expense")?;

        let (id, keep_going) = self.prompt_id("Enter expense ID to update: ")?;
        let Some(id) = id else {
            return Ok(keep_going);
        };
        let Some(current) = ledger.get_by_id(id).cloned() else {
            writeln!(self.output, "Error: No expense found with ID {}", id)?;
            return Ok(true);
        };

        writeln!(self.output, "\nCurrent expense: {}", current)?;
        writeln!(
            self.output,
            "\nEnter new values (press Enter to keep current value):"
        )?;

        let Some(amount) = self.prompt(&format!("Amount (${}): ", format_amount(current.amount)))?
        else {
            return Ok(false);
        };
        let Some(category) = self.prompt(&format!("Category ({}): ", current.category))? else {
            return Ok(false);
        };
        let Some(description) =
            self.prompt(&format!("Description ({}): ", current.description))?
        else {
            return Ok(false);
        };
        let Some(date) = self.prompt(&format!("Date ({}): ", current.date))? else {
            return Ok(false);
        };

        let amount = match non_empty(amount).map(|a| parse_amount(&a)).transpose() {
            Ok(amount) => amount,
            Err(_) => {
                writeln!(self.output, "Error: Invalid input.")?;
                return Ok(true);
            }
        };

        let update = ExpenseUpdate {
            amount,
            category: non_empty(category),
            description: non_empty(description),
            date: non_empty(date),
        };
        ledger.update(id, update)?;
        writeln!(self.output, "✓ Expense updated successfully!")?;
        Ok(true)
    }

    fn delete_expense(&mut self, ledger: &mut ExpenseLedger) -> Result<bool> {
        self.print_header("Delete Expense")?;

        let (id, keep_going) = self.prompt_id("Enter expense ID to delete: ")?;
        let Some(id) = id else {
            return Ok(keep_going);
        };
        let Some(expense) = ledger.get_by_id(id).cloned() else {
            writeln!(self.output, "Error: No expense found with ID {}", id)?;
            return Ok(true);
        };

        writeln!(self.output, "\nExpense to delete: {}", expense)?;
        let Some(confirm) =
            self.prompt("Are you sure you want to delete this expense? (yes/no): ")?
        else {
            return Ok(false);
        };

        if matches!(confirm.to_lowercase().as_str(), "yes" | "y") {
            ledger.delete(id)?;
            writeln!(self.output, "✓ Expense deleted successfully!")?;
        } else {
            writeln!(self.output, "Deletion cancelled.")?;
        }
        Ok(true)
    }
}

/// Blank input means "not provided".
fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

use std::io;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::api;
use crate::application::ExpenseLedger;
use crate::domain::{Expense, ExpenseId, ExpenseUpdate, format_amount, parse_amount};
use crate::settings::Settings;
use crate::telemetry;

mod interactive;

pub use interactive::run_menu;

/// Expense Ledger - Personal Expense Tracker
#[derive(Parser)]
#[command(name = "expense-ledger")]
#[command(about = "Track personal expenses from the console or over HTTP")]
#[command(version)]
pub struct Cli {
    /// Expense data file (JSON), overrides the configured one
    #[arg(short = 'f', long)]
    pub data_file: Option<String>,

    /// Configuration file (TOML), defaults to expense-ledger.toml if present
    #[arg(long)]
    pub config: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Defaults to the interactive menu
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive menu
    Menu,

    /// Serve the JSON API
    Serve {
        /// Address to bind, overrides the configured one
        #[arg(long)]
        bind: Option<String>,

        /// Port to listen on, overrides the configured one
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Record an expense
    Add {
        /// Amount spent (e.g., "12.50")
        #[arg(allow_hyphen_values = true)]
        amount: String,

        /// Category (e.g., "Food", "Transport")
        #[arg(short, long)]
        category: String,

        /// Description of the expense
        #[arg(short, long)]
        description: String,

        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// List expenses, newest first
    List {
        /// Only expenses in this category (case-insensitive)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Totals per category
    Summary,

    /// Distinct categories
    Categories,

    /// Change some fields of an expense
    Update {
        /// Expense ID
        id: ExpenseId,

        /// New amount
        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<String>,

        /// New category
        #[arg(short, long)]
        category: Option<String>,

        /// New description
        #[arg(short, long)]
        description: Option<String>,

        /// New date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },

    /// Delete an expense
    Delete {
        /// Expense ID
        id: ExpenseId,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let mut settings =
            Settings::load(self.config.as_deref()).context("Failed to load settings")?;
        if let Some(data_file) = self.data_file {
            settings.data_file = data_file;
        }

        let level = if self.verbose {
            "debug"
        } else {
            settings.log_level.as_str()
        };
        telemetry::init(level);

        let mut ledger = ExpenseLedger::open_path(&settings.data_file);

        match self.command.unwrap_or(Commands::Menu) {
            Commands::Menu => {
                let stdin = io::stdin();
                run_menu(&mut ledger, stdin.lock(), io::stdout())?;
            }

            Commands::Serve { bind, port } => {
                if let Some(bind) = bind {
                    settings.server.bind = bind;
                }
                if let Some(port) = port {
                    settings.server.port = port;
                }
                api::run(ledger, &settings.server)
                    .await
                    .with_context(|| format!("Server on {} failed", settings.server.address()))?;
            }

            Commands::Add {
                amount,
                category,
                description,
                date,
            } => {
                let amount = parse_amount(&amount).context("Invalid amount. Use '12.50' or '12'")?;
                let expense = ledger.add(amount, category, description, date)?;
                println!("Added expense {}: {}", expense.id, expense);
            }

            Commands::List { category } => {
                let expenses = match category.as_deref() {
                    Some(category) => ledger.get_by_category(category),
                    None => ledger.get_all(),
                };
                print_expenses(&expenses);
                println!();
                println!(
                    "Total: {}",
                    format_amount(ledger.get_total(category.as_deref()))
                );
            }

            Commands::Summary => {
                let summary = ledger.get_summary_by_category();
                if summary.is_empty() {
                    println!("No expenses found.");
                } else {
                    println!("{:<20} {:>12}", "CATEGORY", "TOTAL");
                    println!("{}", "-".repeat(33));
                    for entry in summary.iter() {
                        println!("{:<20} {:>12}", entry.category, format_amount(entry.total));
                    }
                    println!("{}", "-".repeat(33));
                    println!("{:<20} {:>12}", "TOTAL", format_amount(ledger.get_total(None)));
                }
            }

            Commands::Categories => {
                for category in ledger.get_categories() {
                    println!("{}", category);
                }
            }

            Commands::Update {
                id,
                amount,
                category,
                description,
                date,
            } => {
                let amount = amount
                    .map(|a| parse_amount(&a))
                    .transpose()
                    .context("Invalid amount. Use '12.50' or '12'")?;
                let update = ExpenseUpdate {
                    amount,
                    category,
                    description,
                    date,
                };
                if !ledger.update(id, update)? {
                    anyhow::bail!("No expense found with ID {}", id);
                }
                let expense = ledger.expense(id)?;
                println!("Updated expense {}: {}", expense.id, expense);
            }

            Commands::Delete { id } => {
                if !ledger.delete(id)? {
                    anyhow::bail!("No expense found with ID {}", id);
                }
                println!("Deleted expense {}", id);
            }
        }

        Ok(())
    }
}

fn print_expenses(expenses: &[Expense]) {
    if expenses.is_empty() {
        println!("No expenses found.");
        return;
    }

    println!(
        "{:<5} {:<12} {:>10} {:<15} DESCRIPTION",
        "ID", "DATE", "AMOUNT", "CATEGORY"
    );
    println!("{}", "-".repeat(70));
    for expense in expenses {
        println!(
            "{:<5} {:<12} {:>10} {:<15} {}",
            expense.id,
            expense.date,
            format_amount(expense.amount),
            truncate(&expense.category, 15),
            truncate(&expense.description, 30)
        );
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

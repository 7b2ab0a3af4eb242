//! CLI binary for smoke-testing the Monthly Budget API.
#![allow(
    clippy::print_stdout,
    clippy::print_stderr,
    reason = "CLI binary talks to the terminal through tables and status lines"
)]

use std::io::{self, Write as _};
use std::process::ExitCode;

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, Table};
use monthlybudget_rs::client::BudgetClient;
use monthlybudget_rs::models::{Account, CategoryId, Expense, Goal, Income};
use monthlybudget_rs::session::Session;
use monthlybudget_rs::views::goals::ProgressLevel;
use monthlybudget_rs::views::{balance, categories, filter, goals, incomes, monthly};
use owo_colors::OwoColorize;
use secrecy::SecretString;

/// Environment variable name for the API token.
const TOKEN_ENV: &str = "MONTHLYBUDGET_TOKEN";

/// Environment variable name for the signed-in email (optional).
const EMAIL_ENV: &str = "MONTHLYBUDGET_EMAIL";

/// Monthly Budget API CLI — browse accounts, spending, and goals.
#[derive(Debug, Parser)]
#[command(name = "monthlybudget", version, about)]
struct Cli {
    /// Override the API base URL (default: http://localhost:8080/api).
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<String>,
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// List accounts with balance totals.
    Accounts,
    /// List categories.
    Categories,
    /// List expenses, optionally filtered by date range, category, or
    /// returns only.
    Expenses(ExpenseArgs),
    /// List incomes rolled up per account.
    Incomes,
    /// List savings goals with progress and deadlines.
    Goals,
    /// Show the current-month totals and the six-month spending series.
    Summary,
}

/// Arguments for the `expenses` subcommand.
#[derive(Debug, Args)]
struct ExpenseArgs {
    /// Start date (inclusive, YYYY-MM-DD). Requires --to.
    #[arg(long, requires = "to", value_parser = parse_date)]
    from: Option<NaiveDate>,
    /// End date (inclusive, YYYY-MM-DD). Requires --from.
    #[arg(long, requires = "from", value_parser = parse_date)]
    to: Option<NaiveDate>,
    /// Filter by category ID.
    #[arg(long, value_name = "ID")]
    category: Option<i64>,
    /// Keep only returns.
    #[arg(long)]
    returns_only: bool,
}

/// Parses a date string in `YYYY-MM-DD` format for clap.
fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|err| format!("{err}"))
}

/// Reads the session credentials from the environment.
fn read_session() -> io::Result<Option<Session>> {
    match std::env::var(TOKEN_ENV) {
        Ok(token) if !token.is_empty() => {
            let email = std::env::var(EMAIL_ENV).unwrap_or_default();
            let session = Session::new();
            session.log_in(SecretString::from(token), email);
            Ok(Some(session))
        }
        _ => {
            let mut err = io::stderr().lock();
            writeln!(
                err,
                "{} {} environment variable is not set",
                "error:".red().bold(),
                TOKEN_ENV.bold()
            )?;
            writeln!(
                err,
                "  {} create a .env file with {}=<your_token>",
                "hint:".cyan(),
                TOKEN_ENV
            )?;
            Ok(None)
        }
    }
}

/// Runs the CLI, returning an appropriate exit code.
async fn run() -> io::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let _dotenv = dotenvy::dotenv();

    let cli = Cli::parse();

    let Some(session) = read_session()? else {
        return Ok(ExitCode::FAILURE);
    };

    let mut builder = BudgetClient::builder().token(session.token_value().unwrap_or_default());
    if let Some(url) = cli.base_url {
        builder = builder.base_url(url);
    }
    let client = match builder.build() {
        Ok(client) => client,
        Err(err) => {
            writeln!(
                io::stderr().lock(),
                "{} failed to build client: {err}",
                "error:".red().bold()
            )?;
            return Ok(ExitCode::FAILURE);
        }
    };

    dispatch(&client, &session, cli.command).await
}

#[tokio::main]
async fn main() -> io::Result<ExitCode> {
    run().await
}

/// Dispatches to the appropriate subcommand handler.
async fn dispatch(
    client: &BudgetClient,
    session: &Session,
    command: Command,
) -> io::Result<ExitCode> {
    match command {
        Command::Accounts => cmd_accounts(client).await,
        Command::Categories => cmd_categories(client).await,
        Command::Expenses(args) => cmd_expenses(client, &args).await,
        Command::Incomes => cmd_incomes(client).await,
        Command::Goals => cmd_goals(client).await,
        Command::Summary => cmd_summary(client, session).await,
    }
}

/// Prints a fetch failure and returns the failure exit code.
fn fetch_failed(what: &str, err: &monthlybudget_rs::error::BudgetError) -> io::Result<ExitCode> {
    writeln!(
        io::stderr().lock(),
        "{} failed to fetch {what}: {err}",
        "error:".red().bold()
    )?;
    Ok(ExitCode::FAILURE)
}

/// Executes the `accounts` subcommand.
async fn cmd_accounts(client: &BudgetClient) -> io::Result<ExitCode> {
    match client.accounts().await {
        Ok(accounts) => {
            print_accounts_table(&accounts)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => fetch_failed("accounts", &err),
    }
}

/// Executes the `categories` subcommand.
async fn cmd_categories(client: &BudgetClient) -> io::Result<ExitCode> {
    match client.categories().await {
        Ok(list) => {
            let mut out = io::stdout().lock();
            if list.is_empty() {
                writeln!(out, "{}", "No categories found.".dimmed())?;
                return Ok(ExitCode::SUCCESS);
            }
            let mut table = Table::new();
            _ = table.load_preset(UTF8_FULL);
            _ = table.set_header(vec![
                Cell::new("Icon").fg(Color::Cyan),
                Cell::new("Name").fg(Color::Cyan),
                Cell::new("Color").fg(Color::Cyan),
                Cell::new("Default").fg(Color::Cyan),
            ]);
            for category in &list {
                _ = table.add_row(vec![
                    Cell::new(category.icon_or_default()),
                    Cell::new(&category.name),
                    Cell::new(category.color_or_default()),
                    Cell::new(if category.is_default { "yes" } else { "" }),
                ]);
            }
            writeln!(out, "{table}")?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => fetch_failed("categories", &err),
    }
}

/// Executes the `expenses` subcommand.
async fn cmd_expenses(client: &BudgetClient, args: &ExpenseArgs) -> io::Result<ExitCode> {
    let mut expense_filter = filter::ExpenseFilter::new();
    if let Some((from, to)) = args.from.zip(args.to) {
        expense_filter = expense_filter.date_range(from, to);
    }
    if let Some(id) = args.category {
        expense_filter = expense_filter.category(CategoryId::new(id));
    }
    if args.returns_only {
        expense_filter = expense_filter.returns_only();
    }

    match client.expenses().await {
        Ok(all) => {
            let kept = filter::apply(&all, &expense_filter);
            print_expenses_table(&kept)?;
            let totals = filter::totals(&all, &expense_filter);
            let mut out = io::stdout().lock();
            writeln!(
                out,
                "{} {}   {} {}   {} {}",
                "spent:".bold(),
                format!("{:.2}", totals.expenses).red(),
                "returned:".bold(),
                format!("{:.2}", totals.returns).green(),
                "net:".bold(),
                format!("{:.2}", totals.net)
            )?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => fetch_failed("expenses", &err),
    }
}

/// Executes the `incomes` subcommand.
async fn cmd_incomes(client: &BudgetClient) -> io::Result<ExitCode> {
    let (accounts, income_list) = futures::join!(client.accounts(), client.incomes());
    let accounts = match accounts {
        Ok(accounts) => accounts,
        Err(err) => return fetch_failed("accounts", &err),
    };
    let income_list: Vec<Income> = match income_list {
        Ok(list) => list,
        Err(err) => return fetch_failed("incomes", &err),
    };

    let mut out = io::stdout().lock();
    for rollup in incomes::rollups(&accounts, &income_list) {
        writeln!(
            out,
            "{} {}",
            rollup.account_name.green().bold(),
            format_args!("(+{:.2})", rollup.total).dimmed()
        )?;
        for income in &rollup.incomes {
            writeln!(
                out,
                "  {}  {:>10.2}  {}",
                income.date,
                income.amount,
                income.description.as_deref().unwrap_or("")
            )?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Executes the `goals` subcommand.
async fn cmd_goals(client: &BudgetClient) -> io::Result<ExitCode> {
    match client.goals().await {
        Ok(list) => {
            let today = Local::now().date_naive();
            print_goals_table(&list, today)?;
            let counts = goals::status_counts(&list, today);
            let mut out = io::stdout().lock();
            writeln!(
                out,
                "{} {}   {} {}   {} {}",
                "completed:".bold(),
                counts.completed.green(),
                "in progress:".bold(),
                counts.in_progress,
                "near deadline:".bold(),
                counts.near_deadline.yellow()
            )?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => fetch_failed("goals", &err),
    }
}

/// Executes the `summary` subcommand.
async fn cmd_summary(client: &BudgetClient, session: &Session) -> io::Result<ExitCode> {
    let (accounts, expenses, goal_list) =
        futures::join!(client.accounts(), client.expenses(), client.goals());
    let accounts = match accounts {
        Ok(accounts) => accounts,
        Err(err) => return fetch_failed("accounts", &err),
    };
    let expenses = match expenses {
        Ok(expenses) => expenses,
        Err(err) => return fetch_failed("expenses", &err),
    };
    let goal_list = match goal_list {
        Ok(list) => list,
        Err(err) => return fetch_failed("goals", &err),
    };

    let today = Local::now().date_naive();
    let mut out = io::stdout().lock();

    if let Some(email) = session.current_email().filter(|email| !email.is_empty()) {
        writeln!(out, "{} {email}", "Signed in as".dimmed())?;
        writeln!(out)?;
    }

    let totals = balance::totals(&accounts);
    writeln!(
        out,
        "{} {:.2} {}",
        "Total balance:".bold(),
        totals.total,
        format_args!("({:+.2} since opening)", totals.diff).dimmed()
    )?;

    let month = monthly::current_month_totals(&expenses, today);
    writeln!(
        out,
        "{} {} spent, {} returned",
        "This month:".bold(),
        format!("{:.2}", month.expenses).red(),
        format!("{:.2}", month.returns).green()
    )?;
    writeln!(out)?;

    writeln!(out, "{}", "Last six months".green().bold())?;
    for bucket in monthly::six_month_series(&expenses, today) {
        writeln!(
            out,
            "  {:04}-{:02}  spent {:>10.2}  returns {:>10.2}",
            bucket.year, bucket.month, bucket.spent, bucket.returns
        )?;
    }
    writeln!(out)?;

    writeln!(out, "{}", "Spending by category".green().bold())?;
    for slice in categories::breakdown(&expenses) {
        writeln!(out, "  {:<20} {:>10.2}  {}", slice.label, slice.total, slice.color.dimmed())?;
    }
    writeln!(out)?;

    let counts = goals::status_counts(&goal_list, today);
    writeln!(
        out,
        "{} {} of {} complete, {} near deadline",
        "Goals:".bold(),
        counts.completed,
        counts.total,
        counts.near_deadline
    )?;

    Ok(ExitCode::SUCCESS)
}

// ── Output formatting ────────────────────────────────────────────────

/// Prints accounts in a table with a totals footer.
fn print_accounts_table(accounts: &[Account]) -> io::Result<()> {
    let mut out = io::stdout().lock();
    if accounts.is_empty() {
        writeln!(out, "{}", "No accounts found.".dimmed())?;
        return Ok(());
    }

    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(vec![
        Cell::new("Name").fg(Color::Cyan),
        Cell::new("Initial").fg(Color::Cyan),
        Cell::new("Current").fg(Color::Cyan),
    ]);

    for account in accounts {
        let current = if account.current_balance < 0.0 {
            Cell::new(format!("{:.2}", account.current_balance)).fg(Color::Red)
        } else {
            Cell::new(format!("{:.2}", account.current_balance))
        };
        _ = table.add_row(vec![
            Cell::new(&account.name),
            Cell::new(format!("{:.2}", account.initial_balance)),
            current,
        ]);
    }

    let totals = balance::totals(accounts);
    writeln!(
        out,
        "{} {}",
        "Accounts".green().bold(),
        format_args!("(total {:.2})", totals.total).dimmed()
    )?;
    writeln!(out)?;
    writeln!(out, "{table}")?;
    Ok(())
}

/// Prints expenses in a table.
fn print_expenses_table(expenses: &[Expense]) -> io::Result<()> {
    let mut out = io::stdout().lock();
    if expenses.is_empty() {
        writeln!(out, "{}", "No expenses found.".dimmed())?;
        return Ok(());
    }

    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(vec![
        Cell::new("Date").fg(Color::Cyan),
        Cell::new("Category").fg(Color::Cyan),
        Cell::new("Amount").fg(Color::Cyan),
        Cell::new("Description").fg(Color::Cyan),
    ]);

    for expense in expenses {
        let amount = if expense.is_return {
            Cell::new(format!("+{:.2}", expense.amount)).fg(Color::Green)
        } else {
            Cell::new(format!("-{:.2}", expense.amount)).fg(Color::Red)
        };
        _ = table.add_row(vec![
            Cell::new(expense.date),
            Cell::new(expense.category_name.as_deref().unwrap_or("Other")),
            amount,
            Cell::new(expense.description.as_deref().unwrap_or("")),
        ]);
    }

    writeln!(out, "{table}")?;
    Ok(())
}

/// Prints goals in a table.
fn print_goals_table(list: &[Goal], today: NaiveDate) -> io::Result<()> {
    let mut out = io::stdout().lock();
    if list.is_empty() {
        writeln!(out, "{}", "No goals found.".dimmed())?;
        return Ok(());
    }

    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(vec![
        Cell::new("Name").fg(Color::Cyan),
        Cell::new("Saved").fg(Color::Cyan),
        Cell::new("Target").fg(Color::Cyan),
        Cell::new("Progress").fg(Color::Cyan),
        Cell::new("Deadline").fg(Color::Cyan),
    ]);

    for goal in list {
        let progress = goals::clamped_progress(goal);
        let progress_cell = match goals::progress_level(goal) {
            ProgressLevel::Complete | ProgressLevel::High => {
                Cell::new(format!("{progress:.0}%")).fg(Color::Green)
            }
            ProgressLevel::Medium => Cell::new(format!("{progress:.0}%")).fg(Color::Yellow),
            ProgressLevel::Low => Cell::new(format!("{progress:.0}%")).fg(Color::Red),
        };
        let deadline_cell = goal.deadline.map_or_else(
            || Cell::new("\u{2014}"),
            |deadline| {
                let days = goals::days_until(deadline, today);
                if goals::is_overdue(deadline, today) {
                    Cell::new("overdue").fg(Color::Red)
                } else if goals::is_near_deadline(deadline, today) {
                    Cell::new(format!("{days}d left")).fg(Color::Yellow)
                } else {
                    Cell::new(format!("{days}d left"))
                }
            },
        );
        _ = table.add_row(vec![
            Cell::new(&goal.name),
            Cell::new(format!("{:.2}", goal.current_amount)),
            Cell::new(format!("{:.2}", goal.target_amount)),
            progress_cell,
            deadline_cell,
        ]);
    }

    writeln!(out, "{table}")?;
    Ok(())
}

//! Command dispatch and the shell context shared by both CLI modes.

use std::{env, io, path::PathBuf};

use chrono::{Local, NaiveDate};
use dialoguer::{theme::ColorfulTheme, Confirm};
use strsim::levenshtein;
use thiserror::Error;
use uuid::Uuid;

use crate::config::{Config, ConfigManager};
use crate::core::{BooksManager, CoreError};
use crate::domain::{Deduction, Expense, ItemOrigin, Month, Partner, Sale};
use crate::report;
use crate::storage::{JsonStorage, StorageError};

use super::output;

pub const DATA_DIR_ENV: &str = "PARTNER_BOOKS_DATA_DIR";
pub const SCRIPT_MODE_ENV: &str = "PARTNER_BOOKS_CLI_SCRIPT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

/// Fatal shell errors. Command-level failures are reported and the loop
/// keeps running; these abort it.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

pub type CommandResult = Result<(), CommandError>;

struct CommandSpec {
    name: &'static str,
    usage: &'static str,
    summary: &'static str,
}

const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "add-sale",
        usage: "add-sale <customer> <service> <order> <amount> [YYYY-MM-DD]",
        summary: "Record a sale in the current period",
    },
    CommandSpec {
        name: "add-expense",
        usage: "add-expense <type> <amount> [YYYY-MM-DD]",
        summary: "Record a shared expense in the current period",
    },
    CommandSpec {
        name: "add-deduction",
        usage: "add-deduction <partner> <type> <amount> [YYYY-MM-DD]",
        summary: "Record a deduction against one partner's share",
    },
    CommandSpec {
        name: "sales",
        usage: "sales",
        summary: "List current-period sales",
    },
    CommandSpec {
        name: "expenses",
        usage: "expenses",
        summary: "List current-period expenses",
    },
    CommandSpec {
        name: "deductions",
        usage: "deductions",
        summary: "List current-period deductions",
    },
    CommandSpec {
        name: "summary",
        usage: "summary",
        summary: "Show current-period totals and partner shares",
    },
    CommandSpec {
        name: "archive",
        usage: "archive [YYYY-MM-DD]",
        summary: "Close the current period into a daily log",
    },
    CommandSpec {
        name: "logs",
        usage: "logs",
        summary: "List archived daily logs, newest first",
    },
    CommandSpec {
        name: "show-log",
        usage: "show-log <index>",
        summary: "Show one archived daily log in full",
    },
    CommandSpec {
        name: "update-item",
        usage: "update-item <current|log-index> <sale|expense|deduction> <id> <amount>",
        summary: "Change a recorded item's amount, wherever it lives",
    },
    CommandSpec {
        name: "delete-item",
        usage: "delete-item <current|log-index> <sale|expense|deduction> <id>",
        summary: "Delete a recorded item, wherever it lives",
    },
    CommandSpec {
        name: "delete-log",
        usage: "delete-log <index> [--yes]",
        summary: "Delete one archived daily log",
    },
    CommandSpec {
        name: "monthly",
        usage: "monthly [YYYY-MM] [--yes]",
        summary: "Roll the month's daily logs up into a report",
    },
    CommandSpec {
        name: "reports",
        usage: "reports",
        summary: "List monthly reports, newest first",
    },
    CommandSpec {
        name: "show-report",
        usage: "show-report <YYYY-MM>",
        summary: "Show one monthly report",
    },
    CommandSpec {
        name: "edit-report",
        usage: "edit-report <YYYY-MM> <total-sales> <total-expenses>",
        summary: "Overwrite a monthly report's totals by hand",
    },
    CommandSpec {
        name: "delete-report",
        usage: "delete-report <YYYY-MM> [--yes]",
        summary: "Delete one monthly report",
    },
    CommandSpec {
        name: "balances",
        usage: "balances",
        summary: "Show partner balances and settlement suggestions",
    },
    CommandSpec {
        name: "settle",
        usage: "settle <partner> <amount> [note...]",
        summary: "Record a settlement payout to one partner",
    },
    CommandSpec {
        name: "statement",
        usage: "statement <partner> [YYYY-MM]",
        summary: "Show one partner's deductions for a month",
    },
    CommandSpec {
        name: "expense-detail",
        usage: "expense-detail [YYYY-MM]",
        summary: "Show every expense for a month",
    },
    CommandSpec {
        name: "reset",
        usage: "reset [--yes]",
        summary: "Wipe all stored data and start over",
    },
    CommandSpec {
        name: "help",
        usage: "help",
        summary: "Show this command list",
    },
    CommandSpec {
        name: "exit",
        usage: "exit",
        summary: "Leave the shell",
    },
];

pub struct ShellContext {
    mode: CliMode,
    manager: BooksManager,
    config: Config,
    theme: ColorfulTheme,
    pub(crate) running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        let config = config_manager.load();
        let data_dir = env::var_os(DATA_DIR_ENV)
            .map(PathBuf::from)
            .or_else(|| config.data_dir.clone());
        let storage = JsonStorage::new(data_dir)?;
        let manager = BooksManager::open(Box::new(storage));
        Ok(Self {
            mode,
            manager,
            config,
            theme: ColorfulTheme::default(),
            running: true,
        })
    }

    #[cfg(test)]
    pub(crate) fn with_data_dir(mode: CliMode, dir: PathBuf) -> Result<Self, CliError> {
        let storage = JsonStorage::new(Some(dir))?;
        Ok(Self {
            mode,
            manager: BooksManager::open(Box::new(storage)),
            config: Config::default(),
            theme: ColorfulTheme::default(),
            running: true,
        })
    }

    pub(crate) fn prompt(&self) -> String {
        "partner-books> ".to_string()
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let handled = match command {
            "add-sale" => self.cmd_add_sale(args),
            "add-expense" => self.cmd_add_expense(args),
            "add-deduction" => self.cmd_add_deduction(args),
            "sales" => self.cmd_sales(),
            "expenses" => self.cmd_expenses(),
            "deductions" => self.cmd_deductions(),
            "summary" => self.cmd_summary(),
            "archive" => self.cmd_archive(args),
            "logs" => self.cmd_logs(),
            "show-log" => self.cmd_show_log(args),
            "update-item" => self.cmd_update_item(args),
            "delete-item" => self.cmd_delete_item(args),
            "delete-log" => self.cmd_delete_log(args),
            "monthly" => self.cmd_monthly(args),
            "reports" => self.cmd_reports(),
            "show-report" => self.cmd_show_report(args),
            "edit-report" => self.cmd_edit_report(args),
            "delete-report" => self.cmd_delete_report(args),
            "balances" => self.cmd_balances(),
            "settle" => self.cmd_settle(args),
            "statement" => self.cmd_statement(args),
            "expense-detail" => self.cmd_expense_detail(args),
            "reset" => self.cmd_reset(args),
            "help" => self.cmd_help(),
            "exit" | "quit" => Err(CommandError::ExitRequested),
            _ => {
                self.suggest_command(raw);
                return Ok(LoopControl::Continue);
            }
        };
        match handled {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match shell_words::split(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                self.print_warning(&err.to_string());
                return Ok(LoopControl::Continue);
            }
        };
        if tokens.is_empty() {
            return Ok(LoopControl::Continue);
        }
        let command = tokens[0].to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        self.dispatch(&command, &tokens[0], &args)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{input}`. Type `help` to see available commands."
        ));

        let mut suggestions: Vec<_> = COMMANDS
            .iter()
            .map(|spec| (levenshtein(spec.name, input), spec.name))
            .collect();
        suggestions.sort_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = suggestions.first() {
            if *distance <= 3 {
                output::hint(format!("Did you mean `{best}`?"));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Confirm::with_theme(&self.theme)
            .with_prompt("Exit shell?")
            .default(true)
            .interact()
            .map_err(|err| CliError::Io(io::Error::other(err)))
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                self.print_error(&message);
                output::hint("Use `help` for command usage.");
                Ok(())
            }
            other => {
                self.print_error(&other.to_string());
                Ok(())
            }
        }
    }

    pub(crate) fn print_error(&self, message: &str) {
        output::error(message);
    }

    pub(crate) fn print_warning(&self, message: &str) {
        output::warning(message);
    }

    fn confirm(&self, prompt: &str, assume_yes: bool) -> Result<bool, CommandError> {
        if assume_yes {
            return Ok(true);
        }
        if self.mode == CliMode::Script {
            output::warning("Confirmation required; re-run with --yes.");
            return Ok(false);
        }
        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(CommandError::from)
    }

    fn currency(&self) -> &str {
        &self.config.currency
    }

    // --- current-period commands ---

    fn cmd_add_sale(&mut self, args: &[&str]) -> CommandResult {
        if args.len() < 4 || args.len() > 5 {
            return Err(usage("add-sale"));
        }
        let amount = parse_amount(args[3])?;
        let date = parse_optional_date(args.get(4))?;
        let sale = Sale::new(args[0], amount, args[1], args[2], date);
        let id = self.manager.add_sale(sale)?;
        output::success(format!("Sale recorded ({id})."));
        Ok(())
    }

    fn cmd_add_expense(&mut self, args: &[&str]) -> CommandResult {
        if args.len() < 2 || args.len() > 3 {
            return Err(usage("add-expense"));
        }
        let amount = parse_amount(args[1])?;
        let date = parse_optional_date(args.get(2))?;
        let expense = Expense::new(amount, args[0], date);
        let id = self.manager.add_expense(expense)?;
        output::success(format!("Expense recorded ({id})."));
        Ok(())
    }

    fn cmd_add_deduction(&mut self, args: &[&str]) -> CommandResult {
        if args.len() < 3 || args.len() > 4 {
            return Err(usage("add-deduction"));
        }
        let partner = parse_partner(args[0])?;
        let amount = parse_amount(args[2])?;
        let date = parse_optional_date(args.get(3))?;
        let deduction = Deduction::new(partner, amount, args[1], date);
        let id = self.manager.add_deduction(deduction)?;
        output::success(format!("Deduction recorded ({id})."));
        Ok(())
    }

    fn cmd_sales(&self) -> CommandResult {
        let books = self.manager.books();
        output::section(format!("Sales ({})", books.sales.len()));
        for sale in &books.sales {
            output::info(format!(
                "{} | {} | {} | {} | order {} | {}",
                sale.id,
                sale.date,
                sale.customer_name,
                sale.service_type,
                sale.order_number,
                report::format_amount(sale.amount, self.currency())
            ));
        }
        Ok(())
    }

    fn cmd_expenses(&self) -> CommandResult {
        let books = self.manager.books();
        output::section(format!("Expenses ({})", books.expenses.len()));
        for expense in &books.expenses {
            output::info(format!(
                "{} | {} | {} | {}",
                expense.id,
                expense.date,
                expense.expense_type,
                report::format_amount(expense.amount, self.currency())
            ));
        }
        Ok(())
    }

    fn cmd_deductions(&self) -> CommandResult {
        let books = self.manager.books();
        output::section(format!("Deductions ({})", books.deductions.len()));
        for deduction in &books.deductions {
            output::info(format!(
                "{} | {} | {} | {} | {}",
                deduction.id,
                deduction.date,
                deduction.partner.label(),
                deduction.deduction_type,
                report::format_amount(deduction.amount, self.currency())
            ));
        }
        Ok(())
    }

    fn cmd_summary(&self) -> CommandResult {
        let summary = self.manager.current_summary();
        let currency = self.currency();
        output::section("Current period");
        output::info(format!(
            "Total sales:    {}",
            report::format_amount(summary.total_sales, currency)
        ));
        output::info(format!(
            "Total expenses: {}",
            report::format_amount(summary.total_expenses, currency)
        ));
        output::info(format!(
            "Net profit:     {}",
            report::format_amount(summary.net_profit, currency)
        ));
        for (partner, share) in summary.partner_shares.iter() {
            output::info(format!(
                "  {:<6} {}",
                partner.label(),
                report::format_amount(share, currency)
            ));
        }
        Ok(())
    }

    // --- archival ---

    fn cmd_archive(&mut self, args: &[&str]) -> CommandResult {
        if args.len() > 1 {
            return Err(usage("archive"));
        }
        let date = match args.first() {
            Some(raw) => Some(parse_date(raw)?),
            None => None,
        };
        let archived_on = self.manager.archive_day(date)?;
        output::success(format!("Archived day {archived_on}."));
        Ok(())
    }

    fn cmd_logs(&self) -> CommandResult {
        let books = self.manager.books();
        output::section(format!("Daily logs ({})", books.daily_logs.len()));
        for (index, log) in books.daily_logs.iter().enumerate() {
            output::info(format!(
                "#{index} | {} | net {}",
                log.date,
                report::format_amount(log.net_profit, self.currency())
            ));
        }
        Ok(())
    }

    fn cmd_show_log(&self, args: &[&str]) -> CommandResult {
        let [raw] = args else {
            return Err(usage("show-log"));
        };
        let index = parse_index(raw)?;
        let log = self.manager.books().daily_log(index)?;
        print!("{}", report::daily_report(log, self.currency()));
        Ok(())
    }

    fn cmd_delete_log(&mut self, args: &[&str]) -> CommandResult {
        let (args, assume_yes) = take_yes_flag(args);
        let [raw] = args.as_slice() else {
            return Err(usage("delete-log"));
        };
        let index = parse_index(raw)?;
        let date = self.manager.books().daily_log(index)?.date;
        if !self.confirm(&format!("Delete the log for {date}?"), assume_yes)? {
            return Ok(());
        }
        self.manager.remove_daily_log(index)?;
        output::success(format!("Deleted the log for {date}."));
        Ok(())
    }

    // --- line-item edits ---

    fn cmd_update_item(&mut self, args: &[&str]) -> CommandResult {
        let [origin, kind, id, amount] = args else {
            return Err(usage("update-item"));
        };
        let origin = parse_origin(origin)?;
        let id = parse_id(id)?;
        let amount = parse_amount(amount)?;
        match *kind {
            "sale" => {
                let mut sale = self.find_sale(origin, id)?;
                sale.amount = amount;
                self.manager.update_sale_at(origin, sale)?;
            }
            "expense" => {
                let mut expense = self.find_expense(origin, id)?;
                expense.amount = amount;
                self.manager.update_expense_at(origin, expense)?;
            }
            "deduction" => {
                let mut deduction = self.find_deduction(origin, id)?;
                deduction.amount = amount;
                self.manager.update_deduction_at(origin, deduction)?;
            }
            other => return Err(unknown_kind(other)),
        }
        output::success("Item updated.");
        Ok(())
    }

    fn cmd_delete_item(&mut self, args: &[&str]) -> CommandResult {
        let [origin, kind, id] = args else {
            return Err(usage("delete-item"));
        };
        let origin = parse_origin(origin)?;
        let id = parse_id(id)?;
        match *kind {
            "sale" => {
                self.manager.remove_sale_at(origin, id)?;
            }
            "expense" => {
                self.manager.remove_expense_at(origin, id)?;
            }
            "deduction" => {
                self.manager.remove_deduction_at(origin, id)?;
            }
            other => return Err(unknown_kind(other)),
        }
        output::success("Item deleted.");
        Ok(())
    }

    // --- monthly reports ---

    fn cmd_monthly(&mut self, args: &[&str]) -> CommandResult {
        let (args, assume_yes) = take_yes_flag(args);
        let month = match args.as_slice() {
            [] => Month::current(),
            [raw] => parse_month(raw)?,
            _ => return Err(usage("monthly")),
        };
        if self.manager.report_exists(month) {
            let prompt = format!("A report for {month} already exists. Generate another?");
            if !self.confirm(&prompt, assume_yes)? {
                return Ok(());
            }
        }
        let generated = self.manager.generate_monthly_report(month)?;
        print!("{}", report::monthly_report(&generated, self.currency()));
        output::success(format!("Monthly report for {month} generated."));
        Ok(())
    }

    fn cmd_reports(&self) -> CommandResult {
        let books = self.manager.books();
        output::section(format!("Monthly reports ({})", books.monthly_reports.len()));
        for entry in &books.monthly_reports {
            output::info(format!(
                "{} | net {}",
                entry.month,
                report::format_amount(entry.net_profit, self.currency())
            ));
        }
        Ok(())
    }

    fn cmd_show_report(&self, args: &[&str]) -> CommandResult {
        let [raw] = args else {
            return Err(usage("show-report"));
        };
        let month = parse_month(raw)?;
        let entry = self.manager.books().monthly_report(month)?;
        print!("{}", report::monthly_report(entry, self.currency()));
        Ok(())
    }

    fn cmd_edit_report(&mut self, args: &[&str]) -> CommandResult {
        let [raw_month, raw_sales, raw_expenses] = args else {
            return Err(usage("edit-report"));
        };
        let month = parse_month(raw_month)?;
        let total_sales = parse_amount(raw_sales)?;
        let total_expenses = parse_amount(raw_expenses)?;
        self.manager
            .edit_monthly_report(month, total_sales, total_expenses)?;
        output::success(format!("Report for {month} updated."));
        Ok(())
    }

    fn cmd_delete_report(&mut self, args: &[&str]) -> CommandResult {
        let (args, assume_yes) = take_yes_flag(args);
        let [raw] = args.as_slice() else {
            return Err(usage("delete-report"));
        };
        let month = parse_month(raw)?;
        if !self.confirm(&format!("Delete the report for {month}?"), assume_yes)? {
            return Ok(());
        }
        self.manager.remove_monthly_report(month)?;
        output::success(format!("Deleted the report for {month}."));
        Ok(())
    }

    // --- balances and statements ---

    fn cmd_balances(&self) -> CommandResult {
        let balances = self.manager.balances();
        let suggestions = crate::core::netting_suggestions(&balances);
        print!(
            "{}",
            report::balances_report(&balances, &suggestions, self.currency())
        );
        Ok(())
    }

    fn cmd_settle(&mut self, args: &[&str]) -> CommandResult {
        if args.len() < 2 {
            return Err(usage("settle"));
        }
        let partner = parse_partner(args[0])?;
        let amount = parse_amount(args[1])?;
        let note = if args.len() > 2 {
            args[2..].join(" ")
        } else {
            "Payout".to_string()
        };
        let id = self.manager.record_settlement(partner, amount, &note, None)?;
        output::success(format!(
            "Settlement of {} to {} recorded ({id}).",
            report::format_amount(amount, self.currency()),
            partner.label()
        ));
        Ok(())
    }

    fn cmd_statement(&self, args: &[&str]) -> CommandResult {
        let (partner, month) = match args {
            [raw_partner] => (parse_partner(raw_partner)?, Month::current()),
            [raw_partner, raw_month] => (parse_partner(raw_partner)?, parse_month(raw_month)?),
            _ => return Err(usage("statement")),
        };
        let view = self.manager.partner_statement(partner, month);
        print!("{}", report::partner_statement(&view, self.currency()));
        Ok(())
    }

    fn cmd_expense_detail(&self, args: &[&str]) -> CommandResult {
        let month = match args {
            [] => Month::current(),
            [raw] => parse_month(raw)?,
            _ => return Err(usage("expense-detail")),
        };
        let view = self.manager.expense_detail(month);
        print!("{}", report::expense_detail(&view, self.currency()));
        Ok(())
    }

    fn cmd_reset(&mut self, args: &[&str]) -> CommandResult {
        let (args, assume_yes) = take_yes_flag(args);
        if !args.is_empty() {
            return Err(usage("reset"));
        }
        let prompt = "Wipe every stored collection? This cannot be undone.";
        if !self.confirm(prompt, assume_yes)? {
            return Ok(());
        }
        self.manager.reset_all();
        output::success("All data wiped.");
        Ok(())
    }

    fn cmd_help(&self) -> CommandResult {
        output::section("Commands");
        for spec in COMMANDS {
            output::info(format!("{:<48} {}", spec.usage, spec.summary));
        }
        Ok(())
    }

    // --- lookup helpers for item edits ---

    fn find_sale(&self, origin: ItemOrigin, id: Uuid) -> Result<Sale, CommandError> {
        let books = self.manager.books();
        let sales = match origin {
            ItemOrigin::Current => &books.sales,
            ItemOrigin::Archived { log_index } => &books.daily_log(log_index)?.sales,
        };
        find_by_id(sales, id, |sale| sale.id)
    }

    fn find_expense(&self, origin: ItemOrigin, id: Uuid) -> Result<Expense, CommandError> {
        let books = self.manager.books();
        let expenses = match origin {
            ItemOrigin::Current => &books.expenses,
            ItemOrigin::Archived { log_index } => &books.daily_log(log_index)?.expenses,
        };
        find_by_id(expenses, id, |expense| expense.id)
    }

    fn find_deduction(&self, origin: ItemOrigin, id: Uuid) -> Result<Deduction, CommandError> {
        let books = self.manager.books();
        let deductions = match origin {
            ItemOrigin::Current => &books.deductions,
            ItemOrigin::Archived { log_index } => &books.daily_log(log_index)?.deductions,
        };
        find_by_id(deductions, id, |deduction| deduction.id)
    }
}

fn find_by_id<T: Clone>(items: &[T], id: Uuid, key: impl Fn(&T) -> Uuid) -> Result<T, CommandError> {
    items
        .iter()
        .find(|item| key(item) == id)
        .cloned()
        .ok_or_else(|| CommandError::Core(CoreError::ItemNotFound(id)))
}

fn usage(name: &str) -> CommandError {
    let spec = COMMANDS
        .iter()
        .find(|spec| spec.name == name)
        .map(|spec| spec.usage)
        .unwrap_or(name);
    CommandError::InvalidArguments(format!("Usage: {spec}"))
}

fn unknown_kind(kind: &str) -> CommandError {
    CommandError::InvalidArguments(format!(
        "unknown item kind `{kind}`; expected sale, expense, or deduction"
    ))
}

fn take_yes_flag<'a>(args: &[&'a str]) -> (Vec<&'a str>, bool) {
    let assume_yes = args.iter().any(|arg| *arg == "--yes");
    let rest = args.iter().filter(|arg| **arg != "--yes").copied().collect();
    (rest, assume_yes)
}

fn parse_amount(raw: &str) -> Result<f64, CommandError> {
    raw.parse::<f64>()
        .map_err(|_| CommandError::InvalidArguments(format!("`{raw}` is not a valid amount")))
}

fn parse_date(raw: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        CommandError::InvalidArguments(format!("`{raw}` is not a valid date (expected YYYY-MM-DD)"))
    })
}

fn parse_optional_date(raw: Option<&&str>) -> Result<NaiveDate, CommandError> {
    match raw {
        Some(raw) => parse_date(raw),
        None => Ok(Local::now().date_naive()),
    }
}

fn parse_month(raw: &str) -> Result<Month, CommandError> {
    raw.parse::<Month>()
        .map_err(|err| CommandError::InvalidArguments(err.to_string()))
}

fn parse_partner(raw: &str) -> Result<Partner, CommandError> {
    raw.parse::<Partner>()
        .map_err(|err| CommandError::InvalidArguments(err.to_string()))
}

fn parse_id(raw: &str) -> Result<Uuid, CommandError> {
    Uuid::parse_str(raw)
        .map_err(|_| CommandError::InvalidArguments(format!("`{raw}` is not a valid item id")))
}

fn parse_index(raw: &str) -> Result<usize, CommandError> {
    raw.parse::<usize>()
        .map_err(|_| CommandError::InvalidArguments(format!("`{raw}` is not a valid log index")))
}

fn parse_origin(raw: &str) -> Result<ItemOrigin, CommandError> {
    if raw.eq_ignore_ascii_case("current") {
        return Ok(ItemOrigin::Current);
    }
    raw.parse::<usize>()
        .map(|log_index| ItemOrigin::Archived { log_index })
        .map_err(|_| {
            CommandError::InvalidArguments(format!(
                "`{raw}` is not a valid origin; expected `current` or a log index"
            ))
        })
}

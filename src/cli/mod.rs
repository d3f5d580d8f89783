use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Datelike;
use clap::{Args, Parser, Subcommand};

use crate::application::{BalanceAggregator, EntryService, UserService};
use crate::domain::{
    EntryId, EntryStatus, EntryTemplate, EntryType, LedgerEntry, UserId, format_amount,
    parse_amount,
};
use crate::storage::SqliteRepository;

/// Lancamentos - personal income and expense ledger
#[derive(Parser)]
#[command(name = "lancamentos")]
#[command(about = "Record income and expense entries per user and track their balance")]
#[command(version)]
pub struct Cli {
    /// Database file path
    #[arg(short, long, env = "LANCAMENTOS_DATABASE", default_value = "lancamentos.db")]
    pub database: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new database
    Init,

    /// User management commands
    #[command(subcommand)]
    User(UserCommands),

    /// Ledger entry commands
    #[command(subcommand)]
    Entry(EntryCommands),

    /// Find entries by example (unset filters match anything)
    Search {
        #[command(flatten)]
        filter: FilterArgs,

        /// Print entries as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the net balance of a user
    Balance {
        /// User ID
        user: UserId,
    },

    /// Export matching entries to CSV or JSON
    Export {
        /// Format: csv, json
        #[arg(default_value = "csv")]
        format: String,

        #[command(flatten)]
        filter: FilterArgs,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// Register a new user
    Add {
        /// Display name
        name: String,

        /// Email address (must be unique)
        #[arg(short, long)]
        email: String,
    },

    /// Show a user
    Show {
        /// User ID
        id: UserId,
    },
}

#[derive(Subcommand)]
pub enum EntryCommands {
    /// Record a new entry
    Add {
        /// Description
        description: String,

        /// Amount (e.g., "50.00" or "50")
        #[arg(short, long)]
        amount: String,

        /// Owner user ID
        #[arg(short, long)]
        user: UserId,

        /// Entry type: income, expense
        #[arg(short = 't', long = "type")]
        entry_type: String,

        /// Month (1-12, defaults to the current month)
        #[arg(long)]
        month: Option<u32>,

        /// Year (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,
    },

    /// Change fields of an existing entry
    Update {
        /// Entry ID
        id: EntryId,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(short, long)]
        amount: Option<String>,

        /// Entry type: income, expense
        #[arg(short = 't', long = "type")]
        entry_type: Option<String>,

        #[arg(long)]
        month: Option<u32>,

        #[arg(long)]
        year: Option<i32>,
    },

    /// Delete an entry
    Delete {
        /// Entry ID
        id: EntryId,
    },

    /// Show an entry
    Show {
        /// Entry ID
        id: EntryId,
    },

    /// Change the status of an entry
    Status {
        /// Entry ID
        id: EntryId,

        /// New status: pending, settled, canceled
        status: String,
    },
}

/// Search filters shared by `search` and `export`
#[derive(Args, Default)]
pub struct FilterArgs {
    /// Exact description
    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub month: Option<u32>,

    #[arg(long)]
    pub year: Option<i32>,

    /// Owner user ID
    #[arg(long)]
    pub user: Option<UserId>,

    /// Entry type: income, expense
    #[arg(short = 't', long = "type")]
    pub entry_type: Option<String>,

    /// Status: pending, settled, canceled
    #[arg(long)]
    pub status: Option<String>,
}

impl FilterArgs {
    fn to_template(&self) -> Result<EntryTemplate> {
        Ok(EntryTemplate {
            description: self.description.clone(),
            month: self.month,
            year: self.year,
            owner: self.user,
            entry_type: self.entry_type.as_deref().map(parse_entry_type).transpose()?,
            status: self.status.as_deref().map(parse_status).transpose()?,
        })
    }
}

/// Services wired to one SQLite database
struct App {
    entries: EntryService,
    users: UserService,
    balances: BalanceAggregator,
}

impl App {
    async fn open(database_path: &str, create: bool) -> Result<Self> {
        let repo = if create {
            let db_url = format!("sqlite:{}?mode=rwc", database_path);
            SqliteRepository::init(&db_url).await?
        } else {
            let db_url = format!("sqlite:{}", database_path);
            SqliteRepository::connect(&db_url).await?
        };
        let repo = Arc::new(repo);

        Ok(Self {
            entries: EntryService::new(repo.clone()),
            users: UserService::new(repo.clone()),
            balances: BalanceAggregator::new(repo),
        })
    }
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Init => {
                App::open(&self.database, true).await?;
                println!("Database initialized: {}", self.database);
            }

            Commands::User(cmd) => {
                let app = App::open(&self.database, false).await?;
                run_user_command(&app, cmd).await?;
            }

            Commands::Entry(cmd) => {
                let app = App::open(&self.database, false).await?;
                run_entry_command(&app, cmd).await?;
            }

            Commands::Search { filter, json } => {
                let app = App::open(&self.database, false).await?;
                let template = filter.to_template()?;
                run_search_command(&app, &template, json).await?;
            }

            Commands::Balance { user } => {
                let app = App::open(&self.database, false).await?;
                let user = app.users.get(user).await?;
                let Some(user_id) = user.id else {
                    anyhow::bail!("User {} has no id", user.email);
                };
                let summary = app.balances.summary_for_user(user_id).await?;
                println!("Balance for {} <{}>", user.name, user.email);
                println!("  Income:  {:>12}", format_amount(summary.income));
                println!("  Expense: {:>12}", format_amount(summary.expense));
                println!("  Net:     {:>12}", format_amount(summary.net));
            }

            Commands::Export {
                format,
                filter,
                output,
            } => {
                let app = App::open(&self.database, false).await?;
                let template = filter.to_template()?;
                run_export_command(&app, &format, &template, output.as_deref()).await?;
            }
        }

        Ok(())
    }
}

async fn run_user_command(app: &App, cmd: UserCommands) -> Result<()> {
    match cmd {
        UserCommands::Add { name, email } => {
            let user = app.users.register(name, email).await?;
            println!(
                "Registered user: {} <{}> ({})",
                user.name,
                user.email,
                user.id.unwrap_or_default()
            );
        }

        UserCommands::Show { id } => {
            let user = app.users.get(id).await?;
            println!("User: {}", user.name);
            println!("  ID:      {}", id);
            println!("  Email:   {}", user.email);
            println!(
                "  Created: {}",
                user.created_at.format("%Y-%m-%d %H:%M:%S")
            );
        }
    }
    Ok(())
}

async fn run_entry_command(app: &App, cmd: EntryCommands) -> Result<()> {
    match cmd {
        EntryCommands::Add {
            description,
            amount,
            user,
            entry_type,
            month,
            year,
        } => {
            let today = chrono::Local::now().date_naive();
            let amount =
                parse_amount(&amount).context("Invalid amount format. Use '50.00' or '50'")?;
            let entry = LedgerEntry::new(
                description,
                month.unwrap_or_else(|| today.month()),
                year.unwrap_or_else(|| today.year()),
                user,
                amount,
                parse_entry_type(&entry_type)?,
            );

            let saved = app.entries.save(entry).await?;
            println!(
                "Recorded entry: {} {} ({})",
                saved.entry_type.map(|t| t.as_str()).unwrap_or("?"),
                saved.amount.map(format_amount).unwrap_or_default(),
                saved.id.unwrap_or_default()
            );
        }

        EntryCommands::Update {
            id,
            description,
            amount,
            entry_type,
            month,
            year,
        } => {
            let mut entry = app.entries.get(id).await?;
            if let Some(description) = description {
                entry.description = Some(description);
            }
            if let Some(amount) = amount {
                entry.amount = Some(parse_amount(&amount).context("Invalid amount format")?);
            }
            if let Some(entry_type) = entry_type {
                entry.entry_type = Some(parse_entry_type(&entry_type)?);
            }
            if month.is_some() {
                entry.month = month;
            }
            if year.is_some() {
                entry.year = year;
            }

            app.entries.update(entry).await?;
            println!("Updated entry: {}", id);
        }

        EntryCommands::Delete { id } => {
            let entry = app.entries.get(id).await?;
            app.entries.delete(&entry).await?;
            println!("Deleted entry: {}", id);
        }

        EntryCommands::Show { id } => {
            let entry = app.entries.get(id).await?;
            print_entry_details(&entry);
        }

        EntryCommands::Status { id, status } => {
            let status = parse_status(&status)?;
            let entry = app.entries.get(id).await?;
            let updated = app.entries.update_status(entry, status).await?;
            println!(
                "Entry {} is now {}",
                id,
                updated.status.map(|s| s.as_str()).unwrap_or("?")
            );
        }
    }
    Ok(())
}

async fn run_search_command(app: &App, template: &EntryTemplate, json: bool) -> Result<()> {
    let entries = app.entries.search(template).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No entries found.");
        return Ok(());
    }

    println!(
        "{:>6} {:<8} {:>6} {:<8} {:<9} {:>12} DESCRIPTION",
        "ID", "PERIOD", "USER", "TYPE", "STATUS", "AMOUNT"
    );
    println!("{}", "-".repeat(72));
    for entry in &entries {
        println!(
            "{:>6} {:<8} {:>6} {:<8} {:<9} {:>12} {}",
            entry.id.unwrap_or_default(),
            format!(
                "{:02}/{}",
                entry.month.unwrap_or_default(),
                entry.year.unwrap_or_default()
            ),
            entry.owner.unwrap_or_default(),
            entry.entry_type.map(|t| t.as_str()).unwrap_or("?"),
            entry.status.map(|s| s.as_str()).unwrap_or("?"),
            entry.amount.map(format_amount).unwrap_or_default(),
            truncate(entry.description.as_deref().unwrap_or(""), 30)
        );
    }
    Ok(())
}

async fn run_export_command(
    app: &App,
    format: &str,
    template: &EntryTemplate,
    output: Option<&str>,
) -> Result<()> {
    use crate::io::Exporter;
    use std::fs::File;
    use std::io::{Write, stdout};

    let exporter = Exporter::new(&app.entries);

    let writer: Box<dyn Write> = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path))?;
            Box::new(file)
        }
        None => Box::new(stdout()),
    };

    let count = match format.to_lowercase().as_str() {
        "csv" => exporter.export_entries_csv(template, writer).await?,
        "json" => exporter.export_entries_json(template, writer).await?,
        other => anyhow::bail!("Unknown export format '{}'. Valid formats: csv, json", other),
    };

    if let Some(path) = output {
        eprintln!("Exported {} entries to {}", count, path);
    }
    Ok(())
}

fn print_entry_details(entry: &LedgerEntry) {
    println!("Entry: {}", entry.description.as_deref().unwrap_or(""));
    println!("  ID:         {}", entry.id.unwrap_or_default());
    println!(
        "  Period:     {:02}/{}",
        entry.month.unwrap_or_default(),
        entry.year.unwrap_or_default()
    );
    println!("  User:       {}", entry.owner.unwrap_or_default());
    println!(
        "  Amount:     {}",
        entry.amount.map(format_amount).unwrap_or_default()
    );
    println!(
        "  Type:       {}",
        entry.entry_type.map(|t| t.as_str()).unwrap_or("?")
    );
    println!(
        "  Status:     {}",
        entry.status.map(|s| s.as_str()).unwrap_or("?")
    );
    if let Some(date) = entry.registration_date {
        println!("  Registered: {}", date.format("%Y-%m-%d"));
    }
}

fn parse_entry_type(s: &str) -> Result<EntryType> {
    EntryType::from_str(s)
        .ok_or_else(|| anyhow::anyhow!("Invalid entry type '{}'. Valid types: income, expense", s))
}

fn parse_status(s: &str) -> Result<EntryStatus> {
    EntryStatus::from_str(s).ok_or_else(|| {
        anyhow::anyhow!(
            "Invalid status '{}'. Valid statuses: pending, settled, canceled",
            s
        )
    })
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

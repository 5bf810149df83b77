use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use budget_ledger::cli::{
    handle_audit_command, handle_income_command, handle_month_command, handle_payment_command,
    handle_report_command, handle_search_command, handle_spend_command, handle_spend_type_command,
    IncomeCommands, MonthCommands, PaymentCommands, ReportCommands, SearchCommand, SpendCommands,
    SpendTypeCommands,
};
use budget_ledger::config::{paths::LedgerPaths, settings::Settings};
use budget_ledger::services::MonthService;
use budget_ledger::storage::Storage;

#[derive(Parser)]
#[command(
    name = "budget",
    version,
    about = "Household budget ledger",
    long_about = "Tracks incomes, fixed monthly payments and daily spends month by month. \
                  Every change recomputes the month's daily budget and the running \
                  saldo of each day."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the ledger and the current month
    Init,

    /// Show current configuration and paths
    Config,

    /// Month commands
    #[command(subcommand)]
    Month(MonthCommands),

    /// Income commands
    #[command(subcommand)]
    Income(IncomeCommands),

    /// Monthly payment commands
    #[command(subcommand)]
    Payment(PaymentCommands),

    /// Spend commands
    #[command(subcommand)]
    Spend(SpendCommands),

    /// Spend type commands
    #[command(subcommand)]
    Type(SpendTypeCommands),

    /// Search spends across all months
    Search(SearchCommand),

    /// Spending reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Show recent changes from the audit log
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

fn init_tracing(settings: &Settings) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = LedgerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    init_tracing(&settings);

    // Initialize storage
    let storage = Storage::open(paths.clone())?;

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing budget ledger at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            let month = MonthService::new(&storage).init_current()?;
            println!("Initialization complete!");
            println!();
            println!(
                "Current month {}-{:02} is ready ({} days).",
                month.year,
                month.month,
                month.days.len()
            );
            println!("Run 'budget income add <title> <amount>' to record an income.");
        }
        Some(Commands::Config) => {
            println!("Budget Ledger Configuration");
            println!("===========================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency:             {}", settings.currency);
            println!("  Spend cost policy:    {}", settings.spend_cost_policy);
            println!("  Max type depth:       {}", settings.max_spend_type_depth);
            println!("  Log level:            {}", settings.log_level);
            println!("  Date format:          {}", settings.date_format);
        }
        Some(Commands::Month(cmd)) => handle_month_command(&storage, &settings, cmd)?,
        Some(Commands::Income(cmd)) => handle_income_command(&storage, &settings, cmd)?,
        Some(Commands::Payment(cmd)) => handle_payment_command(&storage, &settings, cmd)?,
        Some(Commands::Spend(cmd)) => handle_spend_command(&storage, &settings, cmd)?,
        Some(Commands::Type(cmd)) => handle_spend_type_command(&storage, &settings, cmd)?,
        Some(Commands::Search(cmd)) => handle_search_command(&storage, &settings, cmd)?,
        Some(Commands::Report(cmd)) => handle_report_command(&storage, &settings, cmd)?,
        Some(Commands::Audit { limit }) => handle_audit_command(&storage, limit)?,
        None => {
            println!("Budget Ledger - household budget tracking");
            println!();
            println!("Run 'budget --help' for usage information.");
        }
    }

    Ok(())
}

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use pesowise::cli::{
    handle_audit_command, handle_bill_command, handle_budget_command, handle_export_command,
    handle_goal_command, handle_import_command, handle_investment_command, handle_loan_command,
    handle_notification_command, handle_profile_command, handle_report_command,
    handle_transaction_command, handle_wallet_command, BillCommands, BudgetCommands,
    ExportCommands, GoalCommands, InvestmentCommands, LoanCommands, NotificationCommands,
    ProfileCommands, ReportCommands, TransactionCommands, WalletCommands,
};
use pesowise::config::logging::init_logging;
use pesowise::config::{PesoPaths, Settings};
use pesowise::services::NotificationService;
use pesowise::storage::init::{initialize_storage, needs_initialization};
use pesowise::storage::Storage;

#[derive(Parser)]
#[command(
    name = "pesowise",
    version,
    about = "Personal finance tracker for Philippine peso wallets",
    long_about = "PesoWise tracks your wallets, income and expenses, monthly budgets, \
                  bills, loans, savings goals and investments from the command line."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory
    Init,

    /// Show current configuration and paths
    Config,

    /// Wallet management
    #[command(subcommand)]
    Wallet(WalletCommands),

    /// Income and expense records
    #[command(subcommand, alias = "transaction")]
    Txn(TransactionCommands),

    /// Monthly category budgets
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Recurring bills
    #[command(subcommand)]
    Bill(BillCommands),

    /// Money borrowed and lent
    #[command(subcommand)]
    Loan(LoanCommands),

    /// Savings goals
    #[command(subcommand)]
    Goal(GoalCommands),

    /// Investment holdings
    #[command(subcommand, alias = "investment")]
    Invest(InvestmentCommands),

    /// Notifications
    #[command(subcommand, alias = "notification")]
    Notify(NotificationCommands),

    /// User profile
    #[command(subcommand)]
    Profile(ProfileCommands),

    /// Reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Backups and CSV exports
    #[command(subcommand)]
    Export(ExportCommands),

    /// Restore a JSON or YAML backup, replacing all data
    Import {
        /// Backup file
        file: PathBuf,

        /// Replace the current data without asking
        #[arg(long)]
        force: bool,
    },

    /// Show the audit log
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        count: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = PesoPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    init_logging(&settings);

    if needs_initialization(&paths) {
        initialize_storage(&paths)?;
    }

    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    let reminders = NotificationService::new(&storage)
        .with_reminder_days(settings.bill_reminder_days)
        .refresh_bill_reminders(chrono::Local::now().date_naive());
    if let Err(e) = reminders {
        tracing::warn!(error = %e, "could not refresh bill reminders");
    }

    match cli.command {
        Some(Commands::Init) => {
            initialize_storage(&paths)?;
            println!("PesoWise data directory: {}", paths.base_dir().display());
            println!();
            println!("Get started by adding a wallet:");
            println!("  pesowise wallet create GCash --type gcash --balance 1000");
        }
        Some(Commands::Config) => {
            println!("PesoWise Configuration");
            println!("======================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:        {}", settings.currency_symbol);
            println!("  Date format:            {}", settings.date_format);
            println!("  Bill reminder days:     {}", settings.bill_reminder_days);
            println!("  Budget warning percent: {}%", settings.budget_warning_percent);
            println!("  Recent transactions:    {}", settings.recent_transactions);
            println!("  Log level:              {}", settings.log_level);
        }
        Some(Commands::Wallet(cmd)) => handle_wallet_command(&storage, cmd)?,
        Some(Commands::Txn(cmd)) => handle_transaction_command(&storage, &settings, cmd)?,
        Some(Commands::Budget(cmd)) => handle_budget_command(&storage, &settings, cmd)?,
        Some(Commands::Bill(cmd)) => handle_bill_command(&storage, &settings, cmd)?,
        Some(Commands::Loan(cmd)) => handle_loan_command(&storage, &settings, cmd)?,
        Some(Commands::Goal(cmd)) => handle_goal_command(&storage, &settings, cmd)?,
        Some(Commands::Invest(cmd)) => handle_investment_command(&storage, cmd)?,
        Some(Commands::Notify(cmd)) => handle_notification_command(&storage, &settings, cmd)?,
        Some(Commands::Profile(cmd)) => handle_profile_command(&storage, cmd)?,
        Some(Commands::Report(cmd)) => handle_report_command(&storage, &settings, cmd)?,
        Some(Commands::Export(cmd)) => handle_export_command(&storage, cmd)?,
        Some(Commands::Import { file, force }) => handle_import_command(&storage, file, force)?,
        Some(Commands::Audit { count }) => handle_audit_command(&storage, count)?,
        None => {
            println!("PesoWise - personal finance tracker");
            println!();
            println!("Run 'pesowise --help' for usage information.");
            println!("Run 'pesowise report dashboard' for an overview.");
        }
    }

    Ok(())
}

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use hoa::cli::{
    handle_category_command, handle_communication_command, handle_config_command,
    handle_event_command, handle_expense_command, handle_export_command, handle_fine_command,
    handle_house_command, handle_income_command, handle_receipt_command, handle_report_command,
    handle_send_command, handle_year_command,
};
use hoa::audit::{AuditFilter, Operation};
use hoa::config::{HoaPaths, ProviderCredentials, Settings};
use hoa::relay::{self, Relay, SimulatedDelays};
use hoa::storage::Storage;

#[derive(Parser)]
#[command(
    name = "hoa",
    author = "Kaylee Beyene",
    version,
    about = "Back office for a neighborhood association",
    long_about = "Keeps the ledger, house directory, fines and events of a residential \
                  association, prints receipts and reports, and sends them by email \
                  or WhatsApp."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Income entries of a fiscal year
    #[command(subcommand)]
    Income(hoa::cli::IncomeCommands),

    /// Expense entries of a fiscal year
    #[command(subcommand)]
    Expense(hoa::cli::ExpenseCommands),

    /// Community events
    #[command(subcommand)]
    Event(hoa::cli::EventCommands),

    /// House directory
    #[command(subcommand)]
    House(hoa::cli::HouseCommands),

    /// Fine catalog
    #[command(subcommand)]
    Fine(hoa::cli::FineCommands),

    /// Income and expense categories
    #[command(subcommand)]
    Category(hoa::cli::CategoryCommands),

    /// Fiscal years
    #[command(subcommand)]
    Year(hoa::cli::YearCommands),

    /// Association settings
    #[command(subcommand)]
    Config(hoa::cli::ConfigCommands),

    /// Email and WhatsApp sender settings
    #[command(subcommand, alias = "comm")]
    Communication(hoa::cli::CommunicationCommands),

    /// Print a monthly fee receipt
    Receipt(hoa::cli::ReceiptArgs),

    /// Monthly report and annual balance
    #[command(subcommand)]
    Report(hoa::cli::ReportCommands),

    /// Send receipts or notifications
    #[command(subcommand)]
    Send(hoa::cli::SendCommands),

    /// Export a fiscal year
    Export(hoa::cli::ExportArgs),

    /// Show recent changes from the audit log
    Audit {
        #[arg(short, long, default_value = "20")]
        limit: usize,
        /// Only this storage key, e.g. houses or income_2024
        #[arg(short, long)]
        key: Option<String>,
        /// Only this record id
        #[arg(long)]
        id: Option<String>,
        /// Only create, update or delete
        #[arg(long)]
        operation: Option<Operation>,
    },

    /// Run the messaging relay server
    Serve {
        /// Address to listen on, defaults to the configured one
        #[arg(long)]
        bind: Option<String>,
    },

    /// Show data paths and settings
    Paths,
}

fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let serving = matches!(cli.command, Some(Commands::Serve { .. }));
    init_logging(if serving { "info" } else { "warn" });

    let paths = HoaPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let storage = Storage::open(paths.clone(), &settings)?;

    match cli.command {
        Some(Commands::Income(cmd)) => handle_income_command(&storage, cmd)?,
        Some(Commands::Expense(cmd)) => handle_expense_command(&storage, cmd)?,
        Some(Commands::Event(cmd)) => handle_event_command(&storage, cmd)?,
        Some(Commands::House(cmd)) => handle_house_command(&storage, cmd)?,
        Some(Commands::Fine(cmd)) => handle_fine_command(&storage, cmd)?,
        Some(Commands::Category(cmd)) => handle_category_command(&storage, cmd)?,
        Some(Commands::Year(cmd)) => handle_year_command(&storage, cmd)?,
        Some(Commands::Config(cmd)) => handle_config_command(&storage, cmd)?,
        Some(Commands::Communication(cmd)) => handle_communication_command(&storage, cmd)?,
        Some(Commands::Receipt(args)) => handle_receipt_command(&storage, args)?,
        Some(Commands::Report(cmd)) => handle_report_command(&storage, cmd)?,
        Some(Commands::Send(cmd)) => handle_send_command(&storage, &settings, cmd)?,
        Some(Commands::Export(args)) => handle_export_command(&storage, args)?,
        Some(Commands::Audit {
            limit,
            key,
            id,
            operation,
        }) => {
            if let Some(audit) = storage.records().audit() {
                let filter = AuditFilter {
                    key,
                    record_id: id,
                    operation,
                };
                let entries = audit.query(&filter, Some(limit))?;
                if entries.is_empty() {
                    println!("No matching changes recorded.");
                }
                for entry in entries {
                    println!("{}", entry.format_human_readable());
                }
            }
        }
        Some(Commands::Serve { bind }) => {
            let credentials = ProviderCredentials::from_env();
            let relay = Relay::new(&credentials, SimulatedDelays::from_settings(&settings));
            let addr = bind.unwrap_or_else(|| settings.relay_bind.clone());
            println!("Relay listening on http://{}", addr);
            if relay.email_simulated() {
                println!("  email: simulated (set RESEND_API_KEY to send)");
            }
            if relay.whatsapp_simulated() {
                println!("  whatsapp: simulated (set TWILIO_ACCOUNT_SID and TWILIO_AUTH_TOKEN to send)");
            }
            relay::serve(&addr, &relay)?;
        }
        Some(Commands::Paths) => {
            println!("HOA back office");
            println!("===============");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!("Audit log:       {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!(
                "  Simulated latency: {}-{} ms",
                settings.latency_min_ms, settings.latency_max_ms
            );
            println!("  Relay bind: {}", settings.relay_bind);
        }
        None => {
            println!("HOA back office");
            println!();
            println!("Run 'hoa --help' for usage information.");
        }
    }

    Ok(())
}

use anyhow::Result;
use clap::{Parser, Subcommand};

use houseshare::cli::{
    handle_expense_command, handle_export_command, handle_report_command,
    handle_settings_command, handle_watch_command, ExpenseCommands, ExportCommands,
    ReportCommands, SettingsCommands, WatchArgs,
};
use houseshare::config::{paths::HousesharePaths, settings::Settings};
use houseshare::models::{Role, Session};
use houseshare::storage::{initialize_storage, needs_initialization, Storage};

#[derive(Parser)]
#[command(
    name = "houseshare",
    author = "Amith K G",
    version,
    about = "Shared-household expense tracker with fair-share settlement",
    long_about = "houseshare keeps track of what each roommate paid for, shows where \
                  the money went, and works out who owes whom so the household can \
                  settle up."
)]
struct Cli {
    /// Role supplied by the identity provider (manager or viewer)
    #[arg(long, global = true, env = "HOUSESHARE_ROLE", default_value = "viewer")]
    role: Role,

    /// Signed-in user, recorded for diagnostics
    #[arg(long, global = true, env = "HOUSESHARE_USER")]
    user: Option<String>,

    /// Print debug diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new household
    Init,

    /// Show current configuration and paths
    Config,

    /// Expense management commands
    #[command(subcommand, alias = "exp")]
    Expense(ExpenseCommands),

    /// Spending reports and settlement
    #[command(subcommand)]
    Report(ReportCommands),

    /// Export data
    #[command(subcommand)]
    Export(ExportCommands),

    /// Roster, categories and display settings
    #[command(subcommand)]
    Settings(SettingsCommands),

    /// Reprint the summary whenever expenses change
    Watch(WatchArgs),

    /// Show recent changes from the audit log
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    houseshare::logging::init(cli.verbose);

    let session = Session::new(cli.user, cli.role);
    tracing::debug!(role = %session.role, user = ?session.user, "session");

    // Initialize paths and settings
    let paths = HousesharePaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing houseshare at: {}", paths.base_dir().display());
            if initialize_storage(&paths)? {
                println!("Initialization complete!");
            } else {
                println!("Already initialized.");
            }
            println!();
            println!("Roommates:  {}", settings.roommates.join(", "));
            println!("Categories: {}", settings.categories.join(", "));
            println!();
            println!("Run 'houseshare settings add-roommate <name>' to change the household.");
        }
        Some(Commands::Config) => {
            println!("houseshare Configuration");
            println!("========================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!("Expenses file:   {}", paths.expenses_file().display());
            println!("Audit log:       {}", paths.audit_log().display());
            println!("Initialized:     {}", !needs_initialization(&paths));
            println!("Role:            {}", session.role);
            println!();
            print!("{}", houseshare::display::format_settings(&settings));
        }
        Some(Commands::Expense(cmd)) => {
            handle_expense_command(&storage, &settings, &session, cmd)?;
        }
        Some(Commands::Report(cmd)) => {
            handle_report_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Export(cmd)) => {
            handle_export_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Settings(cmd)) => {
            handle_settings_command(&storage, &mut settings, &session, cmd)?;
        }
        Some(Commands::Watch(args)) => {
            handle_watch_command(&storage, &settings, args)?;
        }
        Some(Commands::Audit { limit }) => {
            let entries = storage.audit().read_recent(limit)?;
            if entries.is_empty() {
                println!("No changes recorded yet.");
            }
            for entry in entries {
                println!("{}", entry);
            }
        }
        None => {
            println!("houseshare - Shared-household expense tracker");
            println!();
            println!("Run 'houseshare --help' for usage information.");
            println!("Run 'houseshare init' to set up a household.");
        }
    }

    Ok(())
}

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use basket::audit::AuditLogger;
use basket::cli::{
    handle_budget_command, handle_category_command, handle_export_command, handle_item_command,
    handle_list_command, populate_sample_data, BudgetCommands, CategoryCommands, ExportCommands,
    ItemCommands, ListCommands,
};
use basket::config::{BasketPaths, Settings};
use basket::display::Currency;
use basket::logging::init_cli_logger;
use basket::models::ShoppablePolicy;
use basket::services::Basket;
use basket::storage::{JsonSnapshotStore, SnapshotStore};

#[derive(Parser)]
#[command(
    name = "basket",
    version,
    about = "Household budget tracker with a derived shopping list",
    long_about = "basket keeps planned and actual expenses grouped by category, \
                  and turns them into a shopping list you can tick off as you go."
)]
struct Cli {
    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Category management commands
    #[command(subcommand, alias = "cat")]
    Category(CategoryCommands),

    /// Budget item commands
    #[command(subcommand)]
    Item(ItemCommands),

    /// Shopping list commands
    #[command(subcommand, alias = "shop")]
    List(ListCommands),

    /// Spending limit and budget status
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Export data to CSV, JSON or YAML
    #[command(subcommand)]
    Export(ExportCommands),

    /// Initialize a new basket
    Init {
        /// Fill the basket with a sample painting project
        #[arg(long)]
        sample: bool,
    },

    /// Show or change configuration
    Config {
        /// Which items appear on the shopping list
        /// (all-items, flagged-items, flagged-categories, flagged-items-in-flagged-categories)
        #[arg(long)]
        policy: Option<ShoppablePolicy>,
        /// Delete a category's items with it unless told otherwise
        #[arg(long)]
        cascade_default: Option<bool>,
        /// List found entries after the rest of their category
        #[arg(long)]
        found_last: Option<bool>,
        /// Currency symbol for printed amounts
        #[arg(long)]
        currency: Option<String>,
    },

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },
}

impl Commands {
    fn modifies_data(&self) -> bool {
        match self {
            Commands::Category(cmd) => cmd.modifies_data(),
            Commands::Item(cmd) => cmd.modifies_data(),
            Commands::List(cmd) => cmd.modifies_data(),
            Commands::Budget(cmd) => cmd.modifies_data(),
            Commands::Init { .. } => true,
            Commands::Export(_) | Commands::Config { .. } | Commands::Audit { .. } => false,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_cli_logger(cli.verbose);

    let paths = BasketPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;
    let currency = Currency::from_settings(&settings);

    let Some(command) = cli.command else {
        println!("basket - household budget and shopping list");
        println!();
        println!("Run 'basket init' to get started, or 'basket --help' for usage.");
        return Ok(());
    };

    let snapshots = JsonSnapshotStore::new(paths.snapshot_file());
    let audit = AuditLogger::new(paths.audit_log());

    let mut basket = match snapshots.load_all()? {
        Some(snapshot) => Basket::from_snapshot(settings.basket_config(), snapshot)
            .with_context(|| format!("Failed to load {}", paths.snapshot_file().display()))?,
        None => Basket::new(settings.basket_config()),
    };

    let modifies_data = command.modifies_data();
    if modifies_data && !paths.is_initialized() && !matches!(command, Commands::Init { .. }) {
        anyhow::bail!("No basket found at {}. Run 'basket init' first.", paths.base_dir().display());
    }

    match command {
        Commands::Category(cmd) => handle_category_command(&mut basket, &currency, cmd)?,
        Commands::Item(cmd) => handle_item_command(&mut basket, &currency, cmd)?,
        Commands::List(cmd) => handle_list_command(&mut basket, &currency, cmd)?,
        Commands::Budget(cmd) => handle_budget_command(&mut basket, &currency, cmd)?,
        Commands::Export(cmd) => handle_export_command(&basket, cmd)?,
        Commands::Init { sample } => {
            println!("Initializing basket at: {}", paths.base_dir().display());
            paths.ensure_directories()?;
            settings.save(&paths)?;

            if sample {
                if basket.store().item_count() > 0 {
                    anyhow::bail!("Basket already has items; sample data is only added to an empty basket.");
                }
                let added = populate_sample_data(&mut basket)?;
                println!("Added {} sample items.", added);
            }
            println!("Initialization complete!");
            println!();
            println!("Run 'basket item add <LABEL> <AMOUNT> --category <NAME>' to add items.");
        }
        Commands::Config {
            policy,
            cascade_default,
            found_last,
            currency: symbol,
        } => {
            let changed =
                policy.is_some() || cascade_default.is_some() || found_last.is_some() || symbol.is_some();
            if let Some(policy) = policy {
                settings.shoppable_policy = policy;
            }
            if let Some(cascade) = cascade_default {
                settings.cascade_delete_default = cascade;
            }
            if let Some(found_last) = found_last {
                settings.found_items_last = found_last;
            }
            if let Some(symbol) = symbol {
                settings.currency_symbol = symbol;
            }
            if changed {
                settings.save(&paths)?;
                println!("Configuration saved.");
                println!();
            }

            println!("basket configuration");
            println!("====================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Snapshot file:    {}", paths.snapshot_file().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Shoppable policy:        {}", settings.shoppable_policy);
            println!("  Cascade delete default:  {}", settings.cascade_delete_default);
            println!("  Found items last:        {}", settings.found_items_last);
            println!("  Amount precision:        {}", settings.amount_precision);
            println!("  Currency symbol:         {}", settings.currency_symbol);
        }
        Commands::Audit { limit } => {
            let entries = audit.read_recent(limit)?;
            if entries.is_empty() {
                println!("No audit entries yet.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
    }

    if modifies_data {
        snapshots.save_all(&basket.snapshot())?;
        let entries = basket.take_audit_entries();
        audit.log_batch(&entries)?;
        debug!(entries = entries.len(), "saved basket");
    }

    Ok(())
}

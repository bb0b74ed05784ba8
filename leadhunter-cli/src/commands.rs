//! CLI command implementations

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Subcommand;
use leadhunter_core::storage::open_store;
use leadhunter_core::{
    BusinessLead, LeadFilter, LeadHunterConfig, LeadHunterError, LeadRecord, Result, SearchParams,
    StoredLead, catalog, leads_to_csv, leads_to_excel,
};
use leadhunter_search::{LeadSearchAdapter, SearchOrchestrator};

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Start the API server
    Server {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,
        /// SQLite database URL, e.g. sqlite://leads.db
        #[arg(long)]
        database: Option<String>,
        /// Directory with the browser client to serve
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
    /// Search for leads and print them
    Search {
        /// Region to search (repeatable)
        #[arg(long = "region", required = true)]
        regions: Vec<String>,
        /// Business type to search (repeatable)
        #[arg(long = "business-type", required = true)]
        business_types: Vec<String>,
        /// Write website URLs to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Write names and phone numbers to this xlsx file
        #[arg(long)]
        excel: Option<PathBuf>,
        /// SQLite database URL, e.g. sqlite://leads.db
        #[arg(long)]
        database: Option<String>,
    },
    /// List stored leads
    Leads {
        #[arg(long)]
        region: Option<String>,
        #[arg(long)]
        business_type: Option<String>,
        /// SQLite database URL, e.g. sqlite://leads.db
        #[arg(long)]
        database: Option<String>,
    },
    /// Show the supported regions and business types
    Catalog,
}

/// Handle the CLI command
///
/// # Errors
/// Returns appropriate error based on the command that fails
pub async fn handle_command(command: Commands) -> anyhow::Result<()> {
    let mut config = LeadHunterConfig::from_env();

    match command {
        Commands::Server {
            host,
            port,
            database,
            static_dir,
        } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            if static_dir.is_some() {
                config.server.static_dir = static_dir;
            }
            override_database(&mut config, database);
            leadhunter_web::run_server(config).await?;
            Ok(())
        }
        Commands::Search {
            regions,
            business_types,
            csv,
            excel,
            database,
        } => {
            override_database(&mut config, database);
            let params = SearchParams {
                regions,
                business_types,
            };
            search(config, params, csv.as_deref(), excel.as_deref())
                .await
                .map_err(report)
        }
        Commands::Leads {
            region,
            business_type,
            database,
        } => {
            override_database(&mut config, database);
            let filter = LeadFilter {
                region,
                business_type,
            };
            list_leads(config, filter).await.map_err(report)
        }
        Commands::Catalog => {
            show_catalog();
            Ok(())
        }
    }
}

fn override_database(config: &mut LeadHunterConfig, database: Option<String>) {
    if database.is_some() {
        config.storage.database_url = database;
    }
}

/// Validation errors are shown as their user message, others in full.
fn report(err: LeadHunterError) -> anyhow::Error {
    if err.is_user_error() {
        anyhow::anyhow!(err.user_message())
    } else {
        tracing::debug!("Command failed: {err:?}");
        anyhow::Error::new(err)
    }
}

/// Search every region and business type pair and print the leads
///
/// # Errors
/// - `LeadHunterError::InvalidSearch` - A selection is empty or holds an unknown label
/// - `LeadHunterError::Storage` - Database could not be opened
/// - `LeadHunterError::Export` - CSV or Excel rendering failed
/// - `LeadHunterError::Io` - Export file could not be written
pub async fn search(
    config: LeadHunterConfig,
    params: SearchParams,
    csv: Option<&Path>,
    excel: Option<&Path>,
) -> Result<()> {
    let store = open_store(&config.storage).await?;
    let adapter = LeadSearchAdapter::from_config(&config.search);
    let orchestrator = SearchOrchestrator::new(Arc::new(adapter), store);

    let outcome = orchestrator.search(params).await?;
    print_leads(&outcome.leads);

    if outcome.persisted.is_none() {
        println!("Warning: leads were not saved, see the log for details");
    }

    let records: Vec<LeadRecord> = outcome.leads.into_iter().map(LeadRecord::from).collect();

    if let Some(path) = csv {
        tokio::fs::write(path, leads_to_csv(&records)?).await?;
        println!("CSV written to {}", path.display());
    }
    if let Some(path) = excel {
        tokio::fs::write(path, leads_to_excel(&records)?).await?;
        println!("Excel written to {}", path.display());
    }

    Ok(())
}

/// Print stored leads matching the filter
///
/// # Errors
/// - `LeadHunterError::Storage` - Database could not be opened or read
pub async fn list_leads(config: LeadHunterConfig, filter: LeadFilter) -> Result<()> {
    let store = open_store(&config.storage).await?;
    let stored = store.get_leads(&filter.normalized()).await?;

    if stored.is_empty() {
        println!("No stored leads");
        return Ok(());
    }

    for StoredLead { id, lead } in &stored {
        println!("#{id:<5} {}", format_lead(lead));
    }
    println!("{} leads", stored.len());

    Ok(())
}

fn show_catalog() {
    println!("Regions:");
    for region in catalog::regions() {
        println!("  {region}");
    }
    println!("Business types:");
    for business_type in catalog::business_types() {
        println!("  {business_type}");
    }
}

fn print_leads(leads: &[BusinessLead]) {
    for lead in leads {
        println!("{}", format_lead(lead));
    }
    println!("{} leads found", leads.len());
}

fn format_lead(lead: &BusinessLead) -> String {
    let or_dash = |value: &str| if value.is_empty() { "-".to_string() } else { value.to_string() };
    format!(
        "{} | {} | {} | {} / {}",
        lead.name,
        or_dash(&lead.website),
        or_dash(&lead.phone),
        lead.region,
        lead.business_type
    )
}

//! Fonon CLI: drive the admin engine against a live backend.
//!
//! Reads FONON_API_URL (or the environment-specific variants),
//! FONON_STORAGE_URL and FONON_API_TOKEN, optionally from a `.env` file.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use fonon_admin::{get_resource_config, resource_by_slug, resource_list, ResourceConfig, ResourcePage};
use fonon_api_client::{ApiClient, HttpMediaStore, RestResourceService};
use fonon_cli::{error_summary, fill_form, init_tracing, parse_values, print_json, read_media_file, render_table};
use fonon_core::{
    normalize_youtube_url, AdminConfig, AppError, DeleteTarget, MediaStore, Notifier, ResourceService,
    TracingNotifier,
};

#[derive(Parser)]
#[command(name = "fonon", about = "Fonon admin CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the managed resources
    Resources,
    /// List the records of a resource
    List {
        /// Resource slug, e.g. news or job-requests
        resource: String,
        /// Print the raw records instead of a table
        #[arg(long)]
        json: bool,
        /// Maximum cell width in table output
        #[arg(long, default_value = "40")]
        width: usize,
    },
    /// Get a single record
    Get { resource: String, id: i64 },
    /// Create a record through the resource's form
    Create {
        resource: String,
        /// Form values as a JSON object
        values: String,
        /// Create the record under this parent, for nesting resources
        #[arg(long)]
        parent: Option<i64>,
    },
    /// Update a record through the resource's form
    Update {
        resource: String,
        id: i64,
        /// Form values to change, as a JSON object
        values: String,
    },
    /// Delete a record
    Delete { resource: String, id: i64 },
    /// Upload a file into a category
    Upload {
        /// Path to the file to upload
        file: PathBuf,
        #[arg(long, default_value = "general")]
        category: String,
    },
    /// Delete a stored file by path or URL
    DeleteFile {
        #[arg(long)]
        path: Option<String>,
        #[arg(long)]
        url: Option<String>,
    },
    /// Normalise a YouTube link into its embed form
    Youtube { url: String },
}

struct Backend {
    client: ApiClient,
    store: Arc<dyn MediaStore>,
    notifier: Arc<dyn Notifier>,
}

impl Backend {
    fn from_config(config: &AdminConfig) -> anyhow::Result<Self> {
        let client = ApiClient::from_config(config).context("Failed to create API client")?;
        let store = HttpMediaStore::new(client.clone(), config.media_base_url.clone());
        Ok(Self {
            client,
            store: Arc::new(store),
            notifier: Arc::new(TracingNotifier),
        })
    }

    fn service(&self, config: &ResourceConfig) -> Arc<dyn ResourceService> {
        Arc::new(RestResourceService::new(self.client.clone(), config.endpoint))
    }

    fn page(&self, config: &'static ResourceConfig) -> ResourcePage {
        let page = ResourcePage::new(
            config,
            self.service(config),
            Arc::clone(&self.store),
            Arc::clone(&self.notifier),
        );
        config
            .related_resources()
            .into_iter()
            .fold(page, |page, key| page.with_related(key, self.service(get_resource_config(key))))
    }
}

/// Submit the page's open form, discarding its uploads when the save fails.
async fn submit(page: &mut ResourcePage) -> anyhow::Result<()> {
    match page.submit().await {
        Ok(outcome) => {
            print_json(&serde_json::json!({ "success": true, "outcome": outcome.label() }))
        }
        Err(err) => {
            if let AppError::Validation(issues) = &err {
                for issue in issues {
                    eprintln!("{}: {}", issue.path, issue.message);
                }
            }
            eprintln!("{}", error_summary(&err));
            page.cancel().await;
            Err(err.into())
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    if let Commands::Youtube { url } = &cli.command {
        let embed = normalize_youtube_url(url).context("Not a recognised YouTube link")?;
        return print_json(&serde_json::json!({ "embed_url": embed }));
    }
    if let Commands::Resources = &cli.command {
        let resources: Vec<_> = resource_list()
            .iter()
            .map(|r| {
                serde_json::json!({
                    "slug": r.key.slug(),
                    "title": r.title,
                    "endpoint": r.endpoint,
                    "description": r.description,
                })
            })
            .collect();
        return print_json(&resources);
    }

    let config = AdminConfig::from_env().context(
        "Failed to load configuration. Set FONON_API_URL (or FONON_API_URL_LOCAL / FONON_API_URL_PROD)",
    )?;
    tracing::debug!(api = %config.api_base_url, environment = %config.environment, "Configuration loaded");
    let backend = Backend::from_config(&config)?;

    match cli.command {
        Commands::List {
            resource,
            json,
            width,
        } => {
            let mut page = backend.page(resource_by_slug(&resource)?);
            if json {
                let records = page.records().await?.to_vec();
                print_json(&records)?;
            } else {
                let rows = page.rows().await?;
                print!("{}", render_table(&page.headers(), &rows, width));
            }
        }
        Commands::Get { resource, id } => {
            let config = resource_by_slug(&resource)?;
            let record = backend.service(config).get(id).await?;
            print_json(&record)?;
        }
        Commands::Create {
            resource,
            values,
            parent,
        } => {
            let values = parse_values(&values)?;
            let config = resource_by_slug(&resource)?;
            let mut page = backend.page(config);
            match parent {
                Some(parent_id) => {
                    let parent = backend.service(config).get(parent_id).await?;
                    page.open_create_child(&parent)?;
                }
                None => page.open_create(),
            }
            fill_form(&mut page, values).await;
            submit(&mut page).await?;
        }
        Commands::Update {
            resource,
            id,
            values,
        } => {
            let values = parse_values(&values)?;
            let config = resource_by_slug(&resource)?;
            let existing = backend.service(config).get(id).await?;
            let mut page = backend.page(config);
            page.open_edit(existing);
            fill_form(&mut page, values).await;
            submit(&mut page).await?;
        }
        Commands::Delete { resource, id } => {
            let mut page = backend.page(resource_by_slug(&resource)?);
            page.request_delete(serde_json::Map::from_iter([("id".to_string(), id.into())]));
            if let Err(err) = page.confirm_delete().await {
                eprintln!("{}", error_summary(&err));
                return Err(err.into());
            }
            print_json(
                &serde_json::json!({ "success": true, "message": format!("Record {} deleted", id) }),
            )?;
        }
        Commands::Upload { file, category } => {
            let media = read_media_file(&file).await?;
            let uploaded = backend.store.upload(&category, media).await?;
            print_json(&uploaded)?;
        }
        Commands::DeleteFile { path, url } => {
            let target = DeleteTarget { path, url };
            let Some(value) = target.value().map(str::to_string) else {
                anyhow::bail!("Pass --path or --url");
            };
            backend.store.delete(&target).await?;
            print_json(&serde_json::json!({ "success": true, "message": format!("{} deleted", value) }))?;
        }
        Commands::Resources | Commands::Youtube { .. } => {}
    }

    Ok(())
}

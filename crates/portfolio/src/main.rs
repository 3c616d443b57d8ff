//! `folio` - CLI for portfolio
//!
//! This binary provides the command-line interface for listing, editing and
//! rendering portfolio project cards.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::{bail, Context};
use clap::Parser;

use portfolio::cli::{Cli, Command, ConfigCommand, FetchCommand, OutputFormat, RenderCommand};
use portfolio::{
    init_logging, CardProps, Config, HttpSource, ProjectCard, ProjectRecord, ProjectStore,
    ProjectsAdmin, ProjectsViewer, SqliteSlots, Status,
};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone())?;

    match cli.command {
        Command::List(cmd) => handle_list(&config, cmd.format),
        Command::Fetch(cmd) => handle_fetch(&config, cmd),
        Command::Upsert(cmd) => {
            let store = open_store(&config)?;
            let mut admin = ProjectsAdmin::new(&store);
            report(admin.submit_upsert(cmd.into()))
        }
        Command::Delete(cmd) => {
            let store = open_store(&config)?;
            let mut admin = ProjectsAdmin::new(&store);
            report(admin.submit_delete(&cmd.id))
        }
        Command::Show(cmd) => handle_show(&config, &cmd.id, cmd.json),
        Command::Render(cmd) => {
            handle_render(&cmd);
            Ok(())
        }
        Command::Seed => handle_seed(&config),
        Command::Status(cmd) => handle_status(&config, cmd.json),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn open_store(config: &Config) -> anyhow::Result<ProjectStore<SqliteSlots>> {
    let slots = SqliteSlots::open(config.database_path())
        .with_context(|| format!("opening {}", config.database_path().display()))?;
    Ok(ProjectStore::new(slots, config.storage.slot_key.clone()))
}

fn http_source(config: &Config, endpoint: Option<String>) -> anyhow::Result<HttpSource> {
    let endpoint = endpoint.or_else(|| config.remote.endpoint.clone());
    Ok(HttpSource::new(endpoint, config.remote_timeout())?)
}

fn report(status: &Status) -> anyhow::Result<()> {
    if status.is_error() {
        bail!("{}", status.message);
    }
    println!("{}", status.message);
    Ok(())
}

fn handle_list(config: &Config, format: OutputFormat) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let mut viewer = ProjectsViewer::new(&store, http_source(config, None)?, &config.viewer);
    viewer.load_local();
    print_projects(viewer.records(), &viewer.container().to_html(), format)?;
    eprintln!("{}", viewer.status());
    Ok(())
}

fn handle_fetch(config: &Config, cmd: FetchCommand) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let mut viewer = ProjectsViewer::new(&store, http_source(config, cmd.url)?, &config.viewer);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    if runtime.block_on(viewer.load_remote()).is_none() {
        bail!("{}", viewer.status());
    }

    print_projects(viewer.records(), &viewer.container().to_html(), cmd.format)?;
    eprintln!("{}", viewer.status());
    Ok(())
}

fn print_projects(
    records: &[ProjectRecord],
    html: &str,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Plain => {
            for record in records {
                println!("{}\t{}", record.id, record.title.as_deref().unwrap_or(""));
            }
        }
        OutputFormat::Table => {
            println!("{:<20} {:<28} {:<8} {}", "ID", "TITLE", "DATE", "ROLE");
            println!("{}", "-".repeat(72));
            for record in records {
                println!(
                    "{:<20} {:<28} {:<8} {}",
                    record.id,
                    record.title.as_deref().unwrap_or(""),
                    record.date.as_deref().unwrap_or(""),
                    record.role.as_deref().unwrap_or(""),
                );
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(records)?),
        OutputFormat::Html => println!("{html}"),
    }
    Ok(())
}

fn handle_show(config: &Config, id: &str, json: bool) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let mut admin = ProjectsAdmin::new(&store);
    let status = admin.select_card(id);
    if status.is_error() {
        bail!("{}", status.message);
    }

    let form = admin.form();
    if json {
        println!("{}", serde_json::to_string_pretty(form)?);
    } else {
        println!("id:          {}", form.id);
        println!("title:       {}", form.title);
        println!("description: {}", form.description);
        println!("imageSrc:    {}", form.image_src);
        println!("imageAlt:    {}", form.image_alt);
        println!("tech:        {}", form.tech);
        println!("linkHref:    {}", form.link_href);
        println!("linkLabel:   {}", form.link_label);
        println!("date:        {}", form.date);
        println!("role:        {}", form.role);
        println!("keywords:    {}", form.keywords);
    }
    Ok(())
}

fn handle_render(cmd: &RenderCommand) {
    let props = CardProps::from(&cmd.card);
    if cmd.shadow_only {
        println!("{}", portfolio::render(&props));
        return;
    }

    let mut card = ProjectCard::new();
    for name in portfolio::card::OBSERVED_ATTRIBUTES {
        if let Some(value) = props.get_attribute(name).filter(|v| !v.is_empty()) {
            card.set_attribute(name, value);
        }
    }
    card.connect();
    println!("{}", card.to_html());
}

fn handle_seed(config: &Config) -> anyhow::Result<()> {
    let store = open_store(config)?;
    if store.ensure_seeded() {
        println!("Seeded {} project(s).", store.read_all().len());
    } else {
        println!("Store already initialized; nothing seeded.");
    }
    Ok(())
}

fn handle_status(config: &Config, json: bool) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let stats = store.stats();

    if json {
        let status = serde_json::json!({
            "database_path": config.database_path(),
            "database_size_bytes": store.slots().size_bytes(),
            "remote_endpoint": config.remote.endpoint,
            "store": stats,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("folio status");
        println!("------------");
        println!("Database:      {}", config.database_path().display());
        println!("Slot key:      {}", stats.slot_key);
        println!(
            "Slot:          {}",
            if stats.slot_present { "present" } else { "absent" }
        );
        println!("Projects:      {}", stats.records);
        match stats.last_modified {
            Some(at) => println!("Last write:    {}", at.to_rfc3339()),
            None => println!("Last write:    never"),
        }
        println!(
            "Remote API:    {}",
            config.remote.endpoint.as_deref().unwrap_or("not configured")
        );
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:   {}", config.database_path().display());
                println!("  Slot key:        {}", config.storage.slot_key);
                println!();
                println!("[Remote]");
                println!(
                    "  Endpoint:        {}",
                    config.remote.endpoint.as_deref().unwrap_or("(none)")
                );
                println!("  Timeout (secs):  {}", config.remote.timeout_secs);
                println!();
                println!("[Viewer]");
                println!("  Trigger label:   {}", config.viewer.trigger_label);
                println!("  Loading label:   {}", config.viewer.loading_label);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => bail!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}

use std::io::{self, Write};

use anyhow::Context;
use colored::Colorize;
use folio_config::{FolioConfig, Location};
use folio_store::{Encoding, Model, Publisher, StoreConfig};
use serde_json::json;

use crate::cli::*;
use crate::record::Record;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let store_config = resolve_store_config(&cli)?;
    let store: Publisher<Record> = Publisher::from_config(store_config);
    let mut out = io::stdout().lock();
    match cli.command {
        Command::List => cmd_list(&store, cli.format, &mut out),
        Command::Put(args) => cmd_put(&store, &args.json, cli.format, &mut out),
        Command::Delete(args) => cmd_delete(&store, &args.json, cli.format, &mut out),
        Command::Paths => cmd_paths(&store, cli.format, &mut out),
    }
}

fn resolve_store_config(cli: &Cli) -> anyhow::Result<StoreConfig> {
    let mut config = match &cli.config {
        Some(path) => FolioConfig::load(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => FolioConfig::default(),
    };
    if let Some(dir) = &cli.dir {
        let dir = std::path::absolute(dir)
            .with_context(|| format!("resolving store directory {}", dir.display()))?;
        config.store.directory = Some(dir);
    }
    let mut store = config
        .resolve_store()
        .context("resolving store directory")?;
    if store.encoding != Encoding::Json {
        tracing::warn!(
            encoding = %store.encoding,
            "records are schemaless JSON; using json encoding instead"
        );
        store.encoding = Encoding::Json;
    }
    Ok(store)
}

fn cmd_list(store: &Publisher<Record>, format: OutputFormat, out: &mut impl Write) -> anyhow::Result<()> {
    let records = store
        .enumerate()
        .with_context(|| format!("listing {}", store.directory().display()))?;
    match format {
        OutputFormat::Json => {
            let mut rows = Vec::with_capacity(records.len());
            for record in &records {
                rows.push(json!({ "digest": record.digest()?.to_hex(), "record": record }));
            }
            writeln!(out, "{}", serde_json::to_string_pretty(&rows)?)?;
        }
        OutputFormat::Text => {
            if records.is_empty() {
                writeln!(out, "No records.")?;
            }
            for record in &records {
                let digest = record.digest()?;
                writeln!(out, "{}  {}", digest.short_hex().yellow(), serde_json::to_string(record)?)?;
            }
        }
    }
    Ok(())
}

fn cmd_put(store: &Publisher<Record>, text: &str, format: OutputFormat, out: &mut impl Write) -> anyhow::Result<()> {
    let record = Record::parse(text).context("parsing record")?;
    let digest = store.put(&record).context("storing record")?;
    match format {
        OutputFormat::Json => writeln!(out, "{}", json!({ "digest": digest.to_hex() }))?,
        OutputFormat::Text => writeln!(out, "{} Stored {}", "✓".green().bold(), digest.to_hex().yellow())?,
    }
    Ok(())
}

fn cmd_delete(store: &Publisher<Record>, text: &str, format: OutputFormat, out: &mut impl Write) -> anyhow::Result<()> {
    let record = Record::parse(text).context("parsing record")?;
    let digest = record.digest()?;
    store.delete(&record).context("deleting record")?;
    match format {
        OutputFormat::Json => writeln!(out, "{}", json!({ "deleted": digest.to_hex() }))?,
        OutputFormat::Text => writeln!(out, "{} Deleted {}", "✓".green().bold(), digest.to_hex().yellow())?,
    }
    Ok(())
}

fn cmd_paths(store: &Publisher<Record>, format: OutputFormat, out: &mut impl Write) -> anyhow::Result<()> {
    let base = |location: Location| location.base().ok().map(|p| p.display().to_string());
    let hidden = base(Location::Hidden);
    let exposed = base(Location::Exposed);
    match format {
        OutputFormat::Json => writeln!(
            out,
            "{}",
            json!({
                "store": store.directory().display().to_string(),
                "hidden": hidden,
                "exposed": exposed,
            })
        )?,
        OutputFormat::Text => {
            let unavailable = || "unavailable".dimmed().to_string();
            writeln!(out, "store:   {}", store.directory().display().to_string().bold())?;
            writeln!(out, "hidden:  {}", hidden.unwrap_or_else(unavailable))?;
            writeln!(out, "exposed: {}", exposed.unwrap_or_else(unavailable))?;
        }
    }
    Ok(())
}

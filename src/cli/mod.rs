//! CLI module
//!
//! Command-line interface over the instance store. Every command drives
//! a store wired to the simulated backend.

mod args;

pub use args::{Args, Commands};

use std::path::Path;

use anyhow::{Context, Result};

use crate::core::api::FakeApi;
use crate::core::schema::{GameDraft, InstanceDraft, LoaderDraft};
use crate::core::store::LauncherStore;
use crate::util::format_last_played;

pub async fn handle_command(command: Commands) -> Result<()> {
    match command {
        Commands::List => list_instances().await,
        Commands::Add {
            name,
            game_version,
            loader,
            loader_version,
        } => add_instance(name, game_version, loader, loader_version).await,
        Commands::Delete { name } => delete_instance(&name).await,
        Commands::Duplicate { name, new_name } => duplicate_instance(&name, &new_name).await,
        Commands::Import { path } => import_instances(&path).await,
        Commands::Reset => reset_instances(),
    }
}

async fn seeded_store() -> Result<LauncherStore<FakeApi>> {
    let mut store = LauncherStore::with_fake_backend();
    store.initialize().await?;
    Ok(store)
}

fn print_instances(store: &LauncherStore<FakeApi>) {
    println!("📦 Instances ({}):", store.instance_count());
    println!();
    for instance in store.sorted_instances() {
        println!(
            "   {:<30} {} {} (game {}) - {}",
            instance.name,
            instance.loader.loader,
            instance.loader.version,
            instance.game.version,
            format_last_played(instance.last_played)
        );
    }
}

/// List all instances, most recently played first
pub async fn list_instances() -> Result<()> {
    let store = seeded_store().await?;

    if !store.has_instances() {
        println!("📦 No instances found.");
        println!("   Use 'cubiclauncher add <name> --game-version <ver>' to create one.");
        return Ok(());
    }

    print_instances(&store);
    Ok(())
}

async fn add_instance(
    name: String,
    game_version: String,
    loader: String,
    loader_version: Option<String>,
) -> Result<()> {
    let mut store = seeded_store().await?;

    let draft = InstanceDraft {
        name,
        loader: LoaderDraft {
            loader,
            version: loader_version.unwrap_or_else(|| game_version.clone()),
        },
        game: GameDraft {
            version: game_version,
        },
        last_played: None,
    };

    store.add_instance(draft).await?;
    println!("✅ Instance added.");
    print_instances(&store);
    Ok(())
}

async fn delete_instance(name: &str) -> Result<()> {
    let mut store = seeded_store().await?;

    store.delete_instance(name).await?;
    println!("🗑️ Deleted '{name}'.");
    print_instances(&store);
    Ok(())
}

async fn duplicate_instance(name: &str, new_name: &str) -> Result<()> {
    let mut store = seeded_store().await?;

    store.duplicate_instance(name, new_name).await?;
    println!("✅ Duplicated '{name}' as '{new_name}'.");
    print_instances(&store);
    Ok(())
}

async fn import_instances(path: &Path) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .context(format!("Cannot read import file {}", path.display()))?;
    let drafts: Vec<InstanceDraft> =
        serde_json::from_str(&content).context("Import file is not a JSON array of instances")?;

    let mut store = seeded_store().await?;
    let mut added = 0;

    for draft in drafts {
        let name = draft.name.clone();
        match store.add_instance(draft).await {
            Ok(()) => {
                added += 1;
                tracing::info!("imported '{name}'");
            }
            Err(e) => eprintln!("⚠️ Skipped '{name}': {e}"),
        }
    }

    println!("✅ Imported {added} instance(s).");
    print_instances(&store);
    Ok(())
}

fn reset_instances() -> Result<()> {
    let mut store = LauncherStore::with_fake_backend();
    store.reset_to_fake_data();
    print_instances(&store);
    Ok(())
}

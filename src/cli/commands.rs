//! Command dispatch
//!
//! Each subcommand resolves settings, loads the catalog through the service
//! container and prints its result.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::{BitmapCache, CancelFlag, ExplorerSession, PreloadOutcome};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::browse::{item_fields, run_browse};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{CatalogTree, DisplayKey, TreeNodeConvert};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let project_dir = resolve_project_dir(cli.project_dir.as_deref())?;
    debug!("project_dir: {}", project_dir.display());

    let Some(command) = &cli.command else {
        return Err(CliError::Usage(
            "no command given, see --help".to_string(),
        ));
    };

    match command {
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        Commands::Config { command } => {
            let settings = Settings::load(Some(&project_dir))?;
            cmd_config(command, &settings, &project_dir)
        }
        other => {
            let mut settings = Settings::load(Some(&project_dir))?;
            if let Some(source) = &cli.source {
                settings.catalog.source = project_dir.join(source);
            }
            let container = ServiceContainer::new(settings);
            let json = cli.json.as_ref().map(|p| project_dir.join(p));
            run(other, &container, json.as_deref())
        }
    }
}

fn resolve_project_dir(project_dir: Option<&Path>) -> CliResult<PathBuf> {
    match project_dir {
        Some(dir) if dir.is_dir() => Ok(dir.to_path_buf()),
        Some(dir) => Err(CliError::InvalidArgs(format!(
            "not a directory: {}",
            dir.display()
        ))),
        None => std::env::current_dir().map_err(|e| InfraError::io("current directory", e).into()),
    }
}

fn run(command: &Commands, container: &ServiceContainer, json: Option<&Path>) -> CliResult<()> {
    // preload only needs the images directory
    if let Commands::Preload = command {
        return cmd_preload(container);
    }
    let tree = load_tree(container, json)?;
    match command {
        Commands::Tree => cmd_tree(&tree, container),
        Commands::Ls { path } => cmd_ls(&tree, container, path),
        Commands::Show { path } => cmd_show(&tree, container, path),
        Commands::Export { output } => cmd_export(&tree, container, output.as_deref()),
        Commands::Browse => cmd_browse(tree, container),
        Commands::Preload | Commands::Config { .. } | Commands::Completion { .. } => Ok(()),
    }
}

#[instrument(level = "debug", skip(container))]
fn load_tree(container: &ServiceContainer, json: Option<&Path>) -> CliResult<Arc<CatalogTree>> {
    let service = container.catalog_service();
    let loaded = match json {
        Some(path) => service.load_json(path)?,
        None => service.load(&container.settings.catalog.source)?,
    };
    if let Some(stats) = loaded.stats {
        if stats.skipped_incomplete > 0 {
            output::warning(&format!(
                "{} rows skipped for missing name, status or order",
                stats.skipped_incomplete
            ));
        }
    }
    Ok(Arc::new(loaded.tree))
}

fn cmd_tree(tree: &CatalogTree, container: &ServiceContainer) -> CliResult<()> {
    let order = container.settings.explorer.sibling_order;
    output::info(&tree.to_tree_string(order));
    output::detail(&format!(
        "{} folders, {} items",
        tree.folder_count(),
        tree.item_count()
    ));
    Ok(())
}

fn cmd_ls(tree: &CatalogTree, container: &ServiceContainer, path: &[String]) -> CliResult<()> {
    let node = tree
        .node_at(path)
        .ok_or_else(|| CliError::InvalidArgs(format!("no such path: {}", path.join(" / "))))?;
    let labels = &container.settings.labels;
    output::header(&labels.folder_label(path));
    for idx in tree.children(node, container.settings.explorer.sibling_order) {
        if let Some(child) = tree.get_node(idx) {
            let name: &str = if path.is_empty() {
                labels.status_display_name(&child.name)
            } else {
                &child.name
            };
            output::detail(&output::entry_label(name, child.is_folder()));
        }
    }
    Ok(())
}

fn cmd_show(tree: &CatalogTree, container: &ServiceContainer, path: &[String]) -> CliResult<()> {
    let node = tree
        .node_at_path(path)
        .ok_or_else(|| CliError::InvalidArgs(format!("no such path: {}", path.join(" / "))))?;
    match node.as_item() {
        Some(item) => {
            output::header(&item.name);
            let images = container.asset_catalog()?;
            match images.image_for(&item.name) {
                Some(image) => {
                    let mut cache = BitmapCache::new();
                    let shown = match container.preloader().fetch(image, &mut cache) {
                        Some(bitmap) => {
                            format!("{} ({}x{})", image.display(), bitmap.width, bitmap.height)
                        }
                        None => format!("{} (cannot decode)", image.display()),
                    };
                    output::action("Image", &shown);
                }
                None => output::detail("no image"),
            }
            for (label, value) in item_fields(item) {
                output::action(label, &value);
            }
        }
        None => {
            let labels = &container.settings.labels;
            output::header(&labels.folder_label(path));
            if let Some(up) = labels.up_label(path) {
                output::detail(&format!("^ {up}"));
            }
            if let Some(folder) = node.as_folder() {
                output::detail(&format!("{} entries", folder.children.len()));
            }
        }
    }
    Ok(())
}

fn cmd_export(
    tree: &CatalogTree,
    container: &ServiceContainer,
    target: Option<&Path>,
) -> CliResult<()> {
    let service = container.catalog_service();
    match target {
        Some(path) => {
            service.write_json(tree, path)?;
            output::success(&format!("wrote {}", path.display()));
        }
        None => output::info(&service.export_json(tree)?),
    }
    Ok(())
}

fn cmd_browse(tree: Arc<CatalogTree>, container: &ServiceContainer) -> CliResult<()> {
    let mut session: ExplorerSession = container.session(tree);
    let images = container.asset_catalog()?;
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    run_browse(
        &mut session,
        &container.settings.labels,
        &images,
        stdin.lock(),
        &mut stdout,
    )
    .map_err(|e| InfraError::io("browse session", e))?;
    Ok(())
}

fn cmd_preload(container: &ServiceContainer) -> CliResult<()> {
    let catalog = container.asset_catalog()?;
    if catalog.is_empty() {
        output::warning("no images to preload (set catalog.images_dir)");
        return Ok(());
    }

    let mut cache = BitmapCache::new();
    let cancel = CancelFlag::new();
    let mut stdout = io::stdout();
    let outcome = container
        .preloader()
        .preload_all(&catalog, &mut cache, &cancel, |progress| {
            // a closed stdout does not abort the load
            let _ = write!(stdout, "\r{}/{}", progress.loaded, progress.total);
            let _ = stdout.flush();
        });
    println!();

    match outcome {
        PreloadOutcome::Completed { total, failed } => {
            output::success(&format!("{} of {} images decoded", cache.len(), total));
            if failed > 0 {
                output::warning(&format!("{failed} images could not be decoded"));
            }
        }
        PreloadOutcome::Cancelled { processed } => {
            output::warning(&format!("preload cancelled after {processed} images"));
        }
    }
    Ok(())
}

fn cmd_config(command: &ConfigCommands, settings: &Settings, project_dir: &Path) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&settings.to_toml()?),
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::action("global", &path.display()),
                None => output::action("global", "(no home directory)"),
            }
            output::action("local", &local_config_path(project_dir).display());
        }
        ConfigCommands::Template => output::info(&Settings::template()),
    }
    Ok(())
}

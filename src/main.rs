use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;

use version_it::config::{self, AppConfig};
use version_it::export::export_version_data;
use version_it::manifest::{FsStore, ManifestDefaults, ManifestDocument, ManifestInfo};
use version_it::version::render_version_text;

#[derive(Parser)]
#[command(name = "version-it")]
#[command(version, about = "Manage the version and dependencies of a package.json")]
struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Manifest to operate on (overrides the configured path)
    #[arg(short, long, global = true, value_name = "FILE")]
    manifest: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the manifest name, version and dependencies
    Show,
    /// Increment the patch version and save the manifest
    Bump,
    /// Set the version, normalizing it to major.minor.patch
    SetVersion { version: String },
    /// Create a package.json, filling missing fields from the given defaults
    Init {
        #[arg(long)]
        name: String,
        #[arg(long = "package-version", default_value = "0.1.0")]
        version: String,
        /// Full engine release, reduced to major.minor (e.g. 2018.2.0f2 -> 2018.2)
        #[arg(long)]
        engine_version: Option<String>,
        /// Replace an existing manifest
        #[arg(long)]
        force: bool,
    },
    /// Replace the version key in TEMPLATE with the manifest version
    Render {
        template: String,
        /// Placeholder to replace (defaults to the configured key)
        #[arg(long)]
        key: Option<String>,
    },
    /// Write the version data file
    Export {
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = version_it::logging::init(cli.verbose)?;

    let config_path = cli.config.clone().unwrap_or_else(config::config_path);
    let app_config = AppConfig::load(&config_path)?;
    debug!("Using config {:?}", app_config);

    let manifest_path = cli
        .manifest
        .clone()
        .unwrap_or_else(|| app_config.manifest.path.clone());

    match cli.command {
        Command::Show => show(&manifest_path),
        Command::Bump => {
            let mut document = open(&manifest_path)?;
            document.increment_patch()?;
            println!("{}", document.info().version);
            sync_version_data(&app_config, &document)
        }
        Command::SetVersion { version } => {
            let mut document = open(&manifest_path)?;
            document.set_version(&version);
            document.save()?;
            println!("{}", document.info().version);
            sync_version_data(&app_config, &document)
        }
        Command::Init {
            name,
            version,
            engine_version,
            force,
        } => {
            if manifest_path.exists() && !force {
                anyhow::bail!(
                    "{} already exists, pass --force to replace it",
                    manifest_path.display()
                );
            }
            let defaults = ManifestDefaults {
                identifier: name,
                version,
                engine_version,
            };
            let document = ManifestDocument::create(
                FsStore,
                &manifest_path,
                ManifestInfo::default(),
                &defaults,
            )?;
            println!(
                "Created {} at version {}",
                manifest_path.display(),
                document.info().version
            );
            sync_version_data(&app_config, &document)
        }
        Command::Render { template, key } => {
            let document = open(&manifest_path)?;
            let key = key.unwrap_or_else(|| app_config.text.key.clone());
            println!(
                "{}",
                render_version_text(&template, &key, &document.info().version)?
            );
            Ok(())
        }
        Command::Export { output } => {
            let document = open(&manifest_path)?;
            let output = output.unwrap_or_else(|| app_config.version_data.path.clone());
            export_version_data(&FsStore, &output, document.info())?;
            Ok(())
        }
    }
}

fn open(path: &Path) -> anyhow::Result<ManifestDocument> {
    ManifestDocument::open(path).with_context(|| format!("Failed to load {}", path.display()))
}

fn show(path: &Path) -> anyhow::Result<()> {
    let document = open(path)?;
    let info = document.info();
    let version = document.version();

    println!("name: {}", info.name);
    println!(
        "version: {} [{}, {}, {}]",
        info.version, version.major, version.minor, version.patch
    );
    if let Some(unity) = &info.unity {
        println!("unity: {unity}");
    }
    println!("dependencies:");
    for dependency in &info.dependencies {
        println!("  {dependency}");
    }
    Ok(())
}

fn sync_version_data(app_config: &AppConfig, document: &ManifestDocument) -> anyhow::Result<()> {
    if !app_config.version_data.enabled {
        return Ok(());
    }

    export_version_data(&FsStore, &app_config.version_data.path, document.info())
        .context("Failed to sync version data")
}

use anyhow::Result;
use clap::{Parser, Subcommand};

use snapshotter::cli::{handle_create_command, handle_list_command, CreateArgs};
use snapshotter::config::{paths::SnapshotterPaths, settings::Settings};
use snapshotter::logging::init_logging;
use snapshotter::SnapshotError;

#[derive(Parser)]
#[command(
    name = "snapshotter",
    version,
    about = "Incremental snapshot backups with rsync",
    long_about = "Snapshotter makes incremental, hard-linked snapshot backups of a \
                  directory to a local or SSH-reachable destination. When the \
                  destination runs out of space, the oldest snapshots are removed \
                  one at a time down to a configurable minimum."
)]
struct Cli {
    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take a new snapshot of SRC into DEST
    #[command(alias = "snapshot")]
    Create(CreateArgs),

    /// List the snapshots in DEST, oldest first
    #[command(alias = "ls")]
    List {
        /// Snapshots root (local path or [USER@]HOST:PATH)
        dest: String,
    },

    /// Show current configuration and paths
    Config,
}

fn main() {
    let cli = Cli::parse();

    let dry_run = matches!(&cli.command, Commands::Create(args) if args.dry_run);
    init_logging(cli.verbose || dry_run);

    if let Err(err) = run(cli) {
        eprintln!("snapshotter: {err}");
        let code = err
            .downcast_ref::<SnapshotError>()
            .map_or(1, SnapshotError::exit_code);
        std::process::exit(code);
    }
}

fn run(cli: Cli) -> Result<()> {
    let paths = SnapshotterPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Commands::Create(args) => {
            handle_create_command(&paths, &settings, &args)?;
        }
        Commands::List { dest } => {
            handle_list_command(&settings, &dest)?;
        }
        Commands::Config => {
            println!("Snapshotter Configuration");
            println!("=========================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!(
                "Excludes file:    {}{}",
                paths.excludes_file().display(),
                if paths.existing_excludes_file().is_some() {
                    ""
                } else {
                    " (not present)"
                }
            );
            println!();
            println!("Settings:");
            println!("  Minimum snapshots: {}", settings.min_snapshots);
            println!("  rsync command:     {}", settings.rsync_command);
            println!("  Remote shell:      {}", settings.remote_shell);
            println!("  Compress:          {}", settings.compress);
            println!("  Fuzzy:             {}", settings.fuzzy);
            println!("  Progress:          {}", settings.progress);
            println!("  Exclude patterns:  {:?}", settings.exclude);
            println!(
                "  Out-of-space:      exit code {} with \"{}\"",
                settings.no_space_exit_code, settings.no_space_message
            );
        }
    }

    Ok(())
}

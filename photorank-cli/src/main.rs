mod config;
mod files;
mod interactive;
mod output;

use clap::Parser;
use photorank_core::SessionState;
use std::path::PathBuf;

pub fn bail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {msg}");
    std::process::exit(1);
}

#[derive(Parser)]
#[command(
    name = "photorank",
    version,
    about = "Rank a folder of images by side-by-side comparison"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Run an interactive comparison session over an image folder
    Rate(RateArgs),
    /// Re-export category folders from a saved progress file
    Export(ExportArgs),
    /// Create a default config file at ~/.config/photorank/config.toml
    Init,
}

#[derive(Parser)]
struct RateArgs {
    /// Folder containing the images to rank
    folder: PathBuf,

    /// Session name stored in the progress file (default: folder name)
    #[arg(long)]
    set_name: Option<String>,

    /// Skip the category-folder export when the session ends
    #[arg(long)]
    no_export: bool,

    /// Output the final ranking as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Show progress diagnostics during execution
    #[arg(short, long)]
    verbose: bool,

    /// Path to config file (default: ~/.config/photorank/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser)]
struct ExportArgs {
    /// Folder containing the images and their progress file
    folder: PathBuf,

    /// Output the ranking as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Path to config file (default: ~/.config/photorank/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Effective settings after merging config file defaults.
struct Settings {
    extensions: Vec<String>,
    rejected_dir: String,
    progress_file: String,
    export_prefix: String,
}

fn load_settings(config_arg: &Option<PathBuf>) -> Settings {
    let config_path = config_arg.clone().unwrap_or_else(config::config_path);
    let cfg = config::load_config(&config_path);
    Settings {
        extensions: cfg.extensions.unwrap_or_else(|| {
            config::DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect()
        }),
        rejected_dir: cfg
            .rejected_dir
            .unwrap_or_else(|| config::DEFAULT_REJECTED_DIR.to_string()),
        progress_file: cfg
            .progress_file
            .unwrap_or_else(|| config::DEFAULT_PROGRESS_FILE.to_string()),
        export_prefix: cfg
            .export_prefix
            .unwrap_or_else(|| config::DEFAULT_EXPORT_PREFIX.to_string()),
    }
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Rate(args) => run_rate(args),
        Commands::Export(args) => run_export(args),
        Commands::Init => {
            let path = config::create_default_config();
            println!("Created config at {}", path.display());
            println!("Edit it to set extensions, folder names, etc.");
        }
    }
}

fn run_rate(args: RateArgs) {
    let settings = load_settings(&args.config);

    if !args.folder.is_dir() {
        bail(format!("{} is not a directory", args.folder.display()));
    }

    let set_name = args.set_name.clone().unwrap_or_else(|| {
        args.folder
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "session".to_string())
    });

    let rejected_dir = args.folder.join(&settings.rejected_dir);
    let progress_path = args.folder.join(&settings.progress_file);

    let images = files::scan_images(&args.folder, &settings.extensions)
        .unwrap_or_else(|e| bail(format!("Failed to scan {}: {e}", args.folder.display())));

    let prior = files::load_progress(&progress_path)
        .unwrap_or_else(|e| bail(format!("Failed to load {}: {e}", progress_path.display())));
    let resumed = prior.is_some();

    let mut session = SessionState::start_session(&set_name, images, prior)
        .unwrap_or_else(|e| bail(format!("Cannot start session: {e}")));

    if session.live().len() < 2 {
        bail(format!(
            "Need at least 2 images to rank, found {} in {}",
            session.live().len(),
            args.folder.display(),
        ));
    }

    if args.verbose {
        if resumed {
            eprintln!(
                "Resumed \"{set_name}\": {} images, {} comparisons done",
                session.live().len(),
                session.completed(),
            );
        } else {
            eprintln!("Ranking {} images in \"{set_name}\"", session.live().len());
        }
    }

    let outcome = interactive::run(&mut session, &args.folder, &rejected_dir, args.verbose)
        .unwrap_or_else(|e| bail(format!("Session failed: {e}")));

    files::save_progress(&progress_path, &session.snapshot())
        .unwrap_or_else(|e| bail(format!("Failed to save progress: {e}")));

    if outcome == interactive::Outcome::SaveAndQuit {
        println!("Progress saved to {}", progress_path.display());
        return;
    }

    let categories = session.final_categories();
    if !args.no_export {
        let copied = files::export_categories(&args.folder, &settings.export_prefix, &categories)
            .unwrap_or_else(|e| bail(format!("Export failed: {e}")));
        println!(
            "Image rating completed. {copied} images copied into {}_5..{}_1.",
            settings.export_prefix, settings.export_prefix,
        );
    }

    if args.json {
        output::print_json(
            session.set_name(),
            &session.ratings(),
            &categories,
            session.completed(),
        );
    } else {
        output::print_table(&session.ratings(), &categories, session.completed());
    }
}

fn run_export(args: ExportArgs) {
    let settings = load_settings(&args.config);
    let progress_path = args.folder.join(&settings.progress_file);

    let record = files::load_progress(&progress_path)
        .unwrap_or_else(|e| bail(format!("Failed to load {}: {e}", progress_path.display())))
        .unwrap_or_else(|| bail(format!("No progress file at {}", progress_path.display())));

    let session = SessionState::restore(record)
        .unwrap_or_else(|e| bail(format!("Cannot restore session: {e}")));

    let categories = session.final_categories();
    let copied = files::export_categories(&args.folder, &settings.export_prefix, &categories)
        .unwrap_or_else(|e| bail(format!("Export failed: {e}")));
    println!("{copied} images copied into category folders.");

    if args.json {
        output::print_json(
            session.set_name(),
            &session.ratings(),
            &categories,
            session.completed(),
        );
    } else {
        output::print_table(&session.ratings(), &categories, session.completed());
    }
}

use clap::{Parser, Subcommand};
use pharmcase_assistant::{CaseGenerationResponse, Reply};
use pharmcase_core::constants::DATA_DIR_ENV;
use pharmcase_core::{
    resolve_data_dir, CaseDraft, CaseFilter, CaseId, CaseLibrary, CaseStudy, FileSnapshotStore,
    LibraryConfig, TagDimension, TagFilter,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pharmcase")]
#[command(about = "Pathology case library CLI")]
struct Cli {
    /// Data directory for the case library (falls back to PHARMCASE_DATA_DIR,
    /// then pharmcase_data)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all cases, newest first
    List,
    /// Add a case from a YAML draft file
    Add {
        /// Path to the draft file
        draft: PathBuf,
    },
    /// Add a case from a saved collaborator reply (JSON)
    ImportReply {
        /// Path to the reply file
        reply: PathBuf,
    },
    /// Flip completion for a case id
    Toggle {
        /// Case id (e.g. case3 or case_1700000000000)
        id: String,
    },
    /// Search cases; all given criteria must match
    Search {
        /// Case-insensitive substring over title, presentation and diagnosis
        #[arg(long, default_value = "")]
        text: String,
        /// Organ tag ("All" or omitted means no constraint)
        #[arg(long)]
        organ: Option<String>,
        /// Pathology category tag ("All" or omitted means no constraint)
        #[arg(long = "type")]
        category: Option<String>,
        /// Difficulty tag ("All" or omitted means no constraint)
        #[arg(long)]
        difficulty: Option<String>,
    },
    /// Show the distinct tag values per dimension
    Filters,
    /// Show completion progress
    Progress,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pharmcase_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let data_dir = resolve_data_dir(cli.data_dir, std::env::var(DATA_DIR_ENV).ok());
    let cfg = Arc::new(LibraryConfig::new(data_dir));
    let mut library = CaseLibrary::open(FileSnapshotStore::new(cfg))?;

    match cli.command {
        Some(Commands::List) => {
            if library.is_empty() {
                println!("No cases in the library.");
            } else {
                for case in library.cases() {
                    print_case_line(&library, case);
                }
            }
        }
        Some(Commands::Add { draft }) => {
            let raw = std::fs::read_to_string(&draft)?;
            let draft: CaseDraft = serde_yaml::from_str(&raw)?;
            let id = library.add(draft);
            println!("Added case with id: {}", id);
        }
        Some(Commands::ImportReply { reply }) => {
            let raw = std::fs::read_to_string(&reply)?;
            let response: CaseGenerationResponse = Reply::parse(&raw)?;
            let draft = CaseDraft::try_from(response)?;
            let id = library.add(draft);
            println!("Imported generated case with id: {}", id);
        }
        Some(Commands::Toggle { id }) => {
            let id = CaseId::parse(&id)?;
            let completed = library.toggle_completion(&id);
            if completed {
                println!("{} marked completed", id);
            } else {
                println!("{} marked not completed", id);
            }
        }
        Some(Commands::Search {
            text,
            organ,
            category,
            difficulty,
        }) => {
            let filter = CaseFilter {
                text,
                organ: tag_filter(organ),
                category: tag_filter(category),
                difficulty: tag_filter(difficulty),
            };
            let results = library.search(&filter);
            if results.is_empty() {
                println!("No cases match.");
            } else {
                for case in results {
                    print_case_line(&library, case);
                }
            }
        }
        Some(Commands::Filters) => {
            let options = library.filter_options();
            for dimension in TagDimension::ALL {
                println!(
                    "{}: {}",
                    dimension.as_str(),
                    options.for_dimension(dimension).join(", ")
                );
            }
        }
        Some(Commands::Progress) => {
            let progress = library.progress();
            println!(
                "{} of {} cases completed ({}%)",
                progress.completed,
                progress.total,
                progress.percent()
            );
        }
        None => {
            println!("Use 'pharmcase --help' for commands");
        }
    }

    Ok(())
}

/// "All" mirrors the dropdown sentinel and means no constraint.
fn tag_filter(value: Option<String>) -> TagFilter {
    match value {
        Some(value) if value != "All" => TagFilter::Value(value),
        _ => TagFilter::Any,
    }
}

fn print_case_line(library: &CaseLibrary<FileSnapshotStore>, case: &CaseStudy) {
    let marker = if library.is_completed(case.id()) {
        "x"
    } else {
        " "
    };
    let tags = case.tags();
    println!(
        "[{}] {}  {} ({}, {}, {})",
        marker,
        case.id(),
        case.title(),
        tags.organ,
        tags.category,
        tags.difficulty
    );
}

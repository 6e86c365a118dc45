use anyhow::Result;
use clap::{Parser, Subcommand};
use fragtrace::areas::review_session::ReviewSession;
use fragtrace::artifacts::fragment::position::Position;
use fragtrace::artifacts::revision::repository::Repository;
use fragtrace::artifacts::revision::revision::Revision;
use fragtrace::commands::tour::MergeToursOptions;
use fragtrace::commands::trace::TraceFragmentOptions;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "fragtrace",
    version = "0.1.0",
    about = "Trace code fragments through file history",
    long_about = "Builds the history graph of the files in a repository from a log of \
    revision events and traces fragments, files and review tours to their current versions.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[arg(short, long, global = true, help = "Log graph construction and tracing to stderr")]
    verbose: bool,
    #[arg(long, global = true, help = "Disable colored output")]
    no_color: bool,
    #[arg(
        long,
        global = true,
        default_value = "default",
        help = "The repository the revisions belong to"
    )]
    repository: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "trace-fragment",
        about = "Trace a fragment to its current versions",
        long_about = "This command maps the fragment between two positions of a file at a revision \
        onto every current version of that file."
    )]
    TraceFragment {
        #[arg(long, help = "JSON log of revision events")]
        history: PathBuf,
        #[arg(short, long, help = "The path of the file")]
        path: String,
        #[arg(short, long, help = "The revision the fragment refers to")]
        revision: Revision,
        #[arg(long, help = "Start of the fragment as LINE,COLUMN")]
        from: Position,
        #[arg(long, help = "End of the fragment as LINE,COLUMN")]
        to: Position,
    },
    #[command(
        name = "trace-file",
        about = "Trace a file to its current versions"
    )]
    TraceFile {
        #[arg(long, help = "JSON log of revision events")]
        history: PathBuf,
        #[arg(short, long, help = "The path of the file")]
        path: String,
        #[arg(short, long, help = "The revision of the file")]
        revision: Revision,
    },
    #[command(
        name = "latest",
        about = "List the latest versions of a file",
        long_about = "This command lists the tips of every line of history the file takes part in. \
        Lines of history ending in a deletion have no tip."
    )]
    Latest {
        #[arg(long, help = "JSON log of revision events")]
        history: PathBuf,
        #[arg(short, long, help = "The path of the file")]
        path: String,
        #[arg(short, long, help = "The revision of the file")]
        revision: Revision,
    },
    #[command(
        name = "merge-tours",
        about = "Merge review tours into one",
        long_about = "This command merges a JSON array of tours. With a history log, every stop \
        is moved to the current version of what it points at before merging."
    )]
    MergeTours {
        #[arg(short, long, help = "JSON array of tours")]
        tours: PathBuf,
        #[arg(long, help = "JSON log of revision events")]
        history: Option<PathBuf>,
        #[arg(long, help = "Print the merged tour as JSON")]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let repository = Repository::new(cli.repository.as_str());
    let stdout = Box::new(std::io::stdout());

    match &cli.command {
        Commands::TraceFragment {
            history,
            path,
            revision,
            from,
            to,
        } => {
            let session = ReviewSession::open(Some(history.as_path()), repository, stdout)?;
            session.trace_fragment(&TraceFragmentOptions {
                path: path.clone(),
                revision: revision.clone(),
                from: *from,
                to: *to,
            })?
        }
        Commands::TraceFile {
            history,
            path,
            revision,
        } => {
            let session = ReviewSession::open(Some(history.as_path()), repository, stdout)?;
            session.trace_file(path, revision)?
        }
        Commands::Latest {
            history,
            path,
            revision,
        } => {
            let session = ReviewSession::open(Some(history.as_path()), repository, stdout)?;
            session.latest(path, revision)?
        }
        Commands::MergeTours {
            tours,
            history,
            json,
        } => {
            let session = ReviewSession::open(history.as_deref(), repository, stdout)?;
            session.merge_tours(tours, &MergeToursOptions { json: *json })?
        }
    }

    Ok(())
}

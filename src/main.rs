use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glossdex::markdown::to_markdown;
use glossdex::report::{build_report, print_term_summary, write_report};
use glossdex::{build_index_tree, ingest, link_terms, Config, Corpus, IndexingSession};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "glossdex")]
#[command(about = "Link glossary terms in markdown documents and generate book indexes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file
    #[arg(short, long, global = true, default_value = "glossdex.json")]
    config: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the configured book index and term list pages
    Build {
        /// Parsed corpus (defaults to corpus.json in the base directory)
        corpus: Option<PathBuf>,

        /// Output directory, overriding the config
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// List terms per glossary with their occurrence counts
    Terms {
        corpus: Option<PathBuf>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },
    /// Write a JSON report of term definitions and occurrences
    Report {
        corpus: Option<PathBuf>,

        /// Report file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;
    // fail before any work on a broken page configuration
    config.validate()?;

    match cli.command {
        Commands::Build { corpus, out } => {
            let session = run(&config, corpus.as_deref())?;
            let out_dir = out.unwrap_or_else(|| config.out_dir.clone());
            write_index_files(&session, &config, &out_dir)?;
        }
        Commands::Terms { corpus, no_color } => {
            let session = run(&config, corpus.as_deref())?;
            print_term_summary(&session, !no_color)?;
        }
        Commands::Report { corpus, output } => {
            let session = run(&config, corpus.as_deref())?;
            let report = build_report(&session);
            match output {
                Some(path) => {
                    let file = fs::File::create(&path)
                        .with_context(|| format!("Failed to create {}", path.display()))?;
                    write_report(&report, io::BufWriter::new(file))?;
                    info!(path = %path.display(), "wrote report");
                }
                None => write_report(&report, io::stdout().lock())?,
            }
        }
    }

    Ok(())
}

/// Load the corpus, link terms and build the indexes
fn run(config: &Config, corpus: Option<&Path>) -> Result<IndexingSession> {
    let corpus_path = match corpus {
        Some(path) => path.to_path_buf(),
        None => config.base_dir.join("corpus.json"),
    };
    let corpus = Corpus::load(&corpus_path)?;

    let mut session = IndexingSession::new(config.indexing.clone())?;
    ingest(&mut session, corpus)?;
    let found = link_terms(&mut session);
    session.build_indexes();

    info!(
        documents = session.documents().len(),
        terms = session.store().term_count(),
        occurrences = found,
        "indexed corpus"
    );
    Ok(session)
}

fn write_index_files(session: &IndexingSession, config: &Config, out_dir: &Path) -> Result<()> {
    // every page is built before the first one is written
    let pages = config
        .generate_files
        .index_files
        .iter()
        .map(|conf| -> Result<_> { Ok((conf, build_index_tree(session, conf)?)) })
        .collect::<Result<Vec<_>>>()?;

    for (conf, tree) in pages {
        let path = out_dir.join(conf.validate()?);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&path, to_markdown(&tree))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), title = %conf.title, "wrote index file");
    }
    Ok(())
}

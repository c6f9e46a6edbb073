//! `quokka-alias` — Include tsconfig path aliases used by a file in `.quokka`.
//!
//! Follows the file's imports (relative and aliased, transitively), keeps the
//! aliases that resolve to a file on disk, and merges them into the `alias`
//! field read by `alias-quokka-plugin`.

mod alias;
mod error;
mod extract;
mod follow;
mod fs;
mod logging;
mod output;
mod prompt;
mod resolve;
mod util;

use std::io::BufRead;
use std::path::{Path, PathBuf};

use clap::Parser;

use alias::AliasTable;
use error::AliasError;
use extract::{PatternExtractor, SpecifierExtractor, SyntaxExtractor};
use follow::Traversal;
use output::QuokkaDocument;

#[derive(Parser, Debug)]
#[command(name = "quokka-alias", version)]
#[command(about = "Include aliases from a file's imports in the Quokka config", long_about = None)]
struct Cli {
    /// Source file whose imports are followed
    file: PathBuf,

    /// Alias-output document (default: .quokka next to tsconfig.json)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Create the output document without asking
    #[arg(short, long)]
    yes: bool,

    /// Extract imports with the TypeScript syntax tree instead of the text pattern
    #[arg(long)]
    syntax: bool,

    /// Stop after visiting N files
    #[arg(long, value_name = "N")]
    max_files: Option<usize>,

    /// Print the merged document instead of writing it
    #[arg(long)]
    dry_run: bool,

    /// Log every visited file and resolution
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    let stdin = std::io::stdin();
    if let Err(e) = run(&cli, &mut stdin.lock()) {
        eprintln!("quokka-alias: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli, input: &mut dyn BufRead) -> Result<(), AliasError> {
    let entry = std::fs::canonicalize(&cli.file).map_err(|e| AliasError::io(&cli.file, e))?;
    if !entry.is_file() {
        return Err(AliasError::NotAFile(cli.file.display().to_string()));
    }

    let tsconfig = resolve::find_tsconfig(&entry)?;
    let project = resolve::load_project_config(&tsconfig)?;
    let table = AliasTable::build(
        project
            .mappings
            .iter()
            .map(|(pattern, candidates)| (pattern.as_str(), candidates.iter())),
    );
    if table.is_empty() {
        tracing::warn!("{}: paths has no usable entries", project.tsconfig_path.display());
    }
    tracing::debug!(rules = table.rules().len(), root = %project.base_dir.display(), "alias table");

    let output_path = match &cli.output {
        Some(path) => absolute(path)?,
        None => output::default_location(&tsconfig),
    };
    let mut document = open_document(&output_path, cli, input)?;
    tracing::debug!(
        path = %output_path.display(),
        plugins = ?document.plugins(),
        aliases = document.aliases().count(),
        "output document"
    );

    let extractor: &dyn SpecifierExtractor = if cli.syntax {
        &SyntaxExtractor
    } else {
        &PatternExtractor
    };
    let outcome = Traversal {
        table: &table,
        root: &project.base_dir,
        fs: &fs::DiskFs,
        extractor,
        max_files: cli.max_files,
    }
    .run(&entry)?;

    for specifier in &outcome.unresolved {
        tracing::info!("{specifier}: no matching file, skipped");
    }

    let found = outcome.aliases.len();
    let document_dir = output_path.parent().unwrap_or(Path::new("."));
    let aliases = output::rebase(outcome.aliases, document_dir, &project.base_dir);
    document.merge_aliases(&aliases);

    if cli.dry_run {
        print!("{}", document.render()?);
        return Ok(());
    }
    document.persist(&output_path)?;
    println!(
        "{}: {found} alias(es) from {} file(s){}",
        output_path.display(),
        outcome.visited,
        if outcome.truncated { " (file limit reached)" } else { "" }
    );
    Ok(())
}

/// Load the output document, offering to create it when missing.
fn open_document(
    path: &Path,
    cli: &Cli,
    input: &mut dyn BufRead,
) -> Result<QuokkaDocument, AliasError> {
    if path.is_file() {
        return QuokkaDocument::load(path);
    }
    if !cli.yes && !prompt::confirm_create(path, input)? {
        return Err(AliasError::CreateDeclined(path.display().to_string()));
    }

    let skeleton = QuokkaDocument::skeleton();
    if !cli.dry_run {
        skeleton.persist(path)?;
        println!("created {}", path.display());
    }
    Ok(skeleton)
}

fn absolute(path: &Path) -> Result<PathBuf, AliasError> {
    std::path::absolute(path)
        .map(|p| util::normalize(&p))
        .map_err(|e| AliasError::io(path, e))
}

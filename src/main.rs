use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::Parser;
use doc_similarity::{
    DocumentComparer, RawDocument, SimilarityError, SimilarityResult, TfScheme, Utf8Policy,
    VectorizerConfig,
};

/// Compare two documents (.txt, .docx, .pdf) and report how similar they are.
#[derive(Parser, Debug)]
#[command(name = "doc-similarity", version, about)]
struct Cli {
    /// first document
    file1: PathBuf,
    /// second document
    file2: PathBuf,
    /// JSON file with a VectorizerConfig
    #[arg(long)]
    config: Option<PathBuf>,
    /// term to ignore (repeatable)
    #[arg(long = "stop-word")]
    stop_words: Vec<String>,
    /// shortest term kept, in characters
    #[arg(long)]
    min_term_len: Option<usize>,
    /// use 1 + ln(count) as term frequency
    #[arg(long)]
    sublinear_tf: bool,
    /// replace invalid UTF-8 instead of rejecting the file
    #[arg(long)]
    lossy: bool,
    /// print the result as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn vectorizer_config(&self) -> Result<VectorizerConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("cannot read config '{}'", path.display()))?;
                serde_json::from_str(&raw)
                    .with_context(|| format!("invalid config '{}'", path.display()))?
            }
            None => VectorizerConfig::default(),
        };
        if !self.stop_words.is_empty() {
            config.stop_words.extend(self.stop_words.iter().cloned());
        }
        if let Some(len) = self.min_term_len {
            config.min_term_len = len;
        }
        if self.sublinear_tf {
            config.tf_scheme = TfScheme::Sublinear;
        }
        if self.lossy {
            config.utf8 = Utf8Policy::Lossy;
        }
        Ok(config)
    }
}

fn load(path: &Path) -> Result<Vec<u8>> {
    let bytes = fs::read(path)
        .with_context(|| format!("file '{}' does not exist or cannot be read", path.display()))?;
    tracing::info!(file = %path.display(), bytes = bytes.len(), "read document");
    Ok(bytes)
}

fn compare(
    comparer: &DocumentComparer,
    (path_a, bytes_a): (&Path, Vec<u8>),
    (path_b, bytes_b): (&Path, Vec<u8>),
) -> Result<SimilarityResult, SimilarityError> {
    let doc_a = RawDocument::from_filename(path_a, bytes_a)?;
    let doc_b = RawDocument::from_filename(path_b, bytes_b)?;
    comparer.compare_documents(&doc_a, &doc_b)
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("doc_similarity=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.vectorizer_config()?;
    tracing::debug!(?config, "using vectorizer config");
    let comparer: DocumentComparer = DocumentComparer::new(config);

    tracing::info!("starting similarity computation");
    let bytes_a = load(&cli.file1)?;
    let bytes_b = load(&cli.file2)?;
    let outcome = compare(&comparer, (cli.file1.as_path(), bytes_a), (cli.file2.as_path(), bytes_b));

    match outcome {
        Ok(result) => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{result}");
                let terms = result.sorted_shared_terms();
                if terms.is_empty() {
                    println!("No common words found.");
                } else {
                    println!("Common words: {}", terms.join(", "));
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            tracing::error!(error = %e, "similarity calculation failed");
            eprintln!("{}", e.user_message());
            Ok(ExitCode::FAILURE)
        }
    }
}

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use quiz_editor::codec::{self, BatchDecode};
use quiz_editor::config::{self, EditorConfig};
use quiz_editor::{Editor, QuizError, data, logging};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file layered over the built-in defaults
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the markdown / form / JSON editor on a quiz file
    Edit {
        /// Quiz JSON file; created on first save if it does not exist
        file: Option<PathBuf>,
    },
    /// Convert a markdown file of questions into quiz JSON
    Decode {
        /// Markdown file to read
        markdown: PathBuf,
        /// Quiz name (defaults to the configured name)
        #[arg(long)]
        name: Option<String>,
        /// Quiz duration in minutes (defaults to the configured duration)
        #[arg(long)]
        duration: Option<u32>,
        /// Write JSON here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Render a quiz JSON file as markdown
    Encode {
        /// Quiz JSON file to read
        json: PathBuf,
        /// Write markdown here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Report every question in a markdown file that fails to decode
    Check {
        /// Markdown file to check
        markdown: PathBuf,
    },
}

fn main() {
    let args = Args::parse();

    match run(args) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

/// Returns false when the command ran but found problems.
fn run(args: Args) -> Result<bool, QuizError> {
    let mut loader = config::loader(args.config.as_deref());
    if let Command::Decode { name, duration, .. } = &args.command {
        if let Some(name) = name {
            loader = loader.set_override("quiz.name", name.as_str())?;
        }
        if let Some(duration) = duration {
            loader = loader.set_override("quiz.duration", i64::from(*duration))?;
        }
    }
    let config = loader.build()?;

    match args.command {
        Command::Edit { file } => {
            logging::init_editor(&config.logging)?;
            Editor::open(file, &config.quiz)?.run()?;
            Ok(true)
        }
        Command::Decode { markdown, output, .. } => {
            logging::init_stderr(&config.logging);
            decode_file(&config, &markdown, output.as_deref())
        }
        Command::Encode { json, output } => {
            logging::init_stderr(&config.logging);
            let document = data::load_quiz(&json)?;
            let mut markdown = codec::encode_batch(&document.questions);
            markdown.push('\n');
            write_output(output.as_deref(), &markdown)?;
            Ok(true)
        }
        Command::Check { markdown } => {
            logging::init_stderr(&config.logging);
            let batch = codec::decode_batch(&data::read_text(&markdown)?);
            report_failures(&markdown, &batch);
            println!(
                "{}: {} question(s) ok, {} failed",
                markdown.display(),
                batch.questions.len(),
                batch.failures.len()
            );
            Ok(batch.is_clean())
        }
    }
}

fn decode_file(
    config: &EditorConfig,
    markdown: &Path,
    output: Option<&Path>,
) -> Result<bool, QuizError> {
    let batch = codec::decode_batch(&data::read_text(markdown)?);
    report_failures(markdown, &batch);

    let mut document = config.quiz.new_document();
    document.questions = batch.questions;
    info!(questions = document.len(), "decoded {}", markdown.display());

    match output {
        Some(path) => data::save_quiz(path, &document)?,
        None => {
            let mut json = document.to_json_pretty().map_err(data::LoadError::from)?;
            json.push('\n');
            write_output(None, &json)?;
        }
    }
    Ok(batch.failures.is_empty())
}

fn report_failures(markdown: &Path, batch: &BatchDecode) {
    for failure in &batch.failures {
        warn!(section = failure.section + 1, "skipped section");
        eprintln!(
            "{}: section {}: {}",
            markdown.display(),
            failure.section + 1,
            failure.failure.reason
        );
    }
}

fn write_output(output: Option<&Path>, contents: &str) -> Result<(), QuizError> {
    match output {
        Some(path) => data::write_text(path, contents)?,
        None => print!("{}", contents),
    }
    Ok(())
}

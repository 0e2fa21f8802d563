//! oxide-ddl-diff CLI
//!
//! Computes the DDL statements that migrate one MySQL schema to another.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use oxide_ddl_diff::{
    diff_inputs, load_snapshot, InputFormat, OutputFormat, ScriptHeader, ScriptWriter,
};

/// Diff two MySQL schemas into a migration script.
#[derive(Parser)]
#[command(name = "oxide-ddl-diff")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the statements turning OLD into NEW.
    Diff {
        /// Current schema (`.sql`, `.json`, or `-` for stdin).
        old: PathBuf,

        /// Target schema (`.sql`, `.json`, or `-` for stdin).
        new: PathBuf,

        /// Input format, overriding the file extension.
        #[arg(long, value_enum)]
        input_format: Option<InputFormat>,

        /// Write the script to a file instead of stdout.
        #[arg(short, long, env = "OXIDE_DDL_DIFF_OUTPUT")]
        output: Option<PathBuf>,

        /// Output format.
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Sql)]
        format: OutputFormat,

        /// Leave out the header comment.
        #[arg(long)]
        no_header: bool,

        /// Show the script without writing the output file (dry run).
        #[arg(long)]
        dry_run: bool,
    },

    /// Parse a schema and print its snapshot as JSON.
    Inspect {
        /// Schema file (`.sql`, `.json`, or `-` for stdin).
        file: PathBuf,

        /// Input format, overriding the file extension.
        #[arg(long, value_enum)]
        input_format: Option<InputFormat>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout only carries the script.
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Diff {
            old,
            new,
            input_format,
            output,
            format,
            no_header,
            dry_run,
        } => {
            let statements = diff_inputs(&old, &new, input_format)?;

            let mut writer = ScriptWriter::new();
            if !no_header {
                writer = writer.with_header(ScriptHeader::now(
                    old.display().to_string(),
                    new.display().to_string(),
                ));
            }
            let content = writer.render(&statements, format)?;

            match output {
                Some(path) if !dry_run => ScriptWriter::write_to_file(&path, &content)?,
                Some(path) => {
                    info!(
                        "Dry run - {} statements would be written to {}",
                        statements.len(),
                        path.display()
                    );
                    print!("{content}");
                }
                None => print!("{content}"),
            }
        }

        Commands::Inspect { file, input_format } => {
            let snapshot = load_snapshot(&file, input_format)?;
            info!("{} tables and views in {}", snapshot.len(), file.display());
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
    }

    Ok(())
}

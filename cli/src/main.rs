use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use easy_converter::{convert_tables, decode_to_json, scheme_to_json, ConvertOptions, Table};
use easy_converter_compiler::error::ConvertError;

mod ingest;

#[derive(Parser)]
#[command(name = "easyc")]
#[command(about = "Convert typed spreadsheet tables into schemes and wire data", long_about = None)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert every table in an ingestion file
    Convert {
        /// Ingestion `.json` file
        #[arg(short, long)]
        source: PathBuf,

        /// Directory for the `<Table>.json` schemes
        #[arg(short, long, default_value = "./out")]
        out: PathBuf,

        /// Directory for the `<Table>.txt` packed rows
        #[arg(long, default_value = "./out/data")]
        outdata: PathBuf,
    },

    /// Print the resolved schemes as JSON
    Scheme {
        #[arg(short, long)]
        source: PathBuf,
    },

    /// Decode a packed data file with one table's scheme (printed to stdout)
    Decode {
        #[arg(short, long)]
        source: PathBuf,

        /// Table name as converted, e.g. `Items`
        #[arg(short, long)]
        table: String,

        /// Packed `.txt` data file
        #[arg(short, long)]
        data: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .init();
}

fn convert(source: &Path) -> Result<Vec<Table>, ConvertError> {
    let raw = ingest::load_tables(source)?;
    convert_tables(raw, &ConvertOptions::default())
}

fn main() -> Result<(), ConvertError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Convert { source, out, outdata } => {
            let tables = convert(source)?;
            fs::create_dir_all(out)?;
            fs::create_dir_all(outdata)?;
            for table in &tables {
                let scheme_path = out.join(format!("{}.json", table.name()));
                fs::write(&scheme_path, scheme_to_json(&table.scheme)?)?;
                let data_path = outdata.join(format!("{}.txt", table.name()));
                fs::write(&data_path, table.pack())?;
                info!(table = table.name(), scheme = %scheme_path.display(), data = %data_path.display(), "wrote table");
            }
            println!("Converted {} tables from {}", tables.len(), source.display());
            Ok(())
        }

        Commands::Scheme { source } => {
            let tables = convert(source)?;
            let schemes: Vec<_> = tables.iter().map(|t| &t.scheme).collect();
            println!("{}", serde_json::to_string_pretty(&schemes)?);
            Ok(())
        }

        Commands::Decode { source, table, data } => {
            let tables = convert(source)?;
            let Some(found) = tables.iter().find(|t| t.name() == table.as_str()) else {
                return Err(ConvertError::Decode(format!("No table named {}", table)));
            };
            let packed = fs::read_to_string(data)?;
            println!("{}", decode_to_json(&found.scheme, packed.trim_end_matches('\n'))?);
            Ok(())
        }
    }
}

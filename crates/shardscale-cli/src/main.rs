use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "shardscale",
    about = "shardscale — autoscaling configuration for sharded streams",
    version,
    propagate_version = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a configuration file and validate every stream entry.
    ///
    /// `.toml` files are read as TOML; anything else as a JSON array.
    Validate {
        /// Path to the configuration file
        #[arg(short, long, default_value = "shardscale.toml")]
        path: String,
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Write a shardscale.toml scaffold for one stream
    Init {
        /// Directory to write into
        #[arg(short, long, default_value = ".")]
        path: String,
        /// Stream name to put in the scaffold
        #[arg(short, long, default_value = "my-stream")]
        stream: String,
        /// Overwrite an existing shardscale.toml
        #[arg(long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("shardscale=info".parse()?)
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { path, format } => commands::validate::validate(&path, &format),
        Commands::Init { path, stream, force } => commands::init::init(&path, &stream, force),
    }
}

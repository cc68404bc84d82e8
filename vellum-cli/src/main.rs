use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use vellum_cli::{RenderOptions, init_tracing, render_cmd, write_output};

#[derive(Parser)]
#[command(name = "vellum", version, about = "Vellum template renderer")]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a single-file component to markup.
    Render {
        /// Path to the root component file
        component: PathBuf,
        /// JSON object merged over the component's data
        #[arg(long)]
        data: Option<PathBuf>,
        /// Component file usable as a tag by its file stem (repeatable)
        #[arg(long = "component", value_name = "FILE")]
        components: Vec<PathBuf>,
        /// Output file (default: stdout)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Directive marker
        #[arg(long)]
        prefix: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Commands::Render {
            component,
            data,
            components,
            out,
            prefix,
        } => {
            let markup = render_cmd(&RenderOptions {
                component,
                data,
                components,
                prefix,
            })?;
            write_output(&markup, out.as_deref())?;
        }
    }
    Ok(())
}

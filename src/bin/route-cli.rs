use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use shell_router::config::loader::load_route_table;
use shell_router::embed::host::{EmbedHost, HostError};
use shell_router::embed::session::EmbedSession;
use shell_router::routing::table::{RenderMode, RouteId, RouteTable};
use shell_router::ShellRouter;

#[derive(Parser)]
#[command(name = "route-cli")]
#[command(about = "Inspection CLI for shell-router route tables", long_about = None)]
struct Cli {
    /// Route table declaration file (TOML, or JSON by extension).
    #[arg(short, long, default_value = "routes.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the route table and report every defect
    Validate,
    /// Resolve a navigation and print the render plan as JSON
    Resolve {
        /// Request path, e.g. /index/f3
        path: Option<String>,

        /// Resolve by route name instead of by path
        #[arg(long)]
        name: Option<String>,
    },
    /// Print the compiled route tree
    Tree,
}

/// Container stand-in: announces what a real host would instantiate.
#[derive(Debug)]
struct PreviewHost;

impl EmbedHost for PreviewHost {
    fn instantiate(&self, session: &EmbedSession) -> Result<(), HostError> {
        tracing::info!(
            session = %session.id(),
            source = %session.source(),
            "Would instantiate embed"
        );
        Ok(())
    }

    fn sync_path(&self, _session: &EmbedSession, _path: &str) {}

    fn teardown(&self, _session: &EmbedSession) {}
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shell_router=info,route_cli=info".into()),
        )
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let table = load_route_table(&cli.config)?;

    match cli.command {
        Commands::Validate => {
            println!("OK: {} routes", table.len());
        }
        Commands::Resolve { path, name } => {
            let path = path.unwrap_or_default();
            if path.is_empty() && name.is_none() {
                return Err("resolve needs a path or --name".into());
            }
            let mut router = ShellRouter::new(table, Box::new(PreviewHost));
            let plan = router.resolve(&path, name.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&plan)?);
        }
        Commands::Tree => {
            for root in table.roots() {
                print_route(&table, *root, 0);
            }
        }
    }

    Ok(())
}

fn print_route(table: &RouteTable, id: RouteId, depth: usize) {
    let route = table.route(id);
    let mode = match &route.render_mode {
        RenderMode::Native(fragment) => format!("native {}", fragment),
        RenderMode::Embedded(source) => format!("embedded {}", source),
    };
    let name = route
        .name
        .as_deref()
        .map(|n| format!(" ({})", n))
        .unwrap_or_default();
    println!(
        "{}/{}{}  [{}]",
        "  ".repeat(depth),
        route.pattern,
        name,
        mode
    );
    for child in &route.children {
        print_route(table, *child, depth + 1);
    }
}

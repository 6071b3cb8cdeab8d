use anyhow::Result;
use clap::{Arg, ArgAction, Command};

mod cmd;
mod config;

fn make_command() -> Command {
    cmd::build::add_build_args(Command::new("stencil"))
        .about("Resolve HTML templates, projects and blogposts into a static site")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Increase log verbosity (-v, -vv, -vvv)")
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(cmd::build::make_subcommand())
}

/// Log level from `-v` count; `RUST_LOG` still takes extra directives.
fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}

fn main() -> Result<()> {
    let matches = make_command().get_matches();
    init_tracing(matches.get_count("verbose"));

    // Running without a subcommand builds with the defaults
    match matches.subcommand() {
        Some(("build", args)) => cmd::build::execute(args),
        _ => cmd::build::execute(&matches),
    }
}

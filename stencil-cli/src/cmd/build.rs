use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use std::path::Path;
use stencil_core::build_site;
use tracing::info;

use crate::config::load_build_config;

pub fn add_build_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("root")
                .short('r')
                .long("root")
                .value_name("DIR")
                .help("Site folder containing templates, partials, assets and blogposts")
                .default_value("./site"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("DIR")
                .help("Output directory, deleted and recreated on every build")
                .default_value("./build"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file")
                .default_value("./stencil.toml"),
        )
}

pub fn make_subcommand() -> Command {
    add_build_args(Command::new("build")).about("Build the site from its templates")
}

pub fn execute(args: &ArgMatches) -> Result<()> {
    // Load cascading configuration
    let stencil_config = load_build_config(args)?;
    let build_config = stencil_config.build_config();

    let root = Path::new(&build_config.root);
    let output = Path::new(&build_config.output);
    info!(root = %root.display(), output = %output.display(), "building site");

    let report = build_site(stencil_config.site_config(), root, output)
        .with_context(|| format!("failed to build {}", root.display()))?;

    println!(
        "Site built successfully in {} ({} pages, {} posts, {} assets)",
        output.display(),
        report.pages.len(),
        report.posts.len(),
        report.assets
    );

    Ok(())
}

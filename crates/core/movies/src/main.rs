#![forbid(unsafe_code)]
#![deny(clippy::mem_forget)]

use anyhow::Context;
use clap::Parser;
use movies::command::BuildCommand;
use movies::command::BuildContext;
use movies::Opt;
use movies_config::MoviesConfigLocation;

fn main() -> anyhow::Result<()> {
    let opt = Opt::parse();
    movies_utils::logging::initialise_tracing_subscriber(opt.debug);

    let build_context = BuildContext {
        config_location: MoviesConfigLocation::from_custom_root(&opt.config_dir),
    };

    let cmd = opt
        .movies
        .build_command(build_context)
        .with_context(|| "invalid configuration")?;

    cmd.execute()
        .with_context(|| format!("failed to {}", cmd.description()))
}

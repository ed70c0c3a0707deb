use crate::command::BuildCommand;
use crate::command::BuildContext;
use crate::command::Command;
use movies_config::DEFAULT_MOVIES_CONFIG_PATH;
use std::path::PathBuf;

mod download;

pub use download::DownloadCommand;
pub use download::DownloadOpt;

#[derive(clap::Parser, Debug)]
#[clap(
    name = clap::crate_name!(),
    version = clap::crate_version!(),
    about = clap::crate_description!(),
    arg_required_else_help(true)
)]
pub struct Opt {
    /// Directory holding movies.toml
    ///
    /// Files are downloaded into its `interfaces` sub-directory unless configured otherwise.
    #[clap(long = "config-dir", default_value = DEFAULT_MOVIES_CONFIG_PATH, global = true)]
    pub config_dir: PathBuf,

    /// Turn-on the debug log level.
    #[clap(long, global = true)]
    pub debug: bool,

    #[clap(subcommand)]
    pub movies: MoviesOpt,
}

#[derive(clap::Subcommand, Debug)]
pub enum MoviesOpt {
    /// Download the movies interface files from a mirror
    Download(DownloadOpt),
}

impl BuildCommand for MoviesOpt {
    fn build_command(self, context: BuildContext) -> Result<Box<dyn Command>, crate::ConfigError> {
        match self {
            MoviesOpt::Download(opt) => opt.build_command(context),
        }
    }
}

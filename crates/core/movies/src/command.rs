use movies_config::MoviesConfigLocation;

/// A trait to be implemented by all movies sub-commands.
///
/// A command is built from the command line and the configuration files
/// by a [`BuildCommand`], and then executed.
///
/// ```
/// use movies::command::Command;
///
/// struct ListCmd {
///     resources: Vec<String>,
/// }
///
/// impl Command for ListCmd {
///     fn description(&self) -> String {
///         format!("list the resources {:?}", self.resources)
///     }
///
///     fn execute(&self) -> anyhow::Result<()> {
///         for resource in &self.resources {
///             println!("{resource}");
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Command {
    /// Display that command to the user, telling what will be done.
    ///
    /// This description is displayed to the end user in case of an error, to give the context of that error.
    fn description(&self) -> String;

    /// Execute this command.
    ///
    /// Any error type deriving `thiserror::Error` converts into `anyhow::Error`,
    /// so command specific errors can be returned with `?`.
    fn execute(&self) -> anyhow::Result<()>;

    fn into_boxed(self) -> Box<dyn Command>
    where
        Self: Sized + 'static,
    {
        Box::new(self)
    }
}

/// Build a command from the parsed command line.
pub trait BuildCommand {
    fn build_command(self, context: BuildContext) -> Result<Box<dyn Command>, crate::ConfigError>;
}

/// The context for `BuildCommand`
#[derive(Debug)]
pub struct BuildContext {
    pub config_location: MoviesConfigLocation,
}

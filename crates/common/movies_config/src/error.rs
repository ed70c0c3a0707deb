#[derive(thiserror::Error, Debug)]
pub enum MoviesConfigError {
    #[error(transparent)]
    Figment(#[from] figment::Error),
}

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Atmos(#[from] ps_atmos::AtmosError),

    #[error(transparent)]
    Config(#[from] ps_config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

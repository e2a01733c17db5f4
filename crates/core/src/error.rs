#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),
    #[error("missing required form option: {0}")]
    MissingOption(&'static str),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid form configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to read form configuration: {0}")]
    ConfigRead(std::io::Error),
    #[error("configurator rejected field '{field}': {message}")]
    Configurator { field: String, message: String },
    #[error("unknown form type: {0}")]
    UnknownFormType(String),
}

pub type FormResult<T> = std::result::Result<T, FormError>;

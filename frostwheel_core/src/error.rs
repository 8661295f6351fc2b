#[derive(thiserror::Error, Debug)]
pub enum WheelError {
    #[error("prize catalog is empty")]
    EmptyCatalog,
    #[error("duplicate prize id: {0}")]
    DuplicatePrizeId(String),
    #[error("invalid wheel config: {0}")]
    InvalidConfig(String),
    #[error("failed to parse wheel file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to read wheel file: {0}")]
    Io(#[from] std::io::Error),
}

pub type WheelResult<T> = Result<T, WheelError>;

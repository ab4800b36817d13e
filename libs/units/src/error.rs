use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("unknown unit '{0}'")]
    UnknownUnit(String),

    #[error("no conversion from '{from}' to '{to}'")]
    NoConversion { from: String, to: String },

    #[error("incompatible unit categories: '{from}' vs '{to}'")]
    Incompatible { from: String, to: String },
}

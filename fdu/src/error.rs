use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    FileError(filedirect::error::Error),
    NotFound(String),
    OperationFailed(String),
    CliInputError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::FileError(err) => write!(f, "Filesystem error: {}", err),
            Error::NotFound(msg) => write!(f, "Not found: {}", msg),
            Error::OperationFailed(msg) => write!(f, "Operation failed: {}", msg),
            Error::CliInputError(msg) => write!(f, "CLI input error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::FileError(err) => Some(err),
            _ => None,
        }
    }
}

impl std::convert::From<filedirect::error::Error> for Error {
    fn from(error: filedirect::error::Error) -> Error {
        Error::FileError(error)
    }
}

impl std::convert::From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Error {
        Error::OperationFailed(error.to_string())
    }
}

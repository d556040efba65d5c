pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    CacheRootUnwritable(String),
    SessionDirectoryInvalid(String),
    SessionDirectoryCreate(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Error::CacheRootUnwritable(ref path) => {
                write!(f, "Cache root is not writable: {path}")
            }
            Error::SessionDirectoryInvalid(ref path) => {
                write!(f, "Session path exists but is not a directory: {path}")
            }
            Error::SessionDirectoryCreate(ref path) => {
                write!(f, "Could not create session directory: {path}")
            }
        }
    }
}

impl std::error::Error for Error {}

use std::error;
use std::fmt;
use std::io;

pub type Report<T> = Result<T, Error>;

#[derive(Debug)]
pub struct Error {
    err: Option<io::Error>,
    message: String,
}

impl Error {
    pub fn new<U, M>(err: U, message: M) -> Self
    where
        U: Into<io::Error>,
        M: Into<String>,
    {
        Self {
            err: Some(err.into()),
            message: message.into(),
        }
    }

    pub fn message<M>(message: M) -> Self
    where
        M: Into<String>,
    {
        Self {
            err: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(err) = &self.err {
            write!(f, ": {err}")?;
        }

        Ok(())
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        self.err.as_ref().map(|err| err as &(dyn error::Error + 'static))
    }
}

pub trait ErrorExt<T, E> {
    fn message(self, message: &str) -> Result<T, Error>
    where
        E: Into<io::Error>;

    fn with_message<F, M>(self, f: F) -> Result<T, Error>
    where
        E: Into<io::Error>,
        F: FnOnce() -> M,
        M: Into<String>;
}

impl<T, E> ErrorExt<T, E> for Result<T, E> {
    fn message(self, message: &str) -> Result<T, Error>
    where
        E: Into<io::Error>,
    {
        self.map_err(|err| Error::new(err, message))
    }

    fn with_message<F, M>(self, f: F) -> Result<T, Error>
    where
        E: Into<io::Error>,
        F: FnOnce() -> M,
        M: Into<String>,
    {
        self.map_err(|err| Error::new(err, f()))
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn display_with_source() {
        let res: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let err = res.message("failed to read config file").unwrap_err();

        assert_eq!(err.to_string(), "failed to read config file: gone");
        assert!(err.source().is_some());

        let err = Error::message("no element named `x-y`");

        assert_eq!(err.to_string(), "no element named `x-y`");
        assert!(err.source().is_none());
    }
}

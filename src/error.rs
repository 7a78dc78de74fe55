use log::error;
use serde_json::Error as JsonError;
use std::{
    error::Error,
    fmt::{Display, Formatter, Result as FmtResult},
    fs,
    io::Error as IoError,
    path::Path,
};

#[derive(Debug)]
pub enum AugmentError {
    Io(IoError),
    Json(JsonError),
    AnyHow(anyhow::Error),
    Common(String),
}

impl Error for AugmentError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::AnyHow(e) => Some(&**e),
            Self::Common(_) => None,
        }
    }
}

impl Display for AugmentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "AugmentError: ")?;
        match self {
            Self::Io(e) => Display::fmt(e, f),
            Self::Json(e) => Display::fmt(e, f),
            Self::AnyHow(e) => Display::fmt(e, f),
            Self::Common(e) => Display::fmt(e, f),
        }
    }
}

impl From<IoError> for AugmentError {
    fn from(value: IoError) -> Self {
        Self::Io(value)
    }
}

impl From<JsonError> for AugmentError {
    fn from(value: JsonError) -> Self {
        Self::Json(value)
    }
}

impl From<anyhow::Error> for AugmentError {
    fn from(value: anyhow::Error) -> Self {
        Self::AnyHow(value)
    }
}

impl From<String> for AugmentError {
    fn from(value: String) -> Self {
        Self::Common(value)
    }
}

impl From<&str> for AugmentError {
    fn from(value: &str) -> Self {
        Self::Common(value.into())
    }
}

impl AugmentError {
    /// Debug dump of the error followed by every cause in its chain.
    pub fn report(&self) -> String {
        let mut report = format!("{:?}\n", self);
        let mut source = self.source();
        while let Some(cause) = source {
            report.push_str(&format!("caused by: {}\n", cause));
            source = cause.source();
        }
        report
    }

    /// Writes [`report`](Self::report) to `path`. A failure to write is only
    /// logged, the original error is what matters.
    pub fn write_report<P: AsRef<Path>>(&self, path: P) {
        if let Err(io) = fs::write(&path, self.report()) {
            error!(
                "Failed to write error log {}: {}",
                path.as_ref().display(),
                io
            );
        }
    }
}

use std::{fmt, path::PathBuf, str::FromStr};

use crate::error::{GridError, GridResult};

const URL_SCHEMES: [&str; 2] = ["http://", "https://"];

/// Where an animated image comes from: a local file or an `http(s)://` URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceRef {
    Path(PathBuf),
    Url(String),
}

impl SourceRef {
    pub fn parse(s: &str) -> GridResult<Self> {
        if s.is_empty() {
            return Err(GridError::validation("source reference must not be empty"));
        }
        if URL_SCHEMES.iter().any(|scheme| s.starts_with(scheme)) {
            Ok(Self::Url(s.to_owned()))
        } else {
            Ok(Self::Path(PathBuf::from(s)))
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Url(_))
    }
}

impl FromStr for SourceRef {
    type Err = GridError;

    fn from_str(s: &str) -> GridResult<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for SourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(p) => write!(f, "{}", p.display()),
            Self::Url(u) => f.write_str(u),
        }
    }
}

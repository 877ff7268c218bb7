//! Source URI modeling and base-name extraction.

use std::fmt;

/// A parsed source locator (http, https, file, or anything the transport accepts).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    url: url::Url,
}

impl Source {
    pub fn parse(text: &str) -> Result<Self, url::ParseError> {
        let url = url::Url::parse(text.trim())?;
        Ok(Self { url })
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    pub fn url(&self) -> &url::Url {
        &self.url
    }

    /// Last path segment of the URI, used when the destination is a directory.
    ///
    /// Returns `None` if the path is empty/root or ends in `.`/`..`.
    /// Query and fragment are not part of the name.
    pub fn file_name(&self) -> Option<&str> {
        let segment = self.url.path().split('/').filter(|s| !s.is_empty()).last()?;
        if segment == "." || segment == ".." {
            return None;
        }
        Some(segment)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

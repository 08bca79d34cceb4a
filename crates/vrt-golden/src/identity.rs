//! Screenshot identity keys
//!
//! Provides [`ScreenshotIdentity`], the (page path, user-agent alias) pair
//! that uniquely names one expected screenshot across runs.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Identity of one expected screenshot
///
/// A screenshot is identified by the page it renders and the user-agent
/// alias (browser/OS/viewport combination) it was rendered with. The pair is
/// the key of the golden manifest and of every classification entry.
///
/// Rendered as `page@agent`, e.g. `components/button@chrome-win`.
///
/// # Invariants
/// - `page` and `agent` are non-empty
/// - `agent` contains no `@` (the rendered separator must parse back)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScreenshotIdentity {
    page: String,
    agent: String,
}

impl ScreenshotIdentity {
    /// Create a new identity
    ///
    /// # Errors
    /// Returns error if either component is empty or the agent alias
    /// contains the `@` separator
    pub fn new(page: impl Into<String>, agent: impl Into<String>) -> Result<Self, IdentityError> {
        let page = page.into();
        let agent = agent.into();
        if page.is_empty() {
            return Err(IdentityError::EmptyPage);
        }
        if agent.is_empty() {
            return Err(IdentityError::EmptyAgent);
        }
        if agent.contains('@') {
            return Err(IdentityError::InvalidAgent(agent));
        }
        Ok(Self { page, agent })
    }

    /// Page path component
    #[inline]
    #[must_use]
    pub fn page(&self) -> &str {
        &self.page
    }

    /// User-agent alias component
    #[inline]
    #[must_use]
    pub fn agent(&self) -> &str {
        &self.agent
    }
}

impl Display for ScreenshotIdentity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.page, self.agent)
    }
}

impl FromStr for ScreenshotIdentity {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Page paths may contain '@'; the agent alias may not, so the last
        // separator is the authoritative one.
        let (page, agent) = s
            .rsplit_once('@')
            .ok_or_else(|| IdentityError::MissingSeparator(s.to_string()))?;
        Self::new(page, agent)
    }
}

// Serialized as the rendered `page@agent` string so manifest keys stay
// human-readable and sortable.
impl serde::Serialize for ScreenshotIdentity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for ScreenshotIdentity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Errors related to screenshot identities
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    /// Page path is empty
    #[error("page path is empty")]
    EmptyPage,

    /// User-agent alias is empty
    #[error("user-agent alias is empty")]
    EmptyAgent,

    /// User-agent alias contains the separator
    #[error("invalid user-agent alias: {0}")]
    InvalidAgent(String),

    /// Rendered form has no separator
    #[error("missing '@' separator in identity: {0}")]
    MissingSeparator(String),
}

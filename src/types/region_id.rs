use std::{borrow::Borrow, fmt, sync::Arc};

/// Stable key for a region within a dataset.
/// Keep the original name text but avoid repeated owned Strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(Arc<str>);

impl RegionId {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self(name.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RegionId {
    fn from(name: &str) -> Self {
        Self(Arc::from(name))
    }
}

impl From<String> for RegionId {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

// Hashes and compares as its name text, so maps keyed by RegionId can be
// queried with a plain &str.
impl Borrow<str> for RegionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

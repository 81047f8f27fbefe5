use crate::TagTranslator;

/// Number of leading routing segments dropped from path templates (`/api/v2`).
pub const DEFAULT_STRIP_PREFIX: usize = 2;

/// How to handle a local schema reference whose schema does not exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReferencePolicy {
    /// Fail the run with [`SplitError::UnresolvedReference`](crate::SplitError::UnresolvedReference).
    #[default]
    Strict,
    /// Keep the local reference as-is and log a warning.
    Lenient,
}

/// How to handle two entries mapping to the same output file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CollisionPolicy {
    /// Fail the run with [`SplitError::NamingCollision`](crate::SplitError::NamingCollision).
    #[default]
    Fail,
    /// The last entry wins; a warning is logged.
    Overwrite,
}

/// Configuration of a split.
///
/// ```rust
/// use specsplit_core::{CollisionPolicy, ReferencePolicy, SplitConfig, TagTranslator};
///
/// let config = SplitConfig::default()
///     .with_strip_prefix(1)
///     .with_tags(TagTranslator::empty())
///     .with_references(ReferencePolicy::Lenient)
///     .with_collisions(CollisionPolicy::Overwrite);
/// assert_eq!(config.strip_prefix, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitConfig {
    /// Leading path segments ignored when naming path files.
    pub strip_prefix: usize,
    /// Translation applied to operation tags.
    pub tags: TagTranslator,
    /// Handling of dangling schema references.
    pub references: ReferencePolicy,
    /// Handling of output file collisions.
    pub collisions: CollisionPolicy,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            strip_prefix: DEFAULT_STRIP_PREFIX,
            tags: TagTranslator::default(),
            references: ReferencePolicy::default(),
            collisions: CollisionPolicy::default(),
        }
    }
}

impl SplitConfig {
    /// Sets the number of leading path segments to ignore.
    pub fn with_strip_prefix(mut self, strip_prefix: usize) -> Self {
        self.strip_prefix = strip_prefix;
        self
    }

    /// Sets the tag translator.
    pub fn with_tags(mut self, tags: TagTranslator) -> Self {
        self.tags = tags;
        self
    }

    /// Sets the dangling reference policy.
    pub fn with_references(mut self, references: ReferencePolicy) -> Self {
        self.references = references;
        self
    }

    /// Sets the collision policy.
    pub fn with_collisions(mut self, collisions: CollisionPolicy) -> Self {
        self.collisions = collisions;
        self
    }
}

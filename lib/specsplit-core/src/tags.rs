//! Translation of operation tag labels.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use tracing::debug;

use crate::SplitError;

/// Tag labels of the KSeF API and their English replacements.
const KSEF_TAGS: [(&str, &str); 15] = [
    ("Uzyskiwanie dostępu", "Authentication"),
    ("Aktywne sesje", "ActiveSessions"),
    ("Certyfikaty klucza publicznego", "PublicKeyCertificates"),
    ("Wysyłka interaktywna", "InteractiveInvoice"),
    ("Wysyłka wsadowa", "BatchInvoice"),
    ("Status wysyłki i UPO", "InvoiceStatus"),
    ("Pobieranie faktur", "DownloadInvoices"),
    ("Nadawanie uprawnień", "GrantPermissions"),
    ("Odbieranie uprawnień", "RevokePermissions"),
    ("Wyszukiwanie nadanych uprawnień", "SearchPermissions"),
    ("Operacje", "Operations"),
    ("Certyfikaty", "Certificates"),
    ("Tokeny KSeF", "KSeFTokens"),
    ("Usługi Peppol", "PeppolServices"),
    ("Dane testowe", "TestData"),
];

/// Maps tag labels to their replacement.
///
/// Unknown labels are returned unchanged.
///
/// ```rust
/// use specsplit_core::TagTranslator;
///
/// let tags = TagTranslator::default();
/// assert_eq!(tags.translate("Uzyskiwanie dostępu"), "Authentication");
/// assert_eq!(tags.translate("UnknownTag"), "UnknownTag");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagTranslator {
    table: IndexMap<String, String>,
}

impl Default for TagTranslator {
    fn default() -> Self {
        KSEF_TAGS.into_iter().collect()
    }
}

impl<S, T> FromIterator<(S, T)> for TagTranslator
where
    S: Into<String>,
    T: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (S, T)>>(iter: I) -> Self {
        let table = iter
            .into_iter()
            .map(|(source, target)| (source.into(), target.into()))
            .collect();
        Self { table }
    }
}

impl TagTranslator {
    /// A translator without any entry, leaving every tag untouched.
    pub fn empty() -> Self {
        Self {
            table: IndexMap::new(),
        }
    }

    /// Returns the replacement of `tag`, or `tag` itself if it is unknown.
    pub fn translate<'a>(&'a self, tag: &'a str) -> &'a str {
        self.table.get(tag).map_or(tag, String::as_str)
    }

    /// Adds or replaces a translation.
    pub fn with_translation(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.table.insert(source.into(), target.into());
        self
    }

    /// Extends the table with a YAML mapping of `source: target` labels.
    ///
    /// Entries of the file take precedence over existing ones.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::TagTable`] if the file cannot be read or is not a
    /// mapping of strings.
    pub fn load_overrides(mut self, path: impl AsRef<Path>) -> Result<Self, SplitError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|error| SplitError::TagTable {
            path: path.to_path_buf(),
            message: error.to_string(),
        })?;
        let overrides: IndexMap<String, String> =
            serde_saphyr::from_str(&content).map_err(|error| SplitError::TagTable {
                path: path.to_path_buf(),
                message: error.to_string(),
            })?;

        debug!(count = overrides.len(), path = %path.display(), "tag overrides loaded");
        self.table.extend(overrides);
        Ok(self)
    }

    /// Number of known labels.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if no label is translated.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

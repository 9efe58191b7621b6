pub mod expression;

use std::collections::BTreeSet;

use expression::LicenseExpression;

/// License identifiers seen across all scanned files.
///
/// File-level declarations may be compound expressions; they are
/// decomposed so membership checks work on single identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LicenseSet {
    ids: BTreeSet<String>,
}

impl LicenseSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every identifier referenced by `declared`.
    ///
    /// A declaration that does not parse as an expression is kept verbatim.
    pub fn add_declared(&mut self, declared: &str) {
        match LicenseExpression::parse(declared) {
            Ok(expr) => self.ids.extend(expr.license_keys()),
            Err(err) => {
                tracing::warn!(
                    expression = declared,
                    error = %err,
                    "keeping unparseable license declaration as-is"
                );
                self.ids.insert(declared.to_string());
            }
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Identifiers in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for LicenseSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for declared in iter {
            set.add_declared(declared.as_ref());
        }
        set
    }
}

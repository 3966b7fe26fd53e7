use serde::{Deserialize, Serialize};

/// One directive line of an APT sources-list file.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Repository {
    /// Whether the line is active (not commented out).
    pub enabled: bool,

    /// `deb-src` (source packages) rather than `deb` (binary packages).
    pub source_repo: bool,

    /// Bracketed option string, e.g. `arch=amd64 signed-by=/usr/share/keyrings/x.gpg`.
    /// May be empty.
    pub options: String,

    /// Repository base URI.
    pub uri: String,

    /// Distribution (suite) name, e.g. `trixie` or `noble-updates`.
    pub distribution: String,

    /// Space-separated component list, e.g. `main contrib non-free`.
    pub components: String,

    /// Trailing comment, may be empty.
    pub comment: String,
}

impl Repository {
    /// Whether `other` points at the same package source.
    ///
    /// Two entries are the same source when their URI, distribution,
    /// components, source/binary kind and options all match exactly.
    /// `enabled` and `comment` carry no identity: a disabled duplicate is
    /// still a duplicate.
    pub fn same_source(&self, other: &Repository) -> bool {
        self.uri == other.uri
            && self.distribution == other.distribution
            && self.components == other.components
            && self.source_repo == other.source_repo
            && self.options == other.options
    }

    /// Render the sources-list line for this entry.
    ///
    /// The inverse of [`crate::parser::parse_line`]: parsing the rendered
    /// line yields an entry that renders identically.
    pub fn config_line(&self) -> String {
        let mut line = String::new();
        if !self.enabled {
            line.push_str("# ");
        }
        line.push_str(if self.source_repo { "deb-src " } else { "deb " });
        if !self.options.trim().is_empty() {
            line.push('[');
            line.push_str(&self.options);
            line.push_str("] ");
        }
        line.push_str(&self.uri);
        line.push(' ');
        line.push_str(&self.distribution);
        line.push(' ');
        line.push_str(&self.components);
        if !self.comment.trim().is_empty() {
            line.push_str(" # ");
            line.push_str(&self.comment);
        }
        line
    }
}

/// Ordered collection of repository entries aggregated from config files.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct RepositoryList(Vec<Repository>);

impl RepositoryList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, repository: Repository) {
        self.0.push(repository);
    }

    /// Membership test under the [`Repository::same_source`] rule.
    pub fn contains_source(&self, repository: &Repository) -> bool {
        self.0.iter().any(|existing| existing.same_source(repository))
    }
}

impl std::ops::Deref for RepositoryList {
    type Target = [Repository];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Extend<Repository> for RepositoryList {
    fn extend<T: IntoIterator<Item = Repository>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

impl FromIterator<Repository> for RepositoryList {
    fn from_iter<T: IntoIterator<Item = Repository>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for RepositoryList {
    type Item = Repository;
    type IntoIter = std::vec::IntoIter<Repository>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

use std::{
    fs,
    path::Path,
    sync::LazyLock,
};

use rapt_utils::fs::sorted_dir_entries;
use regex::Regex;
use tracing::debug;

use crate::{
    error::{Result, SourcesError},
    repository::{Repository, RepositoryList},
};

/// Primary configuration file inside an APT config folder.
pub const PRIMARY_FILE: &str = "sources.list";

/// Drop-in directory inside an APT config folder.
pub const DROPIN_DIR: &str = "sources.list.d";

/// File extension consumed from the drop-in directory.
pub const DROPIN_EXTENSION: &str = "list";

// One-line grammar: optional `# ` (disables the entry), `deb`/`deb-src`,
// optional bracketed options, URI, distribution, components up to an
// optional trailing `# comment`.
static SOURCE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(# )?(deb|deb-src)(?: \[(.*)\])? ([^ ]+) ([^ ]+) ([^#\n]+)(?: +# *(.*))?$")
        .expect("source line grammar")
});

/// Parse one sources-list line.
///
/// Lines that do not match the grammar (blank lines, full-line comments,
/// malformed entries) yield `None`. This is a filter, not an error.
///
/// ```
/// let repo = rapt_sources::parse_line("deb http://deb.debian.org/debian trixie main").unwrap();
/// assert!(repo.enabled);
/// assert_eq!(repo.distribution, "trixie");
/// ```
pub fn parse_line(line: &str) -> Option<Repository> {
    let caps = SOURCE_LINE.captures(line)?;
    let field = |i: usize| caps.get(i).map(|m| m.as_str().to_string()).unwrap_or_default();

    Some(Repository {
        enabled: caps.get(1).is_none(),
        source_repo: &caps[2] == "deb-src",
        options: field(3),
        uri: field(4),
        distribution: field(5),
        components: field(6),
        comment: field(7),
    })
}

/// Parse a single sources-list file, in line order.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<RepositoryList> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|err| SourcesError::FileRead {
        path: path.to_path_buf(),
        source: err,
    })?;

    Ok(text.lines().filter_map(parse_line).collect())
}

/// Parse an APT config folder (conventionally `/etc/apt`).
///
/// Aggregates the primary `sources.list` and every `.list` file in
/// `sources.list.d`, in file-then-line order; drop-in files are visited in
/// filename order. A missing primary file contributes nothing: current
/// Debian installs routinely ship without one. An unreadable drop-in
/// directory, or an unreadable file, is an error.
pub fn parse_folder<P: AsRef<Path>>(folder: P) -> Result<RepositoryList> {
    let folder = folder.as_ref();

    let mut files = Vec::new();
    let primary = folder.join(PRIMARY_FILE);
    if primary.exists() {
        files.push(primary);
    }

    for entry in sorted_dir_entries(folder.join(DROPIN_DIR))? {
        if entry
            .extension()
            .is_some_and(|ext| ext == DROPIN_EXTENSION)
        {
            files.push(entry);
        }
    }

    let mut repositories = RepositoryList::new();
    for file in &files {
        let parsed = parse_file(file)?;
        debug!(path = %file.display(), entries = parsed.len(), "parsed sources file");
        repositories.extend(parsed);
    }

    Ok(repositories)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_parse_line_binary_repo() {
        let repo = parse_line("deb http://archive.ubuntu.com/ubuntu focal main restricted").unwrap();
        assert!(repo.enabled);
        assert!(!repo.source_repo);
        assert_eq!(repo.options, "");
        assert_eq!(repo.uri, "http://archive.ubuntu.com/ubuntu");
        assert_eq!(repo.distribution, "focal");
        assert_eq!(repo.components, "main restricted");
        assert_eq!(repo.comment, "");
    }

    #[test]
    fn test_parse_line_disabled_source_with_comment() {
        let repo = parse_line("# deb-src http://example.com/ stable main # disabled source").unwrap();
        assert!(!repo.enabled);
        assert!(repo.source_repo);
        assert_eq!(repo.uri, "http://example.com/");
        assert_eq!(repo.distribution, "stable");
        assert_eq!(repo.components, "main");
        assert_eq!(repo.comment, "disabled source");
    }

    #[test]
    fn test_parse_line_with_options() {
        let repo = parse_line(
            "deb [arch=amd64 signed-by=/usr/share/keyrings/docker.gpg] https://download.docker.com/linux/ubuntu noble stable",
        )
        .unwrap();
        assert_eq!(repo.options, "arch=amd64 signed-by=/usr/share/keyrings/docker.gpg");
        assert_eq!(repo.uri, "https://download.docker.com/linux/ubuntu");
        assert_eq!(repo.components, "stable");
    }

    #[test]
    fn test_parse_line_skips_non_entries() {
        assert!(parse_line("").is_none());
        assert!(parse_line("# See sources.list(5) for format").is_none());
        assert!(parse_line("Types: deb").is_none());
        assert!(parse_line("deb http://half.example.com/").is_none());
    }

    #[test]
    fn test_round_trip_preserves_rendering() {
        let lines = [
            "deb http://archive.ubuntu.com/ubuntu focal main restricted",
            "# deb-src http://example.com/ stable main # disabled source",
            "deb [arch=amd64 trusted=yes] http://mirror.example.com/debian trixie main contrib",
        ];
        for line in lines {
            let repo = parse_line(line).unwrap();
            let rendered = repo.config_line();
            let reparsed = parse_line(&rendered).unwrap();
            assert_eq!(reparsed.config_line(), rendered);
            assert_eq!(rendered, line);
        }
    }

    #[test]
    fn test_parse_file_keeps_line_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sources.list");
        fs::write(
            &path,
            "deb http://a.example.com/debian trixie main\n\
             # a full-line comment\n\
             deb http://b.example.com/debian trixie main\n",
        )
        .unwrap();

        let repos = parse_file(&path).unwrap();
        assert_eq!(repos.len(), 2);
        assert_eq!(repos[0].uri, "http://a.example.com/debian");
        assert_eq!(repos[1].uri, "http://b.example.com/debian");
    }

    #[test]
    fn test_parse_file_missing_is_error() {
        let dir = tempdir().unwrap();
        let result = parse_file(dir.path().join("absent.list"));
        assert!(matches!(result, Err(SourcesError::FileRead { .. })));
    }

    fn write_folder(dir: &Path) {
        fs::write(
            dir.join(PRIMARY_FILE),
            "deb http://primary.example.com/debian trixie main\n",
        )
        .unwrap();
        let dropin = dir.join(DROPIN_DIR);
        fs::create_dir(&dropin).unwrap();
        fs::write(
            dropin.join("zz-last.list"),
            "deb http://last.example.com/debian trixie main\n",
        )
        .unwrap();
        fs::write(
            dropin.join("aa-first.list"),
            "deb http://first.example.com/debian trixie main\n",
        )
        .unwrap();
        fs::write(dropin.join("notes.txt"), "not a sources file\n").unwrap();
    }

    #[test]
    fn test_parse_folder_orders_primary_then_sorted_dropins() {
        let dir = tempdir().unwrap();
        write_folder(dir.path());

        let repos = parse_folder(dir.path()).unwrap();
        let uris: Vec<_> = repos.iter().map(|r| r.uri.as_str()).collect();
        assert_eq!(
            uris,
            [
                "http://primary.example.com/debian",
                "http://first.example.com/debian",
                "http://last.example.com/debian",
            ]
        );
    }

    #[test]
    fn test_parse_folder_missing_primary_is_empty_contribution() {
        let dir = tempdir().unwrap();
        let dropin = dir.path().join(DROPIN_DIR);
        fs::create_dir(&dropin).unwrap();
        fs::write(
            dropin.join("only.list"),
            "deb http://only.example.com/debian trixie main\n",
        )
        .unwrap();

        let repos = parse_folder(dir.path()).unwrap();
        assert_eq!(repos.len(), 1);
        assert_eq!(repos[0].uri, "http://only.example.com/debian");
    }

    #[test]
    fn test_parse_folder_missing_dropin_dir_is_error() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(PRIMARY_FILE),
            "deb http://primary.example.com/debian trixie main\n",
        )
        .unwrap();

        let result = parse_folder(dir.path());
        assert!(matches!(result, Err(SourcesError::FileSystem(_))));
    }
}

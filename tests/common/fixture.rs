use std::{env, fs, path::{Path, PathBuf}, ops::Deref, fmt::{self, Formatter, Display}};
use tempfile::TempDir;

pub const TEST_DATA_DIR: &str = "./tests/test-data";

/// A path living within its own temporary directory. The directory is removed once the fixture is dropped.
pub struct Fixture {
    path    : PathBuf,
    source  : PathBuf,
    _tempdir: TempDir,
}

impl Fixture {
    /// Reserve `{tempdir}/{filename}`, without creating anything. `source` points to `tests/test-data/{filename}`
    pub fn blank(filename: &str) -> Self {
        let root_dir = env::var("CARGO_MANIFEST_DIR").expect("$CARGO_MANIFEST_DIR");
        let source   = [root_dir.as_str(), TEST_DATA_DIR, filename].iter().collect();

        let tempdir = tempfile::tempdir().expect("Failed to generate temp directory");
        let path    = tempdir.path().join(filename);
        Fixture { path, source, _tempdir: tempdir }
    }

    /// Copy `tests/test-data/{filename}` into a fresh temporary directory.
    pub fn copy(filename: &str) -> Self {
        let fixture = Fixture::blank(filename);
        fs::create_dir_all(fixture.path.parent().expect("No parent directory")).expect("Failed to create directory");
        fs::copy(&fixture.source, &fixture.path).expect("Failed to copy Fixture file.");
        fixture
    }

    /// A sibling path, located within the same temporary directory.
    pub fn sibling(&self, filename: &str) -> PathBuf {
        self._tempdir.path().join(filename)
    }
}

impl Deref for Fixture {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        self.path.deref()
    }
}

impl Display for Fixture {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.to_str().expect("Invalid path (non UTF8 characters ?)"))
    }
}

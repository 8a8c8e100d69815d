use std::{
    fmt::{self, Display, Formatter},
    fs::File,
    io::{BufRead, BufReader},
    ops::Deref,
    path::Path,
};

use log::{debug, warn};

mod error;
pub use error::PairListError;

/// Two input samples whose genotypes get merged into a single, synthesized output sample.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SamplePair {
    first : String,
    second: String,
}

impl SamplePair {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self{first: first.into(), second: second.into()}
    }

    #[must_use]
    pub fn first(&self) -> &str {
        &self.first
    }

    #[must_use]
    pub fn second(&self) -> &str {
        &self.second
    }

    /// Both member names, in pair order.
    #[must_use]
    pub fn members(&self) -> [&str; 2] {
        [&self.first, &self.second]
    }

    /// Name of the output sample this pair produces: `{first}_{second}`
    #[must_use]
    pub fn combined_name(&self) -> String {
        format!("{}_{}", self.first, self.second)
    }
}

impl Display for SamplePair {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{} + {}", self.first, self.second)
    }
}

/// Ordered list of sample pairs. Insertion order defines the order of synthesized output samples.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairList(Vec<SamplePair>);

impl PairList {
    /// Parse a line-oriented pair list.
    ///
    /// - Empty lines, and lines starting with `#` are skipped.
    /// - Lines are split on whitespace. The first two tokens define a pair, extra tokens are ignored.
    /// - Lines carrying less than two tokens are silently ignored.
    /// - Lines that are not valid UTF-8 are skipped with a warning.
    ///
    /// # Errors
    /// - `PairListError::Read` if `source` cannot be read.
    pub fn parse<R: BufRead>(mut source: R) -> Result<Self, PairListError> {
        let mut pairs = Vec::new();
        let mut buf   = Vec::new();
        let mut i     = 0;
        loop {
            buf.clear();
            i += 1;
            if source.read_until(b'\n', &mut buf).map_err(|e| PairListError::Read{line: i, source: e})? == 0 {
                break
            }

            let Ok(line) = std::str::from_utf8(&buf) else {
                warn!("Skipping line {i} of the sample pair list: invalid UTF-8");
                continue
            };
            let line = line.trim_end_matches(|c: char| c == '\n' || c == '\r');
            if line.is_empty() || line.starts_with('#') {
                continue
            }

            let mut tokens = line.split_whitespace();
            if let (Some(first), Some(second)) = (tokens.next(), tokens.next()) {
                pairs.push(SamplePair::new(first, second));
            }
        }
        debug!("Parsed {} sample pair(s)", pairs.len());
        Ok(Self(pairs))
    }

    /// Open and parse a pair list file.
    ///
    /// # Errors
    /// - `PairListError::Open` if `path` cannot be opened.
    /// - `PairListError::Read` if the file cannot be read.
    pub fn from_path(path: &Path) -> Result<Self, PairListError> {
        let file = File::open(path).map_err(|source| PairListError::Open{path: path.to_path_buf(), source})?;
        Self::parse(BufReader::new(file))
    }

    /// Synthesized output sample names, in pair order.
    pub fn combined_names(&self) -> impl Iterator<Item = String> + '_ {
        self.0.iter().map(SamplePair::combined_name)
    }
}

impl Deref for PairList {
    type Target = [SamplePair];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromIterator<SamplePair> for PairList {
    fn from_iter<I: IntoIterator<Item = SamplePair>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    fn parse(input: &str) -> PairList {
        PairList::parse(Cursor::new(input)).expect("Failed to parse pair list")
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let pairs = parse("# father mother\n\nP1 P2\n#P1 P3\n");
        assert_eq!(&pairs[..], &[SamplePair::new("P1", "P2")]);
    }

    #[test]
    fn short_lines_are_ignored() {
        let pairs = parse("P1\nP1 P2\nP3\t\n");
        assert_eq!(pairs.len(), 1);
    }

    #[test]
    fn extra_tokens_are_ignored() {
        let pairs = parse("P1 P2 P3 P4\n");
        assert_eq!(&pairs[..], &[SamplePair::new("P1", "P2")]);
    }

    #[test]
    fn mixed_whitespace() {
        let pairs = parse("P1\tP2\n  P3   P4  \r\nP5 P6");
        let expected: PairList = [("P1", "P2"), ("P3", "P4"), ("P5", "P6")].into_iter()
            .map(|(a, b)| SamplePair::new(a, b))
            .collect();
        assert_eq!(pairs, expected);
    }

    #[test]
    fn order_is_preserved() {
        let pairs = parse("B A\nA B\nC D\n");
        let names: Vec<String> = pairs.combined_names().collect();
        assert_eq!(names, ["B_A", "A_B", "C_D"]);
    }

    #[test]
    fn indented_comment_is_not_a_comment() {
        let pairs = parse(" # P1 P2\n");
        assert_eq!(&pairs[..], &[SamplePair::new("#", "P1")]);
    }

    #[test]
    fn invalid_utf8_lines_are_skipped() -> anyhow::Result<()> {
        let pairs = PairList::parse(Cursor::new(b"P1 P2\n\xff\xfe garbage\nP1 P3\n"))?;
        assert_eq!(&pairs[..], &[SamplePair::new("P1", "P2"), SamplePair::new("P1", "P3")]);
        Ok(())
    }

    #[test]
    fn from_path() -> anyhow::Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let path = tmpdir.path().join("pairs.txt");
        let mut file = File::create(&path)?;
        writeln!(file, "#Parents\nP1 P2\nP1 P3")?;

        let pairs = PairList::from_path(&path)?;
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[1].members(), ["P1", "P3"]);
        Ok(())
    }

    #[test]
    fn missing_file_reports_path() {
        let err = PairList::from_path(Path::new("not-a-pairs-file.txt")).expect_err("Should fail on a missing file");
        assert!(matches!(err, PairListError::Open{ref path, ..} if path == Path::new("not-a-pairs-file.txt")));
        assert!(err.to_string().contains("not-a-pairs-file.txt"));
    }
}

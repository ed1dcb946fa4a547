//! Fixtures shared by the benchmarks.
//!
//! A [`TestFile`] holds one query string per line; blank lines and lines starting with
//! `#` are skipped.

#[derive(Debug, Copy, Clone)]
pub struct TestCase {
    name: &'static str,
    size: TestSize,
    file: TestFile,
}

impl TestCase {
    pub fn new(name: &'static str, size: TestSize, file: TestFile) -> Self {
        Self { name, size, file }
    }

    pub fn small(name: &'static str, file: TestFile) -> Self {
        Self::new(name, TestSize::Small, file)
    }

    pub fn large(name: &'static str, file: TestFile) -> Self {
        Self::new(name, TestSize::Large, file)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn size(&self) -> TestSize {
        self.size
    }

    pub fn file(&self) -> &TestFile {
        &self.file
    }

    /// Total bytes of all queries, for criterion throughput.
    pub fn bytes(&self) -> u64 {
        self.file.queries().map(|query| query.len() as u64).sum()
    }
}

#[derive(Debug, Copy, Clone)]
pub struct TestFile {
    file_name: &'static str,
    content: &'static str,
}

impl TestFile {
    pub const fn new(file_name: &'static str, content: &'static str) -> Self {
        Self { file_name, content }
    }

    pub fn file_name(&self) -> &'static str {
        self.file_name
    }

    pub fn queries(&self) -> impl Iterator<Item = &'static str> {
        self.content.lines().map(str::trim).filter(|line| !line.is_empty() && !line.starts_with('#'))
    }
}

#[derive(Clone, Copy, Debug)]
pub enum TestSize {
    Small,
    Large,
}

//! Named suite storage.

use pseudo_types::TestSuite;

/// Suites keyed by name, latest run per name.
///
/// Storing a suite under an existing name replaces it in place, so the
/// store holds at most one suite per distinct name and iteration follows
/// first-insertion order.
#[derive(Debug, Clone, Default)]
pub struct SuiteStore {
    suites: Vec<TestSuite>,
}

impl SuiteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, suite: TestSuite) {
        match self.suites.iter_mut().find(|s| s.name == suite.name) {
            Some(slot) => *slot = suite,
            None => self.suites.push(suite),
        }
    }

    pub fn get(&self, name: &str) -> Option<&TestSuite> {
        self.suites.iter().find(|s| s.name == name)
    }

    pub fn all(&self) -> &[TestSuite] {
        &self.suites
    }

    pub fn remove(&mut self, name: &str) -> Option<TestSuite> {
        let idx = self.suites.iter().position(|s| s.name == name)?;
        Some(self.suites.remove(idx))
    }

    pub fn clear(&mut self) {
        self.suites.clear();
    }

    pub fn len(&self) -> usize {
        self.suites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suites.is_empty()
    }
}

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

/// Crawl-wide set of paths that already have a job
///
/// Shared by every worker. Checking and marking a path is a single atomic
/// step, so no two workers ever schedule the same path.
#[derive(Debug, Default)]
pub struct Frontier {
    scheduled: DashMap<String, bool>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `path` as scheduled
    ///
    /// Returns `true` if the caller won the path and must schedule it,
    /// `false` if it was already taken.
    pub fn try_schedule(&self, path: &str) -> bool {
        match self.scheduled.entry(path.to_string()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(true);
                true
            }
        }
    }

    pub fn scheduled_count(&self) -> usize {
        self.scheduled.len()
    }
}

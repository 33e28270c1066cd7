//! Streaming per-package file counter.

use pkgstat_types::PackageCount;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Running count of files per package.
///
/// Keys are uninterpreted and case-sensitive; the empty string is a valid
/// key. Memory grows with the number of distinct packages only.
///
/// Rankings order by count descending and break ties by first-seen order:
/// the package that was incremented first ranks higher.
#[derive(Debug, Clone, Default)]
pub struct PackageCounter {
    entries: HashMap<String, Entry>,
    next_seen: u64,
    total: u64,
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    count: u64,
    first_seen: u64,
}

impl PackageCounter {
    /// Creates an empty counter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one file to `package`, inserting it with a count of one if new.
    pub fn increment(&mut self, package: &str) {
        self.add(package, 1);
    }

    /// Adds `files` to `package`.
    pub fn add(&mut self, package: &str, files: u64) {
        self.total += files;
        if let Some(entry) = self.entries.get_mut(package) {
            entry.count += files;
            return;
        }
        self.entries.insert(
            package.to_owned(),
            Entry {
                count: files,
                first_seen: self.next_seen,
            },
        );
        self.next_seen += 1;
    }

    /// Returns the count for `package`, zero if never seen.
    #[must_use]
    pub fn count(&self, package: &str) -> u64 {
        self.entries.get(package).map_or(0, |e| e.count)
    }

    /// Returns the number of distinct packages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been counted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the sum of all counts.
    #[must_use]
    pub const fn total_files(&self) -> u64 {
        self.total
    }

    /// Folds another counter into this one.
    ///
    /// Packages new to `self` are appended in `other`'s first-seen order, so
    /// merging per-partition counters in input order preserves tie-breaks.
    pub fn merge(&mut self, other: Self) {
        let mut incoming: Vec<_> = other.entries.into_iter().collect();
        incoming.sort_unstable_by_key(|(_, entry)| entry.first_seen);
        for (package, entry) in incoming {
            self.add(&package, entry.count);
        }
    }

    /// Returns the `n` packages with the most files.
    ///
    /// The result has `min(n, self.len())` entries ordered by count
    /// descending, ties by first-seen order. `n == 0` yields an empty ranking.
    #[must_use]
    pub fn top_n(&self, n: usize) -> Vec<PackageCount> {
        if n == 0 {
            return Vec::new();
        }

        let mut ranked: Vec<(&String, &Entry)> = self.entries.iter().collect();
        if n < ranked.len() {
            ranked.select_nth_unstable_by(n - 1, rank_order);
            ranked.truncate(n);
        }
        ranked.sort_unstable_by(rank_order);

        ranked
            .into_iter()
            .map(|(name, entry)| PackageCount::new(name.clone(), entry.count))
            .collect()
    }

    /// Returns every package in rank order.
    #[must_use]
    pub fn ranking(&self) -> Vec<PackageCount> {
        self.top_n(self.len())
    }
}

/// Count descending, then first-seen ascending. First-seen values are
/// unique, so this is a total order.
fn rank_order(a: &(&String, &Entry), b: &(&String, &Entry)) -> Ordering {
    b.1.count
        .cmp(&a.1.count)
        .then_with(|| a.1.first_seen.cmp(&b.1.first_seen))
}

impl<'a> Extend<&'a str> for PackageCounter {
    fn extend<I: IntoIterator<Item = &'a str>>(&mut self, packages: I) {
        for package in packages {
            self.increment(package);
        }
    }
}

impl<'a> FromIterator<&'a str> for PackageCounter {
    fn from_iter<I: IntoIterator<Item = &'a str>>(packages: I) -> Self {
        let mut counter = Self::new();
        counter.extend(packages);
        counter
    }
}

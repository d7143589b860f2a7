use indexmap::IndexMap;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct TagStats {
    allocated: usize,
    freed: usize,
    live_bytes: usize,
}

/// Returned when a free does not correspond to a tracked allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UntrackedFree {
    pub tag: &'static str,
}

/// Accounting for every allocation made through an arena, keyed by tag.
#[derive(Debug, Default, Clone)]
pub struct AllocationTracker {
    tags: IndexMap<&'static str, TagStats>,
    allocated: usize,
    freed: usize,
    current_bytes: usize,
    peak_bytes: usize,
}

impl AllocationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_alloc(&mut self, tag: &'static str, bytes: usize) {
        let stats = self.tags.entry(tag).or_default();
        stats.allocated += 1;
        stats.live_bytes += bytes;
        self.allocated += 1;
        self.current_bytes += bytes;
        self.peak_bytes = self.peak_bytes.max(self.current_bytes);
    }

    /// Rejects frees for tags with no outstanding allocation.
    pub fn record_free(&mut self, tag: &'static str, bytes: usize) -> Result<(), UntrackedFree> {
        let Some(stats) = self.tags.get_mut(tag) else {
            return Err(UntrackedFree { tag });
        };
        if stats.allocated == stats.freed {
            return Err(UntrackedFree { tag });
        }
        stats.freed += 1;
        stats.live_bytes = stats.live_bytes.saturating_sub(bytes);
        self.freed += 1;
        self.current_bytes = self.current_bytes.saturating_sub(bytes);
        Ok(())
    }

    pub fn outstanding(&self) -> usize {
        self.allocated - self.freed
    }

    /// Forget per-tag history while keeping the peak watermark.
    pub fn reset(&mut self) {
        let peak = self.peak_bytes;
        *self = Self::default();
        self.peak_bytes = peak;
    }

    pub fn report(&self) -> LeakReport {
        let by_tag = self
            .tags
            .iter()
            .filter(|(_, s)| s.allocated > s.freed)
            .map(|(tag, s)| TagLeak {
                tag: (*tag).to_string(),
                count: s.allocated - s.freed,
                bytes: s.live_bytes,
            })
            .collect();
        LeakReport {
            allocated: self.allocated,
            freed: self.freed,
            outstanding: self.outstanding(),
            outstanding_bytes: self.current_bytes,
            peak_bytes: self.peak_bytes,
            by_tag,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagLeak {
    pub tag: String,
    pub count: usize,
    pub bytes: usize,
}

/// Allocated vs. freed counts plus outstanding allocations grouped by tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeakReport {
    pub allocated: usize,
    pub freed: usize,
    pub outstanding: usize,
    pub outstanding_bytes: usize,
    pub peak_bytes: usize,
    pub by_tag: Vec<TagLeak>,
}

impl LeakReport {
    pub fn is_clean(&self) -> bool {
        self.outstanding == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_outstanding_by_tag() {
        let mut t = AllocationTracker::new();
        t.record_alloc("FUNCTION", 40);
        t.record_alloc("FUNCTION", 24);
        t.record_alloc("ROOT", 8);
        t.record_free("FUNCTION", 40).unwrap();

        let report = t.report();
        assert_eq!(report.allocated, 3);
        assert_eq!(report.freed, 1);
        assert_eq!(report.outstanding, 2);
        assert_eq!(report.peak_bytes, 72);
        assert_eq!(
            report.by_tag,
            vec![
                TagLeak { tag: "FUNCTION".into(), count: 1, bytes: 24 },
                TagLeak { tag: "ROOT".into(), count: 1, bytes: 8 },
            ]
        );
    }

    #[test]
    fn untracked_frees_are_rejected() {
        let mut t = AllocationTracker::new();
        assert_eq!(t.record_free("CLASS", 1), Err(UntrackedFree { tag: "CLASS" }));
        t.record_alloc("CLASS", 1);
        t.record_free("CLASS", 1).unwrap();
        assert!(t.record_free("CLASS", 1).is_err());
        assert!(t.report().is_clean());
    }
}

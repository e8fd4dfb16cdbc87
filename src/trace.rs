use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

/// Ordered, append-only record of the steps taken while resolving one link.
///
/// Clones share the same underlying lines, so a handle can be moved into a
/// background task while the caller keeps another to render afterwards.
#[derive(Debug, Clone, Default)]
pub struct TraceLog {
    lines: Arc<Mutex<Vec<String>>>,
}

impl TraceLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `line`; blank lines are dropped.
    pub fn append(&self, line: impl Into<String>) {
        let line = line.into();
        if line.trim().is_empty() {
            return;
        }
        tracing::debug!(target: "gmaps_geo::trace", "{}", line);
        self.guard().push(line);
    }

    /// Joins all lines with `\n`, in append order.
    pub fn render(&self) -> String {
        self.guard().join("\n")
    }

    pub fn lines(&self) -> Vec<String> {
        self.guard().clone()
    }

    pub fn len(&self) -> usize {
        self.guard().len()
    }

    pub fn is_empty(&self) -> bool {
        self.guard().is_empty()
    }

    // A panic while holding the lock can only interrupt a push, which leaves
    // the Vec valid, so poisoning is ignored.
    fn guard(&self) -> MutexGuard<'_, Vec<String>> {
        self.lines.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl fmt::Display for TraceLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

use super::definition::Workflow;

/// Hands out node and edge ids of the form `{prefix}_{n}`.
///
/// The counter only moves forward and any candidate already present in the
/// workflow is skipped, so ids stay unique no matter how many are requested
/// within one event (bulk duplicate, scripted replays).
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts counting at `start`. Useful when resuming a persisted session.
    pub fn starting_at(start: u64) -> Self {
        Self { next: start }
    }

    pub fn next_id(&mut self, prefix: &str, workflow: &Workflow) -> String {
        loop {
            self.next += 1;
            let candidate = format!("{}_{}", prefix, self.next);
            if !workflow.contains_id(&candidate) {
                return candidate;
            }
        }
    }

    /// Generates `count` distinct ids in one go.
    pub fn next_ids(&mut self, prefix: &str, count: usize, workflow: &Workflow) -> Vec<String> {
        (0..count).map(|_| self.next_id(prefix, workflow)).collect()
    }
}

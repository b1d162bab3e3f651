//! Recurring tasks with cancel handles.
//!
//! State machines ask a `Scheduler` to fire a `Task` periodically and keep
//! the returned handle; the host routes each firing back to the owner.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Task {
    BloomPulse,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaskHandle(pub u32);

pub trait Scheduler {
    /// `None` when the host could not arm a timer.
    fn schedule_every(&mut self, period_ms: u32, task: Task) -> Option<TaskHandle>;
    fn cancel(&mut self, handle: TaskHandle);
}

struct Entry {
    handle: TaskHandle,
    task: Task,
    period_ms: u32,
    elapsed_ms: u32,
}

/// Deterministic scheduler driven by explicit elapsed time.
#[derive(Default)]
pub struct ManualScheduler {
    next_id: u32,
    entries: Vec<Entry>,
}

impl ManualScheduler {
    /// Let `elapsed_ms` pass, pushing each firing in order onto `out`.
    pub fn advance(&mut self, elapsed_ms: u32, out: &mut Vec<Task>) {
        for e in &mut self.entries {
            e.elapsed_ms += elapsed_ms;
            while e.period_ms > 0 && e.elapsed_ms >= e.period_ms {
                e.elapsed_ms -= e.period_ms;
                out.push(e.task);
            }
        }
    }

    pub fn active_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_scheduled(&self, handle: TaskHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_every(&mut self, period_ms: u32, task: Task) -> Option<TaskHandle> {
        self.next_id += 1;
        let handle = TaskHandle(self.next_id);
        self.entries.push(Entry {
            handle,
            task,
            period_ms,
            elapsed_ms: 0,
        });
        Some(handle)
    }

    fn cancel(&mut self, handle: TaskHandle) {
        self.entries.retain(|e| e.handle != handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_per_period_and_stops_on_cancel() {
        let mut s = ManualScheduler::default();
        let h = s.schedule_every(100, Task::BloomPulse).unwrap();
        let mut out = Vec::new();
        s.advance(99, &mut out);
        assert!(out.is_empty());
        s.advance(1, &mut out);
        assert_eq!(out, vec![Task::BloomPulse]);
        s.advance(250, &mut out);
        assert_eq!(out.len(), 3);
        s.cancel(h);
        assert!(!s.is_scheduled(h));
        s.advance(1_000, &mut out);
        assert_eq!(out.len(), 3);
    }
}

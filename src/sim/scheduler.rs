//! Deferred task scheduling
//!
//! Single-threaded stand-in for the host timer. Tasks are plain data and
//! re-enter the world from `BlastWorld::advance`, never from inside another
//! task.

use serde::{Deserialize, Serialize};

use super::EntityId;

/// Work deferred until a delay elapses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduledTask {
    /// Chain timer ran out for this gnome
    Detonate { entity: EntityId },
    /// Lifetime ran out; the body is deleted
    Expire { entity: EntityId },
}

impl ScheduledTask {
    pub fn entity(&self) -> EntityId {
        match self {
            ScheduledTask::Detonate { entity } | ScheduledTask::Expire { entity } => *entity,
        }
    }
}

/// Delay -> task sink
pub trait Scheduler {
    fn schedule(&mut self, delay_ms: u64, task: ScheduledTask);
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Pending {
    due_ms: u64,
    /// Scheduling order, breaks ties between equal due times
    seq: u64,
    task: ScheduledTask,
}

/// Millisecond clock with a queue of pending tasks
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeferredQueue {
    now_ms: u64,
    next_seq: u64,
    pending: Vec<Pending>,
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Time until the next task is due
    pub fn next_due_in(&self) -> Option<u64> {
        self.pending
            .iter()
            .map(|p| p.due_ms.saturating_sub(self.now_ms))
            .min()
    }

    /// Move the clock forward and take every task that is now due
    pub fn advance(&mut self, elapsed_ms: u64) -> Vec<ScheduledTask> {
        self.now_ms = self.now_ms.saturating_add(elapsed_ms);
        let now = self.now_ms;

        let (mut due, waiting): (Vec<Pending>, Vec<Pending>) =
            self.pending.drain(..).partition(|p| p.due_ms <= now);
        self.pending = waiting;

        due.sort_by_key(|p| (p.due_ms, p.seq));
        due.into_iter().map(|p| p.task).collect()
    }

    /// Drop pending tasks for an entity. Returns how many were removed.
    pub fn cancel(&mut self, entity: EntityId) -> usize {
        let before = self.pending.len();
        self.pending.retain(|p| p.task.entity() != entity);
        before - self.pending.len()
    }
}

impl Scheduler for DeferredQueue {
    fn schedule(&mut self, delay_ms: u64, task: ScheduledTask) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Pending {
            due_ms: self.now_ms.saturating_add(delay_ms),
            seq,
            task,
        });
    }
}

/// Collects tasks so tests can run them right away
#[derive(Debug, Clone, Default)]
pub struct ImmediateScheduler {
    pub tasks: Vec<(u64, ScheduledTask)>,
}

impl ImmediateScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take everything scheduled so far, ignoring delays
    pub fn take(&mut self) -> Vec<ScheduledTask> {
        self.tasks.drain(..).map(|(_, task)| task).collect()
    }
}

impl Scheduler for ImmediateScheduler {
    fn schedule(&mut self, delay_ms: u64, task: ScheduledTask) {
        self.tasks.push((delay_ms, task));
    }
}

// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use super::{FrameScheduler, ScheduledTask, TaskId};
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

struct PeriodicTask {
    id: TaskId,
    interval: Duration,
    next_due: Duration,
    task: ScheduledTask,
}

#[derive(Default)]
struct State {
    next_id: u64,
    now: Duration,
    frame_tasks: Vec<(TaskId, ScheduledTask)>,
    periodic_tasks: Vec<PeriodicTask>,
    // Tasks taken out of the lists while their batch runs.
    running: HashSet<TaskId>,
    // Running tasks cancelled before their batch finished.
    cancelled: HashSet<TaskId>,
}

impl State {
    fn allocate_id(&mut self) -> TaskId {
        self.next_id += 1;
        TaskId(self.next_id)
    }

    fn begin_batch(&mut self, ids: impl IntoIterator<Item = TaskId>) {
        self.running.extend(ids);
    }

    /// Ends a batch: returns `true` if `id` survives, i.e. was not cancelled while running.
    fn finish_task(&mut self, id: TaskId) -> bool {
        self.running.remove(&id);
        !self.cancelled.remove(&id)
    }
}

/// A scheduler driven explicitly: frames end when [`end_frame`](Self::end_frame)
/// is called and time moves only through [`advance`](Self::advance).
///
/// Tasks run without the internal lock held, so they may register or cancel
/// tasks themselves.
#[derive(Default)]
pub struct ManualScheduler {
    state: Mutex<State>,
}

impl ManualScheduler {
    /// A scheduler at time zero with no tasks.
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Current simulated time.
    pub fn now(&self) -> Duration {
        self.state().now
    }

    /// Number of registered tasks of both kinds.
    pub fn pending_tasks(&self) -> usize {
        let state = self.state();
        state.frame_tasks.len() + state.periodic_tasks.len()
    }

    /// Runs every end-of-frame task once. Returns how many ran.
    pub fn end_frame(&self) -> usize {
        let mut tasks = {
            let mut state = self.state();
            let tasks = std::mem::take(&mut state.frame_tasks);
            state.begin_batch(tasks.iter().map(|(id, _)| *id));
            tasks
        };
        let mut ran = 0;
        for (id, task) in tasks.iter_mut() {
            if self.state().cancelled.contains(id) {
                continue;
            }
            task();
            ran += 1;
        }

        let mut state = self.state();
        tasks.retain(|(id, _)| state.finish_task(*id));
        // Tasks registered while the batch ran go after the existing ones.
        tasks.append(&mut state.frame_tasks);
        state.frame_tasks = tasks;
        ran
    }

    /// Moves time forward by `dt` and fires each periodic task that came due.
    /// Returns the number of firings.
    ///
    /// A task fires at most once per call, however many intervals `dt`
    /// spans, and its next run is one interval after the new time.
    pub fn advance(&self, dt: Duration) -> usize {
        let (now, mut tasks) = {
            let mut state = self.state();
            state.now += dt;
            let tasks = std::mem::take(&mut state.periodic_tasks);
            state.begin_batch(tasks.iter().map(|periodic| periodic.id));
            (state.now, tasks)
        };

        let mut fired = 0;
        for periodic in tasks.iter_mut() {
            if periodic.next_due > now || self.state().cancelled.contains(&periodic.id) {
                continue;
            }
            (periodic.task)();
            periodic.next_due = now + periodic.interval;
            fired += 1;
        }

        let mut state = self.state();
        tasks.retain(|periodic| state.finish_task(periodic.id));
        tasks.append(&mut state.periodic_tasks);
        state.periodic_tasks = tasks;
        fired
    }
}

impl std::fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state();
        f.debug_struct("ManualScheduler")
            .field("now", &state.now)
            .field("frame_tasks", &state.frame_tasks.len())
            .field("periodic_tasks", &state.periodic_tasks.len())
            .finish()
    }
}

impl FrameScheduler for ManualScheduler {
    fn at_end_of_frame(&self, task: ScheduledTask) -> TaskId {
        let mut state = self.state();
        let id = state.allocate_id();
        state.frame_tasks.push((id, task));
        id
    }

    fn every(&self, interval: Duration, task: ScheduledTask) -> TaskId {
        assert!(!interval.is_zero(), "periodic task interval must be positive");
        let mut state = self.state();
        let id = state.allocate_id();
        let next_due = state.now + interval;
        state.periodic_tasks.push(PeriodicTask {
            id,
            interval,
            next_due,
            task,
        });
        id
    }

    fn cancel(&self, id: TaskId) -> bool {
        let mut state = self.state();
        let frame_len = state.frame_tasks.len();
        state.frame_tasks.retain(|(task_id, _)| *task_id != id);
        let periodic_len = state.periodic_tasks.len();
        state.periodic_tasks.retain(|periodic| periodic.id != id);

        if frame_len != state.frame_tasks.len() || periodic_len != state.periodic_tasks.len() {
            return true;
        }
        if state.running.contains(&id) {
            return state.cancelled.insert(id);
        }
        false
    }
}

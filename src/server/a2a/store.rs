//! Bounded in-memory task store.

use std::{
    collections::{HashMap, VecDeque},
    sync::Arc,
};

use tokio::sync::RwLock;

use super::types::Task;

/// Shared handle to the task table.
pub type TaskStore = Arc<RwLock<TaskTable>>;

/// Create an empty task store holding at most `capacity` tasks.
pub fn new_task_store(capacity: usize) -> TaskStore {
    Arc::new(RwLock::new(TaskTable::with_capacity(capacity)))
}

/// Tasks keyed by id, remembering insertion order for eviction.
///
/// Once more than `capacity` tasks are stored, the oldest terminal tasks are
/// dropped. Non-terminal tasks are never evicted.
#[derive(Debug)]
pub struct TaskTable {
    tasks: HashMap<String, Task>,
    order: VecDeque<String>,
    capacity: usize,
}

impl TaskTable {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tasks: HashMap::new(),
            order: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.tasks.get_mut(id)
    }

    /// Store `task` under `id`, returning the ids evicted to stay within capacity.
    pub fn insert(&mut self, id: String, task: Task) -> Vec<String> {
        if self.tasks.insert(id.clone(), task).is_none() {
            self.order.push_back(id);
        }
        self.evict()
    }

    fn evict(&mut self) -> Vec<String> {
        let mut evicted = Vec::new();
        while self.tasks.len() > self.capacity {
            let Some(position) = self.order.iter().position(|id| {
                self.tasks
                    .get(id)
                    .is_some_and(|task| task.status.state.is_terminal())
            }) else {
                break;
            };
            if let Some(id) = self.order.remove(position) {
                self.tasks.remove(&id);
                evicted.push(id);
            }
        }
        evicted
    }
}

pub mod data_loader;

use std::collections::HashMap;
use std::future::Future;
use tokio::task::JoinHandle;

/// Tracks the loader tasks spawned on behalf of commands.
///
/// Tasks are keyed by what they load (`load_dashboard`, `load_history_<student>`, ...),
/// so a newer request for the same data replaces the older one.
pub struct BackgroundTaskManager {
    tasks: HashMap<String, JoinHandle<()>>,
}

impl BackgroundTaskManager {
    pub fn new() -> Self {
        Self {
            tasks: HashMap::new(),
        }
    }

    /// Spawn a loader task, aborting any still-running task with the same id.
    pub fn spawn_load_task<F>(&mut self, task_id: String, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.prune_finished();

        if let Some(handle) = self.tasks.remove(&task_id) {
            if !handle.is_finished() {
                tracing::debug!("Replacing running task {}", task_id);
            }
            handle.abort();
        }

        let handle = tokio::spawn(future);
        self.tasks.insert(task_id, handle);
    }

    pub fn is_running(&self, task_id: &str) -> bool {
        self.tasks
            .get(task_id)
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn running_count(&self) -> usize {
        self.tasks.values().filter(|h| !h.is_finished()).count()
    }

    fn prune_finished(&mut self) {
        self.tasks.retain(|_, handle| !handle.is_finished());
    }

    /// Abort everything (used on shutdown)
    pub fn cancel_all(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}

impl Default for BackgroundTaskManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for BackgroundTaskManager {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn same_id_aborts_previous_task() {
        let mut manager = BackgroundTaskManager::new();
        let (first_tx, first_rx) = oneshot::channel::<()>();
        let (second_tx, second_rx) = oneshot::channel::<()>();

        manager.spawn_load_task("dashboard".to_string(), async move {
            tokio::time::sleep(Duration::from_secs(60)).await;
            let _ = first_tx.send(());
        });
        manager.spawn_load_task("dashboard".to_string(), async move {
            let _ = second_tx.send(());
        });

        assert!(second_rx.await.is_ok());
        // The aborted task dropped its sender without sending.
        assert!(first_rx.await.is_err());
    }

    #[tokio::test]
    async fn different_ids_run_side_by_side() {
        let mut manager = BackgroundTaskManager::new();
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

        for id in ["load_dashboard", "load_history_a"] {
            let tx = tx.clone();
            manager.spawn_load_task(id.to_string(), async move {
                let _ = tx.send(id);
            });
        }
        drop(tx);

        let mut seen = Vec::new();
        while let Some(id) = rx.recv().await {
            seen.push(id);
        }
        seen.sort();
        assert_eq!(seen, vec!["load_dashboard", "load_history_a"]);
    }

    #[tokio::test]
    async fn cancel_all_stops_running_tasks() {
        let mut manager = BackgroundTaskManager::new();
        manager.spawn_load_task("payment".to_string(), async {
            tokio::time::sleep(Duration::from_secs(60)).await;
        });
        assert!(manager.is_running("payment"));
        assert_eq!(manager.running_count(), 1);

        manager.cancel_all();
        assert!(!manager.is_running("payment"));
        assert_eq!(manager.running_count(), 0);
    }
}

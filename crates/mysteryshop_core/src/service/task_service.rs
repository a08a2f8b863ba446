//! Task use-case service backing `GET /tasks` and `POST /tasks`.

use crate::model::task::{Task, TaskId};
use crate::repo::task_repo::{RepoError, RepoResult, TaskRepository};

/// Use-case wrapper over a task repository.
pub struct TaskService<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns every task in creation order.
    pub fn find_all(&self) -> RepoResult<Vec<Task>> {
        self.repo.list_tasks()
    }

    /// Creates one task with `title` stored as-is.
    pub fn create(&self, title: &str) -> RepoResult<Task> {
        self.repo.create_task(title)
    }

    /// Returns one task or `NotFound`.
    pub fn find_one(&self, id: TaskId) -> RepoResult<Task> {
        self.repo.get_task(id)?.ok_or(RepoError::NotFound(id))
    }
}

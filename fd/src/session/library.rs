//! Library operations
//!
//! Habits and tasks come back from the service as ordered listings and
//! are normalized into id-keyed maps for label resolution and anchor
//! lookups. Creates return the stored entity; the caller decides when to
//! refresh the library and graph afterwards.

use flowgate::{GatewayError, Habit, NewHabit, NewTask, Task};
use tracing::debug;

use crate::normalize::index_by_id;

use super::store::Session;

impl Session {
    /// Fetch habits and tasks concurrently and normalize both
    pub async fn fetch_library(&mut self) -> Result<(), GatewayError> {
        let Some(user_id) = self.user_id else {
            debug!("fetch_library: no user yet, skipping");
            return Ok(());
        };

        let (habits, tasks) = tokio::try_join!(self.api.list_habits(user_id), self.api.list_tasks(user_id))?;

        self.habits = index_by_id(habits);
        self.tasks = index_by_id(tasks);
        Ok(())
    }

    /// Create a habit; returns None until login has completed
    pub async fn create_habit(&mut self, habit: NewHabit) -> Result<Option<Habit>, GatewayError> {
        let Some(user_id) = self.user_id else {
            debug!("create_habit: no user yet, skipping");
            return Ok(None);
        };

        Ok(Some(self.api.create_habit(user_id, habit).await?))
    }

    /// Create a task; returns None until login has completed
    pub async fn create_task(&mut self, task: NewTask) -> Result<Option<Task>, GatewayError> {
        let Some(user_id) = self.user_id else {
            debug!("create_task: no user yet, skipping");
            return Ok(None);
        };

        Ok(Some(self.api.create_task(user_id, task).await?))
    }

    /// System to attach a new habit to when none is specified: the one
    /// the lowest-id existing habit belongs to
    pub fn default_system_id(&self) -> Option<flowgate::EntityId> {
        self.habits
            .values()
            .min_by_key(|habit| habit.id)
            .map(|habit| habit.system_id)
    }
}

//! Task model definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::document::Document;
use crate::Payload;

/// Task lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    Running,
    Completed,
    Failed,
    Cancelled,
}

impl Default for TaskStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Only pending or running tasks can be cancelled
    pub fn is_cancellable(&self) -> bool {
        matches!(self, Self::Pending | Self::Running)
    }
}

/// Task priority level, serialized as its numeric rank
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Critical,
}

impl Default for TaskPriority {
    fn default() -> Self {
        Self::Medium
    }
}

impl From<TaskPriority> for u8 {
    fn from(priority: TaskPriority) -> Self {
        match priority {
            TaskPriority::Low => 0,
            TaskPriority::Medium => 1,
            TaskPriority::High => 2,
            TaskPriority::Critical => 3,
        }
    }
}

impl TryFrom<u8> for TaskPriority {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Low),
            1 => Ok(Self::Medium),
            2 => Ok(Self::High),
            3 => Ok(Self::Critical),
            other => Err(format!("Invalid task priority: {}", other)),
        }
    }
}

/// A unit of work assigned to an agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub inputs: Payload,
    #[serde(default)]
    pub outputs: Payload,
    pub agent_id: Uuid,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: TaskPriority,
    pub user_id: String,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Create a pending task for `agent_id` on behalf of `user_id`
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        agent_id: Uuid,
        user_id: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            inputs: Payload::new(),
            outputs: Payload::new(),
            agent_id,
            status: TaskStatus::default(),
            priority: TaskPriority::default(),
            user_id: user_id.into(),
            started_at: None,
            completed_at: None,
            error: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the inputs
    pub fn with_inputs(mut self, inputs: Payload) -> Self {
        self.inputs = inputs;
        self
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    fn start(&mut self) {
        self.status = TaskStatus::Running;
        self.started_at = Some(Utc::now());
        self.completed_at = None;
        self.error = None;
    }

    /// Back to pending when the run never started
    fn reset(&mut self) {
        self.status = TaskStatus::Pending;
        self.started_at = None;
    }

    fn complete(&mut self, outputs: Payload) {
        self.status = TaskStatus::Completed;
        self.outputs = outputs;
        self.error = None;
        self.completed_at = Some(Utc::now());
    }

    fn fail(&mut self, error: impl Into<String>) {
        self.status = TaskStatus::Failed;
        self.outputs = Payload::new();
        self.error = Some(error.into());
        self.completed_at = Some(Utc::now());
    }
}

/// A status change the store applies only while [`TaskTransition::applies_to`]
/// holds for the stored task
#[derive(Debug, Clone)]
pub enum TaskTransition {
    /// pending -> running
    Start,
    /// running -> completed
    Complete(Payload),
    /// running -> failed
    Fail(String),
    /// running -> pending
    Reset,
    /// pending or running -> cancelled
    Cancel,
}

impl TaskTransition {
    pub fn applies_to(&self, status: TaskStatus) -> bool {
        match self {
            Self::Start => status == TaskStatus::Pending,
            Self::Complete(_) | Self::Fail(_) | Self::Reset => status == TaskStatus::Running,
            Self::Cancel => status.is_cancellable(),
        }
    }

    pub fn apply(self, task: &mut Task) {
        match self {
            Self::Start => task.start(),
            Self::Complete(outputs) => task.complete(outputs),
            Self::Fail(error) => task.fail(error),
            Self::Reset => task.reset(),
            Self::Cancel => task.status = TaskStatus::Cancelled,
        }
    }
}

impl Document for Task {
    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

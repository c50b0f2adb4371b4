//! Tool model definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::document::Document;
use crate::{Error, Payload};

/// Kind of tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolType {
    Browser,
    LocalApp,
    Api,
    System,
    Custom,
}

impl ToolType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Browser => "browser",
            Self::LocalApp => "local_app",
            Self::Api => "api",
            Self::System => "system",
            Self::Custom => "custom",
        }
    }
}

impl FromStr for ToolType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "browser" => Ok(Self::Browser),
            "local_app" | "local-app" => Ok(Self::LocalApp),
            "api" => Ok(Self::Api),
            "system" => Ok(Self::System),
            "custom" => Ok(Self::Custom),
            _ => Err(Error::InvalidInput(format!("Invalid tool type: {}", s))),
        }
    }
}

impl std::fmt::Display for ToolType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a tool executes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolExecutionEnvironment {
    Cloud,
    Local,
    Sandbox,
}

/// Declared input parameter of a tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInput {
    pub name: String,
    #[serde(rename = "type")]
    pub input_type: String,
    pub description: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub default: Option<serde_json::Value>,
}

/// Declared output of a tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolOutput {
    #[serde(rename = "type")]
    pub output_type: String,
    pub description: String,
}

/// A persisted tool definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub tool_type: ToolType,
    pub execution_environment: ToolExecutionEnvironment,
    #[serde(default)]
    pub inputs: Vec<ToolInput>,
    #[serde(default)]
    pub outputs: Vec<ToolOutput>,
    #[serde(default)]
    pub config: Payload,
    pub creator_id: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

impl ToolDefinition {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        tool_type: ToolType,
        execution_environment: ToolExecutionEnvironment,
        creator_id: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            tool_type,
            execution_environment,
            inputs: Vec::new(),
            outputs: Vec::new(),
            config: Payload::new(),
            creator_id: creator_id.into(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_inputs(mut self, inputs: Vec<ToolInput>) -> Self {
        self.inputs = inputs;
        self
    }

    pub fn with_outputs(mut self, outputs: Vec<ToolOutput>) -> Self {
        self.outputs = outputs;
        self
    }

    pub fn with_config(mut self, config: Payload) -> Self {
        self.config = config;
        self
    }
}

impl Document for ToolDefinition {
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

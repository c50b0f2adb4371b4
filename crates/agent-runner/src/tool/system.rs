use async_trait::async_trait;
use omnia_core::Payload;
use serde_json::{json, Value};
use sysinfo::System;
use tracing::info;

use crate::command::{command, params, payload, simulate_latency, str_field, timestamp, unknown_command};
use crate::context::ToolContext;
use crate::error::HookError;
use crate::identity::Identity;

use super::Tool;

/// Host access tool. Only `get_system_info` reads real data; file and
/// process commands are simulated.
pub struct SystemTool {
    identity: Identity,
}

impl SystemTool {
    pub fn new(identity: Identity) -> Self {
        Self { identity }
    }
}

fn system_info() -> Value {
    json!({
        "status": "success",
        "system": System::name().unwrap_or_else(|| std::env::consts::OS.to_string()),
        "release": System::kernel_version().unwrap_or_default(),
        "version": System::os_version().unwrap_or_default(),
        "machine": std::env::consts::ARCH,
        "processor": std::env::consts::ARCH,
        "timestamp": timestamp(),
    })
}

#[async_trait]
impl Tool for SystemTool {
    fn identity(&self) -> &Identity {
        &self.identity
    }

    async fn execute(&self, context: &ToolContext) -> Result<Payload, HookError> {
        let command = command(&context.inputs);
        let params = params(&context.inputs);
        info!("System tool {} running '{}'", self.identity.name, command);
        simulate_latency(&self.identity).await;

        let outputs = match command {
            "get_system_info" => system_info(),
            "list_directory" => json!({
                "status": "success",
                "path": str_field(&params, "path", "."),
                "files": ["file1.txt", "file2.txt", "directory1"],
                "timestamp": timestamp(),
            }),
            "read_file" => {
                let path = str_field(&params, "path", "");
                json!({
                    "status": "success",
                    "path": path,
                    "content": format!("Content of {} (simulated)", path),
                    "timestamp": timestamp(),
                })
            }
            "run_process" => {
                let process = str_field(&params, "process", "");
                let args: Vec<String> = params
                    .get("args")
                    .and_then(Value::as_array)
                    .map(|args| {
                        args.iter()
                            .map(|arg| match arg {
                                Value::String(s) => s.clone(),
                                other => other.to_string(),
                            })
                            .collect()
                    })
                    .unwrap_or_default();
                json!({
                    "status": "success",
                    "process": process,
                    "args": args,
                    "output": format!("Output from {} {} (simulated)", process, args.join(" ")),
                    "timestamp": timestamp(),
                })
            }
            other => return Ok(unknown_command(other)),
        };

        Ok(payload(outputs))
    }
}

use async_trait::async_trait;
use omnia_core::Payload;
use serde_json::json;
use tracing::info;

use crate::command::{command, params, payload, simulate_latency, str_field, timestamp, unknown_command};
use crate::context::ToolContext;
use crate::error::HookError;
use crate::identity::Identity;

use super::Tool;

/// Simulated web browser: navigate, click, type, extract
pub struct BrowserTool {
    identity: Identity,
}

impl BrowserTool {
    pub fn new(identity: Identity) -> Self {
        Self { identity }
    }
}

#[async_trait]
impl Tool for BrowserTool {
    fn identity(&self) -> &Identity {
        &self.identity
    }

    async fn execute(&self, context: &ToolContext) -> Result<Payload, HookError> {
        let command = command(&context.inputs);
        let url = str_field(&context.inputs, "url", "");
        let params = params(&context.inputs);
        info!("Browser tool {} running '{}'", self.identity.name, command);
        simulate_latency(&self.identity).await;

        let outputs = match command {
            "navigate" => json!({
                "status": "success",
                "page_title": format!("Page at {}", url),
                "content_summary": format!("Content from {} (simulated)", url),
                "timestamp": timestamp(),
            }),
            "click" => {
                let element = str_field(&params, "element", "unknown");
                json!({
                    "status": "success",
                    "action": "click",
                    "element": element,
                    "result": format!("Clicked on {} (simulated)", element),
                    "timestamp": timestamp(),
                })
            }
            "type" => {
                let element = str_field(&params, "element", "unknown");
                let text = str_field(&params, "text", "");
                json!({
                    "status": "success",
                    "action": "type",
                    "element": element,
                    "text": text,
                    "result": format!("Typed '{}' into {} (simulated)", text, element),
                    "timestamp": timestamp(),
                })
            }
            "extract" => {
                let selector = str_field(&params, "selector", "body");
                json!({
                    "status": "success",
                    "action": "extract",
                    "selector": selector,
                    "content": format!("Content from {} on {} (simulated)", selector, url),
                    "timestamp": timestamp(),
                })
            }
            other => return Ok(unknown_command(other)),
        };

        Ok(payload(outputs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::{ToolFactory, ToolOutcome, ToolRunner};
    use omnia_core::tool::ToolType;

    fn runner() -> ToolRunner {
        let tool = ToolFactory::create_for(ToolType::Browser, "t1", "Browser", Payload::new())
            .expect("browser tools are implemented");
        ToolRunner::new(tool)
    }

    fn outputs_of(outcome: ToolOutcome) -> Payload {
        match outcome {
            ToolOutcome::Success { outputs } => outputs,
            other => panic!("Expected success, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_navigate() {
        let envelope = runner()
            .run(payload(json!({ "command": "navigate", "url": "http://x" })))
            .await;

        assert_eq!(envelope.tool_id, "t1");
        assert_eq!(envelope.tool_name, "Browser");
        let outputs = outputs_of(envelope.outcome);
        assert_eq!(outputs["status"], "success");
        assert_eq!(outputs["page_title"], "Page at http://x");
        assert_eq!(outputs["content_summary"], "Content from http://x (simulated)");
    }

    #[tokio::test]
    async fn test_unknown_command_is_a_normal_result() {
        let envelope = runner().run(payload(json!({ "command": "frobnicate" }))).await;

        assert!(envelope.is_success());
        let outputs = outputs_of(envelope.outcome);
        assert_eq!(outputs["status"], "error");
        assert_eq!(outputs["error"], "Unknown command: frobnicate");
    }

    #[tokio::test]
    async fn test_click_and_type_defaults() {
        let runner = runner();

        let click = outputs_of(runner.run(payload(json!({ "command": "click" }))).await.outcome);
        assert_eq!(click["element"], "unknown");
        assert_eq!(click["result"], "Clicked on unknown (simulated)");

        let typed = outputs_of(
            runner
                .run(payload(json!({
                    "command": "type",
                    "params": { "element": "#search", "text": "rust" }
                })))
                .await
                .outcome,
        );
        assert_eq!(typed["action"], "type");
        assert_eq!(typed["result"], "Typed 'rust' into #search (simulated)");
    }

    #[tokio::test]
    async fn test_extract_uses_selector_and_url() {
        let outputs = outputs_of(
            runner()
                .run(payload(json!({ "command": "extract", "url": "http://x" })))
                .await
                .outcome,
        );
        assert_eq!(outputs["selector"], "body");
        assert_eq!(outputs["content"], "Content from body on http://x (simulated)");
    }
}

use omnia_core::tool::ToolType;
use omnia_core::Payload;

use crate::identity::Identity;
use crate::resolution::Resolution;

use super::{BrowserTool, SystemTool, Tool};

/// Maps tool type tags to realizations
pub struct ToolFactory;

impl ToolFactory {
    /// Resolve a type tag such as `"browser"` into a tool
    pub fn resolve(
        tool_type: &str,
        id: impl Into<String>,
        name: impl Into<String>,
        config: Payload,
    ) -> Resolution<Box<dyn Tool>> {
        match tool_type.parse::<ToolType>() {
            Ok(tool_type) => Self::resolve_type(tool_type, id, name, config),
            Err(_) => Resolution::Unrecognized(tool_type.to_string()),
        }
    }

    pub fn resolve_type(
        tool_type: ToolType,
        id: impl Into<String>,
        name: impl Into<String>,
        config: Payload,
    ) -> Resolution<Box<dyn Tool>> {
        let identity = Identity::new(id, name, config);
        match tool_type {
            ToolType::Browser => Resolution::Ready(Box::new(BrowserTool::new(identity))),
            ToolType::System => Resolution::Ready(Box::new(SystemTool::new(identity))),
            ToolType::Api | ToolType::LocalApp | ToolType::Custom => {
                Resolution::Unimplemented(tool_type.as_str())
            }
        }
    }

    /// Create a tool, logging when the type has no realization
    pub fn create(
        tool_type: &str,
        id: impl Into<String>,
        name: impl Into<String>,
        config: Payload,
    ) -> Option<Box<dyn Tool>> {
        Self::resolve(tool_type, id, name, config).into_logged("tool")
    }

    pub fn create_for(
        tool_type: ToolType,
        id: impl Into<String>,
        name: impl Into<String>,
        config: Payload,
    ) -> Option<Box<dyn Tool>> {
        Self::resolve_type(tool_type, id, name, config).into_logged("tool")
    }
}

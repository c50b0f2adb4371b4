//! Factory resolution outcomes

use tracing::{error, warn};

/// What a factory did with a requested type tag.
///
/// Callers treat `Unimplemented` and `Unrecognized` alike ("nothing to run"),
/// but they are logged at different levels: the first is a known gap, the
/// second a misconfiguration.
#[derive(Debug)]
pub enum Resolution<T> {
    /// The requested realization
    Ready(T),
    /// A stand-in realization for a type that has none of its own
    Fallback {
        instance: T,
        requested: &'static str,
        used: &'static str,
    },
    /// A known type with no realization yet
    Unimplemented(&'static str),
    /// A type tag outside the known set
    Unrecognized(String),
}

impl<T> Resolution<T> {
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Ready(_) | Self::Fallback { .. })
    }

    /// Drop the outcome detail, keeping the instance if any
    pub fn into_instance(self) -> Option<T> {
        match self {
            Self::Ready(instance) | Self::Fallback { instance, .. } => Some(instance),
            Self::Unimplemented(_) | Self::Unrecognized(_) => None,
        }
    }

    /// Log the outcome for `kind` ("agent" or "tool") and keep the instance if any
    pub fn into_logged(self, kind: &str) -> Option<T> {
        match &self {
            Self::Ready(_) => {}
            Self::Fallback { requested, used, .. } => {
                warn!(
                    "{} {} type not fully implemented, using {} {} instead",
                    type_label(requested),
                    kind,
                    used,
                    kind
                );
            }
            Self::Unimplemented(requested) => {
                warn!("{} {} type not implemented yet", type_label(requested), kind);
            }
            Self::Unrecognized(requested) => {
                error!("Unknown {} type: {}", kind, requested);
            }
        }
        self.into_instance()
    }
}

/// Human-readable form of a type tag for log lines ("local_app" -> "Local app")
fn type_label(tag: &str) -> String {
    if tag == "api" {
        return "API".to_string();
    }
    let words = tag.replace('_', " ");
    let mut chars = words.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

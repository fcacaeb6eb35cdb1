//! UI/backend events and error modeling for the desktop controller.

use shared::protocol::VehiclePage;

pub enum UiEvent {
    PageLoaded { generation: u64, page: VehiclePage },
    PageLoadFailed { generation: u64, error: UiError },
    VehicleSaved,
    VehicleDeleted,
    MutationFailed(UiError),
    Info(String),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    NotFound,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    FetchPage,
    SaveVehicle,
    DeleteVehicle,
    General,
}

pub fn classify_fetch_failure(message: &str) -> String {
    let lower = message.to_ascii_lowercase();
    if lower.contains("backend worker startup failure")
        || lower.contains("failed to build backend runtime")
    {
        "Backend worker startup failure; verify local app environment and relaunch.".to_string()
    } else if lower.contains("failed to connect")
        || lower.contains("connection refused")
        || lower.contains("dns")
        || lower.contains("timed out")
    {
        "Catalog server unreachable; check URL/network and retry.".to_string()
    } else {
        format!("Listing fetch failed: {message}")
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("404")
            || message_lower.contains("not_found")
            || message_lower.contains("not found")
            || message_lower.contains("no vehicle")
        {
            UiErrorCategory::NotFound
        } else if message_lower.contains("invalid")
            || message_lower.contains("missing")
            || message_lower.contains("malformed")
            || message_lower.contains("validation")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("connection")
            || message_lower.contains("network")
            || message_lower.contains("transport")
            || message_lower.contains("unavailable")
            || message_lower.contains("dns")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Transport => "Transport",
        UiErrorCategory::NotFound => "Not found",
        UiErrorCategory::Validation => "Validation",
        UiErrorCategory::Unknown => "Unexpected",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_connection_failures_as_transport() {
        let err = UiError::from_message(
            UiErrorContext::FetchPage,
            "transport failure: error sending request: connection refused",
        );
        assert_eq!(err.category(), UiErrorCategory::Transport);
    }

    #[test]
    fn classifies_missing_record_as_not_found() {
        let err = UiError::from_message(
            UiErrorContext::DeleteVehicle,
            "server rejected request (NotFound): no vehicle with id 64f1",
        );
        assert_eq!(err.category(), UiErrorCategory::NotFound);
    }

    #[test]
    fn fetch_failure_text_names_unreachable_server() {
        let text = classify_fetch_failure("error sending request: connection refused");
        assert!(text.contains("unreachable"));
    }
}

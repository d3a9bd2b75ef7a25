//! HTTP request and response bodies

use logpulse_core::StatusSnapshot;
use serde::{Deserialize, Serialize};

/// Optional body of `POST /logs/start`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartRequest {
    pub rate_per_second: i64,
}

/// Body of `PUT /logs/rate`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRateRequest {
    pub rate_per_second: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRateResponse {
    pub message: String,
    pub rate_per_second: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogStatusResponse {
    pub is_running: bool,
    pub total_logs: u64,
    pub rate_per_second: u32,
}

impl From<StatusSnapshot> for LogStatusResponse {
    fn from(status: StatusSnapshot) -> Self {
        Self {
            is_running: status.is_running,
            total_logs: status.total_logs,
            rate_per_second: status.rate_per_second,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_format() {
        let body = LogStatusResponse::from(StatusSnapshot {
            is_running: true,
            total_logs: 42,
            rate_per_second: 2000,
        });
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({
                "is_running": true,
                "total_logs": 42,
                "rate_per_second": 2000
            })
        );
    }

    #[test]
    fn test_update_rate_request_accepts_negative() {
        // Range checks happen in the generator, not at deserialization.
        let req: UpdateRateRequest = serde_json::from_str(r#"{"rate_per_second": -3}"#).unwrap();
        assert_eq!(req.rate_per_second, -3);
    }
}

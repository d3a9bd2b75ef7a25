//! # logpulse-server - HTTP control plane for the log generator
//!
//! | Method | Path                   | Description                              |
//! |--------|------------------------|------------------------------------------|
//! | POST   | `/api/v1/logs/start`   | Start generation (optional rate body)    |
//! | POST   | `/api/v1/logs/stop`    | Stop generation                          |
//! | PUT    | `/api/v1/logs/rate`    | Change the aggregate rate                |
//! | GET    | `/api/v1/logs/status`  | Running flag, total logs, current rate   |
//! | GET    | `/api/v1/health`       | Liveness                                 |
//! | GET    | `/metrics`             | Prometheus text exposition               |

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod metrics;
pub mod router;

pub use config::Settings;
pub use error::{ApiError, Result};
pub use handlers::AppState;
pub use router::{API_PREFIX, create_router};

use thiserror::Error;

/// Convenient result alias for the router.
pub type Result<T> = std::result::Result<T, RouteError>;

/// Every failure the router can report.
#[derive(Debug, Error)]
pub enum RouteError {
    /// An identifier that is not part of the graph was referenced.
    #[error("unknown waypoint: {name}")]
    UnknownWaypoint { name: String },

    /// The path finder could not reach the target from the source.
    #[error("no path exists between {from} and {to}")]
    NoPathExists { from: String, to: String },

    /// The primary route from start to destination does not exist.
    #[error("destination {destination} is unreachable from {start}")]
    DestinationUnreachable { start: String, destination: String },

    /// The robot ran low at `at` and could neither recharge nor continue.
    #[error("robot stranded at {at} with {battery:.2}% battery")]
    Stranded { at: String, battery: f64 },

    /// The scenario configuration is inconsistent.
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Drawing the route failed.
    #[error("failed to render route: {0}")]
    Render(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl RouteError {
    pub(crate) fn unknown(name: &str) -> Self {
        RouteError::UnknownWaypoint {
            name: name.to_string(),
        }
    }

    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        RouteError::InvalidConfig {
            message: message.into(),
        }
    }
}

/// Convenience result type used across sceneline.
pub type SceneResult<T> = Result<T, SceneError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum SceneError {
    /// Invalid model data or rejected external input (e.g. an imported keyframe list).
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid simulation settings or a simulator that could not be driven.
    #[error("simulation error: {0}")]
    Simulation(String),

    /// A bake was cancelled between simulation steps; nothing was merged.
    #[error("bake cancelled after {steps_completed} of {steps_total} steps")]
    Cancelled {
        /// Steps that finished before cancellation was observed.
        steps_completed: u32,
        /// Steps the bake would have run.
        steps_total: u32,
    },

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SceneError {
    /// Build a [`SceneError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SceneError::Simulation`] value.
    pub fn simulation(msg: impl Into<String>) -> Self {
        Self::Simulation(msg.into())
    }

    /// Build a [`SceneError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for SceneError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

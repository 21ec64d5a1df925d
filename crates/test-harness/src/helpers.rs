//! Parameter presets and the harness error type.

use window_types::{WindowParameters, WindowType};

/// Errors from harness operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum HarnessError {
    #[error("dispatch error: {message}")]
    DispatchError { message: String },

    #[error("unexpected response: expected {expected}, got {got}")]
    UnexpectedResponse { expected: String, got: String },

    #[error("no layout computed yet")]
    NoLayout,

    #[error("unknown panel: {id}")]
    UnknownPanel { id: String },

    #[error("assertion failed: {detail}")]
    AssertionFailed { detail: String },

    #[error("oracle failure ({oracle}): {detail}")]
    OracleFailure { oracle: String, detail: String },

    #[error("notification: {message}")]
    Notification { message: String },
}

/// Single sash of the given frame size, otherwise defaults.
pub fn single(width: f64, height: f64) -> WindowParameters {
    WindowParameters::single(width, height)
}

pub fn double_symmetric(width: f64, height: f64) -> WindowParameters {
    WindowParameters {
        window_type: WindowType::DoubleSymmetric,
        frame_width: width,
        frame_height: height,
        ..WindowParameters::default()
    }
}

/// Two wings, the main one taking `ratio` percent of the sash width.
pub fn double_asymmetric(width: f64, height: f64, ratio: f64) -> WindowParameters {
    WindowParameters {
        window_type: WindowType::DoubleAsymmetric,
        frame_width: width,
        frame_height: height,
        is_asymmetric: true,
        main_wing_ratio: ratio,
        ..WindowParameters::default()
    }
}

pub fn mullion_split(width: f64, height: f64) -> WindowParameters {
    WindowParameters {
        window_type: WindowType::MullionSplit,
        frame_width: width,
        frame_height: height,
        ..WindowParameters::default()
    }
}

/// Short name of a response variant for diagnostics.
pub(crate) fn response_kind(response: &window_bridge::EngineToHost) -> &'static str {
    use window_bridge::EngineToHost::*;
    match response {
        LayoutUpdated { .. } => "LayoutUpdated",
        PanelsUpdated { .. } => "PanelsUpdated",
        SettingsReady { .. } => "SettingsReady",
        BomReady { .. } => "BomReady",
        Notification { .. } => "Notification",
        Error { .. } => "Error",
    }
}

//! Application layer - command handlers orchestrating domain and ports.

mod run_xray;

pub use run_xray::{
    is_text_too_noisy, RunXRayCommand, RunXRayHandler, RunXRayResult, XRayError,
    DEFAULT_COUNTRY,
};

//! Persisted client-state boundary.
//!
//! The dashboard keeps its endpoint, auth token, theme, drag-sort orders and
//! profile presets in a flat JSON document. This module is the typed
//! load/save pair around that document plus the process-scoped copy the rest
//! of the application reads. Decode failures on load are recoverable: the
//! caller always gets a usable state, defaults standing in for anything
//! unreadable.

pub mod session;

use std::fs;
use std::path::Path;
use std::sync::RwLock;

use log::{debug, warn};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::{derive_time, TimeUnit};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:2023/graphql";
pub const THEMES: &[&str] = &["dark", "light"];

const DEFAULT_CHECK_INTERVAL: &str = "30s";
const DEFAULT_CHECK_TOLERANCE: &str = "0ms";
const DEFAULT_SNIFFING_TIMEOUT: &str = "100ms";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store state already initialized")]
    AlreadyInitialized,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode store state: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A named bundle of global-config durations the user can apply in one click.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfilePreset {
    pub name: String,
    pub check_interval: String,
    pub check_tolerance: String,
    pub sniffing_timeout: String,
}

impl Default for ProfilePreset {
    fn default() -> Self {
        ProfilePreset {
            name: String::new(),
            check_interval: DEFAULT_CHECK_INTERVAL.to_string(),
            check_tolerance: DEFAULT_CHECK_TOLERANCE.to_string(),
            sniffing_timeout: DEFAULT_SNIFFING_TIMEOUT.to_string(),
        }
    }
}

/// The whole persisted document. Field names match the browser store's JSON
/// shape; every field is defaultable so partial documents still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoredState {
    pub endpoint_url: String,
    pub token: String,
    pub app_theme: String,
    pub node_sort: Vec<String>,
    pub subscription_sort: Vec<String>,
    pub group_sort: Vec<String>,
    pub presets: Vec<ProfilePreset>,
}

impl Default for StoredState {
    fn default() -> Self {
        StoredState {
            endpoint_url: DEFAULT_ENDPOINT.to_string(),
            token: String::new(),
            app_theme: "dark".to_string(),
            node_sort: Vec::new(),
            subscription_sort: Vec::new(),
            group_sort: Vec::new(),
            presets: Vec::new(),
        }
    }
}

/// A duration expression a stored preset is allowed to carry: non-empty and
/// deriving to a positive number of milliseconds. "0ms" is valid for the
/// tolerance field, so zero is only rejected together with garbage input.
fn valid_duration(expr: &str, allow_zero: bool) -> bool {
    let millis = derive_time(expr, TimeUnit::Milliseconds);
    if allow_zero {
        // garbage also derives to 0, so an explicit zero token is required
        millis > 0.0 || matches!(expr.trim(), "0" | "0ms" | "0s")
    } else {
        millis > 0.0
    }
}

/// Resets out-of-range values to their defaults, field by field, so one bad
/// entry in a hand-edited document does not discard the rest.
fn sanitize(state: &mut StoredState) {
    if state.endpoint_url.trim().is_empty() {
        state.endpoint_url = DEFAULT_ENDPOINT.to_string();
    }
    if !THEMES.contains(&state.app_theme.as_str()) {
        warn!("unknown theme {:?} in stored state, using default", state.app_theme);
        state.app_theme = "dark".to_string();
    }
    for preset in &mut state.presets {
        if !valid_duration(&preset.check_interval, false) {
            warn!(
                "preset {:?} has invalid check interval {:?}, using default",
                preset.name, preset.check_interval
            );
            preset.check_interval = DEFAULT_CHECK_INTERVAL.to_string();
        }
        if !valid_duration(&preset.check_tolerance, true) {
            preset.check_tolerance = DEFAULT_CHECK_TOLERANCE.to_string();
        }
        if !valid_duration(&preset.sniffing_timeout, false) {
            preset.sniffing_timeout = DEFAULT_SNIFFING_TIMEOUT.to_string();
        }
    }
}

/// Loads the persisted document from `path`.
///
/// A missing file or a document that fails to decode falls back to defaults;
/// the failure is logged, never surfaced as an error.
pub fn load(path: &Path) -> StoredState {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            debug!("no stored state at {}: {}", path.display(), e);
            return StoredState::default();
        }
    };

    let mut state = match serde_json::from_str::<StoredState>(&content) {
        Ok(state) => state,
        Err(e) => {
            warn!(
                "stored state at {} failed to decode ({}), using defaults",
                path.display(),
                e
            );
            StoredState::default()
        }
    };

    sanitize(&mut state);
    state
}

/// Writes the document to `path` as pretty-printed JSON.
pub fn save(path: &Path, state: &StoredState) -> Result<(), StoreError> {
    let encoded = serde_json::to_string_pretty(state)?;
    fs::write(path, encoded)?;
    Ok(())
}

static STATE: OnceCell<RwLock<StoredState>> = OnceCell::new();

/// Installs the process-scoped state. May be called exactly once; later
/// calls are reported as [`StoreError::AlreadyInitialized`] and leave the
/// installed state untouched.
pub fn init(state: StoredState) -> Result<(), StoreError> {
    STATE
        .set(RwLock::new(state))
        .map_err(|_| StoreError::AlreadyInitialized)
}

/// Read accessor for the process-scoped state. Before [`init`] it returns
/// defaults.
pub fn current() -> StoredState {
    match STATE.get() {
        Some(lock) => lock.read().map(|s| s.clone()).unwrap_or_default(),
        None => StoredState::default(),
    }
}

/// Applies a mutation to the process-scoped state. Returns false when the
/// state was never initialized.
pub fn update<F>(mutate: F) -> bool
where
    F: FnOnce(&mut StoredState),
{
    let Some(lock) = STATE.get() else {
        return false;
    };
    match lock.write() {
        Ok(mut state) => {
            mutate(&mut state);
            true
        }
        Err(_) => false,
    }
}

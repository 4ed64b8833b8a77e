//! Speedcubing practice timer core.
//!
//! Solve records, rolling statistics (Ao5, Ao12, ...), time formatting and
//! scramble generation. Everything here is a synchronous transform over
//! in-memory slices; the `wasm_bindgen` exports at the bottom are the surface
//! the browser UI calls into.

use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;
use wasm_bindgen::prelude::*;

pub mod config;
pub mod io;
pub mod puzzle;
pub mod scramble;
pub mod timer;
pub mod utils;

use config::{AO100, AO12, AO5, AO50, DEFAULT_SESSION, PLUS_TWO_MS};
pub use puzzle::{CubeType, CubeTypeInfo, CustomCubeType};
pub use scramble::{generate_scramble, generate_scramble_with};
pub use utils::generate_id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Penalty {
    #[serde(rename = "+2")]
    PlusTwo,
    #[serde(rename = "DNF")]
    Dnf,
}

impl Penalty {
    /// Parse the serialized marker (`"+2"` or `"DNF"`, case-insensitive).
    pub fn from_tag(tag: &str) -> Option<Penalty> {
        match tag.trim() {
            "+2" => Some(Penalty::PlusTwo),
            t if t.eq_ignore_ascii_case("dnf") => Some(Penalty::Dnf),
            _ => None,
        }
    }
}

impl fmt::Display for Penalty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Penalty::PlusTwo => write!(f, "+2"),
            Penalty::Dnf => write!(f, "DNF"),
        }
    }
}

/// One timed attempt. Records are never edited in place; a penalty change
/// produces a new record via [`Solve::with_penalty`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Solve {
    pub id: String,
    pub cube_type: CubeType,
    /// Raw elapsed time in milliseconds.
    pub time: u32,
    #[serde(default)]
    pub penalty: Option<Penalty>,
    pub scramble: String,
    pub timestamp: DateTime<Utc>,
    pub session: String,
}

impl Solve {
    pub fn new(
        cube_type: impl Into<CubeType>,
        time: u32,
        scramble: impl Into<String>,
        session: impl Into<String>,
    ) -> Self {
        Self {
            id: generate_id(),
            cube_type: cube_type.into(),
            time,
            penalty: None,
            scramble: scramble.into(),
            timestamp: Utc::now(),
            session: session.into(),
        }
    }

    pub fn with_penalty(self, penalty: Option<Penalty>) -> Self {
        Self { penalty, ..self }
    }

    pub fn is_dnf(&self) -> bool {
        self.penalty == Some(Penalty::Dnf)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            created_at: Utc::now(),
        }
    }

    /// The session every solve belongs to until the user creates another.
    pub fn default_session() -> Self {
        Self {
            id: DEFAULT_SESSION.to_string(),
            name: DEFAULT_SESSION.to_string(),
            created_at: Utc::now(),
        }
    }
}

/// Solves of one puzzle type within one session, in their original order.
pub fn filter_solves(solves: &[Solve], cube_type: &CubeType, session: &str) -> Vec<Solve> {
    solves
        .iter()
        .filter(|s| &s.cube_type == cube_type && s.session == session)
        .cloned()
        .collect()
}

/// Time used for ranking: DNF is infinitely slow, +2 adds two seconds.
pub fn effective_time(solve: &Solve) -> f64 {
    match solve.penalty {
        Some(Penalty::Dnf) => f64::INFINITY,
        Some(Penalty::PlusTwo) => f64::from(solve.time) + f64::from(PLUS_TWO_MS),
        None => f64::from(solve.time),
    }
}

/// How many DNFs a window tolerates before its average is void.
#[inline]
fn max_dnfs(window: usize) -> usize {
    if window == AO5 {
        1
    } else {
        window / 10
    }
}

/// Trimmed mean of the last `window` solves (the "average of N").
///
/// Returns `None` when fewer than `window` solves exist, when the window holds
/// more DNFs than it tolerates, or when a DNF survives trimming. The single
/// best and single worst times are dropped before averaging, so windows
/// smaller than 3 never produce a result.
pub fn rolling_average(solves: &[Solve], window: usize) -> Option<f64> {
    if window < 3 || solves.len() < window {
        return None;
    }

    let recent = &solves[solves.len() - window..];
    let mut times: Vec<f64> = recent.iter().map(effective_time).collect();

    let dnf_count = times.iter().filter(|t| t.is_infinite()).count();
    if dnf_count > max_dnfs(window) {
        debug!(
            "Ao{} void: {} DNFs exceed the allowed {}",
            window,
            dnf_count,
            max_dnfs(window)
        );
        return None;
    }

    times.sort_by(f64::total_cmp);
    let trimmed = &times[1..times.len() - 1];

    if trimmed.iter().any(|t| t.is_infinite()) {
        return None;
    }

    Some(trimmed.iter().sum::<f64>() / trimmed.len() as f64)
}

/// Plain mean over finished solves. DNFs are left out entirely rather than
/// counted as infinite, unlike [`rolling_average`].
pub fn mean(solves: &[Solve]) -> Option<f64> {
    let finished: Vec<f64> = solves
        .iter()
        .filter(|s| !s.is_dnf())
        .map(effective_time)
        .collect();

    if finished.is_empty() {
        return None;
    }
    Some(finished.iter().sum::<f64>() / finished.len() as f64)
}

/// Lowest [`rolling_average`] over every consecutive run of `window` solves.
pub fn best_rolling_average(solves: &[Solve], window: usize) -> Option<f64> {
    if window == 0 || solves.len() < window {
        return None;
    }

    solves
        .windows(window)
        .filter_map(|w| rolling_average(w, window))
        .min_by(f64::total_cmp)
}

fn finished_times(solves: &[Solve]) -> impl Iterator<Item = f64> + '_ {
    solves.iter().filter(|s| !s.is_dnf()).map(effective_time)
}

/// Aggregates shown in the statistics panel for one list of solves.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CubeStats {
    pub count: usize,
    pub best: Option<f64>,
    pub worst: Option<f64>,
    pub average: Option<f64>,
    pub ao5: Option<f64>,
    pub ao12: Option<f64>,
    pub ao50: Option<f64>,
    pub ao100: Option<f64>,
    pub best_ao5: Option<f64>,
    pub best_ao12: Option<f64>,
}

pub fn compute_stats(solves: &[Solve]) -> CubeStats {
    let stats = CubeStats {
        count: solves.len(),
        best: finished_times(solves).min_by(f64::total_cmp),
        worst: finished_times(solves).max_by(f64::total_cmp),
        average: mean(solves),
        ao5: rolling_average(solves, AO5),
        ao12: rolling_average(solves, AO12),
        ao50: rolling_average(solves, AO50),
        ao100: rolling_average(solves, AO100),
        best_ao5: best_rolling_average(solves, AO5),
        best_ao12: best_rolling_average(solves, AO12),
    };
    info!(
        "Stats over {} solves: mean {:?}, ao5 {:?}, ao12 {:?}",
        stats.count, stats.average, stats.ao5, stats.ao12
    );
    stats
}

/// Render milliseconds as `M:SS.CC`, or `S.CC` under a minute.
///
/// The value is rendered as given; a +2 only appends the `+` marker. DNF
/// always renders as `DNF`.
pub fn format_time(ms: u32, penalty: Option<Penalty>) -> String {
    if penalty == Some(Penalty::Dnf) {
        return "DNF".to_string();
    }

    let minutes = ms / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let centis = (ms % 1_000) / 10;

    let time_str = if minutes > 0 {
        format!("{}:{:02}.{:02}", minutes, seconds, centis)
    } else {
        format!("{}.{:02}", seconds, centis)
    };

    match penalty {
        Some(Penalty::PlusTwo) => format!("{}+", time_str),
        _ => time_str,
    }
}

/// Render a solve's effective time with its penalty marker.
pub fn format_solve(solve: &Solve) -> String {
    if solve.is_dnf() {
        return format_time(solve.time, solve.penalty);
    }
    format_time(effective_time(solve) as u32, solve.penalty)
}

/// Render a statistic, `-` when it is not available.
pub fn format_average(value: Option<f64>) -> String {
    match value {
        Some(ms) => format_time(ms.floor() as u32, None),
        None => "-".to_string(),
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// JavaScript bindings

#[wasm_bindgen(start)]
pub fn start() {
    // Route panics to the browser console
    console_error_panic_hook::set_once();
}

#[wasm_bindgen(js_name = generateScramble)]
pub fn js_generate_scramble(cube_type: &str) -> String {
    generate_scramble(cube_type)
}

#[wasm_bindgen(js_name = formatTime)]
pub fn js_format_time(ms: u32, penalty: Option<String>) -> String {
    format_time(ms, penalty.as_deref().and_then(Penalty::from_tag))
}

#[wasm_bindgen(js_name = generateId)]
pub fn js_generate_id() -> String {
    generate_id()
}

/// Compute `CubeStats` for an array of solve records from JavaScript.
#[wasm_bindgen(js_name = computeStats)]
pub fn js_compute_stats(solves_js: JsValue) -> Result<JsValue, JsValue> {
    let solves: Vec<Solve> = serde_wasm_bindgen::from_value(solves_js)
        .map_err(|e| JsValue::from_str(&format!("Failed to deserialize solves: {}", e)))?;

    serde_wasm_bindgen::to_value(&compute_stats(&solves))
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize stats: {}", e)))
}

/// Parse a typed result into `{ time, penalty }`.
#[wasm_bindgen(js_name = parseTimeEntry)]
pub fn js_parse_time_entry(input: &str) -> Result<JsValue, JsValue> {
    let entry = utils::parse_time_entry(input).map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_wasm_bindgen::to_value(&entry)
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize entry: {}", e)))
}

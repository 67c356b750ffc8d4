use std::collections::BTreeMap;
use std::time::Instant;

/// Observer for scan pipeline events.
///
/// Lets the session and use cases report what happened per frame without
/// knowing whether output goes to the `log` crate, a UI, or nowhere.
pub trait PipelineLogger: Send {
    /// One frame went through detection; `found` is whether a face was located.
    fn frame(&mut self, index: usize, found: bool);

    /// Scan progress in percent (0-100).
    fn progress(&mut self, percent: u32);

    /// How long a named stage took for one frame.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    fn info(&mut self, message: &str);

    /// End-of-scan report. Default: no-op.
    fn summary(&self) {}
}

/// Discards every event. Used by tests and embedders with their own UI.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn frame(&mut self, _index: usize, _found: bool) {}
    fn progress(&mut self, _percent: u32) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// Forwards events to the `log` crate and keeps per-stage statistics.
///
/// Misses are logged every `throttle_misses` frames so a long search for
/// a face does not flood the output.
pub struct StdoutPipelineLogger {
    throttle_misses: usize,
    hits: usize,
    misses: usize,
    last_progress: u32,
    timings: BTreeMap<String, Vec<f64>>,
    start_time: Instant,
}

impl StdoutPipelineLogger {
    pub fn new(throttle_misses: usize) -> Self {
        Self {
            throttle_misses: throttle_misses.max(1),
            hits: 0,
            misses: 0,
            last_progress: 0,
            timings: BTreeMap::new(),
            start_time: Instant::now(),
        }
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }

    pub fn last_progress(&self) -> u32 {
        self.last_progress
    }

    pub fn timings_for(&self, stage: &str) -> Option<&[f64]> {
        self.timings.get(stage).map(|v| v.as_slice())
    }

    /// Formatted report, or `None` before any frame was seen.
    pub fn summary_string(&self) -> Option<String> {
        let frames = self.hits + self.misses;
        if frames == 0 {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let mut lines = vec![format!(
            "Scan summary ({frames} frames, {} with a face, {:.1}s):",
            self.hits,
            elapsed_ms / 1000.0
        )];

        for (stage, durations) in &self.timings {
            let total_ms: f64 = durations.iter().sum();
            let avg_ms = total_ms / durations.len().max(1) as f64;
            lines.push(format!(
                "  {stage:12}: avg {avg_ms:6.2}ms  total {total_ms:7.1}ms"
            ));
        }
        lines.push(format!("  Progress: {}%", self.last_progress));

        Some(lines.join("\n"))
    }
}

impl Default for StdoutPipelineLogger {
    fn default() -> Self {
        Self::new(30)
    }
}

impl PipelineLogger for StdoutPipelineLogger {
    fn frame(&mut self, index: usize, found: bool) {
        if found {
            self.hits += 1;
            log::debug!("Frame {index}: face located");
        } else {
            self.misses += 1;
            if self.misses % self.throttle_misses == 0 {
                log::info!("Still searching for a face ({} frames without one)", self.misses);
            }
        }
    }

    fn progress(&mut self, percent: u32) {
        if percent != self.last_progress {
            log::info!("Scan progress: {percent}%");
        }
        self.last_progress = percent;
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings
            .entry(stage.to_string())
            .or_default()
            .push(duration_ms);
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}

//! Time-window sweep over departure slots.
//!
//! For each slot the sweep builds a request, asks the provider for routes,
//! picks the shortest one and writes one `<timestamp> <minutes>` line.

use std::{fmt, io::Write};

use chrono::{DateTime, Local, TimeDelta, Utc};
use thiserror::Error;

use super::config::ConfigError;
use super::routing::{
    Coordinate, RequestDefaults, RoutingError, RoutingProvider, TravelDuration, TravelMode,
};

#[derive(Error, Debug)]
pub enum SweepError {
    #[error("slice departing {departure} failed: {source}")]
    Slice {
        departure: DateTime<Utc>,
        #[source]
        source: RoutingError,
    },

    #[error("failed to write sweep output: {0}")]
    Output(#[from] std::io::Error),

    #[error("{failed} of {total} slices failed")]
    Incomplete { failed: usize, total: usize },
}

/// Departure slots: from `launch + offset`, every `step`, while strictly
/// before `launch + offset + span`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepWindow {
    offset: TimeDelta,
    span: TimeDelta,
    step: TimeDelta,
}

impl Default for SweepWindow {
    fn default() -> Self {
        Self {
            offset: TimeDelta::minutes(1),
            span: TimeDelta::hours(24),
            step: TimeDelta::minutes(10),
        }
    }
}

impl SweepWindow {
    pub fn new(offset: TimeDelta, span: TimeDelta, step: TimeDelta) -> Result<Self, ConfigError> {
        if step <= TimeDelta::zero() {
            return Err(ConfigError::ZeroStep);
        }
        Ok(Self { offset, span, step })
    }

    pub fn from_minutes(offset: u32, span_hours: u32, step: u32) -> Result<Self, ConfigError> {
        Self::new(
            TimeDelta::minutes(i64::from(offset)),
            TimeDelta::hours(i64::from(span_hours)),
            TimeDelta::minutes(i64::from(step)),
        )
    }

    pub fn slots(&self, launch: DateTime<Utc>) -> impl Iterator<Item = DateTime<Utc>> {
        let step = self.step;
        let start = launch.checked_add_signed(self.offset);
        let end = start.and_then(|start| start.checked_add_signed(self.span));
        std::iter::successors(start, move |cursor| cursor.checked_add_signed(step))
            .take_while(move |cursor| end.is_some_and(|end| *cursor < end))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Stop the whole sweep at the first failing slice.
    #[default]
    Abort,
    /// Log failing slices, keep sweeping, fail at the end.
    KeepGoing,
}

/// Shortest duration found for one departure slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliceReport {
    pub departure: DateTime<Utc>,
    pub duration: TravelDuration,
}

impl fmt::Display for SliceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            self.departure
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S %z"),
            self.duration.as_minutes_f64()
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SweepOutcome {
    pub reports: Vec<SliceReport>,
    pub failed: usize,
    pub total: usize,
}

impl SweepOutcome {
    /// Earliest slot with the smallest duration.
    pub fn best(&self) -> Option<&SliceReport> {
        self.reports
            .iter()
            .reduce(|best, report| if report.duration < best.duration { report } else { best })
    }

    pub fn into_result(self) -> Result<Vec<SliceReport>, SweepError> {
        if self.failed > 0 {
            return Err(SweepError::Incomplete {
                failed: self.failed,
                total: self.total,
            });
        }
        Ok(self.reports)
    }
}

#[derive(Debug, Clone)]
pub struct Sweep {
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub mode: TravelMode,
    pub defaults: RequestDefaults,
    pub window: SweepWindow,
    pub policy: ErrorPolicy,
}

impl Sweep {
    pub fn new(origin: Coordinate, destination: Coordinate, mode: TravelMode) -> Self {
        Self {
            origin,
            destination,
            mode,
            defaults: RequestDefaults::default(),
            window: SweepWindow::default(),
            policy: ErrorPolicy::default(),
        }
    }

    pub fn with_defaults(mut self, defaults: RequestDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn with_window(mut self, window: SweepWindow) -> Self {
        self.window = window;
        self
    }

    pub fn with_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Runs one slot: build, call, select.
    pub fn run_slice<P: RoutingProvider>(
        &self,
        provider: &P,
        departure: DateTime<Utc>,
    ) -> Result<SliceReport, RoutingError> {
        let request = self
            .defaults
            .build(departure, self.mode, self.origin, self.destination);
        let response = provider.compute_routes(&request)?;
        // Providers decode through `RouteResponse::decode`, which already
        // rejects empty lists; anything else is reported as it arrived.
        let duration = response.shortest().ok_or_else(|| RoutingError::NoRoutes {
            body: serde_json::to_string(&response).unwrap_or_default(),
        })?;
        log::debug!(
            "{} routes for {}, shortest {}",
            response.routes.len(),
            request.departure_time,
            duration
        );
        Ok(SliceReport {
            departure,
            duration,
        })
    }

    /// Sweeps every slot after `launch`, writing one line per successful slot.
    ///
    /// Under [`ErrorPolicy::Abort`] the first failure is returned and no later
    /// slot runs. Under [`ErrorPolicy::KeepGoing`] failures are counted in the
    /// outcome instead.
    pub fn run<P: RoutingProvider, W: Write>(
        &self,
        provider: &P,
        launch: DateTime<Utc>,
        out: &mut W,
    ) -> Result<SweepOutcome, SweepError> {
        let mut outcome = SweepOutcome::default();

        for departure in self.window.slots(launch) {
            outcome.total += 1;
            match self.run_slice(provider, departure) {
                Ok(report) => {
                    writeln!(out, "{report}")?;
                    outcome.reports.push(report);
                }
                Err(source) => match self.policy {
                    ErrorPolicy::Abort => return Err(SweepError::Slice { departure, source }),
                    ErrorPolicy::KeepGoing => {
                        log::error!("Slice departing {} failed: {}", departure, source);
                        outcome.failed += 1;
                    }
                },
            }
        }

        Ok(outcome)
    }
}

use std::cell::Cell;
use std::rc::Rc;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use gloo_timers::callback::Interval;
use log::{debug, warn};
use yew::prelude::*;

use crate::config;
use crate::error::ContentError;

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Start of the party. Parsed once, never changes afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TargetInstant(DateTime<Utc>);

impl TargetInstant {
    #[cfg(test)]
    pub fn new(at: DateTime<Utc>) -> Self {
        Self(at)
    }

    /// Accepts RFC 3339 with an offset, or a naive date/time that is read in
    /// `zone` (an IANA name) or, without one, in the viewer's local time.
    pub fn parse(raw: &str, zone: Option<&str>) -> Result<Self, ContentError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ContentError::MissingDate);
        }
        if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
            return Ok(Self(at.with_timezone(&Utc)));
        }

        let naive = parse_naive(raw).ok_or_else(|| ContentError::InvalidDate(raw.to_string()))?;
        let resolved = match zone.map(str::trim).filter(|z| !z.is_empty()) {
            Some(name) => {
                let tz: Tz = name
                    .parse()
                    .map_err(|_| ContentError::UnknownTimeZone(name.to_string()))?;
                tz.from_local_datetime(&naive).earliest().map(|at| at.with_timezone(&Utc))
            }
            None => Local.from_local_datetime(&naive).earliest().map(|at| at.with_timezone(&Utc)),
        };
        resolved
            .map(Self)
            .ok_or_else(|| ContentError::NonexistentLocalTime(raw.to_string()))
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.0
    }

    pub fn remaining_at(&self, now: DateTime<Utc>) -> TimeRemaining {
        compute(self.0, now)
    }
}

fn parse_naive(raw: &str) -> Option<NaiveDateTime> {
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TimeRemaining {
    pub days: u64,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl TimeRemaining {
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

/// Breaks the time left until `target` into days, hours, minutes and
/// seconds, truncating the sub-second rest. Once `now` reaches `target` the
/// result stays at zero.
pub fn compute(target: DateTime<Utc>, now: DateTime<Utc>) -> TimeRemaining {
    let delta = target.signed_duration_since(now).num_milliseconds();
    if delta <= 0 {
        return TimeRemaining::default();
    }

    let days = delta / MS_PER_DAY;
    let rest = delta % MS_PER_DAY;
    let hours = rest / MS_PER_HOUR;
    let rest = rest % MS_PER_HOUR;
    let minutes = rest / MS_PER_MINUTE;
    let seconds = (rest % MS_PER_MINUTE) / MS_PER_SECOND;

    TimeRemaining {
        days: days as u64,
        hours: hours as u32,
        minutes: minutes as u32,
        seconds: seconds as u32,
    }
}

/// A running countdown. Reports a value right away and then on every tick
/// of the scheduler `H`; dropping the task stops it.
pub struct CountdownTask<H> {
    live: Rc<Cell<bool>>,
    _ticker: H,
}

impl<H> CountdownTask<H> {
    /// `schedule` receives the tick closure and returns the handle that keeps
    /// it firing. The handle is dropped together with the task.
    pub fn start<C, F, S>(target: TargetInstant, clock: C, on_tick: F, schedule: S) -> Self
    where
        C: Fn() -> DateTime<Utc> + 'static,
        F: Fn(TimeRemaining) + 'static,
        S: FnOnce(Box<dyn FnMut()>) -> H,
    {
        on_tick(target.remaining_at(clock()));

        let live = Rc::new(Cell::new(true));
        let still_live = live.clone();
        let ticker = schedule(Box::new(move || {
            if still_live.get() {
                on_tick(target.remaining_at(clock()));
            }
        }));

        Self { live, _ticker: ticker }
    }
}

impl CountdownTask<Interval> {
    /// Browser countdown driven by the wall clock once per second.
    pub fn every_second<F>(target: TargetInstant, on_tick: F) -> Self
    where
        F: Fn(TimeRemaining) + 'static,
    {
        debug!("Starting countdown to {}", target.instant());
        Self::start(target, Utc::now, on_tick, |tick| {
            Interval::new(config::COUNTDOWN_TICK_MS, tick)
        })
    }
}

impl<H> Drop for CountdownTask<H> {
    fn drop(&mut self) {
        self.live.set(false);
    }
}

/// Time left until `target`, refreshed every second while the calling
/// component is mounted. Without a target the countdown shows zero.
#[hook]
pub fn use_countdown(target: Option<TargetInstant>) -> TimeRemaining {
    let remaining = use_state(|| {
        target
            .map(|target| target.remaining_at(Utc::now()))
            .unwrap_or_default()
    });

    {
        let setter = remaining.setter();
        use_effect_with_deps(
            move |target| {
                let task = match *target {
                    Some(target) => {
                        Some(CountdownTask::every_second(target, move |left| setter.set(left)))
                    }
                    None => {
                        warn!("No usable event date, countdown stays at zero");
                        None
                    }
                };
                move || {
                    if task.is_some() {
                        debug!("Stopping countdown");
                    }
                    drop(task);
                }
            },
            target,
        );
    }

    *remaining
}

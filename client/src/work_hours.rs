//! Weekly work-hours model and validation.
//!
//! Artists declare availability per day with two optional half-day windows.
//! Periods keep their `HH:MM` strings raw (they come straight from time
//! inputs); validation parses them on demand.

use serde::{Deserialize, Serialize};

/// The seven day names, in display order.
pub const DAY_NAMES: [&str; 7] = [
    "Segunda", "Terça", "Quarta", "Quinta", "Sexta", "Sábado", "Domingo",
];

/// Minutes from midnight where the afternoon begins.
const NOON_MINUTES: u32 = 12 * 60;

/// Which half-day window a value refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeriodKind {
    /// Before noon; must end by 11:59.
    Morning,
    /// From noon on; must start at 12:00 or later.
    Afternoon,
}

impl PeriodKind {
    /// Display name (pt-BR).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "manhã",
            Self::Afternoon => "tarde",
        }
    }
}

/// One half-day window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    /// Whether the window is offered.
    pub enabled: bool,
    /// Opening time, `HH:MM`.
    pub start: String,
    /// Closing time, `HH:MM`.
    pub end: String,
}

/// Availability for a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    /// Day name, one of [`DAY_NAMES`].
    pub day: String,
    /// Whether the artist works at all on this day.
    pub available: bool,
    /// Morning window.
    pub morning: Period,
    /// Afternoon window.
    pub afternoon: Period,
}

impl DaySchedule {
    /// An unavailable day with both windows disabled.
    #[must_use]
    pub fn closed(day: &str) -> Self {
        Self {
            day: day.to_string(),
            available: false,
            morning: Period::default(),
            afternoon: Period::default(),
        }
    }
}

/// The full week, always seven entries in [`DAY_NAMES`] order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekSchedule {
    /// Per-day entries.
    pub days: Vec<DaySchedule>,
}

impl WeekSchedule {
    /// Whether any day offers at least one enabled window.
    #[must_use]
    pub fn has_any_window(&self) -> bool {
        self.days
            .iter()
            .any(|d| d.available && (d.morning.enabled || d.afternoon.enabled))
    }
}

impl Default for WeekSchedule {
    fn default() -> Self {
        Self {
            days: DAY_NAMES.iter().map(|d| DaySchedule::closed(d)).collect(),
        }
    }
}

/// Why a schedule was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// No day offers any window at all.
    Empty,
    /// A present window violates format, ordering, or half-day boundaries.
    Malformed {
        /// Day the violation is on.
        day: String,
        /// Which window.
        period: PeriodKind,
        /// Short reason (pt-BR).
        reason: String,
    },
}

/// Parse `HH:MM` into minutes from midnight.
#[must_use]
pub fn parse_hhmm(value: &str) -> Option<u32> {
    let (hours, minutes) = value.split_once(':')?;
    if hours.len() != 2 || minutes.len() != 2 {
        return None;
    }

    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }

    Some(hours * 60 + minutes)
}

fn validate_period(day: &DaySchedule, kind: PeriodKind) -> Result<(), ScheduleError> {
    let period = match kind {
        PeriodKind::Morning => &day.morning,
        PeriodKind::Afternoon => &day.afternoon,
    };

    if !period.enabled {
        return Ok(());
    }

    let malformed = |reason: &str| ScheduleError::Malformed {
        day: day.day.clone(),
        period: kind,
        reason: reason.to_string(),
    };

    let (Some(start), Some(end)) = (parse_hhmm(&period.start), parse_hhmm(&period.end)) else {
        return Err(malformed("horário inválido"));
    };

    if start >= end {
        return Err(malformed("horário final deve ser após o inicial"));
    }

    match kind {
        PeriodKind::Morning => {
            if end >= NOON_MINUTES {
                return Err(malformed("período da manhã termina às 11:59"));
            }
        },
        PeriodKind::Afternoon => {
            if start < NOON_MINUTES {
                return Err(malformed("período da tarde começa às 12:00"));
            }
        },
    }

    Ok(())
}

/// Validate a full week.
///
/// An empty schedule (no enabled window on any available day) is its own
/// error kind; otherwise every enabled window of every available day must
/// parse, keep `start < end`, and stay inside its half-day boundary. A day
/// marked unavailable must have both windows disabled.
///
/// # Errors
///
/// Returns the first violation found, walking days in week order and
/// morning before afternoon.
pub fn validate_week(week: &WeekSchedule) -> Result<(), ScheduleError> {
    if !week.has_any_window() {
        return Err(ScheduleError::Empty);
    }

    for day in &week.days {
        if !day.available {
            if day.morning.enabled || day.afternoon.enabled {
                return Err(ScheduleError::Malformed {
                    day: day.day.clone(),
                    period: if day.morning.enabled {
                        PeriodKind::Morning
                    } else {
                        PeriodKind::Afternoon
                    },
                    reason: "dia indisponível com período ativo".to_string(),
                });
            }
            continue;
        }

        validate_period(day, PeriodKind::Morning)?;
        validate_period(day, PeriodKind::Afternoon)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn week_with(day: DaySchedule) -> WeekSchedule {
        let mut week = WeekSchedule::default();
        week.days[0] = day;
        week
    }

    fn open_day(morning: Option<(&str, &str)>, afternoon: Option<(&str, &str)>) -> DaySchedule {
        let window = |times: Option<(&str, &str)>| match times {
            Some((start, end)) => Period {
                enabled: true,
                start: start.to_string(),
                end: end.to_string(),
            },
            None => Period::default(),
        };

        DaySchedule {
            day: "Segunda".to_string(),
            available: true,
            morning: window(morning),
            afternoon: window(afternoon),
        }
    }

    #[test]
    fn test_empty_schedule_is_its_own_error() {
        assert_eq!(validate_week(&WeekSchedule::default()), Err(ScheduleError::Empty));
    }

    #[test]
    fn test_morning_window_accepted() {
        let week = week_with(open_day(Some(("07:00", "11:00")), None));
        assert_eq!(validate_week(&week), Ok(()));
    }

    #[test]
    fn test_end_before_start_rejected() {
        let week = week_with(open_day(Some(("09:00", "08:00")), None));
        assert!(matches!(
            validate_week(&week),
            Err(ScheduleError::Malformed {
                period: PeriodKind::Morning,
                ..
            })
        ));
    }

    #[test]
    fn test_morning_cannot_cross_noon() {
        let week = week_with(open_day(Some(("09:00", "12:30")), None));
        assert!(matches!(
            validate_week(&week),
            Err(ScheduleError::Malformed { .. })
        ));
    }

    #[test]
    fn test_afternoon_cannot_start_before_noon() {
        let week = week_with(open_day(None, Some(("11:00", "15:00"))));
        assert!(matches!(
            validate_week(&week),
            Err(ScheduleError::Malformed {
                period: PeriodKind::Afternoon,
                ..
            })
        ));
    }

    #[test]
    fn test_unavailable_day_with_enabled_window_is_malformed() {
        let mut day = open_day(Some(("08:00", "11:00")), None);
        day.available = false;
        // Another day carries a valid window so the schedule is not Empty.
        let mut week = week_with(day);
        week.days[1] = open_day(None, Some(("13:00", "18:00")));
        week.days[1].day = "Terça".to_string();

        assert!(matches!(
            validate_week(&week),
            Err(ScheduleError::Malformed { .. })
        ));
    }

    #[test]
    fn test_bad_time_format_rejected() {
        let week = week_with(open_day(Some(("7h00", "11:00")), None));
        assert!(matches!(
            validate_week(&week),
            Err(ScheduleError::Malformed { .. })
        ));
    }
}

//! The slice of GTFS this tool reads: `trips.txt` and `stop_times.txt` rows,
//! direction flags and `HH:MM:SS` departure times.

use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

pub const TRIPS_FILE: &str = "trips.txt";
pub const STOP_TIMES_FILE: &str = "stop_times.txt";

#[derive(Error, Debug)]
pub enum GtfsError {
    #[error("'{0}' is not a valid time")]
    InvalidTime(String),
    #[error("could not find table {}", .0.display())]
    MissingTable(PathBuf),
    #[error("trip {0} has no direction_id")]
    MissingDirection(String),
}

#[derive(Deserialize, Debug)]
pub struct Trip {
    pub route_id: String,
    pub service_id: String,
    pub trip_id: String,
    /// Only required for trips we keep; other routes may leave it blank.
    pub direction_id: Option<u8>,
}

#[derive(Deserialize, Debug)]
pub struct StopTime {
    pub trip_id: String,
    pub stop_id: u32,
    pub departure_time: String,
}

/// Direction of travel along the route.
///
/// The feed uses `0` for buses heading west (to Edwards / Beaver Creek) and
/// `1` for buses heading east (to Vail).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    West,
    East,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::West, Direction::East];

    /// Any flag other than `0` counts as east.
    pub fn from_flag(flag: u8) -> Self {
        if flag == 0 {
            Direction::West
        } else {
            Direction::East
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::West => "west",
            Direction::East => "east",
        }
    }
}

/// A scheduled departure as written in `stop_times.txt`.
///
/// Hours may exceed 23 for service after midnight. Ordering is by
/// seconds since midnight (hours taken literally), then by the raw text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DepartureTime {
    seconds: u32,
    raw: String,
}

impl DepartureTime {
    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// `H:MM` with the hour wrapped into a single day, so `25:10:00` is `1:10`.
    pub fn wall_clock(&self) -> String {
        let hour = (self.seconds / 3600) % 24;
        let minute = (self.seconds % 3600) / 60;
        format!("{hour}:{minute:02}")
    }
}

impl FromStr for DepartureTime {
    type Err = GtfsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mk_err = || GtfsError::InvalidTime(s.to_owned());

        let mut parts = s.split(':');
        let hour = parts.next().ok_or_else(mk_err)?;
        let min = parts.next().ok_or_else(mk_err)?;
        let sec = parts.next().ok_or_else(mk_err)?;
        if parts.next().is_some() || hour.is_empty() || min.len() != 2 || sec.len() != 2 {
            return Err(mk_err());
        }

        let parse = |part: &str| {
            if !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(mk_err());
            }
            part.parse::<u32>().map_err(|_| mk_err())
        };
        let (hours, minutes, seconds) = (parse(hour)?, parse(min)?, parse(sec)?);
        if minutes > 59 || seconds > 59 {
            return Err(mk_err());
        }

        let total = hours
            .checked_mul(3600)
            .and_then(|h| h.checked_add(minutes * 60 + seconds))
            .ok_or_else(mk_err)?;

        Ok(DepartureTime {
            seconds: total,
            raw: s.to_owned(),
        })
    }
}

//! Joins `trips` with `stop_times` and buckets departures per stop group and
//! direction.

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::gtfs::{
    DepartureTime, Direction, GtfsError, STOP_TIMES_FILE, StopTime, TRIPS_FILE, Trip,
};
use crate::route::{StopGroup, is_tracked_trip, tracked_stop_ids};

/// Departure per tracked stop, keyed by trip id.
pub type TripDepartures = HashMap<String, HashMap<u32, String>>;

/// Reads `trips.txt` and returns the direction of every trip on the route.
pub fn read_trips<R: Read>(reader: R) -> Result<HashMap<String, Direction>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut trips = HashMap::new();

    for result in rdr.deserialize() {
        let trip: Trip = result?;
        if !is_tracked_trip(&trip.route_id, &trip.service_id) {
            continue;
        }

        let flag = trip
            .direction_id
            .ok_or_else(|| GtfsError::MissingDirection(trip.trip_id.clone()))?;
        trips.insert(trip.trip_id, Direction::from_flag(flag));
    }

    Ok(trips)
}

/// Reads `stop_times.txt`, keeping departures of `trips` at tracked stops.
///
/// A repeated (trip, stop) pair keeps the last row.
pub fn read_departures<R: Read>(
    reader: R,
    trips: &HashMap<String, Direction>,
) -> Result<TripDepartures> {
    let tracked = tracked_stop_ids();
    let mut rdr = csv::Reader::from_reader(reader);
    let mut departures: TripDepartures = HashMap::new();

    for result in rdr.deserialize() {
        let row: StopTime = result?;
        if !trips.contains_key(&row.trip_id) || !tracked.contains(&row.stop_id) {
            continue;
        }

        departures
            .entry(row.trip_id)
            .or_default()
            .insert(row.stop_id, row.departure_time);
    }

    Ok(departures)
}

/// Unique departures per stop group and direction.
#[derive(Debug, Default)]
pub struct Schedule {
    times: BTreeMap<(StopGroup, Direction), BTreeSet<DepartureTime>>,
}

impl Schedule {
    /// Loads `trips.txt` and `stop_times.txt` from an extracted feed directory.
    #[tracing::instrument(skip_all, fields(dir = %dir.display()))]
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let trips = open_table(dir, TRIPS_FILE)?;
        let stop_times = open_table(dir, STOP_TIMES_FILE)?;
        Self::from_readers(trips, stop_times)
    }

    pub fn from_readers<T: Read, S: Read>(trips: T, stop_times: S) -> Result<Self> {
        let trips = read_trips(trips).context("failed to read trips")?;
        info!(trips = trips.len(), "Route trips selected");

        let departures = read_departures(stop_times, &trips).context("failed to read stop times")?;
        debug!(trips_with_stops = departures.len(), "Departures collected");

        Self::from_trips(&trips, &departures)
    }

    /// Buckets each trip's departures into the stop groups it serves.
    pub fn from_trips(
        trips: &HashMap<String, Direction>,
        departures: &TripDepartures,
    ) -> Result<Self> {
        let mut schedule = Schedule::default();

        for (trip_id, stops) in departures {
            let Some(&direction) = trips.get(trip_id) else {
                continue;
            };

            for group in StopGroup::ALL {
                if let Some(raw) = stops.get(&group.stop_id(direction)) {
                    let time: DepartureTime = raw.parse()?;
                    schedule.insert(group, direction, time);
                }
            }
        }

        Ok(schedule)
    }

    pub fn insert(&mut self, group: StopGroup, direction: Direction, time: DepartureTime) {
        self.times.entry((group, direction)).or_default().insert(time);
    }

    /// Formatted departures for one group and direction.
    ///
    /// Sorted by time of day before wrapping, so after-midnight service
    /// stays at the end. Times that format identically are printed once,
    /// at the position of the earliest.
    pub fn times(&self, group: StopGroup, direction: Direction) -> Vec<String> {
        let Some(times) = self.times.get(&(group, direction)) else {
            return Vec::new();
        };

        let mut seen = HashSet::new();
        times
            .iter()
            .map(DepartureTime::wall_clock)
            .filter(|t| seen.insert(t.clone()))
            .collect()
    }

    pub fn timetable(&self) -> Timetable {
        let groups = StopGroup::ALL
            .into_iter()
            .map(|group| {
                let times = DirectionTimes {
                    west: self.times(group, Direction::West),
                    east: self.times(group, Direction::East),
                };
                (group, times)
            })
            .collect();

        Timetable { groups }
    }
}

fn open_table(dir: &Path, name: &str) -> Result<File> {
    let path = dir.join(name);
    if !path.exists() {
        return Err(GtfsError::MissingTable(path).into());
    }
    File::open(&path).with_context(|| format!("failed to open {}", path.display()))
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct DirectionTimes {
    pub west: Vec<String>,
    pub east: Vec<String>,
}

impl DirectionTimes {
    pub fn get(&self, direction: Direction) -> &[String] {
        match direction {
            Direction::West => &self.west,
            Direction::East => &self.east,
        }
    }
}

/// Formatted departures for every stop group, in output order.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Timetable {
    groups: BTreeMap<StopGroup, DirectionTimes>,
}

impl Timetable {
    pub fn group(&self, group: StopGroup) -> &DirectionTimes {
        static EMPTY: DirectionTimes = DirectionTimes {
            west: Vec::new(),
            east: Vec::new(),
        };
        self.groups.get(&group).unwrap_or(&EMPTY)
    }

    pub fn iter(&self) -> impl Iterator<Item = (StopGroup, &DirectionTimes)> {
        self.groups.iter().map(|(group, times)| (*group, times))
    }
}

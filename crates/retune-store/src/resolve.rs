use tracing::debug;

use retune_types::{Direction, StoreTime};

use crate::error::{StoreError, StoreResult};
use crate::traits::StoreBackend;

/// The backward walk gives up once it crosses this year — the store range
/// starts at the invention of the laser.
const LOWER_BOUND_YEAR: i32 = 1960;

/// The forward walk gives up this many years past the current year.
const UPPER_BOUND_YEARS_AHEAD: i32 = 20;

/// Find the stamp of the snapshot closest to `time` on the requested side,
/// inclusive of `time` itself.
///
/// Walks month directories outward from `time`'s (year, month): each month's
/// stamps are parsed, sorted, and scanned in the search direction for the
/// first entry on the correct side of `time`; if none qualifies the walk
/// steps to the adjacent month, carrying year rollover. Collisions cannot
/// produce ties because the writer retries duplicate stamps at creation.
pub(crate) fn resolve_time<B: StoreBackend>(
    backend: &B,
    name: &str,
    time: StoreTime,
    direction: Direction,
) -> StoreResult<StoreTime> {
    if !backend.instrument_exists(name)? {
        return Err(StoreError::NotFound {
            name: name.to_string(),
        });
    }

    let upper_bound_year = StoreTime::now().year() + UPPER_BOUND_YEARS_AHEAD;
    let mut year = time.year();
    let mut month = time.month();

    loop {
        let mut stamps = Vec::new();
        for entry in backend.list_month(name, year, month)? {
            match StoreTime::parse_stamp(&entry) {
                Ok(stamp) => stamps.push(stamp),
                Err(_) => debug!(name, entry = %entry, "skipping non-stamp directory entry"),
            }
        }
        stamps.sort_unstable();

        let hit = match direction {
            Direction::Backward => stamps.iter().rev().find(|&&stamp| stamp <= time),
            Direction::Forward => stamps.iter().find(|&&stamp| stamp >= time),
        };
        if let Some(&stamp) = hit {
            debug!(name, time = %time, %direction, stamp = %stamp, "resolved snapshot");
            return Ok(stamp);
        }

        match direction {
            Direction::Backward => {
                if month == 1 {
                    year -= 1;
                    month = 12;
                } else {
                    month -= 1;
                }
                if year < LOWER_BOUND_YEAR {
                    return Err(StoreError::OutOfRange {
                        name: name.to_string(),
                        time,
                        direction,
                    });
                }
            }
            Direction::Forward => {
                if month == 12 {
                    year += 1;
                    month = 1;
                } else {
                    month += 1;
                }
                if year > upper_bound_year {
                    return Err(StoreError::OutOfRange {
                        name: name.to_string(),
                        time,
                        direction,
                    });
                }
            }
        }
    }
}

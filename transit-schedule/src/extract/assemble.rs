//! Final result assembly.

use serde::{Deserialize, Serialize};

use crate::domain::{Direction, DirectionCodes, Schedule, SubrouteSet, ValidAsOf};

use super::error::{ExtractError, ExtractWarning, MetadataField};
use super::metadata::ScheduleMetadata;

/// A fully extracted schedule page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResult {
    /// Date the schedule is in effect from.
    pub valid_as_of: ValidAsOf,

    /// Stop entries per station.
    pub schedules: Schedule,

    /// Route variants appearing in the grid.
    pub subroutes: Vec<String>,

    /// Direction of this schedule.
    pub direction: Direction,

    /// Every direction the page offers.
    pub available_directions: DirectionCodes,

    /// Recoverable anomalies met during extraction.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ExtractWarning>,
}

/// Combine the outputs of all passes, failing if anything required is
/// missing.
pub fn assemble(
    metadata: ScheduleMetadata,
    schedules: Schedule,
    subroutes: SubrouteSet,
) -> Result<ScheduleResult, ExtractError> {
    let ScheduleMetadata {
        valid_as_of,
        direction,
        available_directions,
        warnings,
    } = metadata;

    let valid_as_of =
        valid_as_of.ok_or(ExtractError::UnresolvedMetadata(MetadataField::ValidAsOf))?;
    let direction = direction.ok_or(ExtractError::UnresolvedMetadata(MetadataField::Direction))?;
    if available_directions.is_empty() {
        return Err(ExtractError::UnresolvedMetadata(
            MetadataField::AvailableDirections,
        ));
    }
    if !schedules.has_entries() {
        return Err(ExtractError::EmptySchedule);
    }

    Ok(ScheduleResult {
        valid_as_of,
        schedules,
        subroutes: subroutes.into_vec(),
        direction,
        available_directions,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RETURN_SUFFIX, StopEntry};

    fn metadata() -> ScheduleMetadata {
        let mut available = DirectionCodes::new();
        available.push(Direction::North);
        available.push(Direction::South);
        ScheduleMetadata {
            valid_as_of: Some(ValidAsOf::new("January 5, 2024")),
            direction: Some(Direction::South),
            available_directions: available,
            warnings: Vec::new(),
        }
    }

    fn schedule() -> Schedule {
        let mut s = Schedule::new();
        s.register("Main St".into(), RETURN_SUFFIX);
        s.column_mut(0)
            .unwrap()
            .push(StopEntry::new("8:00", Some("B".into())));
        s
    }

    fn subroutes() -> SubrouteSet {
        let mut set = SubrouteSet::new();
        set.insert("B");
        set
    }

    #[test]
    fn assembles_complete_result() {
        let result = assemble(metadata(), schedule(), subroutes()).unwrap();
        assert_eq!(result.valid_as_of.as_str(), "January 5, 2024");
        assert_eq!(result.direction, Direction::South);
        assert_eq!(result.available_directions.to_string(), "N-S");
        assert_eq!(result.subroutes, vec!["B".to_string()]);
    }

    #[test]
    fn missing_validity_fails() {
        let m = ScheduleMetadata {
            valid_as_of: None,
            ..metadata()
        };
        let err = assemble(m, schedule(), subroutes()).unwrap_err();
        assert!(matches!(
            err,
            ExtractError::UnresolvedMetadata(MetadataField::ValidAsOf)
        ));
    }

    #[test]
    fn missing_direction_fails() {
        let m = ScheduleMetadata {
            direction: None,
            ..metadata()
        };
        let err = assemble(m, schedule(), subroutes()).unwrap_err();
        assert!(matches!(
            err,
            ExtractError::UnresolvedMetadata(MetadataField::Direction)
        ));
    }

    #[test]
    fn missing_available_directions_fails() {
        let m = ScheduleMetadata {
            available_directions: DirectionCodes::new(),
            ..metadata()
        };
        let err = assemble(m, schedule(), subroutes()).unwrap_err();
        assert!(matches!(
            err,
            ExtractError::UnresolvedMetadata(MetadataField::AvailableDirections)
        ));
    }

    #[test]
    fn stations_without_stops_fail() {
        let mut empty = Schedule::new();
        empty.register("Main St".into(), RETURN_SUFFIX);
        let err = assemble(metadata(), empty, SubrouteSet::new()).unwrap_err();
        assert!(matches!(err, ExtractError::EmptySchedule));
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let result = assemble(metadata(), schedule(), subroutes()).unwrap();
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["validAsOf"], "January 5, 2024");
        assert_eq!(json["direction"], "S");
        assert_eq!(json["availableDirections"], "N-S");
        assert_eq!(json["subroutes"][0], "B");
        assert_eq!(json["schedules"]["Main St"][0]["time"], "8:00");
        assert_eq!(json["schedules"]["Main St"][0]["route"], "B");
        assert!(json.get("warnings").is_none());
    }
}

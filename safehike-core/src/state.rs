use crate::report::HikingReport;
use serde::{Deserialize, Serialize};

/// The fixed session record for one hiking conversation.
///
/// Every agent's input and output is a named field here; there are no
/// dynamic keys. `trail` and `current_date` are overwritten at the start of
/// each planner turn, the report fields are written exactly once per
/// pipeline run by the agent that owns them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HikeState {
    /// Mountain the user plans to hike, as the user named it.
    pub mountain: Option<String>,
    /// Hiking dates as `YYYY-MM-DD` strings, in the order the user gave
    /// them. Stored verbatim — no validation or reformatting.
    pub hiking_dates: Vec<String>,
    /// Trail preference. `None` means no preference; reset every turn.
    pub trail: Option<String>,
    /// Today's date (`YYYY-MM-DD`), stamped at the start of every turn so
    /// relative dates in user input resolve against the real clock.
    pub current_date: Option<String>,
    pub weather_report: Option<String>,
    pub news_report: Option<String>,
    pub info_links: Option<String>,
    pub trail_report: Option<String>,
    pub hiking_report: Option<HikingReport>,
}

/// The closed vocabulary of state mutations. Events carry deltas rather
/// than mutating state directly, so the durable session record and the live
/// invocation state are updated by the same code path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum StateDelta {
    Mountain(String),
    HikingDates(Vec<String>),
    Trail(Option<String>),
    CurrentDate(String),
    WeatherReport(String),
    NewsReport(String),
    InfoLinks(String),
    TrailReport(String),
    HikingReport(HikingReport),
}

impl HikeState {
    pub fn apply(&mut self, delta: &StateDelta) {
        match delta {
            StateDelta::Mountain(v) => self.mountain = Some(v.clone()),
            StateDelta::HikingDates(v) => self.hiking_dates = v.clone(),
            StateDelta::Trail(v) => self.trail = v.clone(),
            StateDelta::CurrentDate(v) => self.current_date = Some(v.clone()),
            StateDelta::WeatherReport(v) => self.weather_report = Some(v.clone()),
            StateDelta::NewsReport(v) => self.news_report = Some(v.clone()),
            StateDelta::InfoLinks(v) => self.info_links = Some(v.clone()),
            StateDelta::TrailReport(v) => self.trail_report = Some(v.clone()),
            StateDelta::HikingReport(v) => self.hiking_report = Some(v.clone()),
        }
    }

    pub fn apply_all(&mut self, deltas: &[StateDelta]) {
        for delta in deltas {
            self.apply(delta);
        }
    }
}

/// Which report field a research agent owns. Each pipeline member writes
/// exactly one slot, and the slots are disjoint, so the parallel group has
/// no write-write conflicts by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportSlot {
    Weather,
    News,
    Links,
    Trail,
}

impl ReportSlot {
    /// The delta that writes this slot.
    pub fn delta(self, text: String) -> StateDelta {
        match self {
            ReportSlot::Weather => StateDelta::WeatherReport(text),
            ReportSlot::News => StateDelta::NewsReport(text),
            ReportSlot::Links => StateDelta::InfoLinks(text),
            ReportSlot::Trail => StateDelta::TrailReport(text),
        }
    }

    /// Read this slot out of a state record.
    pub fn get(self, state: &HikeState) -> Option<&str> {
        match self {
            ReportSlot::Weather => state.weather_report.as_deref(),
            ReportSlot::News => state.news_report.as_deref(),
            ReportSlot::Links => state.info_links.as_deref(),
            ReportSlot::Trail => state.trail_report.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mountain_overwrite_is_exact() {
        let mut state = HikeState::default();
        state.apply(&StateDelta::Mountain("富士山".to_string()));
        assert_eq!(state.mountain.as_deref(), Some("富士山"));

        state.apply(&StateDelta::Mountain("石割山".to_string()));
        assert_eq!(state.mountain.as_deref(), Some("石割山"));
    }

    #[test]
    fn test_hiking_dates_preserve_order_and_values() {
        let mut state = HikeState::default();
        let dates = vec![
            "2025-07-12".to_string(),
            "2025-07-10".to_string(),
            "2025-07-11".to_string(),
        ];
        state.apply(&StateDelta::HikingDates(dates.clone()));
        assert_eq!(state.hiking_dates, dates);
    }

    #[test]
    fn test_trail_reset_clears_prior_value() {
        let mut state = HikeState {
            trail: Some("吉田ルート".to_string()),
            ..Default::default()
        };
        state.apply(&StateDelta::Trail(None));
        assert_eq!(state.trail, None);
    }

    #[test]
    fn test_apply_all_in_order() {
        let mut state = HikeState::default();
        state.apply_all(&[
            StateDelta::CurrentDate("2025-07-01".to_string()),
            StateDelta::CurrentDate("2025-07-02".to_string()),
        ]);
        assert_eq!(state.current_date.as_deref(), Some("2025-07-02"));
    }

    #[test]
    fn test_slot_delta_and_get_agree() {
        let slots = [
            ReportSlot::Weather,
            ReportSlot::News,
            ReportSlot::Links,
            ReportSlot::Trail,
        ];
        for slot in slots {
            let mut state = HikeState::default();
            state.apply(&slot.delta("report text".to_string()));
            assert_eq!(slot.get(&state), Some("report text"));
        }
    }

    #[test]
    fn test_slots_are_disjoint() {
        let mut state = HikeState::default();
        state.apply(&ReportSlot::Weather.delta("w".to_string()));
        assert_eq!(ReportSlot::News.get(&state), None);
        assert_eq!(ReportSlot::Links.get(&state), None);
        assert_eq!(ReportSlot::Trail.get(&state), None);
    }

    #[test]
    fn test_delta_serde_roundtrip() {
        let delta = StateDelta::Trail(Some("お中道".to_string()));
        let json = serde_json::to_string(&delta).unwrap();
        let decoded: StateDelta = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, delta);
    }
}

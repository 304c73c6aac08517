use weather_core::{DailyWeather, ForecastResult, LocationInfo};

/// Process-local viewer state: the latest forecast, the selection cursor and
/// the refresh status. Owned by the run loop and mutated only through the
/// operations below.
#[derive(Debug, Default)]
pub struct ViewerState {
    days: Vec<DailyWeather>,
    location: Option<LocationInfo>,
    selected: usize,
    loading: bool,
    error: Option<String>,
}

impl ViewerState {
    pub fn new() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    /// Successful refresh: the new result replaces the old one wholesale.
    pub fn apply_result(&mut self, result: ForecastResult) {
        self.location = Some(result.location);
        self.days = result.days;
        self.error = None;
        self.loading = false;
    }

    /// Failed refresh: keep the previous data visible, surface the message.
    pub fn apply_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.loading = false;
    }

    /// Mark a manual retry as in flight; the caller triggers the fetch.
    pub fn begin_retry(&mut self) {
        self.loading = true;
    }

    pub fn select_next(&mut self) {
        if self.days.is_empty() {
            return;
        }
        self.selected = (self.selected_index() + 1) % self.days.len();
    }

    pub fn select_previous(&mut self) {
        if self.days.is_empty() {
            return;
        }
        let len = self.days.len();
        self.selected = (self.selected_index() + len - 1) % len;
    }

    /// Direct selection from the strip.
    pub fn select_index(&mut self, index: usize) {
        self.selected = index;
    }

    /// The rendered cursor. Always reduced modulo `days.len()`, so a refresh
    /// that shrinks the sequence can never index out of range.
    pub fn selected_index(&self) -> usize {
        if self.days.is_empty() {
            0
        } else {
            self.selected % self.days.len()
        }
    }

    pub fn selected_day(&self) -> Option<&DailyWeather> {
        self.days.get(self.selected_index())
    }

    pub fn days(&self) -> &[DailyWeather] {
        &self.days
    }

    pub fn location(&self) -> Option<&LocationInfo> {
        self.location.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(label: &str) -> DailyWeather {
        DailyWeather {
            date: label.to_string(),
            temperature: 20,
            condition: "Clear".to_string(),
            description: "clear sky".to_string(),
            humidity: 50,
            wind_speed: 1.0,
            icon: "01d".to_string(),
        }
    }

    fn result(n: usize) -> ForecastResult {
        ForecastResult {
            location: LocationInfo {
                name: "Jianye".to_string(),
                country: "CN".to_string(),
            },
            days: (0..n).map(|i| day(&format!("day-{i}"))).collect(),
        }
    }

    #[test]
    fn starts_loading_and_empty() {
        let state = ViewerState::new();
        assert!(state.is_loading());
        assert!(state.days().is_empty());
        assert!(state.location().is_none());
        assert!(state.error().is_none());
        assert!(state.selected_day().is_none());
    }

    #[test]
    fn successful_refresh_replaces_data_and_clears_error() {
        let mut state = ViewerState::new();
        state.apply_error("boom");
        state.apply_result(result(3));

        assert!(!state.is_loading());
        assert!(state.error().is_none());
        assert_eq!(state.days().len(), 3);
        assert_eq!(state.location().unwrap().name, "Jianye");
    }

    #[test]
    fn failed_refresh_keeps_stale_data() {
        let mut state = ViewerState::new();
        state.apply_result(result(3));
        state.select_index(2);

        state.apply_error("server unreachable");

        assert_eq!(state.error(), Some("server unreachable"));
        assert_eq!(state.days().len(), 3);
        assert_eq!(state.selected_day().unwrap().date, "day-2");
    }

    #[test]
    fn next_wraps_from_last_to_first() {
        let mut state = ViewerState::new();
        state.apply_result(result(4));
        state.select_index(3);

        state.select_next();
        assert_eq!(state.selected_index(), 0);
    }

    #[test]
    fn previous_wraps_from_first_to_last() {
        let mut state = ViewerState::new();
        state.apply_result(result(4));

        state.select_previous();
        assert_eq!(state.selected_index(), 3);
    }

    #[test]
    fn next_then_previous_round_trips_from_any_index() {
        let mut state = ViewerState::new();
        state.apply_result(result(5));

        for start in 0..5 {
            state.select_index(start);
            state.select_next();
            state.select_previous();
            assert_eq!(state.selected_index(), start);
        }
    }

    #[test]
    fn selection_on_empty_days_is_a_no_op() {
        let mut state = ViewerState::new();
        state.select_next();
        state.select_previous();
        assert_eq!(state.selected_index(), 0);
    }

    #[test]
    fn shrinking_refresh_never_indexes_out_of_range() {
        let mut state = ViewerState::new();
        state.apply_result(result(7));
        state.select_index(6);

        state.apply_result(result(4));

        assert!(state.selected_index() < 4);
        assert!(state.selected_day().is_some());
    }

    #[test]
    fn displayed_detail_tracks_most_recent_refresh() {
        let mut state = ViewerState::new();
        state.apply_result(result(3));
        state.select_index(1);

        let mut second = result(3);
        second.days[1].date = "replaced".to_string();
        state.apply_result(second);

        assert_eq!(state.selected_day().unwrap().date, "replaced");
    }

    #[test]
    fn retry_sets_loading_without_touching_data() {
        let mut state = ViewerState::new();
        state.apply_result(result(2));
        state.apply_error("boom");

        state.begin_retry();

        assert!(state.is_loading());
        assert_eq!(state.days().len(), 2);
    }
}

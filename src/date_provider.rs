use chrono::{DateTime, NaiveDate, Timelike, Utc};

/// Trait for providing the current date/time to the store
/// This allows for flexible date handling (system time, overrides, etc.)
pub trait DateProvider: Send + Sync {
    /// Get the current date/time
    fn get_current_time(&self) -> DateTime<Utc>;
}

/// Default date provider that uses the system's current date/time
pub struct SystemDateProvider;

impl DateProvider for SystemDateProvider {
    fn get_current_time(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Date provider that uses an overridden date instead of system time
/// Preserves the current hours/minutes/seconds from system time
pub struct OverrideDateProvider {
    override_date: NaiveDate,
}

impl OverrideDateProvider {
    pub fn new(override_date: NaiveDate) -> Self {
        Self { override_date }
    }
}

impl DateProvider for OverrideDateProvider {
    fn get_current_time(&self) -> DateTime<Utc> {
        let now = Utc::now();
        let naive_datetime = self
            .override_date
            .and_hms_opt(now.hour(), now.minute(), now.second())
            .unwrap_or_else(|| self.override_date.and_hms_opt(0, 0, 0).unwrap());
        DateTime::from_naive_utc_and_offset(naive_datetime, Utc)
    }
}

/// Date provider pinned to an exact instant, for deterministic tests
pub struct FixedDateProvider {
    instant: DateTime<Utc>,
}

impl FixedDateProvider {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Self {
        let instant = NaiveDate::from_ymd_opt(year, month, day)
            .expect("valid date")
            .and_hms_opt(12, 0, 0)
            .unwrap()
            .and_utc();
        Self { instant }
    }
}

impl DateProvider for FixedDateProvider {
    fn get_current_time(&self) -> DateTime<Utc> {
        self.instant
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_date_provider_returns_current_time() {
        let provider = SystemDateProvider;
        let time1 = provider.get_current_time();
        let time2 = provider.get_current_time();

        // Times should be very close (within a second)
        assert!((time2 - time1).num_seconds() <= 1);
    }

    #[test]
    fn test_override_date_provider_uses_override_date() {
        let override_date = NaiveDate::from_ymd_opt(2026, 3, 18).unwrap();
        let provider = OverrideDateProvider::new(override_date);
        let time = provider.get_current_time();

        assert_eq!(time.format("%Y-%m-%d").to_string(), "2026-03-18");
    }

    #[test]
    fn test_fixed_date_provider_is_stable() {
        let provider = FixedDateProvider::from_ymd(2026, 1, 15);
        let time1 = provider.get_current_time();
        let time2 = provider.get_current_time();

        assert_eq!(time1, time2);
        assert_eq!(time1.format("%Y-%m-%d").to_string(), "2026-01-15");
    }
}

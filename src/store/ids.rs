/// Millisecond-timestamp ids that never repeat within one store.
///
/// Each id is `max(now, last + 1)`, seeded from the largest numeric id already
/// present, so records created in the same millisecond still get distinct ids.
#[derive(Debug, Clone, Default)]
pub(crate) struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    pub(crate) fn seeded<'a>(existing: impl IntoIterator<Item = &'a str>) -> Self {
        let last = existing
            .into_iter()
            .filter_map(|id| id.parse::<i64>().ok())
            .max()
            .unwrap_or(0);
        Self { last }
    }

    pub(crate) fn next_id(&mut self) -> String {
        self.next_at(chrono::Utc::now().timestamp_millis())
    }

    pub(crate) fn next_at(&mut self, now_ms: i64) -> String {
        let id = now_ms.max(self.last.saturating_add(1));
        self.last = id;
        id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uses_clock_when_ahead() {
        let mut ids = IdGenerator::default();
        assert_eq!(ids.next_at(1_700_000_000_000), "1700000000000");
        assert_eq!(ids.next_at(1_700_000_000_005), "1700000000005");
    }

    #[test]
    fn test_same_millisecond_bumps() {
        let mut ids = IdGenerator::default();
        assert_eq!(ids.next_at(1000), "1000");
        assert_eq!(ids.next_at(1000), "1001");
        assert_eq!(ids.next_at(1000), "1002");
    }

    #[test]
    fn test_clock_going_backwards() {
        let mut ids = IdGenerator::default();
        assert_eq!(ids.next_at(5000), "5000");
        assert_eq!(ids.next_at(4000), "5001");
    }

    #[test]
    fn test_seeded_from_existing() {
        let mut ids = IdGenerator::seeded(["1200", "not-a-number", "1500", "900"]);
        assert_eq!(ids.next_at(1000), "1501");
    }

    #[test]
    fn test_seeded_empty() {
        let mut ids = IdGenerator::seeded(std::iter::empty());
        assert_eq!(ids.next_at(42), "42");
    }
}

//! In-memory mood tracker.

use chrono::{DateTime, Utc};

use sleepyhead_types::mood::{Mood, MoodEntry};

/// Mood history for the current session, oldest first.
#[derive(Debug, Default)]
pub struct MoodLog {
    entries: Vec<MoodEntry>,
}

impl MoodLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, mood: Mood, recorded_at: DateTime<Utc>) {
        self.entries.push(MoodEntry { mood, recorded_at });
    }

    /// Entries with the most recent first, the way the history is displayed.
    pub fn newest_first(&self) -> impl Iterator<Item = &MoodEntry> {
        self.entries.iter().rev()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_newest_first() {
        let mut log = MoodLog::new();
        assert!(log.is_empty());

        let t0 = Utc::now();
        log.record(Mood::Sad, t0);
        log.record(Mood::Neutral, t0 + Duration::minutes(5));
        log.record(Mood::Happy, t0 + Duration::minutes(10));

        let moods: Vec<Mood> = log.newest_first().map(|e| e.mood).collect();
        assert_eq!(moods, vec![Mood::Happy, Mood::Neutral, Mood::Sad]);
    }
}

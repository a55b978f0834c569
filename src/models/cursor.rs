//! Timestamp cursor for incremental polling.

use chrono::Utc;

/// Unix timestamp up to which homework updates have been consumed.
///
/// Never moves backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollCursor(i64);

impl PollCursor {
    pub fn new(start: i64) -> Self {
        Self(start)
    }

    /// Cursor positioned at the current wall-clock time.
    pub fn now() -> Self {
        Self(Utc::now().timestamp())
    }

    pub fn value(self) -> i64 {
        self.0
    }

    /// Move to `current_date` if the API sent one that is not older.
    ///
    /// Returns `true` when the value changed.
    pub fn advance(&mut self, current_date: Option<i64>) -> bool {
        match current_date {
            Some(next) if next > self.0 => {
                self.0 = next;
                true
            }
            Some(next) if next < self.0 => {
                log::warn!(
                    "Ignoring out-of-order current_date {} (cursor at {})",
                    next,
                    self.0
                );
                false
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_forward() {
        let mut cursor = PollCursor::new(100);
        assert!(cursor.advance(Some(200)));
        assert_eq!(cursor.value(), 200);
    }

    #[test]
    fn never_decreases() {
        let mut cursor = PollCursor::new(100);
        for date in [Some(50), None, Some(100), Some(99)] {
            assert!(!cursor.advance(date));
            assert_eq!(cursor.value(), 100);
        }
    }

    #[test]
    fn monotonic_over_sequence() {
        let mut cursor = PollCursor::new(0);
        let mut last = cursor.value();
        for date in [Some(10), Some(5), None, Some(30), Some(20), Some(31)] {
            cursor.advance(date);
            assert!(cursor.value() >= last);
            last = cursor.value();
        }
        assert_eq!(cursor.value(), 31);
    }
}

use chrono::{DateTime, Duration, Utc};

/// How long a notice stays on screen before it dismisses itself.
pub const NOTICE_TTL_MS: u32 = 4_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub level: NoticeLevel,
    pub message: String,
    pub expires_at: DateTime<Utc>,
}

/// Transient user-facing messages, oldest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoticeBoard {
    next_id: u64,
    notices: Vec<Notice>,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Post a notice that expires [`NOTICE_TTL_MS`] after `now`. Returns its id.
    pub fn raise(&mut self, level: NoticeLevel, message: impl Into<String>, now: DateTime<Utc>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.notices.push(Notice {
            id,
            level,
            message: message.into(),
            expires_at: now + Duration::milliseconds(i64::from(NOTICE_TTL_MS)),
        });
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.notices.retain(|n| n.id != id);
    }

    /// Drop every notice whose expiry is at or before `now`.
    pub fn expire(&mut self, now: DateTime<Utc>) {
        self.notices.retain(|n| n.expires_at > now);
    }

    pub fn active(&self) -> &[Notice] {
        &self.notices
    }

    pub fn len(&self) -> usize {
        self.notices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::{NOTICE_TTL_MS, NoticeBoard, NoticeLevel};

    #[test]
    fn notices_expire_after_ttl() {
        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let mut board = NoticeBoard::new();
        board.raise(NoticeLevel::Warning, "No route found", t0);

        board.expire(t0 + Duration::milliseconds(i64::from(NOTICE_TTL_MS) - 1));
        assert_eq!(board.len(), 1);

        board.expire(t0 + Duration::milliseconds(i64::from(NOTICE_TTL_MS)));
        assert!(board.is_empty());
    }

    #[test]
    fn dismiss_removes_only_that_notice() {
        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let mut board = NoticeBoard::new();
        let first = board.raise(NoticeLevel::Info, "one", t0);
        let second = board.raise(NoticeLevel::Info, "two", t0);
        assert_ne!(first, second);

        board.dismiss(first);
        let remaining: Vec<_> = board.active().iter().map(|n| n.message.as_str()).collect();
        assert_eq!(remaining, ["two"]);
    }
}

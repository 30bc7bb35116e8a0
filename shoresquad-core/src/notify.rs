use std::time::{Duration, Instant};

/// How long a notice stays on screen before auto-dismissing.
pub const TOAST_LIFETIME: Duration = Duration::from_secs(5);

/// One transient, non-blocking notice.
#[derive(Debug, Clone)]
pub struct Notice {
    pub message: String,
    posted_at: Instant,
}

impl Notice {
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.duration_since(self.posted_at) >= TOAST_LIFETIME
    }
}

/// The shared error-presentation channel: every surfaced failure becomes a
/// uniform, auto-dismissing toast. Nothing here is fatal to the page.
#[derive(Debug, Default)]
pub struct ToastTray {
    notices: Vec<Notice>,
}

impl ToastTray {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.push_at(message, Instant::now());
    }

    fn push_at(&mut self, message: impl Into<String>, posted_at: Instant) {
        let message = message.into();
        tracing::error!("{message}");
        self.notices.push(Notice { message, posted_at });
    }

    /// Notices still visible at `now`; expired ones are dropped.
    pub fn active_at(&mut self, now: Instant) -> Vec<&Notice> {
        self.notices.retain(|n| !n.is_expired_at(now));
        self.notices.iter().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.notices.iter().map(|n| n.message.as_str())
    }
}

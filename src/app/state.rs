#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub created_at: std::time::Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Success,
            created_at: std::time::Instant::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Error,
            created_at: std::time::Instant::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > std::time::Duration::from_secs(3)
    }
}

/// Cursor over the catalog list
#[derive(Debug, Clone, Default)]
pub struct TrackListState {
    pub len: usize,
    pub selected: usize,
}

impl TrackListState {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            ..Self::default()
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        if self.len > 0 {
            self.selected = (self.selected + 1).min(self.len - 1);
        }
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.len.saturating_sub(1);
    }
}

pub struct AppState {
    pub should_quit: bool,
    pub tick: u64,

    pub tracks: TrackListState,
    /// Catalog row of the last selection; only shown while a session exists.
    pub playing: Option<usize>,
    pub show_help: bool,
    pub volume: u8,

    // Toast notification
    pub toast: Option<Toast>,

    // Status message
    pub status: String,
}

impl AppState {
    pub fn new(track_count: usize) -> Self {
        Self {
            should_quit: false,
            tick: 0,
            tracks: TrackListState::new(track_count),
            playing: None,
            show_help: false,
            volume: 80,
            toast: None,
            status: String::new(),
        }
    }
}

use std::sync::{Arc, Mutex, PoisonError};

use super::{Frame, RegionId, RenderSink};

/// Sink that keeps every frame it receives
///
/// Used by tests and by embedders that want to inspect what a controller
/// produced without a real display.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    frames: Arc<Mutex<Vec<(RegionId, Frame)>>>,
    redirects: Arc<Mutex<Vec<String>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All frames in the order they were rendered
    pub fn frames(&self) -> Vec<(RegionId, Frame)> {
        self.frames
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Frames rendered into one region, oldest first
    pub fn frames_for(&self, region: &RegionId) -> Vec<Frame> {
        self.frames()
            .into_iter()
            .filter(|(r, _)| r == region)
            .map(|(_, frame)| frame)
            .collect()
    }

    /// What the region currently shows
    pub fn current(&self, region: &RegionId) -> Option<Frame> {
        self.frames_for(region).pop()
    }

    pub fn redirects(&self) -> Vec<String> {
        self.redirects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl RenderSink for RecordingSink {
    fn render(&self, region: &RegionId, frame: Frame) {
        self.frames
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((region.clone(), frame));
    }

    fn redirect(&self, location: &str) {
        self.redirects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(location.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Notice;

    #[test]
    fn test_current_is_last_frame_for_region() {
        let sink = RecordingSink::new();
        let grid = RegionId::new("movie-grid");
        let search = RegionId::new("search-results");

        sink.render(&grid, Frame::Notice(Notice::error("first")));
        sink.render(&search, Frame::Cleared);
        sink.render(&grid, Frame::Cards(vec![]));

        assert_eq!(sink.frames().len(), 3);
        assert_eq!(sink.frames_for(&grid).len(), 2);
        assert_eq!(sink.current(&grid), Some(Frame::Cards(vec![])));
        assert_eq!(sink.current(&search), Some(Frame::Cleared));
        assert_eq!(sink.current(&RegionId::new("chatbot-messages")), None);
    }

    #[test]
    fn test_records_after_poisoned_lock() {
        let sink = RecordingSink::new();
        let frames = sink.frames.clone();
        let poisoned = std::thread::spawn(move || {
            let _frames = frames.lock().unwrap();
            panic!("renderer panicked while holding the lock");
        })
        .join();
        assert!(poisoned.is_err());

        let grid = RegionId::new("movie-grid");
        sink.render(&grid, Frame::Cleared);
        sink.redirect("/login/");

        assert_eq!(sink.current(&grid), Some(Frame::Cleared));
        assert_eq!(sink.redirects(), vec!["/login/".to_string()]);
    }

    #[test]
    fn test_clones_share_history() {
        let sink = RecordingSink::new();
        let handle = sink.clone();

        handle.redirect("/login/");

        assert_eq!(sink.redirects(), vec!["/login/".to_string()]);
    }
}

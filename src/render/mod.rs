//! Render sink abstraction
//!
//! Controllers hand finished view models to a sink, one region at a time. A
//! sink must treat every `render` call as a full replacement of that region:
//! clear first, then insert, never patch.

use std::fmt::Display;

pub mod recording;
pub mod terminal;
pub mod view;

pub use recording::RecordingSink;
pub use terminal::TerminalSink;
pub use view::{
    DetailCard, MovieCard, NavControl, NavKind, Notice, NoticeKind, PaginationBar, SuggestionRow,
    TrailerView, TranscriptLine,
};

/// Name of a display region owned by exactly one controller
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegionId(String);

impl RegionId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for RegionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Complete content for one region
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// Region emptied and hidden
    Cleared,
    Cards(Vec<MovieCard>),
    Suggestions(Vec<SuggestionRow>),
    Pagination(PaginationBar),
    Notice(Notice),
    Transcript(Vec<TranscriptLine>),
    Details(DetailCard),
}

/// Display surface the controllers write to
pub trait RenderSink: Send + Sync {
    /// Replace everything currently shown in `region` with `frame`
    fn render(&self, region: &RegionId, frame: Frame);

    /// Leave the current view for `location` (auth rejections)
    fn redirect(&self, location: &str);
}

use std::io::Write;
use std::sync::{Mutex, PoisonError};

use super::{Frame, NavKind, NoticeKind, RegionId, RenderSink, TrailerView};
use crate::models::Role;

/// Sink that prints each frame as a block of text
pub struct TerminalSink {
    out: Mutex<Box<dyn Write + Send>>,
}

impl TerminalSink {
    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn stdout() -> Self {
        Self::new(Box::new(std::io::stdout()))
    }

    fn write_block(&self, block: &str) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = out.write_all(block.as_bytes()).and_then(|_| out.flush()) {
            tracing::error!(error = %e, "Failed to write frame to terminal");
        }
    }
}

fn nav_label(kind: NavKind) -> &'static str {
    match kind {
        NavKind::First => "First",
        NavKind::Previous => "Previous",
        NavKind::Next => "Next",
        NavKind::Last => "Last",
    }
}

/// Text rendering of one frame, header line included
pub fn format_frame(region: &RegionId, frame: &Frame) -> String {
    let mut lines = vec![format!("── {} ──", region)];

    match frame {
        Frame::Cleared => {}
        Frame::Cards(cards) => {
            for card in cards {
                lines.push(format!(
                    "[{}] {}  Rating: {} / 5.0  {}",
                    card.id, card.title, card.rating, card.poster_url
                ));
            }
        }
        Frame::Suggestions(rows) => {
            for (index, row) in rows.iter().enumerate() {
                lines.push(format!("{:>2}. {}  ({})", index + 1, row.title, row.thumbnail_url));
            }
        }
        Frame::Pagination(bar) => {
            let mut parts: Vec<String> = bar
                .controls
                .iter()
                .filter(|c| matches!(c.kind, NavKind::First | NavKind::Previous))
                .map(|c| format!("<{}:{}>", nav_label(c.kind), c.target_page))
                .collect();
            parts.push(bar.label());
            parts.extend(
                bar.controls
                    .iter()
                    .filter(|c| matches!(c.kind, NavKind::Next | NavKind::Last))
                    .map(|c| format!("<{}:{}>", nav_label(c.kind), c.target_page)),
            );
            lines.push(parts.join(" "));
        }
        Frame::Notice(notice) => {
            let prefix = match notice.kind {
                NoticeKind::Info => "",
                NoticeKind::Empty => "· ",
                NoticeKind::Error => "! ",
            };
            lines.push(format!("{}{}", prefix, notice.text));
        }
        Frame::Transcript(entries) => {
            for entry in entries {
                let who = match entry.role {
                    Role::User => "you",
                    Role::Bot => "bot",
                    Role::Error => "bot",
                };
                for (i, text) in entry.text.lines().enumerate() {
                    if i == 0 {
                        lines.push(format!("{}> {}", who, text));
                    } else {
                        lines.push(format!("     {}", text));
                    }
                }
            }
        }
        Frame::Details(card) => {
            lines.push(card.title.clone());
            lines.push(format!("Overview: {}", card.overview));
            lines.push(format!("Genres: {}", card.genres));
            lines.push(format!("Release Date: {}", card.release_date));
            lines.push(format!("Runtime: {}", card.runtime));
            lines.push(format!("Budget: {}", card.budget));
            lines.push(format!("Rating: {}/10", card.rating));
            match &card.trailer {
                TrailerView::Embed(url) => lines.push(format!("Trailer: {}", url)),
                TrailerView::Unavailable => {
                    lines.push("Trailer not available for this movie.".to_string())
                }
            }
        }
    }

    let mut block = lines.join("\n");
    block.push('\n');
    block
}

impl RenderSink for TerminalSink {
    fn render(&self, region: &RegionId, frame: Frame) {
        self.write_block(&format_frame(region, &frame));
    }

    fn redirect(&self, location: &str) {
        self.write_block(&format!("→ redirecting to {}\n", location));
    }
}

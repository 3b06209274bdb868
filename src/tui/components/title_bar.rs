//! # TitleBar Component
//!
//! Top line of the screen: where the user is, how many rows they are looking
//! at, and what the app is doing.
//!
//! ```text
//! Books › Dune  (12)                       ⠹ Loading Dune…
//! ```
//!
//! Stateless: every field is a prop set by `draw_ui` each frame. The status
//! is right-aligned and truncated first when the terminal is narrow, so the
//! breadcrumbs stay readable.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::component::Component;

const SEPARATOR: &str = " › ";

pub struct TitleBar {
    /// Screen titles from root to current.
    pub breadcrumbs: Vec<String>,
    /// Rows shown after filtering, and rows on the screen.
    pub shown: usize,
    pub total: usize,
    pub status_message: String,
    /// Status is an error and should stand out.
    pub is_error: bool,
    /// Spinner glyph while a fetch is in flight.
    pub spinner: Option<&'static str>,
}

impl TitleBar {
    fn count_text(&self) -> String {
        if self.shown == self.total {
            format!("  ({})", self.total)
        } else {
            format!("  ({}/{})", self.shown, self.total)
        }
    }

    fn status_line(&self) -> Line<'static> {
        let style = if self.is_error {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Gray)
        };
        let mut spans = Vec::new();
        if let Some(glyph) = self.spinner {
            spans.push(Span::styled(
                format!("{glyph} "),
                Style::default().fg(Color::Cyan),
            ));
        }
        spans.push(Span::styled(self.status_message.clone(), style));
        Line::from(spans).right_aligned()
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let (current, parents) = match self.breadcrumbs.split_last() {
            Some((current, parents)) => (current.as_str(), parents),
            None => ("", &[][..]),
        };

        let mut spans: Vec<Span> = parents
            .iter()
            .flat_map(|title| {
                [
                    Span::styled(title.clone(), Style::default().fg(Color::DarkGray)),
                    Span::styled(SEPARATOR, Style::default().fg(Color::DarkGray)),
                ]
            })
            .collect();
        spans.push(Span::styled(
            current.to_string(),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            self.count_text(),
            Style::default().fg(Color::DarkGray),
        ));
        let left = Line::from(spans);

        let has_status = self.spinner.is_some() || !self.status_message.is_empty();
        if !has_status {
            frame.render_widget(left, area);
            return;
        }

        let left_width = (left.width() as u16).min(area.width);
        let [left_area, right_area] =
            Layout::horizontal([Constraint::Length(left_width), Constraint::Min(0)])
                .spacing(1)
                .areas(area);
        frame.render_widget(left, left_area);
        frame.render_widget(self.status_line(), right_area);
    }
}

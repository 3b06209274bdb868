//! # List View Component
//!
//! The two-line-per-row list that shows the current screen, with a cursor
//! and a case-insensitive text filter over each row's `filter_value()`.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `ListViewState` lives in `TuiState` (cursor, filter, scroll offset)
//! - `ListView` is created each frame with borrowed state and the rows
//!
//! ## Keys
//!
//! ```text
//! browsing:  ↑/k ↓/j  PgUp PgDn  Home/g End/G   / filter   enter open
//!            b/backspace back   q quit   esc clear applied filter
//! filtering: type to narrow   backspace delete   enter apply   esc clear
//! ```
//!
//! While the filter is being edited every printable key goes into the
//! filter, so `q` and `b` are plain characters there.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{List, ListItem, ListState, Paragraph};
use unicode_width::UnicodeWidthChar;

use crate::core::adapter::DisplayItem;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Terminal rows per list entry: title, description, gap.
const ROW_HEIGHT: usize = 3;
const ACCENT: Color = Color::Cyan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterState {
    Unfiltered,
    /// The filter line has focus.
    Filtering,
    /// A non-empty filter narrows the list; keys browse again.
    FilterApplied,
}

/// Events emitted by the list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEvent {
    /// Open the row at this index of the screen's items (not the filtered view).
    Open(usize),
    Back,
    Quit,
}

/// Persistent state for the list view.
pub struct ListViewState {
    /// Lowercased filter values, one per item.
    keys: Vec<String>,
    /// Indices into the items that pass the filter, in display order.
    visible: Vec<usize>,
    pub filter: String,
    pub filter_state: FilterState,
    pub list_state: ListState,
    /// Entries that fit on screen, measured during the last render.
    page_rows: usize,
}

impl ListViewState {
    pub fn new(items: &[DisplayItem]) -> Self {
        let mut state = Self {
            keys: Vec::new(),
            visible: Vec::new(),
            filter: String::new(),
            filter_state: FilterState::Unfiltered,
            list_state: ListState::default(),
            page_rows: 1,
        };
        state.set_items(items);
        state
    }

    /// Replaces the rows, clearing the filter and putting the cursor on the first row.
    pub fn set_items(&mut self, items: &[DisplayItem]) {
        self.keys = items
            .iter()
            .map(|item| item.filter_value().to_lowercase())
            .collect();
        self.filter.clear();
        self.filter_state = FilterState::Unfiltered;
        self.list_state = ListState::default();
        self.refilter();
    }

    /// Item indices currently shown.
    pub fn visible(&self) -> &[usize] {
        &self.visible
    }

    /// Index (into the screen's items) of the row under the cursor.
    pub fn selected_index(&self) -> Option<usize> {
        self.list_state
            .selected()
            .and_then(|pos| self.visible.get(pos).copied())
    }

    fn refilter(&mut self) {
        let needle = self.filter.to_lowercase();
        self.visible = self
            .keys
            .iter()
            .enumerate()
            .filter(|(_, key)| key.contains(&needle))
            .map(|(i, _)| i)
            .collect();
        *self.list_state.offset_mut() = 0;
        self.list_state
            .select(if self.visible.is_empty() { None } else { Some(0) });
    }

    fn clear_filter(&mut self) {
        self.filter.clear();
        self.filter_state = FilterState::Unfiltered;
        self.refilter();
    }

    fn move_cursor(&mut self, delta: isize) {
        if self.visible.is_empty() {
            return;
        }
        let last = self.visible.len() - 1;
        let current = self.list_state.selected().unwrap_or(0);
        let next = current.saturating_add_signed(delta).min(last);
        self.list_state.select(Some(next));
    }

    fn select_first(&mut self) {
        if !self.visible.is_empty() {
            self.list_state.select(Some(0));
        }
    }

    fn select_last(&mut self) {
        if !self.visible.is_empty() {
            self.list_state.select(Some(self.visible.len() - 1));
        }
    }

    fn page(&self) -> isize {
        self.page_rows.max(1) as isize
    }

    /// Cursor movement shared by both modes.
    fn handle_motion(&mut self, event: &TuiEvent) {
        match event {
            TuiEvent::CursorUp | TuiEvent::ScrollUp => self.move_cursor(-1),
            TuiEvent::CursorDown | TuiEvent::ScrollDown => self.move_cursor(1),
            TuiEvent::PageUp => self.move_cursor(-self.page()),
            TuiEvent::PageDown => self.move_cursor(self.page()),
            TuiEvent::Home => self.select_first(),
            TuiEvent::End => self.select_last(),
            _ => {}
        }
    }

    fn handle_filtering(&mut self, event: &TuiEvent) -> Option<ListEvent> {
        match event {
            TuiEvent::InputChar(c) => {
                self.filter.push(*c);
                self.refilter();
            }
            TuiEvent::Backspace => {
                self.filter.pop();
                self.refilter();
            }
            TuiEvent::Submit => {
                self.filter_state = if self.filter.is_empty() {
                    FilterState::Unfiltered
                } else {
                    FilterState::FilterApplied
                };
            }
            TuiEvent::Escape => self.clear_filter(),
            other => self.handle_motion(other),
        }
        None
    }

    fn handle_browsing(&mut self, event: &TuiEvent) -> Option<ListEvent> {
        match event {
            TuiEvent::InputChar('q') => return Some(ListEvent::Quit),
            TuiEvent::InputChar('b') | TuiEvent::Backspace => return Some(ListEvent::Back),
            TuiEvent::Submit => return self.selected_index().map(ListEvent::Open),
            TuiEvent::InputChar('/') => self.filter_state = FilterState::Filtering,
            TuiEvent::Escape => {
                if self.filter_state == FilterState::FilterApplied {
                    self.clear_filter();
                }
            }
            TuiEvent::InputChar('k') => self.move_cursor(-1),
            TuiEvent::InputChar('j') => self.move_cursor(1),
            TuiEvent::InputChar('g') => self.select_first(),
            TuiEvent::InputChar('G') => self.select_last(),
            other => self.handle_motion(other),
        }
        None
    }
}

impl EventHandler for ListViewState {
    type Event = ListEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<ListEvent> {
        match self.filter_state {
            FilterState::Filtering => self.handle_filtering(event),
            FilterState::Unfiltered | FilterState::FilterApplied => self.handle_browsing(event),
        }
    }
}

/// Transient render wrapper for the list view.
pub struct ListView<'a> {
    state: &'a mut ListViewState,
    items: &'a [DisplayItem],
}

impl<'a> ListView<'a> {
    pub fn new(state: &'a mut ListViewState, items: &'a [DisplayItem]) -> Self {
        Self { state, items }
    }

    fn help_text(&self) -> &'static str {
        match self.state.filter_state {
            FilterState::Filtering => "enter apply • esc clear • ↑/↓ move",
            FilterState::FilterApplied => {
                "↑/k ↓/j move • / edit filter • esc clear filter • enter open • b back • q quit"
            }
            FilterState::Unfiltered => "↑/k ↓/j move • / filter • enter open • b back • q quit",
        }
    }

    fn render_filter_line(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled("Filter: ", Style::default().fg(ACCENT)),
            Span::raw(self.state.filter.clone()),
        ];
        if self.state.filter_state == FilterState::Filtering {
            spans.push(Span::styled("▏", Style::default().fg(ACCENT)));
        }
        frame.render_widget(Line::from(spans), area);
    }

    fn build_rows(&self, width: usize) -> Vec<ListItem<'static>> {
        let cursor = self.state.list_state.selected();
        let text_width = width.saturating_sub(2);

        self.state
            .visible
            .iter()
            .enumerate()
            .map(|(pos, &idx)| {
                let item = &self.items[idx];
                let selected = cursor == Some(pos);

                let (marker, title_style, desc_style) = if selected {
                    (
                        Span::styled("│ ", Style::default().fg(ACCENT)),
                        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
                        Style::default().fg(ACCENT).add_modifier(Modifier::DIM),
                    )
                } else {
                    (
                        Span::raw("  "),
                        Style::default().fg(Color::White),
                        Style::default().fg(Color::DarkGray),
                    )
                };

                let text = Text::from(vec![
                    Line::from(vec![
                        marker.clone(),
                        Span::styled(fit_line(item.title(), text_width), title_style),
                    ]),
                    Line::from(vec![
                        marker,
                        Span::styled(fit_line(item.description(), text_width), desc_style),
                    ]),
                    Line::default(),
                ]);
                ListItem::new(text)
            })
            .collect()
    }
}

impl Component for ListView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let filter_height = if self.state.filter_state == FilterState::Unfiltered {
            0
        } else {
            1
        };
        let [filter_area, list_area, help_area] = Layout::vertical([
            Constraint::Length(filter_height),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area);

        if filter_height > 0 {
            self.render_filter_line(frame, filter_area);
        }

        self.state.page_rows = (list_area.height as usize / ROW_HEIGHT).max(1);

        if self.state.visible.is_empty() {
            let message = if self.items.is_empty() {
                "No items.".to_string()
            } else {
                format!("Nothing matches \"{}\".", self.state.filter)
            };
            frame.render_widget(
                Paragraph::new(message).style(Style::default().fg(Color::DarkGray)),
                list_area,
            );
        } else {
            let rows = self.build_rows(list_area.width as usize);
            frame.render_stateful_widget(List::new(rows), list_area, &mut self.state.list_state);
        }

        frame.render_widget(
            Line::from(self.help_text()).style(Style::default().fg(Color::DarkGray)),
            help_area,
        );
    }
}

/// First wrapped line of `text` within `width` columns, with "…" when more follows.
fn fit_line(text: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let lines = textwrap::wrap(text, width);
    match lines.first() {
        None => String::new(),
        Some(first) if lines.len() == 1 => first.to_string(),
        Some(first) => with_ellipsis(first, width),
    }
}

/// Cuts `line` so that it plus a trailing "…" fits in `width` columns.
fn with_ellipsis(line: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for ch in line.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Margin};

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{ListView, TitleBar};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Outer margin around the whole UI, in rows and columns.
const MARGIN: Margin = Margin {
    vertical: 1,
    horizontal: 2,
};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let area = frame.area().inner(MARGIN);
    let [title_area, _, list_area] = Layout::vertical([Length(1), Length(1), Min(0)]).areas(area);

    let screen = app.current_screen();

    let mut title_bar = TitleBar {
        breadcrumbs: app
            .navigator
            .breadcrumbs()
            .into_iter()
            .map(str::to_string)
            .collect(),
        shown: tui.list.visible().len(),
        total: screen.items.len(),
        status_message: app.status_message.clone(),
        is_error: app.error.is_some(),
        spinner: app
            .is_loading()
            .then(|| SPINNER[spinner_frame % SPINNER.len()]),
    };
    title_bar.render(frame, title_area);

    ListView::new(&mut tui.list, &screen.items).render(frame, list_area);
}

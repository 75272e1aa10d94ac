mod header;
pub mod layout;
mod modal;
mod news_panel;
mod status_bar;
mod theme;
mod topics_panel;

use crate::app::state::AppState;
use crate::view::ViewModel;
use ratatui::prelude::*;

pub fn render(frame: &mut Frame, state: &AppState, vm: &ViewModel) {
    let area = frame.area();
    let app_layout = layout::compute_layout(area);

    header::render(frame, app_layout.header, state);
    topics_panel::render(frame, app_layout.topics_list, state, vm);
    topics_panel::render_refresh_button(frame, app_layout.refresh_button, state, vm);
    news_panel::render(frame, app_layout.news_list, state, vm);
    status_bar::render_loading(frame, app_layout.loading_indicator, state, vm);
    status_bar::render_error(frame, app_layout.error_message, vm);
    modal::render(frame, vm);
}

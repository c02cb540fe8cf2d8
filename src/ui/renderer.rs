//! Top-level rendering entry point.
//!
//! Rendering is two steps: the state is turned into a [`UIViewModel`], then
//! the components draw the view model. The second step is a pure function
//! of the view model and the theme, so equal view models draw equal frames.

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;
use ratatui::Frame;

/// Draws the current state into `frame`.
pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    let viewmodel = state.compute_viewmodel(usize::from(area.height));

    render_viewmodel(frame, &viewmodel, &state.theme);
}

/// Draws an already computed view model over the whole frame.
pub fn render_viewmodel(frame: &mut Frame, vm: &UIViewModel, theme: &Theme) {
    let area = frame.area();
    components::render_layout(frame, area, vm, theme);
}

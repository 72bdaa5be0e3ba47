pub mod alert_popup;
pub mod confirm_popup;
pub mod form_popup;
pub mod help_overlay;
pub mod picker_popup;
pub mod status_row;
pub mod targets_view;

mod helpers;

#[cfg(test)]
pub(crate) mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::{App, Mode};

/// Main render function, dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: title bar | content | status row
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // title + spacer
            Constraint::Min(1),    // target cards
            Constraint::Length(1), // status row
        ])
        .split(area);

    status_row::render_title_bar(frame, app, chunks[0]);
    targets_view::render_targets_view(frame, app, chunks[1]);

    // Modals stack on top of the list
    match app.mode {
        Mode::Form => form_popup::render_form_popup(frame, app, area),
        Mode::Picker => {
            form_popup::render_form_popup(frame, app, area);
            picker_popup::render_picker_popup(frame, app, area);
        }
        Mode::Confirm => confirm_popup::render_confirm_popup(frame, app, area),
        _ => {}
    }

    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }

    // Alerts sit above everything
    if app.alert.is_some() {
        alert_popup::render_alert_popup(frame, app, area);
    }

    status_row::render_status_row(frame, app, chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::TargetForm;
    use crate::tui::render::test_helpers::*;

    fn draw(app: &mut App) -> String {
        render_to_string(TERM_W, TERM_H, |frame, _area| render(frame, app))
    }

    #[test]
    fn full_screen_layout() {
        let (mut app, _files, _tmp) = sample_app();
        let output = draw(&mut app);
        let first = output.lines().next().unwrap();
        assert!(first.starts_with(" foobs  3 targets"));
        assert!(output.contains("Wins  [integer]"));
        assert!(output.lines().last().unwrap().ends_with("? help"));
    }

    #[test]
    fn alert_draws_over_form() {
        let (mut app, _files, _tmp) = sample_app();
        app.form = Some(TargetForm::for_add());
        app.mode = Mode::Form;
        app.show_alert("Please select a target file");
        let output = draw(&mut app);
        assert!(output.contains("Please select a target file"));
        assert!(output.contains("Press any key"));
        // The form footer stays visible below the alert
        assert!(output.contains("Tab next"));
    }
}

//! Main render/view function (View in TEA pattern)


use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

use flashdeck_app::AppState;

use crate::layout;
use crate::theme::{icons::IconSet, palette};
use crate::widgets::{DriveListModal, DriveStep, MainHeader, StatusBar};

/// Render the complete UI from the current state.
///
/// The drive step reads the selection slice held by its view state, so the
/// frame always shows the latest projection of the store.
pub fn view(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(palette::DEEPEST_BG)),
        area,
    );

    let areas = layout::create(area);
    let icons = IconSet::new(state.settings.ui.ascii);
    let store_state = state.store.get_state();
    let props = state.step_props();
    let selector = state.drive_selector.target_selector_props(&props);
    let modal_open = state.modal().is_open();

    frame.render_widget(
        MainHeader::new(store_state.image.as_ref()).flashing(props.flashing),
        areas.header,
    );
    frame.render_widget(DriveStep::new(props, &selector, icons), areas.step);
    frame.render_widget(
        StatusBar::new(state.last_error.as_deref(), modal_open),
        areas.status,
    );

    if modal_open {
        let rows = state.drive_rows();
        frame.render_widget(
            DriveListModal::new(&rows, state.drive_list.highlighted, icons),
            area,
        );
    }
}

use iced::{window, Size};

use quadsum::gui::QuadSumApp;
use quadsum::logging;

fn main() -> iced::Result {
    logging::init();
    iced::application(
        "QuadSum - File Checksums",
        QuadSumApp::update,
        QuadSumApp::view,
    )
    .window(window::Settings {
        size: Size::new(920.0, 520.0),
        resizable: true,
        ..window::Settings::default()
    })
    .run_with(QuadSumApp::new)
}

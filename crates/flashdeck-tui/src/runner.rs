//! Main TUI runner - entry point and event loop

use std::rc::Rc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};

use flashdeck_app::config::Settings;
use flashdeck_app::drive_source::{spawn_drive_poller, DriveSource};
use flashdeck_app::process::process_message;
use flashdeck_app::signals::spawn_signal_handler;
use flashdeck_app::{analytics, AppState, Message};
use flashdeck_core::prelude::*;
use flashdeck_core::SourceImage;

use crate::{event, render, terminal};

/// How long shutdown waits for the drive poller to stop
const POLLER_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(1);

/// Everything the binary resolved before the terminal is taken over
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub settings: Settings,
    /// Image to select at startup; the drive step stays disabled without one
    pub image: Option<SourceImage>,
    pub drive_source: Option<DriveSource>,
}

/// Run the TUI until the user quits or a signal arrives
pub async fn run(options: RunOptions) -> Result<()> {
    let RunOptions {
        settings,
        image,
        drive_source,
    } = options;
    let settings = Rc::new(settings);
    let analytics = analytics::from_settings(&settings.analytics);

    let mut state = AppState::new(Rc::clone(&settings), analytics)?;
    if let Some(image) = image {
        state.select_image(image)?;
    }

    let (msg_tx, msg_rx) = mpsc::channel::<Message>(256);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    spawn_signal_handler(msg_tx.clone());

    let poller = drive_source.map(|source| {
        let handle = spawn_drive_poller(
            source.clone(),
            settings.drives.scan_interval(),
            msg_tx.clone(),
            shutdown_rx,
        );
        state.drive_source = Some(source);
        handle
    });

    terminal::install_panic_hook();
    let mut term = ratatui::init();

    let result = run_loop(&mut term, &mut state, msg_rx, msg_tx);

    ratatui::restore();

    let _ = shutdown_tx.send(true);
    if let Some(handle) = poller {
        if tokio::time::timeout(POLLER_SHUTDOWN_TIMEOUT, handle)
            .await
            .is_err()
        {
            warn!("Drive poller did not stop in time");
        }
    }
    state.shutdown();

    result
}

/// Main event loop
fn run_loop(
    terminal: &mut ratatui::DefaultTerminal,
    state: &mut AppState,
    mut msg_rx: mpsc::Receiver<Message>,
    msg_tx: mpsc::Sender<Message>,
) -> Result<()> {
    while !state.should_quit() {
        // Drive scans, rescans and signals
        while let Ok(msg) = msg_rx.try_recv() {
            process_message(state, msg, &msg_tx);
        }

        terminal.draw(|frame| render::view(frame, state))?;

        if let Some(message) = event::poll()? {
            process_message(state, message, &msg_tx);
        }
    }

    Ok(())
}

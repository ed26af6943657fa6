use std::fs::File;
use std::process::ExitCode;
use std::sync::Mutex;

use clap::Parser;
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use sheetview::controller::Controller;
use sheetview::domain::{Message, SVConfig, SVError, expand_path};
use sheetview::model::{Model, Status};
use sheetview::ui::TableUI;

fn main() -> ExitCode {
    let cfg = SVConfig::parse();
    match run(&cfg) {
        Err(e) => {
            ratatui::restore();
            eprintln!("Error: {:?}", e);
            ExitCode::FAILURE
        }
        Ok(_) => {
            ratatui::restore();
            ExitCode::SUCCESS
        }
    }
}

// The terminal belongs to the UI, so logs only go to a file when one is given.
fn init_tracing(cfg: &SVConfig) -> Result<(), SVError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cfg.log_level.as_str()));
    let file_layer = match &cfg.log_file {
        Some(path) => {
            let file = File::create(expand_path(&path.to_string_lossy()))?;
            Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        }
        None => None,
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(ErrorLayer::default())
        .init();
    Ok(())
}

fn run(cfg: &SVConfig) -> Result<(), SVError> {
    cfg.validate()?;
    init_tracing(cfg)?;
    info!("Starting sheetview with {:?}", cfg);

    let mut model = Model::init(cfg);
    let mut ui = TableUI::new(cfg);
    let controller = Controller::new(cfg);

    let mut terminal = ratatui::init();
    let size = terminal.size()?;
    model.update(Some(Message::Resize(size.width as usize, size.height as usize)))?;
    model.start_load(false);

    while model.status != Status::QUITTING {
        model.poll_loads();

        // Render the current view
        terminal.draw(|f| ui.draw(&model, f))?;

        // Handle events and map to a Message
        if let Some(message) = controller.handle_event(&model)? {
            model.update(Some(message))?;
        };
    }

    Ok(())
}

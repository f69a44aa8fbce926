mod app;
mod config;
mod data;
mod directory;
mod error;
mod feed;
mod message;
mod trace;
mod ui;

use std::{
    error::Error,
    io,
    sync::mpsc::{self, Receiver},
    time::Duration,
};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as TermEvent},
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use tokio::runtime::Handle;
use tracing::{info, span, Level};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};
use tui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use crate::{
    app::App,
    config::Config,
    data::Dispatcher,
    message::{Effect, Event, Response},
    ui::draw_main_layout,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::from_env();

    // set up logging; stdout belongs to the terminal UI so everything goes to a file
    let file_appender =
        RollingFileAppender::new(Rotation::HOURLY, &config.log_dir, &config.log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_thread_names(true)
        .with_level(true)
        .with_ansi(false);
    let env_filter =
        EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let span_filter = trace::TraceFilter::default();
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer.with_filter(span_filter))
        .init();
    info!(?config, "starting podcast browser");

    // channel for publishing results from the background tasks to the UI
    let (ui_tx, ui_rx) = mpsc::channel::<Response>();
    let dispatcher = Dispatcher::new(Handle::current(), ui_tx);

    let mut app = App::default();
    let (width, height) = terminal::size()?;
    app.update(Event::Resize(width, height));

    // setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // run the main UI loop
    let res = run_app(&mut terminal, app, &dispatcher, &ui_rx);

    // restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("{:?}", err)
    }

    Ok(())
}

// Sole owner of `App`: every event is applied here, one at a time.
fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    dispatcher: &Dispatcher,
    ui_rx: &Receiver<Response>,
) -> io::Result<()> {
    loop {
        {
            let span = span!(Level::TRACE, "draw");
            let _enter = span.enter();
            terminal.draw(|f| draw_main_layout(f, &app))?;
        }

        let mut events: Vec<Event> = ui_rx.try_iter().map(Event::Response).collect();
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                TermEvent::Key(key) => events.push(Event::Key(key)),
                TermEvent::Resize(width, height) => events.push(Event::Resize(width, height)),
                _ => {}
            }
        }

        for event in events {
            match app.update(event) {
                Some(Effect::Dispatch(request)) => dispatcher.dispatch(request),
                Some(Effect::Quit) => return Ok(()),
                None => {}
            }
        }
    }
}

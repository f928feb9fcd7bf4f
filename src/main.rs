mod cli;
mod commands;

use clap::Parser;
use cli::Cli;
use commands::Context;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use fasal::app::{App, Screen};
use fasal::datasources::WeatherSource;
use fasal::error::{FasalError, Result};
use fasal::ui::screens::{DashboardScreen, RecommendationsScreen, RegionsScreen};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let json = cli.json;
    if let Err(e) = run(cli).await {
        report_error(&e, json);
        std::process::exit(e.exit_code());
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

fn report_error(e: &FasalError, json: bool) {
    if json {
        let body = serde_json::json!({
            "error": { "code": e.code(), "message": e.to_string() }
        });
        eprintln!("{}", body);
    } else {
        eprintln!("error[{}]: {}", e.code(), e);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let ctx = Context::from_cli(&cli)?;
    match cli.command {
        Some(command) => commands::run(&ctx, command).await,
        None => run_tui(ctx).await,
    }
}

async fn run_tui(ctx: Context) -> Result<()> {
    let advisor = ctx.advisor()?;
    let today = chrono::Local::now().date_naive();
    let mut app = App::new(ctx.config, advisor, today);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_app<W: WeatherSource>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<W>,
) -> Result<()> {
    loop {
        terminal.draw(|f| {
            let area = f.area();

            match app.screen {
                Screen::Dashboard => {
                    let screen = DashboardScreen::new(app.advice.as_ref(), &app.season)
                        .with_status(app.status_message.as_deref())
                        .refreshing(app.needs_refresh || app.refreshing);
                    f.render_widget(screen, area);
                }
                Screen::Recommendations => {
                    let screen = RecommendationsScreen::new(app.recommendations())
                        .with_selection(app.recommendations_state.selected_index);
                    f.render_widget(screen, area);
                }
                Screen::Regions => {
                    let screen = RegionsScreen::new(app.regions(), app.current_region_id())
                        .with_selection(app.regions_state.selected_index);
                    f.render_widget(screen, area);
                }
            }
        })?;

        // Refresh after drawing so the pending status is on screen during the fetch
        if app.needs_refresh {
            app.refresh(chrono::Local::now().date_naive()).await;
            continue;
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') => app.quit(),
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        app.quit();
                    }
                    KeyCode::Char('r') => app.request_refresh(),
                    KeyCode::Esc => app.switch_screen(Screen::Dashboard),
                    KeyCode::Char(c) => {
                        if let Some(screen) = Screen::from_key(c) {
                            app.switch_screen(screen);
                        }
                    }
                    code => handle_screen_input(app, code),
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_screen_input<W: WeatherSource>(app: &mut App<W>, code: KeyCode) {
    match app.screen {
        Screen::Dashboard => {}
        Screen::Recommendations => {
            let count = app.recommendations().len();
            match code {
                KeyCode::Up => app.recommendations_state.prev(),
                KeyCode::Down => app.recommendations_state.next(count),
                _ => {}
            }
        }
        Screen::Regions => {
            let count = app.regions().len();
            match code {
                KeyCode::Up => app.regions_state.prev(),
                KeyCode::Down => app.regions_state.next(count),
                _ => {}
            }
        }
    }
}

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use startpage_core::{App, AppError};
use startpage_search::SearchRouter;
use startpage_ui::{
    join_renderer, BrowserNavigator, Navigator, PageElements, PrintNavigator, StartPage,
    TerminalPage, TextCell,
};
use startpage_weather::WeatherDisplay;

#[derive(Parser)]
#[command(name = "startpage", version, about = "Clock, weather and search in your terminal")]
struct Cli {
    /// Config file to use instead of the one in the user config directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the live start page (default)
    Run {
        /// Append frames instead of clearing the screen
        #[arg(long)]
        no_clear: bool,
    },
    /// Open an address, or search for the text
    Search {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
        /// Print the URL instead of opening a browser
        #[arg(long)]
        print: bool,
    },
    /// Show or change saved preferences
    Settings {
        #[command(subcommand)]
        action: Option<SettingsAction>,
    },
    /// Look up the current weather once
    Weather {
        /// City to look up instead of the saved one
        #[arg(long)]
        city: Option<String>,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Save preferences; unspecified fields keep their current value
    Set {
        #[arg(long)]
        bg: Option<String>,
        #[arg(long)]
        city: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = startpage_core::init() {
        eprintln!("{:#}", e);
    }

    match dispatch(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("{}", AppError::from_anyhow(e).user_message());
            ExitCode::FAILURE
        }
    }
}

async fn dispatch(cli: Cli) -> Result<()> {
    let app = App::new(cli.config.as_deref())?;

    match cli.command.unwrap_or(Commands::Run { no_clear: false }) {
        Commands::Run { no_clear } => run(&app, !no_clear).await,
        Commands::Search { query, print } => search(&app, &query.join(" "), print),
        Commands::Settings { action } => settings(&app, action),
        Commands::Weather { city } => weather(&app, city).await,
    }
}

async fn run(app: &App, clear_screen: bool) -> Result<()> {
    let terminal = Arc::new(TerminalPage::new(clear_screen));
    let page = StartPage::from_app(app, terminal.elements(), Arc::new(BrowserNavigator))?;
    let cancel = CancellationToken::new();

    let tasks = page.on_ready();
    let renderer = terminal.clone().spawn_renderer(
        Duration::from_millis(app.config().clock.tick_millis),
        cancel.clone(),
    );

    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    let result = terminal.run_interactive(&page, cancel).await;

    tasks.clock.abort();
    if let Some(weather) = tasks.weather {
        weather.abort();
    }
    join_renderer(renderer).await;
    println!();
    tracing::info!("Start page closed");
    result.map_err(Into::into)
}

fn search(app: &App, query: &str, print: bool) -> Result<()> {
    let navigation = SearchRouter::new(app.config().search.engine_url.clone()).resolve(query);
    let navigator: Box<dyn Navigator> = if print {
        Box::new(PrintNavigator::default())
    } else {
        Box::new(BrowserNavigator)
    };
    navigator
        .navigate(navigation.url())
        .map_err(AppError::from)?;
    Ok(())
}

fn settings(app: &App, action: Option<SettingsAction>) -> Result<()> {
    let store = app.settings();
    let current = store.load().context("Failed to load preferences")?;

    if let Some(SettingsAction::Set { bg, city }) = action {
        let background = bg.unwrap_or(current.background);
        let city = city.unwrap_or(current.city);
        store
            .save(&background, &city)
            .context("Failed to save preferences")?;
    }

    let prefs = store.load().context("Failed to load preferences")?;
    println!("background: {}", prefs.background);
    println!("city:       {}", prefs.city);
    Ok(())
}

async fn weather(app: &App, city: Option<String>) -> Result<()> {
    let text = TextCell::new();
    let elements = PageElements {
        weather: Some(text.clone()),
        ..PageElements::default()
    };
    let page = StartPage::from_app(app, elements, Arc::new(PrintNavigator::default()))?;

    let display = match city {
        Some(city) => {
            let client = startpage_weather::WeatherClient::new(&app.config().weather)
                .map_err(AppError::from)?;
            WeatherDisplay::from(&client.lookup(&city, page.timezone()).await)
        }
        None => page.fetch_weather().await.unwrap_or(WeatherDisplay::Error),
    };

    println!("{}", display.plain_text());
    println!("timezone: {}", page.timezone().get());
    if display == WeatherDisplay::Error {
        return Err(AppError::Weather("lookup failed".to_string()).into());
    }
    Ok(())
}

//! Terminal rendering of the start page.
//!
//! Each page element is a cell; the renderer redraws all of them as a small
//! panel, and stdin lines are turned into page events.

use std::io::{BufRead, Write};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use startpage_core::AppError;
use startpage_weather::Fragment;

use crate::controller::StartPage;
use crate::elements::{
    BodyCell, Display, InputCell, InputElement, ModalCell, ModalElement, PageElements, TextCell,
};

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";
const CLEAR: &str = "\x1b[2J\x1b[H";

/// A line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ToggleSettings,
    SetBackground(String),
    SetCity(String),
    Save,
    Quit,
    Search(String),
    Empty,
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Command::Empty;
        }

        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        match head {
            ":settings" | ":s" => Command::ToggleSettings,
            ":bg" => Command::SetBackground(rest.to_string()),
            ":city" => Command::SetCity(rest.to_string()),
            ":save" => Command::Save,
            ":q" | ":quit" => Command::Quit,
            _ => Command::Search(line.to_string()),
        }
    }
}

pub struct TerminalPage {
    clock: Arc<TextCell>,
    weather: Arc<TextCell>,
    background_input: Arc<InputCell>,
    city_input: Arc<InputCell>,
    settings_modal: Arc<ModalCell>,
    search_input: Arc<InputCell>,
    body: Arc<BodyCell>,
    clear_screen: bool,
}

impl TerminalPage {
    pub fn new(clear_screen: bool) -> Self {
        Self {
            clock: TextCell::new(),
            weather: TextCell::new(),
            background_input: InputCell::new(),
            city_input: InputCell::new(),
            settings_modal: ModalCell::new(),
            search_input: InputCell::new(),
            body: BodyCell::new(),
            clear_screen,
        }
    }

    /// Element handles for the controller.
    pub fn elements(&self) -> PageElements {
        PageElements {
            clock: Some(self.clock.clone()),
            weather: Some(self.weather.clone()),
            background_input: Some(self.background_input.clone()),
            city_input: Some(self.city_input.clone()),
            settings_modal: Some(self.settings_modal.clone()),
            search_input: Some(self.search_input.clone()),
            body: Some(self.body.clone()),
        }
    }

    pub fn weather_text(&self) -> String {
        self.weather.text()
    }

    pub fn settings_open(&self) -> bool {
        self.settings_modal.display() == Display::Flex
    }

    /// One frame of the panel.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("  {}{}{}\n", BOLD, self.clock.text(), RESET));

        out.push_str("  ");
        for fragment in self.weather.fragments() {
            match fragment {
                Fragment::Plain(s) => out.push_str(&s),
                Fragment::Bold(s) => out.push_str(&format!("{}{}{}", BOLD, s, RESET)),
            }
        }
        out.push('\n');

        if let Some(background) = self.body.background() {
            out.push_str(&format!("  background: {}\n", background));
        }

        if self.settings_open() {
            out.push_str("\n  ┌ settings\n");
            out.push_str(&format!("  │ background: {}\n", self.background_input.value()));
            out.push_str(&format!("  │ city:       {}\n", self.city_input.value()));
            out.push_str("  └ :bg <url>  :city <name>  :save\n");
        }

        out.push_str("\n  search or :settings, :q > ");
        out
    }

    pub fn draw(&self) -> std::io::Result<()> {
        let mut stdout = std::io::stdout().lock();
        if self.clear_screen {
            stdout.write_all(CLEAR.as_bytes())?;
        }
        stdout.write_all(self.render().as_bytes())?;
        stdout.flush()
    }

    /// Redraw every `period` until `cancel` fires.
    pub fn spawn_renderer(
        self: Arc<Self>,
        period: Duration,
        cancel: CancellationToken,
    ) -> JoinHandle<()> {
        let period = period.max(Duration::from_millis(1));
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = interval.tick() => {
                        if let Err(e) = self.draw() {
                            tracing::warn!("Failed to draw page: {}", e);
                        }
                    }
                }
            }
        })
    }

    /// Apply one command to the page. Returns false when the user quit.
    pub fn apply(&self, page: &StartPage, command: Command) -> bool {
        match command {
            Command::ToggleSettings => page.toggle_settings(),
            Command::SetBackground(value) => self.background_input.set_value(&value),
            Command::SetCity(value) => self.city_input.set_value(&value),
            Command::Save => {
                if let Err(e) = page.save_settings() {
                    tracing::error!("Failed to save settings: {}", e);
                }
            }
            Command::Search(query) => {
                self.search_input.set_value(&query);
                page.submit_search();
            }
            Command::Quit => return false,
            Command::Empty => {}
        }
        true
    }

    /// Read commands from stdin until `:q`, end of input, or `cancel`.
    pub async fn run_interactive(
        &self,
        page: &StartPage,
        cancel: CancellationToken,
    ) -> Result<(), AppError> {
        let lines = spawn_stdin_reader()?;
        self.run_lines(page, lines, cancel).await
    }

    /// Apply each received line as a command until `:q`, the sender closes,
    /// or `cancel`. Cancels `cancel` on the way out.
    pub async fn run_lines(
        &self,
        page: &StartPage,
        mut lines: mpsc::Receiver<std::io::Result<String>>,
        cancel: CancellationToken,
    ) -> Result<(), AppError> {
        let result = loop {
            tokio::select! {
                _ = cancel.cancelled() => break Ok(()),
                line = lines.recv() => {
                    let Some(line) = line else { break Ok(()) };
                    let line = match line {
                        Ok(line) => line,
                        Err(e) => break Err(AppError::Io(e)),
                    };
                    if !self.apply(page, Command::parse(&line)) {
                        break Ok(());
                    }
                    if let Err(e) = self.draw() {
                        break Err(AppError::Io(e));
                    }
                }
            }
        };

        cancel.cancel();
        result
    }
}

/// Wait for a renderer from [`TerminalPage::spawn_renderer`]. Returns false,
/// after logging, when the task panicked or was aborted.
pub async fn join_renderer(handle: JoinHandle<()>) -> bool {
    match handle.await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Renderer task ended abnormally: {}", e);
            false
        }
    }
}

/// Read stdin lines on a detached OS thread.
///
/// A blocking read cannot be interrupted, so the thread is never joined. It
/// dies with the process, or stops after the next line once the receiver is gone.
fn spawn_stdin_reader() -> std::io::Result<mpsc::Receiver<std::io::Result<String>>> {
    let (tx, rx) = mpsc::channel(16);
    std::thread::Builder::new()
        .name("startpage-stdin".into())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let failed = line.is_err();
                if tx.blocking_send(line).is_err() || failed {
                    break;
                }
            }
        })?;
    Ok(rx)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use crate::browser::PrintNavigator;
    use crate::elements::{PageBody, TextElement};
    use startpage_core::{ActiveTimezone, DefaultsConfig, MemoryStore, SettingsStore, WeatherConfig};
    use startpage_search::SearchRouter;
    use startpage_weather::WeatherClient;

    fn page_for(terminal: &TerminalPage) -> StartPage {
        let defaults = DefaultsConfig::default();
        StartPage::new(
            SettingsStore::new(Arc::new(MemoryStore::new()), &defaults),
            Arc::new(WeatherClient::new(&WeatherConfig::default()).unwrap()),
            ActiveTimezone::new(defaults.timezone.clone()),
            SearchRouter::default(),
            Arc::new(PrintNavigator::default()),
            terminal.elements(),
            Duration::from_secs(1),
        )
    }

    #[test]
    fn parse_commands() {
        assert_eq!(Command::parse(":settings"), Command::ToggleSettings);
        assert_eq!(Command::parse("  :s "), Command::ToggleSettings);
        assert_eq!(
            Command::parse(":bg https://img.example/a.png"),
            Command::SetBackground("https://img.example/a.png".into())
        );
        assert_eq!(
            Command::parse(":city   Ho Chi Minh City "),
            Command::SetCity("Ho Chi Minh City".into())
        );
        assert_eq!(Command::parse(":save"), Command::Save);
        assert_eq!(Command::parse(":q"), Command::Quit);
        assert_eq!(Command::parse(""), Command::Empty);
        assert_eq!(
            Command::parse("rust borrow checker"),
            Command::Search("rust borrow checker".into())
        );
    }

    #[test]
    fn render_bolds_temperature() {
        let page = TerminalPage::new(false);
        page.weather.set_fragments(&[
            Fragment::Plain("📍 Tokyo: ".into()),
            Fragment::Bold("22°C".into()),
            Fragment::Plain(" – ☁️ Cloudy".into()),
        ]);

        let frame = page.render();
        assert!(frame.contains("📍 Tokyo: \x1b[1m22°C\x1b[0m – ☁️ Cloudy"));
        assert!(!frame.contains(CLEAR));
    }

    #[test]
    fn render_shows_settings_only_when_open() {
        let page = TerminalPage::new(false);
        page.city_input.set_value("Hanoi");
        page.body.set_background_image("url('bg.png')");
        page.clock.set_text("12:34");

        let closed = page.render();
        assert!(closed.contains("12:34"));
        assert!(closed.contains("background: url('bg.png')"));
        assert!(!closed.contains("Hanoi"));

        page.settings_modal.set_display(Display::Flex);
        assert!(page.render().contains("city:       Hanoi"));
    }

    #[tokio::test]
    async fn run_lines_applies_commands_until_quit() {
        let terminal = TerminalPage::new(false);
        let page = page_for(&terminal);
        let (tx, rx) = mpsc::channel(4);
        tx.send(Ok(":settings".into())).await.unwrap();
        tx.send(Ok(":city Hanoi".into())).await.unwrap();
        tx.send(Ok(":q".into())).await.unwrap();
        tx.send(Ok(":settings".into())).await.unwrap();

        let cancel = CancellationToken::new();
        terminal.run_lines(&page, rx, cancel.clone()).await.unwrap();

        assert!(terminal.settings_open());
        assert_eq!(terminal.city_input.value(), "Hanoi");
        assert!(cancel.is_cancelled());
    }

    #[tokio::test]
    async fn run_lines_returns_on_cancel_with_input_still_open() {
        let terminal = TerminalPage::new(false);
        let page = page_for(&terminal);
        let (_tx, rx) = mpsc::channel::<std::io::Result<String>>(1);

        let cancel = CancellationToken::new();
        let stopper = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            stopper.cancel();
        });

        tokio::time::timeout(Duration::from_secs(2), terminal.run_lines(&page, rx, cancel))
            .await
            .expect("loop should stop once cancelled")
            .unwrap();
    }

    #[tokio::test]
    async fn run_lines_surfaces_read_errors() {
        let terminal = TerminalPage::new(false);
        let page = page_for(&terminal);
        let (tx, rx) = mpsc::channel(1);
        tx.send(Err(std::io::Error::other("stdin closed badly")))
            .await
            .unwrap();

        let err = terminal
            .run_lines(&page, rx, CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }

    #[tokio::test]
    async fn join_renderer_reports_abnormal_exit() {
        let page = Arc::new(TerminalPage::new(false));
        let cancel = CancellationToken::new();

        let renderer = page.clone().spawn_renderer(Duration::from_secs(60), cancel.clone());
        cancel.cancel();
        assert!(join_renderer(renderer).await);

        let aborted = page.spawn_renderer(Duration::from_secs(60), CancellationToken::new());
        aborted.abort();
        assert!(!join_renderer(aborted).await);
    }
}

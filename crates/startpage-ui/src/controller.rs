//! Page controller: binds settings, weather, clock and search to the page.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use startpage_core::{ActiveTimezone, App, AppError, Preferences, SettingsStore, StorageError};
use startpage_search::{Navigation, SearchRouter};
use startpage_weather::{WeatherClient, WeatherDisplay};

use crate::browser::Navigator;
use crate::clock::Clock;
use crate::elements::{Display, PageElements, TextElement};

/// Tasks started by [`StartPage::on_ready`].
pub struct ReadyTasks {
    /// `None` when the page has no weather element.
    pub weather: Option<JoinHandle<WeatherDisplay>>,
    pub clock: JoinHandle<()>,
}

pub struct StartPage {
    settings: SettingsStore,
    weather: Arc<WeatherClient>,
    timezone: ActiveTimezone,
    router: SearchRouter,
    navigator: Arc<dyn Navigator>,
    elements: PageElements,
    tick_period: Duration,
}

impl StartPage {
    pub fn new(
        settings: SettingsStore,
        weather: Arc<WeatherClient>,
        timezone: ActiveTimezone,
        router: SearchRouter,
        navigator: Arc<dyn Navigator>,
        elements: PageElements,
        tick_period: Duration,
    ) -> Self {
        Self {
            settings,
            weather,
            timezone,
            router,
            navigator,
            elements,
            tick_period,
        }
    }

    /// Wire a page to the app's config, storage and timezone.
    pub fn from_app(
        app: &App,
        elements: PageElements,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, AppError> {
        let config = app.config();
        let weather = WeatherClient::new(&config.weather)?;
        Ok(Self::new(
            app.settings(),
            Arc::new(weather),
            app.timezone(),
            SearchRouter::new(config.search.engine_url.clone()),
            navigator,
            elements,
            Duration::from_millis(config.clock.tick_millis),
        ))
    }

    pub fn timezone(&self) -> &ActiveTimezone {
        &self.timezone
    }

    /// Page ready: apply settings, start the weather lookup, start the clock.
    ///
    /// Nothing here waits on anything else; the clock shows the fallback
    /// timezone until the lookup resolves the city's.
    pub fn on_ready(&self) -> ReadyTasks {
        self.load_settings();
        let weather = self.refresh_weather();
        let clock = Clock::new(self.timezone.clone(), self.elements.clock.clone())
            .start(self.tick_period);
        tracing::info!("Start page ready");
        ReadyTasks { weather, clock }
    }

    /// Load preferences and push them into the page.
    pub fn load_settings(&self) -> Preferences {
        let prefs = match self.settings.load() {
            Ok(prefs) => prefs,
            Err(e) => {
                tracing::error!("Failed to load preferences: {}", e);
                self.settings.defaults()
            }
        };

        if let Some(body) = &self.elements.body {
            body.set_background_image(&prefs.background_css());
        }
        if let Some(input) = &self.elements.background_input {
            input.set_value(&prefs.background);
        }
        if let Some(input) = &self.elements.city_input {
            input.set_value(&prefs.city);
        }

        prefs
    }

    /// Save whatever the two settings inputs hold.
    ///
    /// Skipped when either input is missing from the page.
    pub fn save_settings(&self) -> Result<Option<JoinHandle<WeatherDisplay>>, StorageError> {
        let (Some(bg_input), Some(city_input)) =
            (&self.elements.background_input, &self.elements.city_input)
        else {
            tracing::warn!("Settings inputs missing; nothing saved");
            return Ok(None);
        };

        let background = bg_input.value();
        let city = city_input.value();
        self.save_preferences(&background, &city)
    }

    /// Store both values verbatim, re-apply them, refresh the weather and close
    /// the settings panel.
    pub fn save_preferences(
        &self,
        background: &str,
        city: &str,
    ) -> Result<Option<JoinHandle<WeatherDisplay>>, StorageError> {
        self.settings.save(background, city)?;
        self.load_settings();
        let weather = self.refresh_weather();
        if let Some(modal) = &self.elements.settings_modal {
            modal.set_display(Display::None);
        }
        Ok(weather)
    }

    /// Start a weather lookup in the background.
    pub fn refresh_weather(&self) -> Option<JoinHandle<WeatherDisplay>> {
        let task = self.weather_task()?;
        Some(tokio::spawn(task.run()))
    }

    /// Run a weather lookup to completion and return what was displayed.
    pub async fn fetch_weather(&self) -> Option<WeatherDisplay> {
        let task = self.weather_task()?;
        Some(task.run().await)
    }

    /// Shows the searching text right away, before any task is scheduled.
    fn weather_task(&self) -> Option<WeatherTask> {
        let element = self.elements.weather.clone()?;
        let city = self.settings.city().unwrap_or_else(|e| {
            tracing::error!("Failed to read city: {}", e);
            self.settings.defaults().city
        });
        element.set_fragments(&WeatherDisplay::Searching(city.clone()).fragments());

        Some(WeatherTask {
            client: self.weather.clone(),
            timezone: self.timezone.clone(),
            element,
            city,
        })
    }

    /// Flip the settings panel between shown and hidden.
    pub fn toggle_settings(&self) {
        if let Some(modal) = &self.elements.settings_modal {
            let next = modal.display().toggled();
            modal.set_display(next);
            tracing::debug!("Settings panel: {:?}", next);
        }
    }

    /// Route whatever the search input holds.
    pub fn submit_search(&self) -> Option<Navigation> {
        let input = self.elements.search_input.as_ref()?;
        Some(self.submit_query(&input.value()))
    }

    /// Route `text` and navigate there.
    pub fn submit_query(&self, text: &str) -> Navigation {
        let navigation = self.router.resolve(text);
        if let Err(e) = self.navigator.navigate(navigation.url()) {
            tracing::error!("{}", e);
        }
        navigation
    }
}

struct WeatherTask {
    client: Arc<WeatherClient>,
    timezone: ActiveTimezone,
    element: Arc<dyn TextElement>,
    city: String,
}

impl WeatherTask {
    async fn run(self) -> WeatherDisplay {
        let outcome = self.client.lookup(&self.city, &self.timezone).await;
        let display = WeatherDisplay::from(&outcome);
        self.element.set_fragments(&display.fragments());
        display
    }
}

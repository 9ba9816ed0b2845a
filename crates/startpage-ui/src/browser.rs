//! Where search submissions end up.

use parking_lot::Mutex;

#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    #[error("Failed to open {url}: {source}")]
    Open {
        url: String,
        #[source]
        source: std::io::Error,
    },
}

/// Sends the page somewhere else.
pub trait Navigator: Send + Sync {
    fn navigate(&self, url: &str) -> Result<(), NavigationError>;
}

/// Opens URLs in the system default browser.
#[derive(Debug, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn navigate(&self, url: &str) -> Result<(), NavigationError> {
        tracing::info!("Opening {}", url);
        webbrowser::open(url).map_err(|source| NavigationError::Open {
            url: url.to_string(),
            source,
        })
    }
}

/// Writes URLs to stdout instead of opening them, and remembers the last one.
#[derive(Debug, Default)]
pub struct PrintNavigator {
    last: Mutex<Option<String>>,
}

impl PrintNavigator {
    pub fn last(&self) -> Option<String> {
        self.last.lock().clone()
    }
}

impl Navigator for PrintNavigator {
    fn navigate(&self, url: &str) -> Result<(), NavigationError> {
        println!("{}", url);
        *self.last.lock() = Some(url.to_string());
        Ok(())
    }
}

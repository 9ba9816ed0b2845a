//! The page surface the controller drives.
//!
//! Every element is optional. The controller checks presence before each
//! update and silently skips elements that are missing.

use parking_lot::Mutex;
use std::sync::Arc;

use startpage_weather::Fragment;

/// An element showing read-only text.
pub trait TextElement: Send + Sync {
    fn set_text(&self, text: &str);

    /// Set text made of plain and bold runs. Elements without emphasis
    /// support can keep the default, which drops the markup.
    fn set_fragments(&self, fragments: &[Fragment]) {
        let text: String = fragments.iter().map(Fragment::text).collect();
        self.set_text(&text);
    }
}

/// An editable text field.
pub trait InputElement: Send + Sync {
    fn value(&self) -> String;
    fn set_value(&self, value: &str);
}

/// Modal display style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    #[default]
    None,
    Flex,
}

impl Display {
    /// `Flex` becomes `None`; anything else becomes `Flex`.
    pub fn toggled(self) -> Self {
        match self {
            Display::Flex => Display::None,
            Display::None => Display::Flex,
        }
    }
}

pub trait ModalElement: Send + Sync {
    fn display(&self) -> Display;
    fn set_display(&self, display: Display);
}

/// The page itself.
pub trait PageBody: Send + Sync {
    /// `css` is a full `background-image` value, e.g. `url('bg.png')`.
    fn set_background_image(&self, css: &str);
}

/// Handles to whichever elements the page actually has.
#[derive(Clone, Default)]
pub struct PageElements {
    pub clock: Option<Arc<dyn TextElement>>,
    pub weather: Option<Arc<dyn TextElement>>,
    pub background_input: Option<Arc<dyn InputElement>>,
    pub city_input: Option<Arc<dyn InputElement>>,
    pub settings_modal: Option<Arc<dyn ModalElement>>,
    pub search_input: Option<Arc<dyn InputElement>>,
    pub body: Option<Arc<dyn PageBody>>,
}

/// Text element that remembers what it was last given.
#[derive(Debug, Default)]
pub struct TextCell {
    fragments: Mutex<Vec<Fragment>>,
}

impl TextCell {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn text(&self) -> String {
        self.fragments.lock().iter().map(Fragment::text).collect()
    }

    pub fn fragments(&self) -> Vec<Fragment> {
        self.fragments.lock().clone()
    }
}

impl TextElement for TextCell {
    fn set_text(&self, text: &str) {
        *self.fragments.lock() = vec![Fragment::Plain(text.to_string())];
    }

    fn set_fragments(&self, fragments: &[Fragment]) {
        *self.fragments.lock() = fragments.to_vec();
    }
}

#[derive(Debug, Default)]
pub struct InputCell {
    value: Mutex<String>,
}

impl InputCell {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

impl InputElement for InputCell {
    fn value(&self) -> String {
        self.value.lock().clone()
    }

    fn set_value(&self, value: &str) {
        *self.value.lock() = value.to_string();
    }
}

#[derive(Debug, Default)]
pub struct ModalCell {
    display: Mutex<Display>,
}

impl ModalCell {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

impl ModalElement for ModalCell {
    fn display(&self) -> Display {
        *self.display.lock()
    }

    fn set_display(&self, display: Display) {
        *self.display.lock() = display;
    }
}

#[derive(Debug, Default)]
pub struct BodyCell {
    background: Mutex<Option<String>>,
}

impl BodyCell {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn background(&self) -> Option<String> {
        self.background.lock().clone()
    }
}

impl PageBody for BodyCell {
    fn set_background_image(&self, css: &str) {
        *self.background.lock() = Some(css.to_string());
    }
}

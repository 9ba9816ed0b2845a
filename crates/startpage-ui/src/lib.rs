pub mod browser;
pub mod clock;
pub mod controller;
pub mod elements;
pub mod error_mapping;
pub mod terminal;

pub use browser::{BrowserNavigator, NavigationError, Navigator, PrintNavigator};
pub use clock::{format_clock, Clock, ClockError};
pub use controller::{ReadyTasks, StartPage};
pub use elements::{
    BodyCell, Display, InputCell, InputElement, ModalCell, ModalElement, PageBody, PageElements,
    TextCell, TextElement,
};
pub use terminal::{join_renderer, Command, TerminalPage};

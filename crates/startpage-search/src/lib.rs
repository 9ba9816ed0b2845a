//! Search box routing: decide whether input is an address to open or a
//! query to hand to the search engine.

pub mod classify;
pub mod route;

pub use classify::is_navigable_address;
pub use route::{encode_query, Navigation, SearchRouter, DEFAULT_ENGINE_URL};

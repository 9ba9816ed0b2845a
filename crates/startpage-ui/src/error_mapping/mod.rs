//! Conversions from UI-side errors into the core `AppError` hierarchy.

mod clock;
mod navigation;

use startpage_core::AppError;

use crate::clock::ClockError;

impl From<ClockError> for AppError {
    fn from(e: ClockError) -> Self {
        AppError::Clock(e.to_string())
    }
}

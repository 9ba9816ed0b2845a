use startpage_core::AppError;

use crate::browser::NavigationError;

impl From<NavigationError> for AppError {
    fn from(e: NavigationError) -> Self {
        AppError::Navigation(e.to_string())
    }
}

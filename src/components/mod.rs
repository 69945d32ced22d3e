pub mod form_generator;
pub mod navbar;
pub mod progress_bar;
pub mod require_auth;
pub mod status_badge;
pub mod visa_card;

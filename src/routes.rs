pub const HOME: &str = "/";
pub const LOGIN: &str = "/login";
pub const SIGNUP: &str = "/signup";
pub const DASHBOARD: &str = "/dashboard";
pub const VISA_SELECT: &str = "/visa-select";

pub fn application_detail(id: &str) -> String {
    format!("/applications/{}", id)
}

pub mod application_detail;
pub mod dashboard;
pub mod landing;
pub mod login;
pub mod signup;
pub mod visa_select;

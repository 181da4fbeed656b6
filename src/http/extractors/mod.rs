pub mod current_profile;
pub mod json_body;

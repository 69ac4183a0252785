pub mod admin;
pub mod health_check;
pub mod home;
pub mod mailing_list;

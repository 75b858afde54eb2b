pub mod activity;
pub mod doctor;

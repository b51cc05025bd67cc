pub mod aqi;
pub mod notification;

pub mod api;
pub mod fmt;
pub mod message;
pub mod property;
pub mod settings;
pub mod state;
pub mod tax;
pub mod ticket;
pub mod user;
pub mod visa;

pub use settings::Settings;

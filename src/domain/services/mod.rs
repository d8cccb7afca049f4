pub mod actions;
mod app_state;
mod auth_services;
mod composer;
pub mod derivation;
pub mod events;
mod history;
mod scroll;
mod workflow;

pub use app_state::*;
pub use auth_services::*;
pub use composer::*;
pub use history::*;
pub use scroll::*;
pub use workflow::*;

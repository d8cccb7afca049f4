mod action;
mod event;
mod formula;
mod gateway;
mod history;
mod loading;
mod session_store;
mod solve;
mod symbol;
mod workflow;

pub use action::*;
pub use event::*;
pub use formula::*;
pub use gateway::*;
pub use history::*;
pub use loading::*;
pub use session_store::*;
pub use solve::*;
pub use symbol::*;
pub use workflow::*;

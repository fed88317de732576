#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod blueprint;
mod error;
mod exercise;
mod expansion;
mod feedback;
mod media;
mod name;
mod progress;
mod reconciliation;
mod service;
mod session;
mod template;
mod user;
mod workout;

pub use blueprint::*;
pub use error::*;
pub use exercise::*;
pub use expansion::*;
pub use feedback::*;
pub use media::*;
pub use name::*;
pub use progress::*;
pub use reconciliation::*;
pub use service::*;
pub use session::*;
pub use template::*;
pub use user::*;
pub use workout::*;

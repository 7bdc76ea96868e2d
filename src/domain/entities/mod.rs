//! Core business entities.

pub mod club;
pub mod event;
pub mod user;

pub use club::{Club, ClubPatch, NewClub};
pub use event::{Event, EventButton, EventPatch, NewEvent};
pub use user::{NewUser, Role, User};

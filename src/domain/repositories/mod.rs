//! Repository traits decoupling services from the persistence layer.

pub mod club_repository;
pub mod event_repository;
pub mod user_repository;

pub use club_repository::ClubRepository;
pub use event_repository::{ClubEventCount, DateOrder, EventFilter, EventRepository};
pub use user_repository::{RoleCount, UserFilter, UserRepository};

#[cfg(test)]
pub use club_repository::MockClubRepository;
#[cfg(test)]
pub use event_repository::MockEventRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;

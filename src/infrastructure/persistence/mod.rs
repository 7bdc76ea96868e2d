//! PostgreSQL repository implementations.

pub mod pg_club_repository;
pub mod pg_event_repository;
pub mod pg_user_repository;

pub use pg_club_repository::PgClubRepository;
pub use pg_event_repository::PgEventRepository;
pub use pg_user_repository::PgUserRepository;

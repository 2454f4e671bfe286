//! PostgreSQL data access. One zero-sized repo type per table.

mod speed_interval_repo;
mod speed_reading_repo;

pub use speed_interval_repo::SpeedIntervalRepo;
pub use speed_reading_repo::SpeedReadingRepo;

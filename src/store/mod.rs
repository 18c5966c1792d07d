pub mod archive;
pub mod habits;

pub use archive::WeekArchive;
pub use habits::HabitStore;

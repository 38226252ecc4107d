pub mod breaks;
pub mod core;
pub mod timetable;

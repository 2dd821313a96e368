pub mod schedule_entry_repository;
pub mod staff_repository;

pub use schedule_entry_repository::ScheduleEntryRepository;
pub use staff_repository::StaffRepository;

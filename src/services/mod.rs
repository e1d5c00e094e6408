pub mod assignments;
pub mod system;
pub mod teachers;

pub use assignments::AssignmentService;
pub use system::SystemService;
pub use teachers::TeacherService;

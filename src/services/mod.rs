pub mod auth;
pub mod blocks;
pub mod classrooms;
pub mod departments;
pub mod feedback;
pub mod files;
pub mod grades;
pub mod projects;
pub mod schools;
pub mod students;
pub mod users;

pub use auth::AuthService;
pub use blocks::BlockService;
pub use classrooms::ClassroomService;
pub use departments::DepartmentService;
pub use feedback::FeedbackService;
pub use files::FileService;
pub use grades::GradeService;
pub use projects::ProjectService;
pub use schools::SchoolService;
pub use students::StudentService;
pub use users::UserService;

pub mod auth;

pub mod users;

pub mod schools;

pub mod students;

pub mod projects;

pub mod grades;

pub mod feedback;

pub mod blocks;

pub mod classrooms;

pub mod departments;

pub mod files;

pub use auth::configure_auth_routes;
pub use blocks::configure_block_routes;
pub use classrooms::configure_classroom_routes;
pub use departments::configure_department_routes;
pub use feedback::configure_feedback_routes;
pub use files::configure_file_routes;
pub use grades::configure_grade_routes;
pub use projects::configure_project_routes;
pub use schools::configure_school_routes;
pub use students::configure_student_routes;
pub use users::configure_user_routes;

//! 预导入模块，方便使用

pub use super::blocks::{ActiveModel as BlockActiveModel, Entity as Blocks, Model as BlockModel};
pub use super::classrooms::{
    ActiveModel as ClassroomActiveModel, Entity as Classrooms, Model as ClassroomModel,
};
pub use super::departments::{
    ActiveModel as DepartmentActiveModel, Entity as Departments, Model as DepartmentModel,
};
pub use super::files::{ActiveModel as FileActiveModel, Entity as Files, Model as FileModel};
pub use super::project_feedback::{
    ActiveModel as FeedbackActiveModel, Entity as ProjectFeedback, Model as FeedbackModel,
};
pub use super::project_grades::{
    ActiveModel as GradeActiveModel, Entity as ProjectGrades, Model as GradeModel,
};
pub use super::projects::{
    ActiveModel as ProjectActiveModel, Entity as Projects, Model as ProjectModel,
};
pub use super::schools::{
    ActiveModel as SchoolActiveModel, Entity as Schools, Model as SchoolModel,
};
pub use super::students::{
    ActiveModel as StudentActiveModel, Entity as Students, Model as StudentModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};

use std::sync::Arc;

use uuid::Uuid;

use crate::models::{
    blocks::{
        entities::Block,
        requests::{BlockListQuery, CreateBlockRequest, UpdateBlockRequest},
        responses::BlockListResponse,
    },
    classrooms::{
        entities::Classroom,
        requests::{ClassroomListQuery, CreateClassroomRequest, UpdateClassroomRequest},
        responses::ClassroomListResponse,
    },
    departments::{
        entities::Department,
        requests::{CreateDepartmentRequest, DepartmentListQuery, UpdateDepartmentRequest},
        responses::DepartmentListResponse,
    },
    feedback::{
        entities::ProjectFeedback,
        requests::{CreateFeedbackRequest, FeedbackListQuery, UpdateFeedbackRequest},
        responses::FeedbackListResponse,
    },
    files::entities::File,
    grades::{
        entities::ProjectGrade,
        requests::{CreateGradeRequest, GradeListQuery, UpdateGradeRequest},
        responses::GradeListResponse,
    },
    projects::{
        entities::Project,
        requests::{CreateProjectRequest, ProjectListQuery, UpdateProjectRequest},
        responses::ProjectListResponse,
    },
    schools::{
        entities::School,
        requests::{CreateSchoolRequest, SchoolListQuery, UpdateSchoolRequest},
        responses::SchoolListResponse,
    },
    students::{
        entities::Student,
        requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
        responses::StudentListResponse,
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: Uuid) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 更新用户信息
    async fn update_user(&self, id: Uuid, update: UpdateUserRequest) -> Result<Option<User>>;
    // 删除用户
    async fn delete_user(&self, id: Uuid) -> Result<bool>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: Uuid) -> Result<bool>;
    // 统计用户总数（用于首次启动时初始化管理员）
    async fn count_users(&self) -> Result<u64>;

    /// 学校管理方法
    async fn create_school(&self, school: CreateSchoolRequest) -> Result<School>;
    async fn get_school_by_id(&self, id: Uuid) -> Result<Option<School>>;
    async fn get_school_by_name(&self, name: &str) -> Result<Option<School>>;
    async fn list_schools_with_pagination(
        &self,
        query: SchoolListQuery,
    ) -> Result<SchoolListResponse>;
    async fn update_school(&self, id: Uuid, update: UpdateSchoolRequest)
    -> Result<Option<School>>;
    async fn delete_school(&self, id: Uuid) -> Result<bool>;

    /// 学生管理方法
    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student>;
    async fn get_student_by_id(&self, id: Uuid) -> Result<Option<Student>>;
    // 通过学校内唯一学号获取学生
    async fn get_student_by_number(
        &self,
        school_id: Uuid,
        student_number: &str,
    ) -> Result<Option<Student>>;
    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse>;
    async fn update_student(
        &self,
        id: Uuid,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>>;
    async fn delete_student(&self, id: Uuid) -> Result<bool>;

    /// 项目管理方法
    async fn create_project(&self, project: CreateProjectRequest) -> Result<Project>;
    async fn get_project_by_id(&self, id: Uuid) -> Result<Option<Project>>;
    async fn list_projects_with_pagination(
        &self,
        query: ProjectListQuery,
    ) -> Result<ProjectListResponse>;
    async fn update_project(
        &self,
        id: Uuid,
        update: UpdateProjectRequest,
    ) -> Result<Option<Project>>;
    async fn delete_project(&self, id: Uuid) -> Result<bool>;

    /// 评分管理方法
    async fn create_grade(&self, grader_id: Uuid, grade: CreateGradeRequest)
    -> Result<ProjectGrade>;
    // 批量创建评分（单事务，全部成功或全部失败）
    async fn bulk_create_grades(
        &self,
        grader_id: Uuid,
        grades: Vec<CreateGradeRequest>,
    ) -> Result<Vec<ProjectGrade>>;
    async fn get_grade_by_id(&self, id: Uuid) -> Result<Option<ProjectGrade>>;
    // 通过 (项目, 学生) 组合获取评分
    async fn get_grade_by_project_and_student(
        &self,
        project_id: Uuid,
        student_id: Uuid,
    ) -> Result<Option<ProjectGrade>>;
    async fn list_grades_with_pagination(&self, query: GradeListQuery)
    -> Result<GradeListResponse>;
    async fn update_grade(
        &self,
        id: Uuid,
        update: UpdateGradeRequest,
    ) -> Result<Option<ProjectGrade>>;
    async fn delete_grade(&self, id: Uuid) -> Result<bool>;

    /// 反馈管理方法
    async fn create_feedback(
        &self,
        author_id: Uuid,
        feedback: CreateFeedbackRequest,
    ) -> Result<ProjectFeedback>;
    async fn get_feedback_by_id(&self, id: Uuid) -> Result<Option<ProjectFeedback>>;
    async fn list_feedback_with_pagination(
        &self,
        query: FeedbackListQuery,
    ) -> Result<FeedbackListResponse>;
    async fn update_feedback(
        &self,
        id: Uuid,
        update: UpdateFeedbackRequest,
    ) -> Result<Option<ProjectFeedback>>;
    // 软删除：仅修改状态为 deleted
    async fn delete_feedback(&self, id: Uuid) -> Result<bool>;

    /// 楼栋管理方法
    async fn create_block(&self, block: CreateBlockRequest) -> Result<Block>;
    async fn get_block_by_id(&self, id: Uuid) -> Result<Option<Block>>;
    async fn list_blocks_with_pagination(&self, query: BlockListQuery)
    -> Result<BlockListResponse>;
    async fn update_block(&self, id: Uuid, update: UpdateBlockRequest) -> Result<Option<Block>>;
    async fn delete_block(&self, id: Uuid) -> Result<bool>;

    /// 教室管理方法
    async fn create_classroom(&self, classroom: CreateClassroomRequest) -> Result<Classroom>;
    async fn get_classroom_by_id(&self, id: Uuid) -> Result<Option<Classroom>>;
    async fn list_classrooms_with_pagination(
        &self,
        query: ClassroomListQuery,
    ) -> Result<ClassroomListResponse>;
    async fn update_classroom(
        &self,
        id: Uuid,
        update: UpdateClassroomRequest,
    ) -> Result<Option<Classroom>>;
    async fn delete_classroom(&self, id: Uuid) -> Result<bool>;
    // 批量删除教室（单事务，任一 ID 不存在时整批中止）
    async fn bulk_delete_classrooms(&self, ids: &[Uuid]) -> Result<u64>;

    /// 院系管理方法
    async fn create_department(&self, department: CreateDepartmentRequest) -> Result<Department>;
    async fn get_department_by_id(&self, id: Uuid) -> Result<Option<Department>>;
    async fn list_departments_with_pagination(
        &self,
        query: DepartmentListQuery,
    ) -> Result<DepartmentListResponse>;
    async fn update_department(
        &self,
        id: Uuid,
        update: UpdateDepartmentRequest,
    ) -> Result<Option<Department>>;
    async fn delete_department(&self, id: Uuid) -> Result<bool>;

    /// 文件管理方法
    // 记录上传文件的元数据（file_id 由服务层生成，同时作为磁盘存储名）
    async fn upload_file(
        &self,
        file_id: Uuid,
        file_name: &str,
        file_size: i64,
        mime_type: &str,
        uploader_id: Uuid,
    ) -> Result<File>;
    async fn get_file_by_id(&self, id: Uuid) -> Result<Option<File>>;
    async fn delete_file(&self, id: Uuid) -> Result<bool>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}

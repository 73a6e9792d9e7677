//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod blocks;
mod classrooms;
mod departments;
mod feedback;
mod files;
mod grades;
mod projects;
mod schools;
mod students;
mod users;

use crate::config::AppConfig;
use crate::errors::{CampusError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| CampusError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| CampusError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| CampusError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| CampusError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(CampusError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: Uuid) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user(&self, id: Uuid, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn update_last_login(&self, id: Uuid) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 学校模块
    async fn create_school(&self, school: CreateSchoolRequest) -> Result<School> {
        self.create_school_impl(school).await
    }

    async fn get_school_by_id(&self, id: Uuid) -> Result<Option<School>> {
        self.get_school_by_id_impl(id).await
    }

    async fn get_school_by_name(&self, name: &str) -> Result<Option<School>> {
        self.get_school_by_name_impl(name).await
    }

    async fn list_schools_with_pagination(
        &self,
        query: SchoolListQuery,
    ) -> Result<SchoolListResponse> {
        self.list_schools_with_pagination_impl(query).await
    }

    async fn update_school(
        &self,
        id: Uuid,
        update: UpdateSchoolRequest,
    ) -> Result<Option<School>> {
        self.update_school_impl(id, update).await
    }

    async fn delete_school(&self, id: Uuid) -> Result<bool> {
        self.delete_school_impl(id).await
    }

    // 学生模块
    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student> {
        self.create_student_impl(student).await
    }

    async fn get_student_by_id(&self, id: Uuid) -> Result<Option<Student>> {
        self.get_student_by_id_impl(id).await
    }

    async fn get_student_by_number(
        &self,
        school_id: Uuid,
        student_number: &str,
    ) -> Result<Option<Student>> {
        self.get_student_by_number_impl(school_id, student_number)
            .await
    }

    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        self.list_students_with_pagination_impl(query).await
    }

    async fn update_student(
        &self,
        id: Uuid,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        self.update_student_impl(id, update).await
    }

    async fn delete_student(&self, id: Uuid) -> Result<bool> {
        self.delete_student_impl(id).await
    }

    // 项目模块
    async fn create_project(&self, project: CreateProjectRequest) -> Result<Project> {
        self.create_project_impl(project).await
    }

    async fn get_project_by_id(&self, id: Uuid) -> Result<Option<Project>> {
        self.get_project_by_id_impl(id).await
    }

    async fn list_projects_with_pagination(
        &self,
        query: ProjectListQuery,
    ) -> Result<ProjectListResponse> {
        self.list_projects_with_pagination_impl(query).await
    }

    async fn update_project(
        &self,
        id: Uuid,
        update: UpdateProjectRequest,
    ) -> Result<Option<Project>> {
        self.update_project_impl(id, update).await
    }

    async fn delete_project(&self, id: Uuid) -> Result<bool> {
        self.delete_project_impl(id).await
    }

    // 评分模块
    async fn create_grade(
        &self,
        grader_id: Uuid,
        grade: CreateGradeRequest,
    ) -> Result<ProjectGrade> {
        self.create_grade_impl(grader_id, grade).await
    }

    async fn bulk_create_grades(
        &self,
        grader_id: Uuid,
        grades: Vec<CreateGradeRequest>,
    ) -> Result<Vec<ProjectGrade>> {
        self.bulk_create_grades_impl(grader_id, grades).await
    }

    async fn get_grade_by_id(&self, id: Uuid) -> Result<Option<ProjectGrade>> {
        self.get_grade_by_id_impl(id).await
    }

    async fn get_grade_by_project_and_student(
        &self,
        project_id: Uuid,
        student_id: Uuid,
    ) -> Result<Option<ProjectGrade>> {
        self.get_grade_by_project_and_student_impl(project_id, student_id)
            .await
    }

    async fn list_grades_with_pagination(
        &self,
        query: GradeListQuery,
    ) -> Result<GradeListResponse> {
        self.list_grades_with_pagination_impl(query).await
    }

    async fn update_grade(
        &self,
        id: Uuid,
        update: UpdateGradeRequest,
    ) -> Result<Option<ProjectGrade>> {
        self.update_grade_impl(id, update).await
    }

    async fn delete_grade(&self, id: Uuid) -> Result<bool> {
        self.delete_grade_impl(id).await
    }

    // 反馈模块
    async fn create_feedback(
        &self,
        author_id: Uuid,
        feedback: CreateFeedbackRequest,
    ) -> Result<ProjectFeedback> {
        self.create_feedback_impl(author_id, feedback).await
    }

    async fn get_feedback_by_id(&self, id: Uuid) -> Result<Option<ProjectFeedback>> {
        self.get_feedback_by_id_impl(id).await
    }

    async fn list_feedback_with_pagination(
        &self,
        query: FeedbackListQuery,
    ) -> Result<FeedbackListResponse> {
        self.list_feedback_with_pagination_impl(query).await
    }

    async fn update_feedback(
        &self,
        id: Uuid,
        update: UpdateFeedbackRequest,
    ) -> Result<Option<ProjectFeedback>> {
        self.update_feedback_impl(id, update).await
    }

    async fn delete_feedback(&self, id: Uuid) -> Result<bool> {
        self.delete_feedback_impl(id).await
    }

    // 楼栋模块
    async fn create_block(&self, block: CreateBlockRequest) -> Result<Block> {
        self.create_block_impl(block).await
    }

    async fn get_block_by_id(&self, id: Uuid) -> Result<Option<Block>> {
        self.get_block_by_id_impl(id).await
    }

    async fn list_blocks_with_pagination(
        &self,
        query: BlockListQuery,
    ) -> Result<BlockListResponse> {
        self.list_blocks_with_pagination_impl(query).await
    }

    async fn update_block(&self, id: Uuid, update: UpdateBlockRequest) -> Result<Option<Block>> {
        self.update_block_impl(id, update).await
    }

    async fn delete_block(&self, id: Uuid) -> Result<bool> {
        self.delete_block_impl(id).await
    }

    // 教室模块
    async fn create_classroom(&self, classroom: CreateClassroomRequest) -> Result<Classroom> {
        self.create_classroom_impl(classroom).await
    }

    async fn get_classroom_by_id(&self, id: Uuid) -> Result<Option<Classroom>> {
        self.get_classroom_by_id_impl(id).await
    }

    async fn list_classrooms_with_pagination(
        &self,
        query: ClassroomListQuery,
    ) -> Result<ClassroomListResponse> {
        self.list_classrooms_with_pagination_impl(query).await
    }

    async fn update_classroom(
        &self,
        id: Uuid,
        update: UpdateClassroomRequest,
    ) -> Result<Option<Classroom>> {
        self.update_classroom_impl(id, update).await
    }

    async fn delete_classroom(&self, id: Uuid) -> Result<bool> {
        self.delete_classroom_impl(id).await
    }

    async fn bulk_delete_classrooms(&self, ids: &[Uuid]) -> Result<u64> {
        self.bulk_delete_classrooms_impl(ids).await
    }

    // 院系模块
    async fn create_department(&self, department: CreateDepartmentRequest) -> Result<Department> {
        self.create_department_impl(department).await
    }

    async fn get_department_by_id(&self, id: Uuid) -> Result<Option<Department>> {
        self.get_department_by_id_impl(id).await
    }

    async fn list_departments_with_pagination(
        &self,
        query: DepartmentListQuery,
    ) -> Result<DepartmentListResponse> {
        self.list_departments_with_pagination_impl(query).await
    }

    async fn update_department(
        &self,
        id: Uuid,
        update: UpdateDepartmentRequest,
    ) -> Result<Option<Department>> {
        self.update_department_impl(id, update).await
    }

    async fn delete_department(&self, id: Uuid) -> Result<bool> {
        self.delete_department_impl(id).await
    }

    // 文件模块
    async fn upload_file(
        &self,
        file_id: Uuid,
        file_name: &str,
        file_size: i64,
        mime_type: &str,
        uploader_id: Uuid,
    ) -> Result<File> {
        self.upload_file_impl(file_id, file_name, file_size, mime_type, uploader_id)
            .await
    }

    async fn get_file_by_id(&self, id: Uuid) -> Result<Option<File>> {
        self.get_file_by_id_impl(id).await
    }

    async fn delete_file(&self, id: Uuid) -> Result<bool> {
        self.delete_file_impl(id).await
    }
}

#[cfg(test)]
impl SeaOrmStorage {
    /// 内存 SQLite 存储，连接数固定为 1 以共享同一内存库
    pub(crate) async fn in_memory() -> Self {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).min_connections(1).sqlx_logging(false);

        let db = Database::connect(opt)
            .await
            .expect("failed to open in-memory sqlite");
        Migrator::up(&db, None)
            .await
            .expect("failed to run migrations");

        Self { db }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::blocks::entities::Block;
    use crate::models::classrooms::entities::Classroom;
    use crate::models::grades::requests::UpdateGradeRequest;
    use crate::models::projects::entities::Project;
    use crate::models::schools::entities::School;
    use crate::models::students::entities::Student;
    use crate::models::users::entities::UserRole;

    async fn seed_school(storage: &SeaOrmStorage, name: &str) -> School {
        storage
            .create_school_impl(CreateSchoolRequest {
                name: name.into(),
                address: None,
                phone: None,
            })
            .await
            .unwrap()
    }

    async fn seed_teacher(storage: &SeaOrmStorage, school_id: Uuid, username: &str) -> User {
        storage
            .create_user_impl(CreateUserRequest {
                school_id: Some(school_id),
                username: username.into(),
                email: format!("{username}@example.com"),
                password: "hashed-password".into(),
                role: UserRole::Teacher,
                display_name: None,
            })
            .await
            .unwrap()
    }

    async fn seed_project(storage: &SeaOrmStorage, school_id: Uuid, teacher_id: Uuid) -> Project {
        storage
            .create_project_impl(CreateProjectRequest {
                school_id: Some(school_id),
                teacher_id: Some(teacher_id),
                title: "期末大作业".into(),
                description: None,
                max_score: Some(100.0),
                deadline: None,
            })
            .await
            .unwrap()
    }

    async fn seed_student(storage: &SeaOrmStorage, school_id: Uuid, number: &str) -> Student {
        storage
            .create_student_impl(CreateStudentRequest {
                school_id: Some(school_id),
                user_id: None,
                classroom_id: None,
                student_number: number.into(),
                full_name: "张三".into(),
            })
            .await
            .unwrap()
    }

    async fn seed_block(storage: &SeaOrmStorage, school_id: Uuid) -> Block {
        storage
            .create_block_impl(CreateBlockRequest {
                school_id: Some(school_id),
                name: "教学楼A".into(),
                description: None,
            })
            .await
            .unwrap()
    }

    async fn seed_classroom(
        storage: &SeaOrmStorage,
        school_id: Uuid,
        block_id: Uuid,
        name: &str,
    ) -> Classroom {
        storage
            .create_classroom_impl(CreateClassroomRequest {
                school_id: Some(school_id),
                block_id,
                name: name.into(),
                capacity: Some(60),
                floor: Some(3),
            })
            .await
            .unwrap()
    }

    fn grade_request(project_id: Uuid, student_id: Uuid, score: f64) -> CreateGradeRequest {
        CreateGradeRequest {
            project_id,
            student_id,
            score,
            comment: None,
        }
    }

    #[actix_web::test]
    async fn test_grade_unique_per_project_and_student() {
        let storage = SeaOrmStorage::in_memory().await;
        let school = seed_school(&storage, "清华大学").await;
        let teacher = seed_teacher(&storage, school.id, "teacher1").await;
        let project = seed_project(&storage, school.id, teacher.id).await;
        let student = seed_student(&storage, school.id, "2026001").await;

        storage
            .create_grade_impl(teacher.id, grade_request(project.id, student.id, 88.0))
            .await
            .unwrap();

        // 同一 (项目, 学生) 的第二条评分必须被唯一索引拒绝
        let dup = storage
            .create_grade_impl(teacher.id, grade_request(project.id, student.id, 95.0))
            .await;
        assert!(dup.is_err());

        // 原评分未被覆盖
        let kept = storage
            .get_grade_by_project_and_student_impl(project.id, student.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(kept.score, 88.0);
    }

    #[actix_web::test]
    async fn test_student_number_unique_within_school() {
        let storage = SeaOrmStorage::in_memory().await;
        let school_a = seed_school(&storage, "北京大学").await;
        let school_b = seed_school(&storage, "复旦大学").await;

        seed_student(&storage, school_a.id, "2026001").await;

        // 同校重复学号被拒绝
        let dup = storage
            .create_student_impl(CreateStudentRequest {
                school_id: Some(school_a.id),
                user_id: None,
                classroom_id: None,
                student_number: "2026001".into(),
                full_name: "李四".into(),
            })
            .await;
        assert!(dup.is_err());

        // 不同学校可以使用相同学号
        let other = seed_student(&storage, school_b.id, "2026001").await;
        assert_eq!(other.school_id, school_b.id);
    }

    #[actix_web::test]
    async fn test_update_and_delete_missing_rows() {
        let storage = SeaOrmStorage::in_memory().await;
        let missing = Uuid::new_v4();

        let updated = storage
            .update_grade_impl(
                missing,
                UpdateGradeRequest {
                    score: Some(60.0),
                    comment: None,
                },
            )
            .await
            .unwrap();
        assert!(updated.is_none());

        assert!(!storage.delete_grade_impl(missing).await.unwrap());
        assert!(!storage.delete_feedback_impl(missing).await.unwrap());
        assert!(!storage.delete_classroom_impl(missing).await.unwrap());
    }

    #[actix_web::test]
    async fn test_bulk_create_grades_all_or_nothing() {
        let storage = SeaOrmStorage::in_memory().await;
        let school = seed_school(&storage, "浙江大学").await;
        let teacher = seed_teacher(&storage, school.id, "teacher2").await;
        let project = seed_project(&storage, school.id, teacher.id).await;
        let student_a = seed_student(&storage, school.id, "2026001").await;
        let student_b = seed_student(&storage, school.id, "2026002").await;

        // student_b 已有评分，批量写入必然撞唯一索引
        storage
            .create_grade_impl(teacher.id, grade_request(project.id, student_b.id, 70.0))
            .await
            .unwrap();

        let result = storage
            .bulk_create_grades_impl(
                teacher.id,
                vec![
                    grade_request(project.id, student_a.id, 80.0),
                    grade_request(project.id, student_b.id, 90.0),
                ],
            )
            .await;
        assert!(result.is_err());

        // 整批回滚：student_a 不应留下任何评分
        let leaked = storage
            .get_grade_by_project_and_student_impl(project.id, student_a.id)
            .await
            .unwrap();
        assert!(leaked.is_none());

        let listed = storage
            .list_grades_with_pagination_impl(GradeListQuery {
                project_id: Some(project.id),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(listed.pagination.total, 1);
    }

    #[actix_web::test]
    async fn test_bulk_create_grades_returns_request_order() {
        let storage = SeaOrmStorage::in_memory().await;
        let school = seed_school(&storage, "南京大学").await;
        let teacher = seed_teacher(&storage, school.id, "teacher3").await;
        let project = seed_project(&storage, school.id, teacher.id).await;
        let student_a = seed_student(&storage, school.id, "2026001").await;
        let student_b = seed_student(&storage, school.id, "2026002").await;
        let student_c = seed_student(&storage, school.id, "2026003").await;

        let created = storage
            .bulk_create_grades_impl(
                teacher.id,
                vec![
                    grade_request(project.id, student_c.id, 70.0),
                    grade_request(project.id, student_a.id, 80.0),
                    grade_request(project.id, student_b.id, 90.0),
                ],
            )
            .await
            .unwrap();

        let students: Vec<Uuid> = created.iter().map(|g| g.student_id).collect();
        assert_eq!(students, vec![student_c.id, student_a.id, student_b.id]);
        assert_eq!(created[0].score, 70.0);
        assert_eq!(created[2].score, 90.0);
    }

    #[actix_web::test]
    async fn test_bulk_delete_classrooms_aborts_on_missing_id() {
        let storage = SeaOrmStorage::in_memory().await;
        let school = seed_school(&storage, "武汉大学").await;
        let block = seed_block(&storage, school.id).await;
        let room_a = seed_classroom(&storage, school.id, block.id, "A101").await;
        let room_b = seed_classroom(&storage, school.id, block.id, "A102").await;

        // 任一 ID 不存在即整批中止
        let result = storage
            .bulk_delete_classrooms_impl(&[room_a.id, Uuid::new_v4()])
            .await;
        assert!(result.is_err());

        assert!(
            storage
                .get_classroom_by_id_impl(room_a.id)
                .await
                .unwrap()
                .is_some()
        );
        assert!(
            storage
                .get_classroom_by_id_impl(room_b.id)
                .await
                .unwrap()
                .is_some()
        );

        // 全部存在时一次删光
        let deleted = storage
            .bulk_delete_classrooms_impl(&[room_a.id, room_b.id])
            .await
            .unwrap();
        assert_eq!(deleted, 2);
        assert!(
            storage
                .get_classroom_by_id_impl(room_a.id)
                .await
                .unwrap()
                .is_none()
        );
    }
}

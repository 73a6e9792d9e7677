//! 文件元数据存储操作

use super::SeaOrmStorage;
use crate::entity::files::{ActiveModel, Entity as Files};
use crate::errors::{CampusError, Result};
use crate::models::files::entities::File;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use uuid::Uuid;

impl SeaOrmStorage {
    /// 记录上传文件的元数据
    ///
    /// file_id 由服务层生成，同时作为磁盘存储名与下载 token。
    pub async fn upload_file_impl(
        &self,
        file_id: Uuid,
        file_name: &str,
        file_size: i64,
        mime_type: &str,
        uploader_id: Uuid,
    ) -> Result<File> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            id: Set(file_id),
            uploader_id: Set(uploader_id),
            file_name: Set(file_name.to_string()),
            file_size: Set(file_size),
            mime_type: Set(mime_type.to_string()),
            uploaded_at: Set(now),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("记录文件元数据失败: {e}")))?;

        Ok(result.into_file())
    }

    /// 通过 ID 获取文件元数据
    pub async fn get_file_by_id_impl(&self, id: Uuid) -> Result<Option<File>> {
        let result = Files::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("查询文件失败: {e}")))?;

        Ok(result.map(|m| m.into_file()))
    }

    /// 删除文件元数据（硬删除，磁盘清理由服务层负责）
    pub async fn delete_file_impl(&self, id: Uuid) -> Result<bool> {
        let result = Files::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("删除文件失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

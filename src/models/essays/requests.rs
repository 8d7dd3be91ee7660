use std::path::PathBuf;

/// 学生提交论文（文件已由上层放入上传目录）
#[derive(Debug, Clone)]
pub struct SubmitEssayRequest {
    pub student_id: i64,
    pub teacher_id: i64,
    pub title: String,
    pub file_path: PathBuf,
}

/// 存储层创建论文记录
#[derive(Debug, Clone)]
pub struct CreateEssayRequest {
    pub student_id: i64,
    pub teacher_id: i64,
    pub title: String,
    pub file_url: String,
}

//! 文档文本提取

use std::path::Path;

use lopdf::Document;
use tracing::debug;

use crate::errors::{EssaySystemError, Result};
use crate::utils::file_magic::{dotted_extension, validate_magic_bytes};

/// 把已上传的文档转换为纯文本
pub trait TextExtractor: Send + Sync {
    /// 返回去除首尾空白后的全文；空串表示没有可提取的文本层
    fn extract(&self, path: &Path) -> Result<String>;
}

/// 基于 lopdf 的提取器，另外支持 `.txt` / `.md` 纯文本
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentTextExtractor;

impl DocumentTextExtractor {
    fn extract_pdf(data: &[u8]) -> Result<String> {
        let document = Document::load_mem(data)?;
        let pages: Vec<u32> = document.get_pages().keys().copied().collect();

        let mut texts = Vec::with_capacity(pages.len());
        for page in pages {
            texts.push(document.extract_text(&[page])?);
        }

        Ok(texts.join("\n").trim().to_string())
    }
}

impl TextExtractor for DocumentTextExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        let extension = dotted_extension(path);
        let data = std::fs::read(path)?;

        if !validate_magic_bytes(&data, &extension) {
            return Err(EssaySystemError::extraction(format!(
                "文件内容与扩展名不匹配或格式不受支持: {}",
                path.display()
            )));
        }

        let text = match extension.as_str() {
            ".pdf" => Self::extract_pdf(&data)?,
            _ => String::from_utf8_lossy(&data).trim().to_string(),
        };

        debug!("Extracted {} chars from {}", text.len(), path.display());
        Ok(text)
    }
}

//! 분석 결과 JSON 파일 저장.

use emailai_core::error::CoreError;
use emailai_core::models::export::ExportDocument;
use std::path::{Path, PathBuf};
use tracing::info;

/// 내보내기 문서를 파일로 저장하고 실제 경로를 반환한다.
///
/// `path`가 디렉터리면 그 안에 제안 파일 이름으로 만든다.
pub async fn write_export(doc: &ExportDocument, path: &Path) -> Result<PathBuf, CoreError> {
    let target = if tokio::fs::metadata(path)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false)
    {
        path.join(doc.suggested_file_name())
    } else {
        path.to_path_buf()
    };

    let json = doc.to_json_pretty()?;
    tokio::fs::write(&target, json).await?;

    info!(path = %target.display(), "분석 결과 내보내기 완료");
    Ok(target)
}

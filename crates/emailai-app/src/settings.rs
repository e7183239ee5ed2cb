//! 설정 로드.
//!
//! 우선순위: CLI `--server` > 환경변수 `EMAILAI_*` > 설정 파일 > 기본값.
//! 시작 시 한 번 해석하여 각 어댑터에 주입한다.

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use directories::ProjectDirs;
use emailai_core::config::AppConfig;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 환경변수 접두사 (`EMAILAI_SERVICE__BASE_URL` 형식)
const ENV_PREFIX: &str = "EMAILAI";

/// 설정 파일 이름
const CONFIG_FILE_NAME: &str = "config.toml";

/// 플랫폼별 기본 설정 파일 경로
///
/// - macOS: `~/Library/Application Support/com.emailai.emailai/config.toml`
/// - Windows: `%APPDATA%\emailai\emailai\config\config.toml`
/// - Linux: `~/.config/emailai/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "emailai", "emailai").map(|p| p.config_dir().join(CONFIG_FILE_NAME))
}

/// 설정 로드
///
/// `config_path`를 명시하면 파일이 반드시 있어야 하고,
/// 기본 경로의 파일은 없으면 건너뛴다.
pub fn load(config_path: Option<&Path>, server: Option<&str>) -> Result<AppConfig> {
    let (path, required) = match config_path {
        Some(path) => (Some(path.to_path_buf()), true),
        None => (default_config_path(), false),
    };
    load_with(path.as_deref(), required, environment(), server)
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

fn load_with(
    file: Option<&Path>,
    required: bool,
    env: Environment,
    server: Option<&str>,
) -> Result<AppConfig> {
    let mut builder = Config::builder();
    if let Some(path) = file {
        debug!(path = %path.display(), required, "설정 파일");
        builder = builder.add_source(File::from(path).required(required));
    }

    let mut config: AppConfig = builder
        .add_source(env)
        .build()
        .context("설정 로드 실패")?
        .try_deserialize()
        .context("설정 형식 오류")?;

    if let Some(server) = server {
        config.service.base_url = Some(server.to_string());
    }

    config.validate().context("설정 검증 실패")?;
    debug!(
        base_url = %config.service.resolve_base_url(),
        max_entries = ?config.history.cap(),
        "설정 로드 완료"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use emailai_core::config::DEFAULT_BASE_URL;
    use std::collections::HashMap;
    use std::io::Write;

    fn env_with(vars: &[(&str, &str)]) -> Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        environment().source(Some(map))
    }

    fn write_toml(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn defaults_without_sources() {
        let config = load_with(None, false, env_with(&[]), None).unwrap();
        assert_eq!(config.service.resolve_base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.history.cap(), Some(20));
    }

    #[test]
    fn file_values_are_applied() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_toml(
            &dir,
            "[service]\nbase_url = \"http://file:8000\"\n\n[history]\nmax_entries = 5\n",
        );

        let config = load_with(Some(&path), true, env_with(&[]), None).unwrap();
        assert_eq!(config.service.resolve_base_url(), "http://file:8000");
        assert_eq!(config.history.cap(), Some(5));
        assert_eq!(config.history.preview_chars, 100);
    }

    #[test]
    fn env_overrides_file_and_cli_overrides_env() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_toml(&dir, "[service]\nbase_url = \"http://file:8000\"\n");

        let env = env_with(&[
            ("EMAILAI_SERVICE__BASE_URL", "http://env:8000"),
            ("EMAILAI_HISTORY__MAX_ENTRIES", "0"),
        ]);
        let config = load_with(Some(&path), true, env, None).unwrap();
        assert_eq!(config.service.resolve_base_url(), "http://env:8000");
        assert_eq!(config.history.cap(), None);

        let env = env_with(&[("EMAILAI_SERVICE__BASE_URL", "http://env:8000")]);
        let config = load_with(Some(&path), true, env, Some("http://cli:8000")).unwrap();
        assert_eq!(config.service.resolve_base_url(), "http://cli:8000");
    }

    #[test]
    fn explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nao-existe.toml");
        assert!(load_with(Some(&missing), true, env_with(&[]), None).is_err());
        assert!(load_with(Some(&missing), false, env_with(&[]), None).is_ok());
    }

    #[test]
    fn invalid_server_is_rejected() {
        assert!(load_with(None, false, env_with(&[]), Some("localhost:8000")).is_err());
    }
}

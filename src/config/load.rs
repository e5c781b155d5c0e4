use crate::config::types::{
    DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_PACING_MS, OracleSettings, UserSettings,
};
use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;
use std::time::Duration;

const SETTINGS_FILE: &str = "settings.json";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

impl UserSettings {
    /// 讀取工作目錄下的 settings.json，不存在時回傳預設值
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(SETTINGS_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings from {}", path.display()))
    }
}

impl OracleSettings {
    /// 從環境變數建立，`OPENAI_API_KEY` 為必填
    pub fn from_env(settings: &UserSettings) -> Result<Self> {
        Self::from_lookup(settings, |key| std::env::var(key).ok())
    }

    /// 以自訂查詢函式取值，環境變數優先於 settings.json
    pub fn from_lookup<F>(settings: &UserSettings, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let Some(api_key) = lookup("OPENAI_API_KEY").filter(|k| !k.trim().is_empty()) else {
            bail!("OPENAI_API_KEY not found. Set it in .env or environment.");
        };

        let model = lookup("OPENAI_MODEL")
            .or_else(|| settings.model.clone())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let base_url = lookup("OPENAI_BASE_URL")
            .or_else(|| settings.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let pacing = Duration::from_millis(settings.pacing_ms.unwrap_or(DEFAULT_PACING_MS));

        Ok(Self {
            api_key,
            model,
            base_url,
            timeout: REQUEST_TIMEOUT,
            pacing,
        })
    }
}

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use splynx_api::Credentials;
use splynx_core::TechnicianTable;
use splynx_reports::ReportConfig;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::{desktop_dir, ensure_app_home, home_dir, DIGEST_DIR_NAME, SUMMARY_DIR_NAME};

pub const API_KEY_ENV: &str = "SPLYNX_API_KEY";
pub const API_SECRET_ENV: &str = "SPLYNX_API_SECRET";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiSection,
    #[serde(default)]
    pub reports: ReportsSection,
    /// Assignee id (as a string key) → technician display name.
    #[serde(default)]
    pub technicians: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSection {
    /// API root, e.g. `https://splynx.example.com/api/2.0`
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub api_secret: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportsSection {
    /// Group unassigned calendar tasks under SIN_ASIGNAR instead of dropping them.
    #[serde(default)]
    pub include_unassigned: bool,
    /// Defaults to `<desktop>/Splynx_Comentarios`.
    pub digest_dir: Option<PathBuf>,
    /// Defaults to `<desktop>/Splynx_Tecnicos_Calendar`.
    pub summary_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        let technicians = [
            (23, "Antonio Marquez"),
            (24, "Andy Medina"),
            (26, "Emanuel Villalba"),
            (29, "Denis Corzo"),
            (32, "Rodrigo Sosa"),
            (39, "Fernando Recalde"),
        ]
        .into_iter()
        .map(|(id, name)| (id.to_string(), name.to_string()))
        .collect();

        Self {
            api: ApiSection {
                base_url: "https://splynx.example.com/api/2.0".to_string(),
                api_key: String::new(),
                api_secret: String::new(),
            },
            reports: ReportsSection::default(),
            technicians,
        }
    }
}

impl Config {
    /// Credentials from the config file, overridden by the environment.
    pub fn credentials(&self) -> Result<Credentials> {
        let api_key = std::env::var(API_KEY_ENV).unwrap_or_else(|_| self.api.api_key.clone());
        let api_secret =
            std::env::var(API_SECRET_ENV).unwrap_or_else(|_| self.api.api_secret.clone());
        if api_key.is_empty() || api_secret.is_empty() {
            bail!(
                "missing API credentials: set api.api_key/api.api_secret in the config file \
                 or {API_KEY_ENV}/{API_SECRET_ENV}"
            );
        }
        Ok(Credentials {
            api_key,
            api_secret,
        })
    }

    pub fn technician_table(&self) -> Result<TechnicianTable> {
        self.technicians
            .iter()
            .map(|(id, name)| -> Result<(u64, String)> {
                let id: u64 = id
                    .trim()
                    .parse()
                    .with_context(|| format!("technicians: key '{id}' is not a numeric admin id"))?;
                Ok((id, name.clone()))
            })
            .collect()
    }

    /// Explicit run configuration with output roots resolved against `desktop`.
    pub fn report_config(&self, desktop: &Path) -> Result<ReportConfig> {
        let digest_root = self
            .reports
            .digest_dir
            .clone()
            .unwrap_or_else(|| desktop.join(DIGEST_DIR_NAME));
        let summary_root = self
            .reports
            .summary_dir
            .clone()
            .unwrap_or_else(|| desktop.join(SUMMARY_DIR_NAME));

        Ok(ReportConfig::new(digest_root, summary_root)
            .with_technicians(self.technician_table()?)
            .with_unassigned(self.reports.include_unassigned))
    }

    /// [`Config::report_config`] against the user's desktop folder.
    pub fn report_config_for_user(&self) -> Result<ReportConfig> {
        self.report_config(&desktop_dir(&home_dir()?))
    }
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(ensure_app_home()?.join("config.toml"))
}

pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        bail!(
            "no config at {}. Run: splynx-reports config init",
            path.display()
        );
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", path.display()))
}

pub fn save_config(path: &Path, cfg: &Config) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn init_config(path: &Path) -> Result<()> {
    if path.exists() {
        println!("Config already exists: {}", path.display());
        return Ok(());
    }
    save_config(path, &Config::default())?;
    println!("Wrote {}", path.display());
    Ok(())
}

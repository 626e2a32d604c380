use std::env;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::Serialize;

use crate::nav::PageDescriptor;

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct ConfigFile {
    #[serde(alias = "dir")]
    pub site_dir: Option<String>,
    pub dry_run: Option<bool>,
    pub no_color: Option<bool>,
    pub progress: Option<bool>,
    pub output: Option<String>,
    pub output_format: Option<String>,
    pub combine: Option<String>,
    pub document_title: Option<String>,
    pub pages: Option<Vec<PageDescriptor>>,
}

fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("USERPROFILE").map(PathBuf::from))
        .or_else(|| {
            let drive = env::var_os("HOMEDRIVE")?;
            let path = env::var_os("HOMEPATH")?;
            Some(PathBuf::from(drive).join(path))
        })
}

pub fn default_config_path() -> Option<PathBuf> {
    Some(home_dir()?.join(".sitenav").join("config.yml"))
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/").or_else(|| path.strip_prefix("~\\")) {
        if let Some(home) = home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

pub fn parse_config(contents: &str, origin: &Path) -> Result<ConfigFile, String> {
    serde_yaml::from_str::<ConfigFile>(contents)
        .map_err(|e| format!("failed to parse config '{}': {e}", origin.display()))
}

pub fn load_config(path: &Path, allow_missing: bool) -> Result<ConfigFile, String> {
    match std::fs::read_to_string(path) {
        Ok(contents) => parse_config(&contents, path),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
            Ok(ConfigFile::default())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(format!("config file not found '{}'", path.display()))
        }
        Err(e) => Err(format!("failed to read config '{}': {e}", path.display())),
    }
}

fn default_config_yaml() -> String {
    let mut out = String::from(
        r#"# sitenav config
#
# Location (default):
#   ~/.sitenav/config.yml

# Directory holding the HTML pages
site_dir: ./site

# Transform pages without writing them back
dry_run: false

# Output styling
no_color: false
progress: false

# Run report (optional)
# output: ./sitenav-report.json
# output_format: json

# Combined print document (optional). When set, pages are read, not rewritten.
# combine: ./combined.html
# document_title: "WindCatcher Technical Documentation"

# Navigation order. The first page gets a disabled "Previous" button and the
# last page a disabled "Next" button.
pages:
"#,
    );
    for (filename, title, id) in crate::nav::DEFAULT_PAGES {
        match id {
            Some(id) => out.push_str(&format!(
                "  - {{ filename: \"{filename}\", title: \"{title}\", id: \"{id}\" }}\n"
            )),
            None => out.push_str(&format!(
                "  - {{ filename: \"{filename}\", title: \"{title}\" }}\n"
            )),
        }
    }
    out
}

pub fn ensure_default_config_file(path: &Path) -> Result<bool, String> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            format!(
                "failed to create config directory '{}': {e}",
                parent.display()
            )
        })?;
    }
    std::fs::write(path, default_config_yaml())
        .map_err(|e| format!("failed to write config file '{}': {e}", path.display()))?;
    Ok(true)
}

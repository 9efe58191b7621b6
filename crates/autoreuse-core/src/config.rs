use std::path::{Path, PathBuf};

/// Settings for one run. Paths are relative to `root` unless absolute.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Repository root; external tools run here.
    pub root: PathBuf,
    pub manifest: PathBuf,
    pub reuse_program: String,
    pub git_program: String,
    pub layout: LicenseLayout,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            manifest: PathBuf::from("pyproject.toml"),
            reuse_program: "reuse".to_string(),
            git_program: "git".to_string(),
            layout: LicenseLayout::default(),
        }
    }
}

impl RunConfig {
    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(&self.manifest)
    }
}

/// Where license texts live, following the REUSE conventions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseLayout {
    pub licenses_dir: String,
    pub extension: String,
    pub top_level: String,
}

impl Default for LicenseLayout {
    fn default() -> Self {
        Self {
            licenses_dir: "LICENSES".to_string(),
            extension: "txt".to_string(),
            top_level: "LICENSE".to_string(),
        }
    }
}

impl LicenseLayout {
    /// Repository-relative path of a license text, always `/`-separated
    /// since it is written into the manifest.
    pub fn text_file(&self, license: &str) -> String {
        format!("{}/{}.{}", self.licenses_dir, license, self.extension)
    }

    pub fn top_level_path(&self, root: &Path) -> PathBuf {
        root.join(&self.top_level)
    }
}

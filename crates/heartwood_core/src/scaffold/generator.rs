//! Service file emission.
//!
//! # Responsibility
//! - Resolve the target path of a new service file.
//! - Render the embedded template and write it to disk.
//!
//! # Invariants
//! - Existing files are never overwritten unless `force` is set.
//! - Missing parent directories are created.

use crate::scaffold::naming::{NameError, ServiceName};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Services directory relative to the project root.
pub const DEFAULT_SERVICES_DIR: &str = "src/services";
const SERVICE_FILE_EXTENSION: &str = "rs";
const TYPE_NAME_PLACEHOLDER: &str = "{{type_name}}";
const SERVICE_TEMPLATE: &str = include_str!("templates/service.rs.tmpl");

/// Scaffolding failures.
#[derive(Debug)]
pub enum ScaffoldError {
    InvalidName(NameError),
    AlreadyExists(PathBuf),
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for ScaffoldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName(err) => write!(f, "{err}"),
            Self::AlreadyExists(path) => write!(
                f,
                "service file already exists: {} (use force to overwrite)",
                path.display()
            ),
            Self::Io { path, source } => {
                write!(f, "failed to write `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ScaffoldError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidName(err) => Some(err),
            Self::AlreadyExists(_) => None,
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<NameError> for ScaffoldError {
    fn from(value: NameError) -> Self {
        Self::InvalidName(value)
    }
}

/// Where and how service files are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub root: PathBuf,
    /// Relative to `root`.
    pub services_dir: PathBuf,
    pub force: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            services_dir: PathBuf::from(DEFAULT_SERVICES_DIR),
            force: false,
        }
    }
}

/// Result of one successful generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedService {
    pub name: ServiceName,
    pub path: PathBuf,
    pub overwritten: bool,
}

/// Writes new service files from the embedded template.
#[derive(Debug, Clone)]
pub struct ServiceGenerator {
    config: GeneratorConfig,
}

impl ServiceGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// `<root>/<services_dir>/<file_stem>.rs`
    pub fn target_path(&self, name: &ServiceName) -> PathBuf {
        self.config
            .root
            .join(&self.config.services_dir)
            .join(format!("{}.{SERVICE_FILE_EXTENSION}", name.file_stem()))
    }

    /// Normalizes `raw_name` and writes the populated template.
    pub fn generate(&self, raw_name: &str) -> Result<GeneratedService, ScaffoldError> {
        let name = ServiceName::parse(raw_name)?;
        let path = self.target_path(&name);

        let overwritten = path.exists();
        if overwritten && !self.config.force {
            return Err(ScaffoldError::AlreadyExists(path));
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| io_error(parent, source))?;
        }
        std::fs::write(&path, render_service_template(&name))
            .map_err(|source| io_error(&path, source))?;

        info!(
            "event=service_generate module=scaffold status=ok type={} path={} overwritten={}",
            name.type_name(),
            path.display(),
            overwritten
        );

        Ok(GeneratedService {
            name,
            path,
            overwritten,
        })
    }
}

/// Populates the service template with the type identifier.
pub fn render_service_template(name: &ServiceName) -> String {
    SERVICE_TEMPLATE.replace(TYPE_NAME_PLACEHOLDER, name.type_ident())
}

fn io_error(path: &Path, source: std::io::Error) -> ScaffoldError {
    ScaffoldError::Io {
        path: path.to_path_buf(),
        source,
    }
}

//! Output location resolution and file writing

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::errors::GenerateCommandError;

/// Where one manifest's binding file goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    /// Namespace and class name, taken from the manifest file stem
    pub unit_name: String,
    /// Directory holding the binding file
    pub dir: PathBuf,
    /// Full path of the binding file
    pub path: PathBuf,
}

impl OutputTarget {
    /// `<output_dir>/<subdir>/<unit>.<extension>`; an empty subdir writes
    /// straight into `output_dir`.
    pub fn resolve(
        manifest_path: &Path,
        output_dir: &Path,
        subdir: &str,
        extension: &str,
    ) -> Result<Self, GenerateCommandError> {
        let unit_name = unit_name(manifest_path)
            .ok_or_else(|| GenerateCommandError::InvalidManifestName(manifest_path.to_path_buf()))?;

        let dir = if subdir.is_empty() {
            output_dir.to_path_buf()
        } else {
            output_dir.join(subdir)
        };
        let path = dir.join(format!("{}.{}", unit_name, extension));

        Ok(OutputTarget {
            unit_name,
            dir,
            path,
        })
    }
}

/// Manifest file name without its extension
pub fn unit_name(manifest_path: &Path) -> Option<String> {
    manifest_path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map(str::to_string)
}

/// Write through a temp file and rename so readers never see a partial file
pub fn write_atomic(path: &Path, content: &str) -> io::Result<()> {
    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = PathBuf::from(temp_name);

    let result = write_file(&temp_path, content).and_then(|()| fs::rename(&temp_path, path));
    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn write_file(path: &Path, content: &str) -> io::Result<()> {
    let file = fs::File::create(path)?;
    let mut writer = io::BufWriter::with_capacity(64 * 1024, file);
    writer.write_all(content.as_bytes())?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use crate::output::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_default_layout() {
        let target = OutputTarget::resolve(
            Path::new("plugins/cross_call_master.pplugin"),
            Path::new("out"),
            "pps",
            "cs",
        );
        assert!(target.is_ok_and(|t| t.unit_name == "cross_call_master"
            && t.dir == Path::new("out/pps")
            && t.path == Path::new("out/pps/cross_call_master.cs")));
    }

    #[test]
    fn test_resolve_without_subdir() {
        let target = OutputTarget::resolve(Path::new("a/b.json"), Path::new("out"), "", "g.cs");
        assert!(target.is_ok_and(|t| t.path == Path::new("out/b.g.cs")));
    }

    #[test]
    fn test_unit_name_uses_last_extension_only() {
        assert_eq!(unit_name(Path::new("x/my.plugin.json")), Some("my.plugin".to_string()));
        assert_eq!(unit_name(Path::new("x/plain")), Some("plain".to_string()));
        assert_eq!(unit_name(Path::new("")), None);
    }

    #[test]
    fn test_write_atomic_replaces_content() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let path = temp_dir.path().join("binding.cs");

        assert!(write_atomic(&path, "first").is_ok());
        assert!(write_atomic(&path, "second").is_ok());
        assert!(fs::read_to_string(&path).is_ok_and(|c| c == "second"));
        assert!(!temp_dir.path().join("binding.cs.tmp").exists());
    }

    #[test]
    fn test_write_atomic_failure_leaves_no_temp_file() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        // A directory at the destination makes the rename fail
        let path = temp_dir.path().join("binding.cs");
        assert!(fs::create_dir(&path).is_ok());
        assert!(fs::write(path.join("keep"), "x").is_ok());

        assert!(write_atomic(&path, "content").is_err());
        assert!(!temp_dir.path().join("binding.cs.tmp").exists());
        assert!(path.join("keep").is_file());
    }
}

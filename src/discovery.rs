use std::path::{Path, PathBuf};

use crate::descriptor::{DescriptorError, MANIFEST_FILE, PluginDescriptor};

/// Scans directories for plugin bundles and returns their descriptors.
///
/// A bundle root is any directory containing a `plugin.json` manifest. Each
/// search path may either be a bundle root itself or a parent whose immediate
/// children are bundle roots. Candidate-class discovery inside a bundle is
/// the host's concern; this only surfaces the bundles' identities.
pub struct BundleDiscovery;

impl BundleDiscovery {
    pub fn discover(dirs: &[PathBuf]) -> Result<Vec<PluginDescriptor>, DescriptorError> {
        let mut descriptors = Vec::new();

        for dir in dirs {
            if !dir.exists() {
                continue;
            }

            if Self::is_bundle_root(dir) {
                descriptors.push(PluginDescriptor::load(dir)?);
            } else {
                Self::scan_children(dir, &mut descriptors)?;
            }
        }

        Ok(descriptors)
    }

    fn is_bundle_root(dir: &Path) -> bool {
        dir.join(MANIFEST_FILE).is_file()
    }

    fn scan_children(
        parent: &Path,
        descriptors: &mut Vec<PluginDescriptor>,
    ) -> Result<(), DescriptorError> {
        let entries = std::fs::read_dir(parent)?;

        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            if path.is_dir() && Self::is_bundle_root(&path) {
                descriptors.push(PluginDescriptor::load(&path)?);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn create_bundle(parent: &Path, id: &str) -> PathBuf {
        let bundle_dir = parent.join(id);
        std::fs::create_dir_all(&bundle_dir).unwrap();
        std::fs::write(
            bundle_dir.join(MANIFEST_FILE),
            format!(r#"{{"id":"{}","version":"1.0.0"}}"#, id),
        )
        .unwrap();
        bundle_dir
    }

    #[test]
    fn test_discover_direct_bundle_root() {
        let dir = tempdir().unwrap();
        let bundle_dir = create_bundle(dir.path(), "com.example.single");

        let descriptors = BundleDiscovery::discover(&[bundle_dir]).unwrap();
        assert_eq!(descriptors.len(), 1);
        assert_eq!(descriptors[0].id(), "com.example.single");
    }

    #[test]
    fn test_discover_parent_directory() {
        let dir = tempdir().unwrap();
        create_bundle(dir.path(), "com.example.first");
        create_bundle(dir.path(), "com.example.second");

        let descriptors = BundleDiscovery::discover(&[dir.path().to_path_buf()]).unwrap();
        assert_eq!(descriptors.len(), 2);
        let ids: Vec<&str> = descriptors.iter().map(|d| d.id()).collect();
        assert!(ids.contains(&"com.example.first"));
        assert!(ids.contains(&"com.example.second"));
    }

    #[test]
    fn test_discover_nonexistent_dir() {
        let descriptors =
            BundleDiscovery::discover(&[PathBuf::from("/nonexistent/bundles")]).unwrap();
        assert!(descriptors.is_empty());
    }

    #[test]
    fn test_discover_skips_non_bundle_children() {
        let dir = tempdir().unwrap();
        create_bundle(dir.path(), "com.example.real");
        std::fs::create_dir(dir.path().join("not-a-bundle")).unwrap();

        let descriptors = BundleDiscovery::discover(&[dir.path().to_path_buf()]).unwrap();
        assert_eq!(descriptors.len(), 1);
        assert_eq!(descriptors[0].id(), "com.example.real");
    }

    #[test]
    fn test_discover_multiple_dirs() {
        let dir1 = tempdir().unwrap();
        let dir2 = tempdir().unwrap();
        create_bundle(dir1.path(), "com.example.a");
        create_bundle(dir2.path(), "com.example.b");

        let descriptors =
            BundleDiscovery::discover(&[dir1.path().to_path_buf(), dir2.path().to_path_buf()])
                .unwrap();
        assert_eq!(descriptors.len(), 2);
    }

    #[test]
    fn test_discover_bad_manifest_fails() {
        let dir = tempdir().unwrap();
        let bundle_dir = dir.path().join("broken");
        std::fs::create_dir_all(&bundle_dir).unwrap();
        std::fs::write(bundle_dir.join(MANIFEST_FILE), "{").unwrap();

        let err = BundleDiscovery::discover(&[dir.path().to_path_buf()]).unwrap_err();
        assert!(matches!(err, DescriptorError::InvalidManifest { .. }));
    }
}

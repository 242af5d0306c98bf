use log::debug;
use std::path::{Component, Path, PathBuf};

pub const ICON_RESOURCE: &str = "images/todo.png";
const RESOURCE_DIR_NAME: &str = "resources";

/// Read-only lookup of assets shipped next to the executable.
///
/// Logical paths are `/`-separated and relative, e.g. `images/todo.png`.
/// Roots are searched in order and the first existing file wins.
#[derive(Debug, Clone, Default)]
pub struct Resources {
    roots: Vec<PathBuf>,
}

impl Resources {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    /// Roots used by the installed binary: an explicit override first, then
    /// `resources/` beside the executable. Debug builds also fall back to the
    /// crate's own `resources/` so `cargo run` finds the assets.
    pub fn bundled(override_dir: Option<PathBuf>) -> Self {
        let mut roots = Vec::new();
        roots.extend(override_dir);
        if let Some(exe_dir) = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
        {
            roots.push(exe_dir.join(RESOURCE_DIR_NAME));
        }
        if cfg!(debug_assertions) {
            roots.push(Path::new(env!("CARGO_MANIFEST_DIR")).join(RESOURCE_DIR_NAME));
        }
        Self { roots }
    }

    pub fn locate(&self, logical: &str) -> Option<PathBuf> {
        let relative = logical_to_relative(logical)?;
        self.roots
            .iter()
            .map(|root| root.join(&relative))
            .find(|candidate| candidate.is_file())
    }

    /// `Ok(None)` when no root holds the asset.
    pub fn read(&self, logical: &str) -> std::io::Result<Option<Vec<u8>>> {
        match self.locate(logical) {
            Some(path) => {
                debug!("Loading resource {} from {}", logical, path.display());
                std::fs::read(path).map(Some)
            }
            None => {
                debug!("Resource {} not found in {:?}", logical, self.roots);
                Ok(None)
            }
        }
    }
}

// Only plain relative segments; anything that could leave a root is refused.
fn logical_to_relative(logical: &str) -> Option<PathBuf> {
    if logical.is_empty() || logical.contains('\\') {
        return None;
    }
    let path = Path::new(logical);
    if path
        .components()
        .all(|component| matches!(component, Component::Normal(_)))
    {
        Some(path.to_path_buf())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_asset(root: &Path, logical: &str, bytes: &[u8]) {
        let path = root.join(logical);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, bytes).unwrap();
    }

    #[test]
    fn locate_finds_asset_in_first_matching_root() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        write_asset(second.path(), ICON_RESOURCE, b"second");

        let resources = Resources::new(vec![
            first.path().to_path_buf(),
            second.path().to_path_buf(),
        ]);
        assert_eq!(
            resources.locate(ICON_RESOURCE),
            Some(second.path().join("images").join("todo.png"))
        );

        write_asset(first.path(), ICON_RESOURCE, b"first");
        assert_eq!(
            resources.read(ICON_RESOURCE).unwrap().as_deref(),
            Some(&b"first"[..])
        );
    }

    #[test]
    fn read_returns_none_for_missing_asset() {
        let root = tempfile::tempdir().unwrap();
        let resources = Resources::new(vec![root.path().to_path_buf()]);
        assert!(resources.read(ICON_RESOURCE).unwrap().is_none());
    }

    #[test]
    fn locate_ignores_directories() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(root.path().join("images").join("todo.png")).unwrap();
        let resources = Resources::new(vec![root.path().to_path_buf()]);
        assert!(resources.locate(ICON_RESOURCE).is_none());
    }

    #[test]
    fn logical_paths_cannot_escape_roots() {
        assert!(logical_to_relative("../secret.png").is_none());
        assert!(logical_to_relative("images/../../secret.png").is_none());
        assert!(logical_to_relative("/etc/passwd").is_none());
        assert!(logical_to_relative("images\\todo.png").is_none());
        assert!(logical_to_relative("").is_none());
        assert_eq!(
            logical_to_relative("images/todo.png"),
            Some(PathBuf::from("images/todo.png"))
        );
    }

    #[test]
    fn bundled_resources_include_crate_assets_in_debug_builds() {
        let resources = Resources::bundled(None);
        if cfg!(debug_assertions) {
            assert!(resources.locate(ICON_RESOURCE).is_some());
        }
    }
}

//! Route discovery
//!
//! Walks the function root, maps every handler source file to a route path and
//! resolves its module from the [`ModuleRegistry`]. Runs once, before the
//! listener accepts anything; every failure here is fatal to startup.
//!
//! | File                   | Route        |
//! |------------------------|--------------|
//! | `api/echo.rs`          | `/api/echo`  |
//! | `api/users/index.rs`   | `/api/users` |
//! | `api/index.rs`         | `/api`       |

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use super::{DiscoveryError, ModuleRegistry, RouteEntry, RoutingTable};

/// Build the routing table for every handler source under `root`
///
/// `extensions` lists the file extensions (without the dot) treated as
/// handler sources; other files are ignored.
pub fn discover_routes(
    root: &Path,
    registry: &ModuleRegistry,
    extensions: &[String],
) -> Result<RoutingTable, DiscoveryError> {
    if !root.is_dir() {
        return Err(DiscoveryError::NotADirectory {
            path: root.to_path_buf(),
        });
    }
    // the walk runs on the resolved path, route names keep the configured one
    let canonical = root.canonicalize().map_err(|source| DiscoveryError::ReadDir {
        path: root.to_path_buf(),
        source,
    })?;
    let root_name = std::path::absolute(root)
        .ok()
        .as_deref()
        .and_then(Path::file_name)
        .or_else(|| canonical.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let root = canonical;

    let mut files = Vec::new();
    collect_function_files(&root, extensions, &mut files)?;

    let mut table = RoutingTable::new();
    for file in files {
        let Ok(relative) = file.strip_prefix(&root) else {
            continue;
        };
        let source_path = source_path(&root_name, relative);
        let route_path = file_path_to_route(&source_path);
        let key = module_key(&source_path);

        let module = registry
            .resolve(&key)
            .ok_or_else(|| DiscoveryError::UnregisteredModule {
                source_path: source_path.clone(),
                key,
            })?;
        let supported_methods = module.supported_methods();

        table.insert(RouteEntry {
            route_path,
            source_path,
            module,
            supported_methods,
        })?;
    }

    Ok(table)
}

/// Map a discovery-relative source path to its route path
///
/// Separators are normalized to `/`, the extension is dropped and a trailing
/// `index` segment collapses onto its directory.
pub fn file_path_to_route(path: &str) -> String {
    let normalized = normalize(path);
    let without_extension = strip_extension(&normalized);
    let route = without_extension
        .strip_suffix("/index")
        .unwrap_or(without_extension);
    format!("/{route}")
}

/// Registry key of a source file: its normalized path without extension
pub fn module_key(path: &str) -> String {
    strip_extension(&normalize(path)).to_string()
}

fn normalize(path: &str) -> String {
    let path = path.replace('\\', "/");
    path.strip_prefix("./").unwrap_or(&path).to_string()
}

/// Drop the extension of the last path segment; dotfiles keep their name
fn strip_extension(path: &str) -> &str {
    let name_start = path.rfind('/').map_or(0, |i| i + 1);
    match path[name_start..].rfind('.') {
        Some(dot) if dot > 0 => &path[..name_start + dot],
        _ => path,
    }
}

fn source_path(root_name: &str, relative: &Path) -> String {
    let mut segments = vec![root_name.to_string()];
    segments.extend(
        relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned()),
    );
    segments.join("/")
}

fn collect_function_files(
    dir: &Path,
    extensions: &[String],
    files: &mut Vec<PathBuf>,
) -> Result<(), DiscoveryError> {
    let read_error = |source| DiscoveryError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = fs::read_dir(dir)
        .map_err(read_error)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(read_error)?;
    // read_dir order is platform dependent
    entries.sort_by_key(fs::DirEntry::file_name);

    for entry in entries {
        let file_type = entry.file_type().map_err(read_error)?;
        let path = entry.path();
        if file_type.is_dir() {
            collect_function_files(&path, extensions, files)?;
        } else if file_type.is_file() && has_handler_extension(&path, extensions) {
            files.push(path);
        }
    }
    Ok(())
}

fn has_handler_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| {
            extensions
                .iter()
                .any(|allowed| allowed.trim_start_matches('.') == ext)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::{FunctionModule, HandlerValue};
    use crate::http::FunctionRequest;
    use hyper::Method;
    use std::fs::File;

    async fn noop(_request: FunctionRequest) -> anyhow::Result<HandlerValue> {
        Ok(HandlerValue::Nothing)
    }

    fn rs() -> Vec<String> {
        vec!["rs".to_string()]
    }

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        File::create(path).unwrap();
    }

    #[test]
    fn test_file_path_to_route() {
        assert_eq!(file_path_to_route("api/echo.rs"), "/api/echo");
        assert_eq!(file_path_to_route("api/users/index.rs"), "/api/users");
        assert_eq!(file_path_to_route("api/index.rs"), "/api");
        assert_eq!(file_path_to_route("./api/demo-ok.rs"), "/api/demo-ok");
        assert_eq!(file_path_to_route("api\\nested\\deep.rs"), "/api/nested/deep");
        assert_eq!(file_path_to_route("api/v1.2/list.rs"), "/api/v1.2/list");
    }

    #[test]
    fn test_file_path_to_route_is_deterministic() {
        let first = file_path_to_route("api/users/index.rs");
        let second = file_path_to_route("api/users/index.rs");
        assert_eq!(first, second);
    }

    #[test]
    fn test_module_key_keeps_index() {
        assert_eq!(module_key("api/users/index.rs"), "api/users/index");
        assert_eq!(module_key("api\\echo.rs"), "api/echo");
    }

    #[test]
    fn test_discover_routes() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("api");
        touch(&root, "echo.rs");
        touch(&root, "users/index.rs");
        touch(&root, "index.rs");
        touch(&root, "README.md");

        let registry = ModuleRegistry::new()
            .with("api/echo", FunctionModule::new().post(noop).options(noop))
            .with("api/users/index", FunctionModule::new().get(noop))
            .with("api/index", FunctionModule::new().get(noop));

        let table = discover_routes(&root, &registry, &rs()).unwrap();
        assert_eq!(table.len(), 3);

        let echo = table.get("/api/echo").unwrap();
        assert_eq!(echo.source_path, "api/echo.rs");
        assert_eq!(echo.supported_methods, vec![Method::POST, Method::OPTIONS]);

        assert_eq!(table.get("/api/users").unwrap().source_path, "api/users/index.rs");
        assert!(table.get("/api").is_some());
        assert!(table.get("/").is_none());
    }

    #[test]
    fn test_duplicate_route_fails() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("api");
        touch(&root, "users.rs");
        touch(&root, "users/index.rs");

        let registry = ModuleRegistry::new()
            .with("api/users", FunctionModule::new().get(noop))
            .with("api/users/index", FunctionModule::new().get(noop));

        let err = discover_routes(&root, &registry, &rs()).unwrap_err();
        match err {
            DiscoveryError::DuplicateRoute {
                route_path,
                first,
                second,
            } => {
                assert_eq!(route_path, "/api/users");
                assert_eq!(first, "api/users/index.rs");
                assert_eq!(second, "api/users.rs");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unregistered_module_fails() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("api");
        touch(&root, "orphan.rs");

        let err = discover_routes(&root, &ModuleRegistry::new(), &rs()).unwrap_err();
        assert!(matches!(err, DiscoveryError::UnregisteredModule { ref key, .. } if key == "api/orphan"));
    }

    #[test]
    fn test_missing_root_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = discover_routes(&dir.path().join("nope"), &ModuleRegistry::new(), &rs()).unwrap_err();
        assert!(matches!(err, DiscoveryError::NotADirectory { .. }));
    }

    #[test]
    fn test_extension_filter() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("functions");
        touch(&root, "a.rs");
        touch(&root, "b.fn");
        touch(&root, "c.txt");

        let registry = ModuleRegistry::new()
            .with("functions/a", FunctionModule::new().get(noop))
            .with("functions/b", FunctionModule::new().get(noop));
        let extensions = vec!["rs".to_string(), ".fn".to_string()];

        let table = discover_routes(&root, &registry, &extensions).unwrap();
        let paths: Vec<_> = table.entries().iter().map(|e| e.route_path.clone()).collect();
        assert_eq!(paths, vec!["/functions/a", "/functions/b"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_root_keeps_its_own_name() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("functions-v2");
        touch(&target, "echo.rs");
        let link = dir.path().join("api");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let registry = ModuleRegistry::new().with("api/echo", FunctionModule::new().post(noop));
        let table = discover_routes(&link, &registry, &rs()).unwrap();
        let paths: Vec<_> = table.entries().iter().map(|e| e.route_path.clone()).collect();
        assert_eq!(paths, vec!["/api/echo"]);
        assert_eq!(table.get("/api/echo").unwrap().source_path, "api/echo.rs");
    }

    #[test]
    fn test_parent_relative_root_uses_resolved_name() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("api");
        touch(&root, "echo.rs");
        fs::create_dir_all(root.join("nested")).unwrap();

        let registry = ModuleRegistry::new().with("api/echo", FunctionModule::new().post(noop));
        let table = discover_routes(&root.join("nested/.."), &registry, &rs()).unwrap();
        assert!(table.get("/api/echo").is_some());
    }

    #[test]
    fn test_empty_root_yields_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let table = discover_routes(dir.path(), &ModuleRegistry::new(), &rs()).unwrap();
        assert!(table.is_empty());
    }
}

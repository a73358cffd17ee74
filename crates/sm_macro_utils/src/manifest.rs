use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use toml_edit::{Document, Item, Table};

/// The caller's `Cargo.toml`, used to find how a workspace crate is reachable
/// from the crate that invokes a proc-macro.
///
/// # Example
///
/// ```rust
/// # use sm_macro_utils::Manifest;
/// let p: syn::Path = Manifest::shared(|m| m.get_crate_path("sm_reflect"));
/// ```
///
/// # Resolution rules
///
/// 1. `name` is listed in `dependencies`: `::name`.
/// 2. `name` starts with `sm_` and the umbrella crate `structmap` is listed:
///    `::structmap::<rest>` (e.g. `sm_reflect` -> `::structmap::reflect`).
/// 3. Steps 1 and 2 again with `dev-dependencies`.
/// 4. Otherwise `::name`.
///
/// A crate that needs its own macros should declare
/// `extern crate self as sm_reflect;` so that rule 4 also holds inside it.
#[derive(Debug)]
pub struct Manifest {
    pub manifest: Document<Box<str>>,
    pub modified_time: SystemTime,
}

const UMBRELLA_NAME: &str = "structmap";
const MEMBER_PREFIX: &str = "sm_";

impl Manifest {
    #[inline(never)]
    fn manifest_path() -> PathBuf {
        let dir = env::var_os("CARGO_MANIFEST_DIR")
            .expect("CARGO_MANIFEST_DIR should be auto-defined by cargo.");
        let path = PathBuf::from(dir).join("Cargo.toml");
        assert!(
            path.exists(),
            "Cargo manifest does not exist at path {}",
            path.display(),
        );
        path
    }

    #[inline(never)]
    fn modified_time(path: &Path) -> SystemTime {
        std::fs::metadata(path)
            .and_then(|metadata| metadata.modified())
            .unwrap_or_else(|err| panic!("Unable to stat {}: {err}", path.display()))
    }

    #[inline(never)]
    fn parse_manifest(path: &Path) -> Document<Box<str>> {
        let text = std::fs::read_to_string(path)
            .unwrap_or_else(|_| panic!("Unable to read cargo manifest: {}", path.display()))
            .into_boxed_str();
        Document::parse(text)
            .unwrap_or_else(|_| panic!("Failed to parse cargo manifest: {}", path.display()))
    }

    fn absolute_path(segments: &[&str]) -> syn::Path {
        let text = format!("::{}", segments.join("::"));
        syn::parse_str(&text).unwrap_or_else(|_| panic!("`{text}` is not a valid path"))
    }

    fn find_in_deps(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Some(Self::absolute_path(&[name]));
        }

        let module = name.strip_prefix(MEMBER_PREFIX)?;
        deps.contains_key(UMBRELLA_NAME)
            .then(|| Self::absolute_path(&[UMBRELLA_NAME, module]))
    }

    /// Returns the path of the crate `name` as seen from this manifest.
    ///
    /// See the type-level documentation for the resolution order.
    #[inline(never)]
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        ["dependencies", "dev-dependencies"]
            .into_iter()
            .find_map(|table| match self.manifest.get(table) {
                Some(Item::Table(deps)) => Self::find_in_deps(deps, name),
                _ => None,
            })
            .unwrap_or_else(|| Self::absolute_path(&[name]))
    }

    /// Runs `func` with the caller's manifest.
    ///
    /// Manifests are parsed once and kept in a process-wide cache until the file's
    /// modification time changes. Reading and locking are still not free, so call
    /// this once per macro invocation and pass the resulting path around.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let path = Self::manifest_path();
        let modified_time = Self::modified_time(&path);

        {
            let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(manifest) = manifests.get(&path)
                && manifest.modified_time == modified_time
            {
                return func(manifest);
            }
        }

        let manifest = Manifest {
            manifest: Self::parse_manifest(&path),
            modified_time,
        };
        let result = func(&manifest);

        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path, manifest);

        result
    }
}

#[cfg(test)]
mod tests {
    use super::Manifest;
    use std::time::SystemTime;
    use toml_edit::Document;

    fn manifest(text: &str) -> Manifest {
        Manifest {
            manifest: Document::parse(Box::from(text)).unwrap(),
            modified_time: SystemTime::UNIX_EPOCH,
        }
    }

    fn path_of(manifest: &Manifest, name: &str) -> String {
        let path = manifest.get_crate_path(name);
        let segments: Vec<String> = path.segments.iter().map(|s| s.ident.to_string()).collect();
        segments.join("::")
    }

    #[test]
    fn direct_dependency() {
        let m = manifest("[dependencies]\nsm_reflect = { path = \"../sm_reflect\" }\n");
        assert_eq!(path_of(&m, "sm_reflect"), "sm_reflect");
    }

    #[test]
    fn through_umbrella_crate() {
        let m = manifest("[dev-dependencies]\nstructmap = \"0.0.1\"\n");
        assert_eq!(path_of(&m, "sm_reflect"), "structmap::reflect");
    }

    #[test]
    fn fallback_is_absolute_name() {
        let m = manifest("[package]\nname = \"demo\"\n");
        let path = m.get_crate_path("sm_reflect");
        assert!(path.leading_colon.is_some());
        assert_eq!(path_of(&m, "sm_reflect"), "sm_reflect");
    }
}

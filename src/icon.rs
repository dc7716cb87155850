//! Icon path resolution against a contributing extension's folder.

use crate::declaration::{Icon, ThemableIcon};
use std::path::{Component, Path, PathBuf};

/// Join an extension-relative icon path onto `base_dir`.
///
/// Leading separators and any drive prefix are dropped so the result always
/// stays under `base_dir`. The remaining text is appended verbatim and
/// existence is not checked.
pub fn join_icon_path(base_dir: &Path, relative: &Path) -> PathBuf {
    match relative.to_str() {
        Some(text) => base_dir.join(strip_root(text)),
        // Icons are decoded from JSON strings, so this only serves non-UTF-8 callers.
        None => {
            let tail: PathBuf = relative
                .components()
                .skip_while(|c| matches!(c, Component::RootDir | Component::Prefix(_)))
                .collect();
            base_dir.join(tail)
        }
    }
}

fn is_separator(c: char) -> bool {
    c == '/' || std::path::is_separator(c)
}

fn strip_root(text: &str) -> &str {
    let mut rest = text.trim_start_matches(is_separator);
    if let Some(Component::Prefix(prefix)) = Path::new(rest).components().next() {
        rest = rest
            .get(prefix.as_os_str().len()..)
            .unwrap_or_default()
            .trim_start_matches(is_separator);
    }
    rest
}

/// Rewrite every path in `icon` to be rooted at `base_dir`.
pub fn resolve_icon(icon: &mut Icon, base_dir: &Path) {
    match icon {
        Icon::Path(path) => *path = join_icon_path(base_dir, path),
        Icon::Themed(ThemableIcon { dark, light }) => {
            *dark = join_icon_path(base_dir, dark);
            *light = join_icon_path(base_dir, light);
        }
    }
}

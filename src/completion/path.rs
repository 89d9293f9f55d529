//! Filesystem path completion

use super::Context;
use directories::BaseDirs;
use glob::{glob_with, MatchOptions};

/// Completer for flags and positionals that take a filesystem path
///
/// Matches every path starting with `prefix`, case-sensitively, with `~`
/// expanded to the home directory. `*`, `?` and `[...]` typed in the
/// prefix keep their wildcard meaning; a backslash is an ordinary
/// character.
pub fn complete_path(ctx: &mut Context, _index: usize, prefix: &str) {
    let Some(completions) = ctx.completions_mut() else {
        return;
    };
    completions.mark_path_completion();

    let expanded = expand_tilde(prefix);
    let pattern = format!("{}*", expanded);
    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: true,
    };

    let paths = match glob_with(&pattern, options) {
        Ok(paths) => paths,
        Err(e) => {
            log::debug!("path completion pattern '{}' rejected: {}", pattern, e);
            return;
        }
    };

    // glob normalizes away a leading `./`; suggestions must start with
    // what was typed
    let dot_slash = expanded.starts_with("./");

    // Unreadable entries are skipped the same way the shell would
    for path in paths.flatten() {
        let path = path.display().to_string();
        if dot_slash && !path.starts_with("./") {
            completions.add(format!("./{}", path));
        } else {
            completions.add(path);
        }
    }
}

/// Expand a leading `~` or `~/` to the current user's home directory
///
/// `~user` forms are left alone.
fn expand_tilde(prefix: &str) -> String {
    let rest = match prefix.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        _ => return prefix.to_string(),
    };
    match BaseDirs::new() {
        Some(dirs) => format!("{}{}", dirs.home_dir().display(), rest),
        None => prefix.to_string(),
    }
}

use std::path::{Component, Path, PathBuf};

/// Normalize a project-relative file path: forward slashes, no `.` segments,
/// `..` folded where possible.
pub fn normalize(path: &str) -> String {
    let mut parts: Vec<String> = Vec::new();
    for component in Path::new(&path.replace('\\', "/")).components() {
        match component {
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
            Component::ParentDir => {
                if parts.last().is_some_and(|p| p != "..") {
                    parts.pop();
                } else {
                    parts.push("..".to_string());
                }
            }
            Component::Normal(name) => parts.push(name.to_string_lossy().into_owned()),
        }
    }
    parts.join("/")
}

/// Relative path from the directory containing `from_file` to `to_file`.
/// Both paths are relative to the same base directory.
pub fn relative_from_to(from_file: &str, to_file: &str) -> String {
    let from = normalize(from_file);
    let to = normalize(to_file);

    let from_dir: Vec<&str> = match from.rsplit_once('/') {
        Some((dir, _)) => dir.split('/').collect(),
        None => Vec::new(),
    };
    let to_parts: Vec<&str> = to.split('/').filter(|p| !p.is_empty()).collect();

    let common = from_dir
        .iter()
        .zip(to_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut rel = PathBuf::new();
    for _ in common..from_dir.len() {
        rel.push("..");
    }
    for part in &to_parts[common..] {
        rel.push(part);
    }
    rel.to_string_lossy().replace('\\', "/")
}

/// Build the URL of a link placed in `from_file` pointing to `to_file`,
/// optionally with a `#fragment`.
///
/// Links into the same file collapse to the bare fragment.
pub fn file_link_url(from_file: &str, to_file: &str, fragment: Option<&str>) -> String {
    let fragment = fragment.filter(|f| !f.is_empty());
    let same_file = normalize(from_file) == normalize(to_file);

    let mut url = if same_file && fragment.is_some() {
        String::new()
    } else {
        let rel = relative_from_to(from_file, to_file);
        if rel.starts_with("..") {
            rel
        } else {
            format!("./{}", rel)
        }
    };

    if let Some(fragment) = fragment {
        url.push('#');
        url.push_str(fragment);
    }
    url
}

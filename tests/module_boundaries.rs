//! The argument schema must stay usable when the runtime fails to load, so
//! `src/argparser` may not reference the runtime or bootstrap modules.

use std::path::{Path, PathBuf};

const FORBIDDEN: [&str; 6] = [
    "crate::runtime",
    "crate::bootstrap",
    "crate::TcEx",
    "crate::Facade",
    "super::super::runtime",
    "super::super::bootstrap",
];

fn rust_files(dir: &Path, out: &mut Vec<PathBuf>) {
    let entries = std::fs::read_dir(dir).expect("argparser directory is readable");
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            rust_files(&path, out);
        } else if path.extension().and_then(|e| e.to_str()) == Some("rs") {
            out.push(path);
        }
    }
}

#[test]
fn test_argparser_has_no_edge_to_runtime() {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("src").join("argparser");
    let mut files = Vec::new();
    rust_files(&dir, &mut files);
    assert!(!files.is_empty(), "no sources found under {}", dir.display());

    let mut violations = Vec::new();
    for file in &files {
        let content = std::fs::read_to_string(file).unwrap();
        for (line_no, line) in content.lines().enumerate() {
            for needle in FORBIDDEN {
                if line.contains(needle) {
                    violations.push(format!("{}:{}: {}", file.display(), line_no + 1, line.trim()));
                }
            }
        }
    }
    assert!(violations.is_empty(), "argparser depends on the runtime:\n{}", violations.join("\n"));
}

#![allow(dead_code)]

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use zip::write::FileOptions;
use zip::ZipWriter;

use testhound::classifier::{ConstructorMeta, MethodMeta, SuiteMeta, Visibility, TEST_MARKER};
use testhound::name::ARTIFACT_SUFFIX;

/// Descriptor for a plain runnable suite: a no-arg constructor plus one
/// public test-marked method.
pub fn runnable_suite() -> SuiteMeta {
    SuiteMeta {
        constructors: vec![ConstructorMeta::default()],
        methods: vec![MethodMeta {
            name: "runs".to_string(),
            visibility: Visibility::Public,
            markers: vec![TEST_MARKER.to_string()],
        }],
        ..SuiteMeta::default()
    }
}

/// Descriptor for an abstract base suite that still declares test-marked
/// methods.
pub fn abstract_suite() -> SuiteMeta {
    SuiteMeta {
        is_abstract: true,
        ..runnable_suite()
    }
}

/// Descriptor for a suite with a custom runner and only a multi-argument
/// constructor.
pub fn custom_runner_suite() -> SuiteMeta {
    SuiteMeta {
        runner: Some("Parameterized".to_string()),
        constructors: vec![ConstructorMeta {
            params: vec!["String".to_string()],
        }],
        ..SuiteMeta::default()
    }
}

/// Writes a suite descriptor under `root` at the path its logical name
/// maps to, returning the file path.
pub fn write_suite(root: &Path, name: &str, meta: &SuiteMeta) -> PathBuf {
    let rel = format!("{}{}", name.replace('.', "/"), ARTIFACT_SUFFIX);
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, serde_json::to_vec_pretty(meta).unwrap()).unwrap();
    path
}

/// Packs every file under `root` into a zip archive at `archive`,
/// preserving relative paths.
pub fn pack_archive(root: &Path, archive: &Path) {
    let file = fs::File::create(archive).unwrap();
    let mut zip = ZipWriter::new(file);
    add_dir(&mut zip, root, root);
    zip.finish().unwrap();
}

fn add_dir(zip: &mut ZipWriter<fs::File>, root: &Path, dir: &Path) {
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            add_dir(zip, root, &path);
        } else {
            let rel = path
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/");
            zip.start_file(rel, FileOptions::default()).unwrap();
            zip.write_all(&fs::read(&path).unwrap()).unwrap();
        }
    }
}

use std::fs;
use std::path::{Path, PathBuf};

use photo_collector::{
    collect, ensure_directory, store, CollectorConfig, CollectorConfigBuilder, FileRef, FilterPolicy,
};

const IMAGE_TYPES: [&str; 5] = [".jpg", ".png", ".bmp", ".tif", ".jpeg"];
const IMAGES: [&str; 6] = [
    "graphic.png",
    "photo.bmp",
    "photo.jpg",
    "test_1.jpeg",
    "test_2.tif",
    "test_3.jpg",
];
const NON_IMAGES: [&str; 2] = ["notes.txt", "video.mp4"];

// ---------------------------------------------------------------------------
// Fixture
// ---------------------------------------------------------------------------

/// Test folders built fresh for each test.
///
/// ```text
/// tmp/
///   empty/
///   nonphoto/      notes.txt
///   photo/         photo.bmp
///   many/          every image
///   deep/          every image and non-image
///     sub/         every image and non-image
/// ```
struct Fixture {
    _dir: tempfile::TempDir,
    empty: PathBuf,
    nonphoto: PathBuf,
    photo: PathBuf,
    many: PathBuf,
    deep: PathBuf,
}

fn write_files(dir: &Path, names: &[&str]) {
    for name in names {
        fs::write(dir.join(name), name.as_bytes()).unwrap();
    }
}

fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let folder = |name: &str| {
        let path = dir.path().join(name);
        ensure_directory(&path, true).unwrap();
        path
    };

    let empty = folder("empty");
    let nonphoto = folder("nonphoto");
    let photo = folder("photo");
    let many = folder("many");
    let deep = folder("deep");
    let sub = deep.join("sub");
    ensure_directory(&sub, true).unwrap();

    write_files(&nonphoto, &["notes.txt"]);
    write_files(&photo, &["photo.bmp"]);
    write_files(&many, &IMAGES);
    for target in [&deep, &sub] {
        write_files(target, &IMAGES);
        write_files(target, &NON_IMAGES);
    }

    Fixture {
        _dir: dir,
        empty,
        nonphoto,
        photo,
        many,
        deep,
    }
}

fn run(
    root: &Path,
    configure: impl FnOnce(CollectorConfigBuilder) -> CollectorConfigBuilder,
) -> Vec<FileRef> {
    let config = configure(CollectorConfig::builder().path(root)).build().unwrap();
    collect(config).unwrap().into_files()
}

fn names(files: &[FileRef]) -> Vec<&str> {
    files.iter().map(|f| f.name()).collect()
}

// ---------------------------------------------------------------------------
// Collection
// ---------------------------------------------------------------------------

#[test]
fn empty_paths_collect_nothing() {
    for policy in [FilterPolicy::Union, FilterPolicy::Intersection] {
        let config = CollectorConfig::builder()
            .include_exts(IMAGE_TYPES)
            .exclude_exts(["txt"])
            .recursive(true)
            .policy(policy)
            .build()
            .unwrap();
        assert!(collect(config).unwrap().is_empty());
    }
}

#[test]
fn empty_folder_collects_nothing() {
    let fx = fixture();
    assert!(run(&fx.empty, |b| b.include_exts(IMAGE_TYPES)).is_empty());
    assert!(run(&fx.empty, |b| b).is_empty());
}

#[test]
fn nonphoto_folder() {
    let fx = fixture();
    assert_eq!(run(&fx.nonphoto, |b| b).len(), 1);
    assert_eq!(run(&fx.nonphoto, |b| b.include_exts(IMAGE_TYPES)).len(), 0);
    assert_eq!(run(&fx.nonphoto, |b| b.include_exts(["txt"])).len(), 1);
}

#[test]
fn photo_folder() {
    let fx = fixture();
    assert_eq!(run(&fx.photo, |b| b).len(), 1);
    assert_eq!(run(&fx.photo, |b| b.include_exts(IMAGE_TYPES)).len(), 1);
    assert_eq!(run(&fx.photo, |b| b.include_exts(["txt"])).len(), 0);
}

#[test]
fn pass_through_ignores_recursion_without_subfolders() {
    let fx = fixture();
    assert_eq!(run(&fx.many, |b| b).len(), IMAGES.len());
    assert_eq!(run(&fx.many, |b| b.recursive(true)).len(), IMAGES.len());
}

#[test]
fn many_folder_filters() {
    let fx = fixture();
    assert_eq!(run(&fx.many, |b| b.exclude_exts(IMAGE_TYPES)).len(), 0);
    assert_eq!(run(&fx.many, |b| b.include_exts(IMAGE_TYPES)).len(), IMAGES.len());
    assert_eq!(run(&fx.many, |b| b.include_exts(["txt"])).len(), 0);
}

#[test]
fn include_filter_is_exact() {
    let fx = fixture();
    let wanted = [".jpg", ".tif"];
    let files = run(&fx.deep, |b| b.include_exts(wanted));
    assert!(files.iter().all(|f| wanted.contains(&f.extension())));
    let expected = IMAGES
        .iter()
        .filter(|n| n.ends_with(".jpg") || n.ends_with(".tif"))
        .count();
    assert_eq!(files.len(), expected);
}

#[test]
fn exclude_filter_is_exact() {
    let fx = fixture();
    let files = run(&fx.deep, |b| b.recursive(true).exclude_exts(IMAGE_TYPES));
    assert!(files.iter().all(|f| !IMAGE_TYPES.contains(&f.extension())));
    assert_eq!(files.len(), 2 * NON_IMAGES.len());
}

#[test]
fn recursion_doubles_the_deep_folder() {
    let fx = fixture();
    let total = IMAGES.len() + NON_IMAGES.len();
    assert_eq!(run(&fx.deep, |b| b).len(), total);
    assert_eq!(run(&fx.deep, |b| b.recursive(true)).len(), 2 * total);
    assert_eq!(
        run(&fx.deep, |b| b.recursive(true).include_exts(IMAGE_TYPES)).len(),
        2 * IMAGES.len()
    );
    assert_eq!(run(&fx.deep, |b| b.recursive(true).include_exts(["txt"])).len(), 2);
}

#[test]
fn directories_never_appear() {
    let fx = fixture();
    for recursive in [false, true] {
        for pattern in ["*", "s*", "sub"] {
            let files = run(&fx.deep, |b| b.recursive(recursive).patterns([pattern]));
            assert!(files.iter().all(|f| f.is_file()));
            assert!(files.iter().all(|f| f.name() != "sub"));
        }
    }
}

#[test]
fn both_filters_union_duplicates() {
    let fx = fixture();
    let files = run(&fx.many, |b| b.include_exts(["bmp"]).exclude_exts(["txt"]));
    let bmp = files.iter().filter(|f| f.name() == "photo.bmp").count();
    assert_eq!(bmp, 2);
    assert_eq!(files.len(), 1 + IMAGES.len());
}

#[test]
fn both_filters_intersection_keeps_once() {
    let fx = fixture();
    let files = run(&fx.deep, |b| {
        b.include_exts(["bmp", "txt"])
            .exclude_exts(["txt"])
            .policy(FilterPolicy::Intersection)
    });
    assert_eq!(names(&files), ["photo.bmp"]);
}

#[test]
fn include_scenario_keeps_enumeration_order() {
    let dir = tempfile::tempdir().unwrap();
    write_files(dir.path(), &["c.txt", "b.png", "a.jpg"]);
    let files = run(dir.path(), |b| b.include_exts([".jpg", ".png"]));
    assert_eq!(names(&files), ["a.jpg", "b.png"]);
}

#[test]
fn paths_are_collected_root_by_root() {
    let fx = fixture();
    let config = CollectorConfig::builder()
        .paths([&fx.photo, &fx.nonphoto, &fx.photo])
        .build()
        .unwrap();
    let files = collect(config).unwrap().into_files();
    assert_eq!(names(&files), ["photo.bmp", "notes.txt", "photo.bmp"]);
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

#[test]
fn collected_files_land_in_collections_folder() {
    let fx = fixture();
    let config = CollectorConfig::builder()
        .path(&fx.deep)
        .recursive(true)
        .include_exts(IMAGE_TYPES)
        .build()
        .unwrap();
    let collection = collect(config).unwrap();

    let target = fx.empty.join("collections");
    let report = store(&collection, &target).unwrap();
    assert!(report.is_clean());
    assert_eq!(report.copied.len(), 2 * IMAGES.len());
    assert_eq!(fs::read_dir(&target).unwrap().count(), 2 * IMAGES.len());
    assert_eq!(
        fs::read_to_string(target.join("photo (1).jpg")).unwrap(),
        "photo.jpg"
    );
}

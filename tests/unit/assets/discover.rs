use super::*;

#[test]
fn natural_cmp_orders_numbers_by_value() {
    assert_eq!(natural_cmp("2.png", "10.png"), Ordering::Less);
    assert_eq!(natural_cmp("10.png", "9.png"), Ordering::Greater);
    assert_eq!(natural_cmp("img_2.png", "img_2.png"), Ordering::Equal);
    assert_eq!(natural_cmp("a.png", "b.png"), Ordering::Less);
    assert_eq!(natural_cmp("img", "img1"), Ordering::Less);
    // Same value, different padding: still a total order.
    assert_ne!(natural_cmp("01.png", "1.png"), Ordering::Equal);
}

#[test]
fn sort_natural_uses_file_names() {
    let mut paths = vec![
        PathBuf::from("x/10.png"),
        PathBuf::from("x/1.png"),
        PathBuf::from("x/2.png"),
    ];
    sort_natural(&mut paths);
    assert_eq!(
        paths,
        vec![
            PathBuf::from("x/1.png"),
            PathBuf::from("x/2.png"),
            PathBuf::from("x/10.png"),
        ]
    );
}

#[test]
fn discover_orders_images_and_ignores_other_files() {
    let dir = tempfile::tempdir().unwrap();
    let images = dir.path().join(IMAGES_DIR);
    std::fs::create_dir_all(&images).unwrap();
    for name in ["10.png", "2.png", "0.jpg", "notes.txt"] {
        std::fs::write(images.join(name), b"x").unwrap();
    }
    std::fs::write(dir.path().join(DEFAULT_AUDIO_FILE), b"id3").unwrap();

    let bundle = MediaBundle::discover(dir.path(), DEFAULT_AUDIO_FILE).unwrap();
    let names = bundle
        .images
        .iter()
        .map(|a| a.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["0.jpg", "2.png", "10.png"]);
    let indices = bundle.images.iter().map(|a| a.index).collect::<Vec<_>>();
    assert_eq!(indices, vec![0, 1, 2]);
}

#[test]
fn discover_missing_audio_is_missing_asset() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join(IMAGES_DIR)).unwrap();
    let err = MediaBundle::discover(dir.path(), DEFAULT_AUDIO_FILE).unwrap_err();
    assert!(matches!(err, ReelError::MissingAsset(_)));
}

#[test]
fn discover_missing_images_dir_is_missing_asset() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(DEFAULT_AUDIO_FILE), b"id3").unwrap();
    let err = MediaBundle::discover(dir.path(), DEFAULT_AUDIO_FILE).unwrap_err();
    assert!(matches!(err, ReelError::MissingAsset(_)));
}

#[test]
fn discover_empty_images_dir_is_not_an_error_yet() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join(IMAGES_DIR)).unwrap();
    std::fs::write(dir.path().join(DEFAULT_AUDIO_FILE), b"id3").unwrap();
    let bundle = MediaBundle::discover(dir.path(), DEFAULT_AUDIO_FILE).unwrap();
    assert!(bundle.images.is_empty());
}

use super::*;

#[test]
fn family_names_normalize_case_and_punctuation() {
    assert_eq!(normalize_family("liberation-sans"), "liberationsans");
    assert_eq!(normalize_family("Liberation Sans"), "liberationsans");
    assert_eq!(normalize_family("LiberationSans-Bold"), "liberationsansbold");
}

#[test]
fn path_like_values_are_files() {
    assert!(looks_like_path("static/fonts/Corben-Bold.ttf"));
    assert!(looks_like_path("Corben-Bold.TTF"));
    assert!(looks_like_path(r"C:\Windows\Fonts\arial"));
    assert!(!looks_like_path("liberation-sans"));
    assert!(!looks_like_path("DejaVu Sans"));
}

#[test]
fn missing_font_file_is_missing_asset() {
    let err = FontLibrary::new()
        .resolve("/nope/NoSuchFont.ttf")
        .unwrap_err();
    assert!(matches!(err, ReelError::MissingAsset(_)));
}

#[test]
fn blank_font_is_invalid_input() {
    let err = FontLibrary::new().resolve("   ").unwrap_err();
    assert!(matches!(err, ReelError::InvalidInput(_)));
}

#[test]
fn unknown_family_is_missing_asset() {
    let err = FontLibrary::new()
        .resolve("no-such-family-9f3c2b")
        .unwrap_err();
    assert!(matches!(err, ReelError::MissingAsset(_)));
    assert!(err.to_string().contains("no-such-family-9f3c2b"));
}

#[test]
fn existing_file_resolves_without_a_family() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plain");
    std::fs::write(&path, b"bytes").unwrap();

    let file = FontLibrary::new()
        .resolve(path.to_str().unwrap())
        .unwrap();
    assert_eq!(file.bytes, b"bytes");
    assert_eq!(file.index, 0);
    assert!(file.family.is_none());
}

#[test]
fn installed_families_resolve_by_loose_name() {
    let mut library = FontLibrary::new();
    let families = library.families();
    let mut sorted = families.clone();
    sorted.sort_by_key(|f| f.to_lowercase());
    assert_eq!(families, sorted);

    let Some(family) = families.first() else {
        return;
    };
    let loose = family.to_lowercase().replace(' ', "-");
    let file = library.resolve(&loose).unwrap();
    assert!(!file.bytes.is_empty());
    assert!(file.family.is_some());
}

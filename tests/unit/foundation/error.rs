use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ReelError::missing_asset("x")
            .to_string()
            .contains("missing asset:")
    );
    assert!(
        ReelError::invalid_input("x")
            .to_string()
            .contains("invalid input:")
    );
    assert!(ReelError::decode("x").to_string().contains("decode error:"));
    assert!(ReelError::encode("x").to_string().contains("encode error:"));
}

#[test]
fn only_decode_is_recoverable() {
    assert!(ReelError::decode("bad png").is_recoverable());
    assert!(!ReelError::missing_asset("voice.mp3").is_recoverable());
    assert!(!ReelError::invalid_input("no images").is_recoverable());
    assert!(!ReelError::encode("ffmpeg").is_recoverable());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ReelError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
    assert!(!err.is_recoverable());
}

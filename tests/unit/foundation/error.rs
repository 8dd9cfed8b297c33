use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PostcraftError::decode("x")
            .to_string()
            .contains("decode error:")
    );
    assert!(
        PostcraftError::encode("x")
            .to_string()
            .contains("encode error:")
    );
    assert!(
        PostcraftError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(PostcraftError::font("x").to_string().contains("font error:"));
    assert!(
        PostcraftError::config("x")
            .to_string()
            .contains("config error:")
    );
}

#[test]
fn errors_convert_into_anyhow_with_their_prefix() {
    let err: anyhow::Error = PostcraftError::font("no face").into();
    assert!(err.to_string().starts_with("font error:"));
    assert!(err.downcast_ref::<PostcraftError>().is_some());
}

#[test]
fn decode_is_classified() {
    assert!(PostcraftError::decode("truncated").is_decode());
    assert!(!PostcraftError::encode("x").is_decode());
}

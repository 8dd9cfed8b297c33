use super::*;

#[test]
fn empty_json_gives_defaults() {
    let cfg = StudioConfig::from_json("{}").unwrap();
    assert_eq!(cfg, StudioConfig::default());
    assert_eq!(cfg.ingest.resize_filter, ResizeFilter::Triangle);
}

#[test]
fn full_json_round_trips_fields() {
    let cfg = StudioConfig::from_json(
        r#"{
            "fonts": { "sans": "a.ttf", "heavy": "/abs/h.otf", "fallback": ["cjk.otf"] },
            "ingest": { "resize_filter": "lanczos3" }
        }"#,
    )
    .unwrap();
    assert_eq!(cfg.fonts.path(FontFace::Sans), Some(Path::new("a.ttf")));
    assert_eq!(cfg.fonts.path(FontFace::Serif), None);
    assert_eq!(cfg.fonts.fallback, vec![PathBuf::from("cjk.otf")]);
    assert_eq!(cfg.ingest.resize_filter, ResizeFilter::Lanczos3);
}

#[test]
fn unknown_keys_and_bad_filters_are_config_errors() {
    let err = StudioConfig::from_json(r#"{ "quality": 90 }"#).unwrap_err();
    assert!(matches!(err, PostcraftError::Config(_)));
    let err = StudioConfig::from_json(r#"{ "ingest": { "resize_filter": "nearest" } }"#).unwrap_err();
    assert!(err.to_string().starts_with("config error:"));
}

#[test]
fn load_resolves_relative_paths_against_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("studio.json");
    std::fs::write(&path, r#"{ "fonts": { "serif": "fonts/s.ttf", "heavy": "/x/h.ttf" } }"#).unwrap();

    let cfg = StudioConfig::load(&path).unwrap();
    assert_eq!(cfg.fonts.serif, Some(dir.path().join("fonts/s.ttf")));
    assert_eq!(cfg.fonts.heavy, Some(PathBuf::from("/x/h.ttf")));

    assert!(StudioConfig::load(dir.path().join("missing.json")).is_err());
}

#[test]
fn env_overrides_fill_fonts_and_filter() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("sans.ttf"), b"x").unwrap();
    std::fs::write(dir.path().join("heavy.otf"), b"x").unwrap();
    std::fs::write(dir.path().join("fallback.ttf"), b"x").unwrap();
    let font_dir = dir.path().to_string_lossy().into_owned();

    let mut cfg = StudioConfig::default();
    cfg.fonts.serif = Some(PathBuf::from("/keep/serif.ttf"));
    cfg.apply_env(|k| match k {
        ENV_FONT_DIR => Some(font_dir.clone()),
        ENV_RESIZE_FILTER => Some("catmull-rom".to_owned()),
        _ => None,
    })
    .unwrap();

    assert_eq!(cfg.fonts.sans, Some(dir.path().join("sans.ttf")));
    assert_eq!(cfg.fonts.heavy, Some(dir.path().join("heavy.otf")));
    assert_eq!(cfg.fonts.serif, Some(PathBuf::from("/keep/serif.ttf")));
    assert_eq!(cfg.fonts.fallback, vec![dir.path().join("fallback.ttf")]);
    assert_eq!(cfg.ingest.resize_filter, ResizeFilter::CatmullRom);
}

#[test]
fn env_errors_surface() {
    let mut cfg = StudioConfig::default();
    let err = cfg
        .apply_env(|k| (k == ENV_FONT_DIR).then(|| "/definitely/not/here".to_owned()))
        .unwrap_err();
    assert!(matches!(err, PostcraftError::Config(_)));

    let err = cfg
        .apply_env(|k| (k == ENV_RESIZE_FILTER).then(|| "nearest".to_owned()))
        .unwrap_err();
    assert!(matches!(err, PostcraftError::Config(_)));
}

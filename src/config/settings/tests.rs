use super::*;

#[test]
fn test_defaults() {
    let settings = Settings::default();
    assert!(!settings.verbose);
    assert_eq!(settings.timeout, Some(Duration::from_secs(300)));
    assert!(settings.managers.is_empty());
    assert!(settings.search_paths.is_empty());
}

#[test]
fn test_empty_document_is_defaults() {
    assert_eq!(Settings::parse("").unwrap(), Settings::default());
    assert_eq!(
        Settings::parse("// nothing here\n").unwrap(),
        Settings::default()
    );
}

#[test]
fn test_full_document() {
    let settings = Settings::parse(
        r#"
verbose #true
timeout 60
managers "gem" "pip3"
search-paths "/opt/ruby/bin" "/opt/python/bin"
"#,
    )
    .unwrap();

    assert!(settings.verbose);
    assert_eq!(settings.timeout, Some(Duration::from_secs(60)));
    assert_eq!(settings.managers, vec!["gem", "pip3"]);
    assert_eq!(
        settings.search_paths,
        vec![
            PathBuf::from("/opt/ruby/bin"),
            PathBuf::from("/opt/python/bin")
        ]
    );
}

#[test]
fn test_zero_timeout_disables_it() {
    let settings = Settings::parse("timeout 0").unwrap();
    assert!(settings.timeout.is_none());
}

#[test]
fn test_negative_timeout_rejected() {
    let err = Settings::parse("timeout -5").unwrap_err();
    assert!(matches!(err, MpmError::ConfigError(_)));
}

#[test]
fn test_wrong_value_type_rejected() {
    assert!(Settings::parse("verbose \"yes\"").is_err());
    assert!(Settings::parse("managers 1 2").is_err());
    assert!(Settings::parse("verbose").is_err());
}

#[test]
fn test_unknown_key_rejected() {
    let err = Settings::parse("color \"auto\"").unwrap_err();
    assert!(matches!(err, MpmError::ConfigError(msg) if msg.contains("color")));
}

#[test]
fn test_syntax_error_is_config_error() {
    let err = Settings::parse("managers \"gem").unwrap_err();
    assert!(matches!(err, MpmError::ConfigError(_)));
}

#[test]
fn test_load_missing_file_gives_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    let settings = Settings::load(Some(&tmp.path().join("settings.kdl"))).unwrap();
    assert_eq!(settings, Settings::default());
}

#[test]
fn test_load_from_file() {
    let tmp = tempfile::tempdir().unwrap();
    let file = tmp.path().join("settings.kdl");
    fs::write(&file, "managers \"gem\"\ntimeout 10\n").unwrap();

    let settings = Settings::load(Some(&file)).unwrap();
    assert_eq!(settings.managers, vec!["gem"]);
    assert_eq!(settings.timeout, Some(Duration::from_secs(10)));
}

#[test]
fn test_load_unreadable_path_is_io_error() {
    let tmp = tempfile::tempdir().unwrap();
    // A directory exists but cannot be read as a file
    let err = Settings::load(Some(tmp.path())).unwrap_err();
    assert!(matches!(err, MpmError::IoError { .. }));
}

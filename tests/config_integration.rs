use scrawl::config::{load_config_flags, parse_flag_tokens, ConfigFlags};

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".scrawlrc");
    let content = r"
# comment
--width 800

--emit-text

--height=600
";
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert_eq!(flags.width, Some(800));
    assert_eq!(flags.height, Some(600));
    assert!(flags.emit_text);
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".scrawlrc");
    let content = "--width 500\n--height 400\n--emit-text\n";
    std::fs::write(&path, content).unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "scrawl".to_string(),
        "--width".to_string(),
        "1024".to_string(),
        "--verbose".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert_eq!(effective.width, Some(1024), "cli should override width");
    assert_eq!(
        effective.height,
        Some(400),
        "file config should be preserved when CLI does not override"
    );
    assert!(effective.emit_text, "file flags should remain enabled");
    assert!(effective.verbose, "cli flags should be applied");
}

#[test]
fn test_missing_config_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does-not-exist");
    let flags = load_config_flags(&path).unwrap();
    assert_eq!(flags, ConfigFlags::default());
}

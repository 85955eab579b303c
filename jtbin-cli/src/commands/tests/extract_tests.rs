use super::*;
use jtbin_mra::settings::ExtractSettings;

fn args(board: Option<&str>, region: Option<i32>) -> ExtractArgs {
    ExtractArgs {
        board: board.map(str::to_string),
        region,
        mra_dir: PathBuf::from("mra"),
        extension: ".mra".to_string(),
    }
}

fn settings(board: Option<&str>, region: Option<i32>) -> Settings {
    Settings {
        extract: ExtractSettings {
            root: None,
            board: board.map(str::to_string),
            region,
        },
    }
}

#[test]
fn test_defaults() {
    let options = build_options(args(None, None), &Settings::default()).unwrap();
    assert_eq!(options.board, "jtcps1");
    assert_eq!(options.region, 0);
    assert_eq!(options.descriptor_dir, PathBuf::from("mra"));
    assert_eq!(options.extension, ".mra");
}

#[test]
fn test_settings_fill_missing_args() {
    let options =
        build_options(args(None, None), &settings(Some("jtcps15"), Some(3))).unwrap();
    assert_eq!(options.board, "jtcps15");
    assert_eq!(options.region, 3);
}

#[test]
fn test_args_override_settings() {
    let options = build_options(
        args(Some("jtcps2"), Some(1)),
        &settings(Some("jtcps15"), Some(3)),
    )
    .unwrap();
    assert_eq!(options.board, "jtcps2");
    assert_eq!(options.region, 1);
}

#[test]
fn test_empty_board_is_rejected() {
    let result = build_options(args(Some(" "), None), &Settings::default());
    assert!(matches!(result, Err(CliError::Config(_))));
}

#[test]
fn test_walk_dir_relative_after_entering_root() {
    let dir = walk_dir(Path::new("/srv/jtbin"), Path::new("mra"), true);
    assert_eq!(dir, PathBuf::from("mra"));
}

#[test]
fn test_walk_dir_joined_when_root_not_entered() {
    let dir = walk_dir(Path::new("/srv/jtbin"), Path::new("mra"), false);
    assert_eq!(dir, PathBuf::from("/srv/jtbin/mra"));
}

#[test]
fn test_walk_dir_keeps_absolute_descriptor_dir() {
    let dir = walk_dir(Path::new("/srv/jtbin"), Path::new("/data/mra"), false);
    assert_eq!(dir, PathBuf::from("/data/mra"));
}

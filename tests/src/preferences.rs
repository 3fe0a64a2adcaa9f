#![cfg(test)]
use ipscope_common::theme::{FileStore, ThemePreference, ThemeState};

#[test]
fn theme_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("preferences");

    let mut first = ThemeState::load(Box::new(FileStore::new(&path)));
    assert_eq!(first.preference(), ThemePreference::Dark);
    first.toggle();

    let second = ThemeState::load(Box::new(FileStore::new(&path)));
    assert_eq!(second.preference(), ThemePreference::Light);
}

#[test]
fn unreadable_file_falls_back_to_dark() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("preferences"), "theme=solarized\n").unwrap();

    let state = ThemeState::load(Box::new(FileStore::new(dir.path().join("preferences"))));
    assert_eq!(state.preference(), ThemePreference::Dark);
}

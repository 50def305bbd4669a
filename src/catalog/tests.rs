use std::fs;
use std::path::Path;
use std::time::Duration;

use tempfile::tempdir;

use crate::config::CatalogSettings;

use super::*;

fn entry(id: &str, title: &str, category: &str, uri: Option<&str>) -> CatalogEntry {
    CatalogEntry {
        id: id.into(),
        title: title.into(),
        singer: None,
        media_uri: uri.map(|u| u.into()),
        duration_secs: None,
        category: category.into(),
    }
}

#[test]
fn resolve_fails_without_media_uri() {
    let e = entry("m1", "Morning Breath", "Breathing", None);
    assert!(matches!(
        resolve(&e),
        Err(CatalogError::MissingMedia { .. })
    ));

    let blank = entry("m2", "Evening Calm", "Breathing", Some("   "));
    assert!(matches!(
        resolve(&blank),
        Err(CatalogError::MissingMedia { .. })
    ));
}

#[test]
fn resolve_treats_zero_duration_as_unknown() {
    let mut e = entry("m1", "Still Lake", "Piano", Some("/media/still-lake.mp3"));
    e.duration_secs = Some(0);
    assert_eq!(resolve(&e).unwrap().duration, None);

    e.duration_secs = Some(120);
    assert_eq!(
        resolve(&e).unwrap().duration,
        Some(Duration::from_secs(120))
    );
}

#[test]
fn resolve_builds_display_from_singer_and_title() {
    let mut e = entry("m1", "Still Lake", "Piano", Some("/media/still-lake.mp3"));
    e.singer = Some("Mira".into());
    let track = resolve(&e).unwrap();
    assert_eq!(track.display, "Mira - Still Lake");
    assert_eq!(track.uri, "/media/still-lake.mp3");
}

#[test]
fn resolve_all_excludes_unplayable_entries_and_keeps_order() {
    let entries = vec![
        entry("a", "Alpha", "Piano", Some("/m/a.mp3")),
        entry("b", "Beta", "Piano", None),
        entry("c", "Gamma", "Piano", Some("/m/c.mp3")),
    ];

    let resolved = resolve_all(&entries);
    assert_eq!(resolved.excluded, 1);
    let ids: Vec<&str> = resolved.tracks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "c"]);
}

#[test]
fn toml_catalog_filters_by_category_equality() {
    let store = TomlCatalog::from_entries(vec![
        entry("o1", "Reed Song", "Oboe", Some("/m/o1.mp3")),
        entry("p1", "Keys", "Piano", Some("/m/p1.mp3")),
        entry("o2", "Second Reed", "Oboe", Some("/m/o2.mp3")),
    ]);

    assert_eq!(store.categories(), vec!["Oboe", "Piano"]);

    let oboe = store.entries_in("Oboe");
    assert_eq!(oboe.len(), 2);
    assert!(oboe.iter().all(|e| e.category == "Oboe"));
    // Prefix/substring categories must not match.
    assert!(store.entries_in("Obo").is_empty());
    assert!(store.entries_in("piano").is_empty());
}

#[test]
fn toml_catalog_loads_track_tables_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("catalog.toml");
    fs::write(
        &path,
        r#"
[[track]]
id = "o1"
title = "Reed Song"
singer = "Aiyana"
category = "Oboe"
media_uri = "/media/reed-song.mp3"
duration_secs = 184

[[track]]
id = "b1"
title = "Deep Breathing"
category = "Breathing"
"#,
    )
    .unwrap();

    let store = TomlCatalog::load(&path).unwrap();
    assert_eq!(store.categories(), vec!["Oboe", "Breathing"]);

    let oboe = store.entries_in("Oboe");
    assert_eq!(oboe.len(), 1);
    assert_eq!(oboe[0].singer.as_deref(), Some("Aiyana"));
    assert_eq!(oboe[0].duration_secs, Some(184));

    // The breathing entry has no media uri and must fail resolution.
    let breathing = store.entries_in("Breathing");
    assert!(resolve(&breathing[0]).is_err());
}

#[test]
fn toml_catalog_load_reports_parse_errors() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("catalog.toml");
    fs::write(&path, "[[track]]\nid = ").unwrap();

    assert!(matches!(
        TomlCatalog::load(&path),
        Err(CatalogError::Parse { .. })
    ));
    assert!(matches!(
        TomlCatalog::load(Path::new("/nonexistent/catalog.toml")),
        Err(CatalogError::Io { .. })
    ));
}

#[test]
fn scan_media_dir_categorizes_by_subdirectory() {
    let dir = tempdir().unwrap();
    let piano = dir.path().join("Piano");
    fs::create_dir_all(&piano).unwrap();
    fs::write(piano.join("keys.mp3"), b"not a real mp3").unwrap();
    fs::write(dir.path().join("loose.ogg"), b"not a real ogg").unwrap();
    fs::write(dir.path().join("notes.txt"), b"ignore me").unwrap();

    let settings = CatalogSettings::default();
    let entries = scan_media_dir(dir.path(), &settings);

    assert_eq!(entries.len(), 2);
    let keys = entries.iter().find(|e| e.title == "keys").unwrap();
    assert_eq!(keys.category, "Piano");
    let loose = entries.iter().find(|e| e.title == "loose").unwrap();
    assert_eq!(loose.category, settings.default_category);
    // Unreadable tags: title falls back to the file stem, duration unknown.
    assert_eq!(keys.duration_secs, None);
    assert!(keys.media_uri.is_some());
}

#[test]
fn scan_media_dir_respects_recursive_false_and_hidden() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("root.mp3"), b"not real").unwrap();
    fs::write(dir.path().join(".hidden.mp3"), b"not real").unwrap();
    let sub = dir.path().join("sub");
    fs::create_dir_all(&sub).unwrap();
    fs::write(sub.join("child.mp3"), b"not real").unwrap();

    let settings = CatalogSettings {
        recursive: false,
        include_hidden: false,
        ..CatalogSettings::default()
    };
    let entries = scan_media_dir(dir.path(), &settings);

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].title, "root");
}

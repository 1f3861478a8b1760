use std::fs;
use symxref::core::{build_inventory, AnalysisConfig};

#[test]
fn inventory_lists_sources_with_content_and_images_without() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("docs")).unwrap();
    fs::write(root.join("main.py"), "print('hi')\n").unwrap();
    fs::write(root.join("docs/diagram.png"), [0x89u8, 0x50, 0x4e, 0x47]).unwrap();
    fs::write(root.join("docs/photo.jpeg"), [0xffu8, 0xd8]).unwrap();
    fs::write(root.join("README.md"), "# readme\n").unwrap();

    let inventory = build_inventory(root, &AnalysisConfig::default()).unwrap();

    let keys: Vec<_> = inventory.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["docs/diagram.png", "docs/photo.jpeg", "main.py"]);

    let main = &inventory["main.py"];
    assert_eq!(main.path, "main.py");
    assert_eq!(main.name, "main.py");
    assert_eq!(main.file_type, ".py");
    assert_eq!(main.content.as_deref(), Some("print('hi')\n"));

    let png = &inventory["docs/diagram.png"];
    assert_eq!(png.name, "diagram.png");
    assert_eq!(png.file_type, ".png");
    assert!(png.content.is_none());

    let json = serde_json::to_value(png).unwrap();
    assert!(json.get("content").is_none());
    assert_eq!(json["type"], ".png");
}

#[test]
fn non_utf8_source_is_listed_without_content() {
    let dir = tempfile::TempDir::new().unwrap();
    fs::write(dir.path().join("latin.py"), [0x23u8, 0x20, 0xe9, 0x0a]).unwrap();

    let inventory = build_inventory(dir.path(), &AnalysisConfig::default()).unwrap();
    assert!(inventory["latin.py"].content.is_none());
}

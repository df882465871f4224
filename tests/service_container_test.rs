//! Wiring through the service container

use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;

use wildlife_explorer::config::Settings;
use wildlife_explorer::domain::SiblingOrder;
use wildlife_explorer::infrastructure::di::ServiceContainer;

fn settings_with(images_dir: Option<PathBuf>) -> Settings {
    let mut settings = Settings::default();
    settings.catalog.source = PathBuf::from("tests/resources/animals.csv");
    settings.catalog.images_dir = images_dir;
    settings.explorer.page_size = 2;
    settings.explorer.sibling_order = SiblingOrder::Insertion;
    settings
}

#[test]
fn given_settings_when_opening_session_then_configured_order_and_page_size_used() {
    // Arrange
    let container = ServiceContainer::new(settings_with(None));
    let tree = container
        .catalog_service()
        .load_csv(&container.settings.catalog.source)
        .unwrap()
        .tree;

    // Act
    let session = container.session(Arc::new(tree));

    // Assert
    let view = session.view();
    assert_eq!(session.navigator().order(), SiblingOrder::Insertion);
    assert_eq!(view.slots.len(), 2);
    assert_eq!(view.page_count, 2);
    assert_eq!(view.slots[0].as_ref().map(|e| e.name.as_str()), Some("Native"));
}

#[test]
fn given_no_images_dir_when_scanning_then_empty_catalog() {
    let container = ServiceContainer::new(settings_with(None));

    assert!(container.asset_catalog().unwrap().is_empty());
}

#[test]
fn given_images_dir_when_preloading_then_real_decoder_skips_bad_files() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let png = temp.path().join("blue-jay.png");
    image::RgbaImage::from_pixel(2, 2, image::Rgba([0, 0, 255, 255]))
        .save(&png)
        .unwrap();
    std::fs::write(temp.path().join("broken.jpeg"), b"not a jpeg").unwrap();
    let container = ServiceContainer::new(settings_with(Some(temp.path().to_path_buf())));
    let catalog = container.asset_catalog().unwrap();
    let mut cache = wildlife_explorer::application::BitmapCache::new();

    // Act
    let outcome = container.preloader().preload_all(
        &catalog,
        &mut cache,
        &wildlife_explorer::application::CancelFlag::new(),
        |_| {},
    );

    // Assert
    assert_eq!(
        outcome,
        wildlife_explorer::application::PreloadOutcome::Completed { total: 2, failed: 1 }
    );
    let bitmap = cache.get(&png).expect("png decoded");
    assert_eq!((bitmap.width, bitmap.height), (2, 2));
}

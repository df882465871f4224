//! Interactive browsing driven from scripted input

use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;

use rstest::{fixture, rstest};

use wildlife_explorer::application::{AssetCatalog, ExplorerSession, LabelConfig};
use wildlife_explorer::cli::browse::run_browse;
use wildlife_explorer::domain::{SiblingOrder, TreeBuilder};
use wildlife_explorer::util::testing;

#[fixture]
fn session() -> ExplorerSession {
    testing::init_test_setup();
    colored::control::set_override(false);
    let text = std::fs::read_to_string("tests/resources/animals.csv").expect("read fixture");
    let tree = Arc::new(TreeBuilder::new().build_from_text(&text));
    ExplorerSession::new(tree, SiblingOrder::Display, 6)
}

fn browse(session: &mut ExplorerSession, script: &str) -> String {
    browse_with_images(session, &AssetCatalog::default(), script)
}

fn browse_with_images(session: &mut ExplorerSession, images: &AssetCatalog, script: &str) -> String {
    let mut out = Vec::new();
    run_browse(
        session,
        &LabelConfig::default(),
        images,
        Cursor::new(script),
        &mut out,
    )
    .unwrap();
    String::from_utf8(out).unwrap()
}

#[rstest]
fn given_root_when_rendering_then_status_names_shown(mut session: ExplorerSession) {
    let out = browse(&mut session, "quit\n");

    assert!(out.contains("Who Lives Here?"));
    assert!(out.contains("1. I Don't Belong Here/"));
    assert!(out.contains("2. Year-Round Residents/"));
    assert!(out.contains("3. Just Passing Through/"));
}

#[rstest]
fn given_script_when_descending_to_item_then_record_rendered(mut session: ExplorerSession) {
    // Act
    let out = browse(
        &mut session,
        "open Native\nopen Passeriformes\nopen Corvidae\nopen blue jay\n",
    );

    // Assert
    assert!(out.contains("Learn About Year-Round Residents"));
    assert!(out.contains("Native Corvidae"));
    assert!(out.contains("Scientific name: Cyanocitta cristata"));
    assert!(out.contains("Fun fact: Mimics hawk calls, loudly"));
    assert_eq!(
        session.navigator().path(),
        ["Native", "Passeriformes", "Corvidae", "Blue Jay"]
    );
}

#[rstest]
fn given_slot_number_when_opening_then_entry_on_page_chosen(mut session: ExplorerSession) {
    browse(&mut session, "open 2\nopen 1\n");

    // Display order: Invasive, Native, Non-Native; then Passeriformes first
    assert_eq!(session.navigator().path(), ["Native", "Passeriformes"]);
}

#[rstest]
fn given_boundary_move_when_browsing_then_reported_and_path_kept(mut session: ExplorerSession) {
    let out = browse(
        &mut session,
        "open Native\nopen Strigiformes\nnext\nup\nquit\nopen Invasive\n",
    );

    assert!(out.contains("(nothing there)"));
    assert_eq!(session.navigator().path(), ["Native"]);
}

#[rstest]
fn given_bad_input_when_browsing_then_help_shown(mut session: ExplorerSession) {
    let out = browse(&mut session, "fly\nopen Bats\n\nreset\n");

    assert!(out.contains("unknown command: fly"));
    assert!(out.contains("commands: open"));
    assert!(out.contains("no entry 'Bats' here"));
    assert!(session.navigator().path().is_empty());
}

#[rstest]
fn given_images_when_viewing_items_then_path_or_no_image_shown(mut session: ExplorerSession) {
    // Arrange
    let images = AssetCatalog::from_paths(vec![
        PathBuf::from("img/blue-jay.png"),
        PathBuf::from("img/monarch-butterfly.jpg"),
    ]);

    // Act
    let owl = browse_with_images(&mut session, &images, "open Native\nopen Strigiformes\nopen 1\n");
    let jay = browse_with_images(
        &mut session,
        &images,
        "reset\nopen Native\nopen Passeriformes\nopen Corvidae\nopen Blue Jay\n",
    );

    // Assert
    assert!(jay.contains("Image: img/blue-jay.png"));
    assert!(owl.contains("Great Horned Owl"));
    assert!(owl.contains("(no image)"));
    assert!(!owl.contains("Image: "));
}

#[rstest]
#[case("open Year-Round Residents\n", "Native")]
#[case("open i don't belong here\n", "Invasive")]
#[case("open Non-Native\n", "Non-Native")]
fn given_root_when_opening_by_shown_label_then_status_folder_entered(
    mut session: ExplorerSession,
    #[case] script: &str,
    #[case] expected: &str,
) {
    browse(&mut session, script);

    assert_eq!(session.navigator().path(), [expected]);
}

#[rstest]
fn given_nested_folder_when_opening_status_label_then_rejected(mut session: ExplorerSession) {
    let out = browse(&mut session, "open Native\nopen Year-Round Residents\n");

    assert!(out.contains("no entry 'Year-Round Residents' here"));
    assert_eq!(session.navigator().path(), ["Native"]);
}

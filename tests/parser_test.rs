//! Tests for the tabular parser

use rstest::rstest;

use wildlife_explorer::domain::parse_rows;

fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}

#[rstest]
#[case::plain("a,b,c\n", vec![row(&["a", "b", "c"]), row(&[""])])]
#[case::quoted_comma("a,\"b,c\",d\n", vec![row(&["a", "b,c", "d"]), row(&[""])])]
#[case::escaped_quote("\"he said \"\"hi\"\"\",x", vec![row(&["he said \"hi\"", "x"])])]
#[case::crlf("a,b\r\nc,d\r\n", vec![row(&["a", "b"]), row(&["c", "d"]), row(&[""])])]
#[case::newline_in_quotes("\"line 1\nline 2\",z", vec![row(&["line 1\nline 2", "z"])])]
#[case::empty_cells(",,", vec![row(&["", "", ""])])]
fn given_text_when_parsing_then_rows_match(#[case] text: &str, #[case] expected: Vec<Vec<String>>) {
    assert_eq!(parse_rows(text), expected);
}

#[test]
fn given_empty_input_when_parsing_then_one_empty_row() {
    assert_eq!(parse_rows(""), vec![row(&[""])]);
}

#[test]
fn given_fixture_when_parsing_then_every_line_is_a_row() {
    // Arrange
    let text = std::fs::read_to_string("tests/resources/animals.csv").unwrap();

    // Act
    let rows = parse_rows(&text);

    // Assert: header + 10 data lines + trailing empty row
    assert_eq!(rows.len(), 12);
    assert_eq!(rows[0][0], "Common Name");
    assert_eq!(rows[1][4], "Mimics hawk calls, loudly");
    assert_eq!(rows[4][4], "Grip of \"28 pounds\"");
    assert!(rows.iter().skip(1).take(8).all(|r| r.len() == 8));
}

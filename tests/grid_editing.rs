//! Grid engine integration tests
//!
//! End-to-end properties of the parse / normalize / serialize pipeline and
//! the dual-view reconciler, independent of any filesystem.

use csvgrid::document::DocumentState;
use csvgrid::grid::{
    ensure_trailing_blank, parse_delimited, serialize_grid, trim_trailing_blank, Delimiter, Grid,
    ParseLimits,
};

const COMMA: Delimiter = Delimiter::Comma;

fn limits() -> ParseLimits {
    ParseLimits::default()
}

fn grid(rows: &[&[&str]]) -> Grid {
    Grid::from_rows(
        rows.iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect(),
    )
}

// ========================================================================
// Round-trip properties
// ========================================================================

#[test]
fn test_round_trip_preserves_trimmed_grid() {
    let cases: Vec<Grid> = vec![
        grid(&[&["a", "b"], &["1", "2"]]),
        grid(&[&["with,comma", "with\"quote"], &["multi\nline", "plain"]]),
        grid(&[&["lone"]]),
        grid(&[&["", "interior", ""], &["x", "", ""]]),
    ];

    for original in cases {
        let mut normalized = original.clone();
        ensure_trailing_blank(&mut normalized);

        let trimmed = trim_trailing_blank(&normalized);
        let text = serialize_grid(&trimmed, COMMA);
        let reparsed = parse_delimited(&text, COMMA, limits());

        // Reparsing adds nothing and loses nothing, modulo the trailing
        // blank row a terminator-free serialization never produces
        assert_eq!(
            trim_trailing_blank(&reparsed.grid),
            trimmed,
            "round-trip mismatch for {:?}",
            text
        );
    }
}

#[test]
fn test_round_trip_tab_delimited() {
    let g = grid(&[&["a\tb", "c"], &["1", "2,3"]]);
    let mut normalized = g.clone();
    ensure_trailing_blank(&mut normalized);

    let trimmed = trim_trailing_blank(&normalized);
    let text = serialize_grid(&trimmed, Delimiter::Tab);
    let reparsed = parse_delimited(&text, Delimiter::Tab, limits());

    assert_eq!(trim_trailing_blank(&reparsed.grid), trimmed);
}

#[test]
fn test_empty_grid_serializes_to_empty_text() {
    let g = grid(&[&["", ""], &["", ""]]);
    let trimmed = trim_trailing_blank(&g);
    assert_eq!(serialize_grid(&trimmed, COMMA), "");
}

// ========================================================================
// Scenario: blank-grid growth
// ========================================================================

#[test]
fn test_blank_grid_growth_scenario() {
    let mut state = DocumentState::new();

    // Empty text yields a 1x1 grid with one blank cell
    let view = state.grid_view(COMMA, limits());
    assert_eq!(view.grid.row_count(), 1);
    assert_eq!(view.grid.column_count(), 1);
    assert_eq!(view.grid.get(0, 0), "");

    // Typing a value into (0,0) grows the grid to 2x2: the populated cell,
    // one blank row, one blank column, one blank corner
    state.commit_cell_edit(0, 0, "first", COMMA);
    let view = state.grid_view(COMMA, limits());
    assert_eq!(view.grid.row_count(), 2);
    assert_eq!(view.grid.column_count(), 2);
    assert_eq!(view.grid.get(0, 0), "first");
    assert_eq!(view.grid.get(0, 1), "");
    assert_eq!(view.grid.get(1, 0), "");
    assert_eq!(view.grid.get(1, 1), "");
}

#[test]
fn test_repeated_edge_typing_keeps_growing() {
    let mut state = DocumentState::new();
    state.grid_view(COMMA, limits());

    state.commit_cell_edit(0, 0, "a", COMMA);
    state.commit_cell_edit(1, 1, "b", COMMA);
    state.commit_cell_edit(2, 2, "c", COMMA);

    let view = state.grid_view(COMMA, limits());
    assert_eq!(view.grid.row_count(), 4);
    assert_eq!(view.grid.column_count(), 4);
    assert_eq!(state.source_text(), "a,,\n,b,\n,,c");
}

// ========================================================================
// Dual-view consistency
// ========================================================================

#[test]
fn test_cell_edits_and_source_edits_interleave() {
    let mut state = DocumentState::new();
    state.load_into("a,b\nc,d".to_string(), None);
    state.grid_view(COMMA, limits());

    state.commit_cell_edit(0, 0, "A", COMMA);
    assert_eq!(state.source_text(), "A,b\nc,d");

    state.commit_source_edit("A,b\nc,d\ne,f".to_string(), COMMA, limits());
    let view = state.grid_view(COMMA, limits());
    assert_eq!(view.grid.get(2, 0), "e");

    state.commit_cell_edit(2, 1, "F", COMMA);
    assert_eq!(state.source_text(), "A,b\nc,d\ne,F");
}

#[test]
fn test_source_edit_with_quoting_survives_cell_edit() {
    let mut state = DocumentState::new();
    state.commit_source_edit("\"x,y\",plain".to_string(), COMMA, limits());

    let view = state.grid_view(COMMA, limits());
    assert_eq!(view.grid.get(0, 0), "x,y");

    // Editing an unrelated cell must re-quote the untouched one correctly
    state.commit_cell_edit(0, 1, "edited", COMMA);
    assert_eq!(state.source_text(), "\"x,y\",edited");
}

// ========================================================================
// Truncation accounting through the reconciler
// ========================================================================

#[test]
fn test_truncation_stats_reach_the_view() {
    let text: String = (0..150)
        .map(|i| format!("row{i},value"))
        .collect::<Vec<_>>()
        .join("\n");
    let capped = ParseLimits {
        max_rows: 100,
        max_cols: 256,
    };

    let mut state = DocumentState::new();
    state.load_into(text, None);

    let view = state.grid_view(COMMA, capped);
    assert!(view.rows_truncated);
    assert_eq!(view.total_rows, 150);
    // Normalization adds the trailing blank row on top of the 100 kept
    assert_eq!(view.grid.row_count(), 101);
}

#[test]
fn test_cell_edit_on_truncated_view_keeps_hidden_rows() {
    let text: String = (0..150)
        .map(|i| format!("row{i},value"))
        .collect::<Vec<_>>()
        .join("\n");
    let capped = ParseLimits {
        max_rows: 100,
        max_cols: 256,
    };

    let mut state = DocumentState::new();
    state.load_into(text.clone(), None);
    state.grid_view(COMMA, capped);

    // The edit is refused: serializing the capped grid would drop rows
    // 100..150 from the document
    assert!(!state.commit_cell_edit(0, 0, "edited", COMMA));
    assert_eq!(state.source_text(), text);
    assert!(state.source_text().contains("row149"));
    assert!(!state.is_dirty());
}

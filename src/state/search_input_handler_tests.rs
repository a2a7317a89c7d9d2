//! Tests for search input handling.

use super::*;

fn typed(text: &str) -> SearchBuffer {
    text.chars()
        .fold(SearchBuffer::default(), handle_char_input)
}

// ===== Insertion =====

#[test]
fn typing_appends_and_advances_cursor() {
    let buffer = typed("shoe");
    assert_eq!(buffer.text(), "shoe");
    assert_eq!(buffer.cursor(), 4);
}

#[test]
fn insert_in_middle() {
    let buffer = handle_cursor_left(handle_cursor_left(typed("sho")));
    let buffer = handle_char_input(buffer, 'x');
    assert_eq!(buffer.text(), "sxho");
    assert_eq!(buffer.cursor(), 2);
}

#[test]
fn multibyte_characters_edit_by_char() {
    let buffer = typed("café");
    assert_eq!(buffer.cursor(), 4);
    let buffer = handle_backspace(buffer);
    assert_eq!(buffer.text(), "caf");

    let buffer = handle_char_input(handle_cursor_home(typed("ñu")), '¿');
    assert_eq!(buffer.text(), "¿ñu");
    let buffer = handle_delete(buffer);
    assert_eq!(buffer.text(), "¿u");
}

#[test]
fn new_places_cursor_at_end() {
    let buffer = SearchBuffer::new("boots");
    assert_eq!(buffer.cursor(), 5);
}

// ===== Deletion =====

#[test]
fn backspace_at_start_is_noop() {
    let buffer = handle_cursor_home(typed("ab"));
    let after = handle_backspace(buffer.clone());
    assert_eq!(after, buffer);
}

#[test]
fn backspace_removes_before_cursor() {
    let buffer = handle_backspace(handle_cursor_left(typed("abc")));
    assert_eq!(buffer.text(), "ac");
    assert_eq!(buffer.cursor(), 1);
}

#[test]
fn delete_removes_under_cursor() {
    let buffer = handle_delete(handle_cursor_home(typed("abc")));
    assert_eq!(buffer.text(), "bc");
    assert_eq!(buffer.cursor(), 0);
}

#[test]
fn delete_at_end_is_noop() {
    let buffer = typed("abc");
    assert_eq!(handle_delete(buffer.clone()), buffer);
}

#[test]
fn clear_empties_text_and_cursor() {
    let buffer = handle_clear(typed("abc"));
    assert_eq!(buffer, SearchBuffer::default());
}

// ===== Cursor movement =====

#[test]
fn cursor_saturates_at_bounds() {
    let buffer = handle_cursor_right(typed("ab"));
    assert_eq!(buffer.cursor(), 2);

    let buffer = handle_cursor_left(handle_cursor_left(handle_cursor_left(buffer)));
    assert_eq!(buffer.cursor(), 0);
}

#[test]
fn home_and_end_jump() {
    let buffer = handle_cursor_home(typed("hello"));
    assert_eq!(buffer.cursor(), 0);
    assert_eq!(handle_cursor_end(buffer).cursor(), 5);
}

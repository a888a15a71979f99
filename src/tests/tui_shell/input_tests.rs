use super::*;
use crossterm::event::KeyCode;

fn typed(s: &str) -> Input {
    let mut input = Input::default();
    for c in s.chars() {
        input.insert_char(c);
    }
    input
}

#[test]
fn edits_at_cursor_by_character() {
    let mut input = typed("héllo");
    assert_eq!(input.cursor, 5);

    input.move_left();
    input.move_left();
    input.backspace();
    assert_eq!(input.buf, "hélo");
    input.insert_char('L');
    assert_eq!(input.buf, "héLlo");

    input.edit(KeyCode::Home);
    input.delete();
    assert_eq!(input.buf, "éLlo");
    assert_eq!(input.cursor, 0);
}

#[test]
fn cursor_stays_in_bounds() {
    let mut input = typed("ab");
    input.move_right();
    assert_eq!(input.cursor, 2);
    input.delete();
    assert_eq!(input.buf, "ab");

    input.edit(KeyCode::Home);
    input.move_left();
    input.backspace();
    assert_eq!(input.cursor, 0);
    assert_eq!(input.buf, "ab");
}

#[test]
fn unrelated_keys_are_not_consumed() {
    let mut input = typed("x");
    assert!(!input.edit(KeyCode::Enter));
    assert!(!input.edit(KeyCode::Esc));
    assert!(input.edit(KeyCode::Char('y')));
    assert_eq!(input.buf, "xy");

    input.clear();
    assert_eq!(input.buf, "");
    assert_eq!(input.cursor, 0);
}

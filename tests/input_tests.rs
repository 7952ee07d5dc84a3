//! Keyboard/mouse mapping feeding the engine

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use m4tch::core::{GameState, SelectionInput};
use m4tch::input::{handle_key_event, mouse_click, should_quit, Cursor};
use m4tch::types::{Coord, GameAction, TICK_MS};

#[test]
fn test_cursor_driven_selection() {
    let mut game = GameState::new(42);
    game.start();
    for _ in 0..60 {
        game.tick(TICK_MS);
    }

    let mut cursor = Cursor::new();
    for code in [KeyCode::Up, KeyCode::Char('l'), KeyCode::Char('d')] {
        let action = handle_key_event(KeyEvent::from(code)).unwrap();
        cursor.apply(action);
    }
    assert_eq!(cursor.coord(), Coord { col: 2, row: 2 });

    assert_eq!(
        handle_key_event(KeyEvent::from(KeyCode::Enter)),
        Some(GameAction::Select)
    );
    let Coord { col, row } = cursor.coord();
    assert!(game.queue_selection(SelectionInput::Cell {
        col: col as i32,
        row: row as i32
    }));
    game.tick(TICK_MS);
    assert_eq!(game.selected(), &[Coord { col: 2, row: 2 }]);
}

#[test]
fn test_only_left_press_is_a_click() {
    let press = MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column: 3,
        row: 4,
        modifiers: KeyModifiers::NONE,
    };
    assert_eq!(mouse_click(press), Some((3, 4)));

    let drag = MouseEvent {
        kind: MouseEventKind::Drag(MouseButton::Left),
        ..press
    };
    assert_eq!(mouse_click(drag), None);
}

#[test]
fn test_quit_is_not_an_action() {
    let q = KeyEvent::from(KeyCode::Char('q'));
    assert!(should_quit(q));
    assert_eq!(handle_key_event(q), None);
}

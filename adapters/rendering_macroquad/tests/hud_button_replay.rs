use wayfarer_rendering::MenuAction;
use wayfarer_rendering_macroquad::UiInputState;

fn run_end_turn_sequence(sequence: &[bool]) -> Vec<bool> {
    let mut state = UiInputState::default();
    let mut presses = Vec::new();
    for &pressed in sequence {
        presses.push(state.take_end_turn());
        if pressed {
            state.register_end_turn();
        }
    }

    // Flush any trailing latched press so the harness observes the final click.
    presses.push(state.take_end_turn());
    presses
}

#[test]
fn end_turn_button_sequence_is_deterministic() {
    let button_sequence = [false, true, false, true, true, false];
    let expected = vec![false, false, true, false, true, true, false];

    let first_run = run_end_turn_sequence(&button_sequence);
    let second_run = run_end_turn_sequence(&button_sequence);

    assert_eq!(first_run, expected);
    assert_eq!(first_run, second_run);
}

#[test]
fn menu_selection_fires_once() {
    let mut state = UiInputState::default();
    state.register_menu_selection(MenuAction::NewGame);

    assert_eq!(state.take_menu_selection(), Some(MenuAction::NewGame));
    assert_eq!(state.take_menu_selection(), None);
}

//! End-to-end keypad scenarios through the public API

use keypad_calculator::driver::{self, CalculatorDriver};
use keypad_calculator::prelude::*;

fn controller() -> Controller<RecordingSurface> {
    Controller::new(RecordingSurface::new())
}

#[test]
fn one_plus_two_equals_three() {
    let mut c = controller();
    c.press_all("1 + 2 =").unwrap();

    let frame = c.surface().last_frame().unwrap();
    assert_eq!(frame.display, "3");
    assert_eq!(frame.expression, "3");
    assert_eq!(
        c.surface().last_history().unwrap().first(),
        Some(&HistoryEntry::new("1+2", 3.0))
    );
}

#[test]
fn five_over_zero_shows_error() {
    let mut c = controller();
    c.press_all("5 / 0 =").unwrap();

    let frame = c.surface().last_frame().unwrap();
    assert_eq!(frame.display, "Error");
    assert!(frame.error);
    assert_eq!(c.editor().buffer(), "");
    assert!(c.editor().history().is_empty());
}

#[test]
fn clear_entry_cases() {
    let mut c = controller();
    c.press_all("1 2 + 5 CE").unwrap();
    assert_eq!(c.expression(), "12+0");

    c.press_all("AC 1 2 CE").unwrap();
    assert_eq!(c.expression(), "");
}

#[test]
fn sqrt_of_sixteen_and_negative_one() {
    let mut c = controller();
    c.press_all("1 6 sqrt").unwrap();
    assert_eq!(c.expression(), "4");

    c.press_all("AC - 1 sqrt").unwrap();
    assert_eq!(c.expression(), "-1");
    assert_eq!(c.display(), "-1");
}

#[test]
fn sign_toggle_then_evaluate() {
    let mut c = controller();
    c.press_all("5 sign").unwrap();
    assert_eq!(c.expression(), "-5");
    c.press_all("sign").unwrap();
    assert_eq!(c.expression(), "5");

    c.press_all("AC 3 - 5 sign =").unwrap();
    assert_eq!(c.display(), "8");
}

#[test]
fn rounding_hides_float_noise() {
    let mut c = controller();
    c.press_all("0 . 1 + 0 . 2 =").unwrap();
    assert_eq!(c.display(), "0.3");
}

#[test]
fn thirteen_evaluations_keep_twelve() {
    let mut c = controller();
    for i in 0..13 {
        c.press_all(&format!("AC {} + 1 =", i % 10)).unwrap();
    }
    let history = c.history();
    assert_eq!(history.len(), 12);
    assert_eq!(history[0].expression, "2+1");
    assert_eq!(history[11].expression, "1+1");
}

#[test]
fn history_selection_reinjects_result() {
    let mut c = controller();
    c.press_all("2 ^ 8 = AC 1 =").unwrap();
    assert!(c.select_history(1));
    assert_eq!(c.display(), "256");

    c.press_all("/ 2 =").unwrap();
    assert_eq!(c.display(), "128");
}

#[test]
fn clicks_and_keys_share_intents() {
    let mut by_click = controller();
    for id in ["btn-4", "btn-times", "btn-open-paren", "btn-2", "btn-plus", "btn-1", "btn-close-paren", "btn-equals"] {
        by_click.click(id).unwrap();
    }

    let mut by_key = controller();
    by_key.press_all("4 * ( 2 + 1 ) Enter").unwrap();

    assert_eq!(by_click.display(), "12");
    assert_eq!(by_click.history(), by_key.history());
}

#[test]
fn all_scenarios_run_on_controller() {
    driver::run_all_scenarios(&mut controller());
}

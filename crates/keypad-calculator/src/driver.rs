//! Calculator driver and shared scenarios
//!
//! Scenarios are written once against [`CalculatorDriver`] and run against
//! any front end that can press keys and report what it shows: the
//! in-process [`Controller`] here, the CLI binary in its own test suite.

use crate::controller::Controller;
use crate::intent::UnknownKey;
use crate::surface::{DisplaySurface, HistorySurface};

/// Abstract driver for keypad interactions
pub trait CalculatorDriver {
    /// Presses a single key
    fn press(&mut self, key: &str) -> Result<(), UnknownKey>;

    /// Gets the main display text
    fn display(&self) -> String;

    /// Gets the raw buffer echo
    fn expression(&self) -> String;

    /// Gets history entries (newest first)
    fn history(&self) -> Vec<HistoryItem>;

    /// Presses every whitespace-separated key in `keys`
    fn press_all(&mut self, keys: &str) -> Result<(), UnknownKey> {
        keys.split_whitespace().try_for_each(|key| self.press(key))
    }
}

/// A simplified history item for driver results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryItem {
    /// The expression that was evaluated
    pub expression: String,
    /// The result as shown in the buffer
    pub result: String,
}

impl<S: DisplaySurface + HistorySurface> CalculatorDriver for Controller<S> {
    fn press(&mut self, key: &str) -> Result<(), UnknownKey> {
        self.press_key(key).map(|_| ())
    }

    fn display(&self) -> String {
        self.editor().frame().display
    }

    fn expression(&self) -> String {
        self.editor().buffer().to_string()
    }

    fn history(&self) -> Vec<HistoryItem> {
        self.editor()
            .history()
            .iter()
            .map(|entry| HistoryItem {
                expression: entry.expression.clone(),
                result: entry.result_text(),
            })
            .collect()
    }
}

// ===== Shared scenarios =====

fn run<D: CalculatorDriver>(driver: &mut D, keys: &str) {
    driver.press("Escape").unwrap();
    driver.press_all(keys).unwrap();
}

/// Verifies basic arithmetic typed on the keypad
pub fn verify_basic_arithmetic<D: CalculatorDriver>(driver: &mut D) {
    run(driver, "1 + 2 =");
    assert_eq!(driver.display(), "3");

    run(driver, "1 0 - 4 =");
    assert_eq!(driver.display(), "6");

    run(driver, "6 * 7 =");
    assert_eq!(driver.display(), "42");

    run(driver, "7 / 2 =");
    assert_eq!(driver.display(), "3.5");
}

/// Verifies operator precedence
pub fn verify_precedence<D: CalculatorDriver>(driver: &mut D) {
    run(driver, "2 + 3 * 4 =");
    assert_eq!(driver.display(), "14");

    run(driver, "2 ^ 3 ^ 2 =");
    assert_eq!(driver.display(), "512");

    run(driver, "- 2 ^ 2 =");
    assert_eq!(driver.display(), "-4");

    run(driver, "( 2 + 3 ) * 4 =");
    assert_eq!(driver.display(), "20");
}

/// Verifies the error display state
pub fn verify_error_display<D: CalculatorDriver>(driver: &mut D) {
    let before = driver.history().len();
    run(driver, "5 / 0 =");
    assert_eq!(driver.display(), "Error");
    assert_eq!(driver.expression(), "");
    assert_eq!(driver.history().len(), before);

    driver.press("7").unwrap();
    assert_eq!(driver.display(), "7");
}

/// Verifies buffer editing keys
pub fn verify_editing<D: CalculatorDriver>(driver: &mut D) {
    run(driver, "1 2 + 5 Delete");
    assert_eq!(driver.expression(), "12+0");

    run(driver, "1 2 + * -");
    assert_eq!(driver.expression(), "12-");

    run(driver, "1 . 5 . 2");
    assert_eq!(driver.expression(), "1.52");

    run(driver, "4 2 + Backspace");
    assert_eq!(driver.expression(), "42");

    run(driver, "0 . 1 + 0 . 2 =");
    assert_eq!(driver.display(), "0.3");
}

/// Verifies history ordering
pub fn verify_history<D: CalculatorDriver>(driver: &mut D) {
    run(driver, "1 + 1 =");
    run(driver, "2 + 2 =");
    run(driver, "3 + 3 =");

    let history = driver.history();
    assert!(history.len() >= 3);
    assert_eq!(
        history[0],
        HistoryItem {
            expression: "3+3".to_string(),
            result: "6".to_string(),
        }
    );
    assert_eq!(history[2].expression, "1+1");
}

/// Verifies the memory register
pub fn verify_memory<D: CalculatorDriver>(driver: &mut D) {
    run(driver, "MC 8 M+ Escape 2 M- Escape MR");
    assert_eq!(driver.expression(), "6");
    run(driver, "MC MR");
    assert_eq!(driver.expression(), "0");
}

/// Complete verification suite
pub fn run_all_scenarios<D: CalculatorDriver>(driver: &mut D) {
    verify_basic_arithmetic(driver);
    verify_precedence(driver);
    verify_error_display(driver);
    verify_editing(driver);
    verify_history(driver);
    verify_memory(driver);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;

    fn driver() -> Controller<RecordingSurface> {
        Controller::new(RecordingSurface::new())
    }

    #[test]
    fn test_driver_press_and_read() {
        let mut d = driver();
        d.press_all("9 * 9").unwrap();
        assert_eq!(d.expression(), "9*9");
        assert_eq!(d.display(), "9*9");
    }

    #[test]
    fn test_driver_press_unknown_stops() {
        let mut d = driver();
        assert!(d.press_all("1 nope 2").is_err());
        assert_eq!(d.expression(), "1");
    }

    #[test]
    fn test_driver_history_items() {
        let mut d = driver();
        d.press_all("2 - 5 =").unwrap();
        assert_eq!(
            d.history(),
            vec![HistoryItem {
                expression: "2-5".to_string(),
                result: "-3".to_string(),
            }]
        );
    }

    #[test]
    fn test_unified_basic_arithmetic() {
        verify_basic_arithmetic(&mut driver());
    }

    #[test]
    fn test_unified_precedence() {
        verify_precedence(&mut driver());
    }

    #[test]
    fn test_unified_error_display() {
        verify_error_display(&mut driver());
    }

    #[test]
    fn test_unified_editing() {
        verify_editing(&mut driver());
    }

    #[test]
    fn test_unified_history() {
        verify_history(&mut driver());
    }

    #[test]
    fn test_unified_memory() {
        verify_memory(&mut driver());
    }

    #[test]
    fn test_all_scenarios() {
        run_all_scenarios(&mut driver());
    }
}

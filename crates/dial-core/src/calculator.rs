// src/calculator.rs
//! Four-function calculator with a ten-character display.

use core::fmt::Write;

use heapless::String;
use log::debug;

/// Characters that fit on the calculator display.
pub const DISPLAY_WIDTH: usize = 10;

const ERROR_TEXT: &str = "Error";

/// Display buffer type shared with the calculator page.
pub type CalcDisplay = String<16>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub const fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "x",
            Operator::Divide => "/",
        }
    }

    fn apply(self, lhs: f64, rhs: f64) -> Option<f64> {
        let result = match self {
            Operator::Add => lhs + rhs,
            Operator::Subtract => lhs - rhs,
            Operator::Multiply => lhs * rhs,
            Operator::Divide if rhs == 0.0 => return None,
            Operator::Divide => lhs / rhs,
        };
        result.is_finite().then_some(result)
    }
}

/// One key of the 4×4 keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcKey {
    Digit(u8),
    Op(Operator),
    Equals,
    Clear,
}

impl CalcKey {
    /// Keypad layout, row-major.
    pub const GRID: [[CalcKey; 4]; 4] = [
        [
            CalcKey::Digit(7),
            CalcKey::Digit(8),
            CalcKey::Digit(9),
            CalcKey::Op(Operator::Divide),
        ],
        [
            CalcKey::Digit(4),
            CalcKey::Digit(5),
            CalcKey::Digit(6),
            CalcKey::Op(Operator::Multiply),
        ],
        [
            CalcKey::Digit(1),
            CalcKey::Digit(2),
            CalcKey::Digit(3),
            CalcKey::Op(Operator::Subtract),
        ],
        [
            CalcKey::Clear,
            CalcKey::Digit(0),
            CalcKey::Equals,
            CalcKey::Op(Operator::Add),
        ],
    ];

    /// Keycap text.
    pub fn label(self) -> &'static str {
        const DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];
        match self {
            CalcKey::Digit(d) => DIGITS[(d % 10) as usize],
            CalcKey::Op(op) => op.symbol(),
            CalcKey::Equals => "=",
            CalcKey::Clear => "C",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Calculator {
    display: CalcDisplay,
    accumulator: f64,
    pending: Option<Operator>,
    awaiting_new_number: bool,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    pub fn new() -> Self {
        let mut display = String::new();
        display.push('0').ok();
        Self {
            display,
            accumulator: 0.0,
            pending: None,
            awaiting_new_number: false,
        }
    }

    pub fn display(&self) -> &str {
        self.display.as_str()
    }

    pub fn display_buffer(&self) -> CalcDisplay {
        self.display.clone()
    }

    pub fn pending(&self) -> Option<Operator> {
        self.pending
    }

    pub fn press(&mut self, key: CalcKey) {
        match key {
            CalcKey::Digit(d) => self.digit(d),
            CalcKey::Op(op) => self.operator(op),
            CalcKey::Equals => self.equals(),
            CalcKey::Clear => self.clear(),
        }
        debug!("Calculator {:?} -> {}", key, self.display);
    }

    fn digit(&mut self, d: u8) {
        let c = (b'0' + d % 10) as char;
        if self.awaiting_new_number || self.display.as_str() == "0" {
            self.display.clear();
            self.awaiting_new_number = false;
        }
        if self.display.len() < DISPLAY_WIDTH {
            self.display.push(c).ok();
        }
    }

    fn operator(&mut self, op: Operator) {
        // A second operator in a row only replaces the first.
        if !(self.awaiting_new_number && self.pending.is_some()) && !self.resolve() {
            return;
        }
        self.pending = Some(op);
        self.awaiting_new_number = true;
    }

    fn equals(&mut self) {
        if self.resolve() {
            self.pending = None;
            self.awaiting_new_number = true;
        }
    }

    fn clear(&mut self) {
        self.display.clear();
        self.display.push('0').ok();
        self.accumulator = 0.0;
        self.pending = None;
        self.awaiting_new_number = false;
    }

    /// Fold the display value into the accumulator through the pending
    /// operator. Returns `false` after entering the error state.
    fn resolve(&mut self) -> bool {
        let Ok(value) = self.display.parse::<f64>() else {
            self.fail();
            return false;
        };
        let result = match self.pending {
            Some(op) => op.apply(self.accumulator, value),
            None => Some(value),
        };
        let Some(result) = result else {
            self.fail();
            return false;
        };
        match format_result(result) {
            Some(text) => {
                self.display = text;
                self.accumulator = result;
                true
            }
            None => {
                self.fail();
                false
            }
        }
    }

    fn fail(&mut self) {
        self.display.clear();
        self.display.push_str(ERROR_TEXT).ok();
        self.accumulator = 0.0;
        self.pending = None;
        self.awaiting_new_number = true;
    }
}

/// Integral values print without a decimal point, others with two decimals.
/// `None` if the text would not fit the display.
fn format_result(value: f64) -> Option<CalcDisplay> {
    let mut out = CalcDisplay::new();
    if libm::fabs(value) >= 1e10 {
        return None;
    }
    if libm::trunc(value) == value {
        write!(out, "{}", value as i64).ok()?;
    } else {
        write!(out, "{:.2}", value).ok()?;
    }
    (out.len() <= DISPLAY_WIDTH).then_some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(keys: &[CalcKey]) -> Calculator {
        let mut calc = Calculator::new();
        for key in keys {
            calc.press(*key);
        }
        calc
    }

    const ADD: CalcKey = CalcKey::Op(Operator::Add);
    const SUB: CalcKey = CalcKey::Op(Operator::Subtract);
    const MUL: CalcKey = CalcKey::Op(Operator::Multiply);
    const DIV: CalcKey = CalcKey::Op(Operator::Divide);

    fn d(n: u8) -> CalcKey {
        CalcKey::Digit(n)
    }

    #[test]
    fn test_simple_addition() {
        let calc = run(&[d(7), ADD, d(3), CalcKey::Equals]);
        assert_eq!(calc.display(), "10", "7 + 3 = 10");
    }

    #[test]
    fn test_divide_by_zero_then_recover() {
        let mut calc = run(&[d(5), DIV, d(0), CalcKey::Equals]);
        assert_eq!(calc.display(), "Error");
        calc.press(d(2));
        assert_eq!(calc.display(), "2", "next digit starts fresh");
        calc.press(ADD);
        calc.press(d(2));
        calc.press(CalcKey::Equals);
        assert_eq!(calc.display(), "4", "accumulator was reset by the error");
    }

    #[test]
    fn test_fraction_has_two_decimals() {
        let calc = run(&[d(2), DIV, d(3), CalcKey::Equals]);
        assert_eq!(calc.display(), "0.67");
        let calc = run(&[d(9), DIV, d(3), CalcKey::Equals]);
        assert_eq!(calc.display(), "3", "integral quotient has no decimal point");
    }

    #[test]
    fn test_chained_operators_apply_left_to_right() {
        let calc = run(&[d(2), ADD, d(3), MUL, d(4), CalcKey::Equals]);
        assert_eq!(calc.display(), "20", "(2 + 3) x 4");
    }

    #[test]
    fn test_repeated_operator_replaces_pending() {
        let calc = run(&[d(9), ADD, SUB, d(4), CalcKey::Equals]);
        assert_eq!(calc.display(), "5");
    }

    #[test]
    fn test_negative_result() {
        let calc = run(&[d(3), SUB, d(8), CalcKey::Equals]);
        assert_eq!(calc.display(), "-5");
    }

    #[test]
    fn test_entry_truncated_at_display_width() {
        let keys = [d(1); 14];
        let calc = run(&keys);
        assert_eq!(calc.display().len(), DISPLAY_WIDTH);
    }

    #[test]
    fn test_overflowing_result_is_error() {
        let mut keys = [d(9); 21];
        keys[10] = MUL;
        let mut calc = run(&keys);
        calc.press(CalcKey::Equals);
        assert_eq!(calc.display(), "Error", "result wider than the display");
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut calc = run(&[d(4), MUL]);
        calc.press(CalcKey::Clear);
        assert_eq!(calc.display(), "0");
        assert_eq!(calc.pending(), None);
        calc.press(d(6));
        assert_eq!(calc.display(), "6", "leading zero replaced");
    }

    #[test]
    fn test_grid_layout() {
        assert_eq!(CalcKey::GRID[0][3], DIV);
        assert_eq!(CalcKey::GRID[3][0], CalcKey::Clear);
        assert_eq!(CalcKey::GRID[3][2].label(), "=");
    }
}

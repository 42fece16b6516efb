//! Arithmetic questions.
//!
//! Every generated question has a non-negative integer answer: subtraction never
//! goes below zero and division is built from divisor × quotient so it is exact.

use crate::difficulty::Difficulty;
use rand::Rng;
use std::fmt;

/// Arithmetic operator for a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// The operator drilled at a difficulty tier.
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty.level() {
            1 => Operator::Add,
            2 => Operator::Subtract,
            3 => Operator::Multiply,
            _ => Operator::Divide,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
        }
    }

    /// Apply to two operands. `None` when the result is not a non-negative integer.
    pub fn apply(self, a: u32, b: u32) -> Option<u32> {
        match self {
            Operator::Add => a.checked_add(b),
            Operator::Subtract => a.checked_sub(b),
            Operator::Multiply => a.checked_mul(b),
            Operator::Divide => {
                if b != 0 && a % b == 0 {
                    Some(a / b)
                } else {
                    None
                }
            }
        }
    }
}

/// One quiz question and its expected answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    a: u32,
    b: u32,
    operator: Operator,
    answer: u32,
}

impl Question {
    /// Build from explicit operands. Rejects negative, inexact or overflowing results.
    pub fn new(operator: Operator, a: u32, b: u32) -> Option<Self> {
        let answer = operator.apply(a, b)?;
        Some(Self { a, b, operator, answer })
    }

    /// Generate a question for a difficulty tier.
    pub fn generate<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> Self {
        let operator = Operator::for_difficulty(difficulty);
        let (a, b) = match operator {
            Operator::Add => (rng.gen_range(0..=9), rng.gen_range(0..=9)),
            Operator::Subtract => {
                let a = rng.gen_range(0..=20);
                (a, rng.gen_range(0..=a))
            }
            Operator::Multiply => (rng.gen_range(0..=10), rng.gen_range(0..=10)),
            Operator::Divide => {
                let divisor = rng.gen_range(1..=9);
                let quotient = rng.gen_range(0..=10);
                (divisor * quotient, divisor)
            }
        };
        let answer = match operator {
            Operator::Add => a + b,
            Operator::Subtract => a - b,
            Operator::Multiply => a * b,
            Operator::Divide => a / b,
        };
        log::debug!("generated question {} {} {} (difficulty {})", a, operator.symbol(), b, difficulty);
        Self { a, b, operator, answer }
    }

    pub fn operands(&self) -> (u32, u32) {
        (self.a, self.b)
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn answer(&self) -> u32 {
        self.answer
    }

    /// Check raw user input. The leading integer counts and trailing text is
    /// ignored, so "7.0" and "7 coins" both read as 7. No leading integer is wrong.
    pub fn check(&self, input: &str) -> bool {
        leading_integer(input).is_some_and(|value| value == i64::from(self.answer))
    }
}

/// Optional sign plus the digits that follow it, after leading whitespace.
pub fn leading_integer(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let sign_len = usize::from(s.starts_with(['+', '-']));
    let digits = s[sign_len..].bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    s[..sign_len + digits].parse().ok()
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "What is {} {} {}?", self.a, self.operator.symbol(), self.b)
    }
}

//! Word-problem challenges used to defend against invasions.
//!
//! Each challenge adds a fraction and a decimal (or two decimals). Decimals are
//! rounded to two places before they are shown, and the expected answer is the
//! exact sum rounded to two places. Answers are compared with a tolerance.

use rand::Rng;
use std::fmt;

/// Default accepted distance between an answer and the expected value.
pub const DEFAULT_TOLERANCE: f64 = 0.01;

/// Word-problem template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChallengeKind {
    Pizza,
    Running,
    Juice,
    PocketMoney,
    Recipe,
}

impl ChallengeKind {
    pub const ALL: [ChallengeKind; 5] = [
        ChallengeKind::Pizza,
        ChallengeKind::Running,
        ChallengeKind::Juice,
        ChallengeKind::PocketMoney,
        ChallengeKind::Recipe,
    ];

    /// Draw the two terms this template adds.
    fn draw_terms<R: Rng + ?Sized>(self, rng: &mut R) -> (Term, Term) {
        match self {
            ChallengeKind::Pizza => (
                Term::fraction(rng.gen_range(1..=3), 4),
                Term::Decimal(random_decimal(rng, 0.1, 0.4)),
            ),
            ChallengeKind::Running => (
                Term::Decimal(random_decimal(rng, 0.5, 2.0)),
                Term::Decimal(random_decimal(rng, 1.0, 2.0)),
            ),
            ChallengeKind::Juice => (
                Term::fraction(rng.gen_range(1..=4), 5),
                Term::Decimal(random_decimal(rng, 0.2, 0.3)),
            ),
            ChallengeKind::PocketMoney => (
                Term::fraction(rng.gen_range(1..=4), 10),
                Term::Decimal(random_decimal(rng, 0.3, 0.3)),
            ),
            ChallengeKind::Recipe => (
                Term::Decimal(random_decimal(rng, 0.2, 0.6)),
                Term::fraction(1, 4),
            ),
        }
    }

    fn phrase(self, first: Term, second: Term) -> String {
        match self {
            ChallengeKind::Pizza => format!(
                "If you ate {first} of a pizza and your friend ate {second}, how much pizza did you both eat in total?"
            ),
            ChallengeKind::Running => format!(
                "You ran {first} miles on Monday and {second} miles on Tuesday. How far did you run in total?"
            ),
            ChallengeKind::Juice => format!(
                "Emma drank {first} of a bottle of juice. Her brother drank {second} of the bottle. How much did they drink together?"
            ),
            ChallengeKind::PocketMoney => format!(
                "You have {first} of a dollar and find {second} dollars more. How much do you have now?"
            ),
            ChallengeKind::Recipe => format!(
                "A recipe needs {first} cups of sugar and {second} cup of milk. What's the total liquid amount?"
            ),
        }
    }
}

/// One addend of a challenge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Term {
    Fraction { numerator: u32, denominator: u32 },
    Decimal(f64),
}

impl Term {
    pub fn fraction(numerator: u32, denominator: u32) -> Self {
        Term::Fraction { numerator, denominator }
    }

    pub fn value(self) -> f64 {
        match self {
            Term::Fraction { denominator: 0, .. } => 0.0,
            Term::Fraction { numerator, denominator } => f64::from(numerator) / f64::from(denominator),
            Term::Decimal(v) => v,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Fraction { numerator, denominator } => write!(f, "{}/{}", numerator, denominator),
            Term::Decimal(v) => write!(f, "{}", v),
        }
    }
}

/// A word problem with a decimal answer.
#[derive(Debug, Clone, PartialEq)]
pub struct Challenge {
    kind: ChallengeKind,
    text: String,
    answer: f64,
}

impl Challenge {
    /// Pick a template uniformly and fill it in.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let kind = ChallengeKind::ALL[rng.gen_range(0..ChallengeKind::ALL.len())];
        let (first, second) = kind.draw_terms(rng);
        let challenge = Self::compose(kind, first, second);
        log::debug!("generated {:?} challenge, answer {}", kind, challenge.answer);
        challenge
    }

    /// Build a challenge from explicit terms.
    pub fn compose(kind: ChallengeKind, first: Term, second: Term) -> Self {
        Self {
            kind,
            text: kind.phrase(first, second),
            answer: round2(first.value() + second.value()),
        }
    }

    pub fn kind(&self) -> ChallengeKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn answer(&self) -> f64 {
        self.answer
    }

    /// True when `value` is strictly within `tolerance` of the expected answer.
    pub fn check(&self, value: f64, tolerance: f64) -> bool {
        (value - self.answer).abs() < tolerance
    }

    /// Check raw user input. The leading decimal counts and trailing text is
    /// ignored, so "1.25 pizzas" reads as 1.25. No leading number is wrong.
    pub fn check_input(&self, input: &str, tolerance: f64) -> bool {
        leading_decimal(input).is_some_and(|value| self.check(value, tolerance))
    }
}

/// Longest decimal prefix after leading whitespace: sign, digits, an optional
/// fraction and an optional exponent. Needs at least one digit.
pub fn leading_decimal(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |start: usize| bytes[start..].iter().take_while(|b| b.is_ascii_digit()).count();

    let mut end = usize::from(s.starts_with(['+', '-']));
    let whole = digits_from(end);
    end += whole;
    let mut fraction = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction = digits_from(end + 1);
        if whole > 0 || fraction > 0 {
            end += 1 + fraction;
        }
    }
    if whole == 0 && fraction == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exponent = digits_from(end + 1 + sign);
        if exponent > 0 {
            end += 1 + sign + exponent;
        }
    }
    s[..end].parse().ok().filter(|v: &f64| v.is_finite())
}

impl fmt::Display for Challenge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Uniform decimal in [min, min + span), rounded to two places.
fn random_decimal<R: Rng + ?Sized>(rng: &mut R, min: f64, span: f64) -> f64 {
    round2(rng.gen::<f64>() * span + min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn pizza_example() {
        let c = Challenge::compose(ChallengeKind::Pizza, Term::fraction(3, 4), Term::Decimal(0.25));
        assert_eq!(
            c.text(),
            "If you ate 3/4 of a pizza and your friend ate 0.25, how much pizza did you both eat in total?"
        );
        assert!(c.check(1.0, DEFAULT_TOLERANCE));
        assert!(c.check_input("1", DEFAULT_TOLERANCE));
        assert!(c.check_input("1.005", DEFAULT_TOLERANCE));
        assert!(!c.check_input("1.02", DEFAULT_TOLERANCE));
    }

    #[test]
    fn answer_is_rounded_to_two_places() {
        let c = Challenge::compose(ChallengeKind::Juice, Term::fraction(1, 3), Term::Decimal(0.2));
        assert!((c.answer() - 0.53).abs() < 1e-9);
    }

    #[test]
    fn garbage_input_never_matches() {
        let c = Challenge::compose(ChallengeKind::Recipe, Term::Decimal(0.5), Term::fraction(1, 4));
        assert!(!c.check_input("", DEFAULT_TOLERANCE));
        assert!(!c.check_input("three quarters", DEFAULT_TOLERANCE));
        assert!(!c.check_input("NaN", DEFAULT_TOLERANCE));
        assert!(c.check_input("0.75", DEFAULT_TOLERANCE));
    }

    #[test]
    fn leading_decimal_ignores_trailing_text() {
        let c = Challenge::compose(ChallengeKind::Recipe, Term::Decimal(0.5), Term::fraction(1, 4));
        assert!(c.check_input("0.75 cups", DEFAULT_TOLERANCE));
        assert!(c.check_input(".75", DEFAULT_TOLERANCE));
        assert!(c.check_input("  +0.75.2", DEFAULT_TOLERANCE));
        assert!(c.check_input("7.5e-1", DEFAULT_TOLERANCE));
        assert!(!c.check_input("cups 0.75", DEFAULT_TOLERANCE));
        assert_eq!(leading_decimal("3e"), Some(3.0));
        assert_eq!(leading_decimal("1."), Some(1.0));
        assert_eq!(leading_decimal("-."), None);
        assert_eq!(leading_decimal("Infinity"), None);
    }

    #[test]
    fn generated_answers_stay_in_template_ranges() {
        let mut rng = StdRng::seed_from_u64(31337);
        for _ in 0..500 {
            let c = Challenge::generate(&mut rng);
            let (lo, hi) = match c.kind() {
                ChallengeKind::Pizza => (0.35, 1.25),
                ChallengeKind::Running => (1.5, 5.5),
                ChallengeKind::Juice => (0.4, 1.3),
                ChallengeKind::PocketMoney => (0.4, 1.0),
                ChallengeKind::Recipe => (0.45, 1.05),
            };
            assert!(c.answer() >= lo - 1e-9 && c.answer() <= hi + 1e-9, "{:?} answer {}", c.kind(), c.answer());
            assert!(c.check(c.answer(), DEFAULT_TOLERANCE));
        }
    }

    #[test]
    fn every_template_gets_picked() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(Challenge::generate(&mut rng).kind());
        }
        assert_eq!(seen.len(), ChallengeKind::ALL.len());
    }
}

//! Fixed assertion vocabulary shared by every analyzer.
//!
//! Names are matched case-sensitively against the JUnit 4 surface. The
//! arity rules decide whether a call carries an explanatory message and
//! which argument is the observed (actual) value.

use crate::syntax::{Expr, Literal};

/// Assertion families, grouped by argument convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssertionFamily {
    /// assertEquals / assertNotEquals / assertArrayEquals: an optional
    /// leading message, an expected and an actual value, an optional
    /// trailing delta
    Equality,
    /// assertSame / assertNotSame: message form is always three
    /// arguments
    Identity,
    /// assertTrue / assertFalse / assertNull / assertNotNull: unary
    /// with an optional leading message
    Predicate,
    /// assertThrows
    Throws,
    /// assertThat subject wrapper with chained descriptive calls
    Fluent,
    /// bare fail()
    Fail,
}

const EQUALITY: &[&str] = &["assertEquals", "assertNotEquals", "assertArrayEquals"];
const IDENTITY: &[&str] = &["assertSame", "assertNotSame"];
const PREDICATE: &[&str] = &["assertTrue", "assertFalse", "assertNull", "assertNotNull"];

/// Every recognized assertion name, the versioned list exposed to
/// callers.
pub const ASSERTION_NAMES: &[&str] = &[
    "assertEquals",
    "assertNotEquals",
    "assertArrayEquals",
    "assertSame",
    "assertNotSame",
    "assertTrue",
    "assertFalse",
    "assertNull",
    "assertNotNull",
    "assertThrows",
    "assertThat",
    "fail",
];

/// Classify a call name; `None` for anything outside the vocabulary.
pub fn classify(name: &str) -> Option<AssertionFamily> {
    if EQUALITY.contains(&name) {
        Some(AssertionFamily::Equality)
    } else if IDENTITY.contains(&name) {
        Some(AssertionFamily::Identity)
    } else if PREDICATE.contains(&name) {
        Some(AssertionFamily::Predicate)
    } else if name == "assertThrows" {
        Some(AssertionFamily::Throws)
    } else if name == "assertThat" {
        Some(AssertionFamily::Fluent)
    } else if name == "fail" {
        Some(AssertionFamily::Fail)
    } else {
        None
    }
}

pub fn is_assertion(name: &str) -> bool {
    classify(name).is_some()
}

/// Whether an expression is usable as an explanatory message: a string
/// literal, or a concatenation that contains one. Unresolvable names
/// are conservatively treated as non-messages.
pub fn is_string_like(expr: &Expr) -> bool {
    match expr.unwrapped() {
        Expr::Literal(Literal::Str(_)) => true,
        Expr::Binary { op, left, right } if op == "+" => {
            is_string_like(left) || is_string_like(right)
        }
        _ => false,
    }
}

/// Whether the call carries an explanatory message, per family arity
/// rules.
pub fn has_message(family: AssertionFamily, args: &[Expr]) -> bool {
    match family {
        // Two value arguments, optionally a leading message, optionally
        // a trailing delta. Three arguments are ambiguous between
        // (message, expected, actual) and (expected, actual, delta);
        // the first argument's shape disambiguates.
        AssertionFamily::Equality => {
            args.len() >= 4 || (args.len() == 3 && is_string_like(&args[0]))
        }
        AssertionFamily::Identity | AssertionFamily::Throws | AssertionFamily::Fluent => {
            args.len() >= 3
        }
        AssertionFamily::Predicate => args.len() >= 2,
        AssertionFamily::Fail => !args.is_empty(),
    }
}

/// The observed (actual/subject) argument of an assertion call, per
/// family conventions. `None` when the call has no value argument.
pub fn observed_argument<'a>(family: AssertionFamily, args: &'a [Expr]) -> Option<&'a Expr> {
    match family {
        AssertionFamily::Equality | AssertionFamily::Identity => match args.len() {
            0 | 1 => None,
            2 => Some(&args[1]),
            3 => {
                if is_string_like(&args[0]) {
                    Some(&args[2])
                } else {
                    Some(&args[1])
                }
            }
            _ => Some(&args[2]),
        },
        AssertionFamily::Predicate => match args.len() {
            0 => None,
            1 => Some(&args[0]),
            _ => Some(&args[1]),
        },
        AssertionFamily::Fluent => match args.len() {
            0 => None,
            1 | 2 => Some(&args[0]),
            _ => Some(&args[1]),
        },
        AssertionFamily::Throws | AssertionFamily::Fail => None,
    }
}

/// For an equality-family call, the (expected, actual) argument pair
/// once any message and delta are stripped.
pub fn value_pair(family: AssertionFamily, args: &[Expr]) -> Option<(&Expr, &Expr)> {
    if !matches!(family, AssertionFamily::Equality | AssertionFamily::Identity) {
        return None;
    }
    match args.len() {
        2 => Some((&args[0], &args[1])),
        3 => {
            if is_string_like(&args[0]) {
                Some((&args[1], &args[2]))
            } else {
                Some((&args[0], &args[1]))
            }
        }
        n if n >= 4 => Some((&args[1], &args[2])),
        _ => None,
    }
}

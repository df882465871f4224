//! Sibling ordering.
//!
//! Insertion order is what the builder produces. Display order puts folders
//! before items and compares names naturally ("Area 2" < "Area 10"), ignoring
//! case and accents. Whichever order a consumer lists entries in must also be
//! the order it asks first/last/prev/next questions in.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::domain::entities::WRAP_HINT;

/// Which order sibling queries and entry listings use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiblingOrder {
    /// First-insertion order of the source rows
    Insertion,
    /// Folders first, then natural name order
    #[default]
    Display,
}

impl std::str::FromStr for SiblingOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "insertion" => Ok(SiblingOrder::Insertion),
            "display" => Ok(SiblingOrder::Display),
            other => Err(format!("unknown sibling order: {other}")),
        }
    }
}

/// Anything that can be placed in display order.
pub trait DisplayKey {
    fn is_folder(&self) -> bool;
    fn display_name(&self) -> &str;
}

/// Folders before items, then natural name order, then raw name as tiebreak.
pub fn display_cmp<A: DisplayKey + ?Sized, B: DisplayKey + ?Sized>(a: &A, b: &B) -> Ordering {
    b.is_folder()
        .cmp(&a.is_folder())
        .then_with(|| natural_cmp(a.display_name(), b.display_name()))
        .then_with(|| a.display_name().cmp(b.display_name()))
}

/// Case- and accent-insensitive comparison with numeric runs compared by value.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let a = fold(a);
    let b = fold(b);
    let mut ai = a.iter().peekable();
    let mut bi = b.iter().peekable();

    loop {
        match (ai.peek(), bi.peek()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let left = take_digits(&mut ai);
                let right = take_digits(&mut bi);
                let ord = compare_numeric(&left, &right);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(x), Some(y)) => {
                let ord = x.cmp(y);
                if ord != Ordering::Equal {
                    return ord;
                }
                ai.next();
                bi.next();
            }
        }
    }
}

// Base letters only: decomposed, combining marks and wrap hints dropped, lowercased.
fn fold(s: &str) -> Vec<char> {
    s.nfd()
        .filter(|c| !unicode_normalization::char::is_combining_mark(*c) && *c != WRAP_HINT)
        .flat_map(char::to_lowercase)
        .collect()
}

fn take_digits<'a, I: Iterator<Item = &'a char>>(it: &mut std::iter::Peekable<I>) -> String {
    let mut digits = String::new();
    while let Some(c) = it.peek() {
        if !c.is_ascii_digit() {
            break;
        }
        digits.push(**c);
        it.next();
    }
    digits
}

fn compare_numeric(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

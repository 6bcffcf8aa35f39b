use std::{fmt, num::NonZeroUsize};

/// Issues display identifiers that are unique for the lifetime of the
/// generator.
///
/// Identifiers are `{PREFIX}-{N}`, where `N` is a monotonically increasing
/// counter zero-padded to a fixed number of digits (numbers wider than the
/// padding are printed in full). The counter is shared by every prefix, so a
/// cosmetic prefix never weakens uniqueness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdGenerator {
    prefix: String,
    digits: usize,
    next: NonZeroUsize,
}

impl IdGenerator {
    /// Creates a generator whose first identifier uses the number 1.
    #[must_use]
    pub fn new(prefix: impl Into<String>, digits: usize) -> Self {
        Self {
            prefix: prefix.into(),
            digits,
            next: NonZeroUsize::MIN,
        }
    }

    /// Issues the next identifier under the default prefix.
    ///
    /// # Panics
    ///
    /// Panics if the counter overflows `usize`.
    pub fn next_id(&mut self) -> String {
        let number = self.advance();
        FormattedId {
            prefix: &self.prefix,
            number,
            digits: self.digits,
        }
        .to_string()
    }

    /// Issues the next identifier under a different prefix.
    ///
    /// # Panics
    ///
    /// Panics if the counter overflows `usize`.
    pub fn next_id_with_prefix(&mut self, prefix: &str) -> String {
        let number = self.advance();
        FormattedId {
            prefix,
            number,
            digits: self.digits,
        }
        .to_string()
    }

    fn advance(&mut self) -> NonZeroUsize {
        let number = self.next;
        self.next = number.checked_add(1).expect("display ID counter overflow!");
        number
    }
}

struct FormattedId<'a> {
    prefix: &'a str,
    number: NonZeroUsize,
    digits: usize,
}

impl fmt::Display for FormattedId<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}-{:0width$}",
            self.prefix,
            self.number,
            width = self.digits
        )
    }
}

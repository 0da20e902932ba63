//! The keypad's digit buffer.

use std::fmt;

/// Longest answer the keypad accepts (19 x 19 = 361 fits comfortably).
pub const MAX_DIGITS: usize = 4;

/// A bounded sequence of decimal digits typed on the keypad.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerBuffer {
    digits: Vec<u8>,
}

impl AnswerBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a digit. Returns false if the digit was rejected
    /// (not 0-9, or the buffer is full).
    pub fn push(&mut self, digit: u8) -> bool {
        if digit > 9 || self.digits.len() >= MAX_DIGITS {
            return false;
        }
        self.digits.push(digit);
        true
    }

    /// Remove the last digit, if any.
    pub fn pop(&mut self) -> Option<u8> {
        self.digits.pop()
    }

    pub fn clear(&mut self) {
        self.digits.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.digits.len()
    }

    /// Parse the buffer as a number. `None` when empty.
    pub fn value(&self) -> Option<u32> {
        if self.digits.is_empty() {
            return None;
        }
        Some(
            self.digits
                .iter()
                .fold(0u32, |acc, d| acc * 10 + u32::from(*d)),
        )
    }
}

impl fmt::Display for AnswerBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for d in &self.digits {
            write!(f, "{d}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_value() {
        let mut buf = AnswerBuffer::new();
        assert_eq!(buf.value(), None);
        assert!(buf.push(3));
        assert!(buf.push(6));
        assert!(buf.push(1));
        assert_eq!(buf.value(), Some(361));
        assert_eq!(buf.to_string(), "361");
    }

    #[test]
    fn test_bounded_length() {
        let mut buf = AnswerBuffer::new();
        for d in [1, 2, 3, 4] {
            assert!(buf.push(d));
        }
        assert!(!buf.push(5));
        assert_eq!(buf.len(), MAX_DIGITS);
        assert_eq!(buf.value(), Some(1234));
    }

    #[test]
    fn test_rejects_non_digits() {
        let mut buf = AnswerBuffer::new();
        assert!(!buf.push(10));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_leading_zeros() {
        let mut buf = AnswerBuffer::new();
        buf.push(0);
        buf.push(4);
        assert_eq!(buf.value(), Some(4));
        assert_eq!(buf.to_string(), "04");
    }

    #[test]
    fn test_pop_and_clear() {
        let mut buf = AnswerBuffer::new();
        buf.push(4);
        buf.push(2);
        assert_eq!(buf.pop(), Some(2));
        assert_eq!(buf.value(), Some(4));
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.pop(), None);
    }
}

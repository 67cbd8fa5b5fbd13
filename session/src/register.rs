//! A scratch value of selectable width (8, 16, 32 or 64 bits) for bit
//! twiddling exercises. Every update is masked to the active width.

use std::fmt::Display;
use std::str::FromStr;

use alu::bitwise::Bits;
use serde::{Deserialize, Serialize};

use crate::history::History;
use crate::input::InputError;

/// How many updates the register remembers.
pub const REGISTER_HISTORY_CAPACITY: usize = 20;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BitWidth {
    W8,
    W16,
    W32,
    #[default]
    W64,
}

impl BitWidth {
    #[must_use]
    pub const fn bits(self) -> u32 {
        match self {
            Self::W8 => 8,
            Self::W16 => 16,
            Self::W32 => 32,
            Self::W64 => 64,
        }
    }

    /// `bits()` ones.
    #[must_use]
    pub const fn mask(self) -> u64 {
        u64::MAX >> (64 - self.bits())
    }
}

impl TryFrom<u32> for BitWidth {
    type Error = String;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        match bits {
            8 => Ok(Self::W8),
            16 => Ok(Self::W16),
            32 => Ok(Self::W32),
            64 => Ok(Self::W64),
            _ => Err(format!("Unsupported width {bits}, expected 8, 16, 32 or 64")),
        }
    }
}

impl FromStr for BitWidth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map_err(|_| format!("Unsupported width `{s}`"))
            .and_then(Self::try_from)
    }
}

impl Display for BitWidth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-bit", self.bits())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterUpdate {
    pub label: String,
    pub value: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BitRegister {
    value: u64,
    width: BitWidth,
    history: History<RegisterUpdate>,
}

impl Default for BitRegister {
    fn default() -> Self {
        Self::new(BitWidth::default())
    }
}

impl BitRegister {
    #[must_use]
    pub fn new(width: BitWidth) -> Self {
        Self {
            value: 0,
            width,
            history: History::new(REGISTER_HISTORY_CAPACITY),
        }
    }

    #[must_use]
    pub const fn value(&self) -> u64 {
        self.value
    }

    #[must_use]
    pub const fn width(&self) -> BitWidth {
        self.width
    }

    #[must_use]
    pub const fn history(&self) -> &History<RegisterUpdate> {
        &self.history
    }

    /// The value read as a two's-complement number of the active width.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn signed_value(&self) -> i64 {
        let unused = 64 - self.width.bits();
        ((self.value << unused) as i64) >> unused
    }

    /// Stores `value` masked to the active width and records it under
    /// `label`.
    pub fn update(&mut self, value: u64, label: &str) {
        self.value = value & self.width.mask();
        self.history.push(RegisterUpdate {
            label: label.to_string(),
            value: self.value,
        });
        tracing::debug!("register {label}: {:#x} ({})", self.value, self.width);
    }

    /// Flips bit `index`.
    ///
    /// # Errors
    ///
    /// [`InputError::BitOutOfRange`] when `index` is not below the width.
    pub fn toggle_bit(&mut self, index: u32) -> Result<u64, InputError> {
        let width = self.width.bits();
        let bit = u8::try_from(index)
            .ok()
            .filter(|_| index < width)
            .ok_or(InputError::BitOutOfRange { index, width })?;

        self.value.toggle_bit(bit);
        Ok(self.value)
    }

    /// Switches the width, masking the current value to it.
    pub fn set_width(&mut self, width: BitWidth) {
        self.width = width;
        self.value &= width.mask();
    }

    pub fn clear(&mut self) {
        self.value = 0;
        self.history.clear();
    }

    /// The value in binary, padded to the active width.
    #[must_use]
    pub fn to_binary(&self) -> String {
        format!("{:0width$b}", self.value, width = self.width.bits() as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn masks() {
        assert_eq!(BitWidth::W8.mask(), 0xFF);
        assert_eq!(BitWidth::W16.mask(), 0xFFFF);
        assert_eq!(BitWidth::W32.mask(), 0xFFFF_FFFF);
        assert_eq!(BitWidth::W64.mask(), u64::MAX);
    }

    #[test]
    fn update_is_masked_to_width() {
        let mut register = BitRegister::new(BitWidth::W8);
        register.update(0x1234, "set");
        assert_eq!(register.value(), 0x34);
        assert_eq!(
            register.history().latest(),
            Some(&RegisterUpdate {
                label: "set".to_string(),
                value: 0x34
            })
        );
    }

    #[test]
    fn narrowing_width_masks_value() {
        let mut register = BitRegister::default();
        register.update(u64::MAX, "all ones");
        register.set_width(BitWidth::W16);
        assert_eq!(register.value(), 0xFFFF);
        assert_eq!(register.signed_value(), -1);
        register.set_width(BitWidth::W64);
        assert_eq!(register.value(), 0xFFFF);
        assert_eq!(register.signed_value(), 0xFFFF);
    }

    #[test]
    fn toggle_within_width() {
        let mut register = BitRegister::new(BitWidth::W8);
        assert_eq!(register.toggle_bit(7), Ok(0x80));
        assert_eq!(register.signed_value(), -128);
        assert_eq!(register.toggle_bit(7), Ok(0));
        assert_eq!(
            register.toggle_bit(8),
            Err(InputError::BitOutOfRange { index: 8, width: 8 })
        );
        assert_eq!(
            register.toggle_bit(300),
            Err(InputError::BitOutOfRange {
                index: 300,
                width: 8
            })
        );
    }

    #[test]
    fn history_holds_twenty_updates() {
        let mut register = BitRegister::default();
        for i in 0..25 {
            register.update(i, "set");
        }
        assert_eq!(register.history().len(), REGISTER_HISTORY_CAPACITY);
        assert_eq!(register.history().latest().map(|u| u.value), Some(24));

        register.clear();
        assert_eq!(register.value(), 0);
        assert!(register.history().is_empty());
    }

    #[test]
    fn binary_is_padded_to_width() {
        let mut register = BitRegister::new(BitWidth::W8);
        register.update(5, "set");
        assert_eq!(register.to_binary(), "00000101");
    }

    #[test]
    fn parse_width() {
        assert_eq!("32".parse::<BitWidth>(), Ok(BitWidth::W32));
        assert!("12".parse::<BitWidth>().is_err());
        assert!("wide".parse::<BitWidth>().is_err());
    }
}

/// Helper methods to read and manipulate single bits of an unsigned word,
/// the index (`bit_idx`) goes from lsb to msb (right to left).
pub trait Bits: Copy {
    /// Number of bits of the underlying word.
    const WIDTH: u8;

    fn get_bit(self, bit_idx: u8) -> bool;

    fn set_bit(&mut self, bit_idx: u8, value: bool);

    /// Switches from 1 to 0, or conversely from 0 to 1
    fn toggle_bit(&mut self, bit_idx: u8);

    fn get_byte(self, byte_nth: u8) -> u8;
}

macro_rules! impl_bits {
    ($($t:ty),*) => {
        $(
            impl Bits for $t {
                #[allow(clippy::cast_possible_truncation)]
                const WIDTH: u8 = <$t>::BITS as u8;

                fn get_bit(self, bit_idx: u8) -> bool {
                    debug_assert!(bit_idx < Self::WIDTH);
                    (self >> bit_idx) & 1 == 1
                }

                fn set_bit(&mut self, bit_idx: u8, value: bool) {
                    debug_assert!(bit_idx < Self::WIDTH);
                    let mask: $t = 1 << bit_idx;
                    if value {
                        *self |= mask;
                    } else {
                        *self &= !mask;
                    }
                }

                fn toggle_bit(&mut self, bit_idx: u8) {
                    debug_assert!(bit_idx < Self::WIDTH);
                    *self ^= 1 << bit_idx;
                }

                #[allow(clippy::cast_possible_truncation)]
                fn get_byte(self, byte_nth: u8) -> u8 {
                    debug_assert!(byte_nth < Self::WIDTH / 8);
                    (self >> (byte_nth * 8)) as u8
                }
            }
        )*
    };
}

impl_bits!(u8, u16, u32, u64);

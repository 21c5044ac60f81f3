//! nom parsers over bit strings and bit buffers
//!
//! Bit buffers are `&[u8]` slices holding one `0`/`1` per item, as exposed
//! by [`BitSequence::as_slice`], so the stock byte combinators
//! (`take`, `many0`, `fold_many0`, ...) step through them bit by bit.

use nom::{
    bytes::complete::take,
    character::complete::one_of,
    combinator::map,
    multi::many0,
    sequence::pair,
    IResult,
};

use crate::bits::BitSequence;

/// Unsigned value of at most 64 bits, most significant first
pub fn bits_value(bits: &[u8]) -> u64 {
    bits.iter().fold(0, |acc, &bit| (acc << 1) | u64::from(bit))
}

/// Parse a run of `'0'`/`'1'` characters
///
/// Stops at the first other character, wrap it in
/// [`nom::combinator::all_consuming`] to reject trailing input.
pub fn bit_string(input: &str) -> IResult<&str, BitSequence> {
    map(many0(one_of("01")), |chars: Vec<char>| {
        chars.into_iter().map(|c| c == '1').collect()
    })(input)
}

/// Parse one `width`-bit word into its unsigned value
///
/// `width` must be in `1..=64`.
pub fn word<'a>(width: usize) -> impl FnMut(&'a [u8]) -> IResult<&'a [u8], u64> {
    move |input| map(take(width), bits_value)(input)
}

/// Parse as many whole `width`-bit words as possible
///
/// A trailing partial word is left in the remaining input.
pub fn words<'a>(width: usize) -> impl FnMut(&'a [u8]) -> IResult<&'a [u8], Vec<u64>> {
    move |input| many0(word(width))(input)
}

/// Parse one 8-bit character code
pub fn octet(input: &[u8]) -> IResult<&[u8], u8> {
    map(take(8usize), |bits: &[u8]| bits_value(bits) as u8)(input)
}

/// Split a checksummed frame into its data part and the trailing `width`
/// bits of checksum
pub fn checksum_frame<'a>(
    width: usize,
) -> impl FnMut(&'a [u8]) -> IResult<&'a [u8], (&'a [u8], &'a [u8])> {
    move |input: &'a [u8]| {
        let data_len = input.len().saturating_sub(width);
        pair(take(data_len), take(width))(input)
    }
}

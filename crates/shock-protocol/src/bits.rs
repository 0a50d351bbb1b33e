/// Render bits as a string of `0`/`1`, first bit first.
pub fn bitstring(bits: &[bool]) -> String {
    bits.iter().map(|&b| if b { '1' } else { '0' }).collect()
}

/// Expand a constant pattern like `"01"` into bit values.
pub(crate) fn pattern(bits: &'static str) -> impl Iterator<Item = bool> {
    bits.bytes().map(|b| b == b'1')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_in_order() {
        assert_eq!(bitstring(&[false, true, true, false]), "0110");
        assert_eq!(bitstring(&[]), "");
    }

    #[test]
    fn pattern_expands_ones_and_zeros() {
        let bits: Vec<bool> = pattern("0010").collect();
        assert_eq!(bits, vec![false, false, true, false]);
    }
}

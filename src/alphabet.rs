//! The fixed nucleotide alphabet.
//!
//! Bases are projected onto child slots in the order A, C, G, T, so any
//! traversal that visits slots 0..4 yields genes in lexicographic order.

/// Number of symbols in the alphabet (and children per inner node).
pub const ALPHABET_SIZE: usize = 4;

/// One nucleotide base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Base {
    A,
    C,
    G,
    T,
}

impl Base {
    /// All bases in child-slot order.
    pub const ALL: [Base; ALPHABET_SIZE] = [Base::A, Base::C, Base::G, Base::T];

    /// Projects a byte onto a base, ignoring case.
    ///
    /// Returns `None` for anything outside {A, C, G, T}.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte.to_ascii_uppercase() {
            b'A' => Some(Base::A),
            b'C' => Some(Base::C),
            b'G' => Some(Base::G),
            b'T' => Some(Base::T),
            _ => None,
        }
    }

    /// Child slot of this base (A=0, C=1, G=2, T=3).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`Base::index`].
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Uppercase ASCII symbol.
    pub fn symbol(self) -> u8 {
        match self {
            Base::A => b'A',
            Base::C => b'C',
            Base::G => b'G',
            Base::T => b'T',
        }
    }
}

/// Uppercases a raw line and strips whitespace (newlines, CR, tabs, spaces).
///
/// Non-base characters are kept: the indexer skips the windows that contain
/// them instead of silently shifting offsets.
pub fn normalize(raw: &[u8]) -> Vec<u8> {
    if raw.iter().all(|b| !b.is_ascii_whitespace() && !b.is_ascii_lowercase()) {
        return raw.to_vec();
    }
    raw.iter()
        .filter(|b| !b.is_ascii_whitespace())
        .map(u8::to_ascii_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_byte_case_insensitive() {
        assert_eq!(Base::from_byte(b'a'), Some(Base::A));
        assert_eq!(Base::from_byte(b'C'), Some(Base::C));
        assert_eq!(Base::from_byte(b'g'), Some(Base::G));
        assert_eq!(Base::from_byte(b'T'), Some(Base::T));
        assert_eq!(Base::from_byte(b'N'), None);
        assert_eq!(Base::from_byte(b'U'), None);
        assert_eq!(Base::from_byte(b'\n'), None);
    }

    #[test]
    fn test_index_order() {
        let indices: Vec<usize> = Base::ALL.iter().map(|b| b.index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
        for i in 0..ALPHABET_SIZE {
            assert_eq!(Base::from_index(i).map(Base::index), Some(i));
        }
        assert_eq!(Base::from_index(4), None);
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(b"acgt\r\nAC GT\n"), b"ACGTACGT".to_vec());
        assert_eq!(normalize(b"ACGT"), b"ACGT".to_vec());
        // Non-bases survive normalization
        assert_eq!(normalize(b"acnt"), b"ACNT".to_vec());
    }
}

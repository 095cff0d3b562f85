//! The RC4 primitives shared by name hashing and skill shuffling.

pub const TABLE_LEN: usize = 256;

/// A 256-entry byte permutation.
pub type Table = [u8; TABLE_LEN];

/// The identity permutation `S[i] = i`.
pub fn identity_table() -> Table {
    std::array::from_fn(|i| i as u8)
}

/// One key-scheduling pass over `table`, keyed cyclically by `key`.
///
/// The running index starts at zero on every call.
pub fn rc4_schedule(key: &[u8], table: &mut Table) {
    debug_assert!(!key.is_empty(), "rc4 key must not be empty");
    let mut s: u8 = 0;
    for i in 0..TABLE_LEN {
        s = s.wrapping_add(key[i % key.len()]).wrapping_add(table[i]);
        table.swap(i, s as usize);
    }
}

/// One output step of the RC4 generator: advance `a`/`b`, swap, look up.
pub fn rc4_extract(table: &mut Table, a: &mut u8, b: &mut u8) -> u8 {
    *a = a.wrapping_add(1);
    *b = b.wrapping_add(table[*a as usize]);
    table.swap(*a as usize, *b as usize);
    let idx = table[*a as usize].wrapping_add(table[*b as usize]);
    table[idx as usize]
}

/// Owned generator state over a private copy of a permutation.
#[derive(Clone, Debug)]
pub struct Rc4Stream {
    table: Table,
    a: u8,
    b: u8,
}

impl Rc4Stream {
    pub fn new(table: Table) -> Self {
        Self { table, a: 0, b: 0 }
    }

    pub fn next_byte(&mut self) -> u8 {
        rc4_extract(&mut self.table, &mut self.a, &mut self.b)
    }

    /// Two bytes combined big-endian.
    pub fn next_u16(&mut self) -> u16 {
        let hi = self.next_byte() as u16;
        let lo = self.next_byte() as u16;
        (hi << 8) | lo
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_permutation(t: &Table) -> bool {
        let mut seen = [false; TABLE_LEN];
        for &v in t.iter() {
            if seen[v as usize] {
                return false;
            }
            seen[v as usize] = true;
        }
        true
    }

    #[test]
    fn schedule_keeps_a_permutation() {
        let mut t = identity_table();
        rc4_schedule(b"\0team", &mut t);
        rc4_schedule(b"\0name", &mut t);
        assert!(is_permutation(&t));
        assert_ne!(t, identity_table());
    }

    #[test]
    fn schedule_with_zero_key_is_reproducible() {
        let mut t = identity_table();
        rc4_schedule(&[0], &mut t);
        assert!(is_permutation(&t));
        assert_eq!(&t[..4], &[0, 35, 3, 43]);
    }

    #[test]
    fn stream_matches_free_function() {
        let mut t = identity_table();
        rc4_schedule(b"\0Key", &mut t);

        let mut stream = Rc4Stream::new(t);
        let (mut copy, mut a, mut b) = (t, 0u8, 0u8);
        for _ in 0..64 {
            assert_eq!(stream.next_byte(), rc4_extract(&mut copy, &mut a, &mut b));
        }
    }

    #[test]
    fn classic_rc4_keystream_vector() {
        // Standard RC4 with key "Key" starts its keystream with EB 9F 77 81.
        let mut t = identity_table();
        rc4_schedule(b"Key", &mut t);
        let mut stream = Rc4Stream::new(t);
        let out: Vec<u8> = (0..4).map(|_| stream.next_byte()).collect();
        assert_eq!(out, vec![0xEB, 0x9F, 0x77, 0x81]);
    }
}

//! Accented letters and ligatures written with backslash sequences, e.g. `\"a`, `\'{e}`, `{\v c}` or `\ss`.
//!
//! Every accent is accepted in three equivalent forms: `\"{a}`, `{\"a}` and, for accents whose command is not a letter,
//! `\"a`. Ligatures (`\ss`, `\ae`, ...) are accepted as `{\ss}` or as `\ss` followed by a delimiter, which is not consumed.

use std::collections::HashMap;
use std::sync::OnceLock;

/// (command, [(letter, code point)])
const ACCENTS : &[(&str, &[(char, u32)])] = &[
    ("\"", &[('A', 0xC4), ('E', 0xCB), ('I', 0xCF), ('O', 0xD6), ('U', 0xDC), ('Y', 0x178),
             ('a', 0xE4), ('e', 0xEB), ('i', 0xEF), ('o', 0xF6), ('u', 0xFC), ('y', 0xFF)]),
    ("'",  &[('A', 0xC1), ('E', 0xC9), ('I', 0xCD), ('O', 0xD3), ('U', 0xDA), ('Y', 0xDD),
             ('a', 0xE1), ('e', 0xE9), ('i', 0xED), ('o', 0xF3), ('u', 0xFA), ('y', 0xFD),
             ('C', 0x106), ('c', 0x107), ('L', 0x139), ('l', 0x13A), ('N', 0x143), ('n', 0x144),
             ('R', 0x154), ('r', 0x155), ('S', 0x15A), ('s', 0x15B), ('Z', 0x179), ('z', 0x17A),
             ('G', 0x1F4), ('g', 0x1F5)]),
    ("`",  &[('A', 0xC0), ('E', 0xC8), ('I', 0xCC), ('O', 0xD2), ('U', 0xD9),
             ('a', 0xE0), ('e', 0xE8), ('i', 0xEC), ('o', 0xF2), ('u', 0xF9), ('N', 0x1F8), ('n', 0x1F9)]),
    ("^",  &[('A', 0xC2), ('E', 0xCA), ('I', 0xCE), ('O', 0xD4), ('U', 0xDB),
             ('a', 0xE2), ('e', 0xEA), ('i', 0xEE), ('o', 0xF4), ('u', 0xFB),
             ('C', 0x108), ('c', 0x109), ('G', 0x11C), ('g', 0x11D), ('H', 0x124), ('h', 0x125),
             ('J', 0x134), ('j', 0x135), ('S', 0x15C), ('s', 0x15D), ('W', 0x174), ('w', 0x175),
             ('Y', 0x176), ('y', 0x177)]),
    ("v",  &[('C', 0x10C), ('c', 0x10D), ('D', 0x10E), ('d', 0x10F), ('E', 0x11A), ('e', 0x11B),
             ('L', 0x13D), ('l', 0x13E), ('N', 0x147), ('n', 0x148), ('R', 0x158), ('r', 0x159),
             ('S', 0x160), ('s', 0x161), ('T', 0x164), ('t', 0x165), ('Z', 0x17D), ('z', 0x17E),
             ('A', 0x1CD), ('a', 0x1CE), ('I', 0x1CF), ('i', 0x1D0), ('O', 0x1D1), ('o', 0x1D2),
             ('U', 0x1D3), ('u', 0x1D4), ('G', 0x1E6), ('g', 0x1E7), ('K', 0x1E8), ('k', 0x1E9),
             ('j', 0x1F0), ('H', 0x21E), ('h', 0x21F)]),
    ("~",  &[('A', 0xC3), ('N', 0xD1), ('O', 0xD5), ('a', 0xE3), ('n', 0xF1), ('o', 0xF5),
             ('I', 0x128), ('i', 0x129), ('U', 0x168), ('u', 0x169)]),
    ("r",  &[('A', 0xC5), ('a', 0xE5), ('U', 0x16E), ('u', 0x16F)]),
    ("=",  &[('A', 0x100), ('a', 0x101), ('E', 0x112), ('e', 0x113), ('I', 0x12A), ('i', 0x12B),
             ('O', 0x14C), ('o', 0x14D), ('U', 0x16A), ('u', 0x16B), ('Y', 0x232), ('y', 0x233)]),
    (".",  &[('C', 0x10A), ('c', 0x10B), ('E', 0x116), ('e', 0x117), ('G', 0x120), ('g', 0x121),
             ('I', 0x130), ('Z', 0x17B), ('z', 0x17C), ('A', 0x226), ('a', 0x227), ('O', 0x22E), ('o', 0x22F),
             ('B', 0x1E02), ('b', 0x1E03), ('D', 0x1E0A), ('d', 0x1E0B), ('F', 0x1E1E), ('f', 0x1E1F),
             ('H', 0x1E22), ('h', 0x1E23), ('M', 0x1E40), ('m', 0x1E41), ('N', 0x1E44), ('n', 0x1E45),
             ('P', 0x1E56), ('p', 0x1E57), ('R', 0x1E58), ('r', 0x1E59), ('S', 0x1E60), ('s', 0x1E61),
             ('T', 0x1E6A), ('t', 0x1E6B), ('W', 0x1E86), ('w', 0x1E87), ('X', 0x1E8A), ('x', 0x1E8B),
             ('Y', 0x1E8E), ('y', 0x1E8F)]),
    ("u",  &[('A', 0x102), ('a', 0x103), ('E', 0x114), ('e', 0x115), ('G', 0x11E), ('g', 0x11F),
             ('I', 0x12C), ('i', 0x12D), ('O', 0x14E), ('o', 0x14F), ('U', 0x16C), ('u', 0x16D)]),
    ("c",  &[('C', 0xC7), ('c', 0xE7), ('G', 0x122), ('g', 0x123), ('K', 0x136), ('k', 0x137),
             ('L', 0x13B), ('l', 0x13C), ('N', 0x145), ('n', 0x146), ('R', 0x156), ('r', 0x157),
             ('S', 0x15E), ('s', 0x15F), ('T', 0x162), ('t', 0x163), ('E', 0x228), ('e', 0x229),
             ('D', 0x1E10), ('d', 0x1E11), ('H', 0x1E28), ('h', 0x1E29)]),
    ("H",  &[('O', 0x150), ('o', 0x151), ('U', 0x170), ('u', 0x171), ('Y', 0x4F2), ('y', 0x4F3)]),
    ("k",  &[('A', 0x104), ('a', 0x105), ('E', 0x118), ('e', 0x119), ('I', 0x12E), ('i', 0x12F),
             ('U', 0x172), ('u', 0x173), ('O', 0x1EA), ('o', 0x1EB)]),
];

const LIGATURES : &[(&str, u32)] = &[
    ("ss", 0xDF), ("ae", 0xE6), ("AE", 0xC6), ("oe", 0x153), ("OE", 0x152),
    ("o", 0xF8), ("O", 0xD8), ("S", 0xA7), ("l", 0x142), ("L", 0x141),
    ("aa", 0xE5), ("AA", 0xC5),
];

/// Lookup table for accent sequences, see the module documentation.
pub struct AccentTable {
    sequences : HashMap<String, char>,
    /// lengths (in bytes) of the sequences starting with `\`, longest first
    backslash_lengths : Vec<usize>,
    /// lengths (in bytes) of the sequences starting with `{`, longest first
    curly_lengths : Vec<usize>,
    ligatures : HashMap<&'static str, char>,
}

impl AccentTable {
    fn build() -> Self {
        let mut sequences = HashMap::new();
        let mut backslash_lengths = Vec::new();
        let mut curly_lengths = Vec::new();
        let mut insert = |sequence : String, c : char, lengths : &mut Vec<usize>| {
            if !lengths.contains(&sequence.len()) {
                lengths.push(sequence.len());
            }
            sequences.insert(sequence, c);
        };

        for &(command, letters) in ACCENTS {
            let letter_command = command.chars().all(|c| c.is_ascii_alphabetic());
            for &(letter, code) in letters {
                let Some(c) = char::from_u32(code) else { continue };
                if !letter_command {
                    insert(format!("\\{}{}", command, letter), c, &mut backslash_lengths);
                }
                insert(format!("{{\\{}{}}}", command, letter), c, &mut curly_lengths);
                insert(format!("\\{}{{{}}}", command, letter), c, &mut backslash_lengths);
            }
        }

        let mut ligatures = HashMap::new();
        for &(name, code) in LIGATURES {
            if let Some(c) = char::from_u32(code) {
                insert(format!("{{\\{}}}", name), c, &mut curly_lengths);
                ligatures.insert(name, c);
            }
        }

        backslash_lengths.sort_unstable_by(|a, b| b.cmp(a));
        curly_lengths.sort_unstable_by(|a, b| b.cmp(a));

        Self { sequences, backslash_lengths, curly_lengths, ligatures }
    }

    /// The table of every known accent and ligature
    pub fn standard() -> &'static AccentTable {
        static TABLE : OnceLock<AccentTable> = OnceLock::new();
        TABLE.get_or_init(AccentTable::build)
    }

    fn match_lengths(&self, input : &str, lengths : &[usize]) -> Option<(char, usize)> {
        lengths.iter()
            .filter(|&&len| input.is_char_boundary(len) && len <= input.len())
            .find_map(|&len| self.sequences.get(&input[..len]).map(|&c| (c, len)))
    }

    /// Matches an accent or ligature at the start of `input`, which begins with `\`.
    /// Returns the decoded character and the number of bytes it spans.
    pub fn match_backslash(&self, input : &str) -> Option<(char, usize)> {
        let rest = input.strip_prefix('\\')?;
        if let Some(found) = self.match_lengths(input, &self.backslash_lengths) {
            return Some(found);
        }

        let name_len = rest.find(|c : char| !c.is_ascii_alphabetic()).unwrap_or(rest.len());
        let name = &rest[..name_len];
        let c = *self.ligatures.get(name)?;
        match rest[name_len..].chars().next() {
            None | Some(' ') | Some('\t') | Some('\n') | Some('\\') | Some('{') | Some('}') => Some((c, 1 + name_len)),
            Some(_) => None,
        }
    }

    /// Matches an accent or ligature at the start of `input`, which begins with `{`.
    /// Returns the decoded character and the number of bytes it spans.
    pub fn match_curly(&self, input : &str) -> Option<(char, usize)> {
        if !input.starts_with('{') {
            return None;
        }
        self.match_lengths(input, &self.curly_lengths)
    }

    /// Number of registered sequences
    pub fn len(&self) -> usize {
        self.sequences.len() + self.ligatures.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_forms_agree() {
        let table = AccentTable::standard();
        for &(command, letters) in ACCENTS {
            let letter_command = command.chars().all(|c| c.is_ascii_alphabetic());
            for &(letter, code) in letters {
                let expected = char::from_u32(code).unwrap();

                let braced = format!("\\{}{{{}}}", command, letter);
                assert_eq!(table.match_backslash(&braced), Some((expected, braced.len())), "{}", braced);

                let curly = format!("{{\\{}{}}}", command, letter);
                assert_eq!(table.match_curly(&curly), Some((expected, curly.len())), "{}", curly);

                if !letter_command {
                    let short = format!("\\{}{}", command, letter);
                    assert_eq!(table.match_backslash(&short), Some((expected, short.len())), "{}", short);
                }
            }
        }
    }

    #[test]
    fn ligatures_need_a_delimiter() {
        let table = AccentTable::standard();
        assert_eq!(table.match_backslash(r"\ss"), Some(('ß', 3)));
        assert_eq!(table.match_backslash(r"\ss x"), Some(('ß', 3)));
        assert_eq!(table.match_backslash(r"\ss\alpha"), Some(('ß', 3)));
        assert_eq!(table.match_backslash(r"\ss{}"), Some(('ß', 3)));
        assert_eq!(table.match_curly(r"{\AE}"), Some(('Æ', 5)));
        assert_eq!(table.match_backslash(r"\o "), Some(('ø', 2)));

        assert_eq!(table.match_backslash(r"\ssx"), None);
        assert_eq!(table.match_backslash(r"\odot"), None);
        assert_eq!(table.match_backslash(r"\Lambda"), None);
    }

    #[test]
    fn letter_accents_require_braces() {
        let table = AccentTable::standard();
        assert_eq!(table.match_backslash(r"\ve"), None);
        assert_eq!(table.match_backslash(r"\vec{x}"), None);
        assert_eq!(table.match_backslash(r"\v{c}"), Some(('č', 5)));
        assert_eq!(table.match_backslash(r"\=o"), Some(('ō', 3)));
        assert_eq!(table.match_backslash(r"\k{o}"), Some(('ǫ', 5)));
        assert_eq!(table.match_backslash("\\\"ä"), None);
    }
}

//! Morse code table.
//!
//! Fixed Latin letters, digits, a handful of punctuation marks and the
//! word separator.  Codes are written with `.` for a dot and `-` for a
//! dash and exposed as a [`Symbol`] iterator.

/// One keyed element of a Morse character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    /// Short element, one unit long.
    Dot,
    /// Long element, three units long.
    Dash,
}

impl Symbol {
    /// Duration of this symbol in base units.
    pub const fn units(self) -> u32 {
        match self {
            Self::Dot => 1,
            Self::Dash => 3,
        }
    }

    /// Status indicator lit while this symbol is keyed.
    pub const fn indicator(self) -> Indicator {
        match self {
            Self::Dot => Indicator::Dot,
            Self::Dash => Indicator::Dash,
        }
    }
}

/// The two status LEDs, one per symbol type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    /// Indicator A, lit during dots.
    Dot,
    /// Indicator B, lit during dashes.
    Dash,
}

/// Symbol sequence of a single character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Code(&'static str);

impl Code {
    pub fn symbols(self) -> impl Iterator<Item = Symbol> {
        self.0.bytes().filter_map(|b| match b {
            b'.' => Some(Symbol::Dot),
            b'-' => Some(Symbol::Dash),
            _ => None,
        })
    }

    pub fn as_str(self) -> &'static str {
        self.0
    }
}

/// What the table holds for a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
    /// A keyed character.
    Code(Code),
    /// The word separator: silence, no symbols.
    WordGap,
}

/// Character → [`Entry`] lookup.
pub struct CodeTable {
    entries: &'static [(char, Entry)],
}

macro_rules! code {
    ($c:literal, $code:literal) => {
        ($c, Entry::Code(Code($code)))
    };
}

const STANDARD_ENTRIES: &[(char, Entry)] = &[
    code!('A', ".-"),
    code!('B', "-..."),
    code!('C', "-.-."),
    code!('D', "-.."),
    code!('E', "."),
    code!('F', "..-."),
    code!('G', "--."),
    code!('H', "...."),
    code!('I', ".."),
    code!('J', ".---"),
    code!('K', "-.-"),
    code!('L', ".-.."),
    code!('M', "--"),
    code!('N', "-."),
    code!('O', "---"),
    code!('P', ".--."),
    code!('Q', "--.-"),
    code!('R', ".-."),
    code!('S', "..."),
    code!('T', "-"),
    code!('U', "..-"),
    code!('V', "...-"),
    code!('W', ".--"),
    code!('X', "-..-"),
    code!('Y', "-.--"),
    code!('Z', "--.."),
    code!('1', ".----"),
    code!('2', "..---"),
    code!('3', "...--"),
    code!('4', "....-"),
    code!('5', "....."),
    code!('6', "-...."),
    code!('7', "--..."),
    code!('8', "---.."),
    code!('9', "----."),
    code!('0', "-----"),
    code!('.', ".-.-.-"),
    code!(',', "--..--"),
    code!('?', "..--.."),
    code!('/', "-..-."),
    code!('=', "-...-"),
    (' ', Entry::WordGap),
];

static STANDARD: CodeTable = CodeTable {
    entries: STANDARD_ENTRIES,
};

impl CodeTable {
    /// The built-in table shared by every engine.
    pub fn standard() -> &'static CodeTable {
        &STANDARD
    }

    /// Look up an (already uppercased) character.
    pub fn lookup(&self, c: char) -> Option<Entry> {
        self.entries
            .iter()
            .find(|(k, _)| *k == c)
            .map(|(_, entry)| *entry)
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, Entry)> + '_ {
        self.entries.iter().copied()
    }
}

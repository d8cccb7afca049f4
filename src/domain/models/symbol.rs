#[cfg(test)]
#[path = "symbol_test.rs"]
mod tests;

use strum::EnumIter;
use strum::IntoEnumIterator;

/// The fixed palette of symbols that can be inserted into a formula field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, strum::Display)]
pub enum Symbol {
    #[strum(serialize = "¬")]
    Negation,
    #[strum(serialize = "∧")]
    Conjunction,
    #[strum(serialize = "∨")]
    Disjunction,
    #[strum(serialize = "→")]
    Implication,
    #[strum(serialize = "↔")]
    Biconditional,
    #[strum(serialize = "(")]
    OpenParen,
    #[strum(serialize = ")")]
    CloseParen,
    #[strum(serialize = "A")]
    A,
    #[strum(serialize = "B")]
    B,
    #[strum(serialize = "C")]
    C,
    #[strum(serialize = "D")]
    D,
    #[strum(serialize = "E")]
    E,
    #[strum(serialize = "F")]
    F,
    #[strum(serialize = "G")]
    G,
}

impl Symbol {
    pub fn is_operator(&self) -> bool {
        return !self.is_letter();
    }

    pub fn is_letter(&self) -> bool {
        return matches!(
            self,
            Symbol::A | Symbol::B | Symbol::C | Symbol::D | Symbol::E | Symbol::F | Symbol::G
        );
    }

    /// Operators and parentheses are bound to F1 through F7.
    pub fn from_function_key(num: u8) -> Option<Symbol> {
        return Symbol::iter()
            .filter(|symbol| return symbol.is_operator())
            .nth(usize::from(num).checked_sub(1)?);
    }

    /// Letters are bound to Alt plus the letter, case insensitive.
    pub fn from_letter(letter: char) -> Option<Symbol> {
        let upper = letter.to_ascii_uppercase().to_string();
        return Symbol::iter().find(|symbol| return symbol.is_letter() && symbol.to_string() == upper);
    }

    pub fn hotkey(&self) -> String {
        if self.is_letter() {
            return format!("Alt+{self}");
        }

        let idx = Symbol::iter()
            .filter(|symbol| return symbol.is_operator())
            .position(|symbol| return symbol == *self)
            .unwrap_or_default();

        return format!("F{}", idx + 1);
    }

    pub fn char_len(&self) -> usize {
        return self.to_string().chars().count();
    }
}

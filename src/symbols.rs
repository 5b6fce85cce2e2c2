use std::fmt;

/// A propositional variable: a single ASCII letter, canonicalized to upper case.
///
/// Variables order alphabetically, which is the order used for truth-table
/// columns and for enumerating assignments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Variable(char);

impl Variable {
    /// Upper bound on the number of distinct variables in any statement.
    pub const COUNT: usize = 26;

    /// Creates a variable from an ASCII letter in either case.
    pub fn new(letter: char) -> Option<Self> {
        letter
            .is_ascii_alphabetic()
            .then(|| Self(letter.to_ascii_uppercase()))
    }

    pub const fn name(self) -> char {
        self.0
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = [0u8; 4];
        f.pad(self.0.encode_utf8(&mut buf))
    }
}

impl TryFrom<char> for Variable {
    type Error = char;

    fn try_from(letter: char) -> Result<Self, Self::Error> {
        Self::new(letter).ok_or(letter)
    }
}

impl From<Variable> for char {
    fn from(v: Variable) -> Self {
        v.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonicalizes_to_upper_case() {
        assert_eq!(Variable::new('q'), Variable::new('Q'));
        assert_eq!(Variable::new('q').map(Variable::name), Some('Q'));
    }

    #[test]
    fn rejects_non_letters() {
        assert_eq!(Variable::new('1'), None);
        assert_eq!(Variable::new('é'), None);
        assert_eq!(Variable::try_from('_'), Err('_'));
    }

    #[test]
    fn orders_alphabetically() {
        let mut vars: Vec<Variable> = "cAb".chars().filter_map(Variable::new).collect();
        vars.sort();
        let names: String = vars.into_iter().map(char::from).collect();
        assert_eq!(names, "ABC");
    }
}

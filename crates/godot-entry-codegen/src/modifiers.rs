//! Kotlin declaration modifiers.

use bitflags::bitflags;

bitflags! {
    /// Modifiers on a class or function declaration.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const PUBLIC = 1 << 0;
        const PRIVATE = 1 << 1;
        const INTERNAL = 1 << 2;
        const OPEN = 1 << 3;
        const ABSTRACT = 1 << 4;
        const OVERRIDE = 1 << 5;
    }
}

impl Modifiers {
    /// Keywords in Kotlin's conventional order, each followed by a space.
    pub fn keywords(self) -> String {
        const ORDER: &[(Modifiers, &str)] = &[
            (Modifiers::PUBLIC, "public"),
            (Modifiers::PRIVATE, "private"),
            (Modifiers::INTERNAL, "internal"),
            (Modifiers::OPEN, "open"),
            (Modifiers::ABSTRACT, "abstract"),
            (Modifiers::OVERRIDE, "override"),
        ];
        let mut out = String::new();
        for (flag, keyword) in ORDER {
            if self.contains(*flag) {
                out.push_str(keyword);
                out.push(' ');
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_in_kotlin_order() {
        assert_eq!((Modifiers::OVERRIDE | Modifiers::OPEN).keywords(), "open override ");
        assert_eq!(Modifiers::empty().keywords(), "");
    }
}

//! Interned names.
//!
//! The spec language treats every name — category, choice, property — as a
//! bare string with no syntactic distinction between the three namespaces.
//! `v1.0` is a perfectly legal choice name; it must never be mistaken for a
//! number. We reify each namespace as its own tagged wrapper around a cheaply
//! cloned, string-equal `Ident` so values from different namespaces can't be
//! compared by accident, and equality never risks a float/int parse.

use std::fmt;
use std::rc::Rc;

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Ident(Rc<str>);

impl Ident {
    pub fn new(s: impl AsRef<str>) -> Self {
        Ident(Rc::from(s.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Ident {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

macro_rules! tagged_ident {
    ($name:ident) => {
        #[derive(Clone, PartialEq, Eq, Hash)]
        pub struct $name(pub Ident);

        impl $name {
            pub fn new(s: impl AsRef<str>) -> Self {
                $name(Ident::new(s))
            }

            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({:?})", stringify!($name), self.0.as_str())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }
    };
}

tagged_ident!(CategoryName);
tagged_ident!(ChoiceName);
tagged_ident!(PropertyName);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dotted_name_is_never_treated_as_numeric() {
        let c = ChoiceName::new("v1.0");
        assert_eq!(c.as_str(), "v1.0");
        assert_ne!(ChoiceName::new("v1.0"), ChoiceName::new("v1.00"));
    }

    #[test]
    fn namespaces_do_not_compare_across_tags() {
        let choice = ChoiceName::new("p");
        let prop = PropertyName::new("p");
        // Different types entirely — this wouldn't even compile as `==`.
        assert_eq!(choice.as_str(), prop.as_str());
    }
}

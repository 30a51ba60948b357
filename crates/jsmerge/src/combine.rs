use std::path::PathBuf;

pub trait Combine {
    /// Combine two values, preferring the values in `self`.
    ///
    /// The logic follows that of Cargo's `config.toml`: if a key is specified in
    /// multiple config files, the value from the higher precedence file wins.
    ///
    /// ...with one exception: lists are not joined. A module list is ordered and
    /// that order is the bundle's layout, so a higher precedence list replaces a
    /// lower precedence one wholesale.
    #[must_use]
    fn combine(self, other: Self) -> Self;
}

macro_rules! impl_combine_or {
    ($name:ty) => {
        impl Combine for Option<$name> {
            fn combine(self, other: Option<$name>) -> Option<$name> {
                self.or(other)
            }
        }
    };
}

impl_combine_or!(bool);
impl_combine_or!(PathBuf);
impl_combine_or!(Vec<PathBuf>);

mod builtin;

use derive_new::new;
use once_cell::sync::Lazy;

use crate::Watch;

/// An ordered list of watches looked up by name.
#[derive(Clone, Debug, Default, new)]
pub struct Catalog {
    watches: Vec<Watch>,
}

impl Catalog {
    /// Exact, case-sensitive lookup. The first watch with `name` wins.
    pub fn find(&self, name: &str) -> Option<&Watch> {
        self.watches.iter().find(|watch| watch.name() == name)
    }

    /// Appends `watches` after the existing ones, so existing names keep
    /// precedence.
    pub fn extend(&mut self, watches: impl IntoIterator<Item = Watch>) {
        self.watches.extend(watches);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Watch> {
        self.watches.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.watches.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.watches.is_empty()
    }
}

static BUILTIN: Lazy<Catalog> = Lazy::new(|| Catalog::new(builtin::watches()));

/// The catalog of the supported game build.
pub fn builtin() -> &'static Catalog {
    &BUILTIN
}

use std::fmt;

/// A functional area that contributes one resource bundle per locale.
///
/// Declaration order is the merge order: later domains override earlier ones
/// on colliding keys. Reordering these variants changes resolved
/// translations for every key defined in more than one domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Domain {
    Base,
    Settings,
    Client,
    Modals,
}

impl Domain {
    /// Canonical merge order.
    pub const ORDER: [Domain; 4] = [Domain::Base, Domain::Settings, Domain::Client, Domain::Modals];

    /// File stem of the domain's bundle (`<locale>/<stem>.json`).
    pub fn file_stem(&self) -> &'static str {
        match self {
            Domain::Base => "base",
            Domain::Settings => "settings",
            Domain::Client => "client",
            Domain::Modals => "modals",
        }
    }

    /// Parse a bundle file stem back into a domain.
    pub fn from_file_stem(stem: &str) -> Option<Domain> {
        Self::ORDER.into_iter().find(|domain| domain.file_stem() == stem)
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_stem())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_is_pinned() {
        assert_eq!(
            Domain::ORDER,
            [Domain::Base, Domain::Settings, Domain::Client, Domain::Modals]
        );
    }

    #[test]
    fn test_ord_matches_merge_order() {
        let mut sorted = vec![Domain::Modals, Domain::Base, Domain::Client, Domain::Settings];
        sorted.sort();
        assert_eq!(sorted, Domain::ORDER.to_vec());
    }

    #[test]
    fn test_file_stem_round_trip() {
        for domain in Domain::ORDER {
            assert_eq!(Domain::from_file_stem(domain.file_stem()), Some(domain));
        }
        assert_eq!(Domain::from_file_stem("forms"), None);
    }
}

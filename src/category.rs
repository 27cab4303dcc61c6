//! Canonical Categories
//!
//! Closed enums for the two user-chosen axes. Localized labels are resolved
//! to these tags by the external UI layer before they reach the core; the
//! only aliasing handled here is the legacy `Wealth` label for `Abundance`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Blessing category: selects both the manifestation column and the sigil
/// generator. `Protection` is a latent category: it has no column in the
/// manifestation matrix yet, but the sigil dispatcher maps it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Love,
    Friendship,
    Family,
    Abundance,
    Career,
    Health,
    Protection,
}

impl Category {
    /// The six canonical user-facing categories, in display order.
    /// `Protection` is reserved and excluded here.
    pub const CANONICAL: [Category; 6] = [
        Category::Love,
        Category::Friendship,
        Category::Family,
        Category::Abundance,
        Category::Career,
        Category::Health,
    ];

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Love" => Some(Self::Love),
            "Friendship" => Some(Self::Friendship),
            "Family" => Some(Self::Family),
            "Abundance" | "Wealth" => Some(Self::Abundance),
            "Career" => Some(Self::Career),
            "Health" => Some(Self::Health),
            "Protection" => Some(Self::Protection),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Love => "Love",
            Self::Friendship => "Friendship",
            Self::Family => "Family",
            Self::Abundance => "Abundance",
            Self::Career => "Career",
            Self::Health => "Health",
            Self::Protection => "Protection",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The fifteen canonical recipients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Recipient {
    Father,
    Mother,
    Son,
    Daughter,
    Grandfather,
    Grandmother,
    Boyfriend,
    Girlfriend,
    Husband,
    Wife,
    SelfRecipient,
    Boss,
    Mentee,
    Pet,
    Mentor,
}

impl Recipient {
    pub const ALL: [Recipient; 15] = [
        Recipient::Father,
        Recipient::Mother,
        Recipient::Son,
        Recipient::Daughter,
        Recipient::Grandfather,
        Recipient::Grandmother,
        Recipient::Boyfriend,
        Recipient::Girlfriend,
        Recipient::Husband,
        Recipient::Wife,
        Recipient::SelfRecipient,
        Recipient::Boss,
        Recipient::Mentee,
        Recipient::Pet,
        Recipient::Mentor,
    ];

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Father" => Some(Self::Father),
            "Mother" => Some(Self::Mother),
            "Son" => Some(Self::Son),
            "Daughter" => Some(Self::Daughter),
            "Grandfather" => Some(Self::Grandfather),
            "Grandmother" => Some(Self::Grandmother),
            "Boyfriend" => Some(Self::Boyfriend),
            "Girlfriend" => Some(Self::Girlfriend),
            "Husband" => Some(Self::Husband),
            "Wife" => Some(Self::Wife),
            "Self" => Some(Self::SelfRecipient),
            "Boss" => Some(Self::Boss),
            "Mentee" | "Subordinate" => Some(Self::Mentee),
            "Pet" => Some(Self::Pet),
            "Mentor" => Some(Self::Mentor),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Father => "Father",
            Self::Mother => "Mother",
            Self::Son => "Son",
            Self::Daughter => "Daughter",
            Self::Grandfather => "Grandfather",
            Self::Grandmother => "Grandmother",
            Self::Boyfriend => "Boyfriend",
            Self::Girlfriend => "Girlfriend",
            Self::Husband => "Husband",
            Self::Wife => "Wife",
            Self::SelfRecipient => "Self",
            Self::Boss => "Boss",
            Self::Mentee => "Mentee",
            Self::Pet => "Pet",
            Self::Mentor => "Mentor",
        }
    }

    /// True for workplace relationships; used by the visual attribute table.
    pub fn is_professional(self) -> bool {
        matches!(self, Self::Boss | Self::Mentee)
    }
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wealth_aliases_to_abundance() {
        assert_eq!(Category::from_label("Wealth"), Some(Category::Abundance));
    }

    #[test]
    fn labels_round_trip() {
        for c in Category::CANONICAL {
            assert_eq!(Category::from_label(c.label()), Some(c));
        }
        for r in Recipient::ALL {
            assert_eq!(Recipient::from_label(r.label()), Some(r));
        }
    }

    #[test]
    fn unknown_labels_rejected() {
        assert_eq!(Category::from_label("Fortune"), None);
        assert_eq!(Recipient::from_label("Stranger"), None);
    }
}

//! Blessing Assembly
//!
//! Combines the manifestation matrix with the per-category visual attribute
//! table into the record both compositors consume. The zodiac fallback glyph
//! is drawn from a seeded stream rather than ambient randomness, so a
//! blessing is fully determined by its (recipient, category) pair.

use serde::{Deserialize, Serialize};

use crate::category::{Category, Recipient};
use crate::manifestations::get_manifestation;
use crate::seed::RandomStream;

const ZODIAC_SYMBOLS: [&str; 12] = [
    "\u{2648}", "\u{2649}", "\u{264a}", "\u{264b}", "\u{264c}", "\u{264d}",
    "\u{264e}", "\u{264f}", "\u{2650}", "\u{2651}", "\u{2652}", "\u{2653}",
];

/// Everything one generation request carries: resolved texts plus the
/// visual identity of the category. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlessingData {
    pub category: Category,
    pub title: String,
    pub incantation: String,
    pub symbol: String,
    pub element: String,
    pub color: String,
    pub gradient: (String, String),
}

/// Build the blessing record for a recipient and category.
pub fn generate_blessing(recipient: Recipient, category: Category) -> BlessingData {
    let manifestation = get_manifestation(recipient, category);

    // Seeded fallback glyph; overridden by every canonical category below.
    let mut rand = RandomStream::from_str(&format!("{recipient}:{category}:zodiac"));
    let mut symbol = ZODIAC_SYMBOLS[rand.pick(ZODIAC_SYMBOLS.len())].to_string();
    let mut element = "Ether".to_string();
    let mut color = "text-yellow-400".to_string();
    let mut gradient = ("#d4af37".to_string(), "#f1c40f".to_string());

    match category {
        Category::Love => {
            element = "Fire".into();
            color = "text-rose-400".into();
            gradient = ("#7c3aed".into(), "#fbbf24".into());
            symbol = if recipient.is_professional() || recipient == Recipient::Mentor {
                "\u{2696}".into()
            } else {
                "\u{2764}".into()
            };
        }
        Category::Friendship => {
            element = "Air".into();
            color = "text-sky-400".into();
            gradient = ("#10b981".into(), "#e2e8f0".into());
            symbol = "\u{1f91d}".into();
        }
        Category::Family => {
            element = "Earth".into();
            color = "text-emerald-400".into();
            gradient = ("#d4af37".into(), "#fcd34d".into());
            symbol = "\u{1f333}".into();
        }
        Category::Abundance => {
            element = "Gold".into();
            color = "text-amber-400".into();
            gradient = ("#1e3a8a".into(), "#d4af37".into());
            symbol = "\u{1f48e}".into();
        }
        Category::Career => {
            element = "Metal".into();
            color = "text-blue-400".into();
            gradient = ("#3b82f6".into(), "#94a3b8".into());
            symbol = "\u{2694}".into();
        }
        Category::Health => {
            element = "Water".into();
            color = "text-teal-400".into();
            gradient = ("#059669".into(), "#f59e0b".into());
            symbol = "\u{2695}".into();
        }
        Category::Protection => {
            // Latent category: celestial-gold defaults stand.
        }
    }

    BlessingData {
        category,
        title: manifestation.title.to_string(),
        incantation: manifestation.incantation.to_string(),
        symbol,
        element,
        color,
        gradient,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blessing_is_deterministic() {
        let a = generate_blessing(Recipient::Pet, Category::Protection);
        let b = generate_blessing(Recipient::Pet, Category::Protection);
        assert_eq!(a, b);
    }

    #[test]
    fn professional_love_gets_scales() {
        let boss = generate_blessing(Recipient::Boss, Category::Love);
        assert_eq!(boss.symbol, "\u{2696}");
        let wife = generate_blessing(Recipient::Wife, Category::Love);
        assert_eq!(wife.symbol, "\u{2764}");
    }

    #[test]
    fn career_carries_steel_gradient() {
        let b = generate_blessing(Recipient::SelfRecipient, Category::Career);
        assert_eq!(b.title, "THE SOVEREIGN MANIFEST");
        assert_eq!(b.element, "Metal");
        assert_eq!(b.gradient, ("#3b82f6".to_string(), "#94a3b8".to_string()));
    }
}

//! Manifestation Matrix
//!
//! Static lookup from (recipient, category) to a sacred title and assertive
//! incantation. Recipients without an explicit row resolve through alias
//! groups; anything still unmatched falls back to the cosmic sentinel. The
//! fallback is a silent substitution, never an error -- the audit module
//! exists precisely to detect it in the committed data set.

use crate::category::{Category, Recipient};

/// Fallback title. Doubles as the audit signal for unmapped combinations.
pub const FALLBACK_TITLE: &str = "THE COSMIC BLESSING";

/// Fallback incantation paired with [`FALLBACK_TITLE`].
pub const FALLBACK_INCANTATION: &str =
    "I align with the rhythm of the universe. May all paths lead to light.";

/// A resolved matrix entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Manifestation {
    pub title: &'static str,
    pub incantation: &'static str,
}

/// Explicit rows of the matrix. Recipients outside this set resolve through
/// an alias group first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Group {
    SelfGroup,
    Partner,
    Kin,
    Pet,
    Professional,
    Boss,
    Mentor,
    Daughter,
    Son,
    Husband,
    Wife,
    Mother,
    Father,
}

fn group_for(recipient: Recipient) -> Group {
    match recipient {
        Recipient::SelfRecipient => Group::SelfGroup,
        Recipient::Boyfriend | Recipient::Girlfriend => Group::Partner,
        Recipient::Grandfather | Recipient::Grandmother => Group::Kin,
        Recipient::Pet => Group::Pet,
        Recipient::Mentee => Group::Professional,
        Recipient::Boss => Group::Boss,
        Recipient::Mentor => Group::Mentor,
        Recipient::Daughter => Group::Daughter,
        Recipient::Son => Group::Son,
        Recipient::Husband => Group::Husband,
        Recipient::Wife => Group::Wife,
        Recipient::Mother => Group::Mother,
        Recipient::Father => Group::Father,
    }
}

/// Resolve the matrix entry for a recipient and category, substituting the
/// fallback sentinel when no entry exists (e.g. the latent `Protection`
/// category).
pub fn get_manifestation(recipient: Recipient, category: Category) -> Manifestation {
    match entry(group_for(recipient), category) {
        Some((title, incantation)) => Manifestation { title, incantation },
        None => Manifestation {
            title: FALLBACK_TITLE,
            incantation: FALLBACK_INCANTATION,
        },
    }
}

#[rustfmt::skip]
fn entry(group: Group, category: Category) -> Option<(&'static str, &'static str)> {
    use Category::*;
    use Group::*;
    Some(match (group, category) {
        (SelfGroup, Love) => ("THE RADIANT SELF", "I am the Flame that burns without consuming. My heart is a beacon of divine love, attracting only that which honors my soul."),
        (SelfGroup, Friendship) => ("THE MAGNETIC SPIRIT", "I radiate authenticity and warmth. I attract kindred spirits who resonate with my highest truth."),
        (SelfGroup, Family) => ("THE ANCESTRAL ANCHOR", "I am the living bridge between past and future. I honor my lineage by thriving in the present."),
        (SelfGroup, Abundance) => ("THE GOLDEN FLOW", "Abundance is my birthright. I align with the infinite stream of prosperity that flows through the cosmos."),
        (SelfGroup, Career) => ("THE SOVEREIGN MANIFEST", "I command my destiny. My will is iron, my vision is clear, and success is the inevitable result of my focus."),
        (SelfGroup, Health) => ("THE VESSEL OF LIGHT", "My body is a sacred temple. I inhale the healing Aether, restoring balance and vigorous life to every cell."),

        (Partner, Love) => ("THE TWIN FLAME UNION", "Two stars orbiting a common center. I manifest a bond woven from understanding, passion, and eternal respect."),
        (Partner, Friendship) => ("THE ETERNAL ALLIANCE", "More than lovers, we are sovereign allies. I strengthen the trust that forms the bedrock of our union."),
        (Partner, Family) => ("THE SACRED LINEAGE", "Together we forge a path of legacy, grounding our shared dreams into the soil of reality."),
        (Partner, Abundance) => ("THE SHARED KINGDOM", "Together we build a legacy of plenty. Our combined energy multiplies every blessing that enters our life."),
        (Partner, Career) => ("THE POWER DYNAMIC", "We rise together. Our partnership is a catalyst for professional transcendence and mutual success."),
        (Partner, Health) => ("THE VITALITY BOND", "We nurture each other's strength. Together we radiate the light of perfect physical and spiritual well-being."),

        (Kin, Love) => ("THE HEARTH OF INFINITY", "Love flows through our home like a river, nourishing every soul within its sacred banks."),
        (Kin, Friendship) => ("THE KINSHIP CIRCLE", "We are a fortress of mutual support, bound by ancient trust and modern joy."),
        (Kin, Family) => ("THE ROOTS OF YGGDRASIL", "I channel the stability of the Great Tree into my lineage. My connection with my kin is unshakeable and nurturing."),
        (Kin, Abundance) => ("THE GENERATIONAL FLOW", "Prosperity is our birthright. We manifest wealth that serves the past, present, and future."),
        (Kin, Career) => ("THE LEGACY BUILDER", "We work as one. Every success is a stone laid for the castle of our family's future glory."),
        (Kin, Health) => ("THE SANCTUARY OF GAIA", "I wrap my kin in a mantle of green light. May the Earth sustain them and the Waters cleanse them of all ailment."),

        (Pet, Love) => ("THE BOND OF PURE SPIRIT", "A silent language of the heart. I bless this creature with comfort, joy, and the knowing that they are deeply loved."),
        (Pet, Friendship) => ("THE LOYAL RESONANCE", "You are my guardian and my soul-friend. I honor the silent pact of joy and trust between us."),
        (Pet, Family) => ("THE HEARTH GUARDIAN", "I bless this guardian of my home. May the warmth of the hearth always comfort them as they comfort me."),
        (Pet, Abundance) => ("THE OVERFLOW OF JOY", "I provide a life of plenty for this soul. Every need is met by the universe's infinite grace."),
        (Pet, Career) => ("THE GUARDIAN\u{2019}S PURPOSE", "You protect the peace of my creative space. Your vitality fuels my focus and determination."),
        (Pet, Health) => ("THE VITALITY OF THE WILD", "I invoke the strength of nature for this creature. May their spirit run free and their body remain strong and whole."),

        (Professional, Love) => ("THE ETHICAL RADIANCE", "I lead with compassion. My professional heart attracts allies who value integrity over all else."),
        (Professional, Friendship) => ("THE FELLOWSHIP OF MIND", "I manifest a bridge of intellectual synergy. Together, we unlock doors that neither could open alone."),
        (Professional, Family) => ("THE TEAM ANCESTRY", "We are a tribe of innovators. I honor our shared mission and our collective growth as one family."),
        (Professional, Abundance) => ("THE GOLDEN SYNERGY", "I align our professional paths with the flow of success. May our collaboration yield a harvest of gold and repute."),
        (Professional, Career) => ("THE SOVEREIGN VISION", "I honor the torchbearer. May the light of knowledge shine further, and may I be a worthy vessel of these teachings."),
        (Professional, Health) => ("THE WORK-LIFE RESONANCE", "I balance ambition with restoration. My energy remains high and my mind stays sharp through divine alignment."),

        (Boss, Love) => ("THE COMPASSIONATE LEADER", "I see the soul within the worker. I lead with a heart that inspires devotion and true excellence."),
        (Boss, Friendship) => ("THE ALLIANCE OF TRUST", "I am a mentor and an ally. Our professional bond is built on the bedrock of mutual respect."),
        (Boss, Family) => ("THE ARCHITECT OF TRIBE", "I build an environment where all can thrive. We are a family of excellence, bound by shared purpose."),
        (Boss, Abundance) => ("THE PROSPERITY VORTEX", "I command the flow of capital and value. I manifest abundance for all who follow my lead."),
        (Boss, Career) => ("THE CROWN OF INDUSTRY", "I am the master of my professional domain. My leadership defines the gold standard of success."),
        (Boss, Health) => ("THE TEMPLE OF FOCUS", "I lead from a place of centered strength. My vitality is the engine of our collective progress."),

        (Mentor, Love) => ("THE LEGACY OF LIGHT", "I pour my wisdom into the vessels of the future. My love is the guide that ignites their potential."),
        (Mentor, Friendship) => ("THE PHILOSOPHER\u{2019}S BOND", "We walk the path of knowledge together. Your growth is the greatest harvest of my experience."),
        (Mentor, Family) => ("THE SPIRITUAL LINEAGE", "I am the guardian of the tradition. I pass the eternal flame to the next generation of seekers."),
        (Mentor, Abundance) => ("THE HARVEST OF WISDOM", "I manifest wealth through the sharing of truth. Prosperity follows those who honor the teachings."),
        (Mentor, Career) => ("THE ASCENSION GUIDANCE", "I pave the way for your rise. Your success is the living testament to my mastery and vision."),
        (Mentor, Health) => ("THE WELLSPRING OF MIND", "I nurture the clarity of your spirit. May your health be as vast and deep as your knowledge."),

        (Daughter, Love) => ("THE BLOOM OF ETERNITY", "You are the heart's masterpiece. I surround you with the eternal light of infinite, unconditional love."),
        (Daughter, Friendship) => ("THE KINDRED CONNECTION", "We are sisters in spirit. I honor the unique and radiant light you bring into this universe."),
        (Daughter, Family) => ("THE FUTURE\u{2019}S PROMISE", "You are the crown of our lineage. I ground your dreams in the safety and wisdom of our home."),
        (Daughter, Abundance) => ("THE GARDEN OF PLENTY", "I manifest a world of limitless opportunity for you. May you always walk in the light of abundance."),
        (Daughter, Career) => ("THE STAR\u{2019}S ASCENSION", "You were born to shine. I command the universe to clear the path for your brilliance and success."),
        (Daughter, Health) => ("THE RADIANCE OF YOUTH", "May your body be a vessel of divine strength. I bless you with the inexhaustible vitality of the sun."),

        (Son, Love) => ("THE WARRIOR\u{2019}S HEART", "Your love is your greatest strength. I surround you with a protective light that never fades."),
        (Son, Friendship) => ("THE BROTHERHOOD OF LIGHT", "You attract loyal allies and true friends. Your path is paved with the trust of those you lead."),
        (Son, Family) => ("THE ANCHOR OF LEGACY", "You are the pillar of our future. I ground your strength in the ancient wisdom of our bloodline."),
        (Son, Abundance) => ("THE EMPIRE BUILDER", "I manifest the seeds of greatness within you. May your harvest of success be limitless and just."),
        (Son, Career) => ("THE ARCHITECT OF WILL", "You command your destiny. Your focus is sharp, and your professional success is inevitable."),
        (Son, Health) => ("THE IRON VITALITY", "May your spirit remain unbreakable. I bless your body with the enduring strength of the earth."),

        (Husband, Love) => ("THE PROTECTOR\u{2019}S EMBRACE", "Your love is my fortress. I align our hearts in a resonance of eternal and unwavering devotion."),
        (Husband, Friendship) => ("THE SOVEREIGN ALLY", "You are my lover and my most trusted friend. We navigate the stars as equals in all things."),
        (Husband, Family) => ("THE PILLAR OF THE HOME", "You are the strength of our tribe. I ground our family's future in your unwavering light."),
        (Husband, Abundance) => ("THE PROVIDER\u{2019}S FLOW", "I manifest prosperity through your hands. Our home is a temple of plenty and peace."),
        (Husband, Career) => ("THE COMMANDER\u{2019}S RISE", "I support your highest ambition. The universe rewards your focus with gold and lasting glory."),
        (Husband, Health) => ("THE STRENGTH OF THE OAK", "May you remain vibrant and strong. I bless your body with restorative and protective light."),

        (Wife, Love) => ("THE DIVINE FEMININE", "Your love is the soul of our home. I surround you with the radiance and grace of the moon."),
        (Wife, Friendship) => ("THE SACRED COMPANION", "You are my mirror and my muse. Our friendship is the most precious jewel of my life."),
        (Wife, Family) => ("THE WEAVER OF DESTINY", "You bind our family in love. Your wisdom is the thread that keeps our legacy whole."),
        (Wife, Abundance) => ("THE GODDESS OF PLENTY", "Prosperity follows your every footstep. I manifest infinite grace for your life's journey."),
        (Wife, Career) => ("THE RADIANT AMBITION", "You excel in all you touch. I command the light of success to shine upon your every endeavor."),
        (Wife, Health) => ("THE SANCTUARY OF SOUL", "May your health reflect your inner beauty. I bless you with lasting peace and vital power."),

        (Mother, Love) => ("THE ETERNAL SOURCE", "Your love is the first light. I honor the infinite grace and strength you have given me."),
        (Mother, Friendship) => ("THE MATRIARCH\u{2019}S WISDOM", "You are my guide and my confidant. Our bond is the foundation of my spirit and joy."),
        (Mother, Family) => ("THE HEART OF THE TRIBE", "You are the center of our world. I ground our family in your loving and protective presence."),
        (Mother, Abundance) => ("THE HARVEST OF GRACE", "I manifest comfort and plenty for you. May your years be filled with joy and deserved ease."),
        (Mother, Career) => ("THE LEGACY OF HONOR", "Your work is the soil of my success. I honor the path you have paved for our generation."),
        (Mother, Health) => ("THE VITALITY OF LIFE", "May the light of Gaia restore your energy. I bless you with strength, peace, and longevity."),

        (Father, Love) => ("THE STEADFAST BEACON", "Your love is a silent, powerful force. I surround you with the light of deep, eternal respect."),
        (Father, Friendship) => ("THE PATRIARCH\u{2019}S ALLY", "You are my teacher and my friend. I honor the quiet, enduring strength of our sacred bond."),
        (Father, Family) => ("THE ANCHOR OF TRUTH", "You are the gravity of our home. I ground our shared future in your unwavering integrity."),
        (Father, Abundance) => ("THE FRUITS OF LABOR", "I manifest a life of rest and plenty for this soul. Your legacy of wealth and honor is secure."),
        (Father, Career) => ("THE MASTER\u{2019}S VISION", "You showed me the way of discipline. I carry your torch with pride, success, and focus."),
        (Father, Health) => ("THE MOUNTAIN\u{2019}S STRENGTH", "May your spirit remain unyielding. I bless your body with the vitality of the stars."),

        (_, Protection) => return None,
    })
}

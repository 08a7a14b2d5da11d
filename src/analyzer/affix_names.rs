//! Names of magic-item affixes as they appear around the base in the header,
//! e.g. `Seething Divine Life Flask of Staunching`.

/// Prefix words of the magic items that are priced by base (flasks, maps).
const MAGIC_PREFIXES: &[&str] = &[
    // flasks
    "Abecedarian's",
    "Alchemist's",
    "Ample",
    "Bubbling",
    "Catalysed",
    "Cautious",
    "Chemist's",
    "Concentrated",
    "Experimenter's",
    "Panicked",
    "Perpetual",
    "Saturated",
    "Seething",
    "Surgeon's",
    // maps
    "Abhorrent",
    "Anarchic",
    "Antagonist's",
    "Armoured",
    "Augmented",
    "Burning",
    "Capricious",
    "Ceremonial",
    "Chaining",
    "Conflagrating",
    "Deadly",
    "Empowered",
    "Enervating",
    "Fecund",
    "Feral",
    "Fleet",
    "Freezing",
    "Grounded",
    "Hexproof",
    "Hexwarded",
    "Impervious",
    "Mirrored",
    "Multifarious",
    "Oppressive",
    "Overlord's",
    "Prismatic",
    "Punishing",
    "Savage",
    "Shocking",
    "Splitting",
    "Stalwart",
    "Titan's",
    "Twinned",
    "Unstoppable",
    "Unwavering",
    "Volatile",
    // jewels
    "Healthy",
    "Vivid",
    "Spirited",
    "Hale",
    "Potent",
    "Stinging",
    "Shimmering",
    // weapon damage
    "Heavy",
    "Serrated",
    "Wicked",
    "Vicious",
    "Bloodthirsty",
    "Cruel",
    "Tyrannical",
    "Merciless",
    "Glinting",
    "Burnished",
    "Polished",
    "Honed",
    "Gleaming",
    "Annealed",
    "Razor-sharp",
    "Flaring",
    "Heated",
    "Smouldering",
    "Smoking",
    "Flaming",
    "Scorching",
    "Incinerating",
    "Frosted",
    "Chilled",
    "Icy",
    "Frigid",
    "Frozen",
    "Humming",
    "Buzzing",
    "Snapping",
    "Crackling",
    "Sparking",
    "Arcing",
    // armour and accessories
    "Sanguine",
    "Stout",
    "Robust",
    "Rotund",
    "Virile",
    "Athlete's",
    "Vigorous",
    "Beryl",
    "Azure",
    "Layered",
    "Lobstered",
    "Buttressed",
    "Thickened",
    "Girded",
    "Ribbed",
    "Fortified",
    "Agile",
    "Dancer's",
    "Acrobat's",
    "Blurred",
    "Phased",
    "Shining",
    "Glimmering",
    "Glittering",
    "Glowing",
    "Radiating",
    "Pulsing",
    "Runner's",
    "Sprinter's",
    "Stallion's",
    "Gazelle's",
    "Cheetah's",
];

/// Base types whose first word is also a prefix name.
const PREFIXED_BASES: &[&str] = &["Heavy Arrow Quiver", "Heavy Belt", "Heavy Quiver", "Serrated Arrow Quiver"];

const SUFFIX_MARKER: &str = " of ";

pub fn is_magic_prefix(word: &str) -> bool {
    MAGIC_PREFIXES.contains(&word)
}

/// Removes up to `budget` affix names from a magic header line: a known
/// prefix word first, then a trailing ` of ...` suffix.
pub fn strip_magic_affix_names(header: &str, budget: usize) -> &str {
    let mut rest = header.trim();
    let mut budget = budget;

    if budget > 0 {
        if let Some((first, tail)) = rest.split_once(' ') {
            let is_base = PREFIXED_BASES.iter().any(|base| starts_with_words(rest, base));
            if is_magic_prefix(first) && !is_base {
                rest = tail.trim_start();
                budget -= 1;
            }
        }
    }

    if budget > 0 {
        if let Some(index) = rest.rfind(SUFFIX_MARKER) {
            if index > 0 {
                rest = rest[..index].trim_end();
            }
        }
    }

    rest
}

fn starts_with_words(text: &str, words: &str) -> bool {
    text.strip_prefix(words)
        .is_some_and(|tail| tail.is_empty() || tail.starts_with(' '))
}

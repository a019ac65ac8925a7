//! US/UK spelling alternates

use rustc_hash::FxHashMap;

/// British / American pairs whose alternate can be a 5-letter word
const DEFAULT_PAIRS: &[(&str, &str)] = &[
    ("armour", "armor"),
    ("colour", "color"),
    ("honour", "honor"),
    ("humour", "humor"),
    ("labour", "labor"),
    ("odour", "odor"),
    ("rumour", "rumor"),
    ("savour", "savor"),
    ("valour", "valor"),
    ("vapour", "vapor"),
    ("fibre", "fiber"),
    ("metre", "meter"),
    ("litre", "liter"),
    ("sabre", "saber"),
    ("ochre", "ocher"),
    ("tyres", "tires"),
    ("greys", "grays"),
    ("kerbs", "curbs"),
    ("cheque", "check"),
    ("plough", "plow"),
    ("ageing", "aging"),
    ("draught", "draft"),
];

/// Bidirectional spelling map
#[derive(Debug, Clone, Default)]
pub struct SpellingVariants {
    alternates: FxHashMap<String, Vec<String>>,
}

impl SpellingVariants {
    /// Map seeded with the built-in US/UK pairs
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_pairs(DEFAULT_PAIRS.iter().copied())
    }

    /// Build from `(a, b)` pairs; each pair is registered in both directions
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut alternates: FxHashMap<String, Vec<String>> = FxHashMap::default();
        for (a, b) in pairs {
            alternates.entry(a.to_owned()).or_default().push(b.to_owned());
            alternates.entry(b.to_owned()).or_default().push(a.to_owned());
        }
        Self { alternates }
    }

    /// Alternate spellings of `term`, empty if none are known
    #[must_use]
    pub fn alternates(&self, term: &str) -> &[String] {
        self.alternates.get(term).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.alternates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.alternates.is_empty()
    }
}

use crate::ListId;

/// Lists aggregated when no explicit configuration is given, in fetch order.
pub const DEFAULT_LISTS: &[&str] = &[
    "01101O10/lists/bot-list",
    "beaugunderson/lists/image-input-bots",
    "beaugunderson/lists/my-bots",
    "BooDooPerson/lists/bots",
    "botALLY/lists/omnibots",
    "brownpau/lists/bots",
    "ckolderup/lists/the-fall-of-humanity",
    "dbaker_h/lists/glitch-bots",
    "dphiffer/lists/impractical",
    "Gangles/lists/twitter-bots",
    "HarryGiles/lists/everyword-orgy",
    "inky/lists/bots",
    "looocas/lists/my-bot-garden",
    "mambocab/lists/great-bots",
    "mcmoots/lists/one-word-wonders",
    "negatendo/lists/bot-net",
    "nickfletchr/lists/image-bots",
    "RobotDramatico/lists/infinitos-monos",
    "sleepgoth/lists/bots",
    "thricedotted/lists/butt-bots",
    "thricedotted/lists/thricedotted-bottes",
    "tinysubversions/lists/darius-kazemi-s-bots",
    "tullyhansen/lists/bots",
];

pub fn default_lists() -> Vec<ListId> {
    DEFAULT_LISTS
        .iter()
        .filter_map(|raw| raw.parse().ok())
        .collect()
}

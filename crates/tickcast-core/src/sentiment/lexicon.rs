//! Rule-based headline scorer with a finance-tilted lexicon.

/// Positive terms with valence weights.
const POSITIVE: &[(&str, f64)] = &[
    ("gain", 1.6),
    ("gains", 1.6),
    ("rally", 1.8),
    ("rallies", 1.8),
    ("surge", 2.0),
    ("surges", 2.0),
    ("soar", 2.1),
    ("soars", 2.1),
    ("jump", 1.7),
    ("jumps", 1.7),
    ("rise", 1.4),
    ("rises", 1.4),
    ("climb", 1.4),
    ("climbs", 1.4),
    ("record", 1.5),
    ("high", 1.0),
    ("profit", 1.6),
    ("profits", 1.6),
    ("beat", 1.5),
    ("beats", 1.5),
    ("upgrade", 1.8),
    ("upgrades", 1.8),
    ("upgraded", 1.8),
    ("bullish", 1.9),
    ("strong", 1.3),
    ("growth", 1.4),
    ("wins", 1.5),
    ("outperform", 1.7),
    ("dividend", 1.0),
    ("buyback", 1.2),
    ("expands", 1.2),
    ("recovery", 1.3),
];

/// Negative terms with valence weights.
const NEGATIVE: &[(&str, f64)] = &[
    ("fall", -1.4),
    ("falls", -1.4),
    ("drop", -1.4),
    ("drops", -1.4),
    ("decline", -1.3),
    ("declines", -1.3),
    ("plunge", -2.1),
    ("plunges", -2.1),
    ("slump", -1.9),
    ("slumps", -1.9),
    ("crash", -2.4),
    ("crashes", -2.4),
    ("tumble", -1.8),
    ("tumbles", -1.8),
    ("loss", -1.6),
    ("losses", -1.6),
    ("low", -1.0),
    ("miss", -1.5),
    ("misses", -1.5),
    ("downgrade", -1.8),
    ("downgrades", -1.8),
    ("downgraded", -1.8),
    ("bearish", -1.9),
    ("weak", -1.3),
    ("fraud", -2.5),
    ("scam", -2.4),
    ("probe", -1.6),
    ("penalty", -1.6),
    ("fine", -1.2),
    ("layoffs", -1.8),
    ("default", -2.0),
    ("debt", -1.0),
    ("lawsuit", -1.5),
    ("selloff", -1.8),
    ("underperform", -1.7),
];

/// Preceding words that flip the next scored term.
const NEGATIONS: &[&str] = &[
    "not", "no", "never", "neither", "nor", "without", "hardly", "barely",
];

/// Preceding words that scale the next scored term.
const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("extremely", 1.5),
    ("sharply", 1.5),
    ("slightly", 0.7),
    ("marginally", 0.6),
    ("massively", 1.6),
    ("steeply", 1.5),
];

/// Negation scales and flips the valence rather than erasing it.
const NEGATION_FACTOR: f64 = -0.5;

/// Normalization constant for the compound score.
const COMPOUND_ALPHA: f64 = 15.0;

/// Lexicon scorer producing a compound score in [-1, 1] per headline.
#[derive(Debug, Default, Clone, Copy)]
pub struct LexiconScorer;

impl LexiconScorer {
    pub fn new() -> Self {
        Self
    }

    /// Compound sentiment of a headline. Zero when no lexicon term matches.
    pub fn score(&self, text: &str) -> f64 {
        let tokens: Vec<String> = text
            .split_whitespace()
            .map(|word| {
                word.chars()
                    .filter(|ch| ch.is_ascii_alphanumeric())
                    .collect::<String>()
                    .to_ascii_lowercase()
            })
            .filter(|token| !token.is_empty())
            .collect();

        let mut total = 0.0;
        for (index, token) in tokens.iter().enumerate() {
            let Some(valence) = term_valence(token) else {
                continue;
            };

            let mut adjusted = valence;
            if index > 0 {
                let prev = &tokens[index - 1];
                if NEGATIONS.contains(&prev.as_str()) {
                    adjusted *= NEGATION_FACTOR;
                } else if let Some(&(_, boost)) =
                    INTENSIFIERS.iter().find(|(word, _)| word == prev)
                {
                    adjusted *= boost;
                }
            }
            total += adjusted;
        }

        compound(total)
    }
}

fn term_valence(token: &str) -> Option<f64> {
    POSITIVE
        .iter()
        .chain(NEGATIVE)
        .find(|(word, _)| *word == token)
        .map(|&(_, valence)| valence)
}

/// Squash the raw valence sum into [-1, 1].
fn compound(total: f64) -> f64 {
    let normalized = total / (total * total + COMPOUND_ALPHA).sqrt();
    normalized.clamp(-1.0, 1.0)
}

//! Controlled vocabularies for the heuristic extractors.
//!
//! Every matching table lives here as data rather than code, so the
//! vocabulary can evolve without touching the extractors. A TOML file named
//! in the settings overrides individual tables; unnamed tables keep their
//! built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A canonical label plus the keywords whose presence selects it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordGroup {
    pub label: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Error)]
pub enum VocabError {
    #[error("failed to read vocabulary {}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed vocabulary {}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// The full set of matching tables used by the analyzer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vocabulary {
    /// Known company names, matched verbatim as whole words.
    #[serde(default = "default_companies")]
    pub companies: Vec<String>,
    /// Known game titles, matched verbatim as whole words.
    #[serde(default = "default_games")]
    pub games: Vec<String>,
    #[serde(default = "default_platforms")]
    pub platforms: Vec<KeywordGroup>,
    #[serde(default = "default_regions")]
    pub regions: Vec<KeywordGroup>,
    #[serde(default = "default_genres")]
    pub genres: Vec<KeywordGroup>,
    #[serde(default = "default_technologies")]
    pub technologies: Vec<KeywordGroup>,
    #[serde(default = "default_business_models")]
    pub business_models: Vec<KeywordGroup>,
    #[serde(default = "default_topics")]
    pub topics: Vec<KeywordGroup>,
    #[serde(default = "default_audiences")]
    pub audiences: Vec<KeywordGroup>,
    /// Ordered report-type rules; the first group with a keyword hit wins.
    #[serde(default = "default_report_types")]
    pub report_types: Vec<KeywordGroup>,
    #[serde(default = "default_positive_words")]
    pub positive_words: Vec<String>,
    #[serde(default = "default_negative_words")]
    pub negative_words: Vec<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            companies: default_companies(),
            games: default_games(),
            platforms: default_platforms(),
            regions: default_regions(),
            genres: default_genres(),
            technologies: default_technologies(),
            business_models: default_business_models(),
            topics: default_topics(),
            audiences: default_audiences(),
            report_types: default_report_types(),
            positive_words: default_positive_words(),
            negative_words: default_negative_words(),
        }
    }
}

impl Vocabulary {
    /// Load a vocabulary override file.
    pub fn load(path: &Path) -> Result<Self, VocabError> {
        let raw = fs::read_to_string(path).map_err(|source| VocabError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| VocabError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from `path` when given, builtin defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, VocabError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

fn terms(list: &[&str]) -> Vec<String> {
    list.iter().map(|t| t.to_string()).collect()
}

fn groups(list: &[(&str, &[&str])]) -> Vec<KeywordGroup> {
    list.iter()
        .map(|(label, keywords)| KeywordGroup {
            label: label.to_string(),
            keywords: terms(keywords),
        })
        .collect()
}

fn default_companies() -> Vec<String> {
    terms(&[
        // Game developers and publishers
        "Supercell",
        "Tencent",
        "Nintendo",
        "Sony",
        "PlayStation",
        "Microsoft",
        "Xbox",
        "Activision Blizzard",
        "Activision",
        "Blizzard",
        "Electronic Arts",
        "EA",
        "Epic Games",
        "Ubisoft",
        "Take-Two",
        "Rockstar",
        "Zynga",
        "Roblox",
        "Unity",
        "Niantic",
        "King",
        "Playtika",
        "Scopely",
        "Glu Mobile",
        "Rovio",
        "Nexon",
        "NetEase",
        "mixi",
        "Konami",
        "Bandai Namco",
        "Square Enix",
        "Capcom",
        "Sega",
        "NCSoft",
        "Krafton",
        "miHoYo",
        "Nexters",
        "Moon Active",
        "Playrix",
        "Voodoo",
        "Miniclip",
        "Gameloft",
        "Hutch",
        "FunPlus",
        "Lilith",
        "IGG",
        "Machine Zone",
        "Pocket Gems",
        "Jam City",
        "Big Fish",
        "Plarium",
        "Wildlife Studios",
        "SayGames",
        "Rollic",
        "CrazyLabs",
        "Lion Studios",
        "Kwalee",
        "Riot Games",
        "Bungie",
        "CD Projekt",
        "Paradox",
        "Embracer Group",
        "Stillfront",
        "AppLovin",
        "IronSource",
        "Skillz",
        "DraftKings",
        "FanDuel",
        // Platform holders and tech
        "Apple",
        "Google",
        "Amazon",
        "Meta",
        "Facebook",
        "TikTok",
        "ByteDance",
        "Snap",
        "Discord",
        "Twitch",
        "Steam",
        "Valve",
        "GOG",
        // Analytics and tooling vendors
        "Sensor Tower",
        "App Annie",
        "data.ai",
        "Newzoo",
        "SuperData",
        "Apptopia",
        "GameAnalytics",
        "Adjust",
        "AppsFlyer",
        "Liftoff",
        "Amplitude",
        "Firebase",
    ])
}

fn default_games() -> Vec<String> {
    terms(&[
        "Fortnite",
        "Minecraft",
        "Roblox",
        "Grand Theft Auto",
        "GTA",
        "Call of Duty",
        "League of Legends",
        "Dota",
        "Counter-Strike",
        "CS:GO",
        "Valorant",
        "Apex Legends",
        "PUBG",
        "Free Fire",
        "Among Us",
        "Fall Guys",
        "Genshin Impact",
        "Honkai",
        "Candy Crush",
        "Clash of Clans",
        "Clash Royale",
        "Brawl Stars",
        "Pokemon Go",
        "Pokemon",
        "Wordle",
        "Subway Surfers",
        "Temple Run",
        "Angry Birds",
        "Fruit Ninja",
        "Plants vs Zombies",
        "Mario",
        "Zelda",
        "Halo",
        "Destiny",
        "Overwatch",
        "World of Warcraft",
        "Final Fantasy",
        "Resident Evil",
        "Spider-Man",
        "God of War",
        "The Last of Us",
        "Uncharted",
        "Elden Ring",
        "Dark Souls",
    ])
}

fn default_platforms() -> Vec<KeywordGroup> {
    groups(&[
        (
            "Mobile",
            &[
                "mobile",
                "iOS",
                "Android",
                "smartphone",
                "tablet",
                "app store",
                "play store",
            ],
        ),
        ("PC", &["PC", "Steam", "desktop", "windows gaming"]),
        (
            "Console",
            &[
                "console",
                "PlayStation",
                "Xbox",
                "Nintendo Switch",
                "PS5",
                "PS4",
                "Xbox Series",
            ],
        ),
        (
            "Cloud",
            &["cloud gaming", "game streaming", "xCloud", "Stadia", "GeForce Now"],
        ),
        (
            "VR",
            &["VR", "virtual reality", "Oculus", "PSVR", "Meta Quest"],
        ),
        ("AR", &["AR", "augmented reality", "mixed reality"]),
    ])
}

fn default_regions() -> Vec<KeywordGroup> {
    groups(&[
        ("Global", &["global", "worldwide", "international"]),
        (
            "North America",
            &[
                "north america",
                "USA",
                "U.S.",
                "united states",
                "canada",
                "americas",
            ],
        ),
        (
            "Europe",
            &[
                "europe", "european", "UK", "germany", "france", "spain", "italy", "EMEA",
            ],
        ),
        ("Asia", &["asia", "asian"]),
        ("China", &["china", "chinese"]),
        ("Japan", &["japan", "japanese"]),
        ("Korea", &["korea", "korean"]),
        (
            "Southeast Asia",
            &[
                "southeast asia",
                "vietnam",
                "thailand",
                "indonesia",
                "philippines",
                "singapore",
            ],
        ),
        ("India", &["india", "indian"]),
        (
            "Latin America",
            &["latin america", "LATAM", "brazil", "mexico", "south america"],
        ),
        ("Middle East", &["middle east", "MENA", "saudi", "UAE"]),
        ("Africa", &["africa", "african"]),
        ("APAC", &["APAC", "asia pacific", "asia-pacific"]),
    ])
}

fn default_genres() -> Vec<KeywordGroup> {
    groups(&[
        ("RPG", &["RPG", "role-playing", "role playing"]),
        ("Action", &["action game", "action-adventure"]),
        ("Strategy", &["strategy", "RTS", "tower defense"]),
        ("Casual", &["casual game", "casual gaming"]),
        ("Puzzle", &["puzzle", "match-3", "match-three"]),
        ("Shooter", &["shooter", "FPS", "third-person shooter"]),
        ("Sports", &["sports game", "soccer", "basketball", "racing"]),
        ("Simulation", &["simulation", "management game"]),
        ("MMO", &["MMO", "MMORPG", "massively multiplayer"]),
        ("Battle Royale", &["battle royale"]),
        ("MOBA", &["MOBA", "multiplayer online battle arena"]),
        ("Hypercasual", &["hypercasual", "hyper-casual", "hyper casual"]),
        ("Card", &["card game", "CCG", "collectible card"]),
        ("Sandbox", &["sandbox", "open world"]),
    ])
}

fn default_technologies() -> Vec<KeywordGroup> {
    groups(&[
        ("AI", &["AI", "artificial intelligence", "machine learning"]),
        (
            "Blockchain",
            &["blockchain", "NFT", "Web3", "cryptocurrency", "crypto"],
        ),
        ("Cloud Gaming", &["cloud gaming", "game streaming"]),
        ("VR", &["VR", "virtual reality"]),
        ("AR", &["AR", "augmented reality"]),
        ("Metaverse", &["metaverse"]),
        ("5G", &["5G"]),
        ("Ray Tracing", &["ray tracing", "RTX"]),
        ("Cross-platform", &["cross-platform", "crossplay"]),
        (
            "Live Ops",
            &["live ops", "live operations", "GaaS", "games as a service"],
        ),
    ])
}

fn default_business_models() -> Vec<KeywordGroup> {
    groups(&[
        ("Free-to-Play", &["free-to-play", "F2P", "freemium"]),
        ("Premium", &["premium", "paid app"]),
        (
            "Subscription",
            &["subscription", "battle pass", "season pass"],
        ),
        (
            "In-App Purchases",
            &["IAP", "in-app purchase", "microtransaction"],
        ),
        (
            "Advertising",
            &["ad-supported", "advertising", "rewarded ads", "interstitial"],
        ),
        ("Pay-to-Win", &["pay-to-win", "P2W"]),
    ])
}

fn default_topics() -> Vec<KeywordGroup> {
    groups(&[
        (
            "Market Analysis",
            &[
                "market size",
                "market share",
                "industry analysis",
                "market dynamics",
            ],
        ),
        (
            "Revenue & Monetization",
            &["revenue", "monetization", "ARPU", "spending"],
        ),
        (
            "Player Behavior",
            &["player behavior", "user engagement", "retention", "churn"],
        ),
        ("Mobile Gaming", &["mobile", "iOS", "Android", "smartphone"]),
        ("PC Gaming", &["PC", "Steam", "desktop"]),
        (
            "Console Gaming",
            &["console", "PlayStation", "Xbox", "Nintendo"],
        ),
        ("Cloud Gaming", &["cloud gaming", "game streaming"]),
        ("Esports", &["esports", "competitive gaming", "tournament"]),
        (
            "Blockchain & NFT",
            &["blockchain", "NFT", "Web3", "cryptocurrency"],
        ),
        ("Metaverse", &["metaverse", "virtual world"]),
        (
            "VR/AR",
            &["VR", "AR", "virtual reality", "augmented reality"],
        ),
        ("User Acquisition", &["user acquisition", "CPI", "ad spend"]),
        (
            "Investment & M&A",
            &["investment", "M&A", "acquisition", "funding", "venture"],
        ),
        (
            "Game Development",
            &["game development", "game design", "game engine"],
        ),
        ("Industry Trends", &["trend", "outlook", "forecast"]),
        ("Regional Markets", &["regional", "geographic"]),
        ("Demographics", &["demographics", "gender", "audience"]),
        ("Technology", &["technology", "innovation", "AI"]),
    ])
}

fn default_audiences() -> Vec<KeywordGroup> {
    groups(&[
        (
            "Investors",
            &["investor", "investment", "shareholder", "portfolio"],
        ),
        ("Developers", &["developer", "studio", "game development"]),
        (
            "Marketers",
            &["marketer", "advertising", "user acquisition"],
        ),
        ("Executives", &["executive", "leadership", "strategy"]),
        ("Researchers", &["analyst", "research", "academic"]),
    ])
}

fn default_report_types() -> Vec<KeywordGroup> {
    groups(&[
        ("Benchmark Report", &["benchmark"]),
        ("Survey Report", &["survey"]),
        ("Forecast Report", &["forecast", "outlook"]),
        ("Trends Report", &["state of", "trends"]),
        ("Market Research Report", &["market", "industry"]),
        ("Financial Report", &["financial", "earnings"]),
    ])
}

fn default_positive_words() -> Vec<String> {
    terms(&[
        "growth",
        "increase",
        "opportunity",
        "success",
        "strong",
        "positive",
        "improved",
        "expanding",
    ])
}

fn default_negative_words() -> Vec<String> {
    terms(&[
        "decline",
        "decrease",
        "challenge",
        "risk",
        "weak",
        "negative",
        "downturn",
        "struggling",
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_populated() {
        let vocab = Vocabulary::default();
        assert!(vocab.companies.iter().any(|c| c == "Supercell"));
        assert!(vocab.games.iter().any(|g| g == "Fortnite"));
        assert_eq!(vocab.regions[0].label, "Global");
        assert!(!vocab.positive_words.is_empty());
    }

    #[test]
    fn test_report_type_rules_ordered() {
        // Benchmark must outrank the catch-all market/industry rule.
        let vocab = Vocabulary::default();
        let benchmark = vocab
            .report_types
            .iter()
            .position(|g| g.label == "Benchmark Report")
            .unwrap();
        let market = vocab
            .report_types
            .iter()
            .position(|g| g.label == "Market Research Report")
            .unwrap();
        assert!(benchmark < market);
    }

    #[test]
    fn test_partial_override_keeps_builtins() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "companies = [\"Acme Games\"]").unwrap();

        let vocab = Vocabulary::load(file.path()).unwrap();
        assert_eq!(vocab.companies, vec!["Acme Games".to_string()]);
        // Tables not named in the file keep their defaults.
        assert!(vocab.games.iter().any(|g| g == "Minecraft"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Vocabulary::load(Path::new("/nonexistent/vocab.toml"));
        assert!(matches!(err, Err(VocabError::Read { .. })));
    }
}

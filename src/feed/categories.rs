// Interest category registry.
//
// Each category carries a curated keyword vocabulary (what the topic
// scorer matches against) and the feed URLs the fetch collaborator pulls
// for it. Keywords are matched as case-insensitive substrings, so they
// skew toward longer, distinctive forms; "ai" stays in because feed text
// leans on it constantly and a longer minimum would blind the scorer to
// the single most common technology term.

/// One declared interest category.
pub struct InterestCategory {
    pub name: &'static str,
    /// Curated scoring vocabulary, ~10 terms per category.
    pub keywords: &'static [&'static str],
    /// Feed URLs the fetch layer subscribes to for this category.
    pub feeds: &'static [&'static str],
}

pub const CATEGORIES: &[InterestCategory] = &[
    InterestCategory {
        name: "Technology",
        keywords: &[
            "ai", "software", "startup", "hardware", "robot", "cyber", "gadget", "silicon",
            "algorithm", "cloud",
        ],
        feeds: &[
            "https://feeds.feedburner.com/TechCrunch",
            "https://www.wired.com/feed/rss",
            "https://www.theverge.com/rss/index.xml",
        ],
    },
    InterestCategory {
        name: "Science",
        keywords: &[
            "research", "science", "physics", "biology", "chemistry", "quantum", "genome",
            "telescope", "laboratory", "experiment",
        ],
        feeds: &[
            "https://www.sciencedaily.com/rss/all.xml",
            "https://www.nature.com/nature.rss",
            "https://www.newscientist.com/feed/home/",
        ],
    },
    InterestCategory {
        name: "Business",
        keywords: &[
            "market", "economy", "investor", "revenue", "merger", "acquisition", "profit",
            "earnings", "finance", "trade",
        ],
        feeds: &[
            "https://www.forbes.com/real-time/feed2/",
            "https://www.ft.com/world?format=rss",
            "https://feeds.bloomberg.com/markets/news.rss",
        ],
    },
    InterestCategory {
        name: "Arts",
        keywords: &[
            "artist", "painting", "gallery", "sculpture", "museum", "exhibition", "artwork",
            "curator", "canvas", "portrait",
        ],
        feeds: &[
            "https://www.artnews.com/feed",
            "https://www.artforum.com/rss",
            "https://www.artsy.net/rss",
        ],
    },
    InterestCategory {
        name: "Health",
        keywords: &[
            "health", "medical", "disease", "vaccine", "therapy", "clinical", "wellness",
            "hospital", "diagnosis", "nutrition",
        ],
        feeds: &[
            "https://www.health.com/feed",
            "https://rss.medicalnewstoday.com/featurednews.xml",
            "https://www.webmd.com/rss/default.xml",
        ],
    },
    InterestCategory {
        name: "Sports",
        keywords: &[
            "football", "basketball", "soccer", "league", "championship", "tournament",
            "playoff", "athlete", "coach", "olympic",
        ],
        feeds: &[
            "https://www.espn.com/espn/rss/news",
            "https://rss.cbc.ca/lineup/sports.xml",
            "https://www.sports.yahoo.com/rss",
        ],
    },
    InterestCategory {
        name: "Politics",
        keywords: &[
            "election", "senate", "congress", "policy", "legislation", "campaign",
            "government", "parliament", "diplomat", "ballot",
        ],
        feeds: &[
            "https://rss.nytimes.com/services/xml/rss/nyt/Politics.xml",
            "https://feeds.washingtonpost.com/rss/politics",
            "https://www.politico.com/rss/politics.xml",
        ],
    },
    InterestCategory {
        name: "Education",
        keywords: &[
            "school", "university", "student", "teacher", "curriculum", "tuition", "college",
            "classroom", "scholarship", "literacy",
        ],
        feeds: &[
            "https://www.edweek.org/feed",
            "https://www.chronicle.com/rss",
            "https://www.insidehighered.com/feed",
        ],
    },
    InterestCategory {
        name: "Travel",
        keywords: &[
            "travel", "flight", "hotel", "destination", "tourism", "itinerary", "airline",
            "resort", "passport", "cruise",
        ],
        feeds: &[
            "https://www.lonelyplanet.com/blog/feed",
            "https://www.travelandleisure.com/feeds/all",
            "https://www.afar.com/rss",
        ],
    },
    InterestCategory {
        name: "Food",
        keywords: &[
            "recipe", "restaurant", "chef", "cuisine", "cooking", "baking", "ingredient",
            "flavor", "dining", "sourdough",
        ],
        feeds: &[
            "https://www.foodandwine.com/feed",
            "https://www.bonappetit.com/feed/rss",
            "https://www.seriouseats.com/feeds/all",
        ],
    },
    InterestCategory {
        name: "Music",
        keywords: &[
            "album", "concert", "song", "band", "musician", "playlist", "vinyl", "tour",
            "lyrics", "festival",
        ],
        feeds: &[
            "https://www.rollingstone.com/music/feed",
            "https://pitchfork.com/rss",
            "https://www.billboard.com/feed",
        ],
    },
    InterestCategory {
        name: "Movies",
        keywords: &[
            "film", "movie", "director", "trailer", "cinema", "screenplay", "actor",
            "premiere", "sequel", "studio",
        ],
        feeds: &[
            "https://www.variety.com/feed",
            "https://www.hollywoodreporter.com/feed",
            "https://deadline.com/feed",
        ],
    },
    InterestCategory {
        name: "Gaming",
        keywords: &[
            "gaming", "console", "playstation", "xbox", "nintendo", "esports", "gameplay",
            "multiplayer", "arcade", "speedrun",
        ],
        feeds: &[
            "https://www.ign.com/rss/articles",
            "https://www.gamespot.com/feeds/news",
            "https://www.polygon.com/rss/index.xml",
        ],
    },
    InterestCategory {
        name: "Fashion",
        keywords: &[
            "fashion", "designer", "runway", "couture", "streetwear", "wardrobe", "stylist",
            "apparel", "textile", "fabric",
        ],
        feeds: &[
            "https://www.vogue.com/feed",
            "https://www.elle.com/rss",
            "https://www.harpersbazaar.com/rss",
        ],
    },
    InterestCategory {
        name: "Environment",
        keywords: &[
            "climate", "carbon", "emission", "renewable", "wildlife", "conservation",
            "pollution", "ecosystem", "sustainability", "solar",
        ],
        feeds: &[
            "https://www.nationalgeographic.com/environment/feed",
            "https://www.ecowatch.com/feed",
            "https://www.treehugger.com/feeds/all.rss",
        ],
    },
];

/// Case-insensitive category lookup.
pub fn find(name: &str) -> Option<&'static InterestCategory> {
    CATEGORIES
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(name))
}

/// The scoring vocabulary for an interest; empty for unknown names rather
/// than an error — a stray interest must not fail a ranking pass.
pub fn keywords_for(name: &str) -> &'static [&'static str] {
    find(name).map(|c| c.keywords).unwrap_or(&[])
}

/// All feed URLs the fetch layer should pull for a set of interests.
pub fn feeds_for_interests(interests: &[String]) -> Vec<&'static str> {
    interests
        .iter()
        .filter_map(|name| find(name))
        .flat_map(|c| c.feeds.iter().copied())
        .collect()
}

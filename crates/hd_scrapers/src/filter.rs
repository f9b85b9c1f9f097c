//! Title heuristics that keep technology news and drop politics, jobs and drama.

use lazy_static::lazy_static;
use regex::RegexSet;
use hd_core::Story;

const TECH_KEYWORDS: &[&str] = &[
    "python", "javascript", "rust", "go", "golang", r"c\+\+",
    "linux", "unix", "mac", "windows", "api", "database",
    "sql", "nosql", "server", "cloud", "aws", "azure",
    "gcp", "docker", "kubernetes", "ai", "ml", "llm",
    "model", "neural", "algorithm", "code", "software",
    "developer", "devops", "git", "github", "gitlab",
    "web", "css", "html", "react", "vue", "angular",
    "node", "deno", "wasm", "compiler", "interpreter",
    "hacking", "security", "vulnerability", "exploit",
    "crypto", "blockchain", "bitcoin", "ethereum", "data",
    "analytics", "visualization", "performance", "optimization",
];

// "Who is hiring" threads and "Launch HN" posts are not news
const NON_TECH_KEYWORDS: &[&str] = &[
    "politics", "trump", "biden", "election", "voting",
    "government", "law", "crime", "murder", "kill",
    "war", "peace", "israel", "palestine", "russia",
    "ukraine", "china", "usa", "congress", "senate",
    "opinion", "editorial", "interview", "hiring", "job",
    "launch",
];

const CONTROVERSY_KEYWORDS: &[&str] = &[
    "raped?", "accused", "sexual", "assault", "scandal",
    "lawsuit", "sued", "court", "judge",
];

// Non-word guards instead of `\b` so that "c++" matches before a space
fn word_set<'a>(keywords: impl IntoIterator<Item = &'a &'a str>) -> RegexSet {
    RegexSet::new(keywords.into_iter().map(|kw| format!(r"(?:^|\W){}(?:\W|$)", kw)))
        .expect("keyword patterns are valid")
}

lazy_static! {
    static ref TECH: RegexSet = word_set(TECH_KEYWORDS);
    static ref REJECTED: RegexSet = word_set(NON_TECH_KEYWORDS.iter().chain(CONTROVERSY_KEYWORDS));
}

/// A title is tech when it names a tech keyword and no rejected keyword.
pub fn is_tech_title(title: &str) -> bool {
    let title = title.to_lowercase();
    if REJECTED.is_match(&title) {
        return false;
    }
    TECH.is_match(&title)
}

pub fn is_tech_story(story: &Story) -> bool {
    is_tech_title(&story.title)
}

/// Highest score first; equal scores keep their listing order.
pub fn rank_stories(mut stories: Vec<Story>) -> Vec<Story> {
    stories.sort_by(|a, b| b.score.cmp(&a.score));
    stories
}

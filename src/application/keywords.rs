//! Keyword matcher for internal-linking targets.

use serde::Serialize;

use crate::domain::Post;

/// A post mentioning at least one keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordMatch {
    pub title: String,
    pub slug: Option<String>,
    /// Hits per keyword, in the order the keywords were given.
    pub hits: Vec<(String, usize)>,
    pub total: usize,
}

fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Count case-insensitive whole-word occurrences of `needle` in `haystack`.
/// Needle and haystack are split into words the same way, so `drop-shot`
/// and `drop shot` both match either spelling.
#[must_use]
pub fn count_whole_words(haystack: &str, needle: &str) -> usize {
    let needle = words(needle);
    if needle.is_empty() {
        return 0;
    }
    words(haystack)
        .windows(needle.len())
        .filter(|w| *w == needle.as_slice())
        .count()
}

/// Posts whose title, excerpt or body mention any keyword, most hits first.
#[must_use]
pub fn find_matches(posts: &[Post], keywords: &[String]) -> Vec<KeywordMatch> {
    let mut matches: Vec<KeywordMatch> = posts
        .iter()
        .filter_map(|post| {
            let text = [
                post.title.as_str(),
                post.excerpt.as_deref().unwrap_or_default(),
                post.body_text.as_str(),
            ]
            .join("\n");
            let hits: Vec<(String, usize)> = keywords
                .iter()
                .map(|k| (k.clone(), count_whole_words(&text, k)))
                .collect();
            let total: usize = hits.iter().map(|(_, n)| n).sum();
            (total > 0).then(|| KeywordMatch {
                title: post.title.clone(),
                slug: post.slug.as_ref().map(|s| s.as_str().to_string()),
                hits,
                total,
            })
        })
        .collect();
    matches.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.title.cmp(&b.title)));
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DocumentId;

    fn post(title: &str, body: &str) -> Post {
        Post {
            id: DocumentId::new(title),
            title: title.into(),
            slug: None,
            excerpt: None,
            meta_title: None,
            meta_description: None,
            published_at: None,
            updated_at: None,
            main_image: None,
            author: None,
            categories: vec![],
            body_text: body.into(),
        }
    }

    #[test]
    fn whole_words_only() {
        assert_eq!(count_whole_words("Bass, bass! BASS and bassist", "bass"), 3);
        assert_eq!(count_whole_words("a drop shot rig; drop  shot again", "drop shot"), 2);
        assert_eq!(count_whole_words("anything", "  "), 0);
    }

    #[test]
    fn hyphenated_keywords_match() {
        let text = "Rig a drop-shot for finicky bass. The drop-shot works.";
        assert_eq!(count_whole_words(text, "drop-shot"), 2);
        assert_eq!(count_whole_words(text, "drop shot"), 2);
        assert_eq!(
            count_whole_words("Practice catch-and-release on every trip.", "catch-and-release"),
            1
        );
        assert_eq!(count_whole_words("fly-fishing", "fly-fish"), 0);
    }

    #[test]
    fn ranks_posts_by_total_hits() {
        let posts = [
            post("Walleye Jigging", "Jig slowly. Walleye love a jig."),
            post("Trout Basics", "Nothing relevant here."),
            post("Jig Colors", "Pick a jig color for walleye."),
        ];
        let keywords = vec!["jig".to_string(), "walleye".to_string()];
        let found = find_matches(&posts, &keywords);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].title, "Walleye Jigging");
        assert_eq!(found[0].total, 4);
        assert_eq!(found[1].title, "Jig Colors");
        assert_eq!(found[1].hits, vec![("jig".to_string(), 2), ("walleye".to_string(), 1)]);
    }
}

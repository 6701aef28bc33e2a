use std::sync::LazyLock;

use regex::Regex;

// Script and style bodies are code, not text, so they go along with their tags.
static EMBEDDED_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>")
        .expect("embedded code pattern")
});

static COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("comment pattern"));

// A tag must open with a letter, `/` or `!`, so "1 < 2" is left alone.
static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?[A-Za-z!][^<>]*>").expect("tag pattern"));

/// Strip markup from client-supplied text and trim the result.
///
/// Never fails: input that is not well-formed markup comes back with whatever
/// could be recognised removed.
pub fn sanitize(raw: &str) -> String {
    let without_code = EMBEDDED_CODE.replace_all(raw, "");
    let mut text = COMMENT.replace_all(&without_code, "").into_owned();

    // Removing one tag can splice the surrounding text into a new one
    // ("<<b>i>"), so repeat until nothing matches. Each pass shrinks the string.
    while TAG.is_match(&text) {
        text = TAG.replace_all(&text, "").into_owned();
    }

    text.trim().to_string()
}

//! Text cleanup applied to every field coming back from the enrichment
//! service before it is allowed anywhere near the persistence sink.

/// Placeholder used when the service returned no translation at all.
/// A card must never show an empty back.
pub const NOT_FOUND: &str = "not found";

/// Strip markup tags, trailing `Audio: ...` label fragments and bare URLs,
/// then collapse whitespace runs and trim.
pub fn clean_field(raw: &str) -> String {
    let no_tags = strip_tags(raw);
    let no_audio = strip_audio_label(&no_tags);
    let no_urls = strip_urls(&no_audio);
    collapse_whitespace(&no_urls)
}

/// Compose the card back: translation line, blank line, parenthesized
/// definition when one survives cleanup.
pub fn compose_back(translation: Option<&str>, definition: Option<&str>) -> String {
    let translation = translation.map(clean_field).unwrap_or_default();
    let translation = if translation.is_empty() {
        NOT_FOUND.to_string()
    } else {
        translation
    };

    match definition.map(clean_field).filter(|d| !d.is_empty()) {
        Some(definition) => format!("{translation}\n\n({definition})"),
        None => translation,
    }
}

/// Remove `<...>` tag sequences. An unterminated `<` is dropped to the
/// end of the string rather than kept as stray markup.
fn strip_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;

    for c in text.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }

    out
}

/// Drop everything from a trailing `Audio:` label onward.
fn strip_audio_label(text: &str) -> String {
    const LABEL: &str = "audio:";
    let mut cut = None;
    for (i, _) in text.char_indices() {
        if let Some(head) = text.get(i..i + LABEL.len())
            && head.eq_ignore_ascii_case(LABEL)
        {
            cut = Some(i);
        }
    }
    match cut {
        Some(pos) => text[..pos].to_string(),
        None => text.to_string(),
    }
}

/// Remove whitespace-delimited tokens that are bare links.
fn strip_urls(text: &str) -> String {
    text.split_whitespace()
        .filter(|token| {
            let t = token.trim_matches(|c: char| c.is_ascii_punctuation() && c != '/');
            !(t.starts_with("http://") || t.starts_with("https://") || t.starts_with("www."))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

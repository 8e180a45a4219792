//! Inflection helpers shared by admiral crates
//!
//! Labels are derived from identifiers the way the host framework derives them:
//! `blog_post` and `BlogPost` both humanize to `Blog post`.

/// Split a camel-cased or snake-cased identifier into lowercase words
fn words(identifier: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let chars: Vec<char> = identifier.chars().collect();

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c == ' ' || c == '-' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if c.is_uppercase() && !current.is_empty() {
            let prev_lower = chars[i - 1].is_lowercase() || chars[i - 1].is_ascii_digit();
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let prev_upper = chars[i - 1].is_uppercase();
            if prev_lower || (prev_upper && next_lower) {
                words.push(std::mem::take(&mut current));
            }
        }
        current.extend(c.to_lowercase());
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Last `::`-separated segment of a model name
pub fn demodulize(name: &str) -> &str {
    name.rsplit("::").next().unwrap_or(name)
}

/// `created_at` -> `Created at`, `BlogPost` -> `Blog post`
///
/// A trailing `_id` is dropped, as for foreign keys.
pub fn humanize(identifier: &str) -> String {
    let trimmed = identifier.strip_suffix("_id").unwrap_or(identifier);
    let joined = words(trimmed).join(" ");
    capitalize(&joined)
}

/// `dummy_app` -> `Dummy App`
pub fn titleize(identifier: &str) -> String {
    words(identifier)
        .iter()
        .map(|w| capitalize(w))
        .collect::<Vec<_>>()
        .join(" ")
}

/// `blog_post` -> `BlogPost`
pub fn camelize(identifier: &str) -> String {
    words(identifier).iter().map(|w| capitalize(w)).collect()
}

/// Turn a path relative to a model root into a model name
///
/// `module/class.rb` -> `Module::Class`
pub fn camelize_path(relative: &str) -> String {
    let without_ext = match relative.rfind('.') {
        Some(idx) if !relative[idx..].contains('/') => &relative[..idx],
        _ => relative,
    };
    without_ext
        .split(['/', '\\'])
        .filter(|segment| !segment.is_empty())
        .map(camelize)
        .collect::<Vec<_>>()
        .join("::")
}

/// Naive English pluralization used for default plural labels
pub fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }
    let lower = word.to_lowercase();
    if lower.ends_with('s')
        || lower.ends_with('x')
        || lower.ends_with('z')
        || lower.ends_with("ch")
        || lower.ends_with("sh")
    {
        format!("{}es", word)
    } else if lower.ends_with('y')
        && !matches!(
            lower.chars().rev().nth(1),
            Some('a' | 'e' | 'i' | 'o' | 'u')
        )
    {
        format!("{}ies", &word[..word.len() - 1])
    } else {
        format!("{}s", word)
    }
}

/// Runtime type name of a Rust type, without its module path
///
/// `my_app::models::Team` -> `Team`
pub fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

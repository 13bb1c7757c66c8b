//! Property naming policies.

use std::borrow::Cow;

/// Policy that converts Rust field names into JSON property names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamingPolicy {
    /// `user_name` → `userName`, `HTTPServer` → `httpServer`.
    CamelCase,
}

impl NamingPolicy {
    /// Converts a field name into its JSON property name.
    ///
    /// # Example
    ///
    /// ```rust
    /// use heron_json::NamingPolicy;
    ///
    /// assert_eq!(NamingPolicy::CamelCase.convert("user_name"), "userName");
    /// assert_eq!(NamingPolicy::CamelCase.convert("userName"), "userName");
    /// assert_eq!(NamingPolicy::CamelCase.convert("URL"), "url");
    /// ```
    #[must_use]
    pub fn convert<'a>(&self, name: &'a str) -> Cow<'a, str> {
        match self {
            Self::CamelCase => to_camel_case(name),
        }
    }

    /// Maps a converted property name back to a snake_case field name.
    ///
    /// Used where serde matches keys itself and the field list is unknown.
    pub(crate) fn restore<'a>(&self, name: &'a str) -> Cow<'a, str> {
        match self {
            Self::CamelCase => to_snake_case(name),
        }
    }
}

fn to_snake_case(name: &str) -> Cow<'_, str> {
    if !name.chars().any(char::is_uppercase) {
        return Cow::Borrowed(name);
    }

    let mut result = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.extend(c.to_lowercase());
        } else {
            result.push(c);
        }
    }

    Cow::Owned(result)
}

fn to_camel_case(name: &str) -> Cow<'_, str> {
    if !name.contains('_') {
        return lower_leading(name);
    }

    let mut segments = name.split('_').filter(|s| !s.is_empty());
    let Some(first) = segments.next() else {
        return Cow::Borrowed(name);
    };

    let mut result = lower_leading(first).into_owned();
    for segment in segments {
        let mut chars = segment.chars();
        if let Some(c) = chars.next() {
            result.extend(c.to_uppercase());
            result.push_str(chars.as_str());
        }
    }

    Cow::Owned(result)
}

// Lowercases the leading uppercase run, keeping the last capital of an
// acronym that starts the next word (HTTPServer -> httpServer).
fn lower_leading(name: &str) -> Cow<'_, str> {
    let chars: Vec<char> = name.chars().collect();
    if chars.first().map_or(true, |c| !c.is_uppercase()) {
        return Cow::Borrowed(name);
    }

    if chars.iter().all(|c| c.is_uppercase() || !c.is_alphabetic()) {
        return Cow::Owned(name.to_lowercase());
    }

    let mut lowercase_until = 1;
    for i in 1..chars.len() {
        if !chars[i].is_uppercase() {
            break;
        }
        if i + 1 < chars.len() && chars[i + 1].is_lowercase() {
            break;
        }
        lowercase_until = i + 1;
    }

    let mut result = String::with_capacity(name.len());
    for (i, c) in chars.iter().enumerate() {
        if i < lowercase_until {
            result.extend(c.to_lowercase());
        } else {
            result.push(*c);
        }
    }

    Cow::Owned(result)
}

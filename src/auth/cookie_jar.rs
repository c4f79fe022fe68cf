/// Ordered list of `name=value` cookie pairs for one origin.
///
/// Uniqueness is by name. Merging a `Set-Cookie` update removes the old
/// pair and appends the new one at the end, so an updated cookie is
/// relocated rather than rewritten in place; the joined header therefore
/// changes order after an update. That relocation is deliberate and is
/// covered by tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieJar {
    entries: Vec<String>,
}

impl CookieJar {
    /// Parse a caller-supplied `Cookie` header into a jar.
    pub fn parse(header: &str) -> Self {
        let entries = header
            .split(';')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_owned)
            .collect();
        Self { entries }
    }

    /// Fold observed `Set-Cookie` header values into the jar.
    ///
    /// Only the `name=value` part before the first `;` is retained;
    /// attributes such as `Path` or `HttpOnly` are dropped.
    pub fn merge(&mut self, set_cookies: &[String]) {
        for raw in set_cookies {
            let pair = raw.split(';').next().unwrap_or("").trim();
            if pair.is_empty() {
                continue;
            }
            let name = cookie_name(pair);
            self.entries.retain(|entry| cookie_name(entry) != name);
            self.entries.push(pair.to_owned());
        }
    }

    /// Whether any of the `Set-Cookie` values names a session cookie.
    ///
    /// A match means the server has started or rotated server-side session
    /// state and the first token response is not trustworthy.
    pub fn names_session(set_cookies: &[String]) -> bool {
        set_cookies.iter().any(|raw| {
            let pair = raw.split(';').next().unwrap_or("");
            cookie_name(pair).to_ascii_lowercase().contains("session")
        })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Joined `Cookie` header value; empty string for an empty jar.
    pub fn header_value(&self) -> String {
        self.entries.join("; ")
    }

    /// Joined `Cookie` header value, or `None` for an empty jar.
    pub fn header(&self) -> Option<String> {
        if self.entries.is_empty() {
            None
        } else {
            Some(self.header_value())
        }
    }
}

fn cookie_name(pair: &str) -> &str {
    pair.split('=').next().unwrap_or(pair)
}

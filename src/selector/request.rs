//! Query-string view of the page request
//!
//! Only `card` and `new` are interpreted. Every other parameter is carried
//! through untouched and in order, so shared links keep whatever else the
//! page was loaded with.

use std::fmt;

pub const CARD_PARAM: &str = "card";
pub const NEW_PARAM: &str = "new";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardRequest {
    params: Vec<(String, String)>,
}

impl CardRequest {
    /// Parse `?a=1&b=2` (leading `?` optional)
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let params = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| match pair.split_once('=') {
                Some((name, value)) => (name.to_string(), value.to_string()),
                None => (pair.to_string(), String::new()),
            })
            .collect();
        Self { params }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Replace the first occurrence (dropping any repeats) or append
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.params.iter().position(|(n, _)| n == name) {
            Some(first) => {
                self.params[first].1 = value;
                let mut i = 0;
                self.params.retain(|(n, _)| {
                    let keep = n != name || i == first;
                    i += 1;
                    keep
                });
            }
            None => self.params.push((name.to_string(), value)),
        }
    }

    pub fn remove(&mut self, name: &str) {
        self.params.retain(|(n, _)| n != name);
    }

    /// Requested card, if it is an integer in `0..count`
    pub fn card_index(&self, count: usize) -> Option<usize> {
        self.get(CARD_PARAM)?
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|&index| index < count)
    }

    /// `new=1` asks for a freshly pinned card
    pub fn force_new(&self) -> bool {
        matches!(self.get(NEW_PARAM), Some("1") | Some("true"))
    }

    /// Point the request at `index` and consume any reset signal
    pub fn pin(&mut self, index: usize) {
        self.set(CARD_PARAM, index.to_string());
        self.remove(NEW_PARAM);
    }

    /// `?a=1&b=2`, or an empty string when there are no parameters
    pub fn to_query(&self) -> String {
        if self.params.is_empty() {
            return String::new();
        }
        let pairs: Vec<String> = self
            .params
            .iter()
            .map(|(n, v)| format!("{}={}", n, v))
            .collect();
        format!("?{}", pairs.join("&"))
    }

    /// Full URL for `base` (origin + path, no query) with this request attached
    pub fn url_for(&self, base: &str) -> String {
        format!("{}{}", base, self.to_query())
    }
}

impl fmt::Display for CardRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query())
    }
}

use url::form_urlencoded;

const PLAYERS_PATH: &str = "/players";
const LEGACY_ATHLETES_PATH: &str = "/athletes";
const MAX_HISTORY: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    /// Listing; `query` is the serialized filter state without the leading `?`.
    Players { query: String },
    /// Detail; `identifier` is a nickname or a UUID.
    Player { identifier: String },
}

impl Route {
    pub fn players(query: impl Into<String>) -> Self {
        Route::Players {
            query: query.into(),
        }
    }

    pub fn player(identifier: impl Into<String>) -> Self {
        Route::Player {
            identifier: identifier.into(),
        }
    }

    pub fn href(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Players { query } if query.is_empty() => PLAYERS_PATH.to_string(),
            Route::Players { query } => format!("{PLAYERS_PATH}?{query}"),
            Route::Player { identifier } => {
                let segment: String = form_urlencoded::byte_serialize(identifier.as_bytes())
                    .collect::<String>()
                    .replace('+', "%20");
                format!("{PLAYERS_PATH}/{segment}")
            }
        }
    }

    /// `/`, `/players[?q]`, `/players/{id}` and `/athletes/{id}`; anything else is `None`.
    pub fn parse(href: &str) -> Option<Route> {
        let href = href.trim();
        let (path, query) = match href.split_once('?') {
            Some((path, query)) => (path, query),
            None => (href, ""),
        };
        let path = path.trim_end_matches('/');

        if path.is_empty() {
            return Some(Route::Home);
        }
        if path == PLAYERS_PATH {
            return Some(Route::players(query));
        }

        for prefix in [PLAYERS_PATH, LEGACY_ATHLETES_PATH] {
            let Some(rest) = path.strip_prefix(prefix) else {
                continue;
            };
            let Some(segment) = rest.strip_prefix('/') else {
                continue;
            };
            if segment.is_empty() || segment.contains('/') {
                return None;
            }
            return Some(Route::player(decode_segment(segment)));
        }
        None
    }
}

fn decode_segment(segment: &str) -> String {
    // Keep literal '+' in path segments; form decoding would turn it into a space.
    let escaped = segment.replace('+', "%2B");
    form_urlencoded::parse(format!("v={escaped}").as_bytes())
        .next()
        .map(|(_, value)| value.into_owned())
        .unwrap_or_else(|| segment.to_string())
}

/// The current route plus back history. The only writer is the UI thread and
/// every navigation replaces the route wholesale.
#[derive(Debug, Clone)]
pub struct Location {
    current: Route,
    history: Vec<Route>,
}

impl Location {
    pub fn new(start: Route) -> Self {
        Self {
            current: start,
            history: Vec::new(),
        }
    }

    pub fn current(&self) -> &Route {
        &self.current
    }

    pub fn href(&self) -> String {
        self.current.href()
    }

    pub fn navigate(&mut self, route: Route) {
        let previous = std::mem::replace(&mut self.current, route);
        self.history.push(previous);
        if self.history.len() > MAX_HISTORY {
            self.history.remove(0);
        }
    }

    /// Swap the current route without recording history (page/filter edits on
    /// the listing replace its query in place).
    pub fn replace(&mut self, route: Route) {
        self.current = route;
    }

    pub fn back(&mut self) -> Option<&Route> {
        let previous = self.history.pop()?;
        self.current = previous;
        Some(&self.current)
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::new(Route::Home)
    }
}

#[cfg(test)]
mod tests {
    use super::{Location, Route};

    #[test]
    fn parses_known_routes() {
        assert_eq!(Route::parse("/"), Some(Route::Home));
        assert_eq!(Route::parse(""), Some(Route::Home));
        assert_eq!(Route::parse("/players"), Some(Route::players("")));
        assert_eq!(
            Route::parse("/players?primaryPosition=FORWARD&page=2"),
            Some(Route::players("primaryPosition=FORWARD&page=2"))
        );
        assert_eq!(Route::parse("/players/rafa10"), Some(Route::player("rafa10")));
        assert_eq!(Route::parse("/athletes/rafa10"), Some(Route::player("rafa10")));
        assert_eq!(Route::parse("/players/jo%C3%A3o"), Some(Route::player("joão")));
        assert_eq!(Route::parse("/players/a+b"), Some(Route::player("a+b")));
        assert_eq!(Route::parse("/teams"), None);
        assert_eq!(Route::parse("/players/a/b"), None);
    }

    #[test]
    fn href_round_trips_through_parse() {
        for route in [
            Route::Home,
            Route::players(""),
            Route::players("nickname=rafa&page=3"),
            Route::player("joão silva"),
            Route::player("a+b"),
        ] {
            assert_eq!(Route::parse(&route.href()), Some(route.clone()));
        }
    }

    #[test]
    fn navigate_records_history_and_back_restores() {
        let mut location = Location::new(Route::Home);
        location.navigate(Route::players(""));
        location.replace(Route::players("page=2"));
        location.navigate(Route::player("rafa"));

        assert_eq!(location.back(), Some(&Route::players("page=2")));
        assert_eq!(location.back(), Some(&Route::Home));
        assert_eq!(location.back(), None);
        assert_eq!(location.current(), &Route::Home);
    }
}

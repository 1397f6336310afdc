#[derive(Debug, Clone, Copy)]
pub struct KeywordRoute<T: 'static> {
    pub keywords: &'static [&'static str],
    pub target: T,
}

/// Ordered keyword routing table. The first route with a keyword contained in
/// the lower-cased query wins; declaration order matters, match length does not.
#[derive(Debug, Clone, Copy)]
pub struct KeywordTable<T: 'static> {
    routes: &'static [KeywordRoute<T>],
}

impl<T: Copy> KeywordTable<T> {
    pub const fn new(routes: &'static [KeywordRoute<T>]) -> Self {
        Self { routes }
    }

    pub fn route(&self, query: &str) -> Option<T> {
        let lower = query.to_lowercase();
        self.routes
            .iter()
            .find(|route| {
                route
                    .keywords
                    .iter()
                    .any(|keyword| !keyword.is_empty() && lower.contains(keyword))
            })
            .map(|route| route.target)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{KeywordRoute, KeywordTable};

    static TABLE: KeywordTable<u8> = KeywordTable::new(&[
        KeywordRoute {
            keywords: &["why"],
            target: 1,
        },
        KeywordRoute {
            keywords: &["bangalore", "hub"],
            target: 2,
        },
    ]);

    #[test]
    fn first_declared_route_wins() {
        assert_eq!(TABLE.route("why does bangalore fail"), Some(1));
        assert_eq!(TABLE.route("Bangalore HUB status"), Some(2));
    }

    #[test]
    fn no_match_routes_nowhere() {
        assert_eq!(TABLE.route(""), None);
        assert_eq!(TABLE.route("xyzzy"), None);
        assert_eq!(TABLE.len(), 2);
    }
}

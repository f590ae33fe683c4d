//! Command routing for imp applications.
//!
//! A [`Router`] maps literal, space-joined command paths (`"find"`,
//! `"find all"`) to a command handle and an optional fixed action. Given an
//! argument vector it strips the longest registered path off the front, works
//! out the action, and hands back whatever is left for option parsing.
//!
//! ```
//! use imp_router::Router;
//!
//! let mut router = Router::new();
//! router.register("find", "Find");
//! router.register_with_action("find all", "Find", "everything");
//!
//! let m = router.recognize(["find", "all", "files"]).unwrap();
//! assert_eq!(m.command, "Find");
//! assert_eq!(m.action, "everything");
//! assert_eq!(m.args, ["files"]);
//! ```

pub mod testing;

use imp_options::is_switch;
use indexmap::IndexMap;
use std::collections::VecDeque;

/// Action used when a route has no fixed action and none can be inferred.
pub const DEFAULT_ACTION: &str = "default";

/// A registered route target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route<C> {
    pub command: C,
    pub action: Option<String>,
}

/// Outcome of a successful [`Router::recognize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedRoute<C> {
    pub command: C,
    pub action: String,
    /// Tokens left after the command path and any consumed action token, in
    /// their original order.
    pub args: Vec<String>,
}

/// Registry of command paths.
///
/// Paths are matched verbatim and case-sensitively. The router holds no
/// lock; share it behind one if several threads need it.
#[derive(Debug, Clone)]
pub struct Router<C> {
    routes: IndexMap<String, Route<C>>,
}

impl<C> Default for Router<C> {
    fn default() -> Self {
        Self {
            routes: IndexMap::new(),
        }
    }
}

impl<C: Clone> Router<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `path` with no fixed action, replacing any existing entry.
    pub fn register(&mut self, path: impl Into<String>, command: C) {
        self.insert(path.into(), command, None);
    }

    /// Register `path` with a fixed action, replacing any existing entry.
    pub fn register_with_action(
        &mut self,
        path: impl Into<String>,
        command: C,
        action: impl Into<String>,
    ) {
        self.insert(path.into(), command, Some(action.into()));
    }

    fn insert(&mut self, path: String, command: C, action: Option<String>) {
        tracing::debug!(path = %path, action = ?action, "registering route");
        self.routes.insert(path, Route { command, action });
    }

    /// Remove the route at `path`. Removing an unknown path does nothing.
    pub fn remove(&mut self, path: &str) -> Option<Route<C>> {
        let removed = self.routes.shift_remove(path);
        if removed.is_some() {
            tracing::debug!(path, "removed route");
        }
        removed
    }

    /// Remove every route.
    pub fn reset(&mut self) {
        self.routes.clear();
    }

    /// A copy of the registry.
    pub fn routes(&self) -> IndexMap<String, Route<C>> {
        self.routes.clone()
    }

    pub fn get(&self, path: &str) -> Option<&Route<C>> {
        self.routes.get(path)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Match `args` against the registered paths.
    ///
    /// The leading non-switch tokens form the candidate path. The longest
    /// registered prefix of that path wins; segments dropped from the end are
    /// returned to `args`. A route without a fixed action takes the next
    /// token as its action when [`is_legal_action`] accepts it, otherwise
    /// [`DEFAULT_ACTION`].
    pub fn recognize<I, S>(&self, args: I) -> Option<MatchedRoute<C>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args: VecDeque<String> = args.into_iter().map(Into::into).collect();

        let mut segments = Vec::new();
        while let Some(arg) = args.pop_front() {
            if is_switch(&arg) {
                args.push_front(arg);
                break;
            }
            segments.push(arg);
        }

        let (path, route) = loop {
            if segments.is_empty() {
                tracing::debug!("no route matched");
                return None;
            }
            let path = segments.join(" ");
            if let Some(route) = self.routes.get(&path) {
                break (path, route);
            }
            tracing::trace!(path = %path, "no route for prefix");
            if let Some(last) = segments.pop() {
                args.push_front(last);
            }
        };

        let action = match &route.action {
            Some(action) => action.clone(),
            None if args.front().is_some_and(|a| is_legal_action(a)) => args
                .pop_front()
                .map_or_else(|| DEFAULT_ACTION.to_string(), |a| action_name(&a)),
            None => DEFAULT_ACTION.to_string(),
        };

        tracing::debug!(path = %path, action = %action, "matched route");

        Some(MatchedRoute {
            command: route.command.clone(),
            action,
            args: args.into(),
        })
    }
}

/// Whether `candidate` can be taken as an action name: non-empty, not a
/// switch, and made only of lowercase ASCII letters and `-`.
pub fn is_legal_action(candidate: &str) -> bool {
    !candidate.is_empty()
        && !is_switch(candidate)
        && candidate.bytes().all(|b| b.is_ascii_lowercase() || b == b'-')
}

/// Canonical action identifier for a command-line token (`find-all` => `find_all`).
pub fn action_name(token: &str) -> String {
    token.replace('-', "_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{assert_no_route, assert_routes_to};

    const EXTRA: [&str; 7] = ["first", "second", "third", "-a", "--b", "penultimate", "final"];

    fn with_extra(args: &[&str]) -> Vec<String> {
        args.iter().chain(EXTRA.iter()).map(|s| s.to_string()).collect()
    }

    /// Route segments are stripped and the remaining tokens survive intact.
    fn check_extra_arguments(router: &Router<&'static str>, args: &[&str]) {
        let m = router.recognize(args.iter().copied()).unwrap();
        assert!(m.args.is_empty(), "leftover args: {:?}", m.args);

        let m = router.recognize(with_extra(args)).unwrap();
        assert_eq!(m.args[0..3], ["first", "second", "third"]);
        assert_eq!(m.args[3..5], ["-a", "--b"]);
        assert_eq!(m.args[5..7], ["penultimate", "final"]);
    }

    // registry

    #[test]
    fn register_adds_route_without_action() {
        let mut router = Router::new();
        router.register("hello", "Class");
        let routes = router.routes();
        assert!(routes.contains_key("hello"));
        assert_eq!(routes["hello"].action, None);
    }

    #[test]
    fn register_with_custom_action() {
        let mut router = Router::new();
        router.register_with_action("hello", "Class", "world");
        assert_eq!(router.routes()["hello"].action.as_deref(), Some("world"));
    }

    #[test]
    fn remove_route() {
        let mut router = Router::new();
        router.register("hello", "Class");
        assert!(router.remove("hello").is_some());
        assert!(!router.routes().contains_key("hello"));
        assert!(router.remove("hello").is_none());
    }

    #[test]
    fn reset_clears_everything() {
        let mut router: Router<&str> = Router::new();
        router.reset();
        assert!(router.routes().is_empty());

        router.register("hello", "Class");
        router.reset();
        assert!(router.routes().is_empty());
        assert!(router.is_empty());
    }

    #[test]
    fn routes_is_a_snapshot() {
        let mut router = Router::new();
        router.register("hello", "Class");
        let mut snapshot = router.routes();
        snapshot.clear();
        assert_eq!(router.len(), 1);
    }

    // recognition: {"find" => Find}

    fn find_router() -> Router<&'static str> {
        let mut router = Router::new();
        router.register("find", "Find");
        router
    }

    #[test]
    fn find_routes() {
        let router = find_router();
        assert_routes_to(&router.recognize(["find"]), "Find", "default");
        assert_routes_to(&router.recognize(["find", "all"]), "Find", "all");
        assert_routes_to(&router.recognize(["find", "all", "files"]), "Find", "all");
        assert_routes_to(&router.recognize(["find", "All"]), "Find", "default");
        assert_routes_to(&router.recognize(["find", "-a", "all"]), "Find", "default");

        let m = router.recognize(["find", "-a"]).unwrap();
        assert_eq!(m.action, DEFAULT_ACTION);
        assert_eq!(m.args, ["-a"]);
    }

    #[test]
    fn find_non_matches() {
        let router = find_router();
        assert_no_route(&router.recognize(["nothing"]));
        assert_no_route(&router.recognize(["Find", "all"]));
        assert_no_route(&router.recognize(Vec::<String>::new()));
        assert_no_route(&router.recognize(["-a", "find"]));
    }

    #[test]
    fn find_extra_arguments() {
        check_extra_arguments(&find_router(), &["find", "all"]);
    }

    // recognition: {"find all" => Find#everything}

    fn find_all_everything_router() -> Router<&'static str> {
        let mut router = Router::new();
        router.register_with_action("find all", "Find", "everything");
        router
    }

    #[test]
    fn find_all_everything_routes() {
        let router = find_all_everything_router();
        assert_routes_to(&router.recognize(["find", "all"]), "Find", "everything");
        assert_routes_to(
            &router.recognize(["find", "all", "files"]),
            "Find",
            "everything",
        );

        assert_no_route(&router.recognize(["find"]));
        assert_no_route(&router.recognize(["Find", "all"]));
        assert_no_route(&router.recognize(["find", "All"]));
        assert_no_route(&router.recognize(["nothing"]));
        assert_no_route(&router.recognize(["find", "-a", "all"]));
    }

    #[test]
    fn find_all_everything_extra_arguments() {
        check_extra_arguments(&find_all_everything_router(), &["find", "all"]);
    }

    // recognition: {"find all" => FindAll}

    fn find_all_router() -> Router<&'static str> {
        let mut router = Router::new();
        router.register("find all", "FindAll");
        router
    }

    #[test]
    fn find_all_routes() {
        let router = find_all_router();
        assert_routes_to(&router.recognize(["find", "all"]), "FindAll", "default");
        assert_routes_to(&router.recognize(["find", "all", "files"]), "FindAll", "files");

        assert_no_route(&router.recognize(["find"]));
        assert_no_route(&router.recognize(["Find", "all"]));
        assert_no_route(&router.recognize(["find", "All"]));
        assert_no_route(&router.recognize(["nothing"]));
        assert_no_route(&router.recognize(["find", "-a", "all"]));
    }

    #[test]
    fn find_all_extra_arguments() {
        check_extra_arguments(&find_all_router(), &["find", "all", "files"]);
    }

    // recognition: {"find-all" => Find#everything}

    fn hyphenated_router() -> Router<&'static str> {
        let mut router = Router::new();
        router.register_with_action("find-all", "Find", "everything");
        router
    }

    #[test]
    fn hyphenated_routes() {
        let router = hyphenated_router();
        assert_routes_to(&router.recognize(["find-all"]), "Find", "everything");
        assert_routes_to(&router.recognize(["find-all", "files"]), "Find", "everything");

        assert_no_route(&router.recognize(["find"]));
        assert_no_route(&router.recognize(["find", "all"]));
        assert_no_route(&router.recognize(["Find-all"]));
        assert_no_route(&router.recognize(["find-All"]));
        assert_no_route(&router.recognize(["nothing"]));
        assert_no_route(&router.recognize(["find", "-", "all"]));
    }

    #[test]
    fn hyphenated_extra_arguments() {
        check_extra_arguments(&hyphenated_router(), &["find-all"]);
    }

    // longest prefix

    #[test]
    fn longest_registered_prefix_wins() {
        let mut router = Router::new();
        router.register("find", "Find");
        router.register_with_action("find all", "Find", "everything");

        let m = router.recognize(["find", "all", "files"]).unwrap();
        assert_eq!(m.action, "everything");
        assert_eq!(m.args, ["files"]);

        let m = router.recognize(["find", "some", "files"]).unwrap();
        assert_eq!(m.action, "some");
        assert_eq!(m.args, ["files"]);
    }

    #[test]
    fn hyphenated_action_is_folded() {
        let m = find_router().recognize(["find", "by-name", "x"]).unwrap();
        assert_eq!(m.action, "by_name");
        assert_eq!(m.args, ["x"]);
    }

    #[test]
    fn legal_actions() {
        assert!(is_legal_action("all"));
        assert!(is_legal_action("by-name"));
        assert!(!is_legal_action(""));
        assert!(!is_legal_action("-a"));
        assert!(!is_legal_action("All"));
        assert!(!is_legal_action("v2"));
    }
}

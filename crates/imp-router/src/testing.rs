//! Assertions for routing tests.
//!
//! [`route_to`] builds a matcher that can be checked against the output of
//! [`Router::recognize`](crate::Router::recognize) and reports a readable
//! failure message either way.

use std::fmt;

use crate::MatchedRoute;

/// Expected command handle and action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTo<C> {
    command: C,
    action: String,
}

/// Matcher for a recognition result routed to `command#action`.
pub fn route_to<C>(command: C, action: impl Into<String>) -> RouteTo<C> {
    RouteTo {
        command,
        action: action.into(),
    }
}

impl<C: PartialEq + fmt::Display> RouteTo<C> {
    pub fn matches(&self, actual: &Option<MatchedRoute<C>>) -> bool {
        actual
            .as_ref()
            .is_some_and(|m| m.command == self.command && m.action == self.action)
    }

    pub fn failure_message(&self, actual: &Option<MatchedRoute<C>>) -> String {
        format!("expected route to {}, but was {}", self, describe(actual))
    }

    pub fn negated_failure_message(&self) -> String {
        format!("expected not to be a route to {self}, but it was")
    }
}

impl<C: fmt::Display> fmt::Display for RouteTo<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.command, self.action)
    }
}

fn describe<C: fmt::Display>(actual: &Option<MatchedRoute<C>>) -> String {
    match actual {
        Some(m) => format!("{}#{}", m.command, m.action),
        None => "nothing (no matching route found)".to_string(),
    }
}

/// Panics unless `actual` routed to `command#action`.
#[track_caller]
pub fn assert_routes_to<C: PartialEq + fmt::Display>(
    actual: &Option<MatchedRoute<C>>,
    command: C,
    action: &str,
) {
    let expected = route_to(command, action);
    assert!(expected.matches(actual), "{}", expected.failure_message(actual));
}

/// Panics if `actual` holds a match.
#[track_caller]
pub fn assert_no_route<C: fmt::Display>(actual: &Option<MatchedRoute<C>>) {
    assert!(actual.is_none(), "expected no route, but was {}", describe(actual));
}

//! Route authorization decision table.
//!
//! DESIGN
//! ======
//! Rules are data: an ordered list of condition sets paired with an action.
//! The first rule whose conditions all hold decides; falling through means
//! the page may render. New protected areas are added with `RuleSet::push`
//! instead of another branch in the gate.
//!
//! The evaluation is pure. It must only be called once every input has
//! settled; the gate owns that check.

#[cfg(test)]
#[path = "decision_test.rs"]
mod decision_test;

use crate::config::GateConfig;
use crate::route::{Area, Location, login_redirect};
use crate::session::Role;

/// Settled inputs to one evaluation.
#[derive(Clone, Copy, Debug)]
pub struct DecisionInput<'a> {
    pub signed_in: bool,
    pub role: Role,
    pub location: &'a Location,
}

/// Outcome of evaluating the rule set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    Authorized,
    Redirect(String),
}

impl Decision {
    #[must_use]
    pub fn is_authorized(&self) -> bool {
        matches!(self, Self::Authorized)
    }

    #[must_use]
    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            Self::Authorized => None,
            Self::Redirect(target) => Some(target),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Condition {
    SignedOut,
    SignedIn,
    InArea(Area),
    RoleIs(Role),
    RoleIsNot(Role),
}

impl Condition {
    fn holds(self, input: &DecisionInput<'_>, config: &GateConfig) -> bool {
        match self {
            Self::SignedOut => !input.signed_in,
            Self::SignedIn => input.signed_in,
            Self::InArea(area) => area.contains(config, &input.location.path),
            Self::RoleIs(role) => input.role == role,
            Self::RoleIsNot(role) => input.role != role,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Send to the login page carrying the current path as `redirect`.
    LoginWithReturn,
    /// Honor a local `redirect` query value, else the role's home.
    PostLogin,
    AccountHome,
    AdminHome,
}

impl Action {
    fn target(self, input: &DecisionInput<'_>, config: &GateConfig) -> String {
        match self {
            Self::LoginWithReturn => login_redirect(config, &input.location.path),
            Self::PostLogin => input
                .location
                .return_path()
                .map_or_else(|| role_home(config, input.role).to_owned(), str::to_owned),
            Self::AccountHome => config.account_home.clone(),
            Self::AdminHome => config.admin_home.clone(),
        }
    }
}

fn role_home(config: &GateConfig, role: Role) -> &str {
    match role {
        Role::Admin => &config.admin_home,
        Role::Customer => &config.account_home,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    pub name: &'static str,
    pub when: Vec<Condition>,
    pub then: Action,
}

impl Rule {
    #[must_use]
    pub fn new(name: &'static str, when: impl Into<Vec<Condition>>, then: Action) -> Self {
        Self { name, when: when.into(), then }
    }

    fn matches(&self, input: &DecisionInput<'_>, config: &GateConfig) -> bool {
        self.when.iter().all(|c| c.holds(input, config))
    }
}

/// Ordered rules, first match wins.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl Default for RuleSet {
    fn default() -> Self {
        use Condition::{InArea, RoleIs, RoleIsNot, SignedIn, SignedOut};

        Self {
            rules: vec![
                Rule::new("signed-out-admin", [SignedOut, InArea(Area::Admin)], Action::LoginWithReturn),
                Rule::new("signed-out-account", [SignedOut, InArea(Area::Account)], Action::LoginWithReturn),
                Rule::new("signed-in-auth-page", [SignedIn, InArea(Area::Auth)], Action::PostLogin),
                Rule::new(
                    "non-admin-in-admin",
                    [SignedIn, InArea(Area::Admin), RoleIsNot(Role::Admin)],
                    Action::AccountHome,
                ),
                Rule::new(
                    "admin-in-account",
                    [SignedIn, InArea(Area::Account), RoleIs(Role::Admin)],
                    Action::AdminHome,
                ),
            ],
        }
    }
}

impl RuleSet {
    #[must_use]
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule after the existing ones.
    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    #[must_use]
    pub fn evaluate(&self, input: &DecisionInput<'_>, config: &GateConfig) -> Decision {
        match self.rules.iter().find(|rule| rule.matches(input, config)) {
            Some(rule) => {
                let target = rule.then.target(input, config);
                tracing::trace!(rule = rule.name, %target, "route rule matched");
                Decision::Redirect(target)
            }
            None => Decision::Authorized,
        }
    }
}

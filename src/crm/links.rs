//! Dynamic Link matching between Addresses and an Opportunity (and its party).

use std::fmt;
use std::str::FromStr;

use super::records::{non_empty, DynamicLink, Opportunity, OPPORTUNITY};

/// How address links are compared to an opportunity's link targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkMatching {
    /// Doctype and name are matched independently: a link is selected when
    /// its doctype is any target doctype and its name is any target name.
    /// Removal drops links by name alone.
    #[default]
    Loose,
    /// Links are matched as exact `(doctype, name)` pairs.
    Exact,
}

impl fmt::Display for LinkMatching {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkMatching::Loose => f.write_str("loose"),
            LinkMatching::Exact => f.write_str("exact"),
        }
    }
}

impl FromStr for LinkMatching {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "loose" => Ok(LinkMatching::Loose),
            "exact" => Ok(LinkMatching::Exact),
            other => Err(format!("unknown link matching mode: {}", other)),
        }
    }
}

/// A record an Address can be linked to on behalf of an opportunity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    Opportunity(String),
    Party { doctype: String, name: String },
}

impl LinkTarget {
    pub fn doctype(&self) -> &str {
        match self {
            LinkTarget::Opportunity(_) => OPPORTUNITY,
            LinkTarget::Party { doctype, .. } => doctype,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            LinkTarget::Opportunity(name) => name,
            LinkTarget::Party { name, .. } => name,
        }
    }

    pub fn matches(&self, link: &DynamicLink) -> bool {
        link.link_doctype == self.doctype() && link.link_name == self.name()
    }

    pub fn to_link(&self) -> DynamicLink {
        DynamicLink::new(self.doctype(), self.name())
    }
}

/// Link targets of an opportunity: the party first (when set), then the
/// opportunity itself.
pub fn link_targets(opportunity: &Opportunity) -> Vec<LinkTarget> {
    let mut targets = Vec::with_capacity(2);
    if let Some((doctype, name)) = opportunity.party() {
        targets.push(LinkTarget::Party {
            doctype: doctype.to_string(),
            name: name.to_string(),
        });
    }
    targets.push(LinkTarget::Opportunity(opportunity.name.clone()));
    targets
}

/// Selects and strips the address links that belong to one opportunity.
#[derive(Debug, Clone)]
pub struct LinkFilter {
    matching: LinkMatching,
    targets: Vec<LinkTarget>,
    doctypes: Vec<String>,
    names: Vec<String>,
}

impl LinkFilter {
    pub fn new(opportunity: &Opportunity, matching: LinkMatching) -> Self {
        let mut doctypes = vec![OPPORTUNITY.to_string()];
        doctypes.extend(non_empty(opportunity.opportunity_from.as_deref()).map(String::from));

        let mut names = vec![opportunity.name.clone()];
        names.extend(non_empty(opportunity.party_name.as_deref()).map(String::from));

        Self {
            matching,
            targets: link_targets(opportunity),
            doctypes,
            names,
        }
    }

    pub fn targets(&self) -> &[LinkTarget] {
        &self.targets
    }

    /// Whether an address link makes the address belong to the opportunity.
    pub fn selects(&self, link: &DynamicLink) -> bool {
        match self.matching {
            LinkMatching::Loose => {
                self.doctypes.contains(&link.link_doctype) && self.names.contains(&link.link_name)
            }
            LinkMatching::Exact => self.targets.iter().any(|t| t.matches(link)),
        }
    }

    /// Whether an address link is dropped when detaching the opportunity.
    pub fn removes(&self, link: &DynamicLink) -> bool {
        match self.matching {
            LinkMatching::Loose => self.targets.iter().any(|t| t.name() == link.link_name),
            LinkMatching::Exact => self.targets.iter().any(|t| t.matches(link)),
        }
    }
}

//! CRM records as stored in the document store, and the shapes returned to
//! the front-end.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::Doctype;

pub const OPPORTUNITY: &str = "Opportunity";

/// Accepts `true`/`false` as well as the `0`/`1` check values stored by the
/// document store. `null` reads as unchecked.
fn check<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Check {
        Bool(bool),
        Int(i64),
    }

    Ok(match Option::<Check>::deserialize(deserializer)? {
        Some(Check::Bool(b)) => b,
        Some(Check::Int(i)) => i != 0,
        None => false,
    })
}

/// A sales opportunity. Business fields other than the party reference are
/// carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Doctype)]
#[doctype(name = "Opportunity")]
pub struct Opportunity {
    pub name: String,
    /// Doctype of the party this opportunity was raised for ("Customer", "Lead").
    #[serde(default)]
    pub opportunity_from: Option<String>,
    #[serde(default)]
    pub party_name: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Opportunity {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            opportunity_from: None,
            party_name: None,
            fields: Map::new(),
        }
    }

    pub fn with_party(mut self, doctype: &str, party_name: &str) -> Self {
        self.opportunity_from = Some(doctype.to_string());
        self.party_name = Some(party_name.to_string());
        self
    }

    pub fn with_field(mut self, field: &str, value: Value) -> Self {
        self.fields.insert(field.to_string(), value);
        self
    }

    /// `(doctype, name)` of the source party, when the opportunity has one.
    pub fn party(&self) -> Option<(&str, &str)> {
        let doctype = non_empty(self.opportunity_from.as_deref())?;
        let name = non_empty(self.party_name.as_deref())?;
        Some((doctype, name))
    }
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Join row linking an Opportunity to a Contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Doctype)]
#[doctype(name = "CRM Contacts")]
pub struct OpportunityContact {
    pub name: String,
    pub parent: String,
    pub parenttype: String,
    pub contact: String,
    #[serde(default, deserialize_with = "check")]
    pub is_primary: bool,
}

impl OpportunityContact {
    pub fn new(name: &str, opportunity: &str, contact: &str, is_primary: bool) -> Self {
        Self {
            name: name.to_string(),
            parent: opportunity.to_string(),
            parenttype: OPPORTUNITY.to_string(),
            contact: contact.to_string(),
            is_primary,
        }
    }

    pub fn belongs_to(&self, opportunity: &str) -> bool {
        self.parenttype == OPPORTUNITY && self.parent == opportunity
    }
}

/// `{contact, is_primary}` as attached to a fetched opportunity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactLink {
    pub contact: String,
    pub is_primary: bool,
}

impl From<&OpportunityContact> for ContactLink {
    fn from(row: &OpportunityContact) -> Self {
        Self {
            contact: row.contact.clone(),
            is_primary: row.is_primary,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactEmail {
    pub email_id: String,
    #[serde(default, deserialize_with = "check")]
    pub is_primary: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactPhone {
    pub phone: String,
    #[serde(default, deserialize_with = "check")]
    pub is_primary: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Doctype)]
#[doctype(name = "Contact")]
pub struct Contact {
    pub name: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub email_ids: Vec<ContactEmail>,
    #[serde(default)]
    pub phone_nos: Vec<ContactPhone>,
}

/// Contact as listed on an opportunity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactSummary {
    pub name: String,
    pub image: Option<String>,
    pub full_name: Option<String>,
    pub email: String,
    pub mobile_no: String,
    pub is_primary: bool,
}

/// Polymorphic reference from an Address to its owning record.
///
/// Row fields other than the reference itself (`link_title`, `idx`) are kept
/// as-is so saving an address never rewrites its existing rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynamicLink {
    pub link_doctype: String,
    pub link_name: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl DynamicLink {
    pub fn new(link_doctype: &str, link_name: &str) -> Self {
        Self {
            link_doctype: link_doctype.to_string(),
            link_name: link_name.to_string(),
            fields: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Doctype)]
#[doctype(name = "Address")]
pub struct Address {
    pub name: String,
    #[serde(default)]
    pub address_title: Option<String>,
    #[serde(default)]
    pub address_type: Option<String>,
    #[serde(default)]
    pub address_line1: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub links: Vec<DynamicLink>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Address {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            address_title: None,
            address_type: None,
            address_line1: None,
            city: None,
            country: None,
            links: Vec::new(),
            fields: Map::new(),
        }
    }

    pub fn with_link(mut self, link_doctype: &str, link_name: &str) -> Self {
        self.links.push(DynamicLink::new(link_doctype, link_name));
        self
    }
}

/// A fetched opportunity with everything the form view needs.
#[derive(Debug, Clone, Serialize)]
pub struct OpportunityDetail {
    #[serde(flatten)]
    pub opportunity: Opportunity,
    pub contacts: Vec<ContactLink>,
    pub doctype: String,
    pub fields_meta: Value,
    #[serde(rename = "_form_script")]
    pub form_script: Option<String>,
    #[serde(rename = "_assign")]
    pub assign: Vec<String>,
}

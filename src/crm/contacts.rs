use crate::document::{DocsExt, DocumentStore};
use crate::meta::MetadataProvider;
use crate::permission::PermissionChecker;

use super::primary::pick_primary;
use super::records::{Contact, ContactSummary};
use super::{Crm, CrmError};

impl<S, P, M> Crm<S, P, M>
where
    S: DocumentStore,
    P: PermissionChecker,
    M: MetadataProvider,
{
    /// Summaries of every contact linked to an opportunity, in link order.
    ///
    /// An unknown opportunity yields an empty list. A link pointing at a
    /// missing contact fails the whole call with `NotFound`.
    pub fn get_opportunity_contacts(&self, name: &str) -> Result<Vec<ContactSummary>, CrmError> {
        tracing::debug!(opportunity = name, "get_opportunity_contacts");

        let contacts = self.store().docs::<Contact>();
        self.contact_links(name)?
            .into_iter()
            .map(|link| -> Result<ContactSummary, CrmError> {
                let contact = contacts.require(&link.contact)?;
                Ok(summarize(contact, link.is_primary))
            })
            .collect()
    }
}

fn summarize(contact: Contact, is_primary: bool) -> ContactSummary {
    ContactSummary {
        email: pick_primary(&contact.email_ids).to_string(),
        mobile_no: pick_primary(&contact.phone_nos).to_string(),
        name: contact.name,
        image: contact.image,
        full_name: contact.full_name,
        is_primary,
    }
}

use crate::document::{DocsExt, DocumentStore};
use crate::meta::MetadataProvider;
use crate::permission::PermissionChecker;

use super::records::{ContactLink, Opportunity, OpportunityContact, OpportunityDetail, OPPORTUNITY};
use super::{Crm, CrmError};

impl<S, P, M> Crm<S, P, M>
where
    S: DocumentStore,
    P: PermissionChecker,
    M: MetadataProvider,
{
    /// Load one opportunity with its contact links and form metadata.
    pub fn get_opportunity(&self, name: &str) -> Result<OpportunityDetail, CrmError> {
        tracing::debug!(opportunity = name, "get_opportunity");

        let opportunity = self
            .store()
            .docs::<Opportunity>()
            .find_one(&|o| o.name == name)?
            .map(|doc| doc.data)
            .ok_or_else(|| CrmError::NotFound("Opportunity not found".to_string()))?;

        let contacts = self.contact_links(&opportunity.name)?;

        Ok(OpportunityDetail {
            contacts,
            doctype: OPPORTUNITY.to_string(),
            fields_meta: self.meta().fields_meta(OPPORTUNITY),
            form_script: self.meta().form_script(OPPORTUNITY),
            assign: self.meta().assigned_users(OPPORTUNITY, &opportunity.name),
            opportunity,
        })
    }

    /// `CRM Contacts` rows of an opportunity, in store order.
    pub(crate) fn contact_links(&self, opportunity: &str) -> Result<Vec<ContactLink>, CrmError> {
        let rows = self
            .store()
            .docs::<OpportunityContact>()
            .find(&|row| row.belongs_to(opportunity))?;
        Ok(rows.iter().map(|row| ContactLink::from(&row.data)).collect())
    }
}

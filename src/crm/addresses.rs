use std::collections::BTreeSet;

use crate::document::{DocsExt, DocumentStore};
use crate::meta::MetadataProvider;
use crate::permission::{PermissionChecker, PermissionType};

use super::links::{LinkFilter, LinkMatching};
use super::records::{Address, Opportunity, OPPORTUNITY};
use super::{Crm, CrmError};

impl<S, P, M> Crm<S, P, M>
where
    S: DocumentStore,
    P: PermissionChecker,
    M: MetadataProvider,
{
    /// Addresses linked to an opportunity or to its party, ordered by name.
    pub fn get_opportunity_addresses(&self, name: &str) -> Result<Vec<Address>, CrmError> {
        tracing::debug!(opportunity = name, matching = %self.link_matching(), "get_opportunity_addresses");

        let opportunity = self.store().docs::<Opportunity>().require_cached(name)?;
        let filter = LinkFilter::new(&opportunity, self.link_matching());

        let addresses = self.store().docs::<Address>();
        let names: BTreeSet<String> = addresses
            .find(&|address| address.links.iter().any(|link| filter.selects(link)))?
            .into_iter()
            .map(|doc| doc.data.name)
            .collect();

        names
            .iter()
            .map(|name| addresses.require(name).map_err(CrmError::from))
            .collect()
    }

    /// Link an address to an opportunity and, when it has one, to its party.
    ///
    /// With loose matching every call appends new link rows, even if equal
    /// rows already exist. Exact matching skips links already present.
    pub fn add_address(
        &self,
        opportunity: &str,
        address: &str,
        user: Option<&str>,
    ) -> Result<(), CrmError> {
        self.require_permission(OPPORTUNITY, PermissionType::Write, opportunity, user, || {
            "Not allowed to add address to Opportunity".to_string()
        })?;

        let opportunity_doc = self.store().docs::<Opportunity>().require_cached(opportunity)?;
        let mut address_doc = self.store().docs::<Address>().require(address)?;

        let filter = LinkFilter::new(&opportunity_doc, self.link_matching());
        for target in filter.targets() {
            if self.link_matching() == LinkMatching::Exact
                && address_doc.links.iter().any(|link| target.matches(link))
            {
                continue;
            }
            address_doc.links.push(target.to_link());
        }

        self.save_address(&address_doc, user)?;
        tracing::info!(opportunity, address, "address linked to opportunity");
        Ok(())
    }

    /// Unlink an address from an opportunity and its party.
    pub fn remove_address(
        &self,
        opportunity: &str,
        address: &str,
        user: Option<&str>,
    ) -> Result<(), CrmError> {
        self.require_permission(OPPORTUNITY, PermissionType::Write, opportunity, user, || {
            "Not allowed to remove address from Opportunity".to_string()
        })?;

        let opportunity_doc = self.store().docs::<Opportunity>().require_cached(opportunity)?;
        let mut address_doc = self.store().docs::<Address>().require(address)?;

        let filter = LinkFilter::new(&opportunity_doc, self.link_matching());
        let before = address_doc.links.len();
        address_doc.links.retain(|link| !filter.removes(link));

        self.save_address(&address_doc, user)?;
        tracing::info!(
            opportunity,
            address,
            removed = before - address_doc.links.len(),
            "address unlinked from opportunity"
        );
        Ok(())
    }

    fn save_address(&self, address: &Address, user: Option<&str>) -> Result<(), CrmError> {
        self.require_permission("Address", PermissionType::Write, &address.name, user, || {
            format!("Not allowed to modify Address {}", address.name)
        })?;
        self.store().docs::<Address>().save(address)?;
        Ok(())
    }
}

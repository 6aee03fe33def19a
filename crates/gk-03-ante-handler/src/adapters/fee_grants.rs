//! In-memory fee allowances.

use crate::ports::outbound::{FeeGrantError, FeeGrantKeeper};
use gk_02_transaction::Msg;
use shared_types::{amount_of, Address, Coin};
use std::collections::BTreeMap;

/// What a granter allows a grantee to spend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Allowance {
    /// Remaining spend per denom; `None` is unlimited.
    pub spend_limit: Option<Vec<Coin>>,
    /// Message type URLs the allowance covers; `None` covers all.
    pub allowed_messages: Option<Vec<String>>,
}

impl Allowance {
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn with_spend_limit(limit: Vec<Coin>) -> Self {
        Self {
            spend_limit: Some(limit),
            allowed_messages: None,
        }
    }

    pub fn allow_messages(mut self, type_urls: &[&str]) -> Self {
        self.allowed_messages = Some(type_urls.iter().map(|s| s.to_string()).collect());
        self
    }

    /// Check `fee` and `msgs` against the allowance and return it with the
    /// fee subtracted. `None` means the allowance is used up.
    fn accept(&self, fee: &[Coin], msgs: &[Box<dyn Msg>]) -> Result<Option<Self>, FeeGrantError> {
        if let Some(allowed) = &self.allowed_messages {
            if let Some(msg) = msgs
                .iter()
                .find(|m| !allowed.iter().any(|url| url == m.type_url()))
            {
                return Err(FeeGrantError::MessageNotAllowed(msg.type_url().to_string()));
            }
        }

        let Some(limit) = &self.spend_limit else {
            return Ok(Some(self.clone()));
        };

        for coin in fee {
            if amount_of(limit, &coin.denom) < coin.amount {
                return Err(FeeGrantError::SpendLimitExceeded);
            }
        }
        let remaining: Vec<Coin> = limit
            .iter()
            .map(|c| Coin::new(c.denom.clone(), c.amount - amount_of(fee, &c.denom)))
            .filter(|c| c.amount > 0)
            .collect();

        if remaining.is_empty() {
            return Ok(None);
        }
        Ok(Some(Self {
            spend_limit: Some(remaining),
            allowed_messages: self.allowed_messages.clone(),
        }))
    }
}

/// Map-backed allowance store. `Clone` so callers can branch it alongside
/// the ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryFeeGrants {
    grants: BTreeMap<(Address, Address), Allowance>,
}

impl InMemoryFeeGrants {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grant(&mut self, granter: Address, grantee: Address, allowance: Allowance) {
        self.grants.insert((granter, grantee), allowance);
    }

    pub fn revoke(&mut self, granter: &Address, grantee: &Address) -> Option<Allowance> {
        self.grants.remove(&(*granter, *grantee))
    }

    pub fn allowance(&self, granter: &Address, grantee: &Address) -> Option<&Allowance> {
        self.grants.get(&(*granter, *grantee))
    }
}

impl FeeGrantKeeper for InMemoryFeeGrants {
    fn use_granted_fees(
        &mut self,
        granter: &Address,
        grantee: &Address,
        fee: &[Coin],
        msgs: &[Box<dyn Msg>],
    ) -> Result<(), FeeGrantError> {
        let key = (*granter, *grantee);
        let allowance = self.grants.get(&key).ok_or(FeeGrantError::NoAllowance {
            granter: *granter,
            grantee: *grantee,
        })?;

        match allowance.accept(fee, msgs)? {
            Some(updated) => {
                self.grants.insert(key, updated);
            }
            None => {
                self.grants.remove(&key);
            }
        }
        Ok(())
    }
}

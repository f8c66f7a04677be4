//! Lead storage seam.

use std::collections::{BTreeMap, BTreeSet};

use lead_model::{Lead, LeadId, email_key};

use crate::error::StoreError;

/// One staged write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeadChange {
    /// New lead; the store assigns the id and ignores `lead.id`.
    Insert(Lead),
    /// Replacement for an existing lead with the same id.
    Update(Lead),
}

/// Ids touched by a successful [`LeadStore::apply`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppliedChanges {
    pub inserted: Vec<LeadId>,
    pub updated: Vec<LeadId>,
}

pub trait LeadStore {
    fn get(&self, id: LeadId) -> Result<Option<Lead>, StoreError>;

    /// Case-insensitive lookup by professional email.
    fn find_by_email(&self, email: &str) -> Result<Option<Lead>, StoreError>;

    /// Lookup by the external `lead_id`. Blank ids never match.
    fn find_by_lead_id(&self, lead_id: &str) -> Result<Option<Lead>, StoreError>;

    /// All leads, newest first.
    fn list(&self) -> Result<Vec<Lead>, StoreError>;

    /// Applies every change or none of them.
    fn apply(&mut self, changes: Vec<LeadChange>) -> Result<AppliedChanges, StoreError>;
}

/// In-memory store. The JSON repository wraps one of these.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryLeadStore {
    last_id: u64,
    leads: BTreeMap<LeadId, Lead>,
}

impl MemoryLeadStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a store from persisted leads.
    pub fn from_leads(last_id: u64, leads: impl IntoIterator<Item = Lead>) -> Self {
        Self {
            last_id,
            leads: leads.into_iter().map(|lead| (lead.id, lead)).collect(),
        }
    }

    /// Last id handed out; ids are never reused.
    pub fn last_id(&self) -> u64 {
        self.last_id
    }

    /// Leads in id order.
    pub fn leads(&self) -> impl Iterator<Item = &Lead> {
        self.leads.values()
    }

    pub fn len(&self) -> usize {
        self.leads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leads.is_empty()
    }

    fn allocate_id(&mut self) -> LeadId {
        let floor = self.leads.keys().next_back().map_or(0, |id| id.get());
        self.last_id = self.last_id.max(floor) + 1;
        LeadId::new(self.last_id)
    }

    /// Checks the whole batch against the current contents without mutating.
    ///
    /// Emails are unique case-insensitively; non-blank `lead_id`s are unique.
    fn check(&self, changes: &[LeadChange]) -> Result<(), StoreError> {
        let mut owners: BTreeMap<String, Option<LeadId>> = self
            .leads
            .values()
            .map(|lead| (email_key(&lead.professional_email), Some(lead.id)))
            .collect();
        let mut external: BTreeMap<String, Option<LeadId>> = self
            .leads
            .values()
            .filter_map(|lead| external_key(lead).map(|key| (key, Some(lead.id))))
            .collect();
        let mut updated = BTreeSet::new();
        for change in changes {
            match change {
                LeadChange::Insert(lead) => {
                    let key = email_key(&lead.professional_email);
                    if owners.contains_key(&key) {
                        return Err(StoreError::DuplicateEmail(lead.professional_email.clone()));
                    }
                    owners.insert(key, None);
                    if let Some(key) = external_key(lead) {
                        if external.contains_key(&key) {
                            return Err(StoreError::DuplicateLeadId(key));
                        }
                        external.insert(key, None);
                    }
                }
                LeadChange::Update(lead) => {
                    let Some(previous) = self.leads.get(&lead.id) else {
                        return Err(StoreError::NotFound(lead.id));
                    };
                    if !updated.insert(lead.id) {
                        continue;
                    }
                    let old_key = email_key(&previous.professional_email);
                    let new_key = email_key(&lead.professional_email);
                    if old_key != new_key {
                        if owners.get(&new_key).is_some_and(|owner| *owner != Some(lead.id)) {
                            return Err(StoreError::DuplicateEmail(
                                lead.professional_email.clone(),
                            ));
                        }
                        owners.remove(&old_key);
                        owners.insert(new_key, Some(lead.id));
                    }
                    let old_external = external_key(previous);
                    let new_external = external_key(lead);
                    if old_external != new_external {
                        if let Some(key) = &new_external
                            && external.get(key).is_some_and(|owner| *owner != Some(lead.id))
                        {
                            return Err(StoreError::DuplicateLeadId(key.clone()));
                        }
                        if let Some(key) = old_external {
                            external.remove(&key);
                        }
                        if let Some(key) = new_external {
                            external.insert(key, Some(lead.id));
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

/// Trimmed `lead_id`, `None` when blank.
fn external_key(lead: &Lead) -> Option<String> {
    let key = lead.lead_id.trim();
    (!key.is_empty()).then(|| key.to_string())
}

impl LeadStore for MemoryLeadStore {
    fn get(&self, id: LeadId) -> Result<Option<Lead>, StoreError> {
        Ok(self.leads.get(&id).cloned())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Lead>, StoreError> {
        let key = email_key(email);
        Ok(self
            .leads
            .values()
            .find(|lead| email_key(&lead.professional_email) == key)
            .cloned())
    }

    fn find_by_lead_id(&self, lead_id: &str) -> Result<Option<Lead>, StoreError> {
        let key = lead_id.trim();
        if key.is_empty() {
            return Ok(None);
        }
        Ok(self
            .leads
            .values()
            .find(|lead| lead.lead_id.trim() == key)
            .cloned())
    }

    fn list(&self) -> Result<Vec<Lead>, StoreError> {
        let mut leads: Vec<Lead> = self.leads.values().cloned().collect();
        leads.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(leads)
    }

    fn apply(&mut self, changes: Vec<LeadChange>) -> Result<AppliedChanges, StoreError> {
        self.check(&changes)?;
        let mut applied = AppliedChanges::default();
        for change in changes {
            match change {
                LeadChange::Insert(mut lead) => {
                    lead.id = self.allocate_id();
                    applied.inserted.push(lead.id);
                    self.leads.insert(lead.id, lead);
                }
                LeadChange::Update(lead) => {
                    if !applied.updated.contains(&lead.id) {
                        applied.updated.push(lead.id);
                    }
                    self.leads.insert(lead.id, lead);
                }
            }
        }
        Ok(applied)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn lead(email: &str) -> Lead {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut lead = Lead::new(LeadId::new(0), "admin", now);
        lead.professional_email = email.to_string();
        lead
    }

    #[test]
    fn inserts_get_sequential_ids() {
        let mut store = MemoryLeadStore::new();
        let applied = store
            .apply(vec![
                LeadChange::Insert(lead("a@x.io")),
                LeadChange::Insert(lead("b@x.io")),
            ])
            .unwrap();
        assert_eq!(applied.inserted, vec![LeadId::new(1), LeadId::new(2)]);
        assert_eq!(
            store.find_by_email("B@X.IO").unwrap().map(|lead| lead.id),
            Some(LeadId::new(2))
        );
    }

    #[test]
    fn failed_batch_changes_nothing() {
        let mut store = MemoryLeadStore::new();
        store.apply(vec![LeadChange::Insert(lead("a@x.io"))]).unwrap();
        let before = store.clone();

        let result = store.apply(vec![
            LeadChange::Insert(lead("c@x.io")),
            LeadChange::Insert(lead("A@x.io")),
        ]);
        assert!(matches!(result, Err(StoreError::DuplicateEmail(_))));
        assert_eq!(store, before);

        let mut missing = lead("d@x.io");
        missing.id = LeadId::new(42);
        let result = store.apply(vec![LeadChange::Update(missing)]);
        assert!(matches!(result, Err(StoreError::NotFound(id)) if id == LeadId::new(42)));
        assert_eq!(store, before);
    }

    #[test]
    fn list_is_newest_first() {
        let mut store = MemoryLeadStore::new();
        let mut older = lead("old@x.io");
        older.created_at = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        store
            .apply(vec![LeadChange::Insert(older), LeadChange::Insert(lead("new@x.io"))])
            .unwrap();
        let emails: Vec<String> = store
            .list()
            .unwrap()
            .into_iter()
            .map(|lead| lead.professional_email)
            .collect();
        assert_eq!(emails, vec!["new@x.io", "old@x.io"]);
    }

    #[test]
    fn update_may_not_steal_an_email() {
        let mut store = MemoryLeadStore::new();
        store
            .apply(vec![
                LeadChange::Insert(lead("a@x.io")),
                LeadChange::Insert(lead("b@x.io")),
            ])
            .unwrap();
        let mut first = store.get(LeadId::new(1)).unwrap().unwrap();
        first.professional_email = "b@x.io".to_string();
        assert!(matches!(
            store.apply(vec![LeadChange::Update(first)]),
            Err(StoreError::DuplicateEmail(_))
        ));
    }

    #[test]
    fn lead_ids_are_unique_when_present() {
        let mut store = MemoryLeadStore::new();
        let mut first = lead("a@x.io");
        first.lead_id = "L-1".to_string();
        store
            .apply(vec![
                LeadChange::Insert(first),
                LeadChange::Insert(lead("b@x.io")),
                LeadChange::Insert(lead("c@x.io")),
            ])
            .unwrap();
        assert_eq!(
            store.find_by_lead_id(" L-1 ").unwrap().map(|lead| lead.id),
            Some(LeadId::new(1))
        );
        assert_eq!(store.find_by_lead_id("").unwrap(), None);

        let mut clash = lead("d@x.io");
        clash.lead_id = "L-1".to_string();
        assert!(matches!(
            store.apply(vec![LeadChange::Insert(clash)]),
            Err(StoreError::DuplicateLeadId(id)) if id == "L-1"
        ));

        let mut second = store.get(LeadId::new(2)).unwrap().unwrap();
        second.lead_id = "L-1".to_string();
        assert!(matches!(
            store.apply(vec![LeadChange::Update(second)]),
            Err(StoreError::DuplicateLeadId(_))
        ));
        assert_eq!(store.len(), 3);
    }
}

//! Draft state: reducer actions, transition log and hydration

mod hydrate;
mod reducer;

pub use reducer::{DraftAction, VariantField, WEIGHT_TARGET, even_weights, reduce};

use crate::models::LinkDraft;

/// A draft together with every action applied to it, oldest first
#[derive(Debug, Clone, Default)]
pub struct DraftLog {
    draft: LinkDraft,
    actions: Vec<DraftAction>,
}

impl DraftLog {
    pub fn new(initial: LinkDraft) -> Self {
        Self {
            draft: initial,
            actions: Vec::new(),
        }
    }

    pub fn apply(&mut self, action: DraftAction) {
        let draft = std::mem::take(&mut self.draft);
        self.draft = reduce(draft, action.clone());
        self.actions.push(action);
    }

    pub fn draft(&self) -> &LinkDraft {
        &self.draft
    }

    pub fn actions(&self) -> &[DraftAction] {
        &self.actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_records_actions_in_order() {
        let mut log = DraftLog::new(LinkDraft::with_original_url("https://example.com"));
        log.apply(DraftAction::SetTitle("Launch".into()));
        log.apply(DraftAction::AddTag("news".into()));

        assert_eq!(log.draft().title, "Launch");
        assert_eq!(log.draft().original_url, "https://example.com");
        assert_eq!(
            log.actions(),
            &[
                DraftAction::SetTitle("Launch".into()),
                DraftAction::AddTag("news".into())
            ]
        );
    }

    #[test]
    fn test_replaying_log_reproduces_draft() {
        let initial = LinkDraft::new();
        let mut log = DraftLog::new(initial.clone());
        log.apply(DraftAction::SetAbTestEnabled(true));
        log.apply(DraftAction::AddGeoRule);
        log.apply(DraftAction::SetGeoTargetUrl {
            rule: 0,
            url: "https://eu.example.com".into(),
        });

        let replayed = log.actions().iter().cloned().fold(initial, reduce);
        assert_eq!(&replayed, log.draft());
    }
}

//! # Task List
//!
//! The cached completion state of every section of the donor's task list.
//! Derivable sections are refreshed by `Provided::refresh_tasks`; the
//! remaining sections (restrictions, choosing a signatory, checking,
//! payment, identity and signing) are recorded by the operations that
//! complete them.

use lpa_task::{IdentityState, PaymentState, State};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tasks {
    pub your_details: State,
    pub choose_attorneys: State,
    pub choose_replacement_attorneys: State,
    pub when_can_the_lpa_be_used: State,
    pub life_sustaining_treatment: State,
    pub restrictions: State,
    pub certificate_provider: State,
    pub people_to_notify: State,
    pub add_correspondent: State,
    pub choose_your_signatory: State,
    pub check_your_lpa: State,
    pub pay_for_lpa: PaymentState,
    pub confirm_your_identity: IdentityState,
    pub sign_the_lpa: State,
}

//! Visit notification hooks.
//!
//! Creation events and upcoming-visit reminders go through [`VisitNotifier`]
//! so delivery (mail, messaging) can be swapped without touching the
//! services. The default sink writes to the application log.

use crate::domain::directory::Tiers;
use crate::domain::visit::Visit;

pub trait VisitNotifier: Send + Sync {
    /// Called after a visit is persisted. Failures are logged, never
    /// propagated: a lost notification must not roll back the visit.
    fn visit_created(&self, visit: &Visit);

    /// Called by the reminder job for each visit due in the lookahead
    /// window. `client` is `None` when the directory no longer knows the
    /// visited Tiers.
    fn visit_upcoming(&self, visit: &Visit, client: Option<&Tiers>);
}

/// Notifier that records events in the application log.
#[derive(Clone, Copy, Default)]
pub struct LogNotifier;

impl VisitNotifier for LogNotifier {
    fn visit_created(&self, visit: &Visit) {
        log::info!(
            "visit {} created for commercial {} on {}",
            visit.id,
            visit.commercial_cref,
            visit.visit_date
        );
    }

    fn visit_upcoming(&self, visit: &Visit, client: Option<&Tiers>) {
        let client_name = client.map(|t| t.name.as_str()).unwrap_or("unknown client");
        log::info!(
            "reminder: visit {} at {client_name} for commercial {} scheduled at {}",
            visit.id,
            visit.commercial_cref,
            visit.visit_date
        );
    }
}

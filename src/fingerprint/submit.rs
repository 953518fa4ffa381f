//! Fire-and-forget submission of the fingerprint to `/register`.

use std::rc::Rc;

use serde::Serialize;
use wasm_bindgen_futures::spawn_local;

use super::FingerprintRecord;
use crate::http;
use crate::session::{BehaviorMetrics, SessionState};

/// Body of `POST /register`: the record with the behavioral fields appended.
#[derive(Debug, Serialize)]
pub struct RegistrationPayload<'a> {
    #[serde(flatten)]
    pub record: &'a FingerprintRecord,
    #[serde(flatten)]
    pub behavior: BehaviorMetrics,
}

impl<'a> RegistrationPayload<'a> {
    pub fn new(record: &'a FingerprintRecord, behavior: BehaviorMetrics) -> Self {
        Self { record, behavior }
    }
}

/// Submit once, in the background. Outcomes are logged, never shown to the user.
pub fn submit(record: FingerprintRecord, session: Rc<SessionState>, endpoint: String) {
    spawn_local(async move {
        let payload = RegistrationPayload::new(&record, session.snapshot());
        match http::post_json(&endpoint, &payload).await {
            Ok(response) => log::info!("Success sending fingerprint data: {}", response),
            Err(e) => log::error!("Error sending fingerprint data [{:?}]: {}", e.code(), e),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fingerprint::Signals;

    #[test]
    fn test_payload_flattens_record_and_behavior() {
        let record = FingerprintRecord::from_signals(Signals {
            resolution: Some("800x600".into()),
            ..Signals::default()
        });
        let payload = RegistrationPayload::new(
            &record,
            BehaviorMetrics { time_on_page: 12.25, mouse_movements: 40, clicks: 3 },
        );
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["resolution"], "800x600");
        assert_eq!(json["canvas"], "unavailable");
        assert_eq!(json["isProxy"], 0);
        assert_eq!(json["timeOnPage"], 12.25);
        assert_eq!(json["mouseMovements"], 40);
        assert_eq!(json["clicks"], 3);
        assert_eq!(json.as_object().unwrap().len(), 15);
    }
}

//! # Witness Code Issuing and Verification
//!
//! During signing the donor is witnessed by their certificate provider and,
//! when someone signs on their behalf, an independent witness. Each witness
//! is sent a short code by SMS which the donor then enters.
//!
//! Sending is throttled by the resend interval on the witness's code list.
//! Verification consumes a token from the application's limiter before any
//! code is compared, so repeated guessing is refused even for valid codes.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use lpa_core::LpaError;
use lpa_witness::{WitnessCodeConfig, WitnessCodes};

use crate::error::WitnessCodeError;
use crate::provided::Provided;
use crate::store::DonorStore;

/// Delivers witness codes by SMS.
pub trait SmsClient: Send + Sync {
    fn send_witness_code(&self, mobile: &str, lpa_uid: &str, code: &str) -> Result<(), String>;
}

/// An [`SmsClient`] that records what it was asked to send.
#[derive(Debug, Default)]
pub struct RecordingSmsClient {
    /// `(mobile, lpa_uid, code)` for every message, in order.
    pub sent: parking_lot::Mutex<Vec<(String, String, String)>>,
    /// Fail every call with this message.
    pub fail_with: Option<String>,
}

impl SmsClient for RecordingSmsClient {
    fn send_witness_code(&self, mobile: &str, lpa_uid: &str, code: &str) -> Result<(), String> {
        if let Some(message) = &self.fail_with {
            return Err(message.clone());
        }
        self.sent
            .lock()
            .push((mobile.to_string(), lpa_uid.to_string(), code.to_string()));
        Ok(())
    }
}

/// Who witnesses the donor's signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WitnessActor {
    CertificateProvider,
    IndependentWitness,
}

impl WitnessActor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CertificateProvider => "certificate-provider",
            Self::IndependentWitness => "independent-witness",
        }
    }
}

impl fmt::Display for WitnessActor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WitnessActor {
    type Err = LpaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "certificate-provider" => Ok(Self::CertificateProvider),
            "independent-witness" => Ok(Self::IndependentWitness),
            other => Err(LpaError::Parse {
                kind: "witness actor",
                value: other.to_string(),
            }),
        }
    }
}

/// Outcome of checking an entered witness code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WitnessCodeVerification {
    Valid,
    Expired,
    NotFound,
    TooManyAttempts,
}

impl WitnessCodeVerification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::Expired => "expired",
            Self::NotFound => "not-found",
            Self::TooManyAttempts => "too-many-attempts",
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

impl fmt::Display for WitnessCodeVerification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Provided {
    /// Codes sent to the given witness.
    pub fn witness_codes(&self, actor: WitnessActor) -> &WitnessCodes {
        match actor {
            WitnessActor::CertificateProvider => &self.certificate_provider_codes,
            WitnessActor::IndependentWitness => &self.independent_witness_codes,
        }
    }

    fn witness_codes_mut(&mut self, actor: WitnessActor) -> &mut WitnessCodes {
        match actor {
            WitnessActor::CertificateProvider => &mut self.certificate_provider_codes,
            WitnessActor::IndependentWitness => &mut self.independent_witness_codes,
        }
    }

    fn witness_mobile(&self, actor: WitnessActor) -> &str {
        match actor {
            WitnessActor::CertificateProvider => &self.certificate_provider.mobile,
            WitnessActor::IndependentWitness => &self.independent_witness.mobile,
        }
    }
}

/// Issues witness codes, records them on the application and sends them.
#[derive(Clone)]
pub struct WitnessCodeSender {
    config: WitnessCodeConfig,
    store: DonorStore,
    sms: Arc<dyn SmsClient>,
}

impl WitnessCodeSender {
    pub fn new(config: WitnessCodeConfig, store: DonorStore, sms: Arc<dyn SmsClient>) -> Self {
        Self { config, store, sms }
    }

    pub fn send_to_certificate_provider(
        &self,
        provided: &mut Provided,
        now: DateTime<Utc>,
    ) -> Result<(), WitnessCodeError> {
        self.send(provided, WitnessActor::CertificateProvider, now)
    }

    pub fn send_to_independent_witness(
        &self,
        provided: &mut Provided,
        now: DateTime<Utc>,
    ) -> Result<(), WitnessCodeError> {
        self.send(provided, WitnessActor::IndependentWitness, now)
    }

    /// Issue a code to `actor`, persist the application, then send the SMS.
    ///
    /// The code is stored before it is sent, so a failed SMS can be retried
    /// once the resend interval has passed.
    pub fn send(
        &self,
        provided: &mut Provided,
        actor: WitnessActor,
        now: DateTime<Utc>,
    ) -> Result<(), WitnessCodeError> {
        let code = self.config.generate_code();
        let issued = match provided.witness_codes_mut(actor).issue(code, now) {
            Ok(issued) => issued,
            Err(err) => {
                tracing::debug!(lpa_id = %provided.lpa_id, witness = %actor, "witness code requested too recently");
                return Err(err.into());
            }
        };

        self.store.put(provided, now)?;

        let mobile = provided.witness_mobile(actor).to_string();
        let lpa_uid = provided.lpa_uid.clone().unwrap_or_default();
        self.sms
            .send_witness_code(&mobile, &lpa_uid, &issued.code)
            .map_err(|message| WitnessCodeError::Sms {
                mobile: mobile.clone(),
                message,
            })?;

        tracing::info!(lpa_id = %provided.lpa_id, witness = %actor, "witness code sent");
        Ok(())
    }
}

impl fmt::Debug for WitnessCodeSender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WitnessCodeSender")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Check a code entered for `actor`.
///
/// Always consumes a limiter token first, creating the application's
/// limiter from `config` if it has none. A valid code records when the
/// donor was witnessed. The caller persists the application afterwards so
/// the spent token is kept.
pub fn verify_witness_code(
    provided: &mut Provided,
    actor: WitnessActor,
    code: &str,
    now: DateTime<Utc>,
    config: &WitnessCodeConfig,
) -> WitnessCodeVerification {
    let limiter = provided
        .witness_code_limiter
        .get_or_insert_with(|| config.new_limiter(now));
    if !limiter.allow(now) {
        tracing::debug!(lpa_id = %provided.lpa_id, witness = %actor, "witness code attempts exhausted");
        return WitnessCodeVerification::TooManyAttempts;
    }

    let verification = match provided.witness_codes(actor).find(code, now) {
        None => WitnessCodeVerification::NotFound,
        Some(found) if found.has_expired(now) => WitnessCodeVerification::Expired,
        Some(_) => WitnessCodeVerification::Valid,
    };

    if verification.is_valid() {
        match actor {
            WitnessActor::CertificateProvider => provided.witnessed_by_certificate_provider_at = Some(now),
            WitnessActor::IndependentWitness => provided.witnessed_by_independent_witness_at = Some(now),
        }
    }

    tracing::debug!(lpa_id = %provided.lpa_id, witness = %actor, result = %verification, "witness code checked");
    verification
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{DataClient, InMemoryDataClient, RecordingEventClient, RecordingSearchClient};
    use chrono::{Duration, TimeZone};
    use lpa_core::LpaId;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn test_config() -> WitnessCodeConfig {
        WitnessCodeConfig {
            use_test_code: true,
            ..Default::default()
        }
    }

    fn sender_with(sms: RecordingSmsClient) -> (WitnessCodeSender, Arc<RecordingSmsClient>, InMemoryDataClient) {
        let data = InMemoryDataClient::new();
        let store = DonorStore::new(
            Arc::new(data.clone()),
            Arc::new(RecordingEventClient::default()),
            Arc::new(RecordingSearchClient::default()),
        );
        let sms = Arc::new(sms);
        (WitnessCodeSender::new(test_config(), store, sms.clone()), sms, data)
    }

    fn provided() -> Provided {
        let mut p = Provided::new(LpaId("lpa-1".into()), now());
        p.lpa_uid = Some("M-1".into());
        p.certificate_provider.mobile = "07700900001".into();
        p.independent_witness.mobile = "07700900002".into();
        p
    }

    // ── Sending ─────────────────────────────────────────────────────

    #[test]
    fn test_send_to_certificate_provider() {
        let (sender, sms, data) = sender_with(RecordingSmsClient::default());
        let mut p = provided();
        sender.send_to_certificate_provider(&mut p, now()).unwrap();

        assert_eq!(p.certificate_provider_codes.len(), 1);
        assert!(p.independent_witness_codes.is_empty());
        assert_eq!(
            *sms.sent.lock(),
            vec![("07700900001".to_string(), "M-1".to_string(), "1234".to_string())]
        );
        let stored = data.get(&p.lpa_id).unwrap().unwrap();
        assert_eq!(stored.certificate_provider_codes.len(), 1);
    }

    #[test]
    fn test_send_to_independent_witness() {
        let (sender, sms, _) = sender_with(RecordingSmsClient::default());
        let mut p = provided();
        sender.send_to_independent_witness(&mut p, now()).unwrap();
        assert_eq!(p.independent_witness_codes.len(), 1);
        assert_eq!(sms.sent.lock()[0].0, "07700900002");
    }

    #[test]
    fn test_send_too_soon_is_refused() {
        let (sender, sms, _) = sender_with(RecordingSmsClient::default());
        let mut p = provided();
        sender.send_to_certificate_provider(&mut p, now()).unwrap();

        let err = sender
            .send_to_certificate_provider(&mut p, now() + Duration::seconds(60))
            .unwrap_err();
        assert!(err.is_too_many_requests());
        assert_eq!(p.certificate_provider_codes.len(), 1);
        assert_eq!(sms.sent.lock().len(), 1);

        sender
            .send_to_certificate_provider(&mut p, now() + Duration::seconds(61))
            .unwrap();
        assert_eq!(p.certificate_provider_codes.len(), 2);
    }

    #[test]
    fn test_witness_throttles_are_independent() {
        let (sender, _, _) = sender_with(RecordingSmsClient::default());
        let mut p = provided();
        sender.send_to_certificate_provider(&mut p, now()).unwrap();
        sender.send_to_independent_witness(&mut p, now()).unwrap();
    }

    #[test]
    fn test_sms_failure_keeps_stored_code() {
        let (sender, _, data) = sender_with(RecordingSmsClient {
            fail_with: Some("gateway down".into()),
            ..Default::default()
        });
        let mut p = provided();
        let err = sender.send_to_certificate_provider(&mut p, now()).unwrap_err();
        assert!(matches!(err, WitnessCodeError::Sms { .. }));
        assert_eq!(data.get(&p.lpa_id).unwrap().unwrap().certificate_provider_codes.len(), 1);
    }

    // ── Verification ────────────────────────────────────────────────

    fn with_code(created: DateTime<Utc>) -> Provided {
        let mut p = provided();
        p.certificate_provider_codes.issue("1234", created).unwrap();
        p
    }

    #[test]
    fn test_verify_valid_records_witnessing() {
        let mut p = with_code(now());
        let result = verify_witness_code(&mut p, WitnessActor::CertificateProvider, "1234", now(), &test_config());
        assert_eq!(result, WitnessCodeVerification::Valid);
        assert_eq!(p.witnessed_by_certificate_provider_at, Some(now()));
        assert!(p.witnessed_by_independent_witness_at.is_none());
    }

    #[test]
    fn test_verify_wrong_actor_not_found() {
        let mut p = with_code(now());
        let result = verify_witness_code(&mut p, WitnessActor::IndependentWitness, "1234", now(), &test_config());
        assert_eq!(result, WitnessCodeVerification::NotFound);
    }

    #[test]
    fn test_verify_expired() {
        let mut p = with_code(now() - Duration::minutes(16));
        let result = verify_witness_code(&mut p, WitnessActor::CertificateProvider, "1234", now(), &test_config());
        assert_eq!(result, WitnessCodeVerification::Expired);
        assert!(p.witnessed_by_certificate_provider_at.is_none());
    }

    #[test]
    fn test_verify_outside_ignore_window_not_found() {
        let mut p = with_code(now() - Duration::hours(3));
        let result = verify_witness_code(&mut p, WitnessActor::CertificateProvider, "1234", now(), &test_config());
        assert_eq!(result, WitnessCodeVerification::NotFound);
    }

    #[test]
    fn test_verify_creates_limiter_and_exhausts_it() {
        let config = WitnessCodeConfig {
            limiter_initial_tokens: 2.0,
            limiter_max_tokens: 2.0,
            ..test_config()
        };
        let mut p = with_code(now());
        assert!(p.witness_code_limiter.is_none());

        let wrong = |p: &mut Provided| {
            verify_witness_code(p, WitnessActor::CertificateProvider, "0000", now(), &config)
        };
        assert_eq!(wrong(&mut p), WitnessCodeVerification::NotFound);
        assert!(p.witness_code_limiter.is_some());
        assert_eq!(wrong(&mut p), WitnessCodeVerification::NotFound);
        assert_eq!(wrong(&mut p), WitnessCodeVerification::TooManyAttempts);

        // Even the right code is refused once attempts are exhausted.
        let result = verify_witness_code(&mut p, WitnessActor::CertificateProvider, "1234", now(), &config);
        assert_eq!(result, WitnessCodeVerification::TooManyAttempts);
    }

    #[test]
    fn test_verify_spent_token_changes_hash() {
        let mut p = with_code(now());
        p.witness_code_limiter = Some(test_config().new_limiter(now()));
        p.update_hash().unwrap();
        verify_witness_code(&mut p, WitnessActor::CertificateProvider, "0000", now(), &test_config());
        assert!(p.hash_changed());
    }

    // ── Vocabulary ──────────────────────────────────────────────────

    #[test]
    fn test_witness_actor_parse() {
        for actor in [WitnessActor::CertificateProvider, WitnessActor::IndependentWitness] {
            assert_eq!(actor.as_str().parse::<WitnessActor>().unwrap(), actor);
        }
        assert!("donor".parse::<WitnessActor>().is_err());
    }
}

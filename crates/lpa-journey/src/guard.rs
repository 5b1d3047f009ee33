//! # Navigation Guard
//!
//! Decides whether the donor may visit a page, from the task states cached
//! on [`Provided`]. The guard reads only cached state, so callers must have
//! run [`Provided::reconcile`] after their last mutation.
//!
//! Before signing, a page is gated by the group it belongs to and pages in
//! no group are always visitable. After signing the journey is locked: only
//! pages for tasks that are still outstanding stay open.

use lpa_donor::Provided;

use crate::path::{Path, LPA_PREFIX};

/// Pages of the payment task.
const PAYMENT_PAGES: &[Path] = &[
    Path::AboutPayment,
    Path::AreYouApplyingForFeeDiscountOrExemption,
    Path::WhichFeeTypeAreYouApplyingFor,
    Path::PreviousApplicationNumber,
    Path::PreviousFee,
    Path::CostOfRepeatApplication,
    Path::EvidenceRequired,
    Path::HowWouldYouLikeToSendEvidence,
    Path::UploadEvidence,
    Path::SendUsYourEvidenceByPost,
    Path::PayFee,
    Path::PaymentConfirmation,
    Path::PaymentSuccessful,
    Path::EvidenceSuccessfullyUploaded,
    Path::WhatHappensNextRepeatApplicationNoFee,
    Path::PendingPayment,
    Path::UploadEvidenceSse,
];

/// Pages of the confirm-your-identity task, including vouching.
const IDENTITY_PAGES: &[Path] = &[
    Path::ConfirmYourIdentity,
    Path::HowWillYouConfirmYourIdentity,
    Path::CompletingYourIdentityConfirmation,
    Path::IdentityWithOneLogin,
    Path::IdentityWithOneLoginCallback,
    Path::IdentityDetails,
    Path::RegisterWithCourtOfProtection,
    Path::UnableToConfirmIdentity,
    Path::ChooseSomeoneToVouchForYou,
    Path::EnterVoucher,
    Path::ConfirmPersonAllowedToVouch,
    Path::CheckYourDetails,
    Path::WeHaveContactedVoucher,
    Path::WhatYouCanDoNow,
    Path::WhatYouCanDoNowExpired,
    Path::WhatHappensNextRegisteringWithCourtOfProtection,
    Path::AreYouSureYouNoLongerNeedVoucher,
    Path::WeHaveInformedVoucherNoLongerNeeded,
];

/// Pages of the sign-the-lpa task, including witnessing.
const SIGNING_PAGES: &[Path] = &[
    Path::HowToSignYourLpa,
    Path::ReadYourLpa,
    Path::YourLpaLanguage,
    Path::LpaYourLegalRightsAndResponsibilities,
    Path::SignYourLpa,
    Path::SignTheLpaOnBehalf,
    Path::WitnessingYourSignature,
    Path::WitnessingAsIndependentWitness,
    Path::ResendIndependentWitnessCode,
    Path::ChangeIndependentWitnessMobileNumber,
    Path::WitnessingAsCertificateProvider,
    Path::ResendCertificateProviderCode,
    Path::ChangeCertificateProviderMobileNumber,
    Path::CertificateProviderDetails,
    Path::CertificateProviderAddress,
    Path::YourIndependentWitness,
    Path::YourIndependentWitnessAddress,
];

fn payment_allows_progress(provided: &Provided) -> bool {
    provided.tasks.pay_for_lpa.allows_progress()
}

fn may_sign(provided: &Provided) -> bool {
    provided.donor_identity_confirmed()
        || provided.registering_with_court_of_protection
        || provided.voucher.is_nominated()
}

/// Section one up to and including add-correspondent.
///
/// Unlike [`Provided::section_one_completed_before_check`], a completed
/// when-can-the-lpa-be-used task counts whatever the LPA type.
fn ready_to_check(provided: &Provided) -> bool {
    let t = &provided.tasks;
    t.your_details.is_completed()
        && t.choose_attorneys.is_completed()
        && t.choose_replacement_attorneys.is_completed()
        && (provided.is_personal_welfare() && t.life_sustaining_treatment.is_completed()
            || t.when_can_the_lpa_be_used.is_completed())
        && t.restrictions.is_completed()
        && t.certificate_provider.is_completed()
        && t.people_to_notify.is_completed()
        && (provided.donor_can_sign() || t.choose_your_signatory.is_completed())
        && t.add_correspondent.is_completed()
}

impl Path {
    /// Whether the donor may visit this page now.
    pub fn can_visit(&self, provided: &Provided) -> bool {
        if provided.signed_at.is_some() {
            return self.can_visit_after_signing(provided);
        }

        let tasks = &provided.tasks;
        let section_one_completed = provided.section_one_completed();

        match self {
            Path::WhenCanTheLpaBeUsed
            | Path::LifeSustainingTreatment
            | Path::Restrictions
            | Path::WhatACertificateProviderDoes
            | Path::DoYouWantToNotifyPeople
            | Path::DoYouWantReplacementAttorneys => {
                tasks.your_details.is_completed() && tasks.choose_attorneys.is_completed()
            }

            Path::GettingHelpSigning => tasks.certificate_provider.is_completed(),

            Path::HowToSignYourLpa
            | Path::ReadYourLpa
            | Path::SignYourLpa
            | Path::WitnessingYourSignature
            | Path::WitnessingAsCertificateProvider
            | Path::WitnessingAsIndependentWitness
            | Path::YouHaveSubmittedYourLpa => {
                section_one_completed && payment_allows_progress(provided) && may_sign(provided)
            }

            Path::ConfirmYourCertificateProviderIsNotRelated | Path::CheckYourLpa => {
                ready_to_check(provided)
            }

            Path::AboutPayment => section_one_completed,

            Path::ConfirmYourIdentity
            | Path::HowWillYouConfirmYourIdentity
            | Path::IdentityWithOneLogin
            | Path::LpaYourLegalRightsAndResponsibilities
            | Path::SignTheLpaOnBehalf => section_one_completed && payment_allows_progress(provided),

            Path::YourName | Path::YourDateOfBirth => {
                provided.identity_user_data.status == lpa_core::IdentityStatus::Unknown
            }

            _ => true,
        }
    }

    fn can_visit_after_signing(&self, provided: &Provided) -> bool {
        let tasks = &provided.tasks;

        match self {
            Path::Progress
            | Path::ViewLpa
            | Path::DeleteThisLpa
            | Path::WithdrawThisLpa
            | Path::YouHaveSubmittedYourLpa => true,
            Path::TaskList => !provided.completed_all_tasks(),
            page if PAYMENT_PAGES.contains(page) => !tasks.pay_for_lpa.is_completed(),
            page if IDENTITY_PAGES.contains(page) => !tasks.confirm_your_identity.is_completed(),
            page if SIGNING_PAGES.contains(page) => !tasks.sign_the_lpa.is_completed(),
            _ => false,
        }
    }
}

/// Whether the donor may follow `url`.
///
/// The query string is ignored. Addresses under `/lpa/{id}` are checked
/// against their page; an unrecognised page is allowed before signing and
/// refused after. Any other address is allowed, except the empty one.
pub fn can_go_to(provided: &Provided, url: &str) -> bool {
    let path = url.split_once('?').map_or(url, |(path, _)| path);
    if path.is_empty() {
        return false;
    }

    let Some(rest) = path.strip_prefix(LPA_PREFIX) else {
        return true;
    };

    let suffix = rest.find('/').map_or("", |i| &rest[i..]);
    match Path::parse(suffix) {
        Some(page) => page.can_visit(provided),
        None => {
            tracing::trace!(suffix, "unrecognised page");
            provided.signed_at.is_none()
        }
    }
}

//! # Donor Journey Pages
//!
//! Every page of the donor journey, addressed relative to an application as
//! `/lpa/{id}<page>`. A page's string form is its path suffix including the
//! leading slash; a few pages span more than one segment.

use std::fmt;
use std::str::FromStr;

use lpa_core::LpaError;

/// Prefix under which every application page is served.
pub const LPA_PREFIX: &str = "/lpa/";

macro_rules! pages {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $variant:ident => $s:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $( $variant ),+
        }

        impl $name {
            /// Every page, in alphabetical order of variant name.
            pub const ALL: &'static [$name] = &[ $( Self::$variant ),+ ];

            /// The page's path suffix, e.g. `/task-list`.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $s ),+
                }
            }

            /// Recognise a path suffix. Unknown suffixes are `None`.
            pub fn parse(suffix: &str) -> Option<Self> {
                match suffix {
                    $( $s => Some(Self::$variant), )+
                    _ => None,
                }
            }
        }
    };
}

pages! {
    /// A page of the donor journey.
    pub enum Path {
        AboutPayment => "/about-payment",
        AddCorrespondent => "/add-correspondent",
        AreYouApplyingForFeeDiscountOrExemption => "/are-you-applying-for-fee-discount-or-exemption",
        AreYouSureYouNoLongerNeedVoucher => "/are-you-sure-you-no-longer-need-voucher",
        BecauseYouHaveChosenJointly => "/because-you-have-chosen-jointly",
        BecauseYouHaveChosenJointlyForSomeSeverallyForOthers => "/because-you-have-chosen-jointly-for-some-severally-for-others",
        CanYouSignYourLpa => "/can-you-sign-your-lpa",
        CertificateProviderAddress => "/certificate-provider-address",
        CertificateProviderDetails => "/certificate-provider-details",
        CertificateProviderOptOut => "/certificate-provider-opt-out",
        CertificateProviderSummary => "/certificate-provider-summary",
        ChangeCertificateProviderMobileNumber => "/change-certificate-provider-mobile-number",
        ChangeDonorEmail => "/change-donor-email",
        ChangeDonorMobileNumber => "/change-donor-mobile-number",
        ChangeIndependentWitnessMobileNumber => "/change-independent-witness-mobile-number",
        CheckYouCanSign => "/check-you-can-sign",
        CheckYourDetails => "/check-your-details",
        CheckYourLpa => "/check-your-lpa",
        ChooseAttorneys => "/choose-attorneys",
        ChooseAttorneysAddress => "/choose-attorneys-address",
        ChooseAttorneysGuidance => "/choose-attorneys-guidance",
        ChooseAttorneysSummary => "/choose-attorneys-summary",
        ChooseCertificateProvider => "/choose-certificate-provider",
        ChooseCorrespondent => "/choose-correspondent",
        ChooseNewCertificateProvider => "/choose-new-certificate-provider",
        ChoosePeopleToNotify => "/choose-people-to-notify",
        ChoosePeopleToNotifySummary => "/choose-people-to-notify-summary",
        ChooseReplacementAttorneys => "/choose-replacement-attorneys",
        ChooseReplacementAttorneysAddress => "/choose-replacement-attorneys-address",
        ChooseReplacementAttorneysSummary => "/choose-replacement-attorneys-summary",
        ChooseReplacementTrustCorporation => "/choose-replacement-trust-corporation",
        ChooseSomeoneToVouchForYou => "/choose-someone-to-vouch-for-you",
        ChooseTrustCorporation => "/choose-trust-corporation",
        ChooseYourCertificateProvider => "/choose-your-certificate-provider",
        CompletingYourIdentityConfirmation => "/completing-your-identity-confirmation",
        ConfirmPersonAllowedToVouch => "/confirm-person-allowed-to-vouch",
        ConfirmYourCertificateProviderIsNotRelated => "/confirm-your-certificate-provider-is-not-related",
        ConfirmYourIdentity => "/confirm-your-identity",
        CorrespondentSummary => "/correspondent-summary",
        CostOfRepeatApplication => "/cost-of-repeat-application",
        DeleteThisLpa => "/delete-this-lpa",
        DoYouLiveInTheUk => "/do-you-live-in-the-uk",
        DoYouWantReplacementAttorneys => "/do-you-want-replacement-attorneys",
        DoYouWantToNotifyPeople => "/do-you-want-to-notify-people",
        EnterAttorney => "/enter-attorney",
        EnterCorrespondentAddress => "/enter-correspondent-address",
        EnterCorrespondentDetails => "/enter-correspondent-details",
        EnterPersonToNotify => "/enter-person-to-notify",
        EnterPersonToNotifyAddress => "/enter-person-to-notify-address",
        EnterReplacementAttorney => "/enter-replacement-attorney",
        EnterReplacementTrustCorporation => "/enter-replacement-trust-corporation",
        EnterReplacementTrustCorporationAddress => "/enter-replacement-trust-corporation-address",
        EnterTrustCorporation => "/enter-trust-corporation",
        EnterTrustCorporationAddress => "/enter-trust-corporation-address",
        EnterVoucher => "/enter-voucher",
        EvidenceRequired => "/evidence-required",
        EvidenceSuccessfullyUploaded => "/evidence-successfully-uploaded",
        GettingHelpSigning => "/getting-help-signing",
        HowDoYouKnowYourCertificateProvider => "/how-do-you-know-your-certificate-provider",
        HowLongHaveYouKnownCertificateProvider => "/how-long-have-you-known-certificate-provider",
        HowShouldAttorneysMakeDecisions => "/how-should-attorneys-make-decisions",
        HowShouldReplacementAttorneysMakeDecisions => "/how-should-replacement-attorneys-make-decisions",
        HowShouldReplacementAttorneysStepIn => "/how-should-replacement-attorneys-step-in",
        HowToSendEvidence => "/how-to-send-evidence",
        HowToSignYourLpa => "/how-to-sign-your-lpa",
        HowWillYouConfirmYourIdentity => "/how-will-you-confirm-your-identity",
        HowWouldCertificateProviderPreferToCarryOutTheirRole => "/how-would-certificate-provider-prefer-to-carry-out-their-role",
        HowWouldYouLikeToSendEvidence => "/how-would-you-like-to-send-evidence",
        IdentityDetails => "/identity-details",
        IdentityDetailsUpdated => "/identity-details-updated",
        IdentityWithOneLogin => "/id/one-login",
        IdentityWithOneLoginCallback => "/id/one-login/callback",
        LifeSustainingTreatment => "/life-sustaining-treatment",
        LpaDetailsSaved => "/lpa-details-saved",
        LpaType => "/lpa-type",
        LpaYourLegalRightsAndResponsibilities => "/your-legal-rights-and-responsibilities",
        MakeANewLpa => "/make-a-new-lpa",
        NeedHelpSigningConfirmation => "/need-help-signing-confirmation",
        PayFee => "/pay-fee",
        PaymentConfirmation => "/payment-confirmation",
        PaymentSuccessful => "/payment-successful",
        PendingPayment => "/pending-payment",
        PreviousApplicationNumber => "/previous-application-number",
        PreviousFee => "/how-much-did-you-previously-pay-for-your-lpa",
        Progress => "/progress",
        ReadYourLpa => "/read-your-lpa",
        ReceivingUpdatesAboutYourLpa => "/receiving-updates-about-your-lpa",
        RegisterWithCourtOfProtection => "/register-with-court-of-protection",
        RemoveAttorney => "/remove-attorney",
        RemoveCertificateProvider => "/remove-certificate-provider",
        RemoveCorrespondent => "/remove-correspondent",
        RemovePersonToNotify => "/remove-person-to-notify",
        RemoveReplacementAttorney => "/remove-replacement-attorney",
        RemoveReplacementTrustCorporation => "/remove-replacement-trust-corporation",
        RemoveTrustCorporation => "/remove-trust-corporation",
        ResendCertificateProviderCode => "/resend-certificate-provider-code",
        ResendIndependentWitnessCode => "/resend-independent-witness-code",
        ResendVoucherAccessCode => "/resend-voucher-access-code",
        Restrictions => "/restrictions",
        SendUsYourEvidenceByPost => "/send-us-your-evidence-by-post",
        SignTheLpaOnBehalf => "/sign-the-lpa-on-behalf",
        SignYourLpa => "/sign-your-lpa",
        TaskList => "/task-list",
        UnableToConfirmIdentity => "/unable-to-confirm-identity",
        UploadEvidence => "/upload-evidence",
        UploadEvidenceSse => "/upload-evidence-sse",
        UseExistingAddress => "/use-existing-address",
        ViewLpa => "/view-lpa",
        WarningInterruption => "/warning",
        WeHaveContactedVoucher => "/we-have-contacted-voucher",
        WeHaveInformedVoucherNoLongerNeeded => "/we-have-informed-voucher-no-longer-needed",
        WeHaveUpdatedYourDetails => "/we-have-updated-your-details",
        WhatACertificateProviderDoes => "/what-a-certificate-provider-does",
        WhatCountryDoYouLiveIn => "/what-country-do-you-live-in",
        WhatHappensNextRegisteringWithCourtOfProtection => "/what-happens-next-registering-with-court-of-protection",
        WhatHappensNextRepeatApplicationNoFee => "/what-happens-next-repeat-application-no-fee",
        WhatYouCanDoNow => "/what-you-can-do-now",
        WhatYouCanDoNowExpired => "/what-you-can-do-now-expired",
        WhenCanTheLpaBeUsed => "/when-can-the-lpa-be-used",
        WhichFeeTypeAreYouApplyingFor => "/which-fee-type-are-you-applying-for",
        WithdrawThisLpa => "/withdraw-this-lpa",
        WitnessingAsCertificateProvider => "/witnessing-as-certificate-provider",
        WitnessingAsIndependentWitness => "/witnessing-as-independent-witness",
        WitnessingYourSignature => "/witnessing-your-signature",
        YouCannotSignYourLpaYet => "/you-cannot-sign-your-lpa-yet",
        YouHaveSubmittedYourLpa => "/you-have-submitted-your-lpa",
        YouHaveToldUsYouAreUnder18 => "/you-have-told-us-you-are-under-18",
        YouMustBeOver18ToComplete => "/you-must-be-over-18-to-complete",
        YourAddress => "/your-address",
        YourAuthorisedSignatory => "/your-authorised-signatory",
        YourDateOfBirth => "/your-date-of-birth",
        YourDetails => "/your-details",
        YourEmail => "/your-email",
        YourIndependentWitness => "/your-independent-witness",
        YourIndependentWitnessAddress => "/your-independent-witness-address",
        YourIndependentWitnessMobile => "/your-independent-witness-mobile",
        YourLegalRightsAndResponsibilitiesIfYouMakeLpa => "/your-legal-rights-and-responsibilities-if-you-make-an-lpa",
        YourLpaLanguage => "/your-lpa-language",
        YourMobile => "/your-mobile",
        YourName => "/your-name",
        YourNonUkAddress => "/your-non-uk-address",
        YourPreferredLanguage => "/your-preferred-language",
    }
}

impl Path {
    /// The page's address for application `lpa_id`.
    pub fn format(&self, lpa_id: &str) -> String {
        format!("{LPA_PREFIX}{lpa_id}{}", self.as_str())
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Path {
    type Err = LpaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| LpaError::Parse {
            kind: "page",
            value: s.to_string(),
        })
    }
}

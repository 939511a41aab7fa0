//! Request and response types for the Meridian backend API.
//!
//! All structs use camelCase serialization to match the API's JSON format.
//! Entities are opaque value records as far as the pipeline is concerned;
//! the tracker only relies on their identifiers (the [`Keyed`] impls).

use serde::{Deserialize, Serialize};

use crate::state::op::Keyed;

// ── Authentication ───────────────────────────────────────────────────────

/// Login request body sent to POST /users/login.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Registration request body sent to POST /users/register.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    /// Username of the referring member.
    pub referrer: String,
}

/// Token payload returned by login and registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    #[serde(rename = "type")]
    pub token_type: String,
    pub id: u64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl AuthResponse {
    /// The identity snapshot persisted alongside the token.
    pub fn identity(&self) -> AuthUser {
        AuthUser {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            roles: self.roles.clone(),
        }
    }
}

/// Identity snapshot held in session state and persisted as `auth_user`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: u64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

// ── Profile and account ──────────────────────────────────────────────────

/// Profile edit body sent to PUT /users/profile.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditProfileRequest {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub country: String,
}

/// Member rank ladder, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rank {
    Unranked,
    SeniorManager,
    ExecutiveDirector,
    DiamondTeam,
    DoubleDiamond,
    TripleDiamond,
    PresidentTeam,
    PresidentBlackDiamond,
    CrownBlackDiamond,
    Ambassador,
    GlobalAmbassador,
}

/// Full member profile entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub referrer: String,
    #[serde(default)]
    pub registered_at: Option<String>,
    pub active: bool,
    pub rank: Rank,
    pub verified: bool,
    #[serde(default)]
    pub bonuses: Vec<Bonus>,
    #[serde(default)]
    pub wallets: Vec<Wallet>,
    #[serde(default)]
    pub license: Option<License>,
}

/// Lightweight user reference embedded in other entities.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRef {
    pub id: u64,
    pub username: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BonusCode {
    Sb,
    Rb,
    Ub,
    Apb,
    Fb,
    Rkb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BonusKind {
    SignupBonus,
    RenewalBonus,
    UnilevelBonus,
    AnnualPoolBonus,
    FounderBonus,
    RankBonus,
}

/// Accrued bonus bucket on a member account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bonus {
    pub id: u64,
    pub code: BonusCode,
    pub name: BonusKind,
    pub accrued: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WalletKind {
    Dividends,
    Commissions,
}

impl WalletKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WalletKind::Dividends => "DIVIDENDS",
            WalletKind::Commissions => "COMMISSIONS",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WalletCode {
    Wd,
    Wc,
}

/// Internal balance bucket on a member account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub id: u64,
    pub kind: WalletKind,
    pub code: WalletCode,
    pub balance: f64,
}

/// Purchased license attached to a member account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct License {
    pub id: u64,
    pub name: String,
    pub price: f64,
    pub limit: f64,
    pub active: bool,
    #[serde(default)]
    pub purchased_at: Option<String>,
    pub accrued_balance: f64,
}

// ── Requests (pending operations awaiting admin review) ──────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestKind {
    LicensePurchase,
    DividendsWithdrawal,
    CommissionsWithdrawal,
    UserTransfer,
    DelegatedPayment,
}

impl RequestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestKind::LicensePurchase => "LICENSE_PURCHASE",
            RequestKind::DividendsWithdrawal => "DIVIDENDS_WITHDRAWAL",
            RequestKind::CommissionsWithdrawal => "COMMISSIONS_WITHDRAWAL",
            RequestKind::UserTransfer => "USER_TRANSFER",
            RequestKind::DelegatedPayment => "DELEGATED_PAYMENT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationStatus {
    Pending,
    Completed,
    Failed,
    Approved,
    Rejected,
}

impl OperationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationStatus::Pending => "PENDING",
            OperationStatus::Completed => "COMPLETED",
            OperationStatus::Failed => "FAILED",
            OperationStatus::Approved => "APPROVED",
            OperationStatus::Rejected => "REJECTED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CryptoKind {
    Bitcoin,
    UsdtErc20,
    UsdtTrc20,
    Solana,
}

impl CryptoKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CryptoKind::Bitcoin => "BITCOIN",
            CryptoKind::UsdtErc20 => "USDT_ERC20",
            CryptoKind::UsdtTrc20 => "USDT_TRC20",
            CryptoKind::Solana => "SOLANA",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    CryptoTransfer,
    DividendsWallet,
    CommissionsWallet,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CryptoTransfer => "CRYPTO_TRANSFER",
            PaymentMethod::DividendsWallet => "DIVIDENDS_WALLET",
            PaymentMethod::CommissionsWallet => "COMMISSIONS_WALLET",
        }
    }
}

/// A pending account request (license purchase, withdrawal, transfer).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRequest {
    pub id: u64,
    pub kind: RequestKind,
    pub status: OperationStatus,
    pub amount: f64,
    #[serde(default)]
    pub requested_at: Option<String>,
    #[serde(default)]
    pub crypto: Option<CryptoKind>,
    #[serde(default)]
    pub description: Option<String>,
    /// Destination address for withdrawal requests.
    #[serde(default)]
    pub wallet_address: Option<String>,
    #[serde(default)]
    pub user: Option<UserRef>,
}

// ── KYC ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KycFileKind {
    ProofOfAddress,
    IdentityDocument,
}

impl KycFileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            KycFileKind::ProofOfAddress => "PROOF_OF_ADDRESS",
            KycFileKind::IdentityDocument => "IDENTITY_DOCUMENT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KycRejectionReason {
    UnreadableFile,
    InconsistentInformation,
    ExpiredDocument,
    InvalidDocument,
}

/// Uploaded verification document and its review state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KycFile {
    pub id: u64,
    pub file_name: String,
    pub file_type: KycFileKind,
    #[serde(default)]
    pub file_size: Option<u64>,
    #[serde(default)]
    pub uploaded_at: Option<String>,
    #[serde(default)]
    pub verified_at: Option<String>,
    pub status: OperationStatus,
    #[serde(default)]
    pub rejection_reason: Option<KycRejectionReason>,
    #[serde(default)]
    pub rejection_comment: Option<String>,
    #[serde(default)]
    pub user: Option<UserRef>,
}

/// Review verdict body sent to PUT /kyc/{id}/evaluate.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateKycRequest {
    pub new_status: OperationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<KycRejectionReason>,
}

// ── Wallet addresses ─────────────────────────────────────────────────────

/// External withdrawal address registered by a member.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletAddress {
    pub id: u64,
    pub address: String,
    pub crypto: CryptoKind,
    /// User-chosen label for the address.
    pub label: String,
    #[serde(default)]
    pub withdrawn_balance: f64,
    #[serde(default)]
    pub user: Option<UserRef>,
}

/// Create/update body for wallet addresses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletAddressRequest {
    pub address: String,
    pub crypto: CryptoKind,
    pub label: String,
}

// ── Transactions ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionConcept {
    DirectSignupBonus,
    IndirectSignupBonus,
    LicenseRenewalBonus,
    UnilevelBonus,
    RankBonus,
    PassiveIncome,
    AnnualBonus,
    FounderBonus,
    DelegatedLicensePurchase,
    LicensePurchase,
    FundsWithdrawal,
    UserTransfer,
}

impl TransactionConcept {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionConcept::DirectSignupBonus => "DIRECT_SIGNUP_BONUS",
            TransactionConcept::IndirectSignupBonus => "INDIRECT_SIGNUP_BONUS",
            TransactionConcept::LicenseRenewalBonus => "LICENSE_RENEWAL_BONUS",
            TransactionConcept::UnilevelBonus => "UNILEVEL_BONUS",
            TransactionConcept::RankBonus => "RANK_BONUS",
            TransactionConcept::PassiveIncome => "PASSIVE_INCOME",
            TransactionConcept::AnnualBonus => "ANNUAL_BONUS",
            TransactionConcept::FounderBonus => "FOUNDER_BONUS",
            TransactionConcept::DelegatedLicensePurchase => "DELEGATED_LICENSE_PURCHASE",
            TransactionConcept::LicensePurchase => "LICENSE_PURCHASE",
            TransactionConcept::FundsWithdrawal => "FUNDS_WITHDRAWAL",
            TransactionConcept::UserTransfer => "USER_TRANSFER",
        }
    }
}

/// Settled ledger entry on a member account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: u64,
    pub concept: TransactionConcept,
    pub status: OperationStatus,
    pub amount: f64,
    #[serde(default)]
    pub occurred_at: Option<String>,
    #[serde(default)]
    pub crypto: Option<CryptoKind>,
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub user: Option<UserRef>,
}

/// Criteria for GET /transactions/filter. Unset fields are omitted from the
/// query string; the backend treats absence as "all".
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub user_id: Option<u64>,
    /// ISO date lower bound, inclusive.
    pub from: Option<String>,
    /// ISO date upper bound, inclusive.
    pub to: Option<String>,
    pub concept: Option<TransactionConcept>,
    pub status: Option<OperationStatus>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl TransactionFilter {
    /// Query pairs for the set fields only.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(user_id) = self.user_id {
            pairs.push(("userId", user_id.to_string()));
        }
        if let Some(ref from) = self.from {
            pairs.push(("from", from.clone()));
        }
        if let Some(ref to) = self.to {
            pairs.push(("to", to.clone()));
        }
        if let Some(concept) = self.concept {
            pairs.push(("concept", concept.as_str().to_string()));
        }
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(size) = self.size {
            pairs.push(("size", size.to_string()));
        }
        pairs
    }
}

/// One row of GET /transactions/earnings-by-month.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyEarnings {
    pub month: String,
    pub earnings: f64,
}

// ── Network ──────────────────────────────────────────────────────────────

/// A member of the caller's referral network.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkMember {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub license: Option<License>,
    pub level: u32,
    #[serde(default)]
    pub referrer: String,
}

// ── Tracker identities ───────────────────────────────────────────────────

impl Keyed for User {
    fn key(&self) -> u64 {
        self.id
    }
}

impl Keyed for AccountRequest {
    fn key(&self) -> u64 {
        self.id
    }
}

impl Keyed for KycFile {
    fn key(&self) -> u64 {
        self.id
    }
}

impl Keyed for WalletAddress {
    fn key(&self) -> u64 {
        self.id
    }
}

impl Keyed for Transaction {
    fn key(&self) -> u64 {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_response_identity_snapshot() {
        let raw = r#"{
            "token": "jwt-value",
            "type": "Bearer",
            "id": 7,
            "username": "ana",
            "email": "ana@example.com",
            "roles": ["ROLE_USER"]
        }"#;
        let auth: AuthResponse = serde_json::from_str(raw).unwrap();
        let identity = auth.identity();
        assert_eq!(identity.id, 7);
        assert_eq!(identity.username, "ana");
        assert_eq!(identity.roles, vec!["ROLE_USER".to_string()]);
    }

    #[test]
    fn test_kyc_file_decodes_with_sparse_fields() {
        let raw = r#"{
            "id": 3,
            "fileName": "passport.jpg",
            "fileType": "IDENTITY_DOCUMENT",
            "status": "PENDING"
        }"#;
        let file: KycFile = serde_json::from_str(raw).unwrap();
        assert_eq!(file.file_type, KycFileKind::IdentityDocument);
        assert_eq!(file.status, OperationStatus::Pending);
        assert!(file.rejection_reason.is_none());
    }

    #[test]
    fn test_transaction_filter_skips_unset_fields() {
        let filter = TransactionFilter {
            concept: Some(TransactionConcept::UnilevelBonus),
            page: Some(0),
            size: Some(10),
            ..Default::default()
        };
        let pairs = filter.query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("concept", "UNILEVEL_BONUS".to_string()),
                ("page", "0".to_string()),
                ("size", "10".to_string()),
            ]
        );
    }
}

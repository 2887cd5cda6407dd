use anchor_lang::prelude::*;

#[constant]
pub const FUND_SEED: &[u8] = b"relief_fund";
#[constant]
pub const ROLE_SEED: &[u8] = b"role";
#[constant]
pub const BENEFICIARY_SEED: &[u8] = b"beneficiary";
#[constant]
pub const SPEND_SEED: &[u8] = b"spend";
#[constant]
pub const DONOR_SEED: &[u8] = b"donor";

pub const MIN_NAME_LEN: usize = 4;
pub const MAX_NAME_LEN: usize = 32;
/// Upper bound for each auditor factor, and so for the resulting score.
pub const MAX_IMPACT_FACTOR: u8 = 100;
/// Beneficiaries per fund. Every record travels in the release transaction,
/// which has to stay inside the packet and account limits.
pub const MAX_BENEFICIARIES: u32 = 24;

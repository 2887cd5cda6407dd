use anchor_lang::prelude::*;

use crate::constants::MAX_IMPACT_FACTOR;
use crate::state::{read_account, write_account, FundPool, ReliefError, Role, RoleAssignment};

#[account]
#[derive(Debug)]
pub struct BeneficiaryRecord {
    pub fund: Pubkey,
    pub principal: Pubkey,
    pub registered: bool,
    pub index: u32,           // Registration order, fixes the release order
    pub impact_score: u8,     // 0..=100
    pub total_funds: u64,     // Spendable balance
    pub total_received: u64,  // Sum of release credits
    pub total_spent: u64,     // Sum over all categories
    pub registered_at: i64,
    pub bump: u8,
}

impl Space for BeneficiaryRecord {
    const INIT_SPACE: usize = 8      // Discriminator
        + 32    // fund: Pubkey
        + 32    // principal: Pubkey
        + 1     // registered: bool
        + 4     // index: u32
        + 1     // impact_score: u8
        + 8     // total_funds: u64
        + 8     // total_received: u64
        + 8     // total_spent: u64
        + 8     // registered_at: i64
        + 1;    // bump: u8
}

/// `floor((factor_a + factor_b) / 2)`, with both factors capped at 100.
pub fn impact_score(factor_a: u8, factor_b: u8) -> Result<u8> {
    require!(
        factor_a <= MAX_IMPACT_FACTOR && factor_b <= MAX_IMPACT_FACTOR,
        ReliefError::FactorOutOfRange
    );
    Ok(((factor_a as u16 + factor_b as u16) / 2) as u8)
}

impl BeneficiaryRecord {
    pub fn new(fund: Pubkey, principal: Pubkey, index: u32, registered_at: i64, bump: u8) -> Self {
        Self {
            fund,
            principal,
            registered: true,
            index,
            impact_score: 0,
            total_funds: 0,
            total_received: 0,
            total_spent: 0,
            registered_at,
            bump,
        }
    }

    pub fn set_impact_score(&mut self, factor_a: u8, factor_b: u8) -> Result<u8> {
        require!(self.registered, ReliefError::NotRegistered);
        self.impact_score = impact_score(factor_a, factor_b)?;
        Ok(self.impact_score)
    }

    /// The balances this record would hold after receiving `share`, without applying them.
    pub fn credited(&self, share: u64) -> Result<(u64, u64)> {
        let total_funds = self.total_funds.checked_add(share).ok_or(ReliefError::MathOverflow)?;
        let total_received = self
            .total_received
            .checked_add(share)
            .ok_or(ReliefError::MathOverflow)?;
        Ok((total_funds, total_received))
    }

    pub fn credit(&mut self, share: u64) -> Result<()> {
        (self.total_funds, self.total_received) = self.credited(share)?;
        Ok(())
    }

    pub fn debit(&mut self, amount: u64) -> Result<()> {
        require!(self.registered, ReliefError::NotRegistered);
        require!(amount <= self.total_funds, ReliefError::InsufficientFunds);
        let total_spent = self.total_spent.checked_add(amount).ok_or(ReliefError::MathOverflow)?;
        self.total_funds -= amount;
        self.total_spent = total_spent;
        Ok(())
    }
}

/// Registers `principal` into `fund` and grants it BENEFICIARY.
///
/// Returns the registration index, or `None` when the principal was already
/// registered, in which case nothing is touched.
#[allow(clippy::too_many_arguments)]
pub fn enroll(
    fund_key: Pubkey,
    fund: &mut FundPool,
    record: &mut BeneficiaryRecord,
    assignment: &mut RoleAssignment,
    principal: Pubkey,
    admin: Pubkey,
    now: i64,
    bumps: (u8, u8),
) -> Result<Option<u32>> {
    if record.registered {
        return Ok(None);
    }
    let index = fund.next_beneficiary_index()?;
    *record = BeneficiaryRecord::new(fund_key, principal, index, now, bumps.0);
    assignment.activate(fund_key, Role::Beneficiary, principal, admin, now, bumps.1);
    Ok(Some(index))
}

/// The record behind `info`, if it exists and is registered.
pub fn registered_record(info: &AccountInfo) -> Result<Option<BeneficiaryRecord>> {
    Ok(read_account::<BeneficiaryRecord>(info)?.filter(|record| record.registered))
}

pub fn score_beneficiary(info: &AccountInfo, factor_a: u8, factor_b: u8) -> Result<u8> {
    let mut record = registered_record(info)?.ok_or(ReliefError::NotRegistered)?;
    let score = record.set_impact_score(factor_a, factor_b)?;
    write_account(info, &record)?;
    Ok(score)
}

/// Debits the record behind `info` and books the amount under `category`.
/// `category_spend` is keyed by the record account, not the principal.
pub fn spend_from(
    info: &AccountInfo,
    category_spend: &mut CategorySpend,
    fund: &mut FundPool,
    category: u8,
    amount: u64,
    bump: u8,
) -> Result<BeneficiaryRecord> {
    let mut record = registered_record(info)?.ok_or(ReliefError::NotRegistered)?;
    record.debit(amount)?;

    if category_spend.record == Pubkey::default() {
        *category_spend = CategorySpend {
            record: info.key(),
            category,
            amount: 0,
            bump,
        };
    }
    category_spend.add(amount)?;
    fund.record_spend(amount)?;
    write_account(info, &record)?;
    Ok(record)
}

pub fn check_payout_account(owner: &Pubkey, mint: &Pubkey, beneficiary: &Pubkey, fund_mint: &Pubkey) -> Result<()> {
    require!(
        owner == beneficiary && mint == fund_mint,
        ReliefError::InvalidPayoutAccount
    );
    Ok(())
}

#[account]
pub struct CategorySpend {
    pub record: Pubkey,   // Owning beneficiary record
    pub category: u8,
    pub amount: u64,      // Total spent in this category
    pub bump: u8,
}

impl Space for CategorySpend {
    const INIT_SPACE: usize = 8      // Discriminator
        + 32    // record: Pubkey
        + 1     // category: u8
        + 8     // amount: u64
        + 1;    // bump: u8
}

impl CategorySpend {
    pub fn add(&mut self, amount: u64) -> Result<()> {
        self.amount = self.amount.checked_add(amount).ok_or(ReliefError::MathOverflow)?;
        Ok(())
    }
}

#[event]
pub struct BeneficiaryRegistered {
    pub fund: Pubkey,
    pub beneficiary: Pubkey,
    pub index: u32,
    pub timestamp: i64,
}

#[event]
pub struct ImpactScoreUpdated {
    pub fund: Pubkey,
    pub beneficiary: Pubkey,
    pub auditor: Pubkey,
    pub impact_score: u8,
    pub timestamp: i64,
}

#[event]
pub struct FundsSpent {
    pub fund: Pubkey,
    pub beneficiary: Pubkey,
    pub category: u8,
    pub amount: u64,
    pub remaining_balance: u64,
    pub timestamp: i64,
}

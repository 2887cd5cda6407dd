use anchor_lang::prelude::*;

use crate::constants::{MAX_BENEFICIARIES, MAX_NAME_LEN, MIN_NAME_LEN};

#[account]
pub struct FundPool {
    pub creator: Pubkey,
    pub name: String,
    pub mint: Pubkey,
    pub vault: Pubkey,
    pub balance: u64,          // Undistributed, including dust from earlier releases
    pub total_deposited: u64,
    pub total_released: u64,
    pub total_spent: u64,
    pub beneficiary_count: u32, // Also the next registration index
    pub created_at: i64,
    pub bump: u8,
}

impl Space for FundPool {
    const INIT_SPACE: usize = 8      // Discriminator
        + 32    // creator: Pubkey
        + 4 + MAX_NAME_LEN // name: String
        + 32    // mint: Pubkey
        + 32    // vault: Pubkey
        + 8     // balance: u64
        + 8     // total_deposited: u64
        + 8     // total_released: u64
        + 8     // total_spent: u64
        + 4     // beneficiary_count: u32
        + 8     // created_at: i64
        + 1;    // bump: u8
}

/// Outcome of a proportional release, computed before anything is written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReleasePlan {
    /// One entry per beneficiary, in the order the scores were given.
    pub shares: Vec<u64>,
    pub distributed: u64,
    pub dust: u64,
}

impl FundPool {
    pub fn validate_name(name: &str) -> Result<()> {
        require!(
            name.len() >= MIN_NAME_LEN && name.len() <= MAX_NAME_LEN,
            ReliefError::NameLengthInvalid
        );
        Ok(())
    }

    /// Zero is accepted and leaves the pool unchanged.
    pub fn deposit(&mut self, amount: u64) -> Result<()> {
        self.balance = self.balance.checked_add(amount).ok_or(ReliefError::MathOverflow)?;
        self.total_deposited = self
            .total_deposited
            .checked_add(amount)
            .ok_or(ReliefError::MathOverflow)?;
        Ok(())
    }

    /// Reserves the next registration index. A release must carry every
    /// record in one transaction, so the directory is capped.
    pub fn next_beneficiary_index(&mut self) -> Result<u32> {
        let index = self.beneficiary_count;
        require!(index < MAX_BENEFICIARIES, ReliefError::BeneficiaryLimitReached);
        self.beneficiary_count = index.checked_add(1).ok_or(ReliefError::MathOverflow)?;
        Ok(index)
    }

    /// Splits the current balance across `scores` as `floor(balance * score / total)`.
    ///
    /// The remainder of the floor division is reported as `dust` and is not
    /// part of `distributed`; it stays in the pool for the next release.
    pub fn plan_release(&self, scores: &[u8]) -> Result<ReleasePlan> {
        let total_score: u128 = scores.iter().map(|s| *s as u128).sum();
        require!(total_score > 0, ReliefError::NoEligibleRecipients);

        let pool = self.balance as u128;
        let mut shares = Vec::with_capacity(scores.len());
        let mut distributed: u64 = 0;

        for score in scores {
            let share = pool
                .checked_mul(*score as u128)
                .ok_or(ReliefError::MathOverflow)?
                .checked_div(total_score)
                .ok_or(ReliefError::MathOverflow)?;
            let share = u64::try_from(share).map_err(|_| ReliefError::MathOverflow)?;
            distributed = distributed.checked_add(share).ok_or(ReliefError::MathOverflow)?;
            shares.push(share);
        }

        let dust = self
            .balance
            .checked_sub(distributed)
            .ok_or(ReliefError::MathOverflow)?;

        Ok(ReleasePlan {
            shares,
            distributed,
            dust,
        })
    }

    pub fn commit_release(&mut self, plan: &ReleasePlan) -> Result<()> {
        self.balance = self
            .balance
            .checked_sub(plan.distributed)
            .ok_or(ReliefError::MathOverflow)?;
        self.total_released = self
            .total_released
            .checked_add(plan.distributed)
            .ok_or(ReliefError::MathOverflow)?;
        Ok(())
    }

    /// Tokens that actually reached the vault, which is what a deposit credits.
    /// Mints with a transfer fee deliver less than the stated amount.
    pub fn vault_received(before: u64, after: u64) -> Result<u64> {
        after.checked_sub(before).ok_or_else(|| ReliefError::MathOverflow.into())
    }

    pub fn record_spend(&mut self, amount: u64) -> Result<()> {
        self.total_spent = self.total_spent.checked_add(amount).ok_or(ReliefError::MathOverflow)?;
        Ok(())
    }
}

#[event]
pub struct FundInitialized {
    pub fund: Pubkey,
    pub creator: Pubkey,
    pub mint: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct FundsDeposited {
    pub fund: Pubkey,
    pub donor: Pubkey,
    pub amount: u64,
    pub pool_balance: u64,
    pub timestamp: i64,
}

#[event]
pub struct FundsReleased {
    pub fund: Pubkey,
    pub recipients: u32,
    pub distributed: u64,
    pub dust_retained: u64,
    pub timestamp: i64,
}

#[error_code]
pub enum ReliefError {
    #[msg("Unauthorized action")]
    Unauthorized,

    #[msg("Beneficiary is not registered")]
    NotRegistered,

    #[msg("Insufficient funds")]
    InsufficientFunds,

    #[msg("No registered beneficiary has a non-zero impact score")]
    NoEligibleRecipients,

    #[msg("Math overflow error")]
    MathOverflow,

    #[msg("Name must be between 4 and 32 characters")]
    NameLengthInvalid,

    #[msg("Impact factors must be between 0 and 100")]
    FactorOutOfRange,

    #[msg("Beneficiary role is granted through registration only")]
    ReservedRole,

    #[msg("Release must list every registered beneficiary in registration order")]
    BeneficiarySetMismatch,

    #[msg("Account is not a beneficiary record of this fund")]
    InvalidBeneficiaryAccount,

    #[msg("Beneficiary limit reached")]
    BeneficiaryLimitReached,

    #[msg("Payout account must be the beneficiary's own account for the fund mint")]
    InvalidPayoutAccount,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(balance: u64) -> FundPool {
        FundPool {
            creator: Pubkey::new_unique(),
            name: "relief".to_string(),
            mint: Pubkey::new_unique(),
            vault: Pubkey::new_unique(),
            balance,
            total_deposited: balance,
            total_released: 0,
            total_spent: 0,
            beneficiary_count: 0,
            created_at: 0,
            bump: 255,
        }
    }

    #[test]
    fn name_length_bounds() {
        assert!(FundPool::validate_name("abcd").is_ok());
        assert!(FundPool::validate_name(&"x".repeat(32)).is_ok());
        assert_eq!(
            FundPool::validate_name("abc").unwrap_err(),
            ReliefError::NameLengthInvalid.into()
        );
        assert_eq!(
            FundPool::validate_name(&"x".repeat(33)).unwrap_err(),
            ReliefError::NameLengthInvalid.into()
        );
    }

    #[test]
    fn deposit_accumulates() {
        let mut fund = pool(0);
        fund.deposit(7).unwrap();
        fund.deposit(3).unwrap();
        assert_eq!(fund.balance, 10);
        assert_eq!(fund.total_deposited, 10);
    }

    #[test]
    fn zero_deposit_is_accepted() {
        let mut fund = pool(4);
        fund.deposit(0).unwrap();
        assert_eq!(fund.balance, 4);
        assert_eq!(fund.total_deposited, 4);
    }

    #[test]
    fn deposit_credits_what_the_vault_received() {
        // 100 stated, 5 withheld by the mint's transfer fee.
        let received = FundPool::vault_received(1_000, 1_095).unwrap();
        assert_eq!(received, 95);

        let mut fund = pool(1_000);
        fund.deposit(received).unwrap();
        assert_eq!(fund.balance, 1_095);
        assert_eq!(
            FundPool::vault_received(10, 9).unwrap_err(),
            ReliefError::MathOverflow.into()
        );
    }

    #[test]
    fn deposit_overflow_leaves_balance() {
        let mut fund = pool(u64::MAX);
        assert_eq!(fund.deposit(1).unwrap_err(), ReliefError::MathOverflow.into());
        assert_eq!(fund.balance, u64::MAX);
    }

    #[test]
    fn registration_indices_are_sequential() {
        let mut fund = pool(0);
        assert_eq!(fund.next_beneficiary_index().unwrap(), 0);
        assert_eq!(fund.next_beneficiary_index().unwrap(), 1);
        assert_eq!(fund.beneficiary_count, 2);
    }

    #[test]
    fn registrations_stop_at_the_release_capacity() {
        let mut fund = pool(0);
        for expected in 0..MAX_BENEFICIARIES {
            assert_eq!(fund.next_beneficiary_index().unwrap(), expected);
        }
        assert_eq!(
            fund.next_beneficiary_index().unwrap_err(),
            ReliefError::BeneficiaryLimitReached.into()
        );
        assert_eq!(fund.beneficiary_count, MAX_BENEFICIARIES);
    }

    #[test]
    fn release_splits_in_score_ratio() {
        let fund = pool(10);
        let plan = fund.plan_release(&[80, 20]).unwrap();
        assert_eq!(plan.shares, vec![8, 2]);
        assert_eq!(plan.distributed, 10);
        assert_eq!(plan.dust, 0);
    }

    #[test]
    fn release_keeps_dust_in_pool() {
        let mut fund = pool(10);
        let plan = fund.plan_release(&[1, 1, 1]).unwrap();
        assert_eq!(plan.shares, vec![3, 3, 3]);
        assert_eq!(plan.dust, 1);

        fund.commit_release(&plan).unwrap();
        assert_eq!(fund.balance, 1);
        assert_eq!(fund.total_released, 9);
    }

    #[test]
    fn zero_scores_receive_nothing() {
        let fund = pool(100);
        let plan = fund.plan_release(&[0, 50, 0, 50]).unwrap();
        assert_eq!(plan.shares, vec![0, 50, 0, 50]);
    }

    #[test]
    fn release_without_scores_is_rejected() {
        let fund = pool(100);
        assert_eq!(
            fund.plan_release(&[0, 0]).unwrap_err(),
            ReliefError::NoEligibleRecipients.into()
        );
        assert_eq!(
            fund.plan_release(&[]).unwrap_err(),
            ReliefError::NoEligibleRecipients.into()
        );
    }

    #[test]
    fn large_pool_does_not_overflow_intermediate_product() {
        let fund = pool(u64::MAX);
        let plan = fund.plan_release(&[100, 100]).unwrap();
        assert_eq!(plan.shares, vec![u64::MAX / 2, u64::MAX / 2]);
        assert_eq!(plan.dust, 1);
        assert!(plan.distributed <= fund.balance);
    }
}

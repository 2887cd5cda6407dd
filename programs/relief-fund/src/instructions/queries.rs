use anchor_lang::prelude::*;

use crate::constants::{BENEFICIARY_SEED, FUND_SEED, ROLE_SEED, SPEND_SEED};
use crate::state::{read_account, registered_record, role_held, BeneficiaryRecord, CategorySpend, FundPool, Role};

// Read-only instructions, meant to be simulated; values come back as return data.

#[derive(Accounts)]
#[instruction(role: Role, principal: Pubkey)]
pub struct HasRole<'info> {
    #[account(
        seeds=[FUND_SEED, fund.name.as_str().as_bytes(), fund.creator.as_ref()],
        bump=fund.bump
    )]
    pub fund: Account<'info, FundPool>,

    /// CHECK: may not exist
    #[account(
        seeds=[ROLE_SEED, fund.key().as_ref(), role.seed().as_ref(), principal.as_ref()],
        bump
    )]
    pub assignment: UncheckedAccount<'info>,
}

impl<'info> HasRole<'info> {
    pub fn has_role(&self, role: Role, principal: Pubkey) -> Result<bool> {
        role_held(&self.assignment, &self.fund.key(), role, &principal)
    }
}

#[derive(Accounts)]
#[instruction(principal: Pubkey)]
pub struct BeneficiaryQuery<'info> {
    #[account(
        seeds=[FUND_SEED, fund.name.as_str().as_bytes(), fund.creator.as_ref()],
        bump=fund.bump
    )]
    pub fund: Account<'info, FundPool>,

    /// CHECK: may not exist
    #[account(
        seeds=[BENEFICIARY_SEED, fund.key().as_ref(), principal.as_ref()],
        bump
    )]
    pub record: UncheckedAccount<'info>,
}

impl<'info> BeneficiaryQuery<'info> {
    fn load(&self) -> Result<Option<BeneficiaryRecord>> {
        registered_record(&self.record)
    }

    pub fn is_registered(&self) -> Result<bool> {
        Ok(self.load()?.is_some())
    }

    pub fn impact_score(&self) -> Result<u8> {
        Ok(self.load()?.map(|record| record.impact_score).unwrap_or(0))
    }

    pub fn total_funds(&self) -> Result<u64> {
        Ok(self.load()?.map(|record| record.total_funds).unwrap_or(0))
    }
}

#[derive(Accounts)]
#[instruction(principal: Pubkey, category: u8)]
pub struct SpentQuery<'info> {
    #[account(
        seeds=[FUND_SEED, fund.name.as_str().as_bytes(), fund.creator.as_ref()],
        bump=fund.bump
    )]
    pub fund: Account<'info, FundPool>,

    /// CHECK: may not exist
    #[account(
        seeds=[BENEFICIARY_SEED, fund.key().as_ref(), principal.as_ref()],
        bump
    )]
    pub record: UncheckedAccount<'info>,

    /// CHECK: may not exist
    #[account(
        seeds=[SPEND_SEED, record.key().as_ref(), [category].as_ref()],
        bump
    )]
    pub category_spend: UncheckedAccount<'info>,
}

impl<'info> SpentQuery<'info> {
    pub fn spent(&self) -> Result<u64> {
        Ok(read_account::<CategorySpend>(&self.category_spend)?
            .map(|spend| spend.amount)
            .unwrap_or(0))
    }
}

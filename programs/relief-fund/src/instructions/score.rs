use anchor_lang::prelude::*;

use crate::constants::{BENEFICIARY_SEED, FUND_SEED, ROLE_SEED};
use crate::state::{require_role, score_beneficiary, FundPool, ImpactScoreUpdated, Role};

#[derive(Accounts)]
#[instruction(principal: Pubkey)]
pub struct CalculateImpactScore<'info> {
    pub auditor: Signer<'info>,

    #[account(
        seeds=[FUND_SEED, fund.name.as_str().as_bytes(), fund.creator.as_ref()],
        bump=fund.bump
    )]
    pub fund: Account<'info, FundPool>,

    /// CHECK: the caller's auditor assignment, verified by `require_role`
    #[account(
        seeds=[ROLE_SEED, fund.key().as_ref(), Role::Auditor.seed().as_ref(), auditor.key().as_ref()],
        bump
    )]
    pub auditor_role: UncheckedAccount<'info>,

    /// CHECK: may not exist for an unregistered principal
    #[account(
        mut,
        seeds=[BENEFICIARY_SEED, fund.key().as_ref(), principal.as_ref()],
        bump
    )]
    pub record: UncheckedAccount<'info>,
}

impl<'info> CalculateImpactScore<'info> {
    pub fn calculate_impact_score(&mut self, principal: Pubkey, factor_a: u8, factor_b: u8) -> Result<()> {
        require_role(&self.auditor_role, &self.fund.key(), Role::Auditor, &self.auditor.key())?;

        let impact_score = score_beneficiary(&self.record, factor_a, factor_b)?;

        emit!(ImpactScoreUpdated {
            fund: self.fund.key(),
            beneficiary: principal,
            auditor: self.auditor.key(),
            impact_score,
            timestamp: Clock::get()?.unix_timestamp,
        });
        Ok(())
    }
}

use anchor_lang::prelude::*;

use crate::constants::{FUND_SEED, ROLE_SEED};
use crate::state::{release_to, require_role, FundPool, FundsReleased, Role};

#[derive(Accounts)]
pub struct ReleaseAllFunds <'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds=[FUND_SEED, fund.name.as_str().as_bytes(), fund.creator.as_ref()],
        bump=fund.bump
     )]
    pub fund: Account<'info, FundPool>,

    /// CHECK: the caller's admin assignment, verified by `require_role`
    #[account(
        seeds=[ROLE_SEED, fund.key().as_ref(), Role::Admin.seed().as_ref(), admin.key().as_ref()],
        bump
    )]
    pub admin_role: UncheckedAccount<'info>,
    // Remaining accounts: every beneficiary record of the fund, writable, in registration order.
}

impl <'info> ReleaseAllFunds <'info> {
    pub fn release_all_funds(&mut self, records: &[AccountInfo<'info>]) -> Result<()> {
        require_role(&self.admin_role, &self.fund.key(), Role::Admin, &self.admin.key())?;

        let fund = self.fund.key();
        let plan = release_to(&mut self.fund, &fund, records)?;

        msg!(
            "Released {} to {} beneficiaries, {} left in pool",
            plan.distributed,
            records.len(),
            plan.dust
        );

        emit!(FundsReleased {
            fund,
            recipients: plan.shares.iter().filter(|share| **share > 0).count() as u32,
            distributed: plan.distributed,
            dust_retained: plan.dust,
            timestamp: Clock::get()?.unix_timestamp
        });
        Ok(())
    }
}

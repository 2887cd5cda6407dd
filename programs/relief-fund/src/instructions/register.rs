use anchor_lang::prelude::*;

use crate::constants::{BENEFICIARY_SEED, FUND_SEED, ROLE_SEED};
use crate::state::{
    enroll, require_role, BeneficiaryRecord, BeneficiaryRegistered, FundPool, Role, RoleAssignment,
    RoleGranted,
};

#[derive(Accounts)]
#[instruction(principal: Pubkey)]
pub struct RegisterBeneficiary<'info> {
    #[account(mut)]
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

    #[account(
        init_if_needed,
        payer=admin,
        space=BeneficiaryRecord::INIT_SPACE,
        seeds=[BENEFICIARY_SEED, fund.key().as_ref(), principal.as_ref()],
        bump
    )]
    pub record: Account<'info, BeneficiaryRecord>,

    #[account(
        init_if_needed,
        payer=admin,
        space=RoleAssignment::INIT_SPACE,
        seeds=[ROLE_SEED, fund.key().as_ref(), Role::Beneficiary.seed().as_ref(), principal.as_ref()],
        bump
    )]
    pub beneficiary_role: Account<'info, RoleAssignment>,

    pub system_program: Program<'info, System>,
}

impl<'info> RegisterBeneficiary<'info> {
    /// Registering an already registered principal is a no-op: the record,
    /// its score, balance and registration order are left as they are.
    pub fn register_beneficiary(&mut self, principal: Pubkey, bumps: &RegisterBeneficiaryBumps) -> Result<()> {
        require_role(&self.admin_role, &self.fund.key(), Role::Admin, &self.admin.key())?;

        let now = Clock::get()?.unix_timestamp;
        let Some(index) = enroll(
            self.fund.key(),
            &mut self.fund,
            &mut self.record,
            &mut self.beneficiary_role,
            principal,
            self.admin.key(),
            now,
            (bumps.record, bumps.beneficiary_role),
        )?
        else {
            msg!("Beneficiary {} already registered", principal);
            return Ok(());
        };

        emit!(BeneficiaryRegistered {
            fund: self.fund.key(),
            beneficiary: principal,
            index,
            timestamp: now,
        });
        emit!(RoleGranted {
            fund: self.fund.key(),
            role: Role::Beneficiary,
            principal,
            granted_by: self.admin.key(),
            timestamp: now,
        });
        Ok(())
    }
}

use anchor_lang::prelude::*;

use crate::constants::{FUND_SEED, ROLE_SEED};
use crate::state::{
    require_role, revoke_assignment, FundPool, Role, RoleAssignment, RoleGranted, RoleRevoked,
};

#[derive(Accounts)]
#[instruction(role: Role, principal: Pubkey)]
pub struct GrantRole<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
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
        space=RoleAssignment::INIT_SPACE,
        seeds=[ROLE_SEED, fund.key().as_ref(), role.seed().as_ref(), principal.as_ref()],
        bump
    )]
    pub assignment: Account<'info, RoleAssignment>,

    pub system_program: Program<'info, System>,
}

impl<'info> GrantRole<'info> {
    pub fn grant_role(&mut self, role: Role, principal: Pubkey, bumps: &GrantRoleBumps) -> Result<()> {
        require_role(&self.admin_role, &self.fund.key(), Role::Admin, &self.admin.key())?;
        role.require_grantable()?;

        let now = Clock::get()?.unix_timestamp;
        let granted = self.assignment.activate(
            self.fund.key(),
            role,
            principal,
            self.admin.key(),
            now,
            bumps.assignment,
        );
        if !granted {
            msg!("{:?} already held by {}", role, principal);
            return Ok(());
        }

        emit!(RoleGranted {
            fund: self.fund.key(),
            role,
            principal,
            granted_by: self.admin.key(),
            timestamp: now,
        });
        Ok(())
    }
}

#[derive(Accounts)]
#[instruction(role: Role, principal: Pubkey)]
pub struct RevokeRole<'info> {
    pub admin: Signer<'info>,

    #[account(
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

    /// CHECK: may not exist when the role was never granted
    #[account(
        mut,
        seeds=[ROLE_SEED, fund.key().as_ref(), role.seed().as_ref(), principal.as_ref()],
        bump
    )]
    pub assignment: UncheckedAccount<'info>,
}

impl<'info> RevokeRole<'info> {
    pub fn revoke_role(&mut self, role: Role, principal: Pubkey) -> Result<()> {
        require_role(&self.admin_role, &self.fund.key(), Role::Admin, &self.admin.key())?;
        role.require_grantable()?;

        // Any admin may revoke any admin, the creator and itself included.
        if !revoke_assignment(&self.assignment)? {
            msg!("{:?} not held by {}", role, principal);
            return Ok(());
        }

        emit!(RoleRevoked {
            fund: self.fund.key(),
            role,
            principal,
            revoked_by: self.admin.key(),
            timestamp: Clock::get()?.unix_timestamp,
        });
        Ok(())
    }
}

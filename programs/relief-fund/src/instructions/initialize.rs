use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface}
};

use crate::constants::{FUND_SEED, ROLE_SEED};
use crate::state::{FundInitialized, FundPool, Role, RoleAssignment, RoleGranted};

#[derive(Accounts)]
#[instruction(name: String)]
pub struct Initialize <'info> {
    #[account(mut)]
    pub creator: Signer<'info>,

    #[account(
        init,
        payer=creator,
        space=FundPool::INIT_SPACE,
        seeds=[FUND_SEED, name.as_str().as_bytes(), creator.key().as_ref()],
        bump
    )]
    pub fund: Account<'info, FundPool>,

    #[account(
        init,
        payer=creator,
        space=RoleAssignment::INIT_SPACE,
        seeds=[ROLE_SEED, fund.key().as_ref(), Role::Admin.seed().as_ref(), creator.key().as_ref()],
        bump
    )]
    pub creator_admin: Account<'info, RoleAssignment>,

    pub mint: InterfaceAccount<'info, Mint>,

    #[account(init,
        associated_token::mint=mint,
        associated_token::authority=fund,
        associated_token::token_program=token_program,
        payer=creator)]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub token_program: Interface<'info, TokenInterface>
}

impl <'info> Initialize <'info> {
    pub fn initialize(&mut self, name: String, bumps: &InitializeBumps) -> Result<()> {
        FundPool::validate_name(&name)?;
        let now = Clock::get()?.unix_timestamp;

        self.fund.set_inner(FundPool {
            creator: self.creator.key(),
            name,
            mint: self.mint.key(),
            vault: self.vault.key(),
            balance: 0,
            total_deposited: 0,
            total_released: 0,
            total_spent: 0,
            beneficiary_count: 0,
            created_at: now,
            bump: bumps.fund,
        });

        // The creator is the first admin; later admins are peers it can be revoked by.
        self.creator_admin.activate(
            self.fund.key(),
            Role::Admin,
            self.creator.key(),
            self.creator.key(),
            now,
            bumps.creator_admin,
        );

        emit!(FundInitialized {
            fund: self.fund.key(),
            creator: self.creator.key(),
            mint: self.mint.key(),
            timestamp: now,
        });
        emit!(RoleGranted {
            fund: self.fund.key(),
            role: Role::Admin,
            principal: self.creator.key(),
            granted_by: self.creator.key(),
            timestamp: now,
        });
        Ok(())
    }
}

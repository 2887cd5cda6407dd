#![allow(unexpected_cfgs)]
use anchor_lang::prelude::*;

pub mod constants;
pub mod instructions;
pub mod state;

use crate::instructions::*;
use crate::state::*;

declare_id!("51xsEXr5esrfzp7HsgwBvTVGsB14zhwkbcp7hnwHKEL7");

#[program]
pub mod relief_fund {
    use super::*;

    pub fn initialize(ctx: Context<Initialize>, name: String) -> Result<()> {
        ctx.accounts.initialize(name, &ctx.bumps)?;
        Ok(())
    }

    pub fn grant_role(ctx: Context<GrantRole>, role: Role, principal: Pubkey) -> Result<()> {
        ctx.accounts.grant_role(role, principal, &ctx.bumps)?;
        Ok(())
    }
    pub fn revoke_role(ctx: Context<RevokeRole>, role: Role, principal: Pubkey) -> Result<()> {
        ctx.accounts.revoke_role(role, principal)?;
        Ok(())
    }

    pub fn register_beneficiary(ctx: Context<RegisterBeneficiary>, principal: Pubkey) -> Result<()> {
        ctx.accounts.register_beneficiary(principal, &ctx.bumps)?;
        Ok(())
    }
    pub fn calculate_impact_score(
        ctx: Context<CalculateImpactScore>,
        principal: Pubkey,
        factor_a: u8,
        factor_b: u8,
    ) -> Result<()> {
        ctx.accounts.calculate_impact_score(principal, factor_a, factor_b)?;
        Ok(())
    }

    pub fn deposit_funds(ctx: Context<DepositFunds>, amount: u64) -> Result<()> {
        ctx.accounts.deposit_funds(amount, &ctx.bumps)?;
        Ok(())
    }
    pub fn release_all_funds<'info>(ctx: Context<'_, '_, '_, 'info, ReleaseAllFunds<'info>>) -> Result<()> {
        ctx.accounts.release_all_funds(ctx.remaining_accounts)?;
        Ok(())
    }
    pub fn spend_funds(ctx: Context<SpendFunds>, category: u8, amount: u64) -> Result<()> {
        ctx.accounts.spend_funds(category, amount, &ctx.bumps)?;
        Ok(())
    }

    pub fn has_role(ctx: Context<HasRole>, role: Role, principal: Pubkey) -> Result<bool> {
        ctx.accounts.has_role(role, principal)
    }
    pub fn is_beneficiary_registered(ctx: Context<BeneficiaryQuery>, _principal: Pubkey) -> Result<bool> {
        ctx.accounts.is_registered()
    }
    pub fn get_impact_score(ctx: Context<BeneficiaryQuery>, _principal: Pubkey) -> Result<u8> {
        ctx.accounts.impact_score()
    }
    pub fn get_total_funds(ctx: Context<BeneficiaryQuery>, _principal: Pubkey) -> Result<u64> {
        ctx.accounts.total_funds()
    }
    pub fn get_spent(ctx: Context<SpentQuery>, _principal: Pubkey, _category: u8) -> Result<u64> {
        ctx.accounts.spent()
    }
}
